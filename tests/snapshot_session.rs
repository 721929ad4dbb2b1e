//! Visualizing containers recorded in a snapshot session.

use pretty_assertions::assert_eq;
use trieviz::snapshot::{Snapshot, Variable};
use trieviz::{
    visualizer_for, DotRenderer, Identity, KeyMapping, PreviewConfig, PreviewPipeline, VisError,
};

const SESSION: &str = r#"{
  "stops": [
    {
      "location": "assoc_common.cc:936",
      "frames": [
        { "function": "advance",
          "variables": {
            "it": { "kind": "iterator", "node": { "address": "0x1010", "value": true } }
          } },
        { "function": "TestBody",
          "variables": {
            "t":  { "kind": "container", "type_name": "rmr::detail::trie<char, int>",
                    "root": { "address": "0x1000", "value": false,
                              "children": [null, { "address": "0x1010", "value": true }] } },
            "n":  { "kind": "node", "address": "0x1000" },
            "i":  { "kind": "scalar", "value": 3 },
            "m":  { "kind": "container", "type_name": "std::map<char, int>",
                    "root": { "address": "0x2000" } }
          } }
      ]
    },
    {
      "location": "tst_common.cc:40",
      "frames": [
        { "function": "TestBody",
          "variables": {
            "t": { "kind": "container", "type_name": "ternary_search_tree<char, int>",
                   "root": { "address": 4096, "label": "b",
                             "children": { "1": { "address": 4112, "label": "e", "value": true } } } }
          } }
      ]
    }
  ]
}"#;

fn session() -> Snapshot {
    Snapshot::from_json(SESSION).unwrap()
}

#[test]
fn test_render_with_iterator_from_inner_frame() {
    let snapshot = session();
    let stop = snapshot.stop(0).unwrap();

    let mut vis = visualizer_for(stop.find_variable("t").unwrap().as_container("t").unwrap()).unwrap();
    stop.find_variable("it").unwrap().mark_on("it", &mut vis).unwrap();
    assert_eq!(vis.highlighter().color_for(Identity(0x1010)), Some("red"));

    let renderer = DotRenderer::new()
        .with_graph_name("t")
        .with_key_mapping(KeyMapping::Decimal);
    let dot = vis.render(&renderer).unwrap();
    let expected = "\
digraph t {
// nodes
  node [shape = circle, color = black];
  \"0x0000000000001000\" [label = \"\"];
  node [shape = doublecircle, color = red];
  \"0x0000000000001010\" [label = \"\"];

// edges
  \"0x0000000000001000\" -> \"0x0000000000001010\" [label = \"1\"];
}
";
    assert_eq!(dot, expected);
}

#[test]
fn test_tst_stop_with_sparse_children() {
    let snapshot = session();
    let stop = snapshot.stops_at("tst_common.cc:40").next().unwrap();
    let vis = visualizer_for(stop.find_variable("t").unwrap().as_container("t").unwrap()).unwrap();

    let graph = vis.graph();
    assert_eq!(graph.root(), Identity(0x1000));
    assert_eq!(graph.edges(Identity(0x1000))[0].discriminant, 1);
    assert_eq!(
        graph.stored_keys(vis.kind()),
        vec![(Identity(0x1010), vec!['b' as u32, 'e' as u32])]
    );
}

#[test]
fn test_lookup_failures() {
    let snapshot = session();
    let stop = snapshot.stop(0).unwrap();

    assert!(matches!(
        stop.find_variable("missing"),
        Err(VisError::VariableNotFound { .. })
    ));
    let mut vis = visualizer_for(stop.find_variable("t").unwrap().as_container("t").unwrap()).unwrap();
    assert!(matches!(
        stop.find_variable("i").unwrap().mark_on("i", &mut vis),
        Err(VisError::MalformedMarkTarget { .. })
    ));
    assert!(matches!(
        visualizer_for(stop.find_variable("m").unwrap().as_container("m").unwrap()),
        Err(VisError::UnknownContainerKind { .. })
    ));
    assert!(matches!(snapshot.stop(5), Err(VisError::InvalidHandle { .. })));
}

#[test]
fn test_node_variable_marks_itself() {
    let snapshot = session();
    let stop = snapshot.stop(0).unwrap();
    let variable = stop.find_variable("n").unwrap();
    assert!(matches!(variable, Variable::Node(_)));

    let mut vis = visualizer_for(stop.find_variable("t").unwrap().as_container("t").unwrap()).unwrap();
    variable.mark_on("n", &mut vis).unwrap();
    assert_eq!(vis.highlighter().color_for(Identity(0x1000)), Some("red"));
    assert_eq!(vis.highlighter().color_for(Identity(0x1010)), None);
}

#[test]
fn test_malformed_snapshot() {
    let err = Snapshot::from_json(r#"{ "stops": [ { "location": 3 } ] }"#).unwrap_err();
    assert!(matches!(err, VisError::Snapshot(_)));
}

#[cfg(unix)]
#[test]
fn test_quicklook_with_stand_in_tools() {
    let snapshot = session();
    let stop = snapshot.stop(0).unwrap();
    let vis = visualizer_for(stop.find_variable("t").unwrap().as_container("t").unwrap()).unwrap();

    let pipeline = PreviewPipeline::new(PreviewConfig {
        rasterizer: "true".to_string(),
        format: "svg".to_string(),
        viewer: vec!["true".to_string()],
    });
    let outcome = vis.quicklook(&pipeline, &DotRenderer::default()).unwrap();
    assert!(outcome.success());

    let failing = PreviewPipeline::new(PreviewConfig {
        rasterizer: "false".to_string(),
        ..pipeline.config().clone()
    });
    let outcome = vis.quicklook(&failing, &DotRenderer::default()).unwrap();
    assert!(outcome.viewer.is_none());
}

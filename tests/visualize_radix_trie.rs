//! End-to-end visualization of radix tries through the public API.

use pretty_assertions::assert_eq;
use trieviz::graph::TreeEdge;
use trieviz::snapshot::{SnapshotContainer, SnapshotIterator, SnapshotNode};
use trieviz::{
    visualizer_for, ContainerHandle, DotRenderer, Identity, KeyMapping, NodeHandle, TreeKind,
    VisError,
};

/// A trie over the alphabet `a..=z` stored in an arena, standing in for a
/// backend that reads live memory.
struct ArenaTrie {
    nodes: Vec<ArenaNode>,
}

struct ArenaNode {
    value: bool,
    children: [Option<usize>; 26],
}

impl ArenaTrie {
    fn new() -> Self {
        Self {
            nodes: vec![ArenaNode {
                value: false,
                children: [None; 26],
            }],
        }
    }

    fn insert(&mut self, key: &str) {
        let mut at = 0;
        for c in key.bytes() {
            let slot = usize::from(c - b'a');
            at = match self.nodes[at].children[slot] {
                Some(next) => next,
                None => {
                    self.nodes.push(ArenaNode {
                        value: false,
                        children: [None; 26],
                    });
                    let next = self.nodes.len() - 1;
                    self.nodes[at].children[slot] = Some(next);
                    next
                }
            };
        }
        self.nodes[at].value = true;
    }
}

#[derive(Clone, Copy)]
struct ArenaHandle<'a> {
    trie: &'a ArenaTrie,
    index: usize,
}

impl NodeHandle for ArenaHandle<'_> {
    fn identity(&self) -> Result<Identity, VisError> {
        Ok(Identity(0x7000 + 0x40 * self.index as u64))
    }

    fn has_terminal_value(&self) -> Result<bool, VisError> {
        Ok(self.trie.nodes[self.index].value)
    }

    fn scalar_payload(&self) -> Result<Option<u32>, VisError> {
        Ok(None)
    }

    fn child_slots(&self) -> Result<Vec<Option<Self>>, VisError> {
        Ok(self.trie.nodes[self.index]
            .children
            .iter()
            .map(|c| {
                c.map(|index| ArenaHandle {
                    trie: self.trie,
                    index,
                })
            })
            .collect())
    }
}

impl ContainerHandle for ArenaTrie {
    type Node<'a> = ArenaHandle<'a>;

    fn type_name(&self) -> Result<String, VisError> {
        Ok("rmr::detail::trie<char, bool, 26>".to_string())
    }

    fn root(&self) -> Result<ArenaHandle<'_>, VisError> {
        Ok(ArenaHandle {
            trie: self,
            index: 0,
        })
    }
}

/// Root without a value, children at slots 0 and 2, the slot-2 child terminal.
fn two_children() -> SnapshotContainer {
    SnapshotContainer {
        type_name: "trie<char, int>".to_string(),
        root: Some(
            SnapshotNode::new(Identity(0x100), false)
                .with_child(0, SnapshotNode::new(Identity(0x110), false))
                .with_child(2, SnapshotNode::new(Identity(0x120), true)),
        ),
    }
}

#[test]
fn test_two_children_scenario() {
    let vis = visualizer_for(&two_children()).unwrap();
    assert_eq!(vis.kind(), TreeKind::RadixTrie);

    let graph = vis.graph();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(
        graph.edges(Identity(0x100)),
        &[
            TreeEdge::new(0, Identity(0x110)),
            TreeEdge::new(2, Identity(0x120)),
        ]
    );

    let dot = vis
        .render(&DotRenderer::new().with_key_mapping(KeyMapping::Decimal))
        .unwrap();
    let expected = "\
digraph _ {
// nodes
  node [shape = circle, color = black];
  \"0x0000000000000100\" [label = \"\"];
  node [shape = circle, color = black];
  \"0x0000000000000110\" [label = \"\"];
  node [shape = doublecircle, color = black];
  \"0x0000000000000120\" [label = \"\"];

// edges
  \"0x0000000000000100\" -> \"0x0000000000000110\" [label = \"0\"];
  \"0x0000000000000100\" -> \"0x0000000000000120\" [label = \"2\"];
}
";
    assert_eq!(dot, expected);
}

#[test]
fn test_control_slots_under_char_mapping() {
    let dot = visualizer_for(&two_children())
        .unwrap()
        .render(&DotRenderer::default())
        .unwrap();
    assert!(dot.chars().all(|c| c == '\n' || !c.is_control()));

    let edges: Vec<&str> = dot.lines().filter(|l| l.contains("->")).collect();
    assert_eq!(
        edges,
        vec![
            "  \"0x0000000000000100\" -> \"0x0000000000000110\" [label = \"\\\\0\"];",
            "  \"0x0000000000000100\" -> \"0x0000000000000120\" [label = \"\\\\u{2}\"];",
        ]
    );
}

#[test]
fn test_arena_backend() {
    let mut trie = ArenaTrie::new();
    for key in ["tea", "ten", "to", "inn", "in", "i", "a"] {
        trie.insert(key);
    }

    let vis = visualizer_for(&trie).unwrap();
    let graph = vis.graph();

    // root, a, i, in, inn, t, te, tea, ten, to
    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.edge_count(), 9);
    for (_, edges) in graph.iter() {
        assert!(edges.windows(2).all(|w| w[0].discriminant < w[1].discriminant));
    }

    let renderer = DotRenderer::new().with_key_mapping(KeyMapping::CountFrom('a' as u32));
    let mut keys: Vec<String> = graph
        .stored_keys(vis.kind())
        .into_iter()
        .map(|(_, digits)| digits.iter().map(|&d| renderer.key_mapping().label(d)).collect())
        .collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "i", "in", "inn", "tea", "ten", "to"]);

    let dot = vis.render(&renderer).unwrap();
    assert_eq!(dot.matches("doublecircle").count(), 7);
    assert!(dot.contains("[label = \"t\"];"));
    assert!(graph.validate().is_ok());
}

#[test]
fn test_rendering_is_deterministic() {
    let renderer = DotRenderer::default();
    let mut first = visualizer_for(&two_children()).unwrap();
    first.mark(Identity(0x110));
    let mut second = visualizer_for(&two_children()).unwrap();
    second.mark(Identity(0x110));

    assert_eq!(first.render(&renderer).unwrap(), first.render(&renderer).unwrap());
    assert_eq!(first.render(&renderer).unwrap(), second.render(&renderer).unwrap());
}

#[test]
fn test_mark_changes_only_one_color() {
    let renderer = DotRenderer::new().with_key_mapping(KeyMapping::Decimal);
    let mut vis = visualizer_for(&two_children()).unwrap();
    let plain = vis.render(&renderer).unwrap();

    vis.mark(Identity(0x110));
    let marked = vis.render(&renderer).unwrap();

    let changed: Vec<(&str, &str)> = plain
        .lines()
        .zip(marked.lines())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(
        changed,
        vec![(
            "  node [shape = circle, color = black];",
            "  node [shape = circle, color = red];"
        )]
    );
    assert_eq!(plain.lines().count(), marked.lines().count());
}

#[test]
fn test_iterator_mark_equals_node_mark() {
    let container = two_children();
    let renderer = DotRenderer::default();

    let mut direct = visualizer_for(&container).unwrap();
    let root = container.root().unwrap();
    let child = root.child_slots().unwrap()[2].unwrap();
    direct.mark_node(&child).unwrap();

    let iterator = SnapshotIterator {
        node: Some(SnapshotNode::new(Identity(0x120), true)),
    };
    let mut via_iterator = visualizer_for(&container).unwrap();
    via_iterator.mark_iterator(&iterator).unwrap();

    assert_eq!(
        direct.render(&renderer).unwrap(),
        via_iterator.render(&renderer).unwrap()
    );
}

#[test]
fn test_rebuild_keeps_marks() {
    let mut vis = visualizer_for(&two_children()).unwrap();
    vis.mark_with(Identity(0x120), "blue");

    let grown = SnapshotContainer {
        type_name: "trie<char, int>".to_string(),
        root: Some(
            SnapshotNode::new(Identity(0x100), false)
                .with_child(0, SnapshotNode::new(Identity(0x110), false))
                .with_child(2, SnapshotNode::new(Identity(0x120), true))
                .with_child(5, SnapshotNode::new(Identity(0x130), true)),
        ),
    };
    vis.rebuild(&grown).unwrap();

    assert_eq!(vis.graph().node_count(), 4);
    assert_eq!(vis.highlighter().color_for(Identity(0x120)), Some("blue"));

    let tst = SnapshotContainer {
        type_name: "ternary_search_tree<char, int>".to_string(),
        root: Some(SnapshotNode::new(Identity(0x100), false)),
    };
    assert!(matches!(vis.rebuild(&tst), Err(VisError::InvalidHandle { .. })));
}

#[test]
fn test_unknown_container_kind() {
    let container = SnapshotContainer {
        type_name: "std::map<char, int>".to_string(),
        root: Some(SnapshotNode::new(Identity(0x100), false)),
    };
    let err = visualizer_for(&container).unwrap_err();
    assert!(
        matches!(err, VisError::UnknownContainerKind { ref type_name } if type_name == "std::map<char, int>")
    );
}

#[test]
fn test_write_dot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trie.dot");
    let vis = visualizer_for(&two_children()).unwrap();
    let renderer = DotRenderer::default();

    vis.write_dot(&path, &renderer).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        vis.render(&renderer).unwrap()
    );
}

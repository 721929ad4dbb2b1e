//! GraphML export for graph visualization.
//!
//! GraphML is an XML-based format for graph exchange that is widely supported
//! by graph visualization tools like yEd, Gephi, Cytoscape, etc.

use crate::error::VisError;
use crate::highlight::Highlighter;
use crate::keys::KeyMapping;
use crate::kind::RenderRules;
use crate::render::dot::DEFAULT_VERTEX_COLOR;
use crate::TreeGraph;
use std::fmt::Write;

/// Render a tree graph as GraphML XML.
///
/// The output includes:
/// - Node attributes: address, has_value, shape, label, color
/// - Edge attributes: discriminant, label
pub fn render_graphml(
    graph: &TreeGraph,
    rules: &RenderRules,
    keys: &KeyMapping,
    marks: &Highlighter,
) -> Result<String, VisError> {
    let mut output = String::new();

    // XML header and GraphML schema
    writeln!(output, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(output, r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns""#)?;
    writeln!(output, r#"         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#)?;
    writeln!(output, r#"         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns"#)?;
    writeln!(output, r#"         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#)?;

    // Define node attributes
    writeln!(
        output,
        r#"  <key id="has_value" for="node" attr.name="has_value" attr.type="boolean"/>"#
    )?;
    writeln!(output, r#"  <key id="shape" for="node" attr.name="shape" attr.type="string"/>"#)?;
    writeln!(output, r#"  <key id="label" for="node" attr.name="label" attr.type="string"/>"#)?;
    writeln!(output, r#"  <key id="color" for="node" attr.name="color" attr.type="string"/>"#)?;

    // Define edge attributes
    writeln!(
        output,
        r#"  <key id="discriminant" for="edge" attr.name="discriminant" attr.type="int"/>"#
    )?;
    writeln!(
        output,
        r#"  <key id="edge_label" for="edge" attr.name="label" attr.type="string"/>"#
    )?;

    writeln!(
        output,
        r#"  <graph id="G" edgedefault="directed">"#
    )?;

    for vertex in graph.vertices() {
        let color = marks
            .color_for(vertex.identity)
            .unwrap_or(DEFAULT_VERTEX_COLOR);
        let label = rules.vertex_label.label_for(vertex, keys);

        writeln!(output, r#"    <node id="{}">"#, vertex.identity)?;
        writeln!(output, r#"      <data key="has_value">{}</data>"#, vertex.has_value)?;
        writeln!(
            output,
            r#"      <data key="shape">{}</data>"#,
            rules.shape.shape_for(vertex)
        )?;
        writeln!(output, r#"      <data key="label">{}</data>"#, escape_xml(&label))?;
        writeln!(output, r#"      <data key="color">{}</data>"#, escape_xml(color))?;
        writeln!(output, r#"    </node>"#)?;
    }

    let mut edge_id = 0usize;
    for (vertex, edges) in graph.iter() {
        for edge in edges {
            let label = rules.edge_label.label_for(edge.discriminant, keys);
            writeln!(
                output,
                r#"    <edge id="e{}" source="{}" target="{}">"#,
                edge_id, vertex.identity, edge.to
            )?;
            writeln!(
                output,
                r#"      <data key="discriminant">{}</data>"#,
                edge.discriminant
            )?;
            writeln!(output, r#"      <data key="edge_label">{}</data>"#, escape_xml(&label))?;
            writeln!(output, r#"    </edge>"#)?;
            edge_id += 1;
        }
    }

    // Close graph and graphml
    writeln!(output, r#"  </graph>"#)?;
    writeln!(output, r#"</graphml>"#)?;

    Ok(output)
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

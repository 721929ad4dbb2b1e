//! Graphviz DOT rendering.
//!
//! The output layout is fixed so that tools consuming it (and tests) can rely
//! on it byte for byte:
//!
//! ```text
//! digraph _ {
//! // nodes
//!   node [shape = circle, color = black];
//!   "0x0000000000001000" [label = ""];
//!
//! // edges
//!   "0x0000000000001000" -> "0x0000000000001010" [label = "a"];
//! }
//! ```
//!
//! Vertices appear in graph order, each preceded by a `node` default
//! statement carrying its shape and color; edges follow vertex order, then
//! slot order.

use crate::error::VisError;
use crate::highlight::Highlighter;
use crate::keys::KeyMapping;
use crate::kind::{RenderRules, RuleTable, TreeKind};
use crate::TreeGraph;
use std::fmt::Write;
use tracing::debug;

/// Color of vertices that are not marked.
pub const DEFAULT_VERTEX_COLOR: &str = "black";

/// Renders tree graphs as DOT text using a per-kind rule table.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    graph_name: String,
    keys: KeyMapping,
    rules: RuleTable,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            graph_name: "_".to_string(),
            keys: KeyMapping::default(),
            rules: RuleTable::default(),
        }
    }
}

impl DotRenderer {
    /// Create a renderer with the default graph name, key mapping and rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name written after `digraph`.
    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    /// Set the mapping used to turn discriminants and payloads into labels.
    pub fn with_key_mapping(mut self, keys: KeyMapping) -> Self {
        self.keys = keys;
        self
    }

    /// Replace the rule table.
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Get the key mapping.
    pub fn key_mapping(&self) -> &KeyMapping {
        &self.keys
    }

    /// Look up the rules for a kind.
    pub fn rules_for(&self, kind: TreeKind) -> Result<&RenderRules, VisError> {
        self.rules.rules_for(kind)
    }

    /// Render a graph to a string.
    pub fn render(
        &self,
        kind: TreeKind,
        graph: &TreeGraph,
        marks: &Highlighter,
    ) -> Result<String, VisError> {
        let mut output = String::new();
        self.render_to(&mut output, kind, graph, marks)?;
        Ok(output)
    }

    /// Render a graph into any formatter sink.
    pub fn render_to<W: Write>(
        &self,
        output: &mut W,
        kind: TreeKind,
        graph: &TreeGraph,
        marks: &Highlighter,
    ) -> Result<(), VisError> {
        let rules = self.rules.rules_for(kind)?;

        writeln!(output, "digraph {} {{", dot_id(&self.graph_name))?;

        writeln!(output, "// nodes")?;
        for (vertex, _) in graph.iter() {
            let color = marks
                .color_for(vertex.identity)
                .unwrap_or(DEFAULT_VERTEX_COLOR);
            writeln!(
                output,
                "  node [shape = {}, color = {}];",
                rules.shape.shape_for(vertex),
                dot_id(color)
            )?;
            writeln!(
                output,
                "  \"{}\" [label = \"{}\"];",
                vertex.identity,
                escape_dot(&rules.vertex_label.label_for(vertex, &self.keys))
            )?;
        }

        writeln!(output)?;
        writeln!(output, "// edges")?;
        for (vertex, edges) in graph.iter() {
            for edge in edges {
                writeln!(
                    output,
                    "  \"{}\" -> \"{}\" [label = \"{}\"];",
                    vertex.identity,
                    edge.to,
                    escape_dot(&rules.edge_label.label_for(edge.discriminant, &self.keys))
                )?;
            }
        }

        writeln!(output, "}}")?;

        debug!(
            %kind,
            vertices = graph.node_count(),
            edges = graph.edge_count(),
            marks = marks.len(),
            "rendered dot"
        );
        Ok(())
    }
}

/// Escape text for use inside a double-quoted DOT string.
pub(crate) fn escape_dot(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            // Spelled out, with the backslash doubled so it survives as text.
            c if c.is_control() => {
                for e in c.escape_debug() {
                    if e == '\\' {
                        escaped.push('\\');
                    }
                    escaped.push(e);
                }
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Write `s` as a bare DOT identifier if it is one, quoted otherwise.
fn dot_id(s: &str) -> String {
    let bare = !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        s.to_string()
    } else {
        format!("\"{}\"", escape_dot(s))
    }
}

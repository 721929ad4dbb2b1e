//! ASCII rendering for terminal display.
//!
//! Draws the tree top-down with box-drawing connectors. Each line shows the
//! edge label leading to a node, a shape glyph (`○` for inner nodes, `◎` for
//! nodes carrying a value), the node label if the kind has one, the node
//! address, and the mark color in brackets.

use crate::edges::TreeEdge;
use crate::highlight::Highlighter;
use crate::keys::KeyMapping;
use crate::kind::RenderRules;
use crate::nodes::{Identity, Vertex};
use crate::TreeGraph;
use std::collections::HashSet;

/// An edge still to be drawn, the connector prefix of its parent's line, and
/// whether it is the parent's last edge.
type Pending = (TreeEdge, String, bool);

/// Render a tree graph as an ASCII tree.
pub fn render_ascii(
    graph: &TreeGraph,
    rules: &RenderRules,
    keys: &KeyMapping,
    marks: &Highlighter,
) -> String {
    let mut output = String::new();
    let ctx = Context {
        graph,
        rules,
        keys,
        marks,
    };
    ctx.render_tree(&mut output);
    output
}

struct Context<'a> {
    graph: &'a TreeGraph,
    rules: &'a RenderRules,
    keys: &'a KeyMapping,
    marks: &'a Highlighter,
}

impl Context<'_> {
    fn render_tree(&self, output: &mut String) {
        let Some(root) = self.graph.vertex(self.graph.root()) else {
            return;
        };
        output.push_str(&self.describe(root));
        output.push('\n');

        // Explicit stack, like the builder: deep tries would overflow recursion.
        let mut seen = HashSet::from([root.identity]);
        let mut stack = Vec::new();
        self.push_children(&mut stack, root.identity, String::new());

        while let Some((edge, prefix, is_last)) = stack.pop() {
            let Some(child) = self.graph.vertex(edge.to) else {
                continue;
            };
            if !seen.insert(edge.to) {
                continue;
            }

            output.push_str(&prefix);
            output.push_str(if is_last { "└── " } else { "├── " });
            output.push_str(&self.rules.edge_label.label_for(edge.discriminant, self.keys));
            output.push_str(": ");
            output.push_str(&self.describe(child));
            output.push('\n');

            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            self.push_children(&mut stack, edge.to, child_prefix);
        }
    }

    /// Queue a vertex's edges so that they pop in graph order.
    fn push_children(&self, stack: &mut Vec<Pending>, parent: Identity, prefix: String) {
        let edges = self.graph.edges(parent);
        for (i, edge) in edges.iter().enumerate().rev() {
            stack.push((*edge, prefix.clone(), i + 1 == edges.len()));
        }
    }

    fn describe(&self, vertex: &Vertex) -> String {
        let glyph = if vertex.has_value { "◎" } else { "○" };
        let label = self.rules.vertex_label.label_for(vertex, self.keys);
        let mut text = if label.is_empty() {
            format!("{} {}", glyph, vertex.identity)
        } else {
            format!("{} '{}' {}", glyph, label, vertex.identity)
        };
        if let Some(color) = self.marks.color_for(vertex.identity) {
            text.push_str(&format!(" [{}]", color));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_ascii_tree() {
        let mut graph = TreeGraph::new(Vertex::new(Identity(1), false));
        graph.add_vertex(Vertex::new(Identity(2), false));
        graph.add_vertex(Vertex::new(Identity(3), true));
        graph.add_vertex(Vertex::new(Identity(4), true));
        graph.add_edge(Identity(1), 'a' as u32, Identity(2)).unwrap();
        graph.add_edge(Identity(2), 'b' as u32, Identity(3)).unwrap();
        graph.add_edge(Identity(1), 'c' as u32, Identity(4)).unwrap();

        let mut marks = Highlighter::new();
        marks.mark(Identity(3), "red");

        let ascii = render_ascii(
            &graph,
            &RenderRules::radix_trie(),
            &KeyMapping::default(),
            &marks,
        );
        let expected = "\
○ 0x0000000000000001
├── a: ○ 0x0000000000000002
│   └── b: ◎ 0x0000000000000003 [red]
└── c: ◎ 0x0000000000000004
";
        assert_eq!(ascii, expected);
    }

    #[test]
    fn test_render_ascii_tst_labels() {
        let mut graph = TreeGraph::new(Vertex::new(Identity(1), false).with_label('b' as u32));
        graph.add_vertex(Vertex::new(Identity(2), true).with_label('e' as u32));
        graph.add_edge(Identity(1), 1, Identity(2)).unwrap();

        let ascii = render_ascii(
            &graph,
            &RenderRules::ternary_search_tree(),
            &KeyMapping::default(),
            &Highlighter::new(),
        );
        assert_eq!(
            ascii,
            "○ 'b' 0x0000000000000001\n└── m: ◎ 'e' 0x0000000000000002\n"
        );
    }

    #[test]
    fn test_render_ascii_deep_chain_on_small_stack() {
        let depth = 3_000u64;
        let mut graph = TreeGraph::new(Vertex::new(Identity(0), false));
        for n in 1..=depth {
            graph.add_vertex(Vertex::new(Identity(n), n == depth));
            graph.add_edge(Identity(n - 1), 'a' as u32, Identity(n)).unwrap();
        }

        let ascii = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || {
                render_ascii(
                    &graph,
                    &RenderRules::radix_trie(),
                    &KeyMapping::default(),
                    &Highlighter::new(),
                )
            })
            .unwrap()
            .join()
            .unwrap();

        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!(lines.len(), depth as usize + 1);
        let last = format!("{}└── a: ◎ {}", " ".repeat(4 * (depth as usize - 1)), Identity(depth));
        assert_eq!(lines.last().copied(), Some(last.as_str()));
    }
}

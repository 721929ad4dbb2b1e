//! Tree kinds and the per-kind render rules.

use crate::edges::TstSlot;
use crate::error::VisError;
use crate::keys::KeyMapping;
use crate::nodes::Vertex;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of tree the visualizer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    /// A trie with one child slot per key digit
    RadixTrie,
    /// A ternary search tree with left/mid/right children
    TernarySearchTree,
}

impl TreeKind {
    /// Select the tree kind from a container's declared type name.
    ///
    /// Qualifiers, namespaces and template arguments are ignored, so
    /// `const rmr::detail::trie<char, int, 26>` is a radix trie.
    pub fn from_type_name(type_name: &str) -> Result<Self, VisError> {
        let base = base_type_name(type_name);
        let is = |family: &[&str]| family.iter().any(|f| in_family(base, f));
        if is(&["trie", "radix_trie"]) {
            Ok(TreeKind::RadixTrie)
        } else if is(&["ternary_search_tree", "tst"]) {
            Ok(TreeKind::TernarySearchTree)
        } else {
            Err(VisError::UnknownContainerKind {
                type_name: type_name.to_string(),
            })
        }
    }

    /// Get a short name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::RadixTrie => "radix_trie",
            TreeKind::TernarySearchTree => "ternary_search_tree",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check if `base` is `family` itself or a `family_` variant such as `trie_map`.
fn in_family(base: &str, family: &str) -> bool {
    base.strip_prefix(family)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('_'))
}

/// Strip qualifiers, template arguments and namespaces from a type name.
fn base_type_name(type_name: &str) -> &str {
    let mut name = type_name.trim();
    for qualifier in ["const ", "volatile ", "struct ", "class "] {
        if let Some(rest) = name.strip_prefix(qualifier) {
            name = rest.trim_start();
        }
    }
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name).trim()
}

/// How a vertex's shape is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRule {
    /// Shape for vertices carrying a value
    pub terminal: &'static str,
    /// Shape for all other vertices
    pub inner: &'static str,
}

impl ShapeRule {
    /// Pick the shape for a vertex.
    pub fn shape_for(&self, vertex: &Vertex) -> &'static str {
        if vertex.has_value {
            self.terminal
        } else {
            self.inner
        }
    }
}

impl Default for ShapeRule {
    fn default() -> Self {
        Self {
            terminal: "doublecircle",
            inner: "circle",
        }
    }
}

/// How a vertex's label text is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLabelRule {
    /// No label
    Empty,
    /// The node's stored scalar, through the key mapping
    Payload,
}

impl VertexLabelRule {
    /// Produce the label for a vertex.
    pub fn label_for(&self, vertex: &Vertex, keys: &KeyMapping) -> String {
        match (self, vertex.label) {
            (VertexLabelRule::Payload, Some(value)) => keys.label(value),
            _ => String::new(),
        }
    }
}

/// How an edge's label text is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLabelRule {
    /// The discriminant, through the key mapping
    KeyMapped,
    /// The fixed left/mid/right labels of a ternary search tree
    TernarySlots,
}

impl EdgeLabelRule {
    /// Produce the label for an edge with the given discriminant.
    pub fn label_for(&self, discriminant: u32, keys: &KeyMapping) -> String {
        match self {
            EdgeLabelRule::KeyMapped => keys.label(discriminant),
            EdgeLabelRule::TernarySlots => TstSlot::from_discriminant(discriminant)
                .map(|slot| slot.label().to_string())
                .unwrap_or_else(|| discriminant.to_string()),
        }
    }
}

/// The rules a renderer applies to one tree kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRules {
    /// Vertex shape
    pub shape: ShapeRule,
    /// Vertex label
    pub vertex_label: VertexLabelRule,
    /// Edge label
    pub edge_label: EdgeLabelRule,
}

impl RenderRules {
    /// Rules for radix tries: unlabeled vertices, key-mapped edges.
    pub fn radix_trie() -> Self {
        Self {
            shape: ShapeRule::default(),
            vertex_label: VertexLabelRule::Empty,
            edge_label: EdgeLabelRule::KeyMapped,
        }
    }

    /// Rules for ternary search trees: vertices labeled with their character,
    /// edges labeled `l`, `m` and `r`.
    pub fn ternary_search_tree() -> Self {
        Self {
            shape: ShapeRule::default(),
            vertex_label: VertexLabelRule::Payload,
            edge_label: EdgeLabelRule::TernarySlots,
        }
    }
}

/// Lookup table from tree kind to render rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: IndexMap<TreeKind, RenderRules>,
}

impl RuleTable {
    /// Create a table with no rules.
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Add or replace the rules for a kind.
    pub fn with(mut self, kind: TreeKind, rules: RenderRules) -> Self {
        self.rules.insert(kind, rules);
        self
    }

    /// Look up the rules for a kind.
    pub fn rules_for(&self, kind: TreeKind) -> Result<&RenderRules, VisError> {
        self.rules
            .get(&kind)
            .ok_or(VisError::UnsupportedKind { kind })
    }

    /// Iterate the kinds this table covers.
    pub fn kinds(&self) -> impl Iterator<Item = TreeKind> + '_ {
        self.rules.keys().copied()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::empty()
            .with(TreeKind::RadixTrie, RenderRules::radix_trie())
            .with(TreeKind::TernarySearchTree, RenderRules::ternary_search_tree())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Identity;

    #[test]
    fn test_kind_from_type_name() {
        let cases = [
            ("trie<char, int, 26>", TreeKind::RadixTrie),
            ("rmr::detail::trie<std::string, int>", TreeKind::RadixTrie),
            ("const trie_map<int>", TreeKind::RadixTrie),
            ("moat::radix_trie<int>", TreeKind::RadixTrie),
            (
                "rmr::detail::ternary_search_tree<int, std::less<char>>",
                TreeKind::TernarySearchTree,
            ),
            ("tst_map<int>", TreeKind::TernarySearchTree),
        ];
        for (name, expected) in cases {
            assert_eq!(TreeKind::from_type_name(name).unwrap(), expected, "{}", name);
        }
    }

    #[test]
    fn test_unknown_type_name() {
        let err = TreeKind::from_type_name("std::map<int, int>").unwrap_err();
        assert!(
            matches!(err, VisError::UnknownContainerKind { ref type_name } if type_name == "std::map<int, int>")
        );
    }

    #[test]
    fn test_names_sharing_a_prefix_are_unknown() {
        for name in ["triedb::Handle", "triedb", "tstring<char>", "tries<int>", "tsts"] {
            assert!(
                matches!(TreeKind::from_type_name(name), Err(VisError::UnknownContainerKind { .. })),
                "{}",
                name
            );
        }
        assert_eq!(TreeKind::from_type_name("trie").unwrap(), TreeKind::RadixTrie);
        assert_eq!(TreeKind::from_type_name("tst_set<char>").unwrap(), TreeKind::TernarySearchTree);
    }

    #[test]
    fn test_shape_rule() {
        let rule = ShapeRule::default();
        assert_eq!(rule.shape_for(&Vertex::new(Identity(1), true)), "doublecircle");
        assert_eq!(rule.shape_for(&Vertex::new(Identity(1), false)), "circle");
    }

    #[test]
    fn test_ternary_edge_labels() {
        let keys = KeyMapping::default();
        let labels: Vec<String> = (0..4)
            .map(|d| EdgeLabelRule::TernarySlots.label_for(d, &keys))
            .collect();
        assert_eq!(labels, vec!["l", "m", "r", "3"]);
    }

    #[test]
    fn test_vertex_label_rules() {
        let keys = KeyMapping::default();
        let vertex = Vertex::new(Identity(1), false).with_label('q' as u32);
        assert_eq!(VertexLabelRule::Payload.label_for(&vertex, &keys), "q");
        assert_eq!(VertexLabelRule::Empty.label_for(&vertex, &keys), "");
        let bare = Vertex::new(Identity(2), false);
        assert_eq!(VertexLabelRule::Payload.label_for(&bare, &keys), "");
    }

    #[test]
    fn test_empty_rule_table_is_unsupported() {
        let err = RuleTable::empty().rules_for(TreeKind::RadixTrie).unwrap_err();
        assert!(matches!(err, VisError::UnsupportedKind { kind: TreeKind::RadixTrie }));
        assert_eq!(RuleTable::default().kinds().count(), 2);
    }
}

//! Query operations on the tree graph.

use crate::edges::{TreeEdge, TstSlot};
use crate::kind::TreeKind;
use crate::nodes::Identity;
use crate::TreeGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

type ParentIndex = HashMap<Identity, (Identity, TreeEdge)>;

/// Summary figures for a tree graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Number of vertices
    pub vertices: usize,
    /// Number of edges
    pub edges: usize,
    /// Number of vertices carrying a value
    pub terminals: usize,
    /// Number of edges on the longest root-to-leaf path
    pub height: usize,
}

impl TreeGraph {
    /// Compute summary figures.
    pub fn stats(&self) -> TreeStats {
        let mut height = 0;
        let mut seen = HashSet::new();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((identity, depth)) = stack.pop() {
            if !seen.insert(identity) {
                continue;
            }
            height = height.max(depth);
            stack.extend(self.edges(identity).iter().map(|e| (e.to, depth + 1)));
        }

        TreeStats {
            vertices: self.node_count(),
            edges: self.edge_count(),
            terminals: self.vertices().filter(|v| v.has_value).count(),
            height,
        }
    }

    /// Get the edges from the root down to a vertex, in path order.
    ///
    /// Returns `None` if the vertex is not in the graph or not reachable from
    /// the root, and an empty path for the root.
    pub fn path_to(&self, identity: Identity) -> Option<Vec<(Identity, TreeEdge)>> {
        self.path_in(&self.parent_index(), identity)
    }

    /// Reconstruct the key stored at a vertex as a sequence of key digits.
    ///
    /// For a radix trie this is the discriminant of every edge on the path.
    /// For a ternary search tree it is the character of every node left
    /// through its mid slot, followed by the vertex's own character.
    pub fn key_of(&self, kind: TreeKind, identity: Identity) -> Option<Vec<u32>> {
        self.key_in(&self.parent_index(), kind, identity)
    }

    /// Reconstruct every stored key, in graph order.
    pub fn stored_keys(&self, kind: TreeKind) -> Vec<(Identity, Vec<u32>)> {
        let parents = self.parent_index();
        self.vertices()
            .filter(|v| v.has_value)
            .filter_map(|v| self.key_in(&parents, kind, v.identity).map(|k| (v.identity, k)))
            .collect()
    }

    fn path_in(&self, parents: &ParentIndex, identity: Identity) -> Option<Vec<(Identity, TreeEdge)>> {
        if !self.contains(identity) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = identity;
        while current != self.root() {
            // A hand-built graph may loop without passing the root.
            if path.len() >= self.node_count() {
                return None;
            }
            let (parent, edge) = parents.get(&current).copied()?;
            path.push((parent, edge));
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    fn key_in(&self, parents: &ParentIndex, kind: TreeKind, identity: Identity) -> Option<Vec<u32>> {
        let path = self.path_in(parents, identity)?;
        match kind {
            TreeKind::RadixTrie => Some(path.iter().map(|(_, e)| e.discriminant).collect()),
            TreeKind::TernarySearchTree => {
                let mut key: Vec<u32> = path
                    .iter()
                    .filter(|(_, e)| TstSlot::from_discriminant(e.discriminant) == Some(TstSlot::Mid))
                    .filter_map(|(parent, _)| self.vertex(*parent).and_then(|v| v.label))
                    .collect();
                key.extend(self.vertex(identity).and_then(|v| v.label));
                Some(key)
            }
        }
    }

    fn parent_index(&self) -> ParentIndex {
        let mut parents = HashMap::with_capacity(self.node_count());
        for (vertex, edges) in self.iter() {
            for edge in edges {
                parents.entry(edge.to).or_insert((vertex.identity, *edge));
            }
        }
        parents
    }
}

//! Structural validation of tree graphs.
//!
//! Graphs produced by [`crate::TreeGraphBuilder`] are trees by construction.
//! Graphs assembled by hand through [`TreeGraph::add_vertex`] and
//! [`TreeGraph::add_edge`] may not be, and renderers do not care; this module
//! reports the difference.

use crate::error::ValidationError;
use crate::nodes::Identity;
use crate::TreeGraph;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Result of validating a tree graph.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Problems that mean the graph is not a tree
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Check if the graph is a well-formed tree.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl TreeGraph {
    /// Convert into a petgraph graph for advanced operations.
    ///
    /// Node weights are identities, edge weights are discriminants. Node
    /// indices follow the graph's insertion order.
    pub fn to_petgraph(&self) -> DiGraph<Identity, u32> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let mut index: HashMap<Identity, NodeIndex> = HashMap::new();
        for vertex in self.vertices() {
            index.insert(vertex.identity, graph.add_node(vertex.identity));
        }
        for (vertex, edges) in self.iter() {
            for edge in edges {
                if let (Some(&from), Some(&to)) = (index.get(&vertex.identity), index.get(&edge.to)) {
                    graph.add_edge(from, to, edge.discriminant);
                }
            }
        }
        graph
    }

    /// Check that the graph is a tree rooted at its root.
    pub fn validate(&self) -> ValidationResult {
        let graph = self.to_petgraph();
        let mut result = ValidationResult::default();

        result.errors.extend(find_shared_vertices(&graph));
        result.errors.extend(find_cycles(&graph));
        result.errors.extend(find_unreachable(&graph));

        result
    }
}

fn find_shared_vertices(graph: &DiGraph<Identity, u32>) -> Vec<ValidationError> {
    graph
        .node_indices()
        .filter_map(|idx| {
            let mut parents: Vec<NodeIndex> = graph
                .edges_directed(idx, Direction::Incoming)
                .map(|e| e.source())
                .collect();
            if parents.len() > 1 {
                parents.sort();
                Some(ValidationError::SharedVertex {
                    identity: graph[idx],
                    parents: parents.into_iter().map(|p| graph[p]).collect(),
                })
            } else {
                None
            }
        })
        .collect()
}

fn find_cycles(graph: &DiGraph<Identity, u32>) -> Vec<ValidationError> {
    if !is_cyclic_directed(graph) {
        return vec![];
    }

    tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || scc.iter().any(|&idx| graph.contains_edge(idx, idx)))
        .map(|scc| ValidationError::CycleDetected {
            path: scc.iter().map(|&idx| graph[idx]).collect(),
        })
        .collect()
}

fn find_unreachable(graph: &DiGraph<Identity, u32>) -> Vec<ValidationError> {
    // The root is always inserted first.
    let Some(root) = graph.node_indices().next() else {
        return vec![];
    };

    let mut reachable = HashSet::new();
    let mut dfs = Dfs::new(graph, root);
    while let Some(idx) = dfs.next(graph) {
        reachable.insert(idx);
    }

    graph
        .node_indices()
        .filter(|idx| !reachable.contains(idx))
        .map(|idx| ValidationError::Unreachable {
            identity: graph[idx],
        })
        .collect()
}

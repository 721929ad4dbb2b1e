//! Builder for constructing a TreeGraph from a live tree.

use crate::error::VisError;
use crate::handle::NodeHandle;
use crate::nodes::{Identity, Vertex};
use crate::TreeGraph;
use tracing::debug;

/// Remaining child slots of a node whose walk is in progress.
type Slots<N> = std::iter::Enumerate<std::vec::IntoIter<Option<N>>>;

/// Builder for constructing a tree graph by walking node handles.
///
/// The walk is a depth-first pre-order traversal: a node's vertex is
/// registered before any of its children, and children are visited in
/// ascending slot order. Null slots end the walk along that branch.
#[derive(Debug, Default)]
pub struct TreeGraphBuilder {
    /// Deepest level reached during the last build
    max_depth: usize,
}

impl TreeGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a TreeGraph from the tree rooted at `root`.
    ///
    /// Fails with [`VisError::NotATree`] if a node is reached twice, and
    /// propagates any [`VisError::InvalidHandle`] raised by the handles.
    pub fn build<N: NodeHandle>(mut self, root: &N) -> Result<TreeGraph, VisError> {
        let root_vertex = Self::vertex_for(root)?;
        let root_identity = root_vertex.identity;
        let mut graph = TreeGraph::new(root_vertex);

        // Explicit stack instead of recursion: long keys make deep tries.
        let mut stack: Vec<(Identity, usize, Slots<N>)> = Vec::new();
        stack.push((root_identity, 0, Self::children_of(root)?));

        while let Some((parent, depth, mut slots)) = stack.pop() {
            self.max_depth = self.max_depth.max(depth);

            // Take the lowest remaining non-null slot, then resume this node later.
            let Some((slot, child)) = slots.find_map(|(i, slot)| slot.map(|c| (i, c))) else {
                continue;
            };
            stack.push((parent, depth, slots));

            let vertex = Self::vertex_for(&child)?;
            let identity = vertex.identity;
            if !graph.add_vertex(vertex) {
                return Err(VisError::NotATree { identity });
            }
            let discriminant = u32::try_from(slot)
                .map_err(|_| VisError::invalid_handle("child slot index overflow"))?;
            graph.add_edge(parent, discriminant, identity)?;

            stack.push((identity, depth + 1, Self::children_of(&child)?));
        }

        debug!(
            root = %root_identity,
            vertices = graph.node_count(),
            edges = graph.edge_count(),
            depth = self.max_depth,
            "built tree graph"
        );
        Ok(graph)
    }

    /// Construct the vertex for a node handle.
    fn vertex_for<N: NodeHandle>(node: &N) -> Result<Vertex, VisError> {
        Ok(Vertex {
            identity: node.identity()?,
            has_value: node.has_terminal_value()?,
            label: node.scalar_payload()?,
        })
    }

    /// Fetch a node's child slots, numbered by slot index.
    fn children_of<N: NodeHandle>(node: &N) -> Result<Slots<N>, VisError> {
        Ok(node.child_slots()?.into_iter().enumerate())
    }
}

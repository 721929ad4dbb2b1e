//! # trieviz-graph
//!
//! Graph reconstruction and rendering for radix tries and ternary search trees.
//!
//! This crate walks a tree through opaque [`NodeHandle`]s supplied by an
//! introspection backend, records its topology in a [`TreeGraph`], and renders
//! that graph as Graphviz DOT text with per-kind shape and label rules.
//! Individual nodes (for example the node an iterator points at) can be
//! highlighted without touching the graph.
//!
//! ## Features
//!
//! - **Graph reconstruction**: pre-order walk with stable, address-based vertex identity
//! - **DOT rendering**: deterministic output for radix tries and ternary search trees
//! - **Marks**: recolor nodes by identity, or by dereferencing an iterator
//! - **Quicklook**: rasterize with `dot` and open the image in a viewer
//! - **Other outputs**: ASCII tree, GraphML and JSON export
//!
//! ## Example
//!
//! ```ignore
//! use trieviz_graph::snapshot::Snapshot;
//! use trieviz_graph::{visualizer_for, DotRenderer};
//!
//! let snapshot = Snapshot::from_json(&std::fs::read_to_string("stop.json")?)?;
//! let stop = snapshot.stop(0)?;
//! let mut vis = visualizer_for(stop.find_variable("t")?.as_container("t")?)?;
//! stop.find_variable("it")?.mark_on("it", &mut vis)?;
//! println!("{}", vis.render(&DotRenderer::default())?);
//! ```

mod builder;
mod edges;
mod error;
pub mod export;
mod handle;
mod highlight;
mod kind;
mod keys;
mod nodes;
pub mod preview;
mod queries;
pub mod render;
pub mod snapshot;
mod validation;
mod visualizer;

pub use builder::TreeGraphBuilder;
pub use edges::{TreeEdge, TstSlot};
pub use error::{ValidationError, VisError};
pub use export::{EdgeRepr, GraphRepr, VertexRepr};
pub use handle::{ContainerHandle, IteratorHandle, NodeHandle};
pub use highlight::{Highlighter, Mark, DEFAULT_MARK_COLOR};
pub use keys::{KeyMapping, ParseKeyMappingError};
pub use kind::{EdgeLabelRule, RenderRules, RuleTable, ShapeRule, TreeKind, VertexLabelRule};
pub use nodes::{Identity, ParseIdentityError, Vertex};
pub use preview::{PreviewConfig, PreviewOutcome, PreviewPipeline};
pub use queries::TreeStats;
pub use render::{render_ascii, render_graphml, DotRenderer};
pub use validation::ValidationResult;
pub use visualizer::{visualizer_for, Visualizer};

use indexmap::IndexMap;

/// A vertex together with its outgoing edges.
#[derive(Debug, Clone)]
struct VertexEntry {
    vertex: Vertex,
    edges: Vec<TreeEdge>,
}

/// The topology of one tree snapshot.
///
/// Vertices are kept in discovery order and every vertex owns its outgoing
/// edges in ascending discriminant order. A vertex without edges is a leaf
/// and is still present.
#[derive(Debug, Clone)]
pub struct TreeGraph {
    /// Identity of the root vertex
    root: Identity,

    /// Vertices and their outgoing edges, in insertion order
    vertices: IndexMap<Identity, VertexEntry>,
}

impl TreeGraph {
    /// Create a graph containing only the root vertex.
    pub fn new(root: Vertex) -> Self {
        let mut vertices = IndexMap::new();
        let identity = root.identity;
        vertices.insert(
            identity,
            VertexEntry {
                vertex: root,
                edges: Vec::new(),
            },
        );
        Self {
            root: identity,
            vertices,
        }
    }

    /// Build a graph by walking the tree under `root`.
    pub fn from_root<N: NodeHandle>(root: &N) -> Result<Self, VisError> {
        TreeGraphBuilder::new().build(root)
    }

    /// Register a vertex.
    ///
    /// Returns `false` (and leaves the graph untouched) if a vertex with the
    /// same identity is already present.
    pub fn add_vertex(&mut self, vertex: Vertex) -> bool {
        if self.vertices.contains_key(&vertex.identity) {
            return false;
        }
        self.vertices.insert(
            vertex.identity,
            VertexEntry {
                vertex,
                edges: Vec::new(),
            },
        );
        true
    }

    /// Add an edge from `from` to `to` found in child slot `discriminant`.
    ///
    /// Both vertices must already be registered, and the discriminant must be
    /// greater than that of every edge already leaving `from`.
    pub fn add_edge(
        &mut self,
        from: Identity,
        discriminant: u32,
        to: Identity,
    ) -> Result<(), VisError> {
        if !self.vertices.contains_key(&to) {
            return Err(VisError::UnknownVertex { identity: to });
        }
        let entry = self
            .vertices
            .get_mut(&from)
            .ok_or(VisError::UnknownVertex { identity: from })?;

        if let Some(last) = entry.edges.last() {
            if last.discriminant >= discriminant {
                return Err(VisError::EdgeOrder { from, discriminant });
            }
        }
        entry.edges.push(TreeEdge::new(discriminant, to));
        Ok(())
    }

    /// Get the root identity.
    pub fn root(&self) -> Identity {
        self.root
    }

    /// Look up a vertex by identity.
    pub fn vertex(&self, identity: Identity) -> Option<&Vertex> {
        self.vertices.get(&identity).map(|e| &e.vertex)
    }

    /// Get the outgoing edges of a vertex (empty for leaves and unknown vertices).
    pub fn edges(&self, identity: Identity) -> &[TreeEdge] {
        self.vertices
            .get(&identity)
            .map(|e| e.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Check if a vertex is present.
    pub fn contains(&self, identity: Identity) -> bool {
        self.vertices.contains_key(&identity)
    }

    /// Iterate vertices with their outgoing edges, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Vertex, &[TreeEdge])> {
        self.vertices
            .values()
            .map(|e| (&e.vertex, e.edges.as_slice()))
    }

    /// Iterate vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values().map(|e| &e.vertex)
    }

    /// Get the number of vertices.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(|e| e.edges.len()).sum()
    }
}

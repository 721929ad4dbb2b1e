//! The visualizer: one tree snapshot, its kind and its marks.

use crate::error::VisError;
use crate::export::GraphRepr;
use crate::handle::{ContainerHandle, IteratorHandle, NodeHandle};
use crate::highlight::{Highlighter, DEFAULT_MARK_COLOR};
use crate::kind::TreeKind;
use crate::nodes::Identity;
use crate::preview::{PreviewOutcome, PreviewPipeline};
use crate::render::{render_ascii, render_graphml, DotRenderer};
use crate::{TreeGraph, TreeGraphBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Select the tree kind of a container and build its graph.
///
/// The kind is resolved once from the container's type name; it fails with
/// [`VisError::UnknownContainerKind`] for containers that are neither radix
/// tries nor ternary search trees.
pub fn visualizer_for<C: ContainerHandle>(container: &C) -> Result<Visualizer, VisError> {
    let type_name = container.type_name()?;
    let kind = TreeKind::from_type_name(&type_name)?;
    let graph = TreeGraphBuilder::new().build(&container.root()?)?;
    debug!(%type_name, %kind, "selected visualizer");
    Ok(Visualizer::new(kind, graph))
}

/// A tree snapshot bound to its kind, with marks that persist across renders.
#[derive(Debug, Clone)]
pub struct Visualizer {
    kind: TreeKind,
    graph: TreeGraph,
    marks: Highlighter,
}

impl Visualizer {
    /// Wrap an already-built graph.
    pub fn new(kind: TreeKind, graph: TreeGraph) -> Self {
        Self {
            kind,
            graph,
            marks: Highlighter::new(),
        }
    }

    /// Get the tree kind.
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Get the graph.
    pub fn graph(&self) -> &TreeGraph {
        &self.graph
    }

    /// Get the marks.
    pub fn highlighter(&self) -> &Highlighter {
        &self.marks
    }

    /// Mark a node in the default color.
    pub fn mark(&mut self, identity: Identity) -> &mut Self {
        self.marks.mark(identity, DEFAULT_MARK_COLOR);
        self
    }

    /// Mark a node in the given color.
    pub fn mark_with(&mut self, identity: Identity, color: impl Into<String>) -> &mut Self {
        self.marks.mark(identity, color);
        self
    }

    /// Mark a node given by handle, in the default color.
    pub fn mark_node<N: NodeHandle>(&mut self, node: &N) -> Result<&mut Self, VisError> {
        self.marks.mark_node(node, DEFAULT_MARK_COLOR)?;
        Ok(self)
    }

    /// Mark the node an iterator points at, in the default color.
    pub fn mark_iterator<I: IteratorHandle>(&mut self, iterator: &I) -> Result<&mut Self, VisError> {
        self.marks.mark_iterator(iterator, DEFAULT_MARK_COLOR)?;
        Ok(self)
    }

    /// Remove all marks.
    pub fn clear_marks(&mut self) -> &mut Self {
        self.marks.clear();
        self
    }

    /// Rebuild the graph from the container's current state, keeping marks.
    ///
    /// The container must still be of the same kind.
    pub fn rebuild<C: ContainerHandle>(&mut self, container: &C) -> Result<&mut Self, VisError> {
        let type_name = container.type_name()?;
        let kind = TreeKind::from_type_name(&type_name)?;
        if kind != self.kind {
            return Err(VisError::invalid_handle(format!(
                "container '{}' is a {}, expected a {}",
                type_name, kind, self.kind
            )));
        }
        self.graph = TreeGraphBuilder::new().build(&container.root()?)?;
        Ok(self)
    }

    /// Render as DOT text.
    pub fn render(&self, renderer: &DotRenderer) -> Result<String, VisError> {
        renderer.render(self.kind, &self.graph, &self.marks)
    }

    /// Render as DOT text and write it to a file.
    pub fn write_dot(&self, path: impl AsRef<Path>, renderer: &DotRenderer) -> Result<(), VisError> {
        let dot = self.render(renderer)?;
        fs::write(path.as_ref(), dot)?;
        info!(path = %path.as_ref().display(), "wrote dot file");
        Ok(())
    }

    /// Render, rasterize and open the result in a viewer.
    pub fn quicklook(
        &self,
        pipeline: &PreviewPipeline,
        renderer: &DotRenderer,
    ) -> Result<PreviewOutcome, VisError> {
        let dot = self.render(renderer)?;
        pipeline.quicklook(&dot)
    }

    /// Render as an ASCII tree.
    pub fn render_ascii(&self, renderer: &DotRenderer) -> Result<String, VisError> {
        let rules = renderer.rules_for(self.kind)?;
        Ok(render_ascii(&self.graph, rules, renderer.key_mapping(), &self.marks))
    }

    /// Render as GraphML.
    pub fn render_graphml(&self, renderer: &DotRenderer) -> Result<String, VisError> {
        let rules = renderer.rules_for(self.kind)?;
        render_graphml(&self.graph, rules, renderer.key_mapping(), &self.marks)
    }

    /// Build the serializable export representation.
    pub fn export(&self, renderer: &DotRenderer) -> Result<GraphRepr, VisError> {
        let rules = renderer.rules_for(self.kind)?;
        Ok(GraphRepr::new(
            self.kind,
            &self.graph,
            rules,
            renderer.key_mapping(),
            &self.marks,
        ))
    }
}

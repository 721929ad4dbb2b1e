//! Marks: per-node color overrides applied at render time.

use crate::error::VisError;
use crate::handle::{IteratorHandle, NodeHandle};
use crate::nodes::Identity;
use serde::{Deserialize, Serialize};

/// Color used when a mark does not name one.
pub const DEFAULT_MARK_COLOR: &str = "red";

/// A highlight request for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    /// The node to highlight
    pub identity: Identity,
    /// Graphviz color name
    pub color: String,
}

/// A side table of marks, consulted by renderers.
///
/// When several marks target the same node, the one registered last wins.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    marks: Vec<Mark>,
}

impl Highlighter {
    /// Create an empty highlighter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight the node with the given identity.
    pub fn mark(&mut self, identity: Identity, color: impl Into<String>) -> &mut Self {
        self.marks.push(Mark {
            identity,
            color: color.into(),
        });
        self
    }

    /// Highlight a node given by handle.
    pub fn mark_node<N: NodeHandle>(
        &mut self,
        node: &N,
        color: impl Into<String>,
    ) -> Result<&mut Self, VisError> {
        let identity = node.identity()?;
        Ok(self.mark(identity, color))
    }

    /// Highlight the node an iterator currently points at.
    pub fn mark_iterator<I: IteratorHandle>(
        &mut self,
        iterator: &I,
        color: impl Into<String>,
    ) -> Result<&mut Self, VisError> {
        let node = iterator.current_node()?;
        self.mark_node(&node, color)
    }

    /// Get the color for a node, if it is marked.
    pub fn color_for(&self, identity: Identity) -> Option<&str> {
        self.marks
            .iter()
            .rev()
            .find(|m| m.identity == identity)
            .map(|m| m.color.as_str())
    }

    /// Iterate marks in registration order.
    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter()
    }

    /// Remove all marks.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Get the number of registered marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Check if no marks are registered.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

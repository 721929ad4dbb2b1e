//! Error types for graph building, rendering and validation.

use crate::kind::TreeKind;
use crate::nodes::Identity;
use thiserror::Error;

/// Errors that can occur while building, rendering or previewing a tree graph.
#[derive(Debug, Error)]
pub enum VisError {
    /// The introspection layer could not answer a required query
    #[error("Invalid handle: {reason}")]
    InvalidHandle { reason: String },

    /// The container's type name matches no known tree kind
    #[error("Don't know how to visualize container type '{type_name}'")]
    UnknownContainerKind { type_name: String },

    /// The renderer has no rule table for the requested kind
    #[error("No render rules for tree kind {kind}")]
    UnsupportedKind { kind: TreeKind },

    /// A named variable could not be found in any enclosing frame
    #[error("Variable not found: {name}")]
    VariableNotFound { name: String },

    /// A mark request named something that is neither a node nor an iterator
    #[error("Cannot mark '{name}': it is neither a node nor an iterator")]
    MalformedMarkTarget { name: String },

    /// The same node was reached twice; the structure is not a tree
    #[error("Node {identity} is reachable along more than one path")]
    NotATree { identity: Identity },

    /// An edge referred to a vertex that is not in the graph
    #[error("Unknown vertex {identity}")]
    UnknownVertex { identity: Identity },

    /// An edge would break the ascending discriminant order of its source
    #[error("Edge from {from} with discriminant {discriminant} is out of slot order")]
    EdgeOrder { from: Identity, discriminant: u32 },

    /// An external program could not be started
    #[error("Failed to run '{program}': {reason}")]
    ExternalTool { program: String, reason: String },

    /// Snapshot parsing failed
    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Writing rendered text failed
    #[error("Failed to format output")]
    Format(#[from] std::fmt::Error),
}

impl VisError {
    /// Shorthand for an [`VisError::InvalidHandle`] error.
    pub fn invalid_handle(reason: impl Into<String>) -> Self {
        VisError::InvalidHandle {
            reason: reason.into(),
        }
    }
}

/// Structural problems found in a tree graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A vertex has more than one parent
    SharedVertex {
        /// The shared vertex
        identity: Identity,
        /// All vertices with an edge to it
        parents: Vec<Identity>,
    },

    /// The edges form a cycle
    CycleDetected {
        /// The vertices involved in the cycle
        path: Vec<Identity>,
    },

    /// A vertex cannot be reached from the root
    Unreachable {
        /// The unreachable vertex
        identity: Identity,
    },
}

impl ValidationError {
    /// Get the vertex this error is primarily about.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            ValidationError::SharedVertex { identity, .. }
            | ValidationError::Unreachable { identity } => Some(*identity),
            ValidationError::CycleDetected { path } => path.first().copied(),
        }
    }

    /// Get a human-readable error message.
    pub fn message(&self) -> String {
        match self {
            ValidationError::SharedVertex { identity, parents } => {
                let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
                format!("Node {} is shared by {}", identity, parents.join(", "))
            }
            ValidationError::CycleDetected { path } => {
                let path: Vec<String> = path.iter().map(|p| p.to_string()).collect();
                format!("Cycle detected: {}", path.join(" -> "))
            }
            ValidationError::Unreachable { identity } => {
                format!("Node {} is unreachable from the root", identity)
            }
        }
    }

    /// Check if this is a cycle error.
    pub fn is_cycle(&self) -> bool {
        matches!(self, ValidationError::CycleDetected { .. })
    }
}

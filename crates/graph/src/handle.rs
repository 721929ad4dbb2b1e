//! Handle traits implemented by an introspection backend.
//!
//! The engine never reads memory itself. A backend (a debugger's reflection
//! API, or the [`crate::snapshot`] module) exposes tree nodes, iterators and
//! containers through these traits, and every query may fail with
//! [`VisError::InvalidHandle`].

use crate::error::VisError;
use crate::nodes::Identity;

/// A reference to one node of a live tree.
pub trait NodeHandle: Sized {
    /// The node's address.
    fn identity(&self) -> Result<Identity, VisError>;

    /// Whether the node carries a terminal value.
    fn has_terminal_value(&self) -> Result<bool, VisError>;

    /// The scalar stored in the node, if the tree kind stores one.
    fn scalar_payload(&self) -> Result<Option<u32>, VisError>;

    /// The node's child slots in index order; `None` for a null slot.
    fn child_slots(&self) -> Result<Vec<Option<Self>>, VisError>;
}

/// A reference to an iterator over a tree.
pub trait IteratorHandle {
    /// The node type the iterator points into.
    type Node<'a>: NodeHandle
    where
        Self: 'a;

    /// Dereference the iterator to the node it currently references.
    fn current_node(&self) -> Result<Self::Node<'_>, VisError>;
}

/// A reference to a whole container wrapping a tree.
pub trait ContainerHandle {
    /// The node type of the wrapped tree.
    type Node<'a>: NodeHandle
    where
        Self: 'a;

    /// The declared type name of the wrapped tree, e.g. `rmr::detail::trie<...>`.
    fn type_name(&self) -> Result<String, VisError>;

    /// The root node of the wrapped tree.
    fn root(&self) -> Result<Self::Node<'_>, VisError>;
}

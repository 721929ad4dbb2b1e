//! Edge types for the tree graph.

use crate::nodes::Identity;
use serde::{Deserialize, Serialize};

/// A directed edge from a parent vertex to the child found in one of its slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeEdge {
    /// Index of the child slot the edge was found in
    pub discriminant: u32,
    /// Destination vertex
    pub to: Identity,
}

impl TreeEdge {
    /// Create an edge for the given slot.
    pub fn new(discriminant: u32, to: Identity) -> Self {
        Self { discriminant, to }
    }
}

/// The three child slots of a ternary search tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TstSlot {
    /// Keys whose character sorts before the node's
    Left,
    /// Keys continuing with the node's character
    Mid,
    /// Keys whose character sorts after the node's
    Right,
}

impl TstSlot {
    /// Map a discriminant to its slot.
    pub fn from_discriminant(discriminant: u32) -> Option<Self> {
        match discriminant {
            0 => Some(TstSlot::Left),
            1 => Some(TstSlot::Mid),
            2 => Some(TstSlot::Right),
            _ => None,
        }
    }

    /// Get the slot index.
    pub fn discriminant(self) -> u32 {
        match self {
            TstSlot::Left => 0,
            TstSlot::Mid => 1,
            TstSlot::Right => 2,
        }
    }

    /// Get the edge label for this slot.
    pub fn label(self) -> &'static str {
        match self {
            TstSlot::Left => "l",
            TstSlot::Mid => "m",
            TstSlot::Right => "r",
        }
    }
}

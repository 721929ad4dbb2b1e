//! Vertex types for the tree graph.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The identity of a tree node: its address in the inspected process.
///
/// Identities are compared and hashed by value and never derived from node
/// content. They render as `0x` followed by sixteen lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(pub u64);

impl Identity {
    /// Get the raw address.
    pub fn address(self) -> u64 {
        self.0
    }
}

impl From<u64> for Identity {
    fn from(address: u64) -> Self {
        Identity(address)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Error returned when an identity string is not a hex or decimal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdentityError(String);

impl fmt::Display for ParseIdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node address '{}'", self.0)
    }
}

impl std::error::Error for ParseIdentityError {}

impl FromStr for Identity {
    type Err = ParseIdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };
        parsed
            .map(Identity)
            .map_err(|_| ParseIdentityError(s.to_string()))
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Identity(n)),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// A vertex in the tree graph, one per tree node.
///
/// Equality and hashing only consider the identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Address of the underlying node
    pub identity: Identity,
    /// Whether the node carries a terminal value
    pub has_value: bool,
    /// Scalar payload stored in the node (the character of a TST node)
    pub label: Option<u32>,
}

impl Vertex {
    /// Create a vertex without a scalar payload.
    pub fn new(identity: Identity, has_value: bool) -> Self {
        Self {
            identity,
            has_value,
            label: None,
        }
    }

    /// Attach a scalar payload.
    pub fn with_label(mut self, label: u32) -> Self {
        self.label = Some(label);
        self
    }

    /// Check if this vertex marks the end of a stored key.
    pub fn is_terminal(&self) -> bool {
        self.has_value
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

//! A serialized capture of debugger state, usable as an introspection backend.
//!
//! A snapshot lists the stops a debugging session halted at. Each stop holds
//! the stack of frames, innermost first, and each frame its named variables:
//! containers, iterators, bare nodes or plain scalars. Nodes, iterators and
//! containers implement the handle traits, so the engine walks a snapshot the
//! same way it would walk live memory.
//!
//! ```json
//! { "kind": "container", "type_name": "trie<char, int>",
//!   "root": { "address": "0x1000", "children": [null, { "address": "0x1010", "value": true }] } }
//! ```
//!
//! Node children may also be given sparsely, as an object keyed by slot index:
//! `"children": { "97": { "address": "0x1010" } }`.

mod session;

pub use session::{Frame, Snapshot, Stop, Variable};

use crate::error::VisError;
use crate::handle::{ContainerHandle, IteratorHandle, NodeHandle};
use crate::nodes::Identity;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One captured tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// The node's address
    pub address: Identity,

    /// Whether the node carries a terminal value
    #[serde(default)]
    pub value: bool,

    /// The stored character, for tree kinds that store one
    #[serde(
        default,
        deserialize_with = "deserialize_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<u32>,

    /// Child slots in index order
    #[serde(default, deserialize_with = "deserialize_children")]
    pub children: Vec<Option<SnapshotNode>>,
}

impl SnapshotNode {
    /// Create a childless node.
    pub fn new(address: impl Into<Identity>, value: bool) -> Self {
        Self {
            address: address.into(),
            value,
            label: None,
            children: Vec::new(),
        }
    }

    /// Set the stored character.
    pub fn with_label(mut self, label: u32) -> Self {
        self.label = Some(label);
        self
    }

    /// Place a child at a slot, padding skipped slots with nulls.
    pub fn with_child(mut self, slot: usize, child: SnapshotNode) -> Self {
        if self.children.len() <= slot {
            self.children.resize(slot + 1, None);
        }
        self.children[slot] = Some(child);
        self
    }
}

impl<'a> NodeHandle for &'a SnapshotNode {
    fn identity(&self) -> Result<Identity, VisError> {
        Ok(self.address)
    }

    fn has_terminal_value(&self) -> Result<bool, VisError> {
        Ok(self.value)
    }

    fn scalar_payload(&self) -> Result<Option<u32>, VisError> {
        Ok(self.label)
    }

    fn child_slots(&self) -> Result<Vec<Option<Self>>, VisError> {
        let node: &'a SnapshotNode = self;
        Ok(node.children.iter().map(Option::as_ref).collect())
    }
}

/// A captured container: its declared type name and the root of its tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotContainer {
    /// Declared type, e.g. `rmr::detail::ternary_search_tree<char, int>`
    pub type_name: String,
    /// Root node; `null` when the capture could not read it
    #[serde(default)]
    pub root: Option<SnapshotNode>,
}

impl ContainerHandle for SnapshotContainer {
    type Node<'a> = &'a SnapshotNode;

    fn type_name(&self) -> Result<String, VisError> {
        Ok(self.type_name.clone())
    }

    fn root(&self) -> Result<&SnapshotNode, VisError> {
        self.root
            .as_ref()
            .ok_or_else(|| VisError::invalid_handle(format!("container '{}' has no root", self.type_name)))
    }
}

/// A captured iterator: the node it references, or `null` at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotIterator {
    #[serde(default)]
    pub node: Option<SnapshotNode>,
}

impl IteratorHandle for SnapshotIterator {
    type Node<'a> = &'a SnapshotNode;

    fn current_node(&self) -> Result<&SnapshotNode, VisError> {
        self.node
            .as_ref()
            .ok_or_else(|| VisError::invalid_handle("iterator does not reference a node"))
    }
}

/// A label given as a one-character string or as its code point.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Code(u32),
    Text(String),
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<LabelRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LabelRepr::Code(code)) => Ok(Some(code)),
        Some(LabelRepr::Text(text)) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Some(c as u32)),
                _ => Err(D::Error::custom(format!(
                    "label must be a single character, got '{}'",
                    text
                ))),
            }
        }
    }
}

/// Largest slot accepted in the sparse children form: the last Unicode code point.
const MAX_CHILD_SLOT: usize = 0x10_FFFF;

/// Children given densely as an array, or sparsely as an object keyed by slot.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChildrenRepr {
    Dense(Vec<Option<SnapshotNode>>),
    Sparse(BTreeMap<String, SnapshotNode>),
}

fn deserialize_children<'de, D>(deserializer: D) -> Result<Vec<Option<SnapshotNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match ChildrenRepr::deserialize(deserializer)? {
        ChildrenRepr::Dense(children) => Ok(children),
        ChildrenRepr::Sparse(children) => {
            let mut slotted = BTreeMap::new();
            for (key, child) in children {
                let slot: usize = key
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid child slot '{}'", key)))?;
                if slot > MAX_CHILD_SLOT {
                    return Err(D::Error::custom(format!(
                        "child slot {} exceeds the largest supported slot {}",
                        slot, MAX_CHILD_SLOT
                    )));
                }
                slotted.insert(slot, child);
            }
            let len = match slotted.keys().next_back() {
                Some(&last) => last
                    .checked_add(1)
                    .ok_or_else(|| D::Error::custom("child slot overflow"))?,
                None => 0,
            };
            let mut dense = vec![None; len];
            for (slot, child) in slotted {
                dense[slot] = Some(child);
            }
            Ok(dense)
        }
    }
}

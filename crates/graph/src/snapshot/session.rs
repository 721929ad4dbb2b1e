use super::{SnapshotContainer, SnapshotIterator, SnapshotNode};
use crate::error::VisError;
use crate::visualizer::Visualizer;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

/// A recorded debugging session: every stop in the order it was hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stops: Vec<Stop>,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, VisError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, VisError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, VisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get a stop by position.
    pub fn stop(&self, index: usize) -> Result<&Stop, VisError> {
        self.stops.get(index).ok_or_else(|| {
            VisError::invalid_handle(format!(
                "snapshot has {} stop(s), no stop #{}",
                self.stops.len(),
                index
            ))
        })
    }

    /// Iterate the stops recorded at a source location, in hit order.
    pub fn stops_at<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Stop> + 'a {
        self.stops.iter().filter(move |s| s.location == location)
    }
}

/// One point where the debugger halted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Source location, e.g. `assoc_common.cc:936`
    pub location: String,
    /// Stack frames, innermost first
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Stop {
    /// Look a variable up by name, starting in the innermost frame and
    /// continuing through each enclosing frame.
    pub fn find_variable(&self, name: &str) -> Result<&Variable, VisError> {
        for (depth, frame) in self.frames.iter().enumerate() {
            if let Some(variable) = frame.variables.get(name) {
                if depth > 0 {
                    debug!(name, depth, function = ?frame.function, "found variable in enclosing frame");
                }
                return Ok(variable);
            }
        }
        Err(VisError::VariableNotFound {
            name: name.to_string(),
        })
    }
}

/// One stack frame and its variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default)]
    pub variables: IndexMap<String, Variable>,
}

/// A captured variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variable {
    Container(SnapshotContainer),
    Iterator(SnapshotIterator),
    Node(SnapshotNode),
    /// Anything else; only its value is kept
    Scalar {
        #[serde(default)]
        value: serde_json::Value,
    },
}

impl Variable {
    /// Get the variable's kind as written in the snapshot.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Container(_) => "container",
            Self::Iterator(_) => "iterator",
            Self::Node(_) => "node",
            Self::Scalar { .. } => "scalar",
        }
    }

    /// Use the variable as a container.
    ///
    /// `name` is the variable's name, used in the error.
    pub fn as_container(&self, name: &str) -> Result<&SnapshotContainer, VisError> {
        match self {
            Self::Container(container) => Ok(container),
            other => Err(VisError::invalid_handle(format!(
                "'{}' is a {}, not a container",
                name,
                other.kind_name()
            ))),
        }
    }

    /// Mark the node this variable designates on a visualizer.
    ///
    /// A node marks itself and an iterator is dereferenced through
    /// [`IteratorHandle::current_node`](crate::IteratorHandle::current_node). Any other variable fails with
    /// [`VisError::MalformedMarkTarget`].
    pub fn mark_on(&self, name: &str, vis: &mut Visualizer) -> Result<(), VisError> {
        match self {
            Self::Node(node) => {
                vis.mark_node(&node)?;
            }
            Self::Iterator(iterator) => {
                vis.mark_iterator(iterator).map_err(|e| match e {
                    VisError::InvalidHandle { reason } => {
                        VisError::invalid_handle(format!("'{}': {}", name, reason))
                    }
                    other => other,
                })?;
            }
            Self::Container(_) | Self::Scalar { .. } => {
                return Err(VisError::MalformedMarkTarget {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

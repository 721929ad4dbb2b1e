//! Serialization types for graph export.
//!
//! This module contains the data structures used to serialize a rendered
//! tree graph for external consumption (JSON).

use crate::error::VisError;
use crate::highlight::Highlighter;
use crate::keys::KeyMapping;
use crate::kind::{RenderRules, TreeKind};
use crate::nodes::Identity;
use crate::render::DEFAULT_VERTEX_COLOR;
use crate::TreeGraph;
use serde::{Deserialize, Serialize};

/// Serializable representation of a tree graph with render attributes applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRepr {
    pub kind: TreeKind,
    pub root: Identity,
    pub vertices: Vec<VertexRepr>,
    pub edges: Vec<EdgeRepr>,
}

/// Serializable representation of a vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRepr {
    pub id: Identity,
    pub has_value: bool,
    pub shape: String,
    pub label: String,
    pub color: String,
}

/// Serializable representation of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRepr {
    pub source: Identity,
    pub target: Identity,
    pub discriminant: u32,
    pub label: String,
}

impl GraphRepr {
    /// Build the export representation of a graph.
    pub fn new(
        kind: TreeKind,
        graph: &TreeGraph,
        rules: &RenderRules,
        keys: &KeyMapping,
        marks: &Highlighter,
    ) -> Self {
        let vertices = graph
            .vertices()
            .map(|v| VertexRepr {
                id: v.identity,
                has_value: v.has_value,
                shape: rules.shape.shape_for(v).to_string(),
                label: rules.vertex_label.label_for(v, keys),
                color: marks
                    .color_for(v.identity)
                    .unwrap_or(DEFAULT_VERTEX_COLOR)
                    .to_string(),
            })
            .collect();

        let edges = graph
            .iter()
            .flat_map(|(v, edges)| {
                edges.iter().map(move |e| EdgeRepr {
                    source: v.identity,
                    target: e.to,
                    discriminant: e.discriminant,
                    label: rules.edge_label.label_for(e.discriminant, keys),
                })
            })
            .collect();

        Self {
            kind,
            root: graph.root(),
            vertices,
            edges,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, VisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

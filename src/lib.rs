//! # trieviz
//!
//! Graphviz visualizer for radix tries and ternary search trees, driven by a
//! debugger's view of the live structure.
//!
//! ## Crates
//!
//! | Crate | Description |
//! |-------|-------------|
//! | [`trieviz-graph`] | Handle traits, graph reconstruction, DOT/ASCII/GraphML rendering, marks, quicklook, snapshots |
//! | `trieviz-cli` | The `trieviz` binary: `write-dot`, `quicklook`, `trace-iteration`, `render`, `info` |
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! trieviz = "0.1"
//! ```
//!
//! ```rust,ignore
//! use trieviz::snapshot::Snapshot;
//! use trieviz::{visualizer_for, DotRenderer};
//!
//! let snapshot = Snapshot::from_json(&json)?;
//! let stop = snapshot.stop(0)?;
//! let vis = visualizer_for(stop.find_variable("t")?.as_container("t")?)?;
//! vis.write_dot("t.dot", &DotRenderer::default())?;
//! ```
//!
//! [`trieviz-graph`]: trieviz_graph

pub use trieviz_graph as graph;

pub use trieviz_graph::{
    snapshot, visualizer_for, ContainerHandle, DotRenderer, Highlighter, Identity,
    IteratorHandle, KeyMapping, NodeHandle, PreviewConfig, PreviewPipeline, TreeGraph,
    TreeKind, VisError, Visualizer,
};

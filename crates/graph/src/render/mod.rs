//! Graph rendering utilities.
//!
//! This module provides the output formats for tree graphs:
//! - DOT text for Graphviz (the primary format)
//! - ASCII tree rendering for terminal display
//! - GraphML export for external visualization tools

mod ascii;
mod dot;
mod graphml;

pub use ascii::render_ascii;
pub use dot::{DotRenderer, DEFAULT_VERTEX_COLOR};
pub use graphml::render_graphml;

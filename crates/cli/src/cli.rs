//! CLI command definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trieviz_graph::KeyMapping;

/// Visualize radix tries and ternary search trees captured from a debugger.
#[derive(Parser, Debug)]
#[command(name = "trieviz")]
#[command(version)]
#[command(
    long_about = "Reads a debugger snapshot, rebuilds the tree held by a container variable and renders it with Graphviz. Nodes named by node or iterator variables can be highlighted."
)]
pub struct Cli {
    #[command(flatten)]
    pub options: Options,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Options {
    /// Snapshot file recorded from the debugger
    #[arg(long, env = "TRIEVIZ_SNAPSHOT", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Stop to inspect, by position in the snapshot
    #[arg(long, default_value_t = 0, global = true)]
    pub stop: usize,

    /// Inverse key mapping: char, decimal, count-from:<n|c> or indexed:<chars>
    #[arg(long, default_value = "char", value_parser = parse_key_mapping, global = true)]
    pub key_mapping: KeyMapping,

    /// Name of the emitted DOT graph
    #[arg(long, default_value = "_", global = true)]
    pub graph_name: String,

    /// Graphviz program used to rasterize
    #[arg(long, env = "TRIEVIZ_DOT", default_value = "dot", global = true)]
    pub rasterizer: String,

    /// Raster image format passed to the rasterizer
    #[arg(long, default_value = "png", global = true)]
    pub image_format: String,

    /// Image viewer command line; the image path is appended
    #[arg(long, env = "TRIEVIZ_VIEWER", global = true)]
    pub viewer: Option<String>,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a container as DOT and write it to a file
    WriteDot {
        /// Container variable
        variable: String,

        /// Output file
        filepath: PathBuf,

        /// Node or iterator variable to highlight (repeatable)
        #[arg(long = "mark", value_name = "VARIABLE")]
        marks: Vec<String>,
    },

    /// Render a container and open the image in the viewer
    Quicklook {
        /// Container variable
        variable: String,

        /// Node or iterator variable to highlight (repeatable)
        #[arg(long = "mark", value_name = "VARIABLE")]
        marks: Vec<String>,
    },

    /// Follow an iterator through every stop at a source location
    TraceIteration {
        /// Source location, e.g. assoc_common.cc:936
        location: String,

        /// Container variable
        variable: String,

        /// Iterator variable whose node is highlighted at each stop
        iterator: String,

        /// Write numbered DOT files here instead of opening each step
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print a container to stdout
    Render {
        /// Container variable
        variable: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Dot)]
        format: OutputFormat,

        /// Node or iterator variable to highlight (repeatable)
        #[arg(long = "mark", value_name = "VARIABLE")]
        marks: Vec<String>,
    },

    /// Summarize a container: kind, size, stored keys and structural issues
    Info {
        /// Container variable
        variable: String,
    },
}

impl Commands {
    /// Get the subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::WriteDot { .. } => "write-dot",
            Commands::Quicklook { .. } => "quicklook",
            Commands::TraceIteration { .. } => "trace-iteration",
            Commands::Render { .. } => "render",
            Commands::Info { .. } => "info",
        }
    }
}

/// Text formats for the `render` subcommand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dot,
    Ascii,
    Graphml,
    Json,
}

fn parse_key_mapping(s: &str) -> Result<KeyMapping, String> {
    s.parse().map_err(|e: trieviz_graph::ParseKeyMappingError| e.to_string())
}

//! CLI command handlers.

use crate::cli::{Commands, Options, OutputFormat};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::info;
use trieviz_graph::snapshot::{Snapshot, Stop};
use trieviz_graph::{
    visualizer_for, DotRenderer, PreviewConfig, PreviewOutcome, PreviewPipeline, VisError,
    Visualizer,
};

/// A loaded snapshot together with the configured renderer and preview pipeline.
pub struct Session {
    snapshot: Snapshot,
    stop: usize,
    renderer: DotRenderer,
    pipeline: PreviewPipeline,
}

impl Session {
    /// Create a session over an already-loaded snapshot.
    pub fn new(snapshot: Snapshot, options: &Options) -> Self {
        let renderer = DotRenderer::new()
            .with_graph_name(options.graph_name.clone())
            .with_key_mapping(options.key_mapping.clone());

        let mut config = PreviewConfig {
            rasterizer: options.rasterizer.clone(),
            format: options.image_format.clone(),
            ..PreviewConfig::default()
        };
        if let Some(viewer) = &options.viewer {
            config.viewer = viewer.split_whitespace().map(str::to_string).collect();
        }

        Self {
            snapshot,
            stop: options.stop,
            renderer,
            pipeline: PreviewPipeline::new(config),
        }
    }

    /// Load the snapshot named by the options.
    pub fn open(options: &Options) -> Result<Self> {
        let Some(path) = &options.snapshot else {
            bail!("no snapshot file given (pass --snapshot or set TRIEVIZ_SNAPSHOT)");
        };
        let file = fs::File::open(path)
            .with_context(|| format!("failed to open snapshot {}", path.display()))?;
        let snapshot = Snapshot::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        info!(path = %path.display(), stops = snapshot.stops.len(), "loaded snapshot");
        Ok(Self::new(snapshot, options))
    }

    fn current_stop(&self) -> Result<&Stop> {
        Ok(self.snapshot.stop(self.stop)?)
    }
}

/// Execute a CLI command, writing any text output to `out`.
pub fn execute_command(command: Commands, session: &Session, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::WriteDot {
            variable,
            filepath,
            marks,
        } => cmd_write_dot(session, &variable, &filepath, &marks),

        Commands::Quicklook { variable, marks } => cmd_quicklook(session, &variable, &marks),

        Commands::TraceIteration {
            location,
            variable,
            iterator,
            out_dir,
        } => cmd_trace_iteration(
            session,
            &location,
            &variable,
            &iterator,
            out_dir.as_deref(),
            out,
        ),

        Commands::Render {
            variable,
            format,
            marks,
        } => cmd_render(session, &variable, format, &marks, out),

        Commands::Info { variable } => cmd_info(session, &variable, out),
    }
}

/// Build the visualizer for a container variable and apply the requested marks.
fn visualize(stop: &Stop, variable: &str, marks: &[String]) -> Result<Visualizer> {
    let container = stop.find_variable(variable)?.as_container(variable)?;
    let mut vis =
        visualizer_for(container).with_context(|| format!("cannot visualize '{}'", variable))?;
    for name in marks {
        stop.find_variable(name)?.mark_on(name, &mut vis)?;
    }
    Ok(vis)
}

fn cmd_write_dot(session: &Session, variable: &str, path: &Path, marks: &[String]) -> Result<()> {
    let vis = visualize(session.current_stop()?, variable, marks)?;
    vis.write_dot(path, &session.renderer)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn cmd_quicklook(session: &Session, variable: &str, marks: &[String]) -> Result<()> {
    let vis = visualize(session.current_stop()?, variable, marks)?;
    let outcome = vis.quicklook(&session.pipeline, &session.renderer)?;
    report_outcome(&session.pipeline, &outcome);
    Ok(())
}

fn cmd_trace_iteration(
    session: &Session,
    location: &str,
    variable: &str,
    iterator: &str,
    out_dir: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let stops: Vec<&Stop> = session.snapshot.stops_at(location).collect();
    if stops.is_empty() {
        bail!("no stops recorded at {}", location);
    }
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    for (step, stop) in stops.into_iter().enumerate() {
        let mut vis = visualize(stop, variable, &[])?;
        match stop.find_variable(iterator)?.mark_on(iterator, &mut vis) {
            Ok(()) => {}
            Err(VisError::InvalidHandle { reason }) => {
                info!(step, %reason, "iterator does not reference a node, rendering unmarked");
            }
            Err(e) => return Err(e.into()),
        }

        match out_dir {
            Some(dir) => {
                let path = dir.join(format!("step-{:03}.dot", step));
                vis.write_dot(&path, &session.renderer)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                writeln!(out, "{}", path.display())?;
            }
            None => {
                let outcome = vis.quicklook(&session.pipeline, &session.renderer)?;
                report_outcome(&session.pipeline, &outcome);
            }
        }
    }
    Ok(())
}

fn cmd_render(
    session: &Session,
    variable: &str,
    format: OutputFormat,
    marks: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let vis = visualize(session.current_stop()?, variable, marks)?;
    let renderer = &session.renderer;
    let text = match format {
        OutputFormat::Dot => vis.render(renderer)?,
        OutputFormat::Ascii => vis.render_ascii(renderer)?,
        OutputFormat::Graphml => vis.render_graphml(renderer)?,
        OutputFormat::Json => vis.export(renderer)?.to_json()?,
    };
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_info(session: &Session, variable: &str, out: &mut impl Write) -> Result<()> {
    let vis = visualize(session.current_stop()?, variable, &[])?;
    let graph = vis.graph();
    let stats = graph.stats();
    let keys = session.renderer.key_mapping();

    writeln!(out, "{}: {} rooted at {}", variable, vis.kind(), graph.root())?;
    writeln!(out, "  vertices:  {}", stats.vertices)?;
    writeln!(out, "  edges:     {}", stats.edges)?;
    writeln!(out, "  terminals: {}", stats.terminals)?;
    writeln!(out, "  height:    {}", stats.height)?;

    for (identity, digits) in graph.stored_keys(vis.kind()) {
        let key: String = digits.iter().map(|&d| keys.label(d)).collect();
        writeln!(out, "  key {:?} at {}", key, identity)?;
    }

    let validation = graph.validate();
    if validation.is_ok() {
        writeln!(out, "  structure: ok")?;
    }
    for error in &validation.errors {
        writeln!(out, "  issue: {}", error.message())?;
    }
    Ok(())
}

fn report_outcome(pipeline: &PreviewPipeline, outcome: &PreviewOutcome) {
    let config = pipeline.config();
    if !outcome.rasterizer.success() {
        eprintln!(
            "warning: {} exited with {}; nothing to show",
            config.rasterizer, outcome.rasterizer
        );
    }
    if let Some(status) = outcome.viewer.filter(|s| !s.success()) {
        eprintln!("warning: {} exited with {}", config.viewer.join(" "), status);
    }
}

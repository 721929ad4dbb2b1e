//! Quicklook: rasterize DOT text with Graphviz and open the image in a viewer.
//!
//! Both the DOT input and the raster output live in temporary files that are
//! removed when the call returns, whether it succeeded or not. The external
//! programs are awaited synchronously; only their exit status is inspected.

use crate::error::VisError;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, warn};

/// External programs used by the preview pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Graphviz layout program, invoked as `<rasterizer> -T<format> <in> -o <out>`
    pub rasterizer: String,
    /// Output format passed to `-T`, also used as the image file extension
    pub format: String,
    /// Viewer command line; the image path is appended
    pub viewer: Vec<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            rasterizer: "dot".to_string(),
            format: "png".to_string(),
            viewer: default_viewer(),
        }
    }
}

fn default_viewer() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["qlmanage".to_string(), "-p".to_string()]
    } else {
        vec!["xdg-open".to_string()]
    }
}

/// Exit statuses of one quicklook run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOutcome {
    /// Exit status of the rasterizer
    pub rasterizer: ExitStatus,
    /// Exit status of the viewer; `None` when rasterizing failed and the
    /// viewer was not started
    pub viewer: Option<ExitStatus>,
}

impl PreviewOutcome {
    /// Check if both programs exited successfully.
    pub fn success(&self) -> bool {
        self.rasterizer.success() && self.viewer.is_some_and(|s| s.success())
    }
}

/// Runs the rasterize-then-view pipeline.
#[derive(Debug, Clone, Default)]
pub struct PreviewPipeline {
    config: PreviewConfig,
}

impl PreviewPipeline {
    /// Create a pipeline with the given programs.
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Rasterize DOT text and open the image.
    pub fn quicklook(&self, dot: &str) -> Result<PreviewOutcome, VisError> {
        let mut input = tempfile::Builder::new()
            .prefix("trieviz-")
            .suffix(".dot")
            .tempfile()?;
        input.write_all(dot.as_bytes())?;
        input.flush()?;

        let image = tempfile::Builder::new()
            .prefix("trieviz-")
            .suffix(&format!(".{}", self.config.format))
            .tempfile()?;

        let rasterizer = self.rasterize(input.path(), image.path())?;
        if !rasterizer.success() {
            return Ok(PreviewOutcome {
                rasterizer,
                viewer: None,
            });
        }

        let viewer = self.view(image.path())?;
        Ok(PreviewOutcome {
            rasterizer,
            viewer: Some(viewer),
        })
    }

    /// Run the rasterizer on a DOT file, writing the image to `output`.
    pub fn rasterize(&self, input: &Path, output: &Path) -> Result<ExitStatus, VisError> {
        let mut command = Command::new(&self.config.rasterizer);
        command
            .arg(format!("-T{}", self.config.format))
            .arg(input)
            .arg("-o")
            .arg(output);
        run(&self.config.rasterizer, command)
    }

    /// Open an image in the viewer.
    pub fn view(&self, image: &Path) -> Result<ExitStatus, VisError> {
        let Some((program, args)) = self.config.viewer.split_first() else {
            return Err(VisError::ExternalTool {
                program: String::new(),
                reason: "no viewer configured".to_string(),
            });
        };
        let mut command = Command::new(program);
        command.args(args).arg(image);
        run(program, command)
    }
}

/// Run a command to completion, capturing its output.
fn run(program: &str, mut command: Command) -> Result<ExitStatus, VisError> {
    debug!(?command, "running external tool");
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| VisError::ExternalTool {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        warn!(
            program,
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "external tool failed"
        );
    }
    Ok(output.status)
}

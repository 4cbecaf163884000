//! Invocation of the external plotting script.
//!
//! Plotting is a convenience: every failure is logged and swallowed.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, instrument, warn};

/// How a plotting attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotOutcome {
    /// The script ran and exited successfully.
    Completed,
    /// The script file does not exist.
    ScriptMissing,
    /// The interpreter could not be started.
    LaunchFailed,
    /// The script exited unsuccessfully.
    Failed {
        /// Exit code, when the process was not killed by a signal.
        code: Option<i32>,
    },
}

/// A pending plotting step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    python: String,
    script: PathBuf,
    working_dir: PathBuf,
}

impl PlotRequest {
    /// Prepares `python script` to run inside `working_dir`, where the
    /// reports live. A relative `script` is resolved against the current
    /// directory.
    #[must_use]
    pub fn new(python: String, script: &Path, working_dir: PathBuf) -> Self {
        let script = std::path::absolute(script).unwrap_or_else(|_| script.to_path_buf());
        Self {
            python,
            script,
            working_dir,
        }
    }

    /// Resolved script path.
    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Runs the script and waits for it to exit.
    #[instrument(
        name = "cli.plot",
        skip(self),
        fields(python = %self.python, script = %self.script.display()),
    )]
    pub fn run(&self) -> PlotOutcome {
        if !self.script.is_file() {
            warn!("plotting script not found; skipping plot");
            return PlotOutcome::ScriptMissing;
        }
        let status = Command::new(&self.python)
            .arg(&self.script)
            .current_dir(&self.working_dir)
            .status();
        match status {
            Ok(status) if status.success() => {
                info!("plot completed");
                PlotOutcome::Completed
            }
            Ok(status) => {
                warn!(code = status.code(), "plotting script failed");
                PlotOutcome::Failed {
                    code: status.code(),
                }
            }
            Err(error) => {
                warn!(%error, "could not launch plotting interpreter");
                PlotOutcome::LaunchFailed
            }
        }
    }
}

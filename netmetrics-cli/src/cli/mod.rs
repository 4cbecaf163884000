//! Command-line interface for generating and analysing networks.
//!
//! `run` reads the JSON configuration, generates the network (or loads the
//! persisted one), writes the network file and both reports, and hands back
//! a summary for rendering plus an optional plotting step.

mod commands;
mod output;
mod plot;

pub use commands::{
    Cli, CliError, Command, DEFAULT_NETWORK_FILE, DEFAULT_PLOT_SCRIPT, DEFAULT_PYTHON,
    DEGREE_DISTRIBUTION_FILE, METRICS_FILE, MetricRow, NetworkOrigin, OutputFiles, RunCommand,
    RunSummary, run_cli,
};
pub use output::render_summary;
pub use plot::{PlotOutcome, PlotRequest};

//! Argument parsing and the `run` pipeline.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use netmetrics_core::{
    AnalysisReport, GenerationError, GenerationParams, MetricsEngine, NetworkDescriptor,
    NetworkModel, PathLengthNormalisation, PersistError, Topology, generate, read_network,
    write_network,
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::output::{create_output, write_degree_distribution, write_metric_rows};
use super::plot::PlotRequest;
use crate::config::{ConfigError, DEFAULT_CONFIG_FILE, PathNormalisation, RunConfig};

/// Default name of the persisted network file.
pub const DEFAULT_NETWORK_FILE: &str = "Network.csv";
/// Name of the degree distribution report.
pub const DEGREE_DISTRIBUTION_FILE: &str = "DegreeDistribution.csv";
/// Name of the metrics report.
pub const METRICS_FILE: &str = "NetworkMetrics.csv";
/// Default plotting script.
pub const DEFAULT_PLOT_SCRIPT: &str = "script.py";
/// Default Python interpreter.
pub const DEFAULT_PYTHON: &str = "python";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "netmetrics",
    version,
    about = "Generate or load a network and report its structural metrics."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build or load the configured network, analyse it and write the reports.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// JSON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory receiving the network file and the reports.
    #[arg(long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Seed for the random source; overrides the configuration.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Network file written after generation and read when loading,
    /// relative to the output directory.
    #[arg(long = "network-file", default_value = DEFAULT_NETWORK_FILE)]
    pub network_file: PathBuf,

    /// Script that plots the reports.
    #[arg(long = "plot-script", default_value = DEFAULT_PLOT_SCRIPT)]
    pub plot_script: PathBuf,

    /// Interpreter used to run the plotting script.
    #[arg(long, default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Skip the plotting step.
    #[arg(long = "no-plot")]
    pub no_plot: bool,

    /// How per-node path lengths are averaged; overrides the configuration.
    #[arg(long = "path-normalisation", value_enum)]
    pub path_normalisation: Option<PathNormalisation>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An output file or directory could not be created or written.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The configuration could not be read or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Network generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The network file could not be read or written.
    #[error("network file `{path}`: {source}")]
    Persist {
        /// Network file path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: PersistError,
    },
}

impl CliError {
    /// Stable code of the underlying library error, when there is one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Config(error) => error.params_code().map(|code| code.as_str()),
            Self::Generation(error) => Some(error.code().as_str()),
            Self::Persist { source, .. } => Some(source.code().as_str()),
            Self::Io { .. } => None,
        }
    }
}

/// Where the analysed network came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOrigin {
    /// Generated with the given seed.
    Generated {
        /// Seed of the random source.
        seed: u64,
    },
    /// Read from the network file.
    Loaded,
}

/// Files written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    /// Network file, written or read.
    pub network: PathBuf,
    /// Degree distribution report.
    pub degree_distribution: PathBuf,
    /// Metrics report.
    pub metrics: PathBuf,
}

/// One titled line of the metrics report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    /// Row title.
    pub title: &'static str,
    /// Rendered value.
    pub value: String,
}

impl MetricRow {
    fn new(title: &'static str, value: impl ToString) -> Self {
        Self {
            title,
            value: value.to_string(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Model of the analysed network.
    pub model: NetworkModel,
    /// Whether the network was generated or loaded.
    pub origin: NetworkOrigin,
    /// Erdős–Rényi pair probability reported for that model.
    pub erdos_renyi_probability: f64,
    /// Metrics and degree distribution.
    pub report: AnalysisReport,
    /// Files written by the run.
    pub outputs: OutputFiles,
    /// Time spent building and analysing the network.
    pub elapsed: Duration,
    /// Plotting step to run once the summary is shown, unless disabled.
    pub plot: Option<PlotRequest>,
}

impl RunSummary {
    /// Report rows in display order.
    ///
    /// Erdős–Rényi networks add the pair probability and giant component size
    /// and label the path length as belonging to the giant component.
    #[must_use]
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        let metrics = self.report.metrics();
        let erdos_renyi = self.model == NetworkModel::ErdosRenyi;
        let mut rows = vec![MetricRow::new("Number of nodes", metrics.node_count)];
        if erdos_renyi {
            rows.push(MetricRow::new(
                "Probability of connection between each pair",
                self.erdos_renyi_probability,
            ));
            rows.push(MetricRow::new(
                "Number of nodes in the giant component",
                metrics.largest_component_size,
            ));
        }
        rows.push(MetricRow::new("Number of links", metrics.links_count));
        rows.push(MetricRow::new("Average degree", metrics.average_degree));
        rows.push(MetricRow::new(
            "Clustering coefficient",
            metrics.clustering_coefficient,
        ));
        let path_title = if erdos_renyi {
            "Average path distance in the giant component"
        } else {
            "Average path distance"
        };
        rows.push(MetricRow::new(
            path_title,
            metrics.largest_component_avg_path_length,
        ));
        rows
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when any pipeline step fails. Plotting never fails
/// the run; it is deferred to [`RunSummary::plot`].
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<RunSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(&run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(config = %command.config.display(), model = field::Empty, origin = field::Empty),
)]
pub(super) fn run_command(command: &RunCommand) -> Result<RunSummary, CliError> {
    let config = RunConfig::load(&command.config)?;
    let params = config.generation_params(config.model)?;
    let started = Instant::now();

    fs::create_dir_all(&command.output_dir).map_err(|source| CliError::Io {
        path: command.output_dir.clone(),
        source,
    })?;
    let outputs = OutputFiles {
        network: command.output_dir.join(&command.network_file),
        degree_distribution: command.output_dir.join(DEGREE_DISTRIBUTION_FILE),
        metrics: command.output_dir.join(METRICS_FILE),
    };

    let (descriptor, origin) = if config.load_network {
        (load_network(&outputs.network)?, NetworkOrigin::Loaded)
    } else {
        let seed = command
            .seed
            .or(config.seed)
            .unwrap_or_else(rand::random::<u64>);
        let topology = generate_network(&params, seed)?;
        let descriptor = NetworkDescriptor::from_params(&params, topology);
        save_network(&outputs.network, &descriptor)?;
        (descriptor, NetworkOrigin::Generated { seed })
    };
    let span = Span::current();
    span.record("model", field::display(descriptor.model));
    span.record("origin", field::debug(origin));

    let normalisation: PathLengthNormalisation = command
        .path_normalisation
        .or(config.path_normalisation)
        .map(Into::into)
        .unwrap_or_default();
    let report = analyse(&descriptor.topology, normalisation);

    write_report(&outputs.degree_distribution, |writer| {
        write_degree_distribution(writer, report.degree_distribution())
    })?;

    let mut summary = RunSummary {
        model: descriptor.model,
        origin,
        erdos_renyi_probability: descriptor
            .erdos_renyi_probability
            .unwrap_or_else(|| params.erdos_renyi_probability()),
        report,
        outputs,
        elapsed: Duration::ZERO,
        plot: None,
    };
    let rows = summary.metric_rows();
    write_report(&summary.outputs.metrics, |writer| {
        write_metric_rows(writer, &rows)
    })?;
    summary.elapsed = started.elapsed();
    summary.plot = (!command.no_plot).then(|| {
        PlotRequest::new(
            command.python.clone(),
            &command.plot_script,
            command.output_dir.clone(),
        )
    });

    info!(
        model = %summary.model,
        nodes = summary.report.metrics().node_count,
        links = summary.report.metrics().links_count,
        elapsed_ms = u64::try_from(summary.elapsed.as_millis()).unwrap_or(u64::MAX),
        "run completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.generate_network",
    err,
    skip(params),
    fields(model = %params.model(), nodes = params.nodes_requested()),
)]
pub(super) fn generate_network(params: &GenerationParams, seed: u64) -> Result<Topology, CliError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok(generate(params, &mut rng)?)
}

#[instrument(name = "cli.load_network", err, skip(path), fields(path = %path.display()))]
pub(super) fn load_network(path: &Path) -> Result<NetworkDescriptor, CliError> {
    let persist_error = |source: PersistError| CliError::Persist {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|source| persist_error(source.into()))?;
    let descriptor = read_network(BufReader::new(file)).map_err(persist_error)?;
    info!(
        model = %descriptor.model,
        nodes = descriptor.topology.node_count(),
        "network loaded"
    );
    Ok(descriptor)
}

#[instrument(
    name = "cli.save_network",
    err,
    skip(path, descriptor),
    fields(path = %path.display()),
)]
pub(super) fn save_network(path: &Path, descriptor: &NetworkDescriptor) -> Result<(), CliError> {
    let writer = create_output(path)?;
    write_network(writer, descriptor).map_err(|source| CliError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

fn analyse(topology: &Topology, normalisation: PathLengthNormalisation) -> AnalysisReport {
    MetricsEngine::builder()
        .with_path_normalisation(normalisation)
        .build()
        .analyze(topology)
}

fn write_report(
    path: &Path,
    body: impl FnOnce(&mut dyn io::Write) -> io::Result<()>,
) -> Result<(), CliError> {
    let mut writer = create_output(path)?;
    body(&mut writer)
        .and_then(|()| io::Write::flush(&mut writer))
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
}

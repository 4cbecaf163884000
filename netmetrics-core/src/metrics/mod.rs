//! Structural metrics computed over a finished [`Topology`].
//!
//! [`MetricsEngine::analyze`] gathers everything in one pass; the building
//! blocks are public for callers that need a single figure.

use tracing::{Span, debug, field, instrument};

use crate::topology::Topology;

mod clustering;
mod components;
mod degree;
mod paths;

pub use clustering::{TripletCounts, clustering_coefficient};
pub use components::{ComponentId, ComponentTracker, DistanceRow, shortest_paths_from};
pub use degree::{DegreeDistribution, average_degree};
pub use paths::{PathLengthNormalisation, PathLengthSummary, path_lengths};

/// Divides two counts, returning 0 when `denominator` is 0.
#[expect(
    clippy::cast_precision_loss,
    reason = "node and link counts stay well inside the f64 mantissa"
)]
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Scalar summary of a topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkMetrics {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected links.
    pub links_count: usize,
    /// `2 · links / N`.
    pub average_degree: f64,
    /// Closed over connected triplets.
    pub clustering_coefficient: f64,
    /// Number of connected components.
    pub component_count: usize,
    /// Member count of the largest component.
    pub largest_component_size: usize,
    /// Mean per-node average path length inside the largest component.
    pub largest_component_avg_path_length: f64,
}

/// Everything [`MetricsEngine::analyze`] derives from a topology.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    degree_distribution: DegreeDistribution,
    metrics: NetworkMetrics,
}

impl AnalysisReport {
    /// Degree histogram.
    #[must_use]
    pub fn degree_distribution(&self) -> &DegreeDistribution {
        &self.degree_distribution
    }

    /// Scalar metrics.
    #[must_use]
    pub fn metrics(&self) -> &NetworkMetrics {
        &self.metrics
    }
}

/// Computes an [`AnalysisReport`] for a topology.
///
/// The engine holds configuration only; analysing the same topology twice
/// yields identical reports.
///
/// # Examples
/// ```
/// use netmetrics_core::{MetricsEngine, Topology};
///
/// let triangle = Topology::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![0, 1]])?;
/// let report = MetricsEngine::default().analyze(&triangle);
/// assert_eq!(report.metrics().links_count, 3);
/// assert_eq!(report.metrics().clustering_coefficient, 1.0);
/// assert_eq!(report.metrics().largest_component_avg_path_length, 1.0);
/// # Ok::<(), netmetrics_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsEngine {
    normalisation: PathLengthNormalisation,
}

impl MetricsEngine {
    /// Starts configuring an engine.
    #[must_use]
    pub fn builder() -> MetricsEngineBuilder {
        MetricsEngineBuilder::default()
    }

    /// Path-length normalisation applied by [`Self::analyze`].
    #[must_use]
    pub fn normalisation(&self) -> PathLengthNormalisation {
        self.normalisation
    }

    /// Analyses `topology`.
    #[instrument(
        name = "core.analyze",
        skip(self, topology),
        fields(
            nodes = topology.node_count(),
            normalisation = %self.normalisation,
            components = field::Empty,
        ),
    )]
    #[must_use]
    pub fn analyze(&self, topology: &Topology) -> AnalysisReport {
        let degree_distribution = DegreeDistribution::from_topology(topology);
        let triplets = TripletCounts::from_topology(topology);
        debug!(
            closed = triplets.closed,
            connected = triplets.connected,
            "triplets counted"
        );

        let paths = path_lengths(topology, self.normalisation);
        let component_count = paths.components().component_count();
        Span::current().record("components", component_count);

        let metrics = NetworkMetrics {
            node_count: topology.node_count(),
            links_count: topology.link_count(),
            average_degree: average_degree(topology),
            clustering_coefficient: triplets.coefficient(),
            component_count,
            largest_component_size: paths.largest_component().map_or(0, |(_, size)| size),
            largest_component_avg_path_length: paths.largest_component_average(),
        };
        AnalysisReport {
            degree_distribution,
            metrics,
        }
    }
}

/// Builder for [`MetricsEngine`].
#[derive(Debug, Clone, Default)]
pub struct MetricsEngineBuilder {
    normalisation: PathLengthNormalisation,
}

impl MetricsEngineBuilder {
    /// Selects how per-node path lengths are averaged.
    #[must_use]
    pub fn with_path_normalisation(mut self, normalisation: PathLengthNormalisation) -> Self {
        self.normalisation = normalisation;
        self
    }

    /// Finishes the engine.
    #[must_use]
    pub fn build(self) -> MetricsEngine {
        MetricsEngine {
            normalisation: self.normalisation,
        }
    }
}

//! Netmetrics core library.
//!
//! Generates undirected simple networks under seven models (square,
//! triangular and honeycomb lattices, Erdős–Rényi, regular ring, small-world
//! and Barabási–Albert), computes their structural metrics, and reads and
//! writes the plain-text network file format.
//!
//! ```
//! use netmetrics_core::{GenerationParams, MetricsEngine, NetworkModel, generate};
//! use rand::{SeedableRng, rngs::SmallRng};
//!
//! let params = GenerationParams::builder(NetworkModel::ErdosRenyi)
//!     .with_nodes(5)
//!     .with_erdos_renyi_probability(1.0)
//!     .build()?;
//! let topology = generate(&params, &mut SmallRng::seed_from_u64(1))?;
//! let report = MetricsEngine::default().analyze(&topology);
//! assert_eq!(report.metrics().links_count, 10);
//! assert_eq!(report.metrics().clustering_coefficient, 1.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod generators;
mod metrics;
mod params;
mod persist;
mod topology;

pub use crate::{
    error::{
        GenerationError, GenerationErrorCode, ParamsError, ParamsErrorCode, PersistError,
        PersistErrorCode, Result, TopologyError, TopologyErrorCode,
    },
    generators::generate,
    metrics::{
        AnalysisReport, ComponentId, ComponentTracker, DegreeDistribution, DistanceRow,
        MetricsEngine, MetricsEngineBuilder, NetworkMetrics, PathLengthNormalisation,
        PathLengthSummary, TripletCounts, average_degree, clustering_coefficient, path_lengths,
        shortest_paths_from,
    },
    params::{
        DEFAULT_MAX_REWIRE_ATTEMPTS, GenerationParams, GenerationParamsBuilder, NetworkModel,
        effective_node_count,
    },
    persist::{INFO_MARKER, LINKS_MARKER, NetworkDescriptor, read_network, write_network},
    topology::{NodeId, Topology},
};

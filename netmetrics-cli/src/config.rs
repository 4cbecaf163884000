//! JSON run configuration.
//!
//! The document holds a `Network` object whose keys match case-insensitively:
//!
//! ```json
//! {
//!   "Network": {
//!     "LoadNetwork": false,
//!     "NetworkType": 3,
//!     "ErdosRenyiProbability": 0.1,
//!     "NodesCount": 1000,
//!     "RingGraphDegree": 4,
//!     "RewiringProbability": 0.05
//!   }
//! }
//! ```
//!
//! All six keys are required. `Seed`, `PathNormalisation` and
//! `MaxRewireAttempts` are optional extras. Two keys that differ only in case
//! are rejected.

use std::{fs, path::Path, path::PathBuf};

use clap::ValueEnum;
use netmetrics_core::{
    GenerationParams, NetworkModel, ParamsError, ParamsErrorCode, PathLengthNormalisation,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument};

/// File name read when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "Config.json";

const NETWORK_SECTION: &str = "network";

/// Path-length normalisation as spelled on the command line and in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PathNormalisation {
    /// Divide by the number of other nodes in the component.
    ReachablePairs,
    /// Divide by the full component size.
    ComponentSize,
}

impl From<PathNormalisation> for PathLengthNormalisation {
    fn from(value: PathNormalisation) -> Self {
        match value {
            PathNormalisation::ReachablePairs => Self::ReachablePairs,
            PathNormalisation::ComponentSize => Self::ComponentSize,
        }
    }
}

/// Errors raised while reading the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration `{path}`: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid JSON or a value has the wrong type.
    #[error("invalid configuration: {source}")]
    Parse {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
    /// The top-level `Network` object is absent.
    #[error("configuration has no `Network` object")]
    MissingSection,
    /// A required `Network` key is absent.
    #[error("configuration is missing `Network.{field}`")]
    MissingField {
        /// Key as documented.
        field: &'static str,
    },
    /// Two keys of one object differ only in case.
    #[error("configuration key `{key}` appears more than once")]
    DuplicateKey {
        /// Lowercased key.
        key: String,
    },
    /// `NetworkType` is outside `0..=6`.
    #[error("unknown network type {value}; expected 0 to 6")]
    UnknownNetworkType {
        /// Value found in the document.
        value: i64,
    },
    /// The parameters fail validation.
    #[error(transparent)]
    Invalid(#[from] ParamsError),
}

impl ConfigError {
    /// Stable code of the underlying parameter error, if any.
    #[must_use]
    pub fn params_code(&self) -> Option<ParamsErrorCode> {
        match self {
            Self::Invalid(error) => Some(error.code()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NetworkSection {
    #[serde(rename = "loadnetwork")]
    load_network: Option<bool>,
    #[serde(rename = "networktype")]
    network_type: Option<i64>,
    #[serde(rename = "nodescount")]
    nodes_count: Option<usize>,
    #[serde(rename = "erdosrenyiprobability")]
    erdos_renyi_probability: Option<f64>,
    #[serde(rename = "ringgraphdegree")]
    ring_graph_degree: Option<usize>,
    #[serde(rename = "rewiringprobability")]
    rewiring_probability: Option<f64>,
    #[serde(rename = "maxrewireattempts")]
    max_rewire_attempts: Option<usize>,
    seed: Option<u64>,
    #[serde(rename = "pathnormalisation")]
    path_normalisation: Option<PathNormalisation>,
}

/// Parsed run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Load the persisted network instead of generating one.
    pub load_network: bool,
    /// Model to generate.
    pub model: NetworkModel,
    /// Requested node count.
    pub nodes: usize,
    /// Erdős–Rényi pair probability.
    pub erdos_renyi_probability: f64,
    /// Ring degree for ring and small-world models.
    pub ring_degree: usize,
    /// Small-world rewiring probability.
    pub rewiring_probability: f64,
    /// Rewiring attempt budget; the library default applies when absent.
    pub max_rewire_attempts: Option<usize>,
    /// Seed for the random source.
    pub seed: Option<u64>,
    /// Path-length normalisation.
    pub path_normalisation: Option<PathNormalisation>,
}

impl RunConfig {
    /// Reads and parses the configuration at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    #[instrument(name = "cli.load_config", err, skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        debug!(model = %config.model, nodes = config.nodes, "configuration loaded");
        Ok(config)
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped values,
    /// [`ConfigError::DuplicateKey`] for keys differing only in case,
    /// [`ConfigError::MissingSection`] without a `Network` object,
    /// [`ConfigError::MissingField`] for an absent required key and
    /// [`ConfigError::UnknownNetworkType`] for an out-of-range model index.
    ///
    /// # Examples
    /// ```
    /// use netmetrics_cli::config::RunConfig;
    /// use netmetrics_core::NetworkModel;
    ///
    /// let config = RunConfig::from_json_str(
    ///     r#"{"network": {
    ///         "LOADNETWORK": false, "NETWORKTYPE": 1, "nodescount": 5,
    ///         "ErdosRenyiProbability": 1.0, "RingGraphDegree": 4, "RewiringProbability": 0.1
    ///     }}"#,
    /// )?;
    /// assert_eq!(config.model, NetworkModel::ErdosRenyi);
    /// assert!(!config.load_network);
    /// # Ok::<(), netmetrics_cli::config::ConfigError>(())
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let document = lowercase_keys(serde_json::from_str(text)?)?;
        let section = match document {
            Value::Object(mut root) => root
                .remove(NETWORK_SECTION)
                .ok_or(ConfigError::MissingSection)?,
            _ => return Err(ConfigError::MissingSection),
        };
        let section: NetworkSection = serde_json::from_value(section)?;
        let network_type = required(section.network_type, "NetworkType")?;
        let model = NetworkModel::from_index(network_type)
            .ok_or(ConfigError::UnknownNetworkType {
                value: network_type,
            })?;
        Ok(Self {
            load_network: required(section.load_network, "LoadNetwork")?,
            model,
            nodes: required(section.nodes_count, "NodesCount")?,
            erdos_renyi_probability: required(
                section.erdos_renyi_probability,
                "ErdosRenyiProbability",
            )?,
            ring_degree: required(section.ring_graph_degree, "RingGraphDegree")?,
            rewiring_probability: required(
                section.rewiring_probability,
                "RewiringProbability",
            )?,
            max_rewire_attempts: section.max_rewire_attempts,
            seed: section.seed,
            path_normalisation: section.path_normalisation,
        })
    }

    /// Builds validated generation parameters for `model`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when validation fails.
    pub fn generation_params(&self, model: NetworkModel) -> Result<GenerationParams, ConfigError> {
        let mut builder = GenerationParams::builder(model)
            .with_nodes(self.nodes)
            .with_erdos_renyi_probability(self.erdos_renyi_probability)
            .with_ring_degree(self.ring_degree)
            .with_rewiring_probability(self.rewiring_probability);
        if let Some(attempts) = self.max_rewire_attempts {
            builder = builder.with_max_rewire_attempts(attempts);
        }
        Ok(builder.build()?)
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingField { field })
}

fn lowercase_keys(value: Value) -> Result<Value, ConfigError> {
    match value {
        Value::Object(map) => {
            let mut lowered = Map::with_capacity(map.len());
            for (key, value) in map {
                let key = key.to_ascii_lowercase();
                if lowered.contains_key(&key) {
                    return Err(ConfigError::DuplicateKey { key });
                }
                lowered.insert(key, lowercase_keys(value)?);
            }
            Ok(Value::Object(lowered))
        }
        Value::Array(items) => items
            .into_iter()
            .map(lowercase_keys)
            .collect::<Result<_, _>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const FULL: &str = r#"{
        "Network": {
            "LoadNetwork": true,
            "NetworkType": 3,
            "ErdosRenyiProbability": 0.2,
            "NodesCount": 30,
            "RingGraphDegree": 6,
            "RewiringProbability": 0.05,
            "Seed": 99,
            "PathNormalisation": "component-size"
        }
    }"#;

    fn without(key: &str) -> String {
        let mut document: Value = serde_json::from_str(FULL).expect("fixture must parse");
        if let Some(Value::Object(section)) = document.get_mut("Network") {
            section.remove(key);
        }
        document.to_string()
    }

    #[rstest]
    fn parses_every_key() {
        let config = RunConfig::from_json_str(FULL).expect("config must parse");
        assert!(config.load_network);
        assert_eq!(config.model, NetworkModel::SmallWorld);
        assert_eq!(config.nodes, 30);
        assert_eq!(config.erdos_renyi_probability, 0.2);
        assert_eq!(config.ring_degree, 6);
        assert_eq!(config.rewiring_probability, 0.05);
        assert_eq!(config.max_rewire_attempts, None);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.path_normalisation, Some(PathNormalisation::ComponentSize));

        let params = config
            .generation_params(config.model)
            .expect("params must validate");
        assert_eq!(params.ring_degree(), 6);
        assert_eq!(params.nodes_requested(), 30);
    }

    #[rstest]
    #[case::load_network("LoadNetwork")]
    #[case::network_type("NetworkType")]
    #[case::nodes_count("NodesCount")]
    #[case::erdos_renyi_probability("ErdosRenyiProbability")]
    #[case::ring_graph_degree("RingGraphDegree")]
    #[case::rewiring_probability("RewiringProbability")]
    fn every_documented_key_is_required(#[case] key: &'static str) {
        let err = RunConfig::from_json_str(&without(key)).expect_err("key must be required");
        assert!(
            matches!(err, ConfigError::MissingField { field } if field == key),
            "{err:?}"
        );
    }

    #[rstest]
    #[case::seed("Seed")]
    #[case::path_normalisation("PathNormalisation")]
    fn extras_are_optional(#[case] key: &str) {
        RunConfig::from_json_str(&without(key)).expect("extra keys are optional");
    }

    #[rstest]
    fn keys_differing_only_in_case_are_rejected() {
        let err = RunConfig::from_json_str(
            r#"{"Network": {"NodesCount": 10, "nodescount": 20, "NetworkType": 1}}"#,
        )
        .expect_err("colliding keys must be rejected");
        assert!(
            matches!(err, ConfigError::DuplicateKey { ref key } if key == "nodescount"),
            "{err:?}"
        );
    }

    #[rstest]
    #[case::not_json("{", "Parse")]
    #[case::not_object("[1, 2]", "MissingSection")]
    #[case::no_section(r#"{"Other": {}}"#, "MissingSection")]
    #[case::no_type(r#"{"Network": {"NodesCount": 4}}"#, "MissingField")]
    #[case::negative_nodes(r#"{"Network": {"NetworkType": 0, "NodesCount": -4}}"#, "Parse")]
    #[case::mistyped_flag(r#"{"Network": {"LoadNetwork": "yes"}}"#, "Parse")]
    #[case::bad_type(r#"{"Network": {"NetworkType": 7, "NodesCount": 4}}"#, "UnknownNetworkType")]
    fn rejects_bad_documents(#[case] text: &str, #[case] variant: &str) {
        let err = RunConfig::from_json_str(text).expect_err("document must be rejected");
        assert!(format!("{err:?}").starts_with(variant), "{err:?}");
    }

    #[rstest]
    fn odd_ring_degree_fails_validation() {
        let config = RunConfig::from_json_str(
            r#"{"network": {
                "loadNetwork": false, "networkType": 2, "nodesCount": 10,
                "erdosRenyiProbability": 0.1, "ringGraphDegree": 3, "rewiringProbability": 0.1
            }}"#,
        )
        .expect("config must parse");
        let err = config
            .generation_params(config.model)
            .expect_err("odd degree must be rejected");
        assert_eq!(err.params_code(), Some(ParamsErrorCode::OddRingDegree));
    }

    #[rstest]
    fn lowercases_nested_keys() {
        let value = lowercase_keys(serde_json::json!({"A": {"B": [{"C": 1}]}}))
            .expect("keys are distinct");
        assert_eq!(value, serde_json::json!({"a": {"b": [{"c": 1}]}}));
    }
}

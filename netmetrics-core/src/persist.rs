//! Plain-text network file codec.
//!
//! A network file carries a metadata block and one adjacency line per node:
//!
//! ```text
//! #Load Network Info
//!
//! NetworkType,RegularRingGraph
//! NodesCount,4
//! RingGraphDegree,2
//!
//! #Links of Each Node
//! 1,3
//! 2,0
//! 3,1
//! 0,2
//! ```
//!
//! A node without links is written as `-1`. The reader skips anything before
//! the first marker as well as blank lines, and accepts `NetworkType` either
//! as a model name or as its integer index.

use std::io::{BufRead, Write};

use tracing::{Span, debug, field, instrument};

use crate::{
    error::PersistError,
    params::{GenerationParams, NetworkModel},
    topology::{NodeId, Topology},
};

/// Line opening the metadata block.
pub const INFO_MARKER: &str = "#Load Network Info";
/// Line opening the adjacency block.
pub const LINKS_MARKER: &str = "#Links of Each Node";

const NO_LINKS: &str = "-1";

const KEY_NETWORK_TYPE: &str = "NetworkType";
const KEY_NODES_COUNT: &str = "NodesCount";
const KEY_ER_PROBABILITY: &str = "ErdosRenyiProbability";
const KEY_RING_DEGREE: &str = "RingGraphDegree";
const KEY_REWIRING_PROBABILITY: &str = "RewiringProbability";

/// A topology together with the model metadata stored alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDescriptor {
    /// Model that produced the topology.
    pub model: NetworkModel,
    /// Pair probability, for Erdős–Rényi networks.
    pub erdos_renyi_probability: Option<f64>,
    /// Ring degree, for ring and small-world networks.
    pub ring_degree: Option<usize>,
    /// Rewiring probability, for small-world networks.
    pub rewiring_probability: Option<f64>,
    /// The network itself.
    pub topology: Topology,
}

impl NetworkDescriptor {
    /// Describes `topology` with no model extras.
    #[must_use]
    pub fn new(model: NetworkModel, topology: Topology) -> Self {
        Self {
            model,
            erdos_renyi_probability: None,
            ring_degree: None,
            rewiring_probability: None,
            topology,
        }
    }

    /// Describes `topology` with the extras `params` holds for its model.
    ///
    /// # Examples
    /// ```
    /// use netmetrics_core::{GenerationParams, NetworkDescriptor, NetworkModel, Topology};
    ///
    /// let params = GenerationParams::builder(NetworkModel::ErdosRenyi)
    ///     .with_nodes(3)
    ///     .with_erdos_renyi_probability(0.25)
    ///     .build()?;
    /// let descriptor = NetworkDescriptor::from_params(&params, Topology::with_nodes(3));
    /// assert_eq!(descriptor.erdos_renyi_probability, Some(0.25));
    /// assert_eq!(descriptor.ring_degree, None);
    /// # Ok::<(), netmetrics_core::ParamsError>(())
    /// ```
    #[must_use]
    pub fn from_params(params: &GenerationParams, topology: Topology) -> Self {
        let model = params.model();
        Self {
            model,
            erdos_renyi_probability: (model == NetworkModel::ErdosRenyi)
                .then(|| params.erdos_renyi_probability()),
            ring_degree: model.uses_ring_degree().then(|| params.ring_degree()),
            rewiring_probability: (model == NetworkModel::SmallWorld)
                .then(|| params.rewiring_probability()),
            topology,
        }
    }
}

/// Writes `descriptor` in network file format.
///
/// # Errors
/// Returns [`PersistError::Io`] when the writer fails.
#[instrument(
    name = "core.persist.write",
    err,
    skip(writer, descriptor),
    fields(model = %descriptor.model, nodes = descriptor.topology.node_count()),
)]
pub fn write_network<W: Write>(
    mut writer: W,
    descriptor: &NetworkDescriptor,
) -> Result<(), PersistError> {
    writeln!(writer, "{INFO_MARKER}")?;
    writeln!(writer)?;
    writeln!(writer, "{KEY_NETWORK_TYPE},{}", descriptor.model.name())?;
    writeln!(writer, "{KEY_NODES_COUNT},{}", descriptor.topology.node_count())?;
    if let Some(probability) = descriptor.erdos_renyi_probability {
        writeln!(writer, "{KEY_ER_PROBABILITY},{probability}")?;
    }
    if let Some(degree) = descriptor.ring_degree {
        writeln!(writer, "{KEY_RING_DEGREE},{degree}")?;
    }
    if let Some(probability) = descriptor.rewiring_probability {
        writeln!(writer, "{KEY_REWIRING_PROBABILITY},{probability}")?;
    }
    writeln!(writer)?;
    writeln!(writer, "{LINKS_MARKER}")?;
    for (_, neighbours) in descriptor.topology.iter() {
        if neighbours.is_empty() {
            writeln!(writer, "{NO_LINKS}")?;
        } else {
            let line = neighbours
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            writeln!(writer, "{line}")?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Info,
    Links,
}

#[derive(Default)]
struct Metadata {
    model: Option<NetworkModel>,
    nodes: Option<usize>,
    erdos_renyi_probability: Option<f64>,
    ring_degree: Option<usize>,
    rewiring_probability: Option<f64>,
}

/// Reads a network file.
///
/// # Errors
/// Returns [`PersistError::Io`] when the reader fails, a format variant when
/// a marker, key or token is missing or malformed,
/// [`PersistError::NodeCountMismatch`] when the adjacency block does not hold
/// exactly `NodesCount` lines, and [`PersistError::Topology`] when the
/// adjacency is not a simple undirected graph.
///
/// # Examples
/// ```
/// use netmetrics_core::{NetworkModel, read_network};
///
/// let text = "#Load Network Info\n\nNetworkType,4\nNodesCount,3\n\n\
///             #Links of Each Node\n1\n0\n-1\n";
/// let descriptor = read_network(text.as_bytes())?;
/// assert_eq!(descriptor.model, NetworkModel::BarabasiAlbert);
/// assert_eq!(descriptor.topology.link_count(), 1);
/// assert_eq!(descriptor.topology.degree(2), 0);
/// # Ok::<(), netmetrics_core::PersistError>(())
/// ```
#[instrument(
    name = "core.persist.read",
    err,
    skip(reader),
    fields(model = field::Empty, nodes = field::Empty),
)]
pub fn read_network<R: BufRead>(reader: R) -> Result<NetworkDescriptor, PersistError> {
    let mut section = Section::Preamble;
    let mut metadata = Metadata::default();
    let mut adjacency = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let trimmed = line.trim();
        if trimmed.starts_with(INFO_MARKER) {
            section = Section::Info;
            continue;
        }
        if trimmed.starts_with(LINKS_MARKER) {
            section = Section::Links;
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }
        match section {
            Section::Preamble => {}
            Section::Info => metadata.apply(number, trimmed)?,
            Section::Links => adjacency.push(parse_links(number, trimmed)?),
        }
    }

    if section == Section::Preamble {
        return Err(PersistError::MissingMarker {
            marker: INFO_MARKER,
        });
    }
    if section == Section::Info {
        return Err(PersistError::MissingMarker {
            marker: LINKS_MARKER,
        });
    }
    let model = metadata.model.ok_or(PersistError::MissingField {
        field: KEY_NETWORK_TYPE,
    })?;
    let declared = metadata.nodes.ok_or(PersistError::MissingField {
        field: KEY_NODES_COUNT,
    })?;
    if adjacency.len() != declared {
        return Err(PersistError::NodeCountMismatch {
            declared,
            found: adjacency.len(),
        });
    }

    let topology = Topology::from_adjacency(adjacency)?;
    let span = Span::current();
    span.record("model", field::display(model));
    span.record("nodes", declared);
    Ok(NetworkDescriptor {
        model,
        erdos_renyi_probability: metadata.erdos_renyi_probability,
        ring_degree: metadata.ring_degree,
        rewiring_probability: metadata.rewiring_probability,
        topology,
    })
}

impl Metadata {
    fn apply(&mut self, line: usize, entry: &str) -> Result<(), PersistError> {
        let Some((key, value)) = entry.split_once(',') else {
            debug!(line, entry, "skipping metadata line without a value");
            return Ok(());
        };
        let value = value.trim();
        match key.trim() {
            KEY_NETWORK_TYPE => self.model = Some(parse_model(line, value)?),
            KEY_NODES_COUNT => self.nodes = Some(parse_integer(line, value)?),
            KEY_ER_PROBABILITY => self.erdos_renyi_probability = Some(parse_float(line, value)?),
            KEY_RING_DEGREE => self.ring_degree = Some(parse_integer(line, value)?),
            KEY_REWIRING_PROBABILITY => self.rewiring_probability = Some(parse_float(line, value)?),
            other => debug!(line, key = other, "ignoring unknown metadata key"),
        }
        Ok(())
    }
}

fn parse_links(line: usize, entry: &str) -> Result<Vec<NodeId>, PersistError> {
    if entry == NO_LINKS {
        return Ok(Vec::new());
    }
    entry
        .split(',')
        .map(|token| parse_integer(line, token.trim()))
        .collect()
}

fn parse_model(line: usize, value: &str) -> Result<NetworkModel, PersistError> {
    NetworkModel::from_name(value)
        .or_else(|| value.parse().ok().and_then(NetworkModel::from_index))
        .ok_or_else(|| PersistError::UnknownNetworkType {
            line,
            value: value.to_owned(),
        })
}

fn parse_integer(line: usize, value: &str) -> Result<usize, PersistError> {
    value.parse().map_err(|_| PersistError::InvalidInteger {
        line,
        value: value.to_owned(),
    })
}

fn parse_float(line: usize, value: &str) -> Result<f64, PersistError> {
    value.parse().map_err(|_| PersistError::InvalidFloat {
        line,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::error::{PersistErrorCode, TopologyError};

    fn encode(descriptor: &NetworkDescriptor) -> String {
        let mut buffer = Vec::new();
        write_network(&mut buffer, descriptor).expect("writing to memory must succeed");
        String::from_utf8(buffer).expect("output must be UTF-8")
    }

    #[rstest]
    fn writes_reference_layout() {
        let mut topology = Topology::with_nodes(3);
        topology.add_edge(0, 1).expect("edge must be valid");
        let mut descriptor = NetworkDescriptor::new(NetworkModel::SmallWorld, topology);
        descriptor.ring_degree = Some(2);
        descriptor.rewiring_probability = Some(0.5);
        assert_eq!(
            encode(&descriptor),
            "#Load Network Info\n\nNetworkType,SmallWorld\nNodesCount,3\nRingGraphDegree,2\n\
             RewiringProbability,0.5\n\n#Links of Each Node\n1\n0\n-1\n"
        );
    }

    #[rstest]
    fn reads_back_written_extras() {
        let topology = Topology::from_adjacency(vec![vec![1, 2], vec![0], vec![0]])
            .expect("adjacency must be valid");
        let mut descriptor = NetworkDescriptor::new(NetworkModel::ErdosRenyi, topology);
        descriptor.erdos_renyi_probability = Some(0.125);
        let decoded = read_network(encode(&descriptor).as_bytes()).expect("file must parse");
        assert_eq!(decoded, descriptor);
    }

    #[rstest]
    fn tolerates_preamble_and_crlf() {
        let text = "exported by hand\r\n#Load Network Info\r\n\r\nNetworkType,Honeycomb\r\n\
                    NodesCount,2\r\nComment\r\n\r\n#Links of Each Node\r\n1\r\n0";
        let decoded = read_network(text.as_bytes()).expect("file must parse");
        assert_eq!(decoded.model, NetworkModel::Honeycomb);
        assert!(decoded.topology.contains_edge(0, 1));
    }

    #[rstest]
    #[case::no_info("NetworkType,1\n", PersistErrorCode::MissingMarker)]
    #[case::no_links(
        "#Load Network Info\nNetworkType,1\nNodesCount,1\n",
        PersistErrorCode::MissingMarker
    )]
    #[case::no_type(
        "#Load Network Info\nNodesCount,1\n#Links of Each Node\n-1\n",
        PersistErrorCode::MissingField
    )]
    #[case::no_count(
        "#Load Network Info\nNetworkType,1\n#Links of Each Node\n-1\n",
        PersistErrorCode::MissingField
    )]
    #[case::bad_type(
        "#Load Network Info\nNetworkType,Hypercube\nNodesCount,1\n#Links of Each Node\n-1\n",
        PersistErrorCode::UnknownNetworkType
    )]
    #[case::bad_index(
        "#Load Network Info\nNetworkType,9\nNodesCount,1\n#Links of Each Node\n-1\n",
        PersistErrorCode::UnknownNetworkType
    )]
    #[case::bad_count(
        "#Load Network Info\nNetworkType,1\nNodesCount,two\n#Links of Each Node\n-1\n",
        PersistErrorCode::InvalidInteger
    )]
    #[case::bad_float(
        "#Load Network Info\nNetworkType,1\nNodesCount,1\nErdosRenyiProbability,high\n\
         #Links of Each Node\n-1\n",
        PersistErrorCode::InvalidFloat
    )]
    #[case::bad_neighbour(
        "#Load Network Info\nNetworkType,1\nNodesCount,2\n#Links of Each Node\n1\n-2\n",
        PersistErrorCode::InvalidInteger
    )]
    #[case::too_few_lines(
        "#Load Network Info\nNetworkType,1\nNodesCount,3\n#Links of Each Node\n1\n0\n",
        PersistErrorCode::NodeCountMismatch
    )]
    #[case::out_of_range(
        "#Load Network Info\nNetworkType,1\nNodesCount,2\n#Links of Each Node\n5\n-1\n",
        PersistErrorCode::InvalidTopology
    )]
    fn rejects_malformed_files(#[case] text: &str, #[case] expected: PersistErrorCode) {
        let err = read_network(text.as_bytes()).expect_err("file must be rejected");
        assert_eq!(err.code(), expected, "{err}");
    }

    #[rstest]
    fn reports_asymmetric_adjacency() {
        let text = "#Load Network Info\nNetworkType,1\nNodesCount,2\n#Links of Each Node\n1\n-1\n";
        let err = read_network(text.as_bytes()).expect_err("file must be rejected");
        assert!(matches!(
            err,
            PersistError::Topology {
                source: TopologyError::Asymmetric { from: 0, to: 1 }
            }
        ));
    }

    #[rstest]
    fn reports_line_of_bad_token() {
        let text = "#Load Network Info\nNetworkType,1\nNodesCount,1\n#Links of Each Node\nx\n";
        let err = read_network(text.as_bytes()).expect_err("file must be rejected");
        assert!(matches!(err, PersistError::InvalidInteger { line: 5, ref value } if value == "x"));
    }
}

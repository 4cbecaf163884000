//! Error types for the netmetrics core library.
//!
//! Each layer (topology mutation, parameter validation, generation and the
//! network-file codec) owns an error enum. Every enum exposes a stable
//! machine-readable code so the CLI can report failures uniformly.

use std::{fmt, io};

use thiserror::Error;

use crate::topology::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error raised while mutating or validating a [`crate::Topology`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TopologyError {
    /// An edge was requested from a node to itself.
    #[error("self-loop rejected at node {node}")]
    SelfLoop {
        /// Node that attempted to link to itself.
        node: NodeId,
    },
    /// An endpoint lies outside `[0, node_count)`.
    #[error("node {node} is out of bounds for a topology of {node_count} nodes")]
    NodeOutOfBounds {
        /// Offending endpoint.
        node: NodeId,
        /// Number of nodes in the topology.
        node_count: usize,
    },
    /// A neighbour entry has no reverse entry.
    #[error("node {from} lists {to} as a neighbour but {to} does not list {from}")]
    Asymmetric {
        /// Node holding the one-sided entry.
        from: NodeId,
        /// Neighbour missing the reverse entry.
        to: NodeId,
    },
    /// A node lists the same neighbour twice.
    #[error("node {node} lists neighbour {neighbour} more than once")]
    DuplicateNeighbour {
        /// Node whose adjacency list repeats an entry.
        node: NodeId,
        /// Repeated neighbour.
        neighbour: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`TopologyError`] variants.
    enum TopologyErrorCode for TopologyError {
        /// An edge was requested from a node to itself.
        SelfLoop => SelfLoop { .. } => "TOPOLOGY_SELF_LOOP",
        /// An endpoint lies outside the topology.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "TOPOLOGY_NODE_OUT_OF_BOUNDS",
        /// A neighbour entry has no reverse entry.
        Asymmetric => Asymmetric { .. } => "TOPOLOGY_ASYMMETRIC",
        /// A node lists the same neighbour twice.
        DuplicateNeighbour => DuplicateNeighbour { .. } => "TOPOLOGY_DUPLICATE_NEIGHBOUR",
    }
}

/// Validation failure raised by [`crate::GenerationParamsBuilder::build`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParamsError {
    /// A probability was outside `[0, 1]` or not finite.
    #[error("{name} must lie within [0, 1] (got {value})")]
    InvalidProbability {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
    /// At least one node must be requested.
    #[error("nodes_requested must be at least 1")]
    ZeroNodes,
    /// Ring-based models need an even degree.
    #[error("ring_degree must be even (got {degree})")]
    OddRingDegree {
        /// Degree supplied by the caller.
        degree: usize,
    },
    /// Ring-based models need a degree below the node count.
    #[error("ring_degree {degree} must be smaller than nodes_requested {nodes}")]
    RingDegreeTooLarge {
        /// Degree supplied by the caller.
        degree: usize,
        /// Requested node count.
        nodes: usize,
    },
    /// Rewiring needs at least one attempt per edge.
    #[error("max_rewire_attempts must be at least 1")]
    ZeroRewireAttempts,
}

define_error_codes! {
    /// Stable codes describing [`ParamsError`] variants.
    enum ParamsErrorCode for ParamsError {
        /// A probability was outside `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "PARAMS_INVALID_PROBABILITY",
        /// No nodes were requested.
        ZeroNodes => ZeroNodes => "PARAMS_ZERO_NODES",
        /// Ring degree was odd.
        OddRingDegree => OddRingDegree { .. } => "PARAMS_ODD_RING_DEGREE",
        /// Ring degree was not below the node count.
        RingDegreeTooLarge => RingDegreeTooLarge { .. } => "PARAMS_RING_DEGREE_TOO_LARGE",
        /// Zero rewiring attempts were allowed.
        ZeroRewireAttempts => ZeroRewireAttempts => "PARAMS_ZERO_REWIRE_ATTEMPTS",
    }
}

/// Error produced while generating a topology.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerationError {
    /// A generator attempted an invalid edge. This indicates a generator bug.
    #[error("generator produced an invalid edge: {source}")]
    Topology {
        /// Underlying topology violation.
        #[from]
        source: TopologyError,
    },
    /// Small-world rewiring found no acceptable target within the attempt budget.
    #[error("could not rewire an edge of node {node} after {attempts} attempts")]
    RewireExhausted {
        /// Node whose edge was being rewired.
        node: NodeId,
        /// Number of rejected candidate targets.
        attempts: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// A generator attempted an invalid edge.
        InvalidEdge => Topology { .. } => "GENERATION_INVALID_EDGE",
        /// Rewiring exhausted its attempt budget.
        RewireExhausted => RewireExhausted { .. } => "GENERATION_REWIRE_EXHAUSTED",
    }
}

impl GenerationError {
    /// Retrieve the inner [`TopologyErrorCode`] when the failure came from the topology.
    #[must_use]
    pub const fn topology_code(&self) -> Option<TopologyErrorCode> {
        match self {
            Self::Topology { source } => Some(source.code()),
            Self::RewireExhausted { .. } => None,
        }
    }
}

/// Error produced while reading or writing a persisted network file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PersistError {
    /// The underlying reader or writer failed.
    #[error("network file I/O failed: {source}")]
    Io {
        /// Operating system error.
        #[from]
        source: io::Error,
    },
    /// A required section marker never appeared.
    #[error("network file is missing the `{marker}` marker")]
    MissingMarker {
        /// Marker line that was expected.
        marker: &'static str,
    },
    /// A required metadata key never appeared.
    #[error("network file does not declare `{field}`")]
    MissingField {
        /// Metadata key that was expected.
        field: &'static str,
    },
    /// A token could not be parsed as a non-negative integer.
    #[error("line {line}: `{value}` is not a valid integer")]
    InvalidInteger {
        /// One-based line number.
        line: usize,
        /// Raw token.
        value: String,
    },
    /// A token could not be parsed as a number.
    #[error("line {line}: `{value}` is not a valid number")]
    InvalidFloat {
        /// One-based line number.
        line: usize,
        /// Raw token.
        value: String,
    },
    /// The declared network type is not one of the seven models.
    #[error("line {line}: unknown network type `{value}`")]
    UnknownNetworkType {
        /// One-based line number.
        line: usize,
        /// Raw token.
        value: String,
    },
    /// The number of adjacency lines differs from the declared node count.
    #[error("network file declares {declared} nodes but lists links for {found}")]
    NodeCountMismatch {
        /// Value of `NodesCount`.
        declared: usize,
        /// Number of adjacency lines present.
        found: usize,
    },
    /// The adjacency section violates the topology invariants.
    #[error("network file adjacency is inconsistent: {source}")]
    Topology {
        /// Underlying topology violation.
        #[from]
        source: TopologyError,
    },
}

define_error_codes! {
    /// Stable codes describing [`PersistError`] variants.
    enum PersistErrorCode for PersistError {
        /// The underlying reader or writer failed.
        Io => Io { .. } => "PERSIST_IO",
        /// A section marker is missing.
        MissingMarker => MissingMarker { .. } => "PERSIST_MISSING_MARKER",
        /// A metadata key is missing.
        MissingField => MissingField { .. } => "PERSIST_MISSING_FIELD",
        /// A token is not an integer.
        InvalidInteger => InvalidInteger { .. } => "PERSIST_INVALID_INTEGER",
        /// A token is not a number.
        InvalidFloat => InvalidFloat { .. } => "PERSIST_INVALID_FLOAT",
        /// The network type is unknown.
        UnknownNetworkType => UnknownNetworkType { .. } => "PERSIST_UNKNOWN_NETWORK_TYPE",
        /// Adjacency line count disagrees with `NodesCount`.
        NodeCountMismatch => NodeCountMismatch { .. } => "PERSIST_NODE_COUNT_MISMATCH",
        /// Adjacency violates topology invariants.
        InvalidTopology => Topology { .. } => "PERSIST_INVALID_TOPOLOGY",
    }
}

/// Convenient alias for generator results.
pub type Result<T> = core::result::Result<T, GenerationError>;

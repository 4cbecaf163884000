//! Generation parameters and their validating builder.
//!
//! [`GenerationParams`] can only be obtained from
//! [`GenerationParamsBuilder::build`], so every generator may assume the
//! ranges documented on the builder hold.

use std::fmt;

use crate::error::ParamsError;

/// Default number of candidate targets drawn before small-world rewiring gives up.
pub const DEFAULT_MAX_REWIRE_ATTEMPTS: usize = 1_000;

/// The seven supported generative models.
///
/// The discriminant order matches the integer `networkType` used by
/// configuration files.
///
/// # Examples
/// ```
/// use netmetrics_core::NetworkModel;
///
/// assert_eq!(NetworkModel::from_index(3), Some(NetworkModel::SmallWorld));
/// assert_eq!(NetworkModel::SmallWorld.index(), 3);
/// assert_eq!(NetworkModel::from_name("RegularRingGraph"), Some(NetworkModel::RegularRing));
/// assert!(NetworkModel::Honeycomb.is_lattice());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkModel {
    /// Periodic square lattice, four neighbours per node.
    SquareLattice,
    /// Erdős–Rényi `G(N, p)` random graph.
    ErdosRenyi,
    /// Ring where each node links to its `k/2` nearest neighbours on each side.
    RegularRing,
    /// Regular ring with random rewiring (Watts–Strogatz).
    SmallWorld,
    /// Barabási–Albert preferential attachment with one link per new node.
    BarabasiAlbert,
    /// Periodic triangular lattice, six neighbours per node.
    TriangularLattice,
    /// Periodic honeycomb lattice, three neighbours per node.
    Honeycomb,
}

impl NetworkModel {
    /// Every model in index order.
    pub const ALL: [Self; 7] = [
        Self::SquareLattice,
        Self::ErdosRenyi,
        Self::RegularRing,
        Self::SmallWorld,
        Self::BarabasiAlbert,
        Self::TriangularLattice,
        Self::Honeycomb,
    ];

    /// Returns the integer index used by configuration files.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::SquareLattice => 0,
            Self::ErdosRenyi => 1,
            Self::RegularRing => 2,
            Self::SmallWorld => 3,
            Self::BarabasiAlbert => 4,
            Self::TriangularLattice => 5,
            Self::Honeycomb => 6,
        }
    }

    /// Resolves a configuration index.
    #[must_use]
    pub fn from_index(index: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|model| i64::from(model.index()) == index)
    }

    /// Returns the name written to persisted network files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SquareLattice => "SimpleSquareLattice",
            Self::ErdosRenyi => "ErdosRenyi",
            Self::RegularRing => "RegularRingGraph",
            Self::SmallWorld => "SmallWorld",
            Self::BarabasiAlbert => "BarabasiAlbert",
            Self::TriangularLattice => "TriangularLattice",
            Self::Honeycomb => "Honeycomb",
        }
    }

    /// Resolves a persisted name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.name() == name)
    }

    /// Returns whether the model lays nodes out on an `L×L` periodic grid.
    #[must_use]
    pub const fn is_lattice(self) -> bool {
        matches!(
            self,
            Self::SquareLattice | Self::TriangularLattice | Self::Honeycomb
        )
    }

    /// Returns whether the model is built on a regular ring.
    #[must_use]
    pub const fn uses_ring_degree(self) -> bool {
        matches!(self, Self::RegularRing | Self::SmallWorld)
    }
}

impl fmt::Display for NetworkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the node count a model actually builds for `requested` nodes.
///
/// Lattice models round down to the nearest perfect square; every other
/// model uses the request unchanged.
///
/// # Examples
/// ```
/// use netmetrics_core::{NetworkModel, effective_node_count};
///
/// assert_eq!(effective_node_count(NetworkModel::SquareLattice, 10), 9);
/// assert_eq!(effective_node_count(NetworkModel::ErdosRenyi, 10), 10);
/// ```
#[must_use]
pub fn effective_node_count(model: NetworkModel, requested: usize) -> usize {
    if model.is_lattice() {
        let side = lattice_side(requested);
        side * side
    } else {
        requested
    }
}

/// Returns `floor(sqrt(n))`, correcting any floating-point rounding.
#[must_use]
pub(crate) fn lattice_side(n: usize) -> usize {
    let mut side = (n as f64).sqrt() as usize;
    while side * side > n {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= n {
        side += 1;
    }
    side
}

/// Validated parameters consumed by the generators.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    model: NetworkModel,
    nodes_requested: usize,
    erdos_renyi_probability: f64,
    ring_degree: usize,
    rewiring_probability: f64,
    max_rewire_attempts: usize,
}

impl GenerationParams {
    /// Returns a builder for `model` populated with defaults.
    #[must_use]
    pub fn builder(model: NetworkModel) -> GenerationParamsBuilder {
        GenerationParamsBuilder::new(model)
    }

    /// Returns the selected model.
    #[must_use]
    pub fn model(&self) -> NetworkModel {
        self.model
    }

    /// Returns the node count requested by the caller.
    #[must_use]
    pub fn nodes_requested(&self) -> usize {
        self.nodes_requested
    }

    /// Returns the node count the selected model will build.
    #[must_use]
    pub fn effective_node_count(&self) -> usize {
        effective_node_count(self.model, self.nodes_requested)
    }

    /// Returns the Erdős–Rényi link probability.
    #[must_use]
    pub fn erdos_renyi_probability(&self) -> f64 {
        self.erdos_renyi_probability
    }

    /// Returns the ring degree `k`.
    #[must_use]
    pub fn ring_degree(&self) -> usize {
        self.ring_degree
    }

    /// Returns the small-world rewiring probability β.
    #[must_use]
    pub fn rewiring_probability(&self) -> f64 {
        self.rewiring_probability
    }

    /// Returns how many targets rewiring may reject before failing.
    #[must_use]
    pub fn max_rewire_attempts(&self) -> usize {
        self.max_rewire_attempts
    }
}

/// Configures and validates [`GenerationParams`].
///
/// # Examples
/// ```
/// use netmetrics_core::{GenerationParamsBuilder, NetworkModel, ParamsError};
///
/// let params = GenerationParamsBuilder::new(NetworkModel::SmallWorld)
///     .with_nodes(100)
///     .with_ring_degree(4)
///     .with_rewiring_probability(0.1)
///     .build()?;
/// assert_eq!(params.ring_degree(), 4);
///
/// let err = GenerationParamsBuilder::new(NetworkModel::RegularRing)
///     .with_nodes(10)
///     .with_ring_degree(3)
///     .build()
///     .unwrap_err();
/// assert_eq!(err, ParamsError::OddRingDegree { degree: 3 });
/// # Ok::<(), ParamsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GenerationParamsBuilder {
    model: NetworkModel,
    nodes_requested: usize,
    erdos_renyi_probability: f64,
    ring_degree: usize,
    rewiring_probability: f64,
    max_rewire_attempts: usize,
}

impl GenerationParamsBuilder {
    /// Creates a builder for `model` with 100 nodes, `p = 0.1`, `k = 4`, `β = 0.1`.
    #[must_use]
    pub fn new(model: NetworkModel) -> Self {
        Self {
            model,
            nodes_requested: 100,
            erdos_renyi_probability: 0.1,
            ring_degree: 4,
            rewiring_probability: 0.1,
            max_rewire_attempts: DEFAULT_MAX_REWIRE_ATTEMPTS,
        }
    }

    /// Overrides the requested node count.
    #[must_use]
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes_requested = nodes;
        self
    }

    /// Overrides the Erdős–Rényi link probability.
    #[must_use]
    pub fn with_erdos_renyi_probability(mut self, probability: f64) -> Self {
        self.erdos_renyi_probability = probability;
        self
    }

    /// Overrides the ring degree.
    #[must_use]
    pub fn with_ring_degree(mut self, degree: usize) -> Self {
        self.ring_degree = degree;
        self
    }

    /// Overrides the rewiring probability.
    #[must_use]
    pub fn with_rewiring_probability(mut self, probability: f64) -> Self {
        self.rewiring_probability = probability;
        self
    }

    /// Overrides the rewiring attempt budget.
    #[must_use]
    pub fn with_max_rewire_attempts(mut self, attempts: usize) -> Self {
        self.max_rewire_attempts = attempts;
        self
    }

    /// Validates the configuration.
    ///
    /// Ring constraints are only enforced for [`NetworkModel::RegularRing`] and
    /// [`NetworkModel::SmallWorld`]; other models ignore `ring_degree`.
    ///
    /// # Errors
    /// Returns the first [`ParamsError`] encountered.
    pub fn build(self) -> Result<GenerationParams, ParamsError> {
        check_probability("erdos_renyi_probability", self.erdos_renyi_probability)?;
        check_probability("rewiring_probability", self.rewiring_probability)?;
        if self.nodes_requested == 0 {
            return Err(ParamsError::ZeroNodes);
        }
        if self.model.uses_ring_degree() {
            if self.ring_degree % 2 != 0 {
                return Err(ParamsError::OddRingDegree {
                    degree: self.ring_degree,
                });
            }
            if self.ring_degree >= self.nodes_requested {
                return Err(ParamsError::RingDegreeTooLarge {
                    degree: self.ring_degree,
                    nodes: self.nodes_requested,
                });
            }
        }
        if self.max_rewire_attempts == 0 {
            return Err(ParamsError::ZeroRewireAttempts);
        }

        Ok(GenerationParams {
            model: self.model,
            nodes_requested: self.nodes_requested,
            erdos_renyi_probability: self.erdos_renyi_probability,
            ring_degree: self.ring_degree,
            rewiring_probability: self.rewiring_probability,
            max_rewire_attempts: self.max_rewire_attempts,
        })
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ParamsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamsError::InvalidProbability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 1)]
    #[case(10, 3)]
    #[case(16, 4)]
    #[case(99, 9)]
    #[case(10_000, 100)]
    fn lattice_side_is_integer_square_root(#[case] n: usize, #[case] expected: usize) {
        assert_eq!(lattice_side(n), expected);
    }

    #[rstest]
    fn model_index_round_trips() {
        for model in NetworkModel::ALL {
            assert_eq!(NetworkModel::from_index(i64::from(model.index())), Some(model));
            assert_eq!(NetworkModel::from_name(model.name()), Some(model));
        }
        assert_eq!(NetworkModel::from_index(7), None);
        assert_eq!(NetworkModel::from_index(-1), None);
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::negative(-0.1)]
    #[case::above_one(1.5)]
    fn build_rejects_invalid_probability(#[case] value: f64) {
        let err = GenerationParamsBuilder::new(NetworkModel::ErdosRenyi)
            .with_erdos_renyi_probability(value)
            .build()
            .expect_err("probability must be rejected");
        assert!(matches!(
            err,
            ParamsError::InvalidProbability {
                name: "erdos_renyi_probability",
                ..
            }
        ));
    }

    #[rstest]
    #[case::zero_nodes(NetworkModel::BarabasiAlbert, 0, 0, ParamsError::ZeroNodes)]
    #[case::odd_degree(NetworkModel::SmallWorld, 10, 3, ParamsError::OddRingDegree { degree: 3 })]
    #[case::degree_too_large(
        NetworkModel::RegularRing,
        4,
        4,
        ParamsError::RingDegreeTooLarge { degree: 4, nodes: 4 },
    )]
    fn build_rejects_invalid_shapes(
        #[case] model: NetworkModel,
        #[case] nodes: usize,
        #[case] degree: usize,
        #[case] expected: ParamsError,
    ) {
        let err = GenerationParamsBuilder::new(model)
            .with_nodes(nodes)
            .with_ring_degree(degree)
            .build()
            .expect_err("configuration must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn ring_degree_is_ignored_by_other_models() {
        let params = GenerationParamsBuilder::new(NetworkModel::ErdosRenyi)
            .with_nodes(3)
            .with_ring_degree(7)
            .build()
            .expect("ring degree is irrelevant for Erdős–Rényi");
        assert_eq!(params.nodes_requested(), 3);
    }

    #[rstest]
    fn zero_rewire_attempts_are_rejected() {
        let err = GenerationParamsBuilder::new(NetworkModel::SmallWorld)
            .with_max_rewire_attempts(0)
            .build()
            .expect_err("zero attempts must be rejected");
        assert_eq!(err, ParamsError::ZeroRewireAttempts);
    }

    #[rstest]
    fn effective_node_count_rounds_lattices_only() {
        let lattice = GenerationParamsBuilder::new(NetworkModel::Honeycomb)
            .with_nodes(10)
            .build()
            .expect("valid");
        assert_eq!(lattice.effective_node_count(), 9);
        let ring = GenerationParamsBuilder::new(NetworkModel::RegularRing)
            .with_nodes(10)
            .build()
            .expect("valid");
        assert_eq!(ring.effective_node_count(), 10);
    }
}

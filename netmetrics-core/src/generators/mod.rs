//! Topology generators for the seven supported models.
//!
//! [`generate`] dispatches on [`GenerationParams::model`]; the individual
//! generators are public so callers can build a model directly. Randomised
//! generators draw from a caller-owned [`Rng`] in a fixed order (nodes, then
//! pairs or offsets, ascending), so a seeded generator reproduces the same
//! topology.

use rand::Rng;
use tracing::{Span, field, info, instrument};

use crate::{
    NetworkModel, Result,
    error::TopologyError,
    params::{GenerationParams, lattice_side},
    topology::{NodeId, Topology},
};

mod lattice;
mod preferential;
mod random;
mod ring;

pub use lattice::{honeycomb, square_lattice, triangular_lattice};
pub use preferential::barabasi_albert;
pub use random::erdos_renyi;
pub use ring::{Rewiring, regular_ring, small_world};

/// Builds the topology described by `params`.
///
/// # Errors
/// Returns [`crate::GenerationError::RewireExhausted`] when small-world
/// rewiring runs out of attempts and [`crate::GenerationError::Topology`] if a
/// generator attempts an invalid edge.
///
/// # Examples
/// ```
/// use netmetrics_core::{GenerationParams, NetworkModel, generate};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let params = GenerationParams::builder(NetworkModel::RegularRing)
///     .with_nodes(10)
///     .with_ring_degree(4)
///     .build()?;
/// let mut rng = SmallRng::seed_from_u64(7);
/// let topology = generate(&params, &mut rng)?;
/// assert!((0..10).all(|node| topology.degree(node) == 4));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.generate",
    err,
    skip(params, rng),
    fields(
        model = %params.model(),
        nodes_requested = params.nodes_requested(),
        nodes = field::Empty,
        links = field::Empty,
    ),
)]
pub fn generate<R: Rng + ?Sized>(params: &GenerationParams, rng: &mut R) -> Result<Topology> {
    let nodes = params.effective_node_count();
    if nodes != params.nodes_requested() {
        info!(
            requested = params.nodes_requested(),
            adjusted = nodes,
            "node count adjusted to form a perfect lattice"
        );
    }

    let topology = match params.model() {
        NetworkModel::SquareLattice => square_lattice(lattice_side(nodes))?,
        NetworkModel::ErdosRenyi => erdos_renyi(nodes, params.erdos_renyi_probability(), rng)?,
        NetworkModel::RegularRing => regular_ring(nodes, params.ring_degree())?,
        NetworkModel::SmallWorld => small_world(
            nodes,
            params.ring_degree(),
            Rewiring {
                probability: params.rewiring_probability(),
                max_attempts: params.max_rewire_attempts(),
            },
            rng,
        )?,
        NetworkModel::BarabasiAlbert => barabasi_albert(nodes, rng)?,
        NetworkModel::TriangularLattice => triangular_lattice(lattice_side(nodes))?,
        NetworkModel::Honeycomb => honeycomb(lattice_side(nodes))?,
    };

    let span = Span::current();
    span.record("nodes", topology.node_count());
    span.record("links", topology.link_count());
    Ok(topology)
}

/// Links `u` and `v` unless they coincide or are already linked.
///
/// Periodic layouts with very small sides map distinct directions onto the
/// same node; skipping those keeps the topology simple.
fn link_once(
    topology: &mut Topology,
    u: NodeId,
    v: NodeId,
) -> core::result::Result<bool, TopologyError> {
    if u == v || topology.contains_edge(u, v) {
        return Ok(false);
    }
    topology.add_edge(u, v)?;
    Ok(true)
}

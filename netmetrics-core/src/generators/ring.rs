//! Regular ring and small-world (Watts–Strogatz) generators.

use rand::{Rng, distributions::Standard};
use tracing::trace;

use crate::{
    Result,
    error::GenerationError,
    topology::{NodeId, Topology},
};

/// Rewiring settings for [`small_world`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewiring {
    /// Probability β that a right-side ring edge is rewired.
    pub probability: f64,
    /// Number of candidate targets that may be rejected before giving up.
    pub max_attempts: usize,
}

/// Builds a ring of `nodes` where each node links to its `degree / 2`
/// nearest neighbours on each side, with periodic wraparound.
///
/// Each node's list runs `[i + 1, i - 1, i + 2, i - 2, ...]`. Callers pass
/// an even `degree` below `nodes`; an odd degree behaves like the next lower
/// even one.
///
/// # Errors
/// Returns [`GenerationError::Topology`] when `degree` is too large for
/// `nodes`, so that offsets on both sides reach the same node.
///
/// # Examples
/// ```
/// use netmetrics_core::generators::regular_ring;
///
/// let ring = regular_ring(6, 4)?;
/// assert_eq!(ring.neighbours(0), &[1, 5, 2, 4]);
/// assert_eq!(ring.neighbours(1), &[2, 0, 3, 5]);
/// assert_eq!(ring.link_count(), 12);
/// # Ok::<(), netmetrics_core::GenerationError>(())
/// ```
pub fn regular_ring(nodes: usize, degree: usize) -> Result<Topology> {
    let adjacency = (0..nodes)
        .map(|node| {
            (1..=degree / 2)
                .flat_map(|offset| {
                    [
                        (node + offset) % nodes,
                        (node + nodes - offset % nodes) % nodes,
                    ]
                })
                .collect()
        })
        .collect();
    Ok(Topology::from_adjacency(adjacency)?)
}

/// Builds a small-world network by rewiring a [`regular_ring`].
///
/// Nodes are visited in ascending order and, for each, its right-side ring
/// edges `(node, node + d)` for `d = 1..=degree / 2`. One uniform sample is
/// drawn per edge; when it falls below `rewiring.probability` the far
/// endpoint is replaced by a uniformly drawn node that is neither `node`
/// itself nor already linked to it.
///
/// # Errors
/// Returns [`GenerationError::RewireExhausted`] when `rewiring.max_attempts`
/// consecutive candidates are rejected, which is guaranteed once `node` is
/// already linked to every other node.
pub fn small_world<R: Rng + ?Sized>(
    nodes: usize,
    degree: usize,
    rewiring: Rewiring,
    rng: &mut R,
) -> Result<Topology> {
    let mut topology = regular_ring(nodes, degree)?;
    for node in 0..nodes {
        for offset in 1..=degree / 2 {
            let far = (node + offset) % nodes;
            let sample: f64 = rng.sample(Standard);
            if sample >= rewiring.probability || !topology.contains_edge(node, far) {
                continue;
            }
            let target = draw_rewire_target(&topology, node, rewiring.max_attempts, rng)?;
            topology.remove_edge(node, far);
            topology.add_edge(node, target)?;
            trace!(node, from = far, to = target, "rewired ring edge");
        }
    }
    Ok(topology)
}

fn draw_rewire_target<R: Rng + ?Sized>(
    topology: &Topology,
    node: NodeId,
    max_attempts: usize,
    rng: &mut R,
) -> Result<NodeId> {
    for _ in 0..max_attempts {
        let candidate = rng.gen_range(0..topology.node_count());
        if candidate != node && !topology.contains_edge(node, candidate) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::RewireExhausted {
        node,
        attempts: max_attempts,
    })
}

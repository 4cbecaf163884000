//! Barabási–Albert preferential attachment.

use rand::Rng;

use crate::{
    Result,
    topology::{NodeId, Topology},
};

/// Grows a Barabási–Albert network of `nodes` nodes, one link per new node.
///
/// Nodes 0 and 1 start linked. Every later node draws one ticket out of
/// `2 × links` and attaches to the node owning it, where node `i` owns
/// `degree(i)` consecutive tickets in ascending id order. Fewer than two
/// nodes yields isolated nodes.
///
/// # Errors
/// Propagates [`crate::GenerationError::Topology`] from invalid edges.
///
/// # Examples
/// ```
/// use netmetrics_core::generators::barabasi_albert;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(11);
/// let tree = barabasi_albert(50, &mut rng)?;
/// assert_eq!(tree.link_count(), 49);
/// # Ok::<(), netmetrics_core::GenerationError>(())
/// ```
pub fn barabasi_albert<R: Rng + ?Sized>(nodes: usize, rng: &mut R) -> Result<Topology> {
    let mut topology = Topology::with_nodes(nodes);
    if nodes < 2 {
        return Ok(topology);
    }

    topology.add_edge(0, 1)?;
    let mut tickets = 2;
    for new_node in 2..nodes {
        let winner = draw_by_degree(&topology, new_node, tickets, rng);
        topology.add_edge(new_node, winner)?;
        tickets += 2;
    }
    Ok(topology)
}

/// Picks one of the first `existing` nodes with probability `degree / tickets`.
fn draw_by_degree<R: Rng + ?Sized>(
    topology: &Topology,
    existing: usize,
    tickets: usize,
    rng: &mut R,
) -> NodeId {
    let mut remaining = rng.gen_range(0..tickets);
    for node in 0..existing {
        let degree = topology.degree(node);
        if remaining < degree {
            return node;
        }
        remaining -= degree;
    }
    // Degrees of the existing nodes sum to `tickets`, so the scan always returns.
    existing - 1
}

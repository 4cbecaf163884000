//! Erdős–Rényi `G(N, p)` generator.

use rand::{Rng, distributions::Standard};

use crate::{Result, topology::Topology};

/// Builds a `G(nodes, probability)` random graph.
///
/// One uniform sample in `[0, 1)` is drawn for every pair `i < j`, in
/// row-major order, and the pair is linked when the sample is below
/// `probability`.
///
/// # Errors
/// Propagates [`crate::GenerationError::Topology`] from invalid edges.
///
/// # Examples
/// ```
/// use netmetrics_core::generators::erdos_renyi;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let complete = erdos_renyi(5, 1.0, &mut rng)?;
/// assert_eq!(complete.link_count(), 10);
/// # Ok::<(), netmetrics_core::GenerationError>(())
/// ```
pub fn erdos_renyi<R: Rng + ?Sized>(
    nodes: usize,
    probability: f64,
    rng: &mut R,
) -> Result<Topology> {
    let mut topology = Topology::with_nodes(nodes);
    for i in 0..nodes {
        for j in (i + 1)..nodes {
            let sample: f64 = rng.sample(Standard);
            if sample < probability {
                topology.add_edge(i, j)?;
            }
        }
    }
    Ok(topology)
}

//! Global clustering coefficient.

use std::collections::HashSet;

use crate::topology::{NodeId, Topology};

use super::ratio;

/// Closed and connected triplet tallies.
///
/// A connected triplet is a pair of neighbours of a common centre node; it is
/// closed when the two neighbours are themselves linked. Each triangle is
/// therefore counted once per corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripletCounts {
    /// Neighbour pairs that are linked to each other.
    pub closed: usize,
    /// All neighbour pairs, `Σ d(d-1)/2`.
    pub connected: usize,
}

impl TripletCounts {
    /// Tallies every triplet in `topology`.
    #[must_use]
    pub fn from_topology(topology: &Topology) -> Self {
        let neighbour_sets: Vec<HashSet<NodeId>> = topology
            .iter()
            .map(|(_, neighbours)| neighbours.iter().copied().collect())
            .collect();

        let mut counts = Self::default();
        for (_, neighbours) in topology.iter() {
            let degree = neighbours.len();
            counts.connected += degree * degree.saturating_sub(1) / 2;
            for (index, &first) in neighbours.iter().enumerate() {
                let first_set = &neighbour_sets[first];
                counts.closed += neighbours[index + 1..]
                    .iter()
                    .filter(|&&second| first_set.contains(&second))
                    .count();
            }
        }
        counts
    }

    /// Ratio of closed to connected triplets, or 0 when nothing is connected.
    #[must_use]
    pub fn coefficient(&self) -> f64 {
        ratio(self.closed, self.connected)
    }
}

/// Returns the global clustering coefficient of `topology`.
///
/// Nodes of degree below two contribute nothing to either tally.
///
/// # Examples
/// ```
/// use netmetrics_core::{Topology, clustering_coefficient};
///
/// let triangle = Topology::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![0, 1]])?;
/// assert_eq!(clustering_coefficient(&triangle), 1.0);
/// # Ok::<(), netmetrics_core::TopologyError>(())
/// ```
#[must_use]
pub fn clustering_coefficient(topology: &Topology) -> f64 {
    TripletCounts::from_topology(topology).coefficient()
}

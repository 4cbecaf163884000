//! Degree statistics.

use std::collections::BTreeMap;

use crate::topology::Topology;

use super::ratio;

/// Histogram of node degrees, ordered by ascending degree.
///
/// # Examples
/// ```
/// use netmetrics_core::{DegreeDistribution, Topology};
///
/// let star = Topology::from_adjacency(vec![vec![1, 2, 3], vec![0], vec![0], vec![0]])?;
/// let distribution = DegreeDistribution::from_topology(&star);
/// assert_eq!(distribution.count(1), 3);
/// assert_eq!(
///     distribution.fractions().collect::<Vec<_>>(),
///     vec![(1, 0.75), (3, 0.25)],
/// );
/// # Ok::<(), netmetrics_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DegreeDistribution {
    counts: BTreeMap<usize, usize>,
    node_count: usize,
}

impl DegreeDistribution {
    /// Tallies the degree of every node in `topology`.
    #[must_use]
    pub fn from_topology(topology: &Topology) -> Self {
        let mut counts = BTreeMap::new();
        for (_, neighbours) in topology.iter() {
            *counts.entry(neighbours.len()).or_insert(0) += 1;
        }
        Self {
            counts,
            node_count: topology.node_count(),
        }
    }

    /// Number of nodes the histogram was built from.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of nodes with exactly `degree` neighbours.
    #[must_use]
    pub fn count(&self, degree: usize) -> usize {
        self.counts.get(&degree).copied().unwrap_or(0)
    }

    /// Iterates over `(degree, count)` pairs for every observed degree.
    pub fn counts(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&degree, &count)| (degree, count))
    }

    /// Iterates over `(degree, fraction of nodes)` pairs for every observed degree.
    pub fn fractions(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.counts()
            .map(|(degree, count)| (degree, ratio(count, self.node_count)))
    }
}

/// Returns `2 · links / N`, or 0 for an empty topology.
#[must_use]
pub fn average_degree(topology: &Topology) -> f64 {
    ratio(2 * topology.link_count(), topology.node_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn empty_topology_has_empty_distribution() {
        let distribution = DegreeDistribution::from_topology(&Topology::default());
        assert_eq!(distribution.fractions().count(), 0);
        assert_eq!(average_degree(&Topology::default()), 0.0);
    }

    #[rstest]
    fn isolated_nodes_land_in_degree_zero() {
        let mut topology = Topology::with_nodes(4);
        topology.add_edge(0, 1).expect("edge must be valid");
        let distribution = DegreeDistribution::from_topology(&topology);
        assert_eq!(distribution.counts().collect::<Vec<_>>(), vec![(0, 2), (1, 2)]);
        assert_eq!(average_degree(&topology), 0.5);
    }

    #[rstest]
    fn fractions_sum_to_one() {
        let topology = Topology::from_adjacency(vec![
            vec![1, 2],
            vec![0, 2, 3],
            vec![0, 1],
            vec![1],
            vec![],
        ])
        .expect("adjacency must be valid");
        let total: f64 = DegreeDistribution::from_topology(&topology)
            .fractions()
            .map(|(_, fraction)| fraction)
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}

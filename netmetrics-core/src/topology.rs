//! In-memory undirected simple graph.
//!
//! A [`Topology`] stores one adjacency list per node. The public mutator
//! keeps both endpoints in sync, and [`Topology::validate`] checks the full
//! invariant set (symmetry, no self-loops, no repeated neighbours, all ids in
//! range) for topologies assembled from external data.

use std::collections::HashSet;

use crate::error::TopologyError;

/// Dense node identifier in `[0, node_count)`.
pub type NodeId = usize;

/// Undirected simple graph stored as adjacency lists.
///
/// # Examples
/// ```
/// use netmetrics_core::Topology;
///
/// let mut topology = Topology::with_nodes(3);
/// topology.add_edge(0, 1)?;
/// topology.add_edge(1, 2)?;
/// assert_eq!(topology.degree(1), 2);
/// assert_eq!(topology.link_count(), 2);
/// assert!(topology.add_edge(2, 2).is_err());
/// # Ok::<(), netmetrics_core::TopologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Topology {
    adjacency: Vec<Vec<NodeId>>,
}

impl Topology {
    /// Creates a topology with `node_count` isolated nodes.
    #[must_use]
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Builds a topology from explicit adjacency lists, validating every invariant.
    ///
    /// # Errors
    /// Returns the first [`TopologyError`] found by [`Self::validate`].
    ///
    /// # Examples
    /// ```
    /// use netmetrics_core::{Topology, TopologyError};
    ///
    /// let triangle = Topology::from_adjacency(vec![vec![1, 2], vec![0, 2], vec![0, 1]])?;
    /// assert_eq!(triangle.link_count(), 3);
    ///
    /// let err = Topology::from_adjacency(vec![vec![1], vec![]]).unwrap_err();
    /// assert_eq!(err, TopologyError::Asymmetric { from: 0, to: 1 });
    /// # Ok::<(), TopologyError>(())
    /// ```
    pub fn from_adjacency(adjacency: Vec<Vec<NodeId>>) -> Result<Self, TopologyError> {
        let topology = Self { adjacency };
        topology.validate()?;
        Ok(topology)
    }

    /// Links `u` and `v`.
    ///
    /// Repeated insertion of the same pair is not detected here; callers that
    /// may revisit a pair check [`Self::contains_edge`] first.
    ///
    /// # Errors
    /// Returns [`TopologyError::SelfLoop`] when `u == v` and
    /// [`TopologyError::NodeOutOfBounds`] when either endpoint is outside the
    /// topology.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<(), TopologyError> {
        self.check_bounds(u)?;
        self.check_bounds(v)?;
        if u == v {
            return Err(TopologyError::SelfLoop { node: u });
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        Ok(())
    }

    /// Removes the link between `u` and `v`, returning whether it existed.
    ///
    /// Neighbour order of the remaining entries is preserved.
    pub(crate) fn remove_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let removed = remove_first(&mut self.adjacency[u], v);
        if removed {
            remove_first(&mut self.adjacency[v], u);
        }
        removed
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of neighbours of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node].len()
    }

    /// Returns the neighbours of `node` in insertion order.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    #[must_use]
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node]
    }

    /// Returns whether `u` and `v` are linked.
    #[must_use]
    pub fn contains_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency.get(u).is_some_and(|list| list.contains(&v))
    }

    /// Returns the number of undirected links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Iterates over `(node, neighbours)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(node, list)| (node, list.as_slice()))
    }

    /// Checks symmetry, self-loops, repeated neighbours and id ranges.
    ///
    /// # Errors
    /// Returns the first violation found scanning nodes in ascending order.
    pub fn validate(&self) -> Result<(), TopologyError> {
        let node_count = self.node_count();
        for (node, neighbours) in self.iter() {
            let mut seen = HashSet::with_capacity(neighbours.len());
            for &neighbour in neighbours {
                if neighbour >= node_count {
                    return Err(TopologyError::NodeOutOfBounds {
                        node: neighbour,
                        node_count,
                    });
                }
                if neighbour == node {
                    return Err(TopologyError::SelfLoop { node });
                }
                if !seen.insert(neighbour) {
                    return Err(TopologyError::DuplicateNeighbour { node, neighbour });
                }
                if !self.adjacency[neighbour].contains(&node) {
                    return Err(TopologyError::Asymmetric {
                        from: node,
                        to: neighbour,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_bounds(&self, node: NodeId) -> Result<(), TopologyError> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(TopologyError::NodeOutOfBounds {
                node,
                node_count: self.node_count(),
            })
        }
    }
}

fn remove_first(list: &mut Vec<NodeId>, value: NodeId) -> bool {
    match list.iter().position(|&entry| entry == value) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn add_edge_links_both_endpoints() {
        let mut topology = Topology::with_nodes(4);
        topology.add_edge(0, 3).expect("edge must be accepted");
        assert_eq!(topology.neighbours(0), &[3]);
        assert_eq!(topology.neighbours(3), &[0]);
        assert!(topology.contains_edge(3, 0));
        assert_eq!(topology.link_count(), 1);
    }

    #[rstest]
    #[case::self_loop(2, 2, TopologyError::SelfLoop { node: 2 })]
    #[case::out_of_bounds(1, 7, TopologyError::NodeOutOfBounds { node: 7, node_count: 3 })]
    fn add_edge_rejects_invalid_edges(
        #[case] u: NodeId,
        #[case] v: NodeId,
        #[case] expected: TopologyError,
    ) {
        let mut topology = Topology::with_nodes(3);
        let err = topology.add_edge(u, v).expect_err("edge must be rejected");
        assert_eq!(err, expected);
        assert_eq!(topology.link_count(), 0);
    }

    #[rstest]
    fn remove_edge_preserves_remaining_order() {
        let mut topology = Topology::with_nodes(4);
        for v in 1..4 {
            topology.add_edge(0, v).expect("edge must be accepted");
        }
        assert!(topology.remove_edge(0, 2));
        assert!(!topology.remove_edge(0, 2));
        assert_eq!(topology.neighbours(0), &[1, 3]);
        assert!(topology.neighbours(2).is_empty());
    }

    #[rstest]
    #[case::duplicate(
        vec![vec![1, 1], vec![0, 0]],
        TopologyError::DuplicateNeighbour { node: 0, neighbour: 1 },
    )]
    #[case::self_loop(vec![vec![0]], TopologyError::SelfLoop { node: 0 })]
    #[case::out_of_range(
        vec![vec![5], vec![]],
        TopologyError::NodeOutOfBounds { node: 5, node_count: 2 },
    )]
    #[case::asymmetric(vec![vec![], vec![0]], TopologyError::Asymmetric { from: 1, to: 0 })]
    fn from_adjacency_rejects_invariant_violations(
        #[case] adjacency: Vec<Vec<NodeId>>,
        #[case] expected: TopologyError,
    ) {
        let err = Topology::from_adjacency(adjacency).expect_err("adjacency must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn empty_topology_has_no_links() {
        let topology = Topology::default();
        assert_eq!(topology.node_count(), 0);
        assert_eq!(topology.link_count(), 0);
        assert!(topology.validate().is_ok());
        assert!(!topology.contains_edge(0, 1));
    }
}

//! Per-node and largest-component average path lengths.

use std::fmt;

use crate::topology::Topology;

use super::{
    components::{ComponentId, ComponentTracker, shortest_paths_from},
    ratio,
};

/// Denominator used when averaging one source's finite distances.
///
/// `ReachablePairs` divides by the number of other nodes in the source's
/// component, giving the usual mean shortest-path length (1 for a complete
/// graph). `ComponentSize` divides by the full component size, counting the
/// zero-length path from a node to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathLengthNormalisation {
    /// Divide by `component size - 1`.
    #[default]
    ReachablePairs,
    /// Divide by `component size`.
    ComponentSize,
}

impl PathLengthNormalisation {
    /// Stable kebab-case name, as accepted in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReachablePairs => "reachable-pairs",
            Self::ComponentSize => "component-size",
        }
    }

    fn denominator(self, component_size: usize) -> usize {
        match self {
            Self::ReachablePairs => component_size.saturating_sub(1),
            Self::ComponentSize => component_size,
        }
    }
}

impl fmt::Display for PathLengthNormalisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one breadth-first pass per node.
#[derive(Debug, Clone, PartialEq)]
pub struct PathLengthSummary {
    per_node: Vec<f64>,
    components: ComponentTracker,
}

impl PathLengthSummary {
    /// Average path length from each node to the rest of its component.
    #[must_use]
    pub fn per_node(&self) -> &[f64] {
        &self.per_node
    }

    /// Component labels gathered during the passes.
    #[must_use]
    pub fn components(&self) -> &ComponentTracker {
        &self.components
    }

    /// Largest component and its size; ties go to the lowest id.
    #[must_use]
    pub fn largest_component(&self) -> Option<(ComponentId, usize)> {
        self.components.largest()
    }

    /// Mean of the per-node averages over the largest component, or 0 when
    /// the topology has no nodes.
    #[must_use]
    pub fn largest_component_average(&self) -> f64 {
        let Some((component, size)) = self.largest_component() else {
            return 0.0;
        };
        if size == 0 {
            return 0.0;
        }
        let total: f64 = self
            .components
            .members(component)
            .map(|node| self.per_node[node])
            .sum();
        #[expect(clippy::cast_precision_loss, reason = "component sizes fit in f64 mantissa")]
        let size = size as f64;
        total / size
    }
}

/// Runs a breadth-first search from every node in ascending order.
///
/// Each source's average is the sum of its finite distances divided by the
/// denominator `normalisation` derives from the size of that source's own
/// component; a zero denominator yields 0, so singleton components
/// contribute 0.
///
/// # Examples
/// ```
/// use netmetrics_core::{PathLengthNormalisation, Topology, path_lengths};
///
/// let square = Topology::from_adjacency(vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![0, 2]])?;
/// let reachable = path_lengths(&square, PathLengthNormalisation::ReachablePairs);
/// assert!((reachable.largest_component_average() - 4.0 / 3.0).abs() < 1e-12);
/// let sized = path_lengths(&square, PathLengthNormalisation::ComponentSize);
/// assert_eq!(sized.largest_component_average(), 1.0);
/// # Ok::<(), netmetrics_core::TopologyError>(())
/// ```
#[must_use]
pub fn path_lengths(
    topology: &Topology,
    normalisation: PathLengthNormalisation,
) -> PathLengthSummary {
    let node_count = topology.node_count();
    let mut components = ComponentTracker::new(node_count);
    let mut per_node = Vec::with_capacity(node_count);
    for source in 0..node_count {
        let row = shortest_paths_from(topology, source);
        let component_size = components
            .absorb(&row)
            .map_or(0, |component| components.size_of(component));
        let total: usize = row.iter().flatten().sum();
        per_node.push(ratio(total, normalisation.denominator(component_size)));
    }
    PathLengthSummary {
        per_node,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::reachable(PathLengthNormalisation::ReachablePairs, 1.5, 1.0)]
    #[case::sized(PathLengthNormalisation::ComponentSize, 1.0, 2.0 / 3.0)]
    fn path_of_three(
        #[case] normalisation: PathLengthNormalisation,
        #[case] end_average: f64,
        #[case] middle_average: f64,
    ) {
        // Ends see distances 1 and 2; the middle sees 1 and 1.
        let path = Topology::from_adjacency(vec![vec![1], vec![0, 2], vec![1]])
            .expect("adjacency must be valid");
        let summary = path_lengths(&path, normalisation);
        assert!((summary.per_node()[0] - end_average).abs() < 1e-12);
        assert!((summary.per_node()[1] - middle_average).abs() < 1e-12);
        assert!((summary.per_node()[2] - end_average).abs() < 1e-12);
    }

    #[rstest]
    fn each_source_uses_its_own_component_size() {
        // Triangle 0-1-2 first, then edge 3-4 and isolated 5.
        let topology = Topology::from_adjacency(vec![
            vec![1, 2],
            vec![0, 2],
            vec![0, 1],
            vec![4],
            vec![3],
            vec![],
        ])
        .expect("adjacency must be valid");
        let summary = path_lengths(&topology, PathLengthNormalisation::ReachablePairs);
        assert_eq!(summary.per_node(), &[1.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
        assert_eq!(summary.largest_component().map(|(_, size)| size), Some(3));
        assert_eq!(summary.largest_component_average(), 1.0);
    }

    #[rstest]
    fn singletons_average_zero() {
        let summary =
            path_lengths(&Topology::with_nodes(3), PathLengthNormalisation::ComponentSize);
        assert_eq!(summary.per_node(), &[0.0, 0.0, 0.0]);
        assert_eq!(summary.components().component_count(), 3);
        assert_eq!(summary.largest_component_average(), 0.0);
    }

    #[rstest]
    fn empty_topology_averages_zero() {
        let summary = path_lengths(&Topology::default(), PathLengthNormalisation::default());
        assert!(summary.per_node().is_empty());
        assert_eq!(summary.largest_component(), None);
        assert_eq!(summary.largest_component_average(), 0.0);
    }
}

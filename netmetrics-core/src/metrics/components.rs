//! Breadth-first distances and connected-component labelling.

use std::{collections::VecDeque, fmt};

use crate::topology::{NodeId, Topology};

/// Hop distance from one source to every node; `None` marks unreachable nodes.
pub type DistanceRow = Vec<Option<usize>>;

/// Runs a breadth-first search from `source`.
///
/// # Panics
/// Panics if `source` is out of bounds.
///
/// # Examples
/// ```
/// use netmetrics_core::{Topology, shortest_paths_from};
///
/// let topology = Topology::from_adjacency(vec![vec![1], vec![0, 2], vec![1], vec![]])?;
/// assert_eq!(shortest_paths_from(&topology, 0), vec![Some(0), Some(1), Some(2), None]);
/// # Ok::<(), netmetrics_core::TopologyError>(())
/// ```
#[must_use]
pub fn shortest_paths_from(topology: &Topology, source: NodeId) -> DistanceRow {
    let mut distances = vec![None; topology.node_count()];
    distances[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        let next = distances[node].map_or(0, |distance| distance + 1);
        for &neighbour in topology.neighbours(node) {
            if distances[neighbour].is_none() {
                distances[neighbour] = Some(next);
                queue.push_back(neighbour);
            }
        }
    }
    distances
}

/// Identifier of a connected component, assigned in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Returns the zero-based discovery index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Accumulates component labels across successive breadth-first passes.
///
/// Feed it one [`DistanceRow`] per source through [`Self::absorb`]. The first
/// row touching an unlabelled node mints the next id and labels every node
/// that row reached; later rows from the same component adopt that id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentTracker {
    labels: Vec<Option<ComponentId>>,
    sizes: Vec<usize>,
}

impl ComponentTracker {
    /// Creates a tracker for `node_count` unlabelled nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            labels: vec![None; node_count],
            sizes: Vec::new(),
        }
    }

    /// Labels the nodes reached by `row` and returns their component.
    ///
    /// Returns `None` when `row` reaches no node.
    pub fn absorb(&mut self, row: &DistanceRow) -> Option<ComponentId> {
        let first_reached = row.iter().position(Option::is_some)?;
        if let Some(known) = self.labels.get(first_reached).copied().flatten() {
            return Some(known);
        }

        let id = ComponentId(self.sizes.len());
        let mut members = 0;
        for (label, distance) in self.labels.iter_mut().zip(row) {
            if distance.is_some() {
                *label = Some(id);
                members += 1;
            }
        }
        self.sizes.push(members);
        Some(id)
    }

    /// Component of `node`, once a row reaching it has been absorbed.
    #[must_use]
    pub fn component_of(&self, node: NodeId) -> Option<ComponentId> {
        self.labels.get(node).copied().flatten()
    }

    /// Member counts indexed by [`ComponentId::get`].
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Member count of `component`, or 0 for an id this tracker never minted.
    #[must_use]
    pub fn size_of(&self, component: ComponentId) -> usize {
        self.sizes.get(component.get()).copied().unwrap_or(0)
    }

    /// Number of components discovered so far.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Largest component and its size; ties go to the lowest id.
    #[must_use]
    pub fn largest(&self) -> Option<(ComponentId, usize)> {
        let mut best: Option<(ComponentId, usize)> = None;
        for (index, &size) in self.sizes.iter().enumerate() {
            if best.is_none_or(|(_, best_size)| size > best_size) {
                best = Some((ComponentId(index), size));
            }
        }
        best
    }

    /// Nodes labelled with `component`, ascending.
    pub fn members(&self, component: ComponentId) -> impl Iterator<Item = NodeId> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |(_, label)| **label == Some(component))
            .map(|(node, _)| node)
    }
}

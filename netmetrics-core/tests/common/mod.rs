use std::collections::BTreeSet;

use netmetrics_core::{GenerationParams, NetworkModel, Topology};

/// Parameters accepted by every model for `nodes >= 5`.
#[must_use]
pub fn params_for(model: NetworkModel, nodes: usize) -> GenerationParams {
    GenerationParams::builder(model)
        .with_nodes(nodes)
        .with_erdos_renyi_probability(0.2)
        .with_ring_degree(4)
        .with_rewiring_probability(0.3)
        .build()
        .expect("parameters must be valid")
}

/// Neighbour sets per node, ignoring insertion order.
#[must_use]
pub fn neighbour_sets(topology: &Topology) -> Vec<BTreeSet<usize>> {
    topology
        .iter()
        .map(|(_, neighbours)| neighbours.iter().copied().collect())
        .collect()
}

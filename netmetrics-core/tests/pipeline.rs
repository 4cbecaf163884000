mod common;

use std::{fs::File, io::BufReader};

use netmetrics_core::{
    MetricsEngine, NetworkDescriptor, NetworkModel, PathLengthNormalisation, generate,
    read_network, write_network,
};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use common::{neighbour_sets, params_for};

#[rstest]
#[case::square(NetworkModel::SquareLattice)]
#[case::erdos_renyi(NetworkModel::ErdosRenyi)]
#[case::ring(NetworkModel::RegularRing)]
#[case::small_world(NetworkModel::SmallWorld)]
#[case::barabasi_albert(NetworkModel::BarabasiAlbert)]
#[case::triangular(NetworkModel::TriangularLattice)]
#[case::honeycomb(NetworkModel::Honeycomb)]
fn persisted_network_round_trips(#[case] model: NetworkModel) {
    let params = params_for(model, 50);
    let topology =
        generate(&params, &mut SmallRng::seed_from_u64(77)).expect("generation must succeed");
    let descriptor = NetworkDescriptor::from_params(&params, topology);

    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("Network.csv");
    write_network(File::create(&path).expect("create file"), &descriptor)
        .expect("write must succeed");
    let loaded = read_network(BufReader::new(File::open(&path).expect("open file")))
        .expect("read must succeed");

    assert_eq!(loaded.model, model);
    assert_eq!(loaded.ring_degree, descriptor.ring_degree);
    assert_eq!(loaded.rewiring_probability, descriptor.rewiring_probability);
    assert_eq!(loaded.erdos_renyi_probability, descriptor.erdos_renyi_probability);
    assert_eq!(neighbour_sets(&loaded.topology), neighbour_sets(&descriptor.topology));
}

#[rstest]
fn loaded_network_analyses_like_the_generated_one() {
    let params = params_for(NetworkModel::SmallWorld, 60);
    let topology =
        generate(&params, &mut SmallRng::seed_from_u64(5)).expect("generation must succeed");
    let descriptor = NetworkDescriptor::from_params(&params, topology);

    let mut buffer = Vec::new();
    write_network(&mut buffer, &descriptor).expect("write must succeed");
    let loaded = read_network(buffer.as_slice()).expect("read must succeed");

    let engine = MetricsEngine::builder()
        .with_path_normalisation(PathLengthNormalisation::ComponentSize)
        .build();
    assert_eq!(
        engine.analyze(&loaded.topology),
        engine.analyze(&descriptor.topology)
    );
}

#[rstest]
fn ring_scenario_end_to_end() {
    let params = netmetrics_core::GenerationParams::builder(NetworkModel::RegularRing)
        .with_nodes(4)
        .with_ring_degree(2)
        .build()
        .expect("parameters must be valid");
    let topology =
        generate(&params, &mut SmallRng::seed_from_u64(0)).expect("generation must succeed");
    let metrics = *MetricsEngine::default().analyze(&topology).metrics();
    assert_eq!(metrics.average_degree, 2.0);
    assert_eq!(metrics.clustering_coefficient, 0.0);
    assert!((metrics.largest_component_avg_path_length - 4.0 / 3.0).abs() < 1e-12);
}

#[rstest]
fn same_seed_same_metrics() {
    let params = params_for(NetworkModel::ErdosRenyi, 120);
    let first =
        generate(&params, &mut SmallRng::seed_from_u64(31)).expect("generation must succeed");
    let second =
        generate(&params, &mut SmallRng::seed_from_u64(31)).expect("generation must succeed");
    assert_eq!(first, second);
    let engine = MetricsEngine::default();
    assert_eq!(engine.analyze(&first), engine.analyze(&second));
}

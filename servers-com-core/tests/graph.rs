//! Tests for the random graph construction API.

use std::collections::BTreeSet;

use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use servers_com_core::{
    Graph, GraphConfig, GraphError, NodeError, NodeId, PopulationPhase, RandomGraphBuilder,
    SuccessorNode,
};

#[fixture]
fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn config(nodes_amount: usize) -> GraphConfig {
    GraphConfig {
        nodes_amount,
        ..GraphConfig::default()
    }
}

#[rstest]
#[case(1_000)]
#[case(999_999)]
fn random_rejects_nodes_amount_above_range(mut rng: SmallRng, #[case] nodes: usize) {
    let err = Graph::random(&config(nodes), &mut rng).expect_err("must reject");
    assert!(matches!(err, GraphError::NodesAmountViolation { got, .. } if got == nodes));
}

#[rstest]
#[case(101)]
#[case(1_000)]
fn random_rejects_connection_percent_above_range(mut rng: SmallRng, #[case] percent: usize) {
    let config = GraphConfig {
        connection_percent: percent,
        ..GraphConfig::default()
    };
    let err = Graph::random(&config, &mut rng).expect_err("must reject");
    assert!(matches!(err, GraphError::ConnectionPercentViolation { .. }));
}

#[rstest]
#[case::below_floor(10, 1)]
#[case::above_ceiling(10, 7)]
fn random_rejects_min_rand_connections_out_of_range(
    mut rng: SmallRng,
    #[case] nodes: usize,
    #[case] min_rand: usize,
) {
    let config = GraphConfig {
        min_rand_connections: min_rand,
        ..config(nodes)
    };
    let err = Graph::random(&config, &mut rng).expect_err("must reject");
    assert!(matches!(err, GraphError::MinRandConnectionsViolation { .. }));
}

#[rstest]
fn random_with_four_nodes_yields_sequential_ids(mut rng: SmallRng) {
    let graph = Graph::random(&config(4), &mut rng).expect("config is satisfiable");
    let ids: BTreeSet<usize> = graph.nodes().iter().map(|n| n.id().get()).collect();
    assert_eq!(ids, BTreeSet::from([0, 1, 2, 3]));
    assert_eq!(graph.len(), 4);
}

#[rstest]
#[case(4)]
#[case(8)]
#[case(50)]
#[case(999)]
fn random_returns_requested_node_count(mut rng: SmallRng, #[case] nodes: usize) {
    let graph = Graph::random(&config(nodes), &mut rng).expect("config is satisfiable");
    assert_eq!(graph.nodes().len(), nodes);
    assert!(graph.check_invariants().is_empty());
}

#[rstest]
fn capped_nodes_reach_exactly_their_cap(mut rng: SmallRng) {
    let graph = Graph::random(&config(8), &mut rng).expect("config is satisfiable");
    assert_eq!(graph.capped_nodes().count(), 2);
    for node in graph.capped_nodes() {
        assert_eq!(Some(node.connection_count()), node.connections_limit());
    }
    assert_eq!(graph.limited_nodes().count(), 2);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn larger_caps_are_saturated(#[case] limit: usize) {
    let graph = RandomGraphBuilder::new()
        .with_nodes_amount(40)
        .with_connection_percent(60)
        .with_connection_limit(limit)
        .with_seed(13)
        .build()
        .expect("config is satisfiable");
    assert_eq!(graph.capped_nodes().count(), 16);
    assert!(
        graph
            .capped_nodes()
            .all(|node| node.connection_count() == limit)
    );
}

#[rstest]
fn edges_are_symmetric(mut rng: SmallRng) {
    let graph = Graph::random(&config(60), &mut rng).expect("config is satisfiable");
    for node in graph.nodes() {
        for partner in node.connections() {
            let other = graph.node(partner).expect("partner exists");
            assert!(other.is_connected_to(node.id()));
        }
    }
}

#[rstest]
fn loops_never_appear_when_disallowed(mut rng: SmallRng) {
    let graph = Graph::random(&config(120), &mut rng).expect("config is satisfiable");
    assert!(!graph.allow_loop_connections());
    assert!(graph.nodes().iter().all(|n| !n.is_connected_to(n.id())));
}

#[rstest]
fn uncapped_degree_may_exceed_the_drawn_bound(mut rng: SmallRng) {
    let graph = Graph::random(&config(200), &mut rng).expect("config is satisfiable");
    let max_uncapped = graph
        .unlimited_nodes()
        .map(|node| node.connection_count())
        .max()
        .expect("graph has uncapped nodes");
    assert!(max_uncapped > 2, "popular nodes collect extra partners");
    assert!(graph.unlimited_nodes().all(|n| n.connection_count() >= 2));
}

#[rstest]
#[case::two_nodes(2, 80)]
#[case::three_nodes(3, 80)]
fn too_few_uncapped_nodes_raise_configuration_error(
    mut rng: SmallRng,
    #[case] nodes: usize,
    #[case] percent: usize,
) {
    let config = GraphConfig {
        connection_percent: percent,
        ..config(nodes)
    };
    let err = Graph::random(&config, &mut rng).expect_err("pool is too small");
    assert!(matches!(
        err,
        GraphError::GraphConfiguration {
            phase: PopulationPhase::Unlimited,
            ..
        }
    ));
    assert!(!err.is_validation());
}

#[rstest]
fn all_capped_graph_without_loops_can_run_dry(mut rng: SmallRng) {
    // Three nodes capped at one pair off two at a time, stranding the last.
    let config = GraphConfig {
        nodes_amount: 3,
        connection_percent: 0,
        min_rand_connections: 2,
        ..GraphConfig::default()
    };
    let err = Graph::random(&config, &mut rng).expect_err("odd capped set cannot pair up");
    assert!(matches!(
        err,
        GraphError::GraphConfiguration {
            phase: PopulationPhase::Limited,
            required: 1,
            available: 0,
            ..
        }
    ));
}

#[rstest]
fn validation_errors_win_over_configuration_errors(mut rng: SmallRng) {
    // Two nodes would fail population, but the bound check fires first.
    let config = GraphConfig {
        min_rand_connections: 3,
        ..config(2)
    };
    let err = Graph::random(&config, &mut rng).expect_err("must reject");
    assert!(matches!(err, GraphError::MinRandConnectionsViolation { .. }));
}

#[test]
fn successor_self_assignment_is_rejected() {
    let mut node = SuccessorNode::new(NodeId::new(1));
    assert_eq!(
        node.set_next(node.id()),
        Err(NodeError::SelfReference {
            node: NodeId::new(1)
        })
    );
}

#[test]
fn human_readable_nodes_match_adjacency() {
    let graph = RandomGraphBuilder::new()
        .with_nodes_amount(10)
        .with_seed(5)
        .build()
        .expect("config is satisfiable");
    let dump = graph.human_readable_nodes();
    assert_eq!(dump.len(), 10);
    for (record, node) in dump.iter().zip(graph.nodes()) {
        assert_eq!(record.id, node.id());
        assert_eq!(record.connections_limit, node.connections_limit());
        assert_eq!(record.connections, node.connections().collect::<Vec<_>>());
    }
}

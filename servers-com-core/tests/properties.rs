//! Property-based coverage for random graph construction.
//!
//! Cases are drawn from a region where population always succeeds, so every
//! generated graph must satisfy the structural guarantees.

use proptest::{
    prelude::any,
    test_runner::{TestCaseError, TestCaseResult, TestRunner},
};
use rand::{SeedableRng, rngs::SmallRng};
use servers_com_core::{Graph, GraphConfig, GraphError, NODES_AMOUNT_RANGE};
use servers_com_test_support::property::suite_proptest_config;
use test_strategy::Arbitrary;

const CASES: u32 = 64;

#[derive(Clone, Debug, Arbitrary)]
struct SatisfiableCase {
    #[strategy(10_usize..=400)]
    nodes_amount: usize,
    #[strategy(50_usize..=100)]
    connection_percent: usize,
    #[strategy(1_usize..=3)]
    connection_limit: usize,
    #[strategy(2_usize..=4)]
    min_rand_connections: usize,
    allow_loop_connections: bool,
    seed: u64,
}

impl SatisfiableCase {
    fn config(&self) -> GraphConfig {
        GraphConfig {
            nodes_amount: self.nodes_amount,
            connection_percent: self.connection_percent,
            allow_loop_connections: self.allow_loop_connections,
            connection_limit: self.connection_limit,
            min_rand_connections: self.min_rand_connections,
        }
    }
}

fn build(case: &SatisfiableCase) -> Result<Graph, TestCaseError> {
    let mut rng = SmallRng::seed_from_u64(case.seed);
    Graph::random(&case.config(), &mut rng)
        .map_err(|err| TestCaseError::fail(format!("{case:?} failed: {err}")))
}

fn run_structure_property(case: &SatisfiableCase) -> TestCaseResult {
    let graph = build(case)?;
    if graph.len() != case.nodes_amount {
        return Err(TestCaseError::fail(format!(
            "expected {} nodes, got {}",
            case.nodes_amount,
            graph.len()
        )));
    }
    for (position, node) in graph.nodes().iter().enumerate() {
        if node.id().get() != position {
            return Err(TestCaseError::fail(format!(
                "node at {position} carries id {}",
                node.id()
            )));
        }
    }
    let violations = graph.check_invariants();
    if !violations.is_empty() {
        return Err(TestCaseError::fail(format!("violations: {violations:?}")));
    }
    Ok(())
}

fn run_cap_property(case: &SatisfiableCase) -> TestCaseResult {
    let graph = build(case)?;
    let expected = case.nodes_amount - case.nodes_amount * case.connection_percent / 100;
    let capped = graph.capped_nodes().count();
    if capped != expected {
        return Err(TestCaseError::fail(format!(
            "expected {expected} capped nodes, got {capped}"
        )));
    }
    if let Some(node) = graph
        .capped_nodes()
        .find(|node| node.connection_count() != case.connection_limit)
    {
        return Err(TestCaseError::fail(format!(
            "capped node {} has {} partners, cap is {}",
            node.id(),
            node.connection_count(),
            case.connection_limit
        )));
    }
    if let Some(node) = graph
        .unlimited_nodes()
        .find(|node| node.connection_count() < 2)
    {
        return Err(TestCaseError::fail(format!(
            "uncapped node {} has only {} partners",
            node.id(),
            node.connection_count()
        )));
    }
    Ok(())
}

fn run_loop_property(case: &SatisfiableCase) -> TestCaseResult {
    let graph = build(case)?;
    if case.allow_loop_connections {
        return Ok(());
    }
    match graph.nodes().iter().find(|node| node.is_connected_to(node.id())) {
        Some(node) => Err(TestCaseError::fail(format!(
            "node {} loops back to itself",
            node.id()
        ))),
        None => Ok(()),
    }
}

fn run_suite(property: fn(&SatisfiableCase) -> TestCaseResult) -> TestCaseResult {
    let mut runner = TestRunner::new(suite_proptest_config(CASES));
    runner
        .run(&any::<SatisfiableCase>(), |case| property(&case))
        .map_err(|err| TestCaseError::fail(err.to_string()))
}

#[test]
fn generated_graphs_keep_structure_proptest() -> TestCaseResult {
    run_suite(run_structure_property)
}

#[test]
fn generated_graphs_saturate_caps_proptest() -> TestCaseResult {
    run_suite(run_cap_property)
}

#[test]
fn generated_graphs_respect_loop_policy_proptest() -> TestCaseResult {
    run_suite(run_loop_property)
}

#[test]
fn same_seed_rebuilds_the_same_graph_proptest() -> TestCaseResult {
    run_suite(|case| {
        let first = build(case)?;
        let second = build(case)?;
        if first != second {
            return Err(TestCaseError::fail("seeded builds diverged"));
        }
        Ok(())
    })
}

#[test]
fn oversized_node_counts_are_rejected_proptest() -> TestCaseResult {
    let mut runner = TestRunner::new(suite_proptest_config(CASES));
    let above = (*NODES_AMOUNT_RANGE.end() + 1)..=usize::from(u16::MAX);
    runner
        .run(&(above, any::<u64>()), |(nodes_amount, seed)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let config = GraphConfig {
                nodes_amount,
                ..GraphConfig::default()
            };
            match Graph::random(&config, &mut rng) {
                Err(GraphError::NodesAmountViolation { got, .. }) if got == nodes_amount => Ok(()),
                other => Err(TestCaseError::fail(format!("unexpected outcome {other:?}"))),
            }
        })
        .map_err(|err| TestCaseError::fail(err.to_string()))
}

//! Benchmark support crate for servers-com.
//!
//! Holds the parameter grid shared by the Criterion benchmarks of random
//! graph construction.

use std::fmt;

use servers_com_core::{GraphConfig, MIN_RAND_CONNECTIONS_FLOOR};

/// Seed used by every benchmark so runs compare like with like.
pub const SEED: u64 = 42;

/// Node counts to benchmark, up to the largest accepted graph.
pub const NODE_COUNTS: &[usize] = &[100, 500, 999];

/// Parameters for one construction benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstructionBenchParams {
    /// Number of nodes to allocate.
    pub nodes_amount: usize,
    /// Percent of nodes left uncapped.
    pub connection_percent: usize,
    /// Cap applied to the remaining nodes.
    pub connection_limit: usize,
    /// Upper bound of the per-node random partner count.
    pub min_rand_connections: usize,
}

impl ConstructionBenchParams {
    /// Default density at `nodes_amount` nodes.
    #[must_use]
    pub const fn new(nodes_amount: usize) -> Self {
        Self {
            nodes_amount,
            connection_percent: 80,
            connection_limit: 1,
            min_rand_connections: MIN_RAND_CONNECTIONS_FLOOR,
        }
    }

    /// Returns a copy with a larger partner bound for denser graphs.
    #[must_use]
    pub const fn with_min_rand_connections(mut self, min_rand_connections: usize) -> Self {
        self.min_rand_connections = min_rand_connections;
        self
    }

    /// Converts the parameters into a construction config.
    #[must_use]
    pub const fn config(&self) -> GraphConfig {
        GraphConfig {
            nodes_amount: self.nodes_amount,
            connection_percent: self.connection_percent,
            allow_loop_connections: false,
            connection_limit: self.connection_limit,
            min_rand_connections: self.min_rand_connections,
        }
    }
}

impl fmt::Display for ConstructionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},p={},k={}",
            self.nodes_amount, self.connection_percent, self.min_rand_connections
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(100)]
    #[case(500)]
    #[case(999)]
    fn default_grid_is_valid(#[case] nodes: usize) {
        let params = ConstructionBenchParams::new(nodes);
        assert!(params.config().validate().is_ok());
        assert!(params.with_min_rand_connections(8).config().validate().is_ok());
    }

    #[test]
    fn display_names_the_axes() {
        let params = ConstructionBenchParams::new(100).with_min_rand_connections(4);
        assert_eq!(params.to_string(), "n=100,p=80,k=4");
    }
}

//! Builder utilities for configuring random graph construction.
//!
//! Wraps a [`GraphConfig`] together with an optional seed so callers can pick
//! between reproducible and entropy-seeded graphs.

use rand::{SeedableRng, rngs::SmallRng};

use crate::{Result, config::GraphConfig, graph::Graph};

/// Configures and constructs random [`Graph`] instances.
///
/// # Examples
/// ```
/// use servers_com_core::RandomGraphBuilder;
///
/// let graph = RandomGraphBuilder::new()
///     .with_nodes_amount(10)
///     .with_connection_percent(70)
///     .with_min_rand_connections(3)
///     .with_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(graph.len(), 10);
/// assert_eq!(graph.capped_nodes().count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RandomGraphBuilder {
    config: GraphConfig,
    seed: Option<u64>,
}

impl RandomGraphBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::{GraphConfig, RandomGraphBuilder};
    ///
    /// let builder = RandomGraphBuilder::new();
    /// assert_eq!(builder.config(), &GraphConfig::default());
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    #[must_use]
    pub const fn from_config(config: GraphConfig) -> Self {
        Self { config, seed: None }
    }

    /// Overrides the node count.
    #[must_use]
    pub const fn with_nodes_amount(mut self, nodes_amount: usize) -> Self {
        self.config.nodes_amount = nodes_amount;
        self
    }

    /// Overrides the percent of nodes left uncapped.
    #[must_use]
    pub const fn with_connection_percent(mut self, connection_percent: usize) -> Self {
        self.config.connection_percent = connection_percent;
        self
    }

    /// Allows or forbids self-loops.
    #[must_use]
    pub const fn with_allow_loop_connections(mut self, allow: bool) -> Self {
        self.config.allow_loop_connections = allow;
        self
    }

    /// Overrides the cap applied to capped nodes.
    #[must_use]
    pub const fn with_connection_limit(mut self, connection_limit: usize) -> Self {
        self.config.connection_limit = connection_limit;
        self
    }

    /// Overrides the upper bound of random partners per uncapped node.
    #[must_use]
    pub const fn with_min_rand_connections(mut self, min_rand_connections: usize) -> Self {
        self.config.min_rand_connections = min_rand_connections;
        self
    }

    /// Seeds the random source so construction is reproducible.
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::RandomGraphBuilder;
    ///
    /// let first = RandomGraphBuilder::new().with_seed(9).build().expect("valid");
    /// let second = RandomGraphBuilder::new().with_seed(9).build().expect("valid");
    /// assert_eq!(first, second);
    /// ```
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configuration that [`Self::build`] will use.
    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a populated [`Graph`].
    ///
    /// Without a seed the random source is initialised from OS entropy.
    ///
    /// # Errors
    /// Propagates every error from [`Graph::random`].
    pub fn build(&self) -> Result<Graph> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Graph::random(&self.config, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::GraphError;

    #[test]
    fn setters_update_config() {
        let builder = RandomGraphBuilder::new()
            .with_nodes_amount(12)
            .with_connection_percent(50)
            .with_allow_loop_connections(true)
            .with_connection_limit(2)
            .with_min_rand_connections(4)
            .with_seed(5);
        assert_eq!(
            builder.config(),
            &GraphConfig {
                nodes_amount: 12,
                connection_percent: 50,
                allow_loop_connections: true,
                connection_limit: 2,
                min_rand_connections: 4,
            }
        );
        assert_eq!(builder.seed(), Some(5));
    }

    #[test]
    fn build_propagates_validation_errors() {
        let err = RandomGraphBuilder::new()
            .with_connection_percent(101)
            .build()
            .expect_err("percent above 100 must fail");
        assert!(matches!(err, GraphError::ConnectionPercentViolation { .. }));
    }

    #[test]
    fn unseeded_build_still_honours_shape() {
        let graph = RandomGraphBuilder::from_config(GraphConfig {
            nodes_amount: 16,
            ..GraphConfig::default()
        })
        .build()
        .expect("configuration is satisfiable");
        assert_eq!(graph.len(), 16);
        assert!(graph.check_invariants().is_empty());
    }
}

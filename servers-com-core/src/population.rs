//! Random construction of [`Graph`] instances.
//!
//! Construction runs as a fixed pipeline: validate, allocate, assign caps,
//! fill capped nodes from the available pool, then give every uncapped node a
//! random batch of uncapped partners. A configuration error aborts the
//! pipeline; the partially wired graph is dropped with it.

use rand::{Rng, seq::index};
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    config::{GraphConfig, MIN_RAND_CONNECTIONS_FLOOR, limits_amount},
    error::{GraphError, PopulationPhase},
    graph::Graph,
    node::NodeId,
    sampling::CandidatePool,
};

impl Graph {
    /// Validates `config`, allocates its nodes and wires random edges.
    ///
    /// Validation runs to completion before any node is allocated, so range
    /// violations always take precedence over configuration errors.
    ///
    /// # Errors
    /// Returns a validation error from [`GraphConfig::validate`], or
    /// [`GraphError::GraphConfiguration`] when a sampling pass runs out of
    /// eligible partners.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use servers_com_core::{Graph, GraphConfig};
    ///
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let config = GraphConfig { nodes_amount: 8, ..GraphConfig::default() };
    /// let graph = Graph::random(&config, &mut rng)?;
    /// assert_eq!(graph.len(), 8);
    /// assert_eq!(graph.capped_nodes().count(), 2);
    /// assert!(graph.capped_nodes().all(|node| node.connection_count() == 1));
    /// # Ok::<(), servers_com_core::GraphError>(())
    /// ```
    #[instrument(
        name = "graph.random",
        err,
        skip(config, rng),
        fields(
            nodes_amount = config.nodes_amount,
            connection_percent = config.connection_percent,
            connection_limit = config.connection_limit,
            min_rand_connections = config.min_rand_connections,
            allow_loops = config.allow_loop_connections,
        ),
    )]
    pub fn random<R: Rng + ?Sized>(config: &GraphConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let mut graph = Self::allocate(config);
        graph.populate_nodes(config.min_rand_connections, rng)?;

        let stats = graph.degree_stats();
        info!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            limited = graph.limited_nodes().count(),
            max_degree = stats.max,
            "graph populated"
        );
        #[cfg(feature = "metrics")]
        {
            metrics::counter!("graph_nodes_allocated").increment(graph.len() as u64);
            metrics::counter!("graph_edges_created").increment(graph.edge_count() as u64);
        }
        Ok(graph)
    }

    fn populate_nodes<R: Rng + ?Sized>(
        &mut self,
        min_rand_connections: usize,
        rng: &mut R,
    ) -> Result<()> {
        self.set_limits(rng);
        self.populate_limited_nodes(rng)?;
        self.populate_unlimited_nodes(min_rand_connections, rng)
    }

    /// Caps `n - floor(n * percent / 100)` nodes chosen uniformly without
    /// replacement.
    #[instrument(name = "graph.set_limits", skip(self, rng), fields(limits = tracing::field::Empty))]
    pub(crate) fn set_limits<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = limits_amount(self.len(), self.connection_percent());
        tracing::Span::current().record("limits", count);
        let limit = self.connection_limit();
        let nodes = self.nodes_mut();
        for position in index::sample(rng, nodes.len(), count) {
            if let Some(node) = nodes.get_mut(position) {
                node.set_connections_limit(limit);
            }
        }
    }

    /// Fills every capped node up to its cap, one partner at a time.
    ///
    /// The available pool is rebuilt before each draw because every edge can
    /// push a capped partner out of it. Nodes already saturated by an earlier
    /// pick are skipped.
    #[instrument(name = "graph.populate_limited", skip(self, rng))]
    pub(crate) fn populate_limited_nodes<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let capped: Vec<NodeId> = self.capped_nodes().map(|node| node.id()).collect();
        for id in capped {
            loop {
                let remaining = self
                    .node(id)
                    .and_then(|node| node.remaining_capacity())
                    .unwrap_or(0);
                if remaining == 0 {
                    break;
                }
                let mut pool = self.available_pool(id);
                let Some(partner) = pool.draw(rng) else {
                    warn!(node = %id, remaining, "no available partner for capped node");
                    return Err(GraphError::GraphConfiguration {
                        phase: PopulationPhase::Limited,
                        node: id,
                        required: remaining,
                        available: 0,
                    });
                };
                self.connect(id, partner)?;
                debug!(node = %id, partner = %partner, "connected capped node");
            }
        }
        Ok(())
    }

    /// Connects each uncapped node to `k` distinct uncapped partners, with `k`
    /// drawn uniformly from `2..=min_rand_connections`.
    ///
    /// Partners are not capacity-filtered, so a node picked by others can end
    /// with more than `k` partners.
    #[instrument(name = "graph.populate_unlimited", skip(self, rng))]
    pub(crate) fn populate_unlimited_nodes<R: Rng + ?Sized>(
        &mut self,
        min_rand_connections: usize,
        rng: &mut R,
    ) -> Result<()> {
        let unlimited: Vec<NodeId> = self.unlimited_nodes().map(|node| node.id()).collect();
        let upper = min_rand_connections.max(MIN_RAND_CONNECTIONS_FLOOR);
        for &id in &unlimited {
            let mut pool = CandidatePool::from_candidates(
                unlimited
                    .iter()
                    .copied()
                    .filter(|&candidate| self.allow_loop_connections() || candidate != id),
            );
            let wanted = rng.gen_range(MIN_RAND_CONNECTIONS_FLOOR..=upper);
            let available = pool.len();
            let Some(partners) = pool.draw_distinct(rng, wanted) else {
                warn!(node = %id, wanted, available, "not enough uncapped partners");
                return Err(GraphError::GraphConfiguration {
                    phase: PopulationPhase::Unlimited,
                    node: id,
                    required: wanted,
                    available,
                });
            };
            for partner in &partners {
                self.connect(id, *partner)?;
            }
            debug!(node = %id, partners = partners.len(), "connected uncapped node");
        }
        Ok(())
    }

    /// Nodes with spare capacity that `id` may still pick.
    fn available_pool(&self, id: NodeId) -> CandidatePool {
        let Some(origin) = self.node(id) else {
            return CandidatePool::default();
        };
        CandidatePool::from_candidates(
            self.available_nodes()
                .map(|node| node.id())
                .filter(|&candidate| {
                    (self.allow_loop_connections() || candidate != id)
                        && !origin.is_connected_to(candidate)
                }),
        )
    }
}

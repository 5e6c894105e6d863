//! Single-successor graphs.
//!
//! Each [`SuccessorNode`] holds at most one outgoing link. Nodes are split
//! into a connected group and an isolated group; inside each group with more
//! than one member every node links to a uniformly chosen other member, so the
//! two groups never reference each other.

use rand::Rng;
use tracing::{info, instrument};

use crate::{
    Result,
    config::{
        GraphConfig, uncapped_amount, validate_connection_percent, validate_nodes_amount,
    },
    error::NodeError,
    node::NodeId,
};

/// Node with a single optional successor link.
///
/// # Examples
/// ```
/// use servers_com_core::{NodeError, NodeId, SuccessorNode};
///
/// let mut node = SuccessorNode::new(NodeId::new(0));
/// node.set_next(NodeId::new(3))?;
/// assert_eq!(node.next(), Some(NodeId::new(3)));
/// assert_eq!(
///     node.set_next(NodeId::new(0)),
///     Err(NodeError::SelfReference { node: NodeId::new(0) })
/// );
/// # Ok::<(), NodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorNode {
    id: NodeId,
    next: Option<NodeId>,
}

impl SuccessorNode {
    /// Creates a node without a successor.
    #[must_use]
    pub const fn new(id: NodeId) -> Self {
        Self { id, next: None }
    }

    /// Returns the node identity.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the successor, if linked.
    #[must_use]
    pub const fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Points this node at `next`.
    ///
    /// # Errors
    /// Returns [`NodeError::SelfReference`] when `next` is this node.
    pub const fn set_next(&mut self, next: NodeId) -> core::result::Result<(), NodeError> {
        if next.get() == self.id.get() {
            return Err(NodeError::SelfReference { node: self.id });
        }
        self.next = Some(next);
        Ok(())
    }
}

/// Graph of single-successor nodes split into connected and isolated groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorGraph {
    nodes: Vec<SuccessorNode>,
    connected_len: usize,
}

impl SuccessorGraph {
    /// Builds a graph of `config.nodes_amount` nodes where the first
    /// `floor(n * percent / 100)` nodes form the connected group.
    ///
    /// Only the node-count and percent ranges apply; the remaining
    /// [`GraphConfig`] fields are ignored.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::NodesAmountViolation`] or
    /// [`crate::GraphError::ConnectionPercentViolation`].
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use servers_com_core::{GraphConfig, SuccessorGraph};
    ///
    /// let mut rng = SmallRng::seed_from_u64(4);
    /// let config = GraphConfig { nodes_amount: 10, ..GraphConfig::default() };
    /// let graph = SuccessorGraph::random(&config, &mut rng)?;
    /// assert_eq!(graph.nodes().len(), 10);
    /// assert_eq!(graph.connected_nodes().len(), 8);
    /// assert!(graph.nodes().iter().all(|node| node.next().is_some()));
    /// # Ok::<(), servers_com_core::GraphError>(())
    /// ```
    #[instrument(
        name = "successor.random",
        err,
        skip(config, rng),
        fields(
            nodes_amount = config.nodes_amount,
            connection_percent = config.connection_percent,
        ),
    )]
    pub fn random<R: Rng + ?Sized>(config: &GraphConfig, rng: &mut R) -> Result<Self> {
        validate_nodes_amount(config.nodes_amount)?;
        validate_connection_percent(config.connection_percent)?;

        let connected_len = uncapped_amount(config.nodes_amount, config.connection_percent);
        let mut nodes: Vec<SuccessorNode> = (0..config.nodes_amount)
            .map(|index| SuccessorNode::new(NodeId::new(index)))
            .collect();
        let (connected, isolated) = nodes.split_at_mut(connected_len);
        link_group(connected, rng)?;
        link_group(isolated, rng)?;

        info!(
            connected = connected_len,
            isolated = config.nodes_amount - connected_len,
            "successor graph populated"
        );
        Ok(Self {
            nodes,
            connected_len,
        })
    }

    /// All nodes in identity order.
    #[must_use]
    pub fn nodes(&self) -> &[SuccessorNode] {
        &self.nodes
    }

    /// Nodes of the connected group.
    #[must_use]
    pub fn connected_nodes(&self) -> &[SuccessorNode] {
        self.nodes.get(..self.connected_len).unwrap_or_default()
    }

    /// Nodes of the isolated group.
    #[must_use]
    pub fn isolated_nodes(&self) -> &[SuccessorNode] {
        self.nodes.get(self.connected_len..).unwrap_or_default()
    }
}

fn link_group<R: Rng + ?Sized>(group: &mut [SuccessorNode], rng: &mut R) -> Result<()> {
    if group.len() < 2 {
        return Ok(());
    }
    let ids: Vec<NodeId> = group.iter().map(SuccessorNode::id).collect();
    for (position, node) in group.iter_mut().enumerate() {
        // Draw from every other slot by skipping over our own position.
        let mut pick = rng.gen_range(0..ids.len() - 1);
        if pick >= position {
            pick += 1;
        }
        if let Some(&target) = ids.get(pick) {
            node.set_next(target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::GraphError;

    fn config(nodes_amount: usize, connection_percent: usize) -> GraphConfig {
        GraphConfig {
            nodes_amount,
            connection_percent,
            ..GraphConfig::default()
        }
    }

    #[test]
    fn set_next_rejects_self() {
        let mut node = SuccessorNode::new(NodeId::new(2));
        assert_eq!(
            node.set_next(NodeId::new(2)),
            Err(NodeError::SelfReference {
                node: NodeId::new(2)
            })
        );
        assert_eq!(node.next(), None);
    }

    #[rstest]
    #[case(0, 80)]
    #[case(1, 80)]
    #[case(4, 80)]
    #[case(10, 50)]
    #[case(999, 80)]
    fn random_keeps_links_inside_groups(#[case] nodes: usize, #[case] percent: usize) {
        let mut rng = SmallRng::seed_from_u64(21);
        let graph = SuccessorGraph::random(&config(nodes, percent), &mut rng)
            .expect("ranges are valid");
        assert_eq!(graph.nodes().len(), nodes);

        let connected_len = graph.connected_nodes().len();
        for node in graph.connected_nodes() {
            if let Some(next) = node.next() {
                assert!(next.get() < connected_len);
                assert_ne!(next, node.id());
            }
        }
        for node in graph.isolated_nodes() {
            if let Some(next) = node.next() {
                assert!(next.get() >= connected_len);
                assert_ne!(next, node.id());
            }
        }
    }

    #[test]
    fn singleton_groups_stay_unlinked() {
        let mut rng = SmallRng::seed_from_u64(8);
        // 5 nodes at 80 percent: four connected, one isolated.
        let graph = SuccessorGraph::random(&config(5, 80), &mut rng).expect("valid");
        assert_eq!(graph.connected_nodes().len(), 4);
        assert!(graph.connected_nodes().iter().all(|n| n.next().is_some()));
        assert_eq!(
            graph
                .isolated_nodes()
                .iter()
                .map(SuccessorNode::next)
                .collect::<Vec<_>>(),
            vec![None]
        );
    }

    #[rstest]
    #[case(config(1_000, 80))]
    #[case(config(10, 101))]
    fn random_rejects_out_of_range_parameters(#[case] config: GraphConfig) {
        let mut rng = SmallRng::seed_from_u64(0);
        let err = SuccessorGraph::random(&config, &mut rng).expect_err("must reject");
        assert!(matches!(
            err,
            GraphError::NodesAmountViolation { .. } | GraphError::ConnectionPercentViolation { .. }
        ));
    }
}

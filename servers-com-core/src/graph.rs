//! Undirected graph produced by random construction.
//!
//! [`Graph`] owns its nodes and the configuration they were built with. The
//! node set is fixed at allocation; only edges are added afterwards, always in
//! symmetric pairs.

use std::fmt;

use crate::{
    config::GraphConfig,
    error::NodeError,
    node::{Node, NodeId},
};

/// Structural dump of one node, as consumed by text output modes.
///
/// # Examples
/// ```
/// use servers_com_core::{HumanReadableNode, NodeId};
///
/// let record = HumanReadableNode {
///     id: NodeId::new(2),
///     connections_limit: Some(1),
///     connections: vec![NodeId::new(5)],
/// };
/// assert_eq!(record.to_string(), "2 (limit 1): [5]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanReadableNode {
    /// Node identity.
    pub id: NodeId,
    /// Cap carried by the node, if any.
    pub connections_limit: Option<usize>,
    /// Partner identities in ascending order.
    pub connections: Vec<NodeId>,
}

impl fmt::Display for HumanReadableNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.id)?;
        match self.connections_limit {
            Some(limit) => write!(f, "limit {limit}")?,
            None => f.write_str("unlimited")?,
        }
        f.write_str("): [")?;
        for (index, partner) in self.connections.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{partner}")?;
        }
        f.write_str("]")
    }
}

/// Degree summary across every node of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DegreeStats {
    /// Smallest partner count, zero for an empty graph.
    pub min: usize,
    /// Largest partner count, zero for an empty graph.
    pub max: usize,
    /// Sum of partner counts over all nodes.
    pub total: usize,
}

/// Randomly wired undirected graph.
///
/// Build one with [`Graph::random`] or [`crate::RandomGraphBuilder`].
///
/// # Examples
/// ```
/// use servers_com_core::RandomGraphBuilder;
///
/// let graph = RandomGraphBuilder::new()
///     .with_nodes_amount(4)
///     .with_seed(7)
///     .build()
///     .expect("configuration is satisfiable");
/// let ids: Vec<usize> = graph.nodes().iter().map(|node| node.id().get()).collect();
/// assert_eq!(ids, vec![0, 1, 2, 3]);
/// assert_eq!(graph.limited_nodes().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    allow_loop_connections: bool,
    connection_percent: usize,
    connection_limit: usize,
}

impl Graph {
    /// Allocates `config.nodes_amount` unconnected, uncapped nodes with
    /// sequential identities. No validation or randomness is involved.
    #[must_use]
    pub(crate) fn allocate(config: &GraphConfig) -> Self {
        let nodes = (0..config.nodes_amount)
            .map(|index| Node::new(NodeId::new(index)))
            .collect();
        Self {
            nodes,
            allow_loop_connections: config.allow_loop_connections,
            connection_percent: config.connection_percent,
            connection_limit: config.connection_limit,
        }
    }

    /// All nodes in identity order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Looks up a node by identity.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.get())
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether nodes may be their own partners.
    #[must_use]
    pub const fn allow_loop_connections(&self) -> bool {
        self.allow_loop_connections
    }

    /// Percent of nodes left uncapped.
    #[must_use]
    pub const fn connection_percent(&self) -> usize {
        self.connection_percent
    }

    /// Cap applied to capped nodes.
    #[must_use]
    pub const fn connection_limit(&self) -> usize {
        self.connection_limit
    }

    /// Nodes whose partner count has reached their cap.
    pub fn limited_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_limited())
    }

    /// Nodes without a cap.
    pub fn unlimited_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| !node.is_capped())
    }

    /// Nodes that can still accept another partner.
    pub fn available_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_available())
    }

    /// Nodes carrying a cap, whether or not it has been reached.
    pub fn capped_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.is_capped())
    }

    /// Undirected edges as `(low, high)` pairs in ascending order. A
    /// self-loop appears once as `(id, id)`.
    #[must_use]
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.connections()
                    .filter(move |partner| *partner >= node.id())
                    .map(move |partner| (node.id(), partner))
            })
            .collect()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.connections().filter(|partner| *partner >= node.id()).count())
            .sum()
    }

    /// Minimum, maximum and total partner counts.
    #[must_use]
    pub fn degree_stats(&self) -> DegreeStats {
        let mut degrees = self.nodes.iter().map(Node::connection_count);
        let Some(first) = degrees.next() else {
            return DegreeStats::default();
        };
        degrees.fold(
            DegreeStats {
                min: first,
                max: first,
                total: first,
            },
            |stats, degree| DegreeStats {
                min: stats.min.min(degree),
                max: stats.max.max(degree),
                total: stats.total + degree,
            },
        )
    }

    /// Stable per-node dump of identity, cap and partners.
    #[must_use]
    pub fn human_readable_nodes(&self) -> Vec<HumanReadableNode> {
        self.nodes
            .iter()
            .map(|node| HumanReadableNode {
                id: node.id(),
                connections_limit: node.connections_limit(),
                connections: node.connections().collect(),
            })
            .collect()
    }

    /// One-line description listing the nodes that reached their cap.
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::RandomGraphBuilder;
    ///
    /// let graph = RandomGraphBuilder::new()
    ///     .with_nodes_amount(4)
    ///     .with_seed(1)
    ///     .build()
    ///     .expect("configuration is satisfiable");
    /// let title = graph.title("0.1.0");
    /// assert!(title.starts_with("Graph has 4 nodes with connection percent=80."));
    /// assert!(title.ends_with("Ver. 0.1.0."));
    /// ```
    #[must_use]
    pub fn title(&self, version: &str) -> String {
        let limited = self
            .limited_nodes()
            .map(|node| node.id().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Graph has {} nodes with connection percent={}. \
             List of nodes that have limit({}) connections: {limited}. Ver. {version}.",
            self.nodes.len(),
            self.connection_percent,
            self.connection_limit,
        )
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Adds the undirected edge `a`-`b`. Returns `false` when the edge
    /// already existed.
    ///
    /// # Errors
    /// Returns [`NodeError::SelfReference`] when `a == b` and loops are
    /// disallowed.
    pub(crate) fn connect(&mut self, a: NodeId, b: NodeId) -> Result<bool, NodeError> {
        if a == b && !self.allow_loop_connections {
            return Err(NodeError::SelfReference { node: a });
        }
        let inserted = self
            .nodes
            .get_mut(a.get())
            .is_some_and(|node| node.insert_connection(b));
        if a != b
            && let Some(node) = self.nodes.get_mut(b.get())
        {
            node.insert_connection(a);
        }
        Ok(inserted)
    }
}

//! Node storage for randomly generated graphs.
//!
//! A [`Node`] owns its adjacency set and optional connection cap. Identity is
//! the [`NodeId`] handle, so adjacency and candidate pools never compare node
//! payloads.

use std::collections::BTreeSet;
use std::fmt;

/// Stable identity of a node within a single graph.
///
/// Identifiers are allocated sequentially from zero and double as the node's
/// index in [`crate::Graph::nodes`].
///
/// # Examples
/// ```
/// use servers_com_core::NodeId;
///
/// let id = NodeId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a new node identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Vertex of an undirected random graph.
///
/// `connections` is a set: inserting an existing partner is a no-op. A node
/// with `connections_limit() == None` is unbounded.
///
/// Identity lives in [`NodeId`]; comparing two `Node` values compares the
/// whole state, adjacency included.
///
/// # Examples
/// ```
/// use servers_com_core::{Node, NodeId};
///
/// let node = Node::new(NodeId::new(0)).with_data("edge-router");
/// assert_eq!(node.id(), NodeId::new(0));
/// assert_eq!(node.connection_count(), 0);
/// assert!(node.is_available());
/// assert_eq!(node.data(), Some("edge-router"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    connections: BTreeSet<NodeId>,
    connections_limit: Option<usize>,
    data: Option<String>,
}

impl Node {
    /// Creates an unconnected, uncapped node.
    #[must_use]
    pub const fn new(id: NodeId) -> Self {
        Self {
            id,
            connections: BTreeSet::new(),
            connections_limit: None,
            data: None,
        }
    }

    /// Attaches an opaque payload. The payload never influences construction.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Returns the node identity.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Iterates partner identifiers in ascending order.
    pub fn connections(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.connections.iter().copied()
    }

    /// Number of distinct partners, counting a self-loop once.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Returns `true` when `other` is already a partner.
    #[must_use]
    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.connections.contains(&other)
    }

    /// Maximum number of partners, or `None` when unbounded.
    #[must_use]
    pub const fn connections_limit(&self) -> Option<usize> {
        self.connections_limit
    }

    /// Returns `true` when the node carries a cap.
    #[must_use]
    pub const fn is_capped(&self) -> bool {
        self.connections_limit.is_some()
    }

    /// Returns `true` when the node's partner count equals its cap.
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::{Node, NodeId};
    ///
    /// // Uncapped nodes are never limited.
    /// assert!(!Node::new(NodeId::new(1)).is_limited());
    /// ```
    #[must_use]
    pub fn is_limited(&self) -> bool {
        self.connections_limit == Some(self.connections.len())
    }

    /// Returns `true` when the node can accept at least one more partner.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.connections_limit
            .is_none_or(|limit| self.connections.len() < limit)
    }

    /// Partners still accepted before the cap is reached; `None` when
    /// unbounded.
    #[must_use]
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.connections_limit
            .map(|limit| limit.saturating_sub(self.connections.len()))
    }

    /// Returns the opaque payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub(crate) const fn set_connections_limit(&mut self, limit: usize) {
        self.connections_limit = Some(limit);
    }

    /// Records `partner` as adjacent; returns `false` when already present.
    pub(crate) fn insert_connection(&mut self, partner: NodeId) -> bool {
        self.connections.insert(partner)
    }
}

//! Structural invariant checks for populated graphs.
//!
//! Property tests and the CLI `--verify` flag run these checks after
//! construction instead of re-walking adjacency themselves.

use thiserror::Error;

use crate::{graph::Graph, node::NodeId};

/// Enumerates the structural invariants a populated [`Graph`] upholds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphInvariant {
    /// Node identities match their position in the node list.
    SequentialIds,
    /// Every partner reference points at an existing node that links back.
    Symmetry,
    /// No node lists itself unless loops are allowed.
    LoopPolicy,
    /// No capped node holds more partners than its cap.
    CapBounds,
}

impl GraphInvariant {
    /// Returns all invariants in evaluation order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::SequentialIds,
            Self::Symmetry,
            Self::LoopPolicy,
            Self::CapBounds,
        ]
    }
}

/// Reports an invariant violation found by [`Graph::check_invariants`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GraphInvariantViolation {
    /// A node's identity does not match its index.
    #[error("node at position {position} carries id {id}")]
    MisplacedId {
        /// Index within the node list.
        position: usize,
        /// Identity stored on the node.
        id: NodeId,
    },
    /// A partner reference points past the end of the node list.
    #[error("node {origin} references missing node {target}")]
    DanglingPartner {
        /// Node holding the reference.
        origin: NodeId,
        /// Referenced identity.
        target: NodeId,
    },
    /// An edge is only recorded on one side.
    #[error("edge {origin}->{target} is missing the reverse link")]
    MissingBacklink {
        /// Node that lists the partner.
        origin: NodeId,
        /// Partner that does not list the origin.
        target: NodeId,
    },
    /// A node lists itself although loops are disallowed.
    #[error("node {node} is connected to itself")]
    SelfLoop {
        /// Offending node.
        node: NodeId,
    },
    /// A capped node exceeds its cap.
    #[error("node {node} has {degree} connection(s), exceeding limit {limit}")]
    CapExceeded {
        /// Offending node.
        node: NodeId,
        /// Partner count found.
        degree: usize,
        /// Cap carried by the node.
        limit: usize,
    },
}

impl Graph {
    /// Evaluates every [`GraphInvariant`] and collects the violations.
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::RandomGraphBuilder;
    ///
    /// let graph = RandomGraphBuilder::new()
    ///     .with_nodes_amount(12)
    ///     .with_seed(3)
    ///     .build()
    ///     .expect("configuration is satisfiable");
    /// assert!(graph.check_invariants().is_empty());
    /// ```
    #[must_use]
    pub fn check_invariants(&self) -> Vec<GraphInvariantViolation> {
        GraphInvariant::all()
            .into_iter()
            .flat_map(|invariant| self.check_invariant(invariant))
            .collect()
    }

    /// Evaluates a single invariant.
    #[must_use]
    pub fn check_invariant(&self, invariant: GraphInvariant) -> Vec<GraphInvariantViolation> {
        match invariant {
            GraphInvariant::SequentialIds => self.check_sequential_ids(),
            GraphInvariant::Symmetry => self.check_symmetry(),
            GraphInvariant::LoopPolicy => self.check_loop_policy(),
            GraphInvariant::CapBounds => self.check_cap_bounds(),
        }
    }

    fn check_sequential_ids(&self) -> Vec<GraphInvariantViolation> {
        self.nodes()
            .iter()
            .enumerate()
            .filter(|(position, node)| node.id().get() != *position)
            .map(|(position, node)| GraphInvariantViolation::MisplacedId {
                position,
                id: node.id(),
            })
            .collect()
    }

    fn check_symmetry(&self) -> Vec<GraphInvariantViolation> {
        let mut violations = Vec::new();
        for node in self.nodes() {
            for target in node.connections() {
                match self.node(target) {
                    None => violations.push(GraphInvariantViolation::DanglingPartner {
                        origin: node.id(),
                        target,
                    }),
                    Some(partner) if !partner.is_connected_to(node.id()) => {
                        violations.push(GraphInvariantViolation::MissingBacklink {
                            origin: node.id(),
                            target,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        violations
    }

    fn check_loop_policy(&self) -> Vec<GraphInvariantViolation> {
        if self.allow_loop_connections() {
            return Vec::new();
        }
        self.nodes()
            .iter()
            .filter(|node| node.is_connected_to(node.id()))
            .map(|node| GraphInvariantViolation::SelfLoop { node: node.id() })
            .collect()
    }

    fn check_cap_bounds(&self) -> Vec<GraphInvariantViolation> {
        self.nodes()
            .iter()
            .filter_map(|node| {
                let limit = node.connections_limit()?;
                let degree = node.connection_count();
                (degree > limit).then_some(GraphInvariantViolation::CapExceeded {
                    node: node.id(),
                    degree,
                    limit,
                })
            })
            .collect()
    }
}

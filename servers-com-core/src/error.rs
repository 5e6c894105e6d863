//! Error types for the servers-com core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::node::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Sampling pass that was running when a candidate pool ran dry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PopulationPhase {
    /// Capped nodes receiving partners from the available pool.
    Limited,
    /// Uncapped nodes receiving partners from the other uncapped nodes.
    Unlimited,
}

impl PopulationPhase {
    /// Returns the lowercase label used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limited => "limited",
            Self::Unlimited => "unlimited",
        }
    }
}

impl fmt::Display for PopulationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when validating parameters or populating a [`crate::Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The requested node count lies outside the supported range.
    #[error("nodes amount must be between {min} and {max} (got {got})")]
    NodesAmountViolation {
        /// Node count supplied by the caller.
        got: usize,
        /// Smallest accepted node count.
        min: usize,
        /// Largest accepted node count.
        max: usize,
    },
    /// The requested connection percent lies outside `0..=100`.
    #[error("connection percent must be between {min} and {max} (got {got})")]
    ConnectionPercentViolation {
        /// Percent supplied by the caller.
        got: usize,
        /// Smallest accepted percent.
        min: usize,
        /// Largest accepted percent.
        max: usize,
    },
    /// The requested upper bound on random partners is out of range for the
    /// configured node count.
    #[error("min rand connections must be between {min} and {max} (got {got})")]
    MinRandConnectionsViolation {
        /// Bound supplied by the caller.
        got: usize,
        /// Smallest accepted bound.
        min: usize,
        /// Largest accepted bound for the configured node count.
        max: usize,
    },
    /// Capped nodes must accept at least one connection.
    #[error("connection limit must be at least 1 (got {got})")]
    ConnectionLimitViolation {
        /// Cap supplied by the caller.
        got: usize,
    },
    /// A sampling pass could not find enough distinct eligible partners.
    #[error(
        "{phase} pass needs {required} partner(s) for node {node} but only {available} are eligible"
    )]
    GraphConfiguration {
        /// Pass that was running when the pool ran dry.
        phase: PopulationPhase,
        /// Node that was being connected.
        node: NodeId,
        /// Number of partners the node needed.
        required: usize,
        /// Number of eligible partners left in the pool.
        available: usize,
    },
    /// A node-level mutation was rejected while wiring edges.
    #[error(transparent)]
    Node(#[from] NodeError),
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The requested node count lies outside the supported range.
        NodesAmountViolation => NodesAmountViolation { .. } => "GRAPH_NODES_AMOUNT_VIOLATION",
        /// The requested connection percent lies outside `0..=100`.
        ConnectionPercentViolation => ConnectionPercentViolation { .. } => "GRAPH_CONNECTION_PERCENT_VIOLATION",
        /// The requested random partner bound is out of range.
        MinRandConnectionsViolation => MinRandConnectionsViolation { .. } => "GRAPH_MIN_RAND_CONNECTIONS_VIOLATION",
        /// Capped nodes must accept at least one connection.
        ConnectionLimitViolation => ConnectionLimitViolation { .. } => "GRAPH_CONNECTION_LIMIT_VIOLATION",
        /// A sampling pass could not find enough eligible partners.
        GraphConfiguration => GraphConfiguration { .. } => "GRAPH_CONFIGURATION_ERROR",
        /// A node-level mutation was rejected.
        NodeFailure => Node { .. } => "GRAPH_NODE_FAILURE",
    }
}

impl GraphError {
    /// Returns `true` for errors raised by parameter validation, before any
    /// node was allocated.
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::GraphError;
    ///
    /// let err = GraphError::ConnectionLimitViolation { got: 0 };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::GraphConfiguration { .. } | Self::Node(_))
    }

    /// Retrieve the inner [`NodeErrorCode`] when the error originated in a
    /// node-level mutation.
    #[must_use]
    pub const fn node_code(&self) -> Option<NodeErrorCode> {
        match self {
            Self::Node(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Errors raised by node-level mutations.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum NodeError {
    /// A node was asked to link to itself where self-reference is forbidden.
    #[error("node {node} cannot reference itself")]
    SelfReference {
        /// Node that attempted the self-link.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`NodeError`] variants.
    enum NodeErrorCode for NodeError {
        /// A node was asked to link to itself.
        SelfReference => SelfReference { .. } => "NODE_SELF_REFERENCE",
    }
}

/// Convenient alias for results returned by the graph construction API.
pub type Result<T> = core::result::Result<T, GraphError>;

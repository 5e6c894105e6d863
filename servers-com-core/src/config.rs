//! Parameters accepted by random graph construction and their range checks.
//!
//! Validation is pure: it inspects the numbers only and never allocates
//! nodes, so a rejected configuration leaves no partial state behind.

use std::ops::RangeInclusive;

use crate::{Result, error::GraphError};

/// Accepted node counts.
pub const NODES_AMOUNT_RANGE: RangeInclusive<usize> = 0..=999;

/// Accepted connection percents.
pub const CONNECTION_PERCENT_RANGE: RangeInclusive<usize> = 0..=100;

/// Smallest accepted upper bound on random partners per uncapped node.
pub const MIN_RAND_CONNECTIONS_FLOOR: usize = 2;

/// Node count used when the caller does not pick one.
pub const DEFAULT_NODES_AMOUNT: usize = 100;

/// Connection percent used when the caller does not pick one.
pub const DEFAULT_CONNECTION_PERCENT: usize = 80;

/// Cap applied to capped nodes when the caller does not pick one.
pub const DEFAULT_CONNECTION_LIMIT: usize = 1;

/// Largest accepted `min_rand_connections` for `nodes_amount` nodes.
///
/// # Examples
/// ```
/// use servers_com_core::min_rand_connections_ceiling;
///
/// assert_eq!(min_rand_connections_ceiling(8), 5);
/// assert_eq!(min_rand_connections_ceiling(3), 2);
/// ```
#[must_use]
pub const fn min_rand_connections_ceiling(nodes_amount: usize) -> usize {
    nodes_amount / 2 + 1
}

/// Parameters for [`crate::Graph::random`].
///
/// `connection_percent` is the share of nodes left uncapped; the remaining
/// `100 - connection_percent` percent receive `connection_limit` as their cap.
///
/// # Examples
/// ```
/// use servers_com_core::GraphConfig;
///
/// let config = GraphConfig::default();
/// assert_eq!(config.nodes_amount, 100);
/// assert_eq!(config.connection_percent, 80);
/// assert!(!config.allow_loop_connections);
/// assert_eq!(config.connection_limit, 1);
/// assert_eq!(config.min_rand_connections, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Number of nodes to allocate.
    pub nodes_amount: usize,
    /// Percent of nodes that stay uncapped.
    pub connection_percent: usize,
    /// Whether a node may be chosen as its own partner.
    pub allow_loop_connections: bool,
    /// Cap applied uniformly to every capped node.
    pub connection_limit: usize,
    /// Upper bound of the random partner count drawn for each uncapped node.
    pub min_rand_connections: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            nodes_amount: DEFAULT_NODES_AMOUNT,
            connection_percent: DEFAULT_CONNECTION_PERCENT,
            allow_loop_connections: false,
            connection_limit: DEFAULT_CONNECTION_LIMIT,
            min_rand_connections: MIN_RAND_CONNECTIONS_FLOOR,
        }
    }
}

impl GraphConfig {
    /// Checks every range constraint and returns the first violation.
    ///
    /// Checks run in a fixed order: nodes amount, connection percent, min
    /// rand connections, connection limit.
    ///
    /// # Errors
    /// Returns [`GraphError::NodesAmountViolation`],
    /// [`GraphError::ConnectionPercentViolation`],
    /// [`GraphError::MinRandConnectionsViolation`] or
    /// [`GraphError::ConnectionLimitViolation`].
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::{GraphConfig, GraphError};
    ///
    /// let config = GraphConfig { nodes_amount: 1_000, ..GraphConfig::default() };
    /// assert!(matches!(
    ///     config.validate(),
    ///     Err(GraphError::NodesAmountViolation { got: 1_000, .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<()> {
        validate_nodes_amount(self.nodes_amount)?;
        validate_connection_percent(self.connection_percent)?;

        let ceiling = min_rand_connections_ceiling(self.nodes_amount);
        if self.min_rand_connections < MIN_RAND_CONNECTIONS_FLOOR
            || self.min_rand_connections > ceiling
        {
            return Err(GraphError::MinRandConnectionsViolation {
                got: self.min_rand_connections,
                min: MIN_RAND_CONNECTIONS_FLOOR,
                max: ceiling,
            });
        }

        if self.connection_limit == 0 {
            return Err(GraphError::ConnectionLimitViolation {
                got: self.connection_limit,
            });
        }

        Ok(())
    }

    /// Number of nodes that receive a cap: `n - floor(n * percent / 100)`.
    ///
    /// # Examples
    /// ```
    /// use servers_com_core::GraphConfig;
    ///
    /// let config = GraphConfig { nodes_amount: 8, ..GraphConfig::default() };
    /// assert_eq!(config.limits_amount(), 2);
    /// ```
    #[must_use]
    pub const fn limits_amount(&self) -> usize {
        limits_amount(self.nodes_amount, self.connection_percent)
    }
}

pub(crate) fn validate_nodes_amount(nodes_amount: usize) -> Result<()> {
    if NODES_AMOUNT_RANGE.contains(&nodes_amount) {
        return Ok(());
    }
    Err(GraphError::NodesAmountViolation {
        got: nodes_amount,
        min: *NODES_AMOUNT_RANGE.start(),
        max: *NODES_AMOUNT_RANGE.end(),
    })
}

pub(crate) fn validate_connection_percent(connection_percent: usize) -> Result<()> {
    if CONNECTION_PERCENT_RANGE.contains(&connection_percent) {
        return Ok(());
    }
    Err(GraphError::ConnectionPercentViolation {
        got: connection_percent,
        min: *CONNECTION_PERCENT_RANGE.start(),
        max: *CONNECTION_PERCENT_RANGE.end(),
    })
}

pub(crate) const fn limits_amount(nodes: usize, connection_percent: usize) -> usize {
    nodes.saturating_sub(uncapped_amount(nodes, connection_percent))
}

pub(crate) const fn uncapped_amount(nodes: usize, connection_percent: usize) -> usize {
    nodes.saturating_mul(connection_percent) / 100
}

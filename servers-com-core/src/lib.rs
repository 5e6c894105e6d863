//! Random graph construction for the servers-com toolkit.
//!
//! [`Graph::random`] allocates a fixed node set, caps a random subset of it,
//! and wires undirected edges in two sampling passes. [`RandomGraphBuilder`]
//! is the convenient front door; [`SuccessorGraph`] covers the simpler
//! single-link layout.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod config;
mod error;
mod graph;
mod invariants;
mod node;
mod population;
mod sampling;
mod successor;

pub use crate::{
    builder::RandomGraphBuilder,
    config::{
        CONNECTION_PERCENT_RANGE, DEFAULT_CONNECTION_LIMIT, DEFAULT_CONNECTION_PERCENT,
        DEFAULT_NODES_AMOUNT, GraphConfig, MIN_RAND_CONNECTIONS_FLOOR, NODES_AMOUNT_RANGE,
        min_rand_connections_ceiling,
    },
    error::{GraphError, GraphErrorCode, NodeError, NodeErrorCode, PopulationPhase, Result},
    graph::{DegreeStats, Graph, HumanReadableNode},
    invariants::{GraphInvariant, GraphInvariantViolation},
    node::{Node, NodeId},
    successor::{SuccessorGraph, SuccessorNode},
};

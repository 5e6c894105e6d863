//! Command-line surface for generating random server graphs.
//!
//! The single `generate` command maps its flags onto a
//! [`servers_com_core::GraphConfig`], builds the graph and renders either a
//! summary with the edge list or the per-node dump.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, OutputFormat, render_summary,
    run_cli,
};

//! Command implementations and argument parsing for the servers-com CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use servers_com_core::{
    DEFAULT_CONNECTION_LIMIT, DEFAULT_CONNECTION_PERCENT, DEFAULT_NODES_AMOUNT, Graph,
    GraphConfig, GraphError, GraphErrorCode, GraphInvariantViolation, MIN_RAND_CONNECTIONS_FLOOR,
    RandomGraphBuilder,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const NODES_AMOUNT_FLAG: &str = "--nodes-amount";
const CONNECTION_PERCENT_FLAG: &str = "--connection-percent";
const MIN_RAND_CONNECTIONS_FLAG: &str = "--min-rand-connections";
const CONNECTION_LIMIT_FLAG: &str = "--connection-limit";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "servers-com",
    version,
    about = "Generate a random undirected graph of communicating servers."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a random graph and print it.
    Generate(GenerateCommand),
}

/// Options accepted by the `generate` command.
///
/// Numeric flags are parsed as signed integers so that negative input is
/// reported against the flag's range instead of failing inside clap.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Nodes amount. Must be between 0 and 999.
    #[arg(
        long = "nodes-amount",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_NODES_AMOUNT as i64,
    )]
    pub nodes_amount: i64,

    /// Percent of nodes without a connection cap. Must be between 0 and 100.
    #[arg(
        long = "connection-percent",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_CONNECTION_PERCENT as i64,
    )]
    pub connection_percent: i64,

    /// Allow a node to be connected to itself.
    #[arg(long = "allow-loop-connections")]
    pub allow_loop_connections: bool,

    /// Number of partners every capped node receives. Must be at least 1.
    #[arg(
        long = "connection-limit",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_CONNECTION_LIMIT as i64,
    )]
    pub connection_limit: i64,

    /// Upper bound of the random partner count of each uncapped node. Must be
    /// between 2 and nodes-amount / 2 + 1. Popular nodes can still end up
    /// with more partners than this.
    #[arg(
        long = "min-rand-connections",
        allow_negative_numbers = true,
        default_value_t = MIN_RAND_CONNECTIONS_FLOOR as i64,
    )]
    pub min_rand_connections: i64,

    /// Seed for a reproducible graph.
    #[arg(long)]
    pub seed: Option<u64>,

    /// What to print once the graph is built.
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Check structural invariants before printing.
    #[arg(long)]
    pub verify: bool,
}

impl GenerateCommand {
    /// Converts the flags into a core config.
    ///
    /// A value that does not fit `usize` maps to one failing the same range
    /// check, so the core still reports violations in its validation order.
    /// The error message later quotes the raw flag value.
    fn config(&self) -> GraphConfig {
        GraphConfig {
            nodes_amount: to_usize(self.nodes_amount, usize::MAX),
            connection_percent: to_usize(self.connection_percent, usize::MAX),
            allow_loop_connections: self.allow_loop_connections,
            connection_limit: to_usize(self.connection_limit, 0),
            min_rand_connections: to_usize(self.min_rand_connections, 0),
        }
    }
}

fn to_usize(raw: i64, when_negative: usize) -> usize {
    usize::try_from(raw).unwrap_or(if raw < 0 { when_negative } else { usize::MAX })
}

/// Rendering modes for a generated graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Title line followed by the edge list.
    #[default]
    Summary,
    /// One line per node with its cap and partners.
    Nodes,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag fell outside its closed range.
    #[error("{flag} must be between {min} and {max} (got {got})")]
    ArgumentOutOfRange {
        /// Offending flag.
        flag: &'static str,
        /// Value supplied on the command line.
        got: i64,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
        /// Stable code of the core validation error.
        code: GraphErrorCode,
    },
    /// A flag fell below its lower bound.
    #[error("{flag} must be at least {min} (got {got})")]
    ArgumentBelowMinimum {
        /// Offending flag.
        flag: &'static str,
        /// Value supplied on the command line.
        got: i64,
        /// Smallest accepted value.
        min: usize,
        /// Stable code of the core validation error.
        code: GraphErrorCode,
    },
    /// The flags were valid but the graph could not be populated.
    #[error("cannot populate a graph with these flags: {0}")]
    Configuration(GraphError),
    /// `--verify` found structural violations.
    #[error("generated graph violates {} invariant(s)", violations.len())]
    Invariants {
        /// Every violation found.
        violations: Vec<GraphInvariantViolation>,
    },
}

impl CliError {
    /// Returns the stable code of the core error behind this failure.
    #[must_use]
    pub const fn code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::ArgumentOutOfRange { code, .. } | Self::ArgumentBelowMinimum { code, .. } => {
                Some(*code)
            }
            Self::Configuration(error) => Some(error.code()),
            Self::Invariants { .. } => None,
        }
    }

    /// Returns the population error behind this failure, if any.
    #[must_use]
    pub const fn graph_error(&self) -> Option<&GraphError> {
        match self {
            Self::Configuration(error) => Some(error),
            _ => None,
        }
    }

    /// Maps a core error onto the flag that caused it, quoting the value as
    /// typed on the command line.
    fn from_validation(error: GraphError, command: &GenerateCommand) -> Self {
        let code = error.code();
        match error {
            GraphError::NodesAmountViolation { min, max, .. } => Self::ArgumentOutOfRange {
                flag: NODES_AMOUNT_FLAG,
                got: command.nodes_amount,
                min,
                max,
                code,
            },
            GraphError::ConnectionPercentViolation { min, max, .. } => Self::ArgumentOutOfRange {
                flag: CONNECTION_PERCENT_FLAG,
                got: command.connection_percent,
                min,
                max,
                code,
            },
            GraphError::MinRandConnectionsViolation { min, max, .. } => {
                Self::ArgumentOutOfRange {
                    flag: MIN_RAND_CONNECTIONS_FLAG,
                    got: command.min_rand_connections,
                    min,
                    max,
                    code,
                }
            }
            GraphError::ConnectionLimitViolation { .. } => Self::ArgumentBelowMinimum {
                flag: CONNECTION_LIMIT_FLAG,
                got: command.connection_limit,
                min: 1,
                code,
            },
            other => Self::Configuration(other),
        }
    }
}

/// Outcome of a successful `generate` run.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// The generated graph.
    pub graph: Graph,
    /// Requested rendering.
    pub output: OutputFormat,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] naming the offending flag for validation failures,
/// [`CliError::Configuration`] when population runs dry, and
/// [`CliError::Invariants`] when `--verify` finds a violation.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use servers_com_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["servers-com", "generate", "--nodes-amount", "10", "--seed", "3"]);
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.graph.len(), 10);
/// # Ok::<(), servers_com_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(generate) => {
            Span::current().record("command", field::display("generate"));
            run_generate(&generate)
        }
    }
}

#[instrument(
    name = "cli.generate",
    skip(command),
    fields(seed = field::Empty, verify = command.verify),
)]
pub(super) fn run_generate(command: &GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let mut builder = RandomGraphBuilder::from_config(command.config());
    if let Some(seed) = command.seed {
        Span::current().record("seed", seed);
        builder = builder.with_seed(seed);
    }
    let graph = builder
        .build()
        .map_err(|error| CliError::from_validation(error, command))?;

    if command.verify {
        let violations = graph.check_invariants();
        if !violations.is_empty() {
            return Err(CliError::Invariants { violations });
        }
    }

    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        graph,
        output: command.output,
    })
}

/// Renders `summary` to `writer` in its requested format.
///
/// The summary view prints the title line, the edge count and one
/// tab-separated `a\tb` line per edge. The nodes view prints one
/// [`servers_com_core::HumanReadableNode`] per line.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let graph = &summary.graph;
    match summary.output {
        OutputFormat::Summary => {
            writeln!(writer, "{}", graph.title(env!("CARGO_PKG_VERSION")))?;
            writeln!(writer, "edges: {}", graph.edge_count())?;
            for (a, b) in graph.edges() {
                writeln!(writer, "{a}\t{b}")?;
            }
        }
        OutputFormat::Nodes => {
            for record in graph.human_readable_nodes() {
                writeln!(writer, "{record}")?;
            }
        }
    }
    Ok(())
}

//! Support library for the servers-com CLI binary.
//!
//! Exposes argument parsing, graph rendering and logging setup so tests can
//! drive the command pipeline without spawning a subprocess.

pub mod cli;
pub mod logging;

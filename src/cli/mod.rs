//! Command-line interface
//!
//! Argument parsing and the runner that wires configuration, transport,
//! fetch engine, console rendering and export together.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;

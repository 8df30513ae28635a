//! Tooling Layer
//!
//! Process arguments and the interactive shell that drives the hierarchy.

pub mod cli;
pub mod shell;

pub use cli::{Cli, CliContext};
pub use shell::{parse_line, Flow, Shell, ShellCommand};

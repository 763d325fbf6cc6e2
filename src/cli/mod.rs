//! CLI module for medboard
//!
//! Provides the command-line interface for:
//! - serve: start the HTTP server (default when no command is given)
//! - check-config: print the effective configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ConfigArgs};
pub use commands::{check_config, effective_config, run, run_command, serve, EffectiveConfig};
pub use errors::{CliError, CliErrorCode, CliResult};

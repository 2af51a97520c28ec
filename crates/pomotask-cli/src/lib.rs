//! PomoTask CLI library.
//!
//! Command-line and REPL front end for the PomoTask server: an HTTP client,
//! configuration management, command execution and output formatting.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use client::{ClientError, PomoTaskClient};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

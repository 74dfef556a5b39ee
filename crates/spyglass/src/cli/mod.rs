//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the spyglass binary.

mod commands;
mod generate;
mod models;
mod serve;

pub use commands::{Cli, Commands};
pub use generate::run_generate;
pub use models::list_models;
pub use serve::run_server;

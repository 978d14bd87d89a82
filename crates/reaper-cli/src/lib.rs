//! Reaper CLI library
//!
//! Command definitions, configuration loading, and command execution for the
//! `reaper` binary. Kept as a library so the pieces are testable without
//! spawning the binary.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::ReaperConfig;
pub use error::{CliError, Result};

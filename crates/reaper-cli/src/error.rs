//! Error types for the CLI

use thiserror::Error;

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// Filesystem error reading config or inventory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Inventory file could not be parsed
    #[error("Inventory error: {0}")]
    Inventory(#[from] serde_json::Error),

    /// A sweep failed
    #[error(transparent)]
    Sweep(#[from] reaper_sweep::SweepError),

    /// An enforcement run failed
    #[error(transparent)]
    Enforcer(#[from] reaper_enforcer::EnforcerError),
}

//! Error types for sweep operations

use thiserror::Error;

/// Errors that can occur during a sweep
///
/// A sweep only fails outright when the provider cannot even enumerate a
/// kind. Per-resource failures are logged and the sweep continues - one bad
/// resource never aborts the rest of the run.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Provider API error while listing a kind
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

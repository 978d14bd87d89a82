//! Configuration for sweep operations
//!
//! Defines the live-mode switch, the kind ordering, and the worker interval.

use reaper_domain::{ResourceKind, DEFAULT_SWEEP_ORDER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable that enables live mode
pub const LIVEMODE_ENV: &str = "LIVEMODE";

/// Configuration for the sweep reaper
///
/// # Examples
///
/// ```
/// use reaper_sweep::SweepConfig;
///
/// // Default configuration: dry run, hourly, dependency-safe kind order
/// let config = SweepConfig::default();
/// assert!(!config.live_mode);
/// assert_eq!(config.sweep_interval_minutes, 60);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Whether destructive commands are actually issued
    ///
    /// Read once at the start of an invocation and never revisited mid-run.
    /// Default: false (dry run).
    #[serde(default)]
    pub live_mode: bool,

    /// Resource kinds to sweep, in order
    ///
    /// The order is the caller's promise that dependent children are
    /// processed safely relative to their parents; the engine does not
    /// reorder it. Default: [`DEFAULT_SWEEP_ORDER`].
    #[serde(default = "default_kinds")]
    pub kinds: Vec<ResourceKind>,

    /// How often the background worker runs a sweep (in minutes)
    /// Default: every 60 minutes
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
}

fn default_kinds() -> Vec<ResourceKind> {
    DEFAULT_SWEEP_ORDER.to_vec()
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            live_mode: false,
            kinds: default_kinds(),
            sweep_interval_minutes: default_sweep_interval(),
        }
    }
}

impl SweepConfig {
    /// Read the live-mode switch from the `LIVEMODE` environment variable
    ///
    /// Only a case-insensitive `"true"` is truthy; an unset variable or any
    /// other value means dry run.
    pub fn live_mode_from_env() -> bool {
        std::env::var(LIVEMODE_ENV)
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Get the worker interval as a Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes * 60)
    }
}

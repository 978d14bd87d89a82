//! Configuration for enforcer operations

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the tag enforcer
///
/// # Examples
///
/// ```
/// use reaper_enforcer::EnforcerConfig;
///
/// let config = EnforcerConfig::default();
/// assert_eq!(config.poll_interval_secs, 15);
/// assert_eq!(config.wait_budget_secs, 240);
/// assert!(!config.live_mode);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforcerConfig {
    /// Whether escalations actually terminate the resource
    ///
    /// Read once at invocation start and never revisited.
    #[serde(default)]
    pub live_mode: bool,

    /// Seconds between tag polls
    /// Default: 15 seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Total wait budget for tags to propagate (in seconds)
    ///
    /// Bounded by the invocation's own runtime limit, so it stays small.
    /// Default: 240 seconds (4 minutes).
    #[serde(default = "default_wait_budget")]
    pub wait_budget_secs: u64,
}

fn default_poll_interval() -> u64 {
    15
}

fn default_wait_budget() -> u64 {
    240
}

impl Default for EnforcerConfig {
    fn default() -> Self {
        Self {
            live_mode: false,
            poll_interval_secs: default_poll_interval(),
            wait_budget_secs: default_wait_budget(),
        }
    }
}

impl EnforcerConfig {
    /// Get the poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Get the wait budget as a chrono delta for deadline arithmetic
    pub fn wait_budget(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::seconds(self.wait_budget_secs as i64)
    }
}

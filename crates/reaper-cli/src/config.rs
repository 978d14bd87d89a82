//! Configuration management for the CLI.

use crate::error::Result;
use reaper_enforcer::EnforcerConfig;
use reaper_sweep::SweepConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked for in the working directory
const DEFAULT_CONFIG_FILE: &str = "reaper.toml";

/// Combined configuration for both loops
///
/// ```toml
/// [sweep]
/// live_mode = false
/// sweep_interval_minutes = 60
///
/// [enforcer]
/// poll_interval_secs = 15
/// wait_budget_secs = 240
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaperConfig {
    /// Sweep reaper settings
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Tag enforcer settings
    #[serde(default)]
    pub enforcer: EnforcerConfig,
}

impl ReaperConfig {
    /// Load configuration
    ///
    /// An explicit path must exist and parse. With no path, `./reaper.toml`
    /// is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Fold in the `LIVEMODE` environment variable
    ///
    /// The environment wins over the file; only a case-insensitive `"true"`
    /// enables live mode.
    pub fn apply_env(&mut self) {
        if SweepConfig::live_mode_from_env() {
            self.set_live_mode(true);
        }
    }

    /// Force live mode on or off for both loops
    pub fn set_live_mode(&mut self, live_mode: bool) {
        self.sweep.live_mode = live_mode;
        self.enforcer.live_mode = live_mode;
    }
}

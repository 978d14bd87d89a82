//! Reaper Sweep
//!
//! Periodic batch reaper for tagged cloud resources.
//!
//! # Overview
//!
//! The sweep walks every resource of every managed kind, in a caller-supplied
//! order, and:
//! - **deletes** resources whose `termination_date` has passed
//! - **stops** running instances that carry no `termination_date` at all
//! - **reports** every other resource missing a usable tag
//! - **skips** resources tagged `indefinite` entirely
//!
//! Dry-run is the default: destructive commands are only issued when
//! [`SweepConfig::live_mode`] is set, but the outcome lists are populated the
//! same way in both modes so a dry run is a faithful rehearsal.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use reaper_sweep::{Sweeper, SweepConfig};
//! use reaper_provider::MemoryProvider;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut provider = MemoryProvider::default();
//! let mut sweeper = Sweeper::new(SweepConfig::default());
//!
//! let outcome = sweeper.sweep(&mut provider)?;
//! println!("{}", outcome.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use reaper_sweep::{SweepWorker, SweepConfig};
//! use reaper_provider::MemoryProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MemoryProvider::default();
//!     let mut worker = SweepWorker::new(SweepConfig::default());
//!
//!     // Run indefinitely (until Ctrl+C)
//!     worker.run(provider).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The sweep can be configured via TOML:
//!
//! ```toml
//! [sweep]
//! live_mode = false
//! sweep_interval_minutes = 60
//! # kinds defaults to the dependency-safe order
//! ```
//!
//! `live_mode` can also come from the `LIVEMODE` environment variable; only a
//! case-insensitive `"true"` enables it.

#![warn(missing_docs)]

mod config;
mod error;
mod outcome;
pub mod report;
mod sweeper;
mod worker;

pub use config::SweepConfig;
pub use error::SweepError;
pub use outcome::{KindOutcome, RunOutcome};
pub use sweeper::Sweeper;
pub use worker::SweepWorker;

//! Reaper Enforcer
//!
//! Reactive tag enforcement for freshly created resources.
//!
//! # Overview
//!
//! The enforcer is triggered once per resource-creation event. It polls the
//! resource's tags at a fixed interval until one of:
//! - a `termination_date` tag is already present - validated and returned;
//! - a `lifetime` shorthand appears - a deadline is derived from it, written
//!   back as `termination_date`, and returned;
//! - the bounded wait budget elapses - the resource is terminated.
//!
//! Every escalation path issues a termination command (subject to live mode)
//! and then returns the underlying error to the caller, so the surrounding
//! observability layer always learns the run did not complete normally.
//!
//! # Usage
//!
//! ```no_run
//! use reaper_enforcer::{Enforcer, EnforcerConfig};
//! use reaper_provider::MemoryProvider;
//! use reaper_domain::ResourceId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut provider = MemoryProvider::default();
//!     let enforcer = Enforcer::new(EnforcerConfig::default());
//!
//!     let outcome = enforcer
//!         .enforce(&mut provider, &ResourceId::new("i-0abc123"))
//!         .await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [enforcer]
//! live_mode = false
//! poll_interval_secs = 15
//! wait_budget_secs = 240
//! ```

#![warn(missing_docs)]

mod config;
mod enforcer;
mod error;

pub use config::EnforcerConfig;
pub use enforcer::{report_state_anomaly, Enforcement, Enforcer};
pub use error::EnforcerError;

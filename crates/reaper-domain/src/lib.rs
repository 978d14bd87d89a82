//! Reaper Domain Layer
//!
//! This crate contains the shared policy core and domain model for the
//! resource reaper. It defines the fundamental concepts, value objects, and
//! trait interfaces that the sweep and enforcer layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Resource**: A cloud entity subject to lifecycle policy - an id, a kind,
//!   and a tag set
//! - **ResourceKind**: Closed enum of every managed resource type
//! - **LifetimeSpec**: The `lifetime` shorthand tag (`"2d"`, `"3h"`) used to
//!   derive a deadline
//! - **Expiration**: The `termination_date` tag - a concrete UTC deadline or
//!   the `indefinite` sentinel
//! - **Provider**: Trait boundary to the cloud provider's resource API
//!
//! ## Architecture
//!
//! Policy decisions (tag lookup, lifetime parsing, deadline arithmetic,
//! expiration evaluation) are pure functions here; every destructive side
//! effect lives behind the [`Provider`](traits::Provider) trait and is issued
//! by the sweep and enforcer crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod expiration;
pub mod kind;
pub mod lifetime;
pub mod resource;
pub mod traits;

// Re-exports for convenience
pub use expiration::{utc_now, Expiration, TimestampError};
pub use kind::{ResourceKind, DEFAULT_SWEEP_ORDER};
pub use lifetime::{LifetimeError, LifetimeSpec, LifetimeUnit};
pub use resource::{Resource, ResourceId, Tag, TagSet};

/// Tag key holding a resource's deadline (or the `indefinite` sentinel).
pub const TERMINATION_DATE_TAG: &str = "termination_date";

/// Tag key holding the duration shorthand used to derive a deadline.
pub const LIFETIME_TAG: &str = "lifetime";

/// Sentinel tag value marking a resource as permanently exempt from
/// expiration.
pub const INDEFINITE: &str = "indefinite";

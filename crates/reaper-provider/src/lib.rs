//! Reaper Provider
//!
//! Infrastructure implementations of the [`Provider`] trait boundary defined
//! in `reaper-domain`.
//!
//! The crate currently ships [`MemoryProvider`], an in-memory provider backed
//! by a serializable [`Inventory`]. It serves two purposes:
//! - a test double across the workspace, recording every destructive
//!   [`Action`] so assertions can check exactly what would have been issued
//! - the fixture backend for the CLI, letting dry-run policy rehearsals run
//!   against a local inventory file instead of a cloud account
//!
//! [`Provider`]: reaper_domain::traits::Provider

#![warn(missing_docs)]

mod memory;

pub use memory::{Action, Inventory, MemoryProvider, MemoryProviderError};

//! Command execution.

use crate::cli::EnforceArgs;
use crate::config::ReaperConfig;
use crate::error::Result;
use reaper_domain::ResourceId;
use reaper_enforcer::{report_state_anomaly, Enforcement, Enforcer};
use reaper_provider::{Inventory, MemoryProvider};
use reaper_sweep::{SweepWorker, Sweeper};
use std::fs;
use std::path::Path;

/// Load the provider backend from an inventory fixture
///
/// Without a fixture the provider starts empty, which still exercises the
/// full sweep path (every kind lists zero resources).
pub fn load_provider(inventory: Option<&Path>) -> Result<MemoryProvider> {
    match inventory {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let inventory: Inventory = serde_json::from_str(&contents)?;
            Ok(MemoryProvider::from_inventory(inventory))
        }
        None => {
            tracing::warn!("No inventory supplied; running against an empty provider");
            Ok(MemoryProvider::default())
        }
    }
}

/// Run one sweep and print the run summary
pub fn execute_sweep(config: &ReaperConfig, provider: &mut MemoryProvider) -> Result<()> {
    let mut sweeper = Sweeper::new(config.sweep.clone());
    let outcome = sweeper.sweep(provider)?;
    println!("{}", outcome.summary());
    Ok(())
}

/// Run scheduled sweeps until interrupted
pub async fn execute_watch(config: &ReaperConfig, provider: MemoryProvider) -> Result<()> {
    let mut worker = SweepWorker::new(config.sweep.clone());
    worker.run(provider).await?;
    Ok(())
}

/// Run the enforcer against one resource
///
/// A failed enforcement re-raises after its termination side effect; before
/// propagating, the resource's current state is reported so an operator can
/// see whether the trigger observation still holds.
pub async fn execute_enforce(
    args: &EnforceArgs,
    config: &ReaperConfig,
    provider: &mut MemoryProvider,
) -> Result<()> {
    let id = ResourceId::new(args.resource_id.as_str());
    let enforcer = Enforcer::new(config.enforcer.clone());

    match enforcer.enforce(provider, &id).await {
        Ok(Enforcement::DeadlineSet(deadline)) => {
            println!("termination_date enforced: {}", deadline.to_rfc3339());
            Ok(())
        }
        Ok(Enforcement::Indefinite) => {
            println!("resource {} is exempt from expiration", id);
            Ok(())
        }
        Err(e) => {
            report_state_anomaly(provider, &id);
            Err(e.into())
        }
    }
}

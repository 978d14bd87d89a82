//! Background worker for scheduled sweeps

use crate::{RunOutcome, SweepConfig, SweepError, Sweeper};
use reaper_domain::traits::Provider;
use tokio::time::interval;

/// Background worker that runs the sweeper on a schedule
///
/// Each tick performs one full sweep. The worker owns the scheduling only;
/// the policy lives in [`Sweeper`].
///
/// # Examples
///
/// ```no_run
/// use reaper_sweep::{SweepWorker, SweepConfig};
/// use reaper_provider::MemoryProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = MemoryProvider::default();
///     let mut worker = SweepWorker::new(SweepConfig::default());
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run(provider).await?;
///     Ok(())
/// }
/// ```
pub struct SweepWorker {
    sweeper: Sweeper,
    interval: std::time::Duration,
}

impl SweepWorker {
    /// Create a worker with the given configuration
    pub fn new(config: SweepConfig) -> Self {
        let interval = config.sweep_interval();
        Self::with_interval(config, interval)
    }

    /// Create a worker with an explicit tick interval
    ///
    /// Lets tests run cycles without waiting out the configured minutes.
    pub fn with_interval(config: SweepConfig, interval: std::time::Duration) -> Self {
        Self {
            sweeper: Sweeper::new(config),
            // tokio's interval panics on a zero period
            interval: interval.max(std::time::Duration::from_millis(1)),
        }
    }

    /// Run the worker indefinitely
    ///
    /// Sweeps at the configured interval until a shutdown signal (Ctrl+C) is
    /// received. A failed sweep is logged and the schedule continues.
    ///
    /// # Errors
    ///
    /// Currently only returns on shutdown; sweep errors are logged, not
    /// propagated, so a transient provider outage does not kill the worker.
    pub async fn run<P>(&mut self, mut provider: P) -> Result<(), SweepError>
    where
        P: Provider,
        P::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!("Sweep worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Starting sweep");
                    match self.sweeper.sweep(&mut provider) {
                        Ok(outcome) => {
                            tracing::info!(
                                "Sweep completed: {} deleted, {} stopped, {} improperly tagged",
                                outcome.total_deleted(),
                                outcome.total_stopped(),
                                outcome.total_improperly_tagged()
                            );
                        }
                        Err(e) => {
                            tracing::error!("Sweep failed: {}", e);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping sweep worker");
                    break;
                }
            }
        }

        tracing::info!("Sweep worker stopped after {} sweeps", self.sweeper.sweep_count());
        Ok(())
    }

    /// Run for a specific number of sweep cycles (useful for testing)
    ///
    /// Unlike [`run`](Self::run), a sweep error here is propagated after the
    /// failing cycle.
    pub async fn run_cycles<P>(
        &mut self,
        provider: &mut P,
        cycles: usize,
    ) -> Result<Vec<RunOutcome>, SweepError>
    where
        P: Provider,
        P::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);
        let mut outcomes = Vec::with_capacity(cycles);

        tracing::info!(
            "Sweep worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting sweep {}/{}", cycle + 1, cycles);
            outcomes.push(self.sweeper.sweep(provider)?);
        }

        Ok(outcomes)
    }

    /// How many sweeps have completed so far
    pub fn sweep_count(&self) -> u64 {
        self.sweeper.sweep_count()
    }
}

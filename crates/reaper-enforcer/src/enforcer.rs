//! Tag enforcement state machine

use crate::{EnforcerConfig, EnforcerError};
use chrono::{DateTime, Utc};
use reaper_domain::traits::{InstanceState, Provider};
use reaper_domain::{
    utc_now, Expiration, LifetimeSpec, ResourceId, TimestampError, INDEFINITE, LIFETIME_TAG,
    TERMINATION_DATE_TAG,
};

/// Successful outcome of one enforcement run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
    /// A concrete UTC deadline is now on the resource
    DeadlineSet(DateTime<Utc>),

    /// The resource is permanently exempt from expiration
    Indefinite,
}

/// The tag enforcer
///
/// One `enforce` call handles one freshly created resource: it waits (with a
/// bounded budget) for either expiration tag to appear, derives and writes
/// the deadline when only the `lifetime` shorthand is present, and escalates
/// to termination on every invalid path.
pub struct Enforcer {
    config: EnforcerConfig,
}

impl Enforcer {
    /// Create an enforcer with the given configuration
    pub fn new(config: EnforcerConfig) -> Self {
        Self { config }
    }

    /// Create an enforcer with default configuration (dry run)
    pub fn default_config() -> Self {
        Self::new(EnforcerConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &EnforcerConfig {
        &self.config
    }

    /// Enforce the expiration tag on one resource
    ///
    /// Polls the resource's tags at the configured interval until a
    /// `termination_date` is present (set directly, or derived here from the
    /// `lifetime` shorthand and written back), or the wait budget elapses.
    ///
    /// # Errors
    ///
    /// Terminal policy failures ([`EnforcerError::InvalidLifetime`],
    /// [`EnforcerError::WaitBudgetExceeded`], and the timestamp-validation
    /// variants) are returned only after the termination side effect has been
    /// issued, subject to live mode. Provider errors propagate as-is.
    pub async fn enforce<P: Provider>(
        &self,
        provider: &mut P,
        id: &ResourceId,
    ) -> Result<Enforcement, EnforcerError>
    where
        P::Error: std::fmt::Display,
    {
        let start = utc_now();
        let timeout = start + self.config.wait_budget();

        while utc_now() < timeout {
            let resource = provider
                .describe(id)
                .map_err(|e| EnforcerError::Provider(e.to_string()))?
                .ok_or_else(|| EnforcerError::Provider(format!("resource {} not found", id)))?;

            // Someone may set termination_date directly, bypassing the
            // shorthand path entirely.
            if let Some(value) = resource.tags.get(TERMINATION_DATE_TAG) {
                tracing::info!("'termination_date' tag found on {}", id);
                let value = value.to_string();
                return self.validate_existing(provider, id, &value);
            }

            let lifetime = match resource.tags.get(LIFETIME_TAG) {
                Some(value) => value.to_string(),
                None => {
                    tracing::debug!(
                        "No 'lifetime' tag on {}; sleeping for {}s",
                        id,
                        self.config.poll_interval_secs
                    );
                    tokio::time::sleep(self.config.poll_interval()).await;
                    continue;
                }
            };

            if lifetime == INDEFINITE {
                provider
                    .create_tag(id, TERMINATION_DATE_TAG, INDEFINITE)
                    .map_err(|e| EnforcerError::Provider(e.to_string()))?;
                tracing::info!("{} marked indefinite; exempt from expiration", id);
                return Ok(Enforcement::Indefinite);
            }

            let spec = match LifetimeSpec::parse(&lifetime) {
                Ok(spec) => spec,
                Err(_) => {
                    // Malformed shorthand is terminal; no point polling on.
                    self.escalate(provider, id, "Invalid lifetime value supplied");
                    return Err(EnforcerError::InvalidLifetime(lifetime));
                }
            };

            let deadline = start + spec.duration();
            provider
                .create_tag(id, TERMINATION_DATE_TAG, &deadline.to_rfc3339())
                .map_err(|e| EnforcerError::Provider(e.to_string()))?;
            tracing::info!("'termination_date' tag created on {}: {}", id, deadline.to_rfc3339());
            return Ok(Enforcement::DeadlineSet(deadline));
        }

        self.escalate(
            provider,
            id,
            &format!(
                "No termination_date found within {}s of creation",
                self.config.wait_budget_secs
            ),
        );
        Err(EnforcerError::WaitBudgetExceeded(self.config.wait_budget_secs))
    }

    /// Validate a `termination_date` that was already on the resource
    fn validate_existing<P: Provider>(
        &self,
        provider: &mut P,
        id: &ResourceId,
        value: &str,
    ) -> Result<Enforcement, EnforcerError>
    where
        P::Error: std::fmt::Display,
    {
        match Expiration::parse(value) {
            Ok(Expiration::Indefinite) => Ok(Enforcement::Indefinite),
            Ok(Expiration::At(deadline)) => {
                let now = utc_now();
                if deadline > now {
                    tracing::info!(
                        "{} will be terminated {} seconds from now, roughly",
                        id,
                        (deadline - now).num_seconds()
                    );
                    Ok(Enforcement::DeadlineSet(deadline))
                } else {
                    self.escalate(provider, id, "The termination_date has passed");
                    Err(EnforcerError::DeadlinePassed(deadline))
                }
            }
            Err(TimestampError::MissingUtcOffset(value)) => {
                self.escalate(provider, id, "The termination_date requires a UTC offset");
                Err(EnforcerError::MissingUtcOffset(value))
            }
            Err(TimestampError::Unparsable(value)) => {
                self.escalate(provider, id, "Unable to parse the termination_date");
                Err(EnforcerError::UnparsableTimestamp(value))
            }
        }
    }

    /// Issue the termination side effect for an escalation
    fn escalate<P: Provider>(&self, provider: &mut P, id: &ResourceId, reason: &str)
    where
        P::Error: std::fmt::Display,
    {
        tracing::warn!("REAPER TERMINATION: {} for instance {}", reason, id);
        if self.config.live_mode {
            tracing::warn!("REAPER TERMINATION enabled: deleting instance {}", id);
            if let Err(e) = provider.terminate_instance(id) {
                tracing::error!("Failed to terminate instance {}: {}", id, e);
            }
        } else {
            tracing::warn!(
                "REAPER TERMINATION not enabled: LIVEMODE is false. Would have deleted instance {}",
                id
            );
        }
    }
}

/// Report a resource whose state no longer matches the triggering event
///
/// Called by the invoker after a failed enforcement: if the instance is no
/// longer pending, the failure deserves investigation beyond the re-raised
/// error itself.
pub fn report_state_anomaly<P: Provider>(provider: &P, id: &ResourceId)
where
    P::Error: std::fmt::Display,
{
    match provider.instance_state(id) {
        Ok(Some(state)) if state != InstanceState::Pending => {
            tracing::warn!(
                "Instance {} current state is {:?}. This unexpected failure should be investigated!",
                id,
                state
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Unable to read state for instance {}: {}", id, e);
        }
    }
}

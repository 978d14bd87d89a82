//! Core sweep engine

use crate::{report, KindOutcome, RunOutcome, SweepConfig, SweepError};
use chrono::{DateTime, Utc};
use reaper_domain::traits::Provider;
use reaper_domain::{utc_now, Expiration, Resource, ResourceId, ResourceKind, TERMINATION_DATE_TAG};

/// The sweep reaper
///
/// Walks every resource of every configured kind, evaluates its
/// `termination_date`, and deletes or stops what the policy says to. One
/// sweep is a single synchronous pass; the provider API is the only shared
/// mutable state.
///
/// # Examples
///
/// ```no_run
/// use reaper_sweep::{Sweeper, SweepConfig};
/// use reaper_provider::MemoryProvider;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut provider = MemoryProvider::default();
/// let mut sweeper = Sweeper::new(SweepConfig::default());
/// let outcome = sweeper.sweep(&mut provider)?;
/// println!("{}", outcome.summary());
/// # Ok(())
/// # }
/// ```
pub struct Sweeper {
    config: SweepConfig,
    sweep_count: u64,
}

impl Sweeper {
    /// Create a sweeper with the given configuration
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            sweep_count: 0,
        }
    }

    /// Create a sweeper with default configuration (dry run)
    pub fn default_config() -> Self {
        Self::new(SweepConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// How many sweeps this instance has completed
    pub fn sweep_count(&self) -> u64 {
        self.sweep_count
    }

    /// Perform one full sweep over the configured kinds
    ///
    /// Kinds are processed in configuration order. Each kind's status lines
    /// are emitted as soon as the kind finishes, then the per-kind outcomes
    /// are aggregated into the returned [`RunOutcome`].
    ///
    /// # Errors
    ///
    /// Fails only when the provider cannot list a kind. Per-resource
    /// failures (a stop or delete the provider rejects) are logged and the
    /// sweep continues.
    pub fn sweep<P: Provider>(&mut self, provider: &mut P) -> Result<RunOutcome, SweepError>
    where
        P::Error: std::fmt::Display,
    {
        let kinds = self.config.kinds.clone();
        let mut run = RunOutcome::new();

        for kind in kinds {
            let outcome = self.sweep_kind(provider, kind)?;
            report::emit(kind, &outcome, self.config.live_mode);
            run.record(kind, outcome);
        }

        self.sweep_count += 1;
        tracing::debug!("{}", run.summary());
        Ok(run)
    }

    fn sweep_kind<P: Provider>(
        &self,
        provider: &mut P,
        kind: ResourceKind,
    ) -> Result<KindOutcome, SweepError>
    where
        P::Error: std::fmt::Display,
    {
        let resources = provider
            .list(kind)
            .map_err(|e| SweepError::Provider(e.to_string()))?;
        let now = utc_now();
        let mut outcome = KindOutcome::default();

        for resource in resources {
            self.evaluate(provider, kind, &resource, now, &mut outcome);
        }
        Ok(outcome)
    }

    /// Evaluate one resource's expiration and apply the policy
    fn evaluate<P: Provider>(
        &self,
        provider: &mut P,
        kind: ResourceKind,
        resource: &Resource,
        now: DateTime<Utc>,
        outcome: &mut KindOutcome,
    ) where
        P::Error: std::fmt::Display,
    {
        let value = match resource.tags.get(TERMINATION_DATE_TAG) {
            Some(value) => value.to_string(),
            None => {
                // No expiration tag at all. Report it; instances are the only
                // kind with a safe non-destructive remediation (stop).
                outcome.improperly_tagged.push(resource.id.clone());
                if kind == ResourceKind::Instance {
                    outcome.stopped.push(resource.id.clone());
                    if self.config.live_mode {
                        if let Err(e) = provider.stop_instance(&resource.id) {
                            tracing::error!("Failed to stop instance {}: {}", resource.id, e);
                        }
                    }
                }
                return;
            }
        };

        match Expiration::parse(&value) {
            // Permanently exempt: no list entries, no action.
            Ok(Expiration::Indefinite) => {}
            Ok(expiration @ Expiration::At(_)) => {
                if let Some(ttl) = expiration.time_to_live(now) {
                    tracing::info!(
                        "{} {} will be deleted {} seconds from now, roughly",
                        kind,
                        resource.id,
                        ttl.num_seconds()
                    );
                } else {
                    if self.config.live_mode {
                        if let Err(e) = self.delete_resource(provider, kind, &resource.id) {
                            tracing::error!("Failed to delete {} {}: {}", kind, resource.id, e);
                        }
                    }
                    outcome.deleted.push(resource.id.clone());
                }
            }
            // A present-but-malformed tag is logged and left alone; only the
            // fully-missing case goes on the improperly_tagged list.
            Err(e) => {
                tracing::warn!("{} for {} {}; skipping", e, kind, resource.id);
            }
        }
    }

    /// Kind-specific delete dispatch
    ///
    /// Kinds with dependent cleanup get their pre-steps here; the rest are a
    /// single direct delete. Waited operations (instance terminate, v2 load
    /// balancer delete) block inside the provider until confirmed, which the
    /// sweep ordering relies on.
    fn delete_resource<P: Provider>(
        &self,
        provider: &mut P,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<(), P::Error> {
        match kind {
            ResourceKind::Instance => provider.terminate_instance(id),
            ResourceKind::RouteTable => {
                for association in provider.route_table_associations(id)? {
                    if !association.main {
                        provider.delete_route_table_association(&association.id)?;
                    }
                }
                provider.delete(kind, id)
            }
            ResourceKind::NetworkAcl => {
                if provider.is_default_network_acl(id)? {
                    tracing::debug!("network-acl {} is the VPC default; leaving it", id);
                    Ok(())
                } else {
                    provider.delete(kind, id)
                }
            }
            ResourceKind::InternetGateway => {
                for vpc_id in provider.internet_gateway_attachments(id)? {
                    provider.detach_internet_gateway(id, &vpc_id)?;
                }
                provider.delete(kind, id)
            }
            ResourceKind::LoadBalancer => provider.delete_load_balancer(id.as_str()),
            ResourceKind::LoadBalancerV2 => provider.delete_load_balancer_v2(id.as_str()),
            ResourceKind::TargetGroup => provider.delete_target_group(id.as_str()),
            _ => provider.delete(kind, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use reaper_domain::traits::{InstanceState, RouteTableAssociation};
    use reaper_domain::{Resource, TagSet};
    use reaper_provider::{Action, MemoryProvider};

    fn tagged(id: &str, kind: ResourceKind, termination_date: &str) -> Resource {
        Resource::new(
            id,
            kind,
            [(TERMINATION_DATE_TAG, termination_date)].into_iter().collect(),
        )
    }

    fn past() -> String {
        (utc_now() - TimeDelta::hours(1)).to_rfc3339()
    }

    fn future() -> String {
        (utc_now() + TimeDelta::hours(1)).to_rfc3339()
    }

    fn sweeper(live_mode: bool) -> Sweeper {
        Sweeper::new(SweepConfig {
            live_mode,
            ..Default::default()
        })
    }

    #[test]
    fn test_untagged_instance_dry_run_is_recorded_but_not_stopped() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(Resource::untagged("i-1", ResourceKind::Instance));

        let run = sweeper(false).sweep(&mut provider).unwrap();

        let outcome = run.for_kind(ResourceKind::Instance).unwrap();
        assert_eq!(outcome.improperly_tagged, vec![ResourceId::new("i-1")]);
        assert_eq!(outcome.stopped, vec![ResourceId::new("i-1")]);
        assert!(provider.actions().is_empty(), "dry run must not touch the provider");
    }

    #[test]
    fn test_untagged_instance_live_is_stopped() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(Resource::untagged("i-1", ResourceKind::Instance));

        sweeper(true).sweep(&mut provider).unwrap();

        assert_eq!(
            provider.actions(),
            &[Action::StoppedInstance(ResourceId::new("i-1"))]
        );
        assert_eq!(
            provider.instance_state(&ResourceId::new("i-1")).unwrap(),
            Some(InstanceState::Stopped)
        );
    }

    #[test]
    fn test_untagged_non_instance_is_reported_only() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(Resource::untagged("subnet-1", ResourceKind::Subnet));

        let run = sweeper(true).sweep(&mut provider).unwrap();

        let outcome = run.for_kind(ResourceKind::Subnet).unwrap();
        assert_eq!(outcome.improperly_tagged, vec![ResourceId::new("subnet-1")]);
        assert!(outcome.stopped.is_empty());
        assert!(provider.actions().is_empty());
    }

    #[test]
    fn test_expired_instance_live_is_terminated_and_waited() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("i-1", ResourceKind::Instance, &past()));

        let run = sweeper(true).sweep(&mut provider).unwrap();

        let outcome = run.for_kind(ResourceKind::Instance).unwrap();
        assert_eq!(outcome.deleted, vec![ResourceId::new("i-1")]);
        assert_eq!(
            provider.actions(),
            &[Action::TerminatedInstance(ResourceId::new("i-1"))]
        );
        // The provider confirms termination before the sweep moves on.
        assert_eq!(
            provider.instance_state(&ResourceId::new("i-1")).unwrap(),
            Some(InstanceState::Terminated)
        );
    }

    #[test]
    fn test_expired_resource_dry_run_records_without_deleting() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("vol-1", ResourceKind::Volume, &past()));

        let run = sweeper(false).sweep(&mut provider).unwrap();

        let outcome = run.for_kind(ResourceKind::Volume).unwrap();
        assert_eq!(outcome.deleted, vec![ResourceId::new("vol-1")]);
        assert!(provider.actions().is_empty());
    }

    #[test]
    fn test_future_deadline_is_left_alone() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("vol-1", ResourceKind::Volume, &future()));

        let run = sweeper(true).sweep(&mut provider).unwrap();

        assert!(run.for_kind(ResourceKind::Volume).unwrap().is_empty());
        assert!(provider.actions().is_empty());
    }

    #[test]
    fn test_indefinite_sweeps_are_idempotent() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged(
            "arn:lb/app/web",
            ResourceKind::LoadBalancerV2,
            "indefinite",
        ));

        let mut sweeper = sweeper(true);
        for _ in 0..2 {
            let run = sweeper.sweep(&mut provider).unwrap();
            assert!(run.for_kind(ResourceKind::LoadBalancerV2).unwrap().is_empty());
            assert!(provider.actions().is_empty());
        }
        assert_eq!(sweeper.sweep_count(), 2);
    }

    #[test]
    fn test_malformed_present_tag_is_skipped_not_reported() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("i-1", ResourceKind::Instance, "next tuesday"));
        // Naive timestamps are equally unusable and equally skipped here.
        provider.add_resource(tagged("i-2", ResourceKind::Instance, "2026-08-29T12:00:00"));

        let run = sweeper(true).sweep(&mut provider).unwrap();

        assert!(run.for_kind(ResourceKind::Instance).unwrap().is_empty());
        assert!(provider.actions().is_empty());
    }

    #[test]
    fn test_stopped_instances_are_not_listed() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(Resource::untagged("i-1", ResourceKind::Instance));
        provider.set_instance_state("i-1", InstanceState::Stopped);

        let run = sweeper(true).sweep(&mut provider).unwrap();

        assert!(run.for_kind(ResourceKind::Instance).unwrap().is_empty());
    }

    #[test]
    fn test_route_table_associations_deleted_first() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("rtb-1", ResourceKind::RouteTable, &past()));
        provider.add_route_table_association(
            "rtb-1",
            RouteTableAssociation {
                id: "rtbassoc-main".to_string(),
                main: true,
            },
        );
        provider.add_route_table_association(
            "rtb-1",
            RouteTableAssociation {
                id: "rtbassoc-1".to_string(),
                main: false,
            },
        );

        sweeper(true).sweep(&mut provider).unwrap();

        assert_eq!(
            provider.actions(),
            &[
                Action::DeletedRouteTableAssociation("rtbassoc-1".to_string()),
                Action::Deleted {
                    kind: ResourceKind::RouteTable,
                    id: ResourceId::new("rtb-1"),
                },
            ]
        );
    }

    #[test]
    fn test_default_network_acl_is_never_deleted() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("acl-default", ResourceKind::NetworkAcl, &past()));
        provider.set_default_network_acl("acl-default");

        let run = sweeper(true).sweep(&mut provider).unwrap();

        // Recorded as expired, but the default ACL itself is left in place.
        assert_eq!(
            run.for_kind(ResourceKind::NetworkAcl).unwrap().deleted,
            vec![ResourceId::new("acl-default")]
        );
        assert!(provider.actions().is_empty());
    }

    #[test]
    fn test_internet_gateway_detached_from_every_vpc_before_delete() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("igw-1", ResourceKind::InternetGateway, &past()));
        provider.add_internet_gateway_attachment("igw-1", "vpc-a");
        provider.add_internet_gateway_attachment("igw-1", "vpc-b");

        sweeper(true).sweep(&mut provider).unwrap();

        assert_eq!(
            provider.actions(),
            &[
                Action::DetachedInternetGateway {
                    id: ResourceId::new("igw-1"),
                    vpc_id: "vpc-a".to_string(),
                },
                Action::DetachedInternetGateway {
                    id: ResourceId::new("igw-1"),
                    vpc_id: "vpc-b".to_string(),
                },
                Action::Deleted {
                    kind: ResourceKind::InternetGateway,
                    id: ResourceId::new("igw-1"),
                },
            ]
        );
    }

    #[test]
    fn test_load_balancer_variants_use_their_own_delete_paths() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("classic-web", ResourceKind::LoadBalancer, &past()));
        provider.add_resource(tagged("arn:lb/app/web", ResourceKind::LoadBalancerV2, &past()));
        provider.add_resource(tagged("arn:tg/web", ResourceKind::TargetGroup, &past()));

        sweeper(true).sweep(&mut provider).unwrap();

        assert_eq!(
            provider.actions(),
            &[
                Action::DeletedLoadBalancer("classic-web".to_string()),
                Action::DeletedLoadBalancerV2("arn:lb/app/web".to_string()),
                Action::DeletedTargetGroup("arn:tg/web".to_string()),
            ]
        );
    }

    #[test]
    fn test_kind_order_follows_configuration() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("arn:tg/web", ResourceKind::TargetGroup, &past()));
        provider.add_resource(tagged("arn:lb/app/web", ResourceKind::LoadBalancerV2, &past()));

        // Default order deletes the load balancer before its target group.
        sweeper(true).sweep(&mut provider).unwrap();

        assert_eq!(
            provider.actions(),
            &[
                Action::DeletedLoadBalancerV2("arn:lb/app/web".to_string()),
                Action::DeletedTargetGroup("arn:tg/web".to_string()),
            ]
        );
    }

    #[test]
    fn test_sweep_continues_past_a_failing_resource() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(tagged("vol-fail", ResourceKind::Volume, &past()));
        provider.add_resource(tagged("vol-2", ResourceKind::Volume, &past()));
        provider.fail_deletes_of("vol-fail");

        let run = sweeper(true).sweep(&mut provider).unwrap();

        // Both are recorded; the second delete still went through.
        assert_eq!(
            run.for_kind(ResourceKind::Volume).unwrap().deleted,
            vec![ResourceId::new("vol-fail"), ResourceId::new("vol-2")]
        );
        assert_eq!(
            provider.actions(),
            &[Action::Deleted {
                kind: ResourceKind::Volume,
                id: ResourceId::new("vol-2"),
            }]
        );
    }

    #[test]
    fn test_mixed_tag_set_still_finds_termination_date() {
        let mut provider = MemoryProvider::default();
        let tags: TagSet = [
            ("Name", "batch-worker"),
            (TERMINATION_DATE_TAG, past().as_str()),
        ]
        .into_iter()
        .collect();
        provider.add_resource(Resource::new("i-1", ResourceKind::Instance, tags));

        let run = sweeper(false).sweep(&mut provider).unwrap();
        assert_eq!(
            run.for_kind(ResourceKind::Instance).unwrap().deleted,
            vec![ResourceId::new("i-1")]
        );
    }
}

//! Trait definitions for external interactions
//!
//! These traits define the boundary between policy logic and the cloud
//! provider's resource API. Infrastructure implementations live in other
//! crates (reaper-provider ships an in-memory one).

use crate::kind::ResourceKind;
use crate::resource::{Resource, ResourceId};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a compute instance as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceState {
    /// Instance is being created; the enforcer is triggered in this state
    Pending,
    /// Instance is running (the only state the sweep lists)
    Running,
    /// Instance has been stopped
    Stopped,
    /// Instance has been terminated
    Terminated,
}

/// Association between a route table and a subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableAssociation {
    /// Association identifier
    pub id: String,

    /// Whether this is the VPC's main association (never deleted)
    pub main: bool,
}

/// Trait for the cloud provider's resource API
///
/// The narrow surface the reaper consumes: list-by-kind, read tags, upsert a
/// tag, and issue destructive commands. All calls are synchronous
/// request/response. Implementations must treat delete/terminate of an
/// already-gone resource as success, and the waited variants
/// ([`terminate_instance`](Provider::terminate_instance),
/// [`delete_load_balancer_v2`](Provider::delete_load_balancer_v2)) must not
/// return until the provider confirms completion.
pub trait Provider {
    /// Error type for provider operations
    type Error;

    /// List all resources of a kind, with current tags
    ///
    /// For [`ResourceKind::Instance`] the listing is restricted to running
    /// instances.
    fn list(&self, kind: ResourceKind) -> Result<Vec<Resource>, Self::Error>;

    /// Re-read a single resource and its current tags
    fn describe(&self, id: &ResourceId) -> Result<Option<Resource>, Self::Error>;

    /// Current lifecycle state of an instance
    fn instance_state(&self, id: &ResourceId) -> Result<Option<InstanceState>, Self::Error>;

    /// Create or replace a tag on a resource (idempotent upsert)
    fn create_tag(&mut self, id: &ResourceId, key: &str, value: &str)
        -> Result<(), Self::Error>;

    /// Stop a running instance
    fn stop_instance(&mut self, id: &ResourceId) -> Result<(), Self::Error>;

    /// Terminate an instance and block until the provider confirms it is
    /// fully terminated (network detachment complete)
    fn terminate_instance(&mut self, id: &ResourceId) -> Result<(), Self::Error>;

    /// Delete a resource with no pre-steps
    ///
    /// Used for the kinds whose deletion is a single direct call. Kinds with
    /// dependent cleanup go through the dedicated operations below.
    fn delete(&mut self, kind: ResourceKind, id: &ResourceId) -> Result<(), Self::Error>;

    /// Associations currently attached to a route table
    fn route_table_associations(
        &self,
        id: &ResourceId,
    ) -> Result<Vec<RouteTableAssociation>, Self::Error>;

    /// Delete a single route table association
    fn delete_route_table_association(&mut self, association_id: &str)
        -> Result<(), Self::Error>;

    /// Whether a network ACL is its VPC's default (defaults are never deleted)
    fn is_default_network_acl(&self, id: &ResourceId) -> Result<bool, Self::Error>;

    /// Ids of the VPCs an internet gateway is attached to
    fn internet_gateway_attachments(&self, id: &ResourceId)
        -> Result<Vec<String>, Self::Error>;

    /// Detach an internet gateway from one VPC
    fn detach_internet_gateway(
        &mut self,
        id: &ResourceId,
        vpc_id: &str,
    ) -> Result<(), Self::Error>;

    /// Delete a classic load balancer by name
    fn delete_load_balancer(&mut self, name: &str) -> Result<(), Self::Error>;

    /// Delete a v2 load balancer by ARN and block until the provider
    /// confirms deletion
    fn delete_load_balancer_v2(&mut self, arn: &str) -> Result<(), Self::Error>;

    /// Delete a target group by ARN
    fn delete_target_group(&mut self, arn: &str) -> Result<(), Self::Error>;
}

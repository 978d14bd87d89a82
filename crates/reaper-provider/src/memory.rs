//! In-memory provider implementation

use reaper_domain::traits::{InstanceState, Provider, RouteTableAssociation};
use reaper_domain::{Resource, ResourceId, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from the in-memory provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryProviderError {
    /// Operation targeted a resource the inventory does not know
    #[error("resource {0} not found")]
    NotFound(String),

    /// Failure injected by a test via [`MemoryProvider::fail_deletes_of`]
    #[error("injected failure for {0}")]
    Injected(String),
}

/// Destructive command recorded by the in-memory provider
///
/// Ordering is significant: the recorded sequence is the order commands were
/// issued, which is what the sweep's pre-delete contracts are about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A tag was created or replaced
    CreatedTag {
        /// Target resource
        id: ResourceId,
        /// Tag key
        key: String,
        /// Tag value
        value: String,
    },
    /// An instance was stopped
    StoppedInstance(ResourceId),
    /// An instance was terminated (and the wait completed)
    TerminatedInstance(ResourceId),
    /// A resource was deleted with no pre-steps
    Deleted {
        /// Resource kind
        kind: ResourceKind,
        /// Resource id
        id: ResourceId,
    },
    /// A route table association was deleted
    DeletedRouteTableAssociation(String),
    /// An internet gateway was detached from a VPC
    DetachedInternetGateway {
        /// Gateway id
        id: ResourceId,
        /// VPC it was detached from
        vpc_id: String,
    },
    /// A classic load balancer was deleted by name
    DeletedLoadBalancer(String),
    /// A v2 load balancer was deleted by ARN (and the wait completed)
    DeletedLoadBalancerV2(String),
    /// A target group was deleted by ARN
    DeletedTargetGroup(String),
}

/// Serializable snapshot of a provider's world
///
/// This is the fixture format the CLI loads: the resources with their tags,
/// plus the topology the kind-specific delete paths consult.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// Resources with their current tags
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Instance lifecycle states, keyed by instance id
    ///
    /// Instances absent from this map are assumed running.
    #[serde(default)]
    pub instance_states: HashMap<String, InstanceState>,

    /// Route table associations, keyed by route table id
    #[serde(default)]
    pub route_table_associations: HashMap<String, Vec<RouteTableAssociation>>,

    /// VPC ids each internet gateway is attached to, keyed by gateway id
    #[serde(default)]
    pub internet_gateway_attachments: HashMap<String, Vec<String>>,

    /// Ids of network ACLs that are their VPC's default
    #[serde(default)]
    pub default_network_acls: Vec<String>,
}

/// In-memory [`Provider`] implementation
///
/// Mutations follow the provider contract: tag creation is an idempotent
/// upsert, and delete/terminate of an already-gone resource is success. The
/// "wait until confirmed" operations complete immediately here, flipping the
/// state before returning.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    resources: Vec<Resource>,
    instance_states: HashMap<String, InstanceState>,
    route_table_associations: HashMap<String, Vec<RouteTableAssociation>>,
    internet_gateway_attachments: HashMap<String, Vec<String>>,
    default_network_acls: HashSet<String>,
    gone: HashSet<String>,
    failing: HashSet<String>,
    actions: Vec<Action>,
}

impl MemoryProvider {
    /// Build a provider from a fixture inventory
    pub fn from_inventory(inventory: Inventory) -> Self {
        Self {
            resources: inventory.resources,
            instance_states: inventory.instance_states,
            route_table_associations: inventory.route_table_associations,
            internet_gateway_attachments: inventory.internet_gateway_attachments,
            default_network_acls: inventory.default_network_acls.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Add one resource to the inventory
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Set an instance's lifecycle state
    pub fn set_instance_state(&mut self, id: &str, state: InstanceState) {
        self.instance_states.insert(id.to_string(), state);
    }

    /// Attach a route table association
    pub fn add_route_table_association(
        &mut self,
        route_table_id: &str,
        association: RouteTableAssociation,
    ) {
        self.route_table_associations
            .entry(route_table_id.to_string())
            .or_default()
            .push(association);
    }

    /// Attach an internet gateway to a VPC
    pub fn add_internet_gateway_attachment(&mut self, gateway_id: &str, vpc_id: &str) {
        self.internet_gateway_attachments
            .entry(gateway_id.to_string())
            .or_default()
            .push(vpc_id.to_string());
    }

    /// Mark a network ACL as its VPC's default
    pub fn set_default_network_acl(&mut self, id: &str) {
        self.default_network_acls.insert(id.to_string());
    }

    /// Make every delete/terminate of the given id fail
    pub fn fail_deletes_of(&mut self, id: &str) {
        self.failing.insert(id.to_string());
    }

    /// Destructive commands issued so far, in order
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Current view of a resource, gone or not
    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == *id)
    }

    fn check_injected(&self, raw_id: &str) -> Result<(), MemoryProviderError> {
        if self.failing.contains(raw_id) {
            Err(MemoryProviderError::Injected(raw_id.to_string()))
        } else {
            Ok(())
        }
    }

    fn is_gone(&self, raw_id: &str) -> bool {
        self.gone.contains(raw_id)
    }

    fn state_of(&self, raw_id: &str) -> InstanceState {
        self.instance_states
            .get(raw_id)
            .cloned()
            .unwrap_or(InstanceState::Running)
    }
}

impl Provider for MemoryProvider {
    type Error = MemoryProviderError;

    fn list(&self, kind: ResourceKind) -> Result<Vec<Resource>, Self::Error> {
        let listed = self
            .resources
            .iter()
            .filter(|r| r.kind == kind && !self.is_gone(r.id.as_str()))
            .filter(|r| {
                kind != ResourceKind::Instance
                    || self.state_of(r.id.as_str()) == InstanceState::Running
            })
            .cloned()
            .collect();
        Ok(listed)
    }

    fn describe(&self, id: &ResourceId) -> Result<Option<Resource>, Self::Error> {
        if self.is_gone(id.as_str()) {
            return Ok(None);
        }
        Ok(self.resource(id).cloned())
    }

    fn instance_state(&self, id: &ResourceId) -> Result<Option<InstanceState>, Self::Error> {
        if self.resource(id).is_none() {
            return Ok(None);
        }
        Ok(Some(self.state_of(id.as_str())))
    }

    fn create_tag(
        &mut self,
        id: &ResourceId,
        key: &str,
        value: &str,
    ) -> Result<(), Self::Error> {
        if self.is_gone(id.as_str()) {
            return Err(MemoryProviderError::NotFound(id.to_string()));
        }
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| MemoryProviderError::NotFound(id.to_string()))?;
        resource.tags.upsert(key, value);
        self.actions.push(Action::CreatedTag {
            id: id.clone(),
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn stop_instance(&mut self, id: &ResourceId) -> Result<(), Self::Error> {
        if self.resource(id).is_none() || self.is_gone(id.as_str()) {
            return Err(MemoryProviderError::NotFound(id.to_string()));
        }
        self.instance_states
            .insert(id.to_string(), InstanceState::Stopped);
        self.actions.push(Action::StoppedInstance(id.clone()));
        Ok(())
    }

    fn terminate_instance(&mut self, id: &ResourceId) -> Result<(), Self::Error> {
        self.check_injected(id.as_str())?;
        // Terminating an already-gone instance is success, not a failure.
        if self.resource(id).is_none() || self.is_gone(id.as_str()) {
            tracing::debug!("terminate of absent instance {} treated as success", id);
            return Ok(());
        }
        self.gone.insert(id.to_string());
        self.instance_states
            .insert(id.to_string(), InstanceState::Terminated);
        self.actions.push(Action::TerminatedInstance(id.clone()));
        Ok(())
    }

    fn delete(&mut self, kind: ResourceKind, id: &ResourceId) -> Result<(), Self::Error> {
        self.check_injected(id.as_str())?;
        if self.resource(id).is_none() || self.is_gone(id.as_str()) {
            tracing::debug!("delete of absent {} {} treated as success", kind, id);
            return Ok(());
        }
        self.gone.insert(id.to_string());
        self.actions.push(Action::Deleted {
            kind,
            id: id.clone(),
        });
        Ok(())
    }

    fn route_table_associations(
        &self,
        id: &ResourceId,
    ) -> Result<Vec<RouteTableAssociation>, Self::Error> {
        Ok(self
            .route_table_associations
            .get(id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn delete_route_table_association(
        &mut self,
        association_id: &str,
    ) -> Result<(), Self::Error> {
        for associations in self.route_table_associations.values_mut() {
            associations.retain(|a| a.id != association_id);
        }
        self.actions
            .push(Action::DeletedRouteTableAssociation(association_id.to_string()));
        Ok(())
    }

    fn is_default_network_acl(&self, id: &ResourceId) -> Result<bool, Self::Error> {
        Ok(self.default_network_acls.contains(id.as_str()))
    }

    fn internet_gateway_attachments(
        &self,
        id: &ResourceId,
    ) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .internet_gateway_attachments
            .get(id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn detach_internet_gateway(
        &mut self,
        id: &ResourceId,
        vpc_id: &str,
    ) -> Result<(), Self::Error> {
        if let Some(attachments) = self.internet_gateway_attachments.get_mut(id.as_str()) {
            attachments.retain(|vpc| vpc != vpc_id);
        }
        self.actions.push(Action::DetachedInternetGateway {
            id: id.clone(),
            vpc_id: vpc_id.to_string(),
        });
        Ok(())
    }

    fn delete_load_balancer(&mut self, name: &str) -> Result<(), Self::Error> {
        self.check_injected(name)?;
        if self.is_gone(name) {
            return Ok(());
        }
        self.gone.insert(name.to_string());
        self.actions.push(Action::DeletedLoadBalancer(name.to_string()));
        Ok(())
    }

    fn delete_load_balancer_v2(&mut self, arn: &str) -> Result<(), Self::Error> {
        self.check_injected(arn)?;
        if self.is_gone(arn) {
            return Ok(());
        }
        self.gone.insert(arn.to_string());
        self.actions
            .push(Action::DeletedLoadBalancerV2(arn.to_string()));
        Ok(())
    }

    fn delete_target_group(&mut self, arn: &str) -> Result<(), Self::Error> {
        self.check_injected(arn)?;
        if self.is_gone(arn) {
            return Ok(());
        }
        self.gone.insert(arn.to_string());
        self.actions.push(Action::DeletedTargetGroup(arn.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reaper_domain::TagSet;

    fn instance(id: &str) -> Resource {
        Resource::untagged(id, ResourceKind::Instance)
    }

    #[test]
    fn test_list_filters_instances_to_running() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(instance("i-running"));
        provider.add_resource(instance("i-stopped"));
        provider.set_instance_state("i-stopped", InstanceState::Stopped);
        provider.add_resource(Resource::untagged("vol-1", ResourceKind::Volume));

        let instances = provider.list(ResourceKind::Instance).unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].id, ResourceId::new("i-running"));

        // Non-instance kinds are listed regardless of state bookkeeping.
        assert_eq!(provider.list(ResourceKind::Volume).unwrap().len(), 1);
    }

    #[test]
    fn test_create_tag_is_an_upsert() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(instance("i-1"));
        let id = ResourceId::new("i-1");

        provider.create_tag(&id, "lifetime", "2d").unwrap();
        provider.create_tag(&id, "lifetime", "3h").unwrap();

        let tags: &TagSet = &provider.resource(&id).unwrap().tags;
        assert_eq!(tags.get("lifetime"), Some("3h"));
        assert_eq!(tags.0.len(), 1);
    }

    #[test]
    fn test_create_tag_on_unknown_resource_fails() {
        let mut provider = MemoryProvider::default();
        let err = provider
            .create_tag(&ResourceId::new("i-ghost"), "lifetime", "1d")
            .unwrap_err();
        assert_eq!(err, MemoryProviderError::NotFound("i-ghost".to_string()));
    }

    #[test]
    fn test_terminate_twice_is_a_no_op_success() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(instance("i-1"));
        let id = ResourceId::new("i-1");

        provider.terminate_instance(&id).unwrap();
        provider.terminate_instance(&id).unwrap();

        assert_eq!(provider.actions(), &[Action::TerminatedInstance(id.clone())]);
        assert_eq!(
            provider.instance_state(&id).unwrap(),
            Some(InstanceState::Terminated)
        );
        assert!(provider.list(ResourceKind::Instance).unwrap().is_empty());
    }

    #[test]
    fn test_delete_of_unknown_resource_is_success() {
        let mut provider = MemoryProvider::default();
        provider
            .delete(ResourceKind::Volume, &ResourceId::new("vol-ghost"))
            .unwrap();
        assert!(provider.actions().is_empty());
    }

    #[test]
    fn test_describe_after_delete_returns_none() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(Resource::untagged("vol-1", ResourceKind::Volume));
        let id = ResourceId::new("vol-1");

        assert!(provider.describe(&id).unwrap().is_some());
        provider.delete(ResourceKind::Volume, &id).unwrap();
        assert!(provider.describe(&id).unwrap().is_none());
    }

    #[test]
    fn test_injected_failure_surfaces() {
        let mut provider = MemoryProvider::default();
        provider.add_resource(Resource::untagged("vol-1", ResourceKind::Volume));
        provider.fail_deletes_of("vol-1");

        let err = provider
            .delete(ResourceKind::Volume, &ResourceId::new("vol-1"))
            .unwrap_err();
        assert_eq!(err, MemoryProviderError::Injected("vol-1".to_string()));
    }

    #[test]
    fn test_inventory_round_trip() {
        let inventory = Inventory {
            resources: vec![Resource::new(
                "i-1",
                ResourceKind::Instance,
                [("lifetime", "2d")].into_iter().collect(),
            )],
            instance_states: [("i-1".to_string(), InstanceState::Pending)]
                .into_iter()
                .collect(),
            default_network_acls: vec!["acl-1".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_string(&inventory).unwrap();
        let back: Inventory = serde_json::from_str(&json).unwrap();
        let provider = MemoryProvider::from_inventory(back);

        assert!(provider
            .is_default_network_acl(&ResourceId::new("acl-1"))
            .unwrap());
        assert_eq!(
            provider.instance_state(&ResourceId::new("i-1")).unwrap(),
            Some(InstanceState::Pending)
        );
    }
}

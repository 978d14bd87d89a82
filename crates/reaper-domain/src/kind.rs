//! ResourceKind module - the closed set of managed resource types

use serde::{Deserialize, Serialize};

/// Kind of a managed cloud resource
///
/// Every resource the reaper touches is one of these. Operations dispatch on
/// the kind with an exhaustive `match`, so adding a variant forces every
/// call site to decide how to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Compute instance (the only kind with a stop remediation)
    Instance,

    /// Elastic network interface
    NetworkInterface,

    /// Subnet
    Subnet,

    /// Route table (associations are cleaned up before deletion)
    RouteTable,

    /// Network ACL (the VPC default is never deleted)
    NetworkAcl,

    /// Security group
    SecurityGroup,

    /// Internet gateway (detached from every VPC before deletion)
    InternetGateway,

    /// VPC
    Vpc,

    /// Classic load balancer (identified by name)
    LoadBalancer,

    /// V2 load balancer (identified by ARN; deletion is waited on)
    LoadBalancerV2,

    /// Target group (identified by ARN)
    TargetGroup,

    /// Block storage volume
    Volume,

    /// Volume snapshot
    Snapshot,
}

/// Sweep order that keeps dependent deletions safe: load balancers before
/// the target groups registered to them, instances before the network
/// plumbing they hold references into, and VPC-scoped resources before the
/// VPC itself. The sweep engine does not infer this order; callers supply
/// it (or use this default).
pub const DEFAULT_SWEEP_ORDER: [ResourceKind; 13] = [
    ResourceKind::LoadBalancer,
    ResourceKind::LoadBalancerV2,
    ResourceKind::TargetGroup,
    ResourceKind::Instance,
    ResourceKind::InternetGateway,
    ResourceKind::RouteTable,
    ResourceKind::NetworkAcl,
    ResourceKind::NetworkInterface,
    ResourceKind::Subnet,
    ResourceKind::SecurityGroup,
    ResourceKind::Vpc,
    ResourceKind::Volume,
    ResourceKind::Snapshot,
];

impl ResourceKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Instance => "instance",
            ResourceKind::NetworkInterface => "network-interface",
            ResourceKind::Subnet => "subnet",
            ResourceKind::RouteTable => "route-table",
            ResourceKind::NetworkAcl => "network-acl",
            ResourceKind::SecurityGroup => "security-group",
            ResourceKind::InternetGateway => "internet-gateway",
            ResourceKind::Vpc => "vpc",
            ResourceKind::LoadBalancer => "load-balancer",
            ResourceKind::LoadBalancerV2 => "load-balancer-v2",
            ResourceKind::TargetGroup => "target-group",
            ResourceKind::Volume => "volume",
            ResourceKind::Snapshot => "snapshot",
        }
    }

    /// Parse a kind from a string (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "instance" => Some(ResourceKind::Instance),
            "network-interface" => Some(ResourceKind::NetworkInterface),
            "subnet" => Some(ResourceKind::Subnet),
            "route-table" => Some(ResourceKind::RouteTable),
            "network-acl" => Some(ResourceKind::NetworkAcl),
            "security-group" => Some(ResourceKind::SecurityGroup),
            "internet-gateway" => Some(ResourceKind::InternetGateway),
            "vpc" => Some(ResourceKind::Vpc),
            "load-balancer" => Some(ResourceKind::LoadBalancer),
            "load-balancer-v2" => Some(ResourceKind::LoadBalancerV2),
            "target-group" => Some(ResourceKind::TargetGroup),
            "volume" => Some(ResourceKind::Volume),
            "snapshot" => Some(ResourceKind::Snapshot),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid resource kind: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in DEFAULT_SWEEP_ORDER {
            assert_eq!(ResourceKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ResourceKind::parse("lambda"), None);
    }

    #[test]
    fn test_default_order_children_after_parents() {
        let pos = |kind| {
            DEFAULT_SWEEP_ORDER
                .iter()
                .position(|k| *k == kind)
                .unwrap()
        };
        // Target groups are evaluated after the load balancers they serve,
        // and every VPC-scoped kind before the VPC itself.
        assert!(pos(ResourceKind::LoadBalancerV2) < pos(ResourceKind::TargetGroup));
        assert!(pos(ResourceKind::RouteTable) < pos(ResourceKind::Vpc));
        assert!(pos(ResourceKind::Subnet) < pos(ResourceKind::Vpc));
        assert!(pos(ResourceKind::InternetGateway) < pos(ResourceKind::Vpc));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&ResourceKind::InternetGateway).unwrap();
        assert_eq!(json, "\"internet-gateway\"");
        let kind: ResourceKind = serde_json::from_str("\"route-table\"").unwrap();
        assert_eq!(kind, ResourceKind::RouteTable);
    }
}

//! Resource module - managed entities and their tag sets

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};

/// Provider-assigned resource identifier
///
/// Opaque to the reaper: an instance id, a network interface id, a load
/// balancer name, or an ARN, depending on the kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    /// Create an id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single key/value tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key
    pub key: String,
    /// Tag value
    pub value: String,
}

/// A resource's tag set
///
/// Keys are unique in practice but the set is stored as the provider returns
/// it: an ordered list scanned front to back. A missing tag is an expected,
/// first-class outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(pub Vec<Tag>);

impl TagSet {
    /// Empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tag value by key
    ///
    /// Linear scan; the first matching key wins. Returns `None` for an empty
    /// set or when no key matches.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    /// Insert or replace a tag (idempotent upsert)
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|tag| tag.key == key) {
            Some(tag) => tag.value = value,
            None => self.0.push(Tag { key, value }),
        }
    }

    /// Whether the set has no tags
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| Tag {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        )
    }
}

/// A managed cloud resource
///
/// The provider owns the canonical resource; the reaper only reads and
/// mutates its tag set and issues delete/stop commands. Nothing is persisted
/// between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Provider-assigned identifier
    pub id: ResourceId,

    /// Resource kind
    pub kind: ResourceKind,

    /// Current tag set as last observed
    #[serde(default)]
    pub tags: TagSet,
}

impl Resource {
    /// Create a resource with the given tags
    pub fn new(id: impl Into<String>, kind: ResourceKind, tags: TagSet) -> Self {
        Self {
            id: ResourceId::new(id),
            kind,
            tags,
        }
    }

    /// Create a resource with no tags
    pub fn untagged(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self::new(id, kind, TagSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_from_empty_set() {
        let tags = TagSet::new();
        assert_eq!(tags.get("termination_date"), None);
    }

    #[test]
    fn test_get_absent_when_no_key_matches() {
        let tags: TagSet = [("Name", "build-agent")].into_iter().collect();
        assert_eq!(tags.get("termination_date"), None);
    }

    #[test]
    fn test_get_returns_first_match() {
        let tags: TagSet = [
            ("Name", "build-agent"),
            ("lifetime", "2d"),
            ("lifetime", "9w"),
        ]
        .into_iter()
        .collect();
        assert_eq!(tags.get("lifetime"), Some("2d"));
    }

    #[test]
    fn test_upsert_replaces_existing_key() {
        let mut tags: TagSet = [("lifetime", "2d")].into_iter().collect();
        tags.upsert("lifetime", "3h");
        tags.upsert("termination_date", "indefinite");
        assert_eq!(tags.get("lifetime"), Some("3h"));
        assert_eq!(tags.get("termination_date"), Some("indefinite"));
        assert_eq!(tags.0.len(), 2);
    }

    #[test]
    fn test_resource_serde_round_trip() {
        let resource = Resource::new(
            "i-0abc123",
            ResourceKind::Instance,
            [("lifetime", "1w")].into_iter().collect(),
        );
        let json = serde_json::to_string(&resource).unwrap();
        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(resource, back);
    }
}

//! Status line formatting for the notification log sink
//!
//! The reaper emits one line per non-empty outcome list, per kind, using a
//! fixed vocabulary. A downstream notifier classifies severity by substring:
//! `STOPPED` marks an elevated alert and `FOUND` marks a missing-tag warning,
//! so the exact wording here is load-bearing.

use crate::outcome::KindOutcome;
use reaper_domain::{ResourceId, ResourceKind};

fn id_list(ids: &[ResourceId]) -> String {
    let raw: Vec<&str> = ids.iter().map(ResourceId::as_str).collect();
    format!("{:?}", raw)
}

/// Line for resources terminated live due to expired tags
pub fn terminated_line(kind: ResourceKind, ids: &[ResourceId]) -> String {
    format!(
        "REAPER TERMINATED {}s with ids {} due to expired termination_date tags",
        kind,
        id_list(ids)
    )
}

/// Dry-run variant of [`terminated_line`]
pub fn noop_terminated_line(kind: ResourceKind, ids: &[ResourceId]) -> String {
    format!(
        "REAPER NOOP: Would have terminated {}s with ids {} due to expired termination_date tags",
        kind,
        id_list(ids)
    )
}

/// Line for instances stopped live over missing tags
pub fn stopped_line(kind: ResourceKind, ids: &[ResourceId]) -> String {
    format!(
        "REAPER STOPPED {}s with ids {} due to missing or unparsable termination_date tag",
        kind,
        id_list(ids)
    )
}

/// Dry-run variant of [`stopped_line`]
pub fn noop_stopped_line(kind: ResourceKind, ids: &[ResourceId]) -> String {
    format!(
        "REAPER NOOP: Would have stopped {}s with ids {} due to missing or unparsable termination_date tag",
        kind,
        id_list(ids)
    )
}

/// Line reporting resources that are missing termination_date tags
pub fn improper_tags_line(kind: ResourceKind, ids: &[ResourceId]) -> String {
    format!(
        "REAPER FOUND {}s with ids {} are missing termination_date tags!",
        kind,
        id_list(ids)
    )
}

/// Emit the status lines for one kind's outcome to the log sink
pub fn emit(kind: ResourceKind, outcome: &KindOutcome, live_mode: bool) {
    if !outcome.deleted.is_empty() {
        if live_mode {
            tracing::info!("{}", terminated_line(kind, &outcome.deleted));
        } else {
            tracing::info!("{}", noop_terminated_line(kind, &outcome.deleted));
        }
    }
    if !outcome.improperly_tagged.is_empty() {
        tracing::warn!("{}", improper_tags_line(kind, &outcome.improperly_tagged));
    }
    if !outcome.stopped.is_empty() {
        if live_mode {
            tracing::warn!("{}", stopped_line(kind, &outcome.stopped));
        } else {
            tracing::warn!("{}", noop_stopped_line(kind, &outcome.stopped));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ResourceId> {
        raw.iter().map(|id| ResourceId::new(*id)).collect()
    }

    #[test]
    fn test_live_lines_carry_severity_keywords() {
        let line = terminated_line(ResourceKind::Instance, &ids(&["i-1"]));
        assert_eq!(
            line,
            "REAPER TERMINATED instances with ids [\"i-1\"] due to expired termination_date tags"
        );

        let line = stopped_line(ResourceKind::Instance, &ids(&["i-2"]));
        assert!(line.contains("STOPPED"));

        let line = improper_tags_line(ResourceKind::Subnet, &ids(&["subnet-1"]));
        assert!(line.contains("FOUND"));
    }

    #[test]
    fn test_noop_lines_use_would_have_phrasing() {
        let line = noop_stopped_line(ResourceKind::Instance, &ids(&["i-1"]));
        assert!(line.starts_with("REAPER NOOP: Would have stopped"));
        // A dry-run line must not trip the elevated-severity substring.
        assert!(!line.contains("STOPPED"));

        let line = noop_terminated_line(ResourceKind::Volume, &ids(&["vol-1"]));
        assert!(line.starts_with("REAPER NOOP: Would have terminated"));
    }
}

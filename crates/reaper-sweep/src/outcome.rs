//! Outcome tracking for sweep runs

use reaper_domain::{ResourceId, ResourceKind};

/// Per-kind outcome of one sweep pass
///
/// Three disjoint id lists. In dry-run mode the lists are populated exactly
/// as they would be live; only the provider calls are withheld.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindOutcome {
    /// Resources whose expired `termination_date` led to deletion
    pub deleted: Vec<ResourceId>,

    /// Instances stopped for having no `termination_date` at all
    pub stopped: Vec<ResourceId>,

    /// Resources missing a `termination_date` tag
    pub improperly_tagged: Vec<ResourceId>,
}

impl KindOutcome {
    /// Whether nothing at all was recorded for this kind
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.stopped.is_empty() && self.improperly_tagged.is_empty()
    }
}

/// Run-wide aggregate of one sweep invocation
///
/// Created fresh each sweep, logged, then discarded - never persisted.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    kinds: Vec<(ResourceKind, KindOutcome)>,
}

impl RunOutcome {
    /// Empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one kind, preserving sweep order
    pub fn record(&mut self, kind: ResourceKind, outcome: KindOutcome) {
        self.kinds.push((kind, outcome));
    }

    /// Outcome for a specific kind, if that kind was swept
    pub fn for_kind(&self, kind: ResourceKind) -> Option<&KindOutcome> {
        self.kinds
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    /// Per-kind outcomes in sweep order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &KindOutcome)> {
        self.kinds.iter().map(|(kind, outcome)| (*kind, outcome))
    }

    /// Total resources deleted across all kinds
    pub fn total_deleted(&self) -> usize {
        self.kinds.iter().map(|(_, o)| o.deleted.len()).sum()
    }

    /// Total instances stopped across all kinds
    pub fn total_stopped(&self) -> usize {
        self.kinds.iter().map(|(_, o)| o.stopped.len()).sum()
    }

    /// Total resources reported as improperly tagged
    pub fn total_improperly_tagged(&self) -> usize {
        self.kinds.iter().map(|(_, o)| o.improperly_tagged.len()).sum()
    }

    /// Human-readable run summary
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Sweep summary: {} deleted, {} stopped, {} improperly tagged",
            self.total_deleted(),
            self.total_stopped(),
            self.total_improperly_tagged()
        )];
        for (kind, outcome) in &self.kinds {
            if outcome.is_empty() {
                continue;
            }
            lines.push(format!(
                "  {}: {} deleted, {} stopped, {} improperly tagged",
                kind,
                outcome.deleted.len(),
                outcome.stopped.len(),
                outcome.improperly_tagged.len()
            ));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ResourceId> {
        raw.iter().map(|id| ResourceId::new(*id)).collect()
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = KindOutcome::default();
        assert!(outcome.is_empty());

        let run = RunOutcome::new();
        assert_eq!(run.total_deleted(), 0);
        assert_eq!(run.for_kind(ResourceKind::Instance), None);
    }

    #[test]
    fn test_totals_across_kinds() {
        let mut run = RunOutcome::new();
        run.record(
            ResourceKind::Instance,
            KindOutcome {
                deleted: ids(&["i-1"]),
                stopped: ids(&["i-2", "i-3"]),
                improperly_tagged: ids(&["i-2", "i-3"]),
            },
        );
        run.record(
            ResourceKind::Volume,
            KindOutcome {
                deleted: ids(&["vol-1", "vol-2"]),
                ..Default::default()
            },
        );

        assert_eq!(run.total_deleted(), 3);
        assert_eq!(run.total_stopped(), 2);
        assert_eq!(run.total_improperly_tagged(), 2);
        assert_eq!(
            run.for_kind(ResourceKind::Volume).unwrap().deleted,
            ids(&["vol-1", "vol-2"])
        );
    }

    #[test]
    fn test_summary_skips_empty_kinds() {
        let mut run = RunOutcome::new();
        run.record(ResourceKind::Subnet, KindOutcome::default());
        run.record(
            ResourceKind::Instance,
            KindOutcome {
                deleted: ids(&["i-1"]),
                ..Default::default()
            },
        );

        let summary = run.summary();
        assert!(summary.contains("instance: 1 deleted"));
        assert!(!summary.contains("subnet"));
    }
}

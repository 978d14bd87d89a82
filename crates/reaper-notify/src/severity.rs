//! Severity classification by substring match
//!
//! The log vocabulary is a contract with the emitting loops: `STOPPED` only
//! appears when a live remediation ran, and `FOUND` only in the missing-tag
//! report. Everything else is informational.

/// Severity of one reaper log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A live stop happened over a missing tag - the loudest alert
    Elevated,

    /// Resources were found missing their expiration tags
    Warning,

    /// Routine decision reporting
    Info,
}

/// Classify one log line
pub fn classify(line: &str) -> Severity {
    if line.contains("STOPPED") {
        Severity::Elevated
    } else if line.contains("FOUND") {
        Severity::Warning
    } else {
        Severity::Info
    }
}

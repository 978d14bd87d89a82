//! Chat message construction

use crate::severity::{classify, Severity};
use serde::{Deserialize, Serialize};

/// Attachment colors, matching the chat client's alert palette
const RED: &str = "#ff0000";
const GREEN: &str = "#33cc33";
const YELLOW: &str = "#ffff00";
const ORANGE: &str = "#ff7f50";

/// Which loop emitted the line being forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    /// The periodic sweep reaper
    Reaper,

    /// The reactive terminator/enforcer path
    Terminator,
}

/// One structured chat message
///
/// Shaped like a chat webhook attachment: color carries the severity,
/// pretext identifies the account, author the region, text the raw log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Attachment color derived from severity and source
    pub color: String,

    /// Account label shown above the message
    pub pretext: String,

    /// Region the run executed in
    pub author_name: String,

    /// The log line itself, verbatim
    pub text: String,
}

/// Builds chat messages for a fixed account and region
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    account: String,
    region: String,
}

impl MessageBuilder {
    /// Create a builder for one account/region pair
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }

    /// Color for a line given its severity and origin
    ///
    /// Elevated lines are red and missing-tag reports orange regardless of
    /// origin; otherwise terminator lines are green and reaper lines yellow.
    pub fn color(line: &str, source: MessageSource) -> &'static str {
        match classify(line) {
            Severity::Elevated => RED,
            Severity::Warning => ORANGE,
            Severity::Info => match source {
                MessageSource::Terminator => GREEN,
                MessageSource::Reaper => YELLOW,
            },
        }
    }

    /// Build the message for one log line
    pub fn build(&self, line: &str, source: MessageSource) -> ChatMessage {
        ChatMessage {
            color: Self::color(line, source).to_string(),
            pretext: self.account.clone(),
            author_name: self.region.clone(),
            text: line.to_string(),
        }
    }

    /// Build messages for a batch of log lines from one source
    pub fn build_batch<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
        source: MessageSource,
    ) -> Vec<ChatMessage> {
        lines
            .into_iter()
            .map(|line| self.build(line, source))
            .collect()
    }
}

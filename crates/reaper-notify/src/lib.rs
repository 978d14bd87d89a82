//! Reaper Notify
//!
//! Downstream classification of the reaper's log lines into chat messages.
//!
//! The sweep and enforcer loops write one status line per significant
//! decision using a fixed vocabulary. This crate is the consumer side of that
//! contract: it classifies each line's severity by substring match and builds
//! a structured chat message (attachment color, account pretext, region,
//! text). Actual webhook delivery lives behind [`NotificationSink`] and is
//! supplied by the deployment, not this crate.

#![warn(missing_docs)]

mod message;
mod severity;

pub use message::{ChatMessage, MessageBuilder, MessageSource};
pub use severity::{classify, Severity};

/// Destination for built chat messages
///
/// Implementations deliver to a chat webhook, a queue, or (in tests) a
/// buffer. Delivery transport is out of scope for this crate.
pub trait NotificationSink {
    /// Error type for delivery failures
    type Error;

    /// Deliver one message
    fn post(&mut self, message: &ChatMessage) -> Result<(), Self::Error>;
}

/// Sink that buffers messages in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Vec<ChatMessage>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages posted so far, in order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl NotificationSink for MemorySink {
    type Error = std::convert::Infallible;

    fn post(&mut self, message: &ChatMessage) -> Result<(), Self::Error> {
        self.messages.push(message.clone());
        Ok(())
    }
}

//! Rotating status messages shown while a reply is pending.

use std::time::Duration;

/// Cycles through a list of messages on a fixed cadence.
///
/// The ticker holds no timer of its own; the owning event loop calls
/// [`MessageTicker::advance`] with the elapsed time since the previous
/// call. Dropping the event loop is therefore the cancellation path.
#[derive(Debug, Clone)]
pub struct MessageTicker {
    messages: Vec<String>,
    interval: Duration,
    active: bool,
    index: usize,
    elapsed: Duration,
}

impl MessageTicker {
    pub fn new(messages: Vec<String>, interval: Duration) -> Self {
        Self {
            messages,
            interval,
            active: false,
            index: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// The message currently on display. Empty when there is nothing to
    /// rotate.
    pub fn current(&self) -> &str {
        self.messages
            .get(self.index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// An activation change in either direction restarts the rotation from
    /// the first message. While inactive, [`MessageTicker::advance`] is a
    /// no-op, so the rotation is suspended.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.index = 0;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Replace the rotation set, restarting from the first entry.
    pub fn set_messages(&mut self, messages: Vec<String>) {
        self.messages = messages;
        self.index = 0;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the rotation clock, stepping the index once per full
    /// interval. An empty list or a zero interval means no rotation.
    pub fn advance(&mut self, delta: Duration) {
        if !self.active || self.messages.is_empty() || self.interval.is_zero() {
            return;
        }
        self.elapsed += delta;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.index = (self.index + 1) % self.messages.len();
        }
    }
}

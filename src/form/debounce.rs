//! Single-slot change debouncer.
//!
//! Holds at most one pending change. Every submit replaces the pending change
//! and pushes the deadline out by the full window, whichever setting it
//! belongs to, so a burst of edits across several fields commits only the
//! last one.

use crate::plugin::descriptor::SettingValue;
use std::time::{Duration, Instant};

/// A coerced edit waiting for the quiet period to elapse.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub key: String,
    pub value: SettingValue,
}

/// Debounce state: `{pending key, pending value, deadline}`.
#[derive(Debug)]
pub struct ChangeDebouncer {
    window: Duration,
    pending: Option<PendingChange>,
    deadline: Option<Instant>,
}

impl ChangeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Arm the timer with `change`. Returns the change it superseded, if any.
    pub fn submit(&mut self, change: PendingChange, now: Instant) -> Option<PendingChange> {
        let superseded = self.pending.replace(change);
        self.deadline = Some(now + self.window);
        superseded
    }

    /// Take the pending change if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<PendingChange> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Drop the pending change without committing it.
    pub fn cancel(&mut self) -> Option<PendingChange> {
        self.deadline = None;
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending change fires.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

impl Default for ChangeDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

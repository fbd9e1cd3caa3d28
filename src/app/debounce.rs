//! Cancellable debounce timer on top of Zellij's one-shot host timers.
//!
//! `set_timeout` cannot be cancelled, so every arm hands out a ticket and the
//! debouncer remembers which ticket is current. All timers share
//! [`SEARCH_DEBOUNCE_SECS`], so the host fires them in arming order and each
//! `Timer` event can be matched to the oldest outstanding ticket.

use std::collections::VecDeque;

/// Delay between the last keystroke and the committed search.
pub const SEARCH_DEBOUNCE_SECS: f64 = 0.8;

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// At most one pending ticket; older ones are cancelled by re-arming.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    next: u64,
    pending: Option<Ticket>,
    outstanding: VecDeque<Ticket>,
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer, superseding any pending one.
    ///
    /// The caller must schedule exactly one host timer per call.
    pub fn arm(&mut self) -> Ticket {
        self.next += 1;
        let ticket = Ticket(self.next);
        if let Some(previous) = self.pending.replace(ticket) {
            tracing::trace!(previous = previous.0, "debounce superseded");
        }
        self.outstanding.push_back(ticket);
        ticket
    }

    /// Drops the pending ticket. Host timers already scheduled still fire and
    /// are absorbed by [`Self::elapsed`].
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consumes the oldest host timer; `true` when it is the pending one.
    pub fn elapsed(&mut self) -> bool {
        let Some(fired) = self.outstanding.pop_front() else {
            return false;
        };
        if self.pending == Some(fired) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_arm_wins() {
        let mut debouncer = Debouncer::new();
        debouncer.arm();
        debouncer.arm();
        debouncer.arm();

        assert!(!debouncer.elapsed());
        assert!(!debouncer.elapsed());
        assert!(debouncer.is_pending());
        assert!(debouncer.elapsed());
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut debouncer = Debouncer::new();
        debouncer.arm();
        debouncer.cancel();
        assert!(!debouncer.elapsed());
    }

    #[test]
    fn stray_timer_is_ignored() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.elapsed());
        let first = debouncer.arm();
        let second = debouncer.arm();
        assert_ne!(first, second);
    }
}

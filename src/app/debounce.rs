// MainStreet - app/debounce.rs
//
// Trailing-edge debounce timer for the search boxes. Each keystroke
// re-schedules the deadline; only the last keystroke in a burst fires.
// Time is passed in explicitly so the frame loop and the tests drive the
// same code path.

use std::time::{Duration, Instant};

/// A single pending-or-idle debounce slot.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start (or restart) the window. A pending deadline is replaced, so
    /// bursts of calls collapse into one trailing fire.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check the deadline. Returns true exactly once per schedule, when
    /// the window has fully elapsed; the slot then goes idle.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending deadline, if any. The frame loop uses
    /// this to request a wakeup instead of polling every frame.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Change the window for future schedules. A pending deadline keeps
    /// the delay it was scheduled with.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

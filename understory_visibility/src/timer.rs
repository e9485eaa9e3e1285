// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A repeating timer driven by host-supplied timestamps.
//!
//! ## Usage
//!
//! 1) Call [`IntervalTimer::start`] with the current time and a period.
//! 2) From the host event loop, call [`IntervalTimer::poll`] with the current
//!    time; it returns `true` when a tick is due.
//! 3) Call [`IntervalTimer::stop`] to cancel. A stopped timer never fires.
//!
//! Timestamps are milliseconds on any monotonic clock the host chooses.
//!
//! ```
//! use understory_visibility::IntervalTimer;
//!
//! let mut timer = IntervalTimer::new();
//! timer.start(0, 100);
//! assert!(!timer.poll(99));
//! assert!(timer.poll(100));
//! assert!(!timer.poll(150));
//! assert!(timer.poll(200));
//!
//! timer.stop();
//! assert!(!timer.poll(1_000));
//! ```

/// A cancellable repeating timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    next_due: Option<u64>,
    period: u64,
}

impl IntervalTimer {
    /// Creates a stopped timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_due: None,
            period: 0,
        }
    }

    /// Starts the timer so that it first fires `period` ms after `now`.
    ///
    /// Has no effect while the timer is already running. A zero period is
    /// treated as one millisecond.
    pub fn start(&mut self, now: u64, period: u64) {
        if self.next_due.is_some() {
            return;
        }
        self.period = period.max(1);
        self.next_due = Some(now.saturating_add(self.period));
    }

    /// Cancels the timer. Safe to call when it is not running.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns `true` while the timer is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns the time at which the next tick is due, if running.
    #[must_use]
    pub const fn next_due(&self) -> Option<u64> {
        self.next_due
    }

    /// Returns the period the timer was last started with.
    #[must_use]
    pub const fn period(&self) -> u64 {
        self.period
    }

    /// Reports whether a tick is due at `now`, advancing the schedule if so.
    ///
    /// At most one tick fires per call. When the host has fallen more than a
    /// full period behind, the missed ticks are dropped and the next tick is
    /// scheduled one period after `now`.
    pub fn poll(&mut self, now: u64) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due.saturating_add(self.period);
        self.next_due = Some(if next <= now {
            now.saturating_add(self.period)
        } else {
            next
        });
        true
    }
}

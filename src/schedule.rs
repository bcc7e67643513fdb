//! Extraction scheduling: readiness polling and mutation debounce.
//!
//! The content root may not exist when the panel mounts (the host loads it
//! asynchronously), so the first extraction is armed behind an initial delay
//! and then retried on a fixed schedule until the root shows up. Structural
//! mutations re-arm extraction behind a settle delay so the new subtree
//! finishes growing before it is re-scanned. Teardown cancels everything; a
//! torn-down scheduler never fires again.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    /// A (re-)extraction is due at the embedded deadline.
    Due(Instant),
    /// Nothing pending until the next mutation signal.
    Idle,
    /// Torn down; permanently inert.
    Dead,
}

/// Drives when the extractor runs.
///
/// The scheduler holds no reference to the tree or the extractor; the owner
/// polls it each tick and performs the extraction itself when told to. That
/// keeps the ordering guarantee trivial: extraction completes fully before
/// anything downstream re-subscribes.
pub struct ExtractScheduler {
    phase: Phase,
    retry_delay: Duration,
    settle_delay: Duration,
}

impl ExtractScheduler {
    #[must_use]
    /// Arms the first extraction `initial_delay` after `now`.
    pub fn new(
        now: Instant,
        initial_delay: Duration,
        retry_delay: Duration,
        settle_delay: Duration,
    ) -> Self {
        Self {
            phase: Phase::Due(now + initial_delay),
            retry_delay,
            settle_delay,
        }
    }

    /// Records a subtree-changed signal, re-arming extraction behind the
    /// settle delay. Later signals push the deadline out again.
    pub fn note_mutation(&mut self, now: Instant) {
        if self.phase != Phase::Dead {
            self.phase = Phase::Due(now + self.settle_delay);
        }
    }

    /// Returns true when an extraction should run right now.
    ///
    /// If the deadline has passed but the root is absent, the deadline slides
    /// forward by the retry delay; polling continues indefinitely while the
    /// owner stays mounted.
    pub fn poll(&mut self, now: Instant, root_present: bool) -> bool {
        let Phase::Due(deadline) = self.phase else {
            return false;
        };
        if now < deadline {
            return false;
        }
        if root_present {
            self.phase = Phase::Idle;
            true
        } else {
            self.phase = Phase::Due(now + self.retry_delay);
            false
        }
    }

    /// Cancels all pending work permanently.
    pub fn teardown(&mut self) {
        self.phase = Phase::Dead;
    }

    #[must_use]
    /// Whether the scheduler has been torn down.
    pub fn is_dead(&self) -> bool {
        self.phase == Phase::Dead
    }
}

#[cfg(test)]
#[path = "tests/schedule.rs"]
mod tests;

//! Smoothly animated scroll toward a navigation target.
//!
//! Navigation does not jump: the host samples the animation every tick and
//! applies the returned position to its scroll state. Ease-out cubic keeps
//! the motion fast off the mark and gentle on arrival.

use std::time::{Duration, Instant};

/// Time-based scroll animation from one offset to another.
pub struct SmoothScroll {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl SmoothScroll {
    #[must_use]
    /// Starts an animation at `now`.
    pub fn new(from: f32, to: f32, now: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start: now,
            duration,
        }
    }

    #[must_use]
    /// Scroll position at `now`. Clamped to the target once the duration has
    /// elapsed (or when the duration is zero).
    pub fn sample(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }

    #[must_use]
    /// Whether the animation has reached its target.
    pub fn done(&self, now: Instant) -> bool {
        self.duration.is_zero() || now.saturating_duration_since(self.start) >= self.duration
    }

    #[must_use]
    /// The final scroll offset.
    pub fn target(&self) -> f32 {
        self.to
    }
}

#[cfg(test)]
#[path = "tests/scroll.rs"]
mod tests;

//! Engine composition: extractor scheduling, tracking, panel, navigation.
//!
//! One `TocEngine` instance lives per mounted panel. All state is single
//! writer: the host pumps the engine from its event loop, so extraction
//! always completes (and the tracker fully re-subscribes) before anything
//! downstream can observe a partial outline.

use crate::content::ContentTree;
use crate::outline::{self, Outline};
use crate::panel::{reading_progress, Panel, Point};
use crate::schedule::ExtractScheduler;
use crate::scroll::SmoothScroll;
use crate::tracker::{ActiveTracker, Band};
use crate::watch::{AnchorLookup, VisibilityWatcher};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Delay tuning for extraction scheduling and navigation animation.
pub struct Timing {
    /// Delay before the very first extraction attempt.
    pub initial_delay: Duration,
    /// Re-poll interval while the content root is absent.
    pub retry_delay: Duration,
    /// Settle time between a subtree mutation and the re-extraction.
    pub settle_delay: Duration,
    /// Duration of the smooth scroll triggered by navigation.
    pub scroll_duration: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            retry_delay: Duration::from_millis(500),
            settle_delay: Duration::from_millis(300),
            scroll_duration: Duration::from_millis(400),
        }
    }
}

/// The table-of-contents engine: outline, active entry, panel.
pub struct TocEngine {
    /// Floating panel state machine; the host reads the position and feeds
    /// pointer events back in.
    pub panel: Panel,
    outline: Outline,
    tracker: ActiveTracker,
    scheduler: ExtractScheduler,
    anim: Option<SmoothScroll>,
    scroll_offset: f32,
    scroll_duration: Duration,
    torn_down: bool,
}

impl TocEngine {
    #[must_use]
    /// Creates an engine whose first extraction is armed at `now`.
    ///
    /// `scroll_offset` is the fixed upward offset applied to navigation
    /// targets so the heading lands below the host's fixed header.
    pub fn new(now: Instant, band: Band, timing: Timing, scroll_offset: f32, panel_at: Point) -> Self {
        Self {
            panel: Panel::new(panel_at),
            outline: Outline::new(),
            tracker: ActiveTracker::new(band),
            scheduler: ExtractScheduler::new(
                now,
                timing.initial_delay,
                timing.retry_delay,
                timing.settle_delay,
            ),
            anim: None,
            scroll_offset,
            scroll_duration: timing.scroll_duration,
            torn_down: false,
        }
    }

    /// Advances extraction scheduling, re-extracting if due.
    ///
    /// `root` is the content tree when present, `mutated` a consumed
    /// subtree-changed signal from the host's tree watcher. Returns true when
    /// a fresh outline replaced the previous one (the watcher has already
    /// been re-subscribed by then).
    pub fn pump_extraction<W: VisibilityWatcher>(
        &mut self,
        now: Instant,
        root: Option<&mut ContentTree>,
        mutated: bool,
        watcher: &mut W,
    ) -> bool {
        if self.torn_down {
            return false;
        }
        if mutated {
            self.scheduler.note_mutation(now);
        }
        match root {
            Some(tree) if self.scheduler.poll(now, true) => {
                self.outline = outline::extract(tree);
                self.tracker.observe(&self.outline, watcher);
                true
            }
            Some(_) => false,
            None => {
                self.scheduler.poll(now, false);
                false
            }
        }
    }

    /// Recomputes the active entry from the watcher's current sightings.
    pub fn evaluate<W: VisibilityWatcher>(&mut self, watcher: &W, viewport_height: f32) {
        if self.torn_down {
            return;
        }
        self.tracker.evaluate(watcher, viewport_height);
    }

    /// Navigates to an outline entry.
    ///
    /// A target that does not resolve is a silent no-op. Otherwise the active
    /// entry updates synchronously (the highlight must not lag the click) and
    /// a smooth scroll starts toward the target's top minus the configured
    /// header offset.
    pub fn navigate<L: AnchorLookup>(
        &mut self,
        id: &str,
        lookup: &L,
        current_scroll: f32,
        now: Instant,
    ) {
        if self.torn_down {
            return;
        }
        let Some(top) = lookup.document_top(id) else {
            return;
        };
        let target = (top - self.scroll_offset).max(0.0);
        self.anim = Some(SmoothScroll::new(
            current_scroll,
            target,
            now,
            self.scroll_duration,
        ));
        self.tracker.set_active(id);
    }

    /// Samples the in-flight scroll animation, dropping it once settled.
    /// `None` while no navigation is animating.
    pub fn scroll_position(&mut self, now: Instant) -> Option<f32> {
        let anim = self.anim.as_ref()?;
        let position = anim.sample(now);
        if anim.done(now) {
            self.anim = None;
        }
        Some(position)
    }

    /// Drops any in-flight navigation animation. Manual scrolling calls this
    /// so the user's wheel always beats the animation.
    pub fn interrupt_scroll(&mut self) {
        self.anim = None;
    }

    #[must_use]
    /// The current outline snapshot, read-only.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    #[must_use]
    /// Identifier of the entry currently considered in view.
    pub fn active(&self) -> Option<&str> {
        self.tracker.active()
    }

    #[must_use]
    /// Reading progress percentage derived from outline and active entry.
    pub fn progress(&self) -> u8 {
        reading_progress(&self.outline, self.tracker.active())
    }

    /// Releases every scheduled retry and observation.
    ///
    /// Matches the mount: each timer and subscription acquired while running
    /// has its cancellation here. After teardown the engine ignores pumps,
    /// evaluations and navigation for good.
    pub fn teardown<W: VisibilityWatcher>(&mut self, watcher: &mut W) {
        self.scheduler.teardown();
        watcher.disconnect();
        self.panel.end_drag();
        self.anim = None;
        self.torn_down = true;
    }

    #[must_use]
    /// Whether the engine has been torn down.
    pub fn torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
#[path = "tests/engine.rs"]
mod tests;

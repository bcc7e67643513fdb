//! Active-section tracking over a visibility band.
//!
//! A heading counts as "in view" once its top edge sits inside an asymmetric
//! band near the top of the viewport: below a fixed offset from the top,
//! above a fraction of the viewport height. When several headings sit in the
//! band at once the topmost one wins. When none do, the previous active entry
//! stands, which is also what lets a click-driven override survive until
//! scrolling settles.

use crate::outline::OutlineEntry;
use crate::watch::VisibilityWatcher;

#[derive(Clone, Copy, PartialEq, Debug)]
/// The vertical viewport region used to decide which heading is in view.
///
/// The margins are tuning parameters, not correctness requirements; the
/// defaults reproduce the band the original panel shipped with (100 units
/// down from the top of the viewport, 34% of the viewport height as the
/// lower edge).
pub struct Band {
    /// Distance from the viewport top to the band's upper edge.
    pub top_offset: f32,
    /// Fraction of the viewport height at which the band ends.
    pub bottom_ratio: f32,
}

impl Default for Band {
    fn default() -> Self {
        Self {
            top_offset: 100.0,
            bottom_ratio: 0.34,
        }
    }
}

impl Band {
    #[must_use]
    /// Whether a viewport-relative top coordinate falls inside the band.
    pub fn contains(&self, top: f32, viewport_height: f32) -> bool {
        top >= self.top_offset && top <= viewport_height * self.bottom_ratio
    }
}

/// Maintains which outline entry is currently considered in view.
pub struct ActiveTracker {
    band: Band,
    active: Option<String>,
    observed: Vec<String>,
}

impl ActiveTracker {
    #[must_use]
    /// Creates a tracker with the given visibility band and no active entry.
    pub fn new(band: Band) -> Self {
        Self {
            band,
            active: None,
            observed: Vec::new(),
        }
    }

    /// Re-subscribes the watcher to a fresh outline.
    ///
    /// All prior observations are dropped wholesale; entries whose elements
    /// cannot be found are the watcher's problem to skip, not ours to report.
    /// The active entry is deliberately left alone so a surviving heading
    /// stays highlighted across a re-extraction.
    pub fn observe<W: VisibilityWatcher>(&mut self, outline: &[OutlineEntry], watcher: &mut W) {
        watcher.disconnect();
        self.observed = outline.iter().map(|e| e.id.clone()).collect();
        watcher.observe(&self.observed);
    }

    /// Recomputes the active entry from current sightings.
    ///
    /// Entries inside the band compete on their top coordinate, smallest
    /// winning. No entry in the band leaves the active id unchanged, which is
    /// what gives a manual override its precedence until the next scroll
    /// brings a heading into the band.
    pub fn evaluate<W: VisibilityWatcher>(&mut self, watcher: &W, viewport_height: f32) {
        let mut best: Option<(String, f32)> = None;
        for sighting in watcher.sample() {
            if !self.band.contains(sighting.top, viewport_height) {
                continue;
            }
            match &best {
                Some((_, top)) if *top <= sighting.top => {}
                _ => best = Some((sighting.anchor, sighting.top)),
            }
        }
        if let Some((anchor, _)) = best {
            self.active = Some(anchor);
        }
    }

    /// Manual override: sets the active entry immediately, independent of
    /// visibility. Used by navigation so the highlight never lags the click.
    pub fn set_active(&mut self, id: impl Into<String>) {
        self.active = Some(id.into());
    }

    #[must_use]
    /// The identifier of the entry currently considered in view, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;

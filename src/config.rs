//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a tocsin.toml, and if present we load settings
//! from there. Every tuned constant in the engine lives here: the visibility
//! band margins, the extraction delays, the navigation offset and the panel
//! size estimates are all UX tuning choices rather than correctness
//! requirements, so they stay overridable. Defaults are sized for terminal
//! rows and columns.

use crate::engine::Timing;
use crate::panel::Bounds;
use crate::tracker::Band;
use facet::Facet;
use std::fs;
use std::time::Duration;

#[derive(Facet, Clone)]
/// Reader preferences loaded from tocsin.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 1000)]
    /// Delay in milliseconds before the first extraction attempt.
    pub initial_delay_ms: u64,
    #[facet(default = 500)]
    /// Re-poll interval in milliseconds while the document is absent.
    pub retry_delay_ms: u64,
    #[facet(default = 300)]
    /// Settle delay in milliseconds between a content change and re-scan.
    pub settle_delay_ms: u64,
    #[facet(default = 400)]
    /// Smooth scroll duration in milliseconds.
    pub scroll_duration_ms: u64,
    #[facet(default = 250)]
    /// Interval in milliseconds between document change checks.
    pub watch_interval_ms: u64,
    #[facet(default = 2.0)]
    /// Rows from the viewport top to the visibility band's upper edge.
    pub band_top: f32,
    #[facet(default = 0.34)]
    /// Fraction of the viewport height at which the visibility band ends.
    pub band_bottom_ratio: f32,
    #[facet(default = 3.0)]
    /// Rows kept above a heading after navigating to it.
    pub scroll_offset: f32,
    #[facet(default = 36.0)]
    /// Estimated panel width in columns, used for drag clamping.
    pub panel_width: f32,
    #[facet(default = 14.0)]
    /// Estimated panel height in rows, used for drag clamping.
    pub panel_height: f32,
    #[facet(default = 2.0)]
    /// Minimum panel row, keeping it below the view's top chrome.
    pub panel_top_min: f32,
    #[facet(default = 100)]
    /// Terminal width in columns below which the floating panel yields to
    /// the compact modal presentation.
    pub breakpoint_cols: u16,
}

impl Config {
    #[must_use]
    /// Load configuration from tocsin.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("tocsin.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }

    #[must_use]
    /// Visibility band built from the configured margins.
    pub fn band(&self) -> Band {
        Band {
            top_offset: self.band_top,
            bottom_ratio: self.band_bottom_ratio,
        }
    }

    #[must_use]
    /// Engine delay tuning built from the configured milliseconds.
    pub fn timing(&self) -> Timing {
        Timing {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            scroll_duration: Duration::from_millis(self.scroll_duration_ms),
        }
    }

    #[must_use]
    /// Drag clamping bounds for the current viewport size.
    pub fn bounds(&self, viewport_w: f32, viewport_h: f32) -> Bounds {
        Bounds {
            viewport_w,
            viewport_h,
            panel_w: self.panel_width,
            panel_h: self.panel_height,
            top_min: self.panel_top_min,
        }
    }
}

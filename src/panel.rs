//! Floating panel state: free drag with clamping, collapse, progress.
//!
//! The panel owns its on-screen position and nothing else reads it. Dragging
//! captures the grip offset between the pointer and the panel corner on
//! press, then follows the pointer with the position clamped to the viewport
//! (horizontally edge to edge, vertically below a fixed top bound that keeps
//! the panel clear of the header). Release leaves the position where it is.

use crate::outline::OutlineEntry;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
/// A point in viewport coordinates.
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    #[must_use]
    /// Constructs a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
/// Clamping limits for a drag, rebuilt from the live viewport on every move
/// so a resize mid-drag cannot push the panel off screen.
pub struct Bounds {
    /// Viewport width.
    pub viewport_w: f32,
    /// Viewport height.
    pub viewport_h: f32,
    /// Estimated panel width.
    pub panel_w: f32,
    /// Estimated panel height.
    pub panel_h: f32,
    /// Minimum vertical position, keeping the panel below the fixed header.
    pub top_min: f32,
}

impl Bounds {
    #[must_use]
    /// Clamps a candidate position into the viewport.
    pub fn clamp(&self, p: Point) -> Point {
        let max_x = (self.viewport_w - self.panel_w).max(0.0);
        let max_y = (self.viewport_h - self.panel_h).max(self.top_min);
        Point {
            x: p.x.clamp(0.0, max_x),
            y: p.y.clamp(self.top_min, max_y),
        }
    }
}

/// Drag/collapse state machine for the floating panel.
pub struct Panel {
    /// Current panel position, top-left corner in viewport coordinates.
    pub position: Point,
    collapsed: bool,
    grip: Option<Point>,
}

impl Panel {
    #[must_use]
    /// Creates an expanded, idle panel at `position`.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            collapsed: false,
            grip: None,
        }
    }

    /// Enters the dragging state, capturing the pointer-to-corner offset.
    pub fn begin_drag(&mut self, pointer: Point) {
        self.grip = Some(Point {
            x: pointer.x - self.position.x,
            y: pointer.y - self.position.y,
        });
    }

    /// Follows the pointer while dragging; no-op when idle.
    pub fn drag_to(&mut self, pointer: Point, bounds: &Bounds) {
        let Some(grip) = self.grip else {
            return;
        };
        self.position = bounds.clamp(Point {
            x: pointer.x - grip.x,
            y: pointer.y - grip.y,
        });
    }

    /// Exits the dragging state. The position stays at its last clamped
    /// value; there is no snap or settle animation.
    pub fn end_drag(&mut self) {
        self.grip = None;
    }

    #[must_use]
    /// Whether a drag is in progress.
    pub fn dragging(&self) -> bool {
        self.grip.is_some()
    }

    /// Flips between expanded and collapsed presentation.
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    #[must_use]
    /// Whether the panel renders only its minimized summary.
    pub fn collapsed(&self) -> bool {
        self.collapsed
    }
}

#[must_use]
/// Reading progress as a whole percentage: position of the active entry in
/// the outline over the outline length, rounded to the nearest percent. Zero
/// when the outline is empty or no entry is active.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn reading_progress(outline: &[OutlineEntry], active: Option<&str>) -> u8 {
    let Some(active) = active else {
        return 0;
    };
    if outline.is_empty() {
        return 0;
    }
    match outline.iter().position(|e| e.id == active) {
        Some(index) => (((index + 1) as f32 / outline.len() as f32) * 100.0).round() as u8,
        None => 0,
    }
}

#[cfg(test)]
#[path = "tests/panel.rs"]
mod tests;

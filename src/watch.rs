//! Capability seams between the outline engine and its host.
//!
//! The engine never touches the rendered document directly. It observes
//! heading visibility through [`VisibilityWatcher`], learns about content
//! mutations through [`TreeWatcher`], and resolves navigation targets through
//! [`AnchorLookup`]. The terminal host implements all three over its line
//! layout and the filesystem (OS change notifications first, metadata
//! polling as the fallback); tests substitute in-memory doubles.

use crate::content::ContentTree;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

#[derive(Clone, PartialEq, Debug)]
/// A currently resolvable observed heading and where its top edge sits,
/// relative to the top of the viewport.
pub struct Sighting {
    /// Anchor of the observed heading.
    pub anchor: String,
    /// Viewport-relative top coordinate.
    pub top: f32,
}

/// Watches a set of anchored elements for viewport visibility.
///
/// Implementations are free to be event-driven or polling-based; the tracker
/// only ever asks for the current sightings. Anchors that do not resolve to a
/// rendered element are silently absent from [`VisibilityWatcher::sample`],
/// never an error.
pub trait VisibilityWatcher {
    /// Replaces the observed anchor set, dropping all prior observations.
    fn observe(&mut self, anchors: &[String]);

    /// Current sightings of observed anchors that resolve to an element.
    fn sample(&self) -> Vec<Sighting>;

    /// Drops every observation.
    fn disconnect(&mut self);
}

/// Signals that the content subtree was replaced or grown.
pub trait TreeWatcher {
    /// Consumes a pending subtree-changed signal, if one fired since the
    /// last call.
    fn take_change(&mut self) -> bool;
}

/// Resolves an anchor to its top edge in document coordinates.
pub trait AnchorLookup {
    /// Document-coordinate top of the anchored element, if it exists.
    fn document_top(&self, anchor: &str) -> Option<f32>;
}

#[derive(Default)]
/// [`VisibilityWatcher`] and [`AnchorLookup`] over the terminal line layout.
///
/// Observed anchors are resolved to document rows from the content tree on
/// each [`LineWatcher::refresh`]; sampling then offsets those rows by the
/// current scroll position and the rendering origin, yielding the same
/// viewport-relative coordinates a browser intersection callback would see.
pub struct LineWatcher {
    observed: Vec<String>,
    rows: Vec<(String, f32)>,
    scroll: f32,
    origin: f32,
}

impl LineWatcher {
    #[must_use]
    /// Creates a watcher with no observations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-resolves observed anchors against the tree and records the scroll
    /// position and rendering origin used for subsequent samples.
    ///
    /// Anchors with no matching node are skipped; they simply produce no
    /// sighting until the tree grows them.
    pub fn refresh(&mut self, tree: &ContentTree, scroll: f32, origin: f32) {
        self.scroll = scroll;
        self.origin = origin;
        self.rows.clear();
        for anchor in &self.observed {
            if let Some(node_id) = tree.find_anchor(anchor) {
                #[allow(clippy::cast_precision_loss)]
                let row = tree.node(node_id).row as f32;
                self.rows.push((anchor.clone(), row));
            }
        }
    }
}

impl VisibilityWatcher for LineWatcher {
    fn observe(&mut self, anchors: &[String]) {
        self.observed = anchors.to_vec();
        self.rows.clear();
    }

    fn sample(&self) -> Vec<Sighting> {
        self.rows
            .iter()
            .map(|(anchor, row)| Sighting {
                anchor: anchor.clone(),
                top: row - self.scroll + self.origin,
            })
            .collect()
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.rows.clear();
    }
}

impl AnchorLookup for LineWatcher {
    fn document_top(&self, anchor: &str) -> Option<f32> {
        self.rows
            .iter()
            .find(|(a, _)| a == anchor)
            .map(|(_, row)| *row)
    }
}

/// [`TreeWatcher`] over OS file-change notifications.
///
/// The terminal host has no renderer to signal mutations, so an on-disk
/// change to the source document stands in for "the subtree was replaced".
/// This is the primary mutation source: the watcher handle starts delivering
/// events the moment it is built, and [`TreeWatcher::take_change`] drains
/// whatever accumulated since the last tick. The parent directory is watched
/// rather than the file itself so editors that save by rename-and-replace
/// keep firing.
pub struct NotifyWatcher {
    events: Receiver<notify::Result<notify::Event>>,
    target: PathBuf,
    // The handle must outlive the receiver; dropping it ends the stream.
    _watcher: RecommendedWatcher,
}

impl NotifyWatcher {
    /// Starts watching `path`'s parent directory for changes to `path`.
    ///
    /// # Errors
    ///
    /// Fails when the path cannot be resolved or the platform watcher cannot
    /// attach; callers fall back to [`MtimeWatcher`] polling.
    pub fn new(path: &Path) -> notify::Result<Self> {
        let target = path.canonicalize().map_err(notify::Error::io)?;
        let dir = target
            .parent()
            .ok_or_else(|| notify::Error::generic("watched path has no parent"))?
            .to_path_buf();

        let (tx, events) = channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            events,
            target,
            _watcher: watcher,
        })
    }
}

impl TreeWatcher for NotifyWatcher {
    fn take_change(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            let Ok(event) = event else {
                continue;
            };
            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                continue;
            }
            if event.paths.iter().any(|p| *p == self.target) {
                changed = true;
            }
        }
        changed
    }
}

/// [`TreeWatcher`] over file metadata, polled on a fixed interval.
///
/// Fallback for when [`NotifyWatcher`] cannot attach (the document does not
/// exist yet, or the platform watcher is unavailable). Metadata errors (file
/// briefly missing during an editor save) are swallowed; the change fires
/// once the file is readable again.
pub struct MtimeWatcher {
    path: PathBuf,
    interval: Duration,
    next_check: Instant,
    last_seen: Option<std::time::SystemTime>,
}

impl MtimeWatcher {
    #[must_use]
    /// Watches `path`, checking at most once per `interval`.
    pub fn new(path: PathBuf, interval: Duration, now: Instant) -> Self {
        let last_seen = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok();
        Self {
            path,
            interval,
            next_check: now + interval,
            last_seen,
        }
    }

    /// Polls the file's modification time; returns true when it moved.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_check {
            return false;
        }
        self.next_check = now + self.interval;

        let Ok(modified) = std::fs::metadata(&self.path).and_then(|m| m.modified()) else {
            return false;
        };
        if self.last_seen != Some(modified) {
            self.last_seen = Some(modified);
            return true;
        }
        false
    }
}

impl TreeWatcher for MtimeWatcher {
    fn take_change(&mut self) -> bool {
        self.poll(Instant::now())
    }
}

#[cfg(test)]
#[path = "tests/watch.rs"]
mod tests;

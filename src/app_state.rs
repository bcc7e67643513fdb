//! The host state bridging the loaded document and the outline engine.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated
//! as the reader scrolls and navigates. The app owns the document (or the
//! knowledge that it is not readable yet), the engine, and the watchers the
//! engine observes through. Each tick pumps them in a fixed order so the
//! engine's ordering guarantees hold: mutation signal, extraction, geometry
//! refresh, visibility evaluation, scroll animation.

use crate::config::Config;
use crate::content::NodeKind;
use crate::engine::TocEngine;
use crate::formats::markdown::MarkdownFormat;
use crate::input::{self, Document};
use crate::panel::Point;
use crate::watch::{LineWatcher, MtimeWatcher, NotifyWatcher, TreeWatcher};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Bridges the markdown document on disk and the outline engine.
pub struct App {
    /// Source file backing the reading view.
    pub path: PathBuf,
    /// Loaded configuration, shared with the renderer.
    pub config: Config,
    /// The document, once (and while) the file is readable.
    pub document: Option<Document>,
    /// The outline engine driving panel, tracker and navigation.
    pub engine: TocEngine,
    /// Line-layout watcher the engine observes headings through.
    pub watcher: LineWatcher,
    /// Document scroll offset in rows.
    pub scroll: f32,
    /// Whether the compact modal presentation is open (narrow layouts only).
    pub modal_open: bool,
    /// Heading rows mapped to their depth, for per-line styling.
    pub heading_rows: HashMap<usize, u8>,
    change_watch: Box<dyn TreeWatcher>,
    placed: bool,
}

impl App {
    #[must_use]
    /// Initialises application state and arms the engine's first extraction.
    ///
    /// An unreadable file is not an error here: the engine keeps retrying on
    /// its fixed schedule until the document shows up.
    ///
    /// Document changes are detected through OS notifications when the
    /// platform watcher attaches, with metadata polling as the fallback
    /// (notably while the file does not exist yet).
    pub fn new(path: PathBuf, config: Config, now: Instant) -> Self {
        let change_watch: Box<dyn TreeWatcher> = match NotifyWatcher::new(&path) {
            Ok(watcher) => Box::new(watcher),
            Err(_) => Box::new(MtimeWatcher::new(
                path.clone(),
                Duration::from_millis(config.watch_interval_ms),
                now,
            )),
        };
        Self::with_change_watch(path, config, now, change_watch)
    }

    #[must_use]
    /// Like [`App::new`] but with the mutation source supplied by the caller.
    pub fn with_change_watch(
        path: PathBuf,
        config: Config,
        now: Instant,
        change_watch: Box<dyn TreeWatcher>,
    ) -> Self {
        let engine = TocEngine::new(
            now,
            config.band(),
            config.timing(),
            config.scroll_offset,
            Point::new(0.0, config.panel_top_min),
        );
        let mut app = Self {
            path,
            config,
            document: None,
            engine,
            watcher: LineWatcher::new(),
            scroll: 0.0,
            modal_open: false,
            heading_rows: HashMap::new(),
            change_watch,
            placed: false,
        };
        app.reload();
        app
    }

    /// (Re)loads the document from disk, rebuilding the content tree.
    ///
    /// Synthesized anchors are regenerated by the next extraction; because
    /// they derive from heading position and text they come out identical for
    /// unchanged headings, so the active entry survives a reload.
    pub fn reload(&mut self) {
        self.document = input::load_document(&self.path, &MarkdownFormat).ok();
        self.heading_rows.clear();
        if let Some(doc) = &self.document {
            for node_id in doc.tree.headings() {
                let node = doc.tree.node(node_id);
                if let NodeKind::Heading(rank) = node.kind {
                    self.heading_rows.insert(node.row, rank.depth());
                }
            }
        }
    }

    /// One cooperative tick: change detection, extraction, geometry refresh,
    /// visibility evaluation, scroll animation.
    ///
    /// `doc_origin` is the viewport row where document rendering starts, so
    /// sightings come out in the same coordinate space the visibility band
    /// is configured in.
    pub fn tick(&mut self, now: Instant, viewport_w: f32, viewport_h: f32, doc_origin: f32) {
        let mutated = self.change_watch.take_change();
        if mutated {
            self.reload();
        }

        if !self.placed {
            // First real viewport: park the panel at the top-right corner.
            let x = (viewport_w - self.config.panel_width - 2.0).max(0.0);
            self.engine.panel.position = Point::new(x, self.config.panel_top_min);
            self.placed = true;
        }

        self.engine.pump_extraction(
            now,
            self.document.as_mut().map(|d| &mut d.tree),
            mutated,
            &mut self.watcher,
        );

        if let Some(doc) = &self.document {
            self.watcher.refresh(&doc.tree, self.scroll, doc_origin);
        }
        self.engine.evaluate(&self.watcher, viewport_h);

        if let Some(position) = self.engine.scroll_position(now) {
            self.scroll = position;
        }
        self.clamp_scroll(viewport_h);
    }

    /// Scrolls the document manually, interrupting any navigation animation.
    pub fn scroll_by(&mut self, delta: f32, viewport_h: f32) {
        self.engine.interrupt_scroll();
        self.scroll += delta;
        self.clamp_scroll(viewport_h);
    }

    /// Navigates to an outline entry; unresolvable targets are a no-op.
    pub fn navigate(&mut self, id: &str, now: Instant) {
        self.engine.navigate(id, &self.watcher, self.scroll, now);
    }

    #[must_use]
    /// Number of source lines in the loaded document.
    pub fn line_count(&self) -> usize {
        self.document
            .as_ref()
            .map_or(0, |d| d.source.lines().count())
    }

    /// Releases the engine's timers and observations on unmount.
    pub fn teardown(&mut self) {
        self.engine.teardown(&mut self.watcher);
    }

    #[allow(clippy::cast_precision_loss)]
    fn clamp_scroll(&mut self, viewport_h: f32) {
        let max = (self.line_count() as f32 - viewport_h * 0.5).max(0.0);
        self.scroll = self.scroll.clamp(0.0, max);
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;

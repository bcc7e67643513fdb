#![allow(clippy::float_cmp)]

use super::{Timing, TocEngine};
use crate::content::{ContentNode, ContentTree, HeadingRank, NodeKind};
use crate::panel::Point;
use crate::tracker::Band;
use crate::watch::{AnchorLookup, Sighting, VisibilityWatcher};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Default)]
struct StubWatcher {
    observed: Vec<String>,
    sightings: Vec<Sighting>,
    tops: HashMap<String, f32>,
}

impl VisibilityWatcher for StubWatcher {
    fn observe(&mut self, anchors: &[String]) {
        self.observed = anchors.to_vec();
    }

    fn sample(&self) -> Vec<Sighting> {
        self.sightings.clone()
    }

    fn disconnect(&mut self) {
        self.observed.clear();
    }
}

impl AnchorLookup for StubWatcher {
    fn document_top(&self, anchor: &str) -> Option<f32> {
        self.tops.get(anchor).copied()
    }
}

fn instant_timing() -> Timing {
    Timing {
        initial_delay: Duration::ZERO,
        retry_delay: Duration::from_millis(500),
        settle_delay: Duration::ZERO,
        scroll_duration: Duration::ZERO,
    }
}

fn engine(now: Instant) -> TocEngine {
    TocEngine::new(
        now,
        Band::default(),
        instant_timing(),
        100.0,
        Point::new(0.0, 120.0),
    )
}

fn tree_of(headings: &[&str]) -> ContentTree {
    let mut tree = ContentTree::new();
    for (row, text) in headings.iter().enumerate() {
        tree.push(
            ContentNode {
                kind: NodeKind::Heading(HeadingRank::H1),
                text: (*text).to_string(),
                anchor: None,
                row: row * 10,
                children: Vec::new(),
            },
            None,
        );
    }
    tree
}

#[test]
fn test_extraction_populates_outline_and_resubscribes() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let mut watcher = StubWatcher::default();
    let mut tree = tree_of(&["One", "Two"]);

    let changed = e.pump_extraction(t0, Some(&mut tree), false, &mut watcher);

    assert!(changed);
    assert_eq!(e.outline().len(), 2);
    assert_eq!(watcher.observed.len(), 2);
    assert_eq!(watcher.observed[0], e.outline()[0].id);
}

#[test]
fn test_absent_root_extracts_nothing() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let mut watcher = StubWatcher::default();

    assert!(!e.pump_extraction(t0, None, false, &mut watcher));
    assert!(e.outline().is_empty());
}

#[test]
fn test_navigate_sets_active_synchronously() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let watcher = StubWatcher {
        tops: HashMap::from([("target".to_string(), 500.0)]),
        ..StubWatcher::default()
    };

    e.navigate("target", &watcher, 0.0, t0);

    // Active before any scroll animation has been sampled at all.
    assert_eq!(e.active(), Some("target"));
}

#[test]
fn test_navigate_scrolls_to_target_minus_offset() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let watcher = StubWatcher {
        tops: HashMap::from([("target".to_string(), 500.0)]),
        ..StubWatcher::default()
    };

    e.navigate("target", &watcher, 0.0, t0);

    assert_eq!(e.scroll_position(t0), Some(400.0));
    // Settled animations are dropped.
    assert_eq!(e.scroll_position(t0), None);
}

#[test]
fn test_navigate_target_near_top_clamps_to_zero() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let watcher = StubWatcher {
        tops: HashMap::from([("intro".to_string(), 40.0)]),
        ..StubWatcher::default()
    };

    e.navigate("intro", &watcher, 300.0, t0);

    assert_eq!(e.scroll_position(t0), Some(0.0));
}

#[test]
fn test_navigate_unknown_id_is_noop() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let watcher = StubWatcher::default();

    e.navigate("missing", &watcher, 0.0, t0);

    assert_eq!(e.active(), None);
    assert_eq!(e.scroll_position(t0), None);
}

#[test]
fn test_mutation_replaces_outline_wholesale() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let mut watcher = StubWatcher::default();

    let mut tree = tree_of(&["One"]);
    assert!(e.pump_extraction(t0, Some(&mut tree), false, &mut watcher));
    assert_eq!(e.outline().len(), 1);

    let mut grown = tree_of(&["One", "Two", "Three"]);
    let t1 = t0 + Duration::from_secs(5);
    assert!(e.pump_extraction(t1, Some(&mut grown), true, &mut watcher));
    assert_eq!(e.outline().len(), 3);
    assert_eq!(watcher.observed.len(), 3);
}

#[test]
fn test_teardown_stops_all_updates() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let mut watcher = StubWatcher::default();
    let mut tree = tree_of(&["One"]);
    assert!(e.pump_extraction(t0, Some(&mut tree), false, &mut watcher));

    e.teardown(&mut watcher);
    assert!(e.torn_down());
    assert!(watcher.observed.is_empty());

    // The tree keeps mutating; nothing fires.
    let mut grown = tree_of(&["One", "Two"]);
    let t1 = t0 + Duration::from_secs(60);
    assert!(!e.pump_extraction(t1, Some(&mut grown), true, &mut watcher));
    assert_eq!(e.outline().len(), 1);

    watcher.tops.insert("x".to_string(), 500.0);
    e.navigate("x", &watcher, 0.0, t1);
    assert_eq!(e.active(), None);
}

#[test]
fn test_progress_follows_active_entry() {
    let t0 = Instant::now();
    let mut e = engine(t0);
    let mut watcher = StubWatcher::default();
    let mut tree = tree_of(&["A", "B", "C", "D"]);
    e.pump_extraction(t0, Some(&mut tree), false, &mut watcher);

    assert_eq!(e.progress(), 0);

    let third = e.outline()[2].id.clone();
    watcher.tops.insert(third.clone(), 20.0);
    e.navigate(&third, &watcher, 0.0, t0);

    assert_eq!(e.progress(), 75);
}

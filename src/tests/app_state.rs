use super::App;
use crate::config::Config;
use crate::watch::TreeWatcher;
use std::cell::Cell;
use std::fs;
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Mutation source driven by a shared flag the test flips.
struct FlagSignal(Rc<Cell<bool>>);

impl TreeWatcher for FlagSignal {
    fn take_change(&mut self) -> bool {
        self.0.replace(false)
    }
}

fn test_config() -> Config {
    let mut cfg: Config = facet_toml::from_str("").unwrap();
    // Collapse every delay so ticks act immediately under test.
    cfg.initial_delay_ms = 0;
    cfg.settle_delay_ms = 0;
    cfg.scroll_duration_ms = 0;
    cfg.watch_interval_ms = 0;
    cfg
}

fn long_doc() -> String {
    let mut source = String::from("# One\n\n");
    for i in 0..60 {
        source.push_str(&format!("line {i}\n"));
    }
    source.push_str("\n# Two\n\nmore\n");
    source
}

#[test]
fn test_first_tick_extracts_outline() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", long_doc()).unwrap();

    let t0 = Instant::now();
    let mut app = App::new(file.path().to_path_buf(), test_config(), t0);
    app.tick(t0, 120.0, 40.0, 1.0);

    assert_eq!(app.engine.outline().len(), 2);
    assert_eq!(app.engine.outline()[0].text, "One");
}

#[test]
fn test_navigate_scrolls_to_heading_minus_offset() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", long_doc()).unwrap();

    let t0 = Instant::now();
    let mut app = App::new(file.path().to_path_buf(), test_config(), t0);
    app.tick(t0, 120.0, 10.0, 1.0);

    let target = app.engine.outline()[1].id.clone();
    app.navigate(&target, t0);

    // Active updates synchronously, before any animation frame.
    assert_eq!(app.engine.active(), Some(target.as_str()));

    app.tick(t0 + Duration::from_millis(1), 120.0, 10.0, 1.0);
    // "# Two" sits on row 63; default scroll offset keeps 3 rows above it.
    assert!((app.scroll - 60.0).abs() < f32::EPSILON);
}

#[test]
fn test_missing_document_retries_until_it_appears() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.md");

    let t0 = Instant::now();
    let mut app = App::new(path.clone(), test_config(), t0);

    app.tick(t0, 120.0, 40.0, 1.0);
    assert!(app.document.is_none());
    assert!(app.engine.outline().is_empty());

    fs::write(&path, "# Finally\n\nhello\n").unwrap();
    app.tick(t0 + Duration::from_millis(600), 120.0, 40.0, 1.0);

    assert!(app.document.is_some());
    assert_eq!(app.engine.outline().len(), 1);
}

#[test]
fn test_change_signal_is_consumed_through_the_watcher_seam() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "# One\n").unwrap();

    let flag = Rc::new(Cell::new(false));
    let t0 = Instant::now();
    let mut app = App::with_change_watch(
        file.path().to_path_buf(),
        test_config(),
        t0,
        Box::new(FlagSignal(Rc::clone(&flag))),
    );

    app.tick(t0, 120.0, 40.0, 1.0);
    assert_eq!(app.engine.outline().len(), 1);

    // An on-disk change alone does nothing until the mutation source says so.
    fs::write(file.path(), "# One\n\n# Two\n").unwrap();
    app.tick(t0 + Duration::from_millis(1), 120.0, 40.0, 1.0);
    assert_eq!(app.engine.outline().len(), 1);

    flag.set(true);
    app.tick(t0 + Duration::from_millis(2), 120.0, 40.0, 1.0);
    assert_eq!(app.engine.outline().len(), 2);
}

#[test]
fn test_reload_rebuilds_heading_rows() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "# One\n\nbody\n").unwrap();

    let t0 = Instant::now();
    let mut app = App::new(file.path().to_path_buf(), test_config(), t0);
    assert_eq!(app.heading_rows.get(&0), Some(&1));

    fs::write(file.path(), "intro\n\n## Moved\n").unwrap();
    app.reload();

    assert_eq!(app.heading_rows.get(&2), Some(&2));
    assert!(!app.heading_rows.contains_key(&0));
}

#[test]
fn test_teardown_freezes_the_outline() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", long_doc()).unwrap();

    let t0 = Instant::now();
    let mut app = App::new(file.path().to_path_buf(), test_config(), t0);
    app.tick(t0, 120.0, 40.0, 1.0);
    assert_eq!(app.engine.outline().len(), 2);

    app.teardown();
    assert!(app.engine.torn_down());

    fs::write(file.path(), "# A\n\n# B\n\n# C\n").unwrap();
    app.tick(t0 + Duration::from_secs(2), 120.0, 40.0, 1.0);

    assert_eq!(app.engine.outline().len(), 2);
}

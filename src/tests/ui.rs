use super::{entry_at, modal_entry_at, modal_rect, panel_rect};
use crate::app_state::App;
use crate::config::Config;
use ratatui::layout::Rect;
use std::io::Write;
use std::time::Instant;
use tempfile::NamedTempFile;

fn test_config() -> Config {
    let mut cfg: Config = facet_toml::from_str("").unwrap();
    cfg.initial_delay_ms = 0;
    cfg.settle_delay_ms = 0;
    cfg.scroll_duration_ms = 0;
    cfg.watch_interval_ms = 0;
    cfg
}

fn app_with_headings(n: usize) -> App {
    let mut file = NamedTempFile::new().unwrap();
    let mut source = String::new();
    for i in 0..n {
        source.push_str(&format!("# Heading {i}\n\n"));
    }
    write!(file, "{source}").unwrap();

    let t0 = Instant::now();
    let mut app = App::new(file.path().to_path_buf(), test_config(), t0);
    app.tick(t0, 80.0, 24.0, 1.0);
    // The tempfile may drop before the app; the document is already loaded.
    app
}

#[test]
fn test_modal_windows_long_outlines_around_the_active_entry() {
    let mut app = app_with_headings(30);
    assert_eq!(app.engine.outline().len(), 30);

    let deep = app.engine.outline()[25].id.clone();
    app.navigate(&deep, Instant::now());
    app.modal_open = true;

    let frame = Rect::new(0, 0, 80, 24);
    let rect = modal_rect(frame);

    // 12 body rows; the window slides so the active entry stays visible
    // instead of truncating the list at the top.
    let first = modal_entry_at(&app, frame, rect.x + 1, rect.y + 1).unwrap();
    assert_eq!(first, app.engine.outline()[14].id);

    let last = modal_entry_at(&app, frame, rect.x + 1, rect.bottom() - 2).unwrap();
    assert_eq!(last, deep);
}

#[test]
fn test_modal_short_outline_starts_at_the_top() {
    let app = app_with_headings(3);

    let frame = Rect::new(0, 0, 80, 24);
    let rect = modal_rect(frame);

    let first = modal_entry_at(&app, frame, rect.x + 1, rect.y + 1).unwrap();
    assert_eq!(first, app.engine.outline()[0].id);
}

#[test]
fn test_panel_hit_test_matches_its_window() {
    let mut app = app_with_headings(30);

    let deep = app.engine.outline()[25].id.clone();
    app.navigate(&deep, Instant::now());

    let frame = Rect::new(0, 0, 120, 24);
    let rect = panel_rect(&app, frame);
    let last_row = rect.bottom() - 2;

    // The active entry sits on the last visible body row.
    let hit = entry_at(&app, frame, rect.x + 1, last_row).unwrap();
    assert_eq!(hit, deep);
}

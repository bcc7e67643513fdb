//! The UI renders the application state into something visible and draggable.
//!
//! The reading view fills the frame; the panel floats on top of it at
//! whatever position the drag state machine last settled on. Geometry
//! helpers are shared with the mouse handling in main so a hit test always
//! agrees with what was actually drawn. The floating panel is suppressed on
//! narrow terminals in favour of the compact modal, and renders nothing at
//! all while the outline is empty.

use crate::app_state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Viewport row where document rendering starts (inside the top border).
pub const DOC_ORIGIN: f32 = 1.0;

/// Width of the collapsed panel chip.
const CHIP_W: u16 = 10;
/// Height of the collapsed panel chip.
const CHIP_H: u16 = 3;
/// Columns at the right end of the panel title row that act as the
/// collapse trigger.
const COLLAPSE_HIT_W: u16 = 5;

/// Renders the reading view, the floating panel and the compact modal.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    draw_document(f, app, chunks[0]);
    draw_help(f, app, chunks[1]);

    if floating_visible(app, f.area()) {
        if app.engine.panel.collapsed() {
            draw_chip(f, app);
        } else {
            draw_panel(f, app);
        }
    }

    if modal_visible(app, f.area()) {
        draw_modal(f, app);
    }
}

fn draw_document(f: &mut Frame, app: &App, area: Rect) {
    let title = app
        .path
        .file_name()
        .map_or_else(|| app.path.display().to_string(), |n| n.to_string_lossy().to_string());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(doc) = &app.document else {
        let waiting = Paragraph::new("Waiting for document...")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(waiting, inner);
        return;
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scroll = app.scroll.max(0.0) as u16;
    let lines: Vec<Line> = doc
        .source
        .lines()
        .enumerate()
        .map(|(row, text)| match app.heading_rows.get(&row) {
            Some(1) => Line::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Some(2) => Line::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Some(_) => Line::styled(text.to_string(), Style::default().fg(Color::Blue)),
            None => Line::raw(text.to_string()),
        })
        .collect();

    let body = Paragraph::new(lines).scroll((scroll, 0));
    f.render_widget(body, inner);
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let narrow = app.config.breakpoint_cols > f.area().width;
    let help = if narrow {
        "↑/↓/PgUp/PgDn: Scroll | t: Contents | q: Quit"
    } else {
        "↑/↓/PgUp/PgDn: Scroll | Click: Jump | Drag title: Move panel | c: Collapse | q: Quit"
    };
    let widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

#[must_use]
/// Whether the floating panel (expanded or chip) renders at all.
///
/// Empty outline means nothing renders; that is the hard precondition, not a
/// styling choice. Narrow terminals suppress the panel in favour of the
/// modal.
pub fn floating_visible(app: &App, frame: Rect) -> bool {
    !app.engine.outline().is_empty() && frame.width >= app.config.breakpoint_cols
}

#[must_use]
/// Whether the compact modal renders.
pub fn modal_visible(app: &App, frame: Rect) -> bool {
    app.modal_open && !app.engine.outline().is_empty() && frame.width < app.config.breakpoint_cols
}

#[must_use]
/// On-screen rectangle of the expanded floating panel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn panel_rect(app: &App, frame: Rect) -> Rect {
    let w = (app.config.panel_width as u16).min(frame.width);
    let h = (app.config.panel_height as u16).min(frame.height);
    let x = (app.engine.panel.position.x.max(0.0) as u16).min(frame.width.saturating_sub(w));
    let y = (app.engine.panel.position.y.max(0.0) as u16).min(frame.height.saturating_sub(h));
    Rect::new(x, y, w, h)
}

#[must_use]
/// On-screen rectangle of the collapsed chip.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn chip_rect(app: &App, frame: Rect) -> Rect {
    let w = CHIP_W.min(frame.width);
    let h = CHIP_H.min(frame.height);
    let x = (app.engine.panel.position.x.max(0.0) as u16).min(frame.width.saturating_sub(w));
    let y = (app.engine.panel.position.y.max(0.0) as u16).min(frame.height.saturating_sub(h));
    Rect::new(x, y, w, h)
}

#[must_use]
/// Whether a click on the panel title row lands on the collapse trigger.
pub fn collapse_hit(rect: Rect, column: u16, row: u16) -> bool {
    row == rect.y && column >= rect.right().saturating_sub(COLLAPSE_HIT_W) && column < rect.right()
}

#[must_use]
/// Whether a position sits on the panel's drag handle (the title row).
pub fn handle_hit(rect: Rect, column: u16, row: u16) -> bool {
    row == rect.y && column >= rect.x && column < rect.right()
}

/// First entry index shown inside a panel body of `visible` rows, keeping
/// the active entry in view.
fn entry_window(app: &App, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    let active_index = app
        .engine
        .active()
        .and_then(|id| app.engine.outline().iter().position(|e| e.id == id))
        .unwrap_or(0);
    active_index.saturating_sub(visible.saturating_sub(1))
}

#[must_use]
/// Outline entry id at an on-screen position inside the expanded panel.
pub fn entry_at(app: &App, frame: Rect, column: u16, row: u16) -> Option<String> {
    let rect = panel_rect(app, frame);
    if column <= rect.x || column >= rect.right().saturating_sub(1) {
        return None;
    }
    let body_top = rect.y + 1;
    if row < body_top || row >= rect.bottom().saturating_sub(1) {
        return None;
    }
    let visible = usize::from(rect.height.saturating_sub(2));
    let index = entry_window(app, visible) + usize::from(row - body_top);
    app.engine.outline().get(index).map(|e| e.id.clone())
}

fn draw_panel(f: &mut Frame, app: &App) {
    let rect = panel_rect(app, f.area());
    f.render_widget(Clear, rect);

    let progress = app.engine.progress();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Table of Contents ")
        .title_top(Line::from(" ▾ ").right_aligned())
        .title_bottom(Line::from(format!(" {progress}% ")).right_aligned());
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let visible = usize::from(inner.height);
    let start = entry_window(app, visible);
    let lines: Vec<Line> = app
        .engine
        .outline()
        .iter()
        .skip(start)
        .take(visible)
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            let bullet = match entry.level {
                1 => "●",
                2 => "◦",
                _ => "▪",
            };
            let active = app.engine.active() == Some(entry.id.as_str());
            let style = if active {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!("{indent}{bullet} ")),
                Span::styled(entry.text.clone(), style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_chip(f: &mut Frame, app: &App) {
    let rect = chip_rect(app, f.area());
    f.render_widget(Clear, rect);

    let progress = app.engine.progress();
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(rect);
    f.render_widget(block, rect);
    f.render_widget(
        Paragraph::new(format!("▸ {progress}%")).style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        inner,
    );
}

#[must_use]
/// Centered rectangle of the compact modal.
pub fn modal_rect(frame: Rect) -> Rect {
    let w = (frame.width * 4) / 5;
    let h = (frame.height * 3) / 5;
    let x = (frame.width.saturating_sub(w)) / 2;
    let y = (frame.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[must_use]
/// Outline entry id at an on-screen position inside the modal.
pub fn modal_entry_at(app: &App, frame: Rect, column: u16, row: u16) -> Option<String> {
    let rect = modal_rect(frame);
    if column <= rect.x || column >= rect.right().saturating_sub(1) {
        return None;
    }
    let body_top = rect.y + 1;
    if row < body_top || row >= rect.bottom().saturating_sub(1) {
        return None;
    }
    let visible = usize::from(rect.height.saturating_sub(2));
    let index = entry_window(app, visible) + usize::from(row - body_top);
    app.engine.outline().get(index).map(|e| e.id.clone())
}

fn draw_modal(f: &mut Frame, app: &App) {
    let rect = modal_rect(f.area());
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Table of Contents ")
        .title_top(Line::from(" ✕ ").right_aligned());
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let visible = usize::from(inner.height);
    let start = entry_window(app, visible);
    let lines: Vec<Line> = app
        .engine
        .outline()
        .iter()
        .skip(start)
        .take(visible)
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            let bullet = match entry.level {
                1 => "●",
                2 => "◦",
                _ => "▪",
            };
            let active = app.engine.active() == Some(entry.id.as_str());
            let style = if active {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!("{indent}{bullet} ")),
                Span::styled(entry.text.clone(), style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;

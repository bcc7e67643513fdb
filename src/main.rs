//! tocsin: a floating table-of-contents for terminal reading.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tocsin::panel::Point;
use tocsin::{app_state, config, formats, input, outline, ui};

/// Event poll timeout; doubles as the cooperative tick interval.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "tocsin")]
#[command(about = "Floating outline navigation for rendered documents", long_about = None)]
struct Args {
    /// Markdown document to read
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Print the extracted outline as JSON and exit
    #[arg(long)]
    dump_outline: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let cfg = config::Config::load();

    if args.dump_outline {
        let mut doc = input::load_document(&args.path, &formats::markdown::MarkdownFormat)?;
        let entries = outline::extract(&mut doc.tree);
        let json = serde_json::to_string_pretty(&entries).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    let app = app_state::App::new(args.path, cfg, Instant::now());
    run_tui(app)
}

fn run_tui(mut app: app_state::App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    app.teardown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        eprintln!("Error: {e}");
    }
    result
}

#[allow(clippy::too_many_lines)]
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::App,
) -> io::Result<()> {
    // Transient pointer state: whether the press started on the collapsed
    // chip, and whether the pointer moved since (a still press re-expands).
    let mut chip_press = false;
    let mut drag_moved = false;

    loop {
        let size = terminal.size()?;
        let frame = Rect::new(0, 0, size.width, size.height);
        let view_h = f32::from(frame.height);

        app.tick(Instant::now(), f32::from(frame.width), view_h, ui::DOC_ORIGIN);
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up => app.scroll_by(-1.0, view_h),
                KeyCode::Down => app.scroll_by(1.0, view_h),
                KeyCode::PageUp => app.scroll_by(-(view_h - 5.0), view_h),
                KeyCode::PageDown => app.scroll_by(view_h - 5.0, view_h),
                KeyCode::Home => app.scroll_by(f32::MIN, view_h),
                KeyCode::End => app.scroll_by(f32::MAX, view_h),
                KeyCode::Char('c') => app.engine.panel.toggle_collapsed(),
                KeyCode::Char('t') => app.modal_open = !app.modal_open,
                KeyCode::Esc => app.modal_open = false,
                _ => {}
            },
            Event::Mouse(mouse) => {
                let pointer = Point::new(f32::from(mouse.column), f32::from(mouse.row));
                let at = Position::new(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if ui::modal_visible(app, frame) {
                            if let Some(id) = ui::modal_entry_at(app, frame, mouse.column, mouse.row)
                            {
                                app.navigate(&id, Instant::now());
                                app.modal_open = false;
                            } else if !ui::modal_rect(frame).contains(at) {
                                // Click on the overlay closes the modal.
                                app.modal_open = false;
                            }
                        } else if ui::floating_visible(app, frame) {
                            if app.engine.panel.collapsed() {
                                if ui::chip_rect(app, frame).contains(at) {
                                    chip_press = true;
                                    drag_moved = false;
                                    app.engine.panel.begin_drag(pointer);
                                }
                            } else {
                                let rect = ui::panel_rect(app, frame);
                                if ui::collapse_hit(rect, mouse.column, mouse.row) {
                                    app.engine.panel.toggle_collapsed();
                                } else if ui::handle_hit(rect, mouse.column, mouse.row) {
                                    drag_moved = false;
                                    app.engine.panel.begin_drag(pointer);
                                } else if let Some(id) =
                                    ui::entry_at(app, frame, mouse.column, mouse.row)
                                {
                                    app.navigate(&id, Instant::now());
                                }
                            }
                        }
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if app.engine.panel.dragging() {
                            let bounds = app
                                .config
                                .bounds(f32::from(frame.width), f32::from(frame.height));
                            app.engine.panel.drag_to(pointer, &bounds);
                            drag_moved = true;
                        }
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        if app.engine.panel.dragging() {
                            app.engine.panel.end_drag();
                            if chip_press && !drag_moved {
                                app.engine.panel.toggle_collapsed();
                            }
                        }
                        chip_press = false;
                    }
                    MouseEventKind::ScrollUp => app.scroll_by(-3.0, view_h),
                    MouseEventKind::ScrollDown => app.scroll_by(3.0, view_h),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

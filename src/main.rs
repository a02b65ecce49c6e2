//! Terminal gem-swapping game (default binary).
//!
//! crossterm for input, the framebuffer renderer from `tui_gems::term` for
//! output, and a fixed-rate frame loop driving the controller's `tick`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_gems::config::GameConfig;
use tui_gems::core::{GameSnapshot, InteractionController};
use tui_gems::event_log::EventLog;
use tui_gems::input::{handle_key_event, should_quit, Cursor};
use tui_gems::level::Level;
use tui_gems::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_gems::types::{InputAction, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GameConfig::load(&args)?;
    let level = Level::load_or_builtin(config.level_path.as_deref())?;
    let controller = InteractionController::new(level.shape, config.controller_options())?;
    let mut log = EventLog::from_path(config.log_path.as_deref());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, controller, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    log.flush();
    result
}

fn run<W: std::io::Write>(
    term: &mut TerminalRenderer,
    mut controller: InteractionController,
    log: &mut EventLog<W>,
) -> Result<()> {
    let view = GameView::default();
    let board = controller.board();
    let mut cursor = Cursor::new(board.width(), board.height(), board.top_row());

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut events = Vec::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut tick: u64 = 0;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        controller.snapshot_into(&mut snap);
        view.render_into(&snap, Some(cursor.position()), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(InputAction::Restart) => {
                            controller.restart()?;
                            cursor = Cursor::new(
                                controller.board().width(),
                                controller.board().height(),
                                controller.board().top_row(),
                            );
                        }
                        Some(action) => {
                            if let Some(at) = cursor.apply(action) {
                                controller.select(at)?;
                            }
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            tick += 1;
            controller.tick(TICK_MS)?;
        }

        controller.drain_events_into(&mut events);
        if !events.is_empty() {
            log.record_all(tick, &events);
            events.clear();
        }
    }
}

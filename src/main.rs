//! Terminal 2048 runner (default binary).
//!
//! Configuration comes from `TUI2048_*` environment variables (see
//! `tui_2048::engine::config`). Logs go to `TUI2048_LOG_PATH` when set, since
//! the terminal itself is taken by the game.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing_subscriber::EnvFilter;

use tui_2048::core::GameSnapshot;
use tui_2048::engine::{Engine, EngineConfig};
use tui_2048::input::{should_quit, InputHandler};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, ViewState, Viewport};
use tui_2048::types::TICK_MS;

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(config.log_path.as_deref())?;
    tracing::info!(
        store = %config.store_dir.display(),
        persist_disabled = config.persist_disabled,
        seed = config.seed,
        "starting"
    );

    let mut engine = Engine::open(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }
    result
}

fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snap);
        let state = ViewState {
            confirm_wipe: input.awaiting_confirmation(),
        };
        view.render_into(&snap, state, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        tracing::info!("quit");
                        return Ok(());
                    }
                    if let Some(action) = input.handle_key(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick (drives replay).
        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            engine.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}

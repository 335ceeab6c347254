//! Terminal blockfall runner (default binary).
//!
//! The game loop runs on tokio and owns all game state; a plain thread reads the terminal
//! and forwards commands into the loop's queue.

use std::thread;

use anyhow::Result;
use crossterm::event;

use blockfall::core::GameState;
use blockfall::input::{classify, InputEvent};
use blockfall::runtime::{channel, DriverHandle, EventLog, GameDriver, RuntimeConfig};
use blockfall::term::{
    AudioService, FieldView, RodioAudio, Silent, TerminalPresenter, TerminalRenderer, Viewport,
};

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env()?;
    let rt = tokio::runtime::Runtime::new()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&rt, config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let (score, level, lines) = result?;
    println!("Final score: {} (level {}, {} lines)", score, level, lines);
    Ok(())
}

fn run(rt: &tokio::runtime::Runtime, config: RuntimeConfig) -> Result<(u32, u32, u32)> {
    let seed = config.seed_or_clock();
    let state = GameState::new(config.game.clone(), seed)?;

    let audio: Box<dyn AudioService> = if config.mute {
        Box::new(Silent::default())
    } else {
        match RodioAudio::try_default() {
            Ok(audio) => Box::new(audio),
            Err(err) => {
                if config.verbose {
                    eprintln!("[Audio] disabled: {}", err);
                }
                Box::new(Silent::default())
            }
        }
    };
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let presenter = TerminalPresenter::new(
        FieldView::new(config.game.width, config.game.height),
        Viewport::new(w, h),
        TerminalRenderer::new(),
        audio,
    )
    .follow_terminal();

    let (handle, rx) = channel(config.queue_depth);
    spawn_input_thread(handle);

    let mut report = rt.block_on(async {
        let log = match config.log_path.clone() {
            Some(path) => EventLog::spawn(path),
            None => EventLog::disabled(),
        };
        GameDriver::new(state, presenter, rx)
            .with_log(log)
            .verbose(config.verbose)
            .run()
            .await
    });

    if let Some(err) = report.presenter.take_error() {
        return Err(err);
    }
    let state = &report.state;
    Ok((state.score(), state.level(), state.total_lines()))
}

/// Forward terminal input to the game loop until quit or the loop goes away
fn spawn_input_thread(handle: DriverHandle) {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(_) => {
                handle.blocking_shutdown();
                return;
            }
        };

        let sent = match classify(&event) {
            InputEvent::Command(command) => handle.blocking_send(command),
            InputEvent::Redraw => handle.blocking_redraw(),
            InputEvent::Quit => {
                handle.blocking_shutdown();
                return;
            }
            InputEvent::Ignored => Ok(()),
        };
        if sent.is_err() {
            return;
        }
    });
}

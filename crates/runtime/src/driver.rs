//! The game loop: one task that owns the game state and serializes every input.
//!
//! Fall ticks and player commands arrive on the same `select!`, so they can never
//! interleave inside a transition. Commands win ties. The fall timer only exists while a
//! piece is falling and the game is not paused, and it is rebuilt whenever its period
//! changes or a new piece should get a full interval.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::core::{GameState, Presenter};
use crate::event_log::{current_timestamp_ms, EventLog, EventRecord};
use crate::types::GameCommand;

/// Message delivered to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverMessage {
    Command(GameCommand),
    /// Repaint without changing the game
    Redraw,
    Shutdown,
}

/// Sending side of the game loop's queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    tx: mpsc::Sender<DriverMessage>,
}

impl DriverHandle {
    pub async fn send(&self, command: GameCommand) -> Result<()> {
        self.tx
            .send(DriverMessage::Command(command))
            .await
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    /// For callers outside the runtime, such as the input thread.
    pub fn blocking_send(&self, command: GameCommand) -> Result<()> {
        self.tx
            .blocking_send(DriverMessage::Command(command))
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    pub fn blocking_redraw(&self) -> Result<()> {
        self.tx
            .blocking_send(DriverMessage::Redraw)
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(DriverMessage::Shutdown).await;
    }

    pub fn blocking_shutdown(&self) {
        let _ = self.tx.blocking_send(DriverMessage::Shutdown);
    }
}

/// Create the queue between producers and a [`GameDriver`].
pub fn channel(depth: usize) -> (DriverHandle, mpsc::Receiver<DriverMessage>) {
    let (tx, rx) = mpsc::channel(depth.max(1));
    (DriverHandle { tx }, rx)
}

/// What a finished run hands back
#[derive(Debug)]
pub struct DriverReport<P> {
    pub state: GameState,
    pub presenter: P,
    pub ticks: u64,
    pub commands: u64,
}

pub struct GameDriver<P: Presenter> {
    state: GameState,
    presenter: P,
    rx: mpsc::Receiver<DriverMessage>,
    log: EventLog,
    verbose: bool,
    ticks: u64,
    commands: u64,
}

impl<P: Presenter> GameDriver<P> {
    pub fn new(state: GameState, presenter: P, rx: mpsc::Receiver<DriverMessage>) -> Self {
        Self {
            state,
            presenter,
            rx,
            log: EventLog::disabled(),
            verbose: false,
            ticks: 0,
            commands: 0,
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run until a shutdown message arrives or every handle is dropped.
    pub async fn run(mut self) -> DriverReport<P> {
        self.log.record(EventRecord::Start {
            ts: current_timestamp_ms(),
            seed: self.state.seed(),
        });
        self.state.start(&mut self.presenter);
        self.after_event(false, 0);
        if self.verbose {
            eprintln!(
                "[Runtime] started, fall interval {}ms",
                self.state.fall_interval().as_millis()
            );
        }

        let mut timer = self.arm();
        loop {
            tokio::select! {
                biased;

                msg = self.rx.recv() => match msg {
                    Some(DriverMessage::Command(command)) => {
                        let interval = self.state.fall_interval();
                        let was_active = self.state.timer_active();
                        let accepted = self.handle_command(command);

                        let fresh_piece = accepted
                            && matches!(
                                command,
                                GameCommand::ForceDrop | GameCommand::TogglePause | GameCommand::Restart
                            );
                        if fresh_piece
                            || was_active != self.state.timer_active()
                            || interval != self.state.fall_interval()
                        {
                            timer = self.arm();
                        }
                    }
                    Some(DriverMessage::Redraw) => {
                        self.presenter.redraw();
                        self.presenter.commit();
                    }
                    Some(DriverMessage::Shutdown) | None => break,
                },

                _ = next_tick(&mut timer) => {
                    let interval = self.state.fall_interval();
                    self.handle_tick();
                    if !self.state.timer_active() || interval != self.state.fall_interval() {
                        timer = self.arm();
                    }
                }
            }
        }

        self.log.record(EventRecord::Stop {
            ts: current_timestamp_ms(),
            ticks: self.ticks,
            commands: self.commands,
        });
        if self.verbose {
            eprintln!(
                "[Runtime] stopped after {} ticks and {} commands",
                self.ticks, self.commands
            );
        }
        self.log.close().await;

        DriverReport {
            state: self.state,
            presenter: self.presenter,
            ticks: self.ticks,
            commands: self.commands,
        }
    }

    fn handle_command(&mut self, command: GameCommand) -> bool {
        self.commands += 1;
        let level = self.state.level();
        let was_over = self.state.is_game_over();
        let accepted = self.state.apply(command, &mut self.presenter);
        self.log.record(EventRecord::command(command, accepted));
        if command == GameCommand::Restart && self.verbose {
            eprintln!("[Runtime] restart, episode {}", self.state.episode_id());
        }
        self.after_event(was_over && command != GameCommand::Restart, level);
        accepted
    }

    fn handle_tick(&mut self) {
        self.ticks += 1;
        let level = self.state.level();
        let was_over = self.state.is_game_over();
        self.state.tick(&mut self.presenter);
        self.after_event(was_over, level);
    }

    /// Log what the event produced and let the presenter draw it
    fn after_event(&mut self, was_over: bool, level_before: u32) {
        if let Some(event) = self.state.take_last_event() {
            self.log.record(EventRecord::lock(&event));
        }
        if self.state.level() > level_before {
            self.log.record(EventRecord::LevelUp {
                ts: current_timestamp_ms(),
                level: self.state.level(),
                interval_ms: self.state.fall_interval().as_millis() as u64,
            });
        }
        if self.state.is_game_over() && !was_over {
            self.log.record(EventRecord::game_over(&self.state));
            if self.verbose {
                eprintln!("[Runtime] game over, score {}", self.state.score());
            }
        }
        self.presenter.commit();
    }

    /// A fresh timer for the current level, or none while the piece cannot fall
    fn arm(&self) -> Option<Interval> {
        if !self.state.timer_active() {
            return None;
        }
        Some(fall_timer(self.state.fall_interval()))
    }
}

fn fall_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

//! Append-only JSONL event log.
//!
//! Records are sent over an unbounded channel to a background task that owns the file, so
//! the game loop never waits on disk. Write failures end the task quietly; the game keeps
//! running without a log.

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{GameSnapshot, GameState, LockEvent};
use crate::types::{CellCoord, GameCommand, PieceKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    Start {
        ts: u64,
        seed: u32,
    },
    Command {
        ts: u64,
        command: &'static str,
        accepted: bool,
    },
    Lock {
        ts: u64,
        kind: PieceKind,
        cells: [CellCoord; 4],
        lines_cleared: u32,
        points: u32,
        score: u32,
        level: u32,
    },
    LevelUp {
        ts: u64,
        level: u32,
        interval_ms: u64,
    },
    GameOver {
        ts: u64,
        score: u32,
        pieces: u32,
        /// Final board
        snapshot: Box<GameSnapshot>,
    },
    Stop {
        ts: u64,
        ticks: u64,
        commands: u64,
    },
}

impl EventRecord {
    pub fn command(command: GameCommand, accepted: bool) -> Self {
        Self::Command {
            ts: current_timestamp_ms(),
            command: command.as_str(),
            accepted,
        }
    }

    pub fn lock(event: &LockEvent) -> Self {
        Self::Lock {
            ts: current_timestamp_ms(),
            kind: event.kind,
            cells: event.cells,
            lines_cleared: event.lines_cleared,
            points: event.points,
            score: event.score,
            level: event.level,
        }
    }

    pub fn game_over(state: &GameState) -> Self {
        Self::GameOver {
            ts: current_timestamp_ms(),
            score: state.score(),
            pieces: state.pieces_spawned(),
            snapshot: Box::new(state.snapshot()),
        }
    }
}

/// Handle to the log writer. A disabled log drops every record.
#[derive(Debug, Default)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<EventRecord>>,
    task: Option<JoinHandle<()>>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Spawn the writer task. Must be called inside a tokio runtime.
    pub fn spawn(path: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<EventRecord>();
        let task = tokio::spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("[Runtime] event log {} unavailable: {}", path, e);
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(1024);
            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });

        Self {
            tx: Some(tx),
            task: Some(task),
        }
    }

    pub fn record(&self, rec: EventRecord) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(rec);
        }
    }

    /// Flush everything recorded so far and stop the writer.
    pub async fn close(mut self) {
        self.tx = None;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

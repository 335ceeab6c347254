//! Runtime module - drives a game in real time on tokio
//!
//! The core is synchronous and clock-free. This crate supplies the clock: a single task
//! owns the [`GameState`](crate::core::GameState) and multiplexes the fall timer with the
//! inbound command queue, so every transition runs to completion before the next input
//! is looked at.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_SEED`: fixed randomizer seed (default: from the clock)
//! - `BLOCKFALL_CONFIG`: path to a JSON [`GameConfig`](crate::core::GameConfig); missing
//!   fields keep their defaults
//! - `BLOCKFALL_LOG_PATH`: append a JSONL event log to this file
//! - `BLOCKFALL_QUEUE_DEPTH`: inbound command queue size (default: 64)
//! - `BLOCKFALL_MUTE`: set to "1" or "true" to silence sound effects
//! - `BLOCKFALL_VERBOSE`: set to "1" or "true" for `[Runtime]` status lines on stderr
//!
//! # Event Log
//!
//! One JSON object per line, tagged by `type`:
//!
//! ```text
//! {"type":"start","ts":1700000000000,"seed":42}
//! {"type":"command","ts":1700000000120,"command":"forceDrop","accepted":true}
//! {"type":"lock","ts":1700000000120,"kind":"T","cells":[...],"lines_cleared":0,"points":0,"score":0,"level":0}
//! {"type":"game_over","ts":1700000093000,"score":1840,"pieces":61}
//! ```

pub mod config;
pub mod driver;
pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::{load_game_config, RuntimeConfig, DEFAULT_QUEUE_DEPTH};
pub use driver::{channel, DriverHandle, DriverMessage, DriverReport, GameDriver};
pub use event_log::{EventLog, EventRecord};

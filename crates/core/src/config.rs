//! Game configuration.
//!
//! All fields have defaults, so a partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pieces::{MAX_OFFSET_DOWN, MAX_OFFSET_UP};
use crate::scoring::fall_interval_ms;
use crate::types::{
    CellCoord, BASE_FALL_INTERVAL_MS, DEFAULT_HEIGHT, DEFAULT_POOL_SIZE, DEFAULT_SPAWN,
    DEFAULT_VERTICAL_BUFFER, DEFAULT_WIDTH, FALL_INTERVAL_STEP_MS, LINES_PER_LEVEL,
    MIN_FALL_INTERVAL_MS,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 4x4, got {width}x{height}")]
    BoardTooSmall { width: u8, height: u8 },
    #[error("spawn pivot {0} is outside the board")]
    SpawnOutsideBoard(CellCoord),
    #[error("vertical buffer {buffer} cannot hold pieces spawned at row {row}")]
    BufferTooShallow { buffer: u8, row: i16 },
    #[error("minimum fall interval must be positive")]
    ZeroMinInterval,
    #[error("base fall interval {base}ms is below the minimum {min}ms")]
    BaseBelowMinimum { base: u32, min: u32 },
    #[error("lines per level must be positive")]
    ZeroLinesPerLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub vertical_buffer: u8,
    pub spawn: CellCoord,
    pub base_interval_ms: u32,
    pub per_level_decrement_ms: u32,
    pub min_interval_ms: u32,
    pub lines_per_level: u32,
    pub initial_pool: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vertical_buffer: DEFAULT_VERTICAL_BUFFER,
            spawn: DEFAULT_SPAWN,
            base_interval_ms: BASE_FALL_INTERVAL_MS,
            per_level_decrement_ms: FALL_INTERVAL_STEP_MS,
            min_interval_ms: MIN_FALL_INTERVAL_MS,
            lines_per_level: LINES_PER_LEVEL,
            initial_pool: DEFAULT_POOL_SIZE,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 4 || self.height < 4 {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        let spawn = self.spawn;
        if spawn.col < 1
            || spawn.col > self.width as i16
            || spawn.row - MAX_OFFSET_DOWN < 1
            || spawn.row > self.height as i16
        {
            return Err(ConfigError::SpawnOutsideBoard(spawn));
        }
        if spawn.row + MAX_OFFSET_UP > self.total_rows() {
            return Err(ConfigError::BufferTooShallow {
                buffer: self.vertical_buffer,
                row: spawn.row,
            });
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.base_interval_ms < self.min_interval_ms {
            return Err(ConfigError::BaseBelowMinimum {
                base: self.base_interval_ms,
                min: self.min_interval_ms,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Highest seeded row
    pub fn total_rows(&self) -> i16 {
        self.height as i16 + self.vertical_buffer as i16
    }

    /// Fall interval at `level`, in milliseconds
    pub fn fall_interval_ms(&self, level: u32) -> u32 {
        fall_interval_ms(
            level,
            self.base_interval_ms,
            self.per_level_decrement_ms,
            self.min_interval_ms,
        )
    }
}

//! Runtime configuration, read from the environment.

use std::fs;

use anyhow::{Context, Result};

use crate::core::GameConfig;

/// Commands buffered between the input thread and the game loop
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fixed seed; `None` seeds from the clock
    pub seed: Option<u32>,
    pub game: GameConfig,
    /// Append a JSONL event log here
    pub log_path: Option<String>,
    pub queue_depth: usize,
    pub mute: bool,
    /// Print `[Runtime]` status lines to stderr
    pub verbose: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            game: GameConfig::default(),
            log_path: None,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            mute: false,
            verbose: false,
        }
    }
}

impl RuntimeConfig {
    /// Create from `BLOCKFALL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match var("BLOCKFALL_SEED") {
            Some(s) => Some(
                s.parse()
                    .with_context(|| format!("BLOCKFALL_SEED is not a u32: {:?}", s))?,
            ),
            None => None,
        };

        let game = match var("BLOCKFALL_CONFIG") {
            Some(path) => load_game_config(&path)?,
            None => GameConfig::default(),
        };
        game.validate().context("invalid game configuration")?;

        let queue_depth = var("BLOCKFALL_QUEUE_DEPTH")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_QUEUE_DEPTH)
            .max(1);

        Ok(Self {
            seed,
            game,
            log_path: var("BLOCKFALL_LOG_PATH"),
            queue_depth,
            mute: var("BLOCKFALL_MUTE").is_some_and(|s| is_truthy(&s)),
            verbose: var("BLOCKFALL_VERBOSE").is_some_and(|s| is_truthy(&s)),
        })
    }

    /// The configured seed, or one derived from the clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn is_truthy(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Read a JSON game config. Missing fields keep their defaults.
pub fn load_game_config(path: &str) -> Result<GameConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {}", path))?;
    Ok(config)
}

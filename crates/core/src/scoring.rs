//! Scoring module - classic line scores and level progression
//!
//! Points for a lock are `LINE_SCORES[min(lines, 4)] * (level + 1)`, using the level in
//! effect before the clear. Cleared lines accumulate toward the next level; every
//! `lines_per_level` accumulated lines raise the level by one and are subtracted, so a
//! surplus carries over.

use crate::types::LINE_SCORES;

/// Calculate line clear score
/// lines: number of lines cleared (four or more score as four)
/// level: current level (0-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base_score = LINE_SCORES[lines.min(4) as usize];
    base_score.saturating_mul(level.saturating_add(1))
}

/// Fall interval for a level (in milliseconds).
///
/// `base - step * level`, never below `min`.
pub fn fall_interval_ms(level: u32, base: u32, step: u32, min: u32) -> u32 {
    base.saturating_sub(step.saturating_mul(level)).max(min)
}

/// Result of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub levels_gained: u32,
}

/// Score, level and the lines counted toward the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState {
    score: u32,
    level: u32,
    lines_since_level: u32,
    total_lines: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_since_level(&self) -> u32 {
        self.lines_since_level
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    /// Apply one lock that cleared `lines` rows
    pub fn apply(&mut self, lines: u32, lines_per_level: u32) -> ScoreResult {
        if lines == 0 {
            return ScoreResult::default();
        }

        let points = calculate_line_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.total_lines = self.total_lines.saturating_add(lines);
        self.lines_since_level += lines;

        let mut levels_gained = 0;
        let per_level = lines_per_level.max(1);
        while self.lines_since_level >= per_level {
            self.lines_since_level -= per_level;
            self.level += 1;
            levels_gained += 1;
        }

        ScoreResult {
            points,
            levels_gained,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

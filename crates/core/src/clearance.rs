//! Clearance and gravity engine.
//!
//! Runs right after a lock. Only the rows touched by the locked piece can have become
//! full, so only that span is scanned. Every full row in the span is removed first; the
//! compaction pass then starts at the lowest cleared row and pulls each remaining
//! non-empty row above it down into the lowest empty slot.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::pool::BlockPool;
use crate::presenter::Presenter;
use crate::types::CellCoord;

/// Outcome of one clearance pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Rows that were full, ascending
    pub cleared_rows: ArrayVec<i16, 4>,
    /// Blocks that changed row during compaction
    pub moved_blocks: u32,
}

impl ClearReport {
    pub fn cleared_count(&self) -> u32 {
        self.cleared_rows.len() as u32
    }

    pub fn lowest_cleared(&self) -> Option<i16> {
        self.cleared_rows.first().copied()
    }
}

/// Detect and remove full rows in `[min_row, max_row]`, then compact.
///
/// `max_row - min_row` must be below 4 (a piece spans at most four rows).
pub fn clear_and_compact(
    grid: &mut Grid,
    pool: &mut BlockPool,
    presenter: &mut impl Presenter,
    min_row: i16,
    max_row: i16,
) -> ClearReport {
    let mut report = ClearReport::default();

    let start = min_row.max(1);
    let end = max_row.min(grid.total_rows());
    for row in start..=end {
        if grid.is_row_full(row) {
            report.cleared_rows.push(row);
        }
    }

    for &row in &report.cleared_rows {
        for col in 1..=grid.width() as i16 {
            let cell = CellCoord::new(col, row);
            if let Some(occupant) = grid.take(cell) {
                pool.release(occupant.block);
                presenter.release_block(occupant.block);
            }
        }
    }

    if let Some(lowest) = report.lowest_cleared() {
        report.moved_blocks = compact_from(grid, presenter, lowest);
    }

    report
}

/// Pull non-empty rows above `bottom` down until no gaps remain. `bottom` must be empty.
///
/// Returns the number of blocks moved.
pub fn compact_from(grid: &mut Grid, presenter: &mut impl Presenter, bottom: i16) -> u32 {
    let top_row = grid.total_rows();
    let mut moved = 0;
    let mut bottom = bottom;

    while bottom <= top_row {
        let Some(top) = ((bottom + 1)..=top_row).find(|&row| !grid.is_row_empty(row)) else {
            // Nothing left above; the rows from `bottom` up are already empty.
            break;
        };

        for col in 1..=grid.width() as i16 {
            let from = CellCoord::new(col, top);
            let to = CellCoord::new(col, bottom);
            if let Some(occupant) = grid.take(from) {
                let placed = grid.set(to, Some(occupant));
                assert!(placed, "grid entry missing for {} during compaction", to);
                presenter.move_block(occupant.block, to);
                moved += 1;
            }
        }

        bottom += 1;
    }

    moved
}

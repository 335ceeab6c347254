//! Grid module - the occupancy grid
//!
//! Every cell in `[1, W] x [1, H + buffer]` has an entry, either empty or holding the block
//! that occupies it. Storage is a flat row-major vector for cache locality; rows are
//! 1-based and grow upward.
//!
//! `get` distinguishes "empty" (`Some(None)`) from "no entry" (`None`). A missing entry
//! only happens outside the seeded range or before `initialize`, and every predicate
//! treats it as blocked.

use crate::types::{BlockId, CellCoord, PieceKind};

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub block: BlockId,
    pub kind: PieceKind,
}

/// A grid entry - `None` is an empty cell
pub type Slot = Option<Occupant>;

/// The occupancy grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    width: u8,
    height: u8,
    buffer: u8,
    /// Flat array of slots, row-major ((row - 1) * width + (col - 1))
    slots: Vec<Slot>,
}

impl Grid {
    /// Create a seeded grid (every cell empty)
    pub fn new(width: u8, height: u8, buffer: u8) -> Self {
        let mut grid = Self::default();
        grid.initialize(width, height, buffer);
        grid
    }

    /// Seed every cell in range with empty, dropping any previous contents.
    ///
    /// Re-callable; this is how a restart resets the field.
    pub fn initialize(&mut self, width: u8, height: u8, buffer: u8) {
        self.width = width;
        self.height = height;
        self.buffer = buffer;
        let len = width as usize * (height as usize + buffer as usize);
        self.slots.clear();
        self.slots.resize(len, None);
    }

    #[inline(always)]
    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.col < 1
            || cell.col > self.width as i16
            || cell.row < 1
            || cell.row > self.total_rows()
        {
            return None;
        }
        Some((cell.row as usize - 1) * self.width as usize + (cell.col as usize - 1))
    }

    /// Columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Visible rows
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Rows above the visible board
    pub fn buffer(&self) -> u8 {
        self.buffer
    }

    /// Highest seeded row (`height + buffer`)
    pub fn total_rows(&self) -> i16 {
        self.height as i16 + self.buffer as i16
    }

    /// Get the entry at `cell`; `None` when the cell has no entry
    pub fn get(&self, cell: CellCoord) -> Option<Slot> {
        self.index(cell).map(|idx| self.slots[idx])
    }

    /// Overwrite the entry at `cell`.
    /// Returns false if the cell has no entry.
    pub fn set(&mut self, cell: CellCoord, slot: Slot) -> bool {
        match self.index(cell) {
            Some(idx) => {
                self.slots[idx] = slot;
                true
            }
            None => false,
        }
    }

    /// Empty the cell and return what was there
    pub fn take(&mut self, cell: CellCoord) -> Slot {
        self.index(cell).and_then(|idx| self.slots[idx].take())
    }

    /// Seeded and empty. Missing entries count as blocked.
    pub fn is_free(&self, cell: CellCoord) -> bool {
        matches!(self.get(cell), Some(None))
    }

    /// Seeded and occupied
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        matches!(self.get(cell), Some(Some(_)))
    }

    fn row_slots(&self, row: i16) -> Option<&[Slot]> {
        if row < 1 || row > self.total_rows() {
            return None;
        }
        let width = self.width as usize;
        let start = (row as usize - 1) * width;
        Some(&self.slots[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i16) -> bool {
        self.row_slots(row)
            .map(|slots| !slots.is_empty() && slots.iter().all(|slot| slot.is_some()))
            .unwrap_or(false)
    }

    /// Check if a row holds no blocks. Rows without entries count as empty.
    pub fn is_row_empty(&self, row: i16) -> bool {
        self.row_slots(row)
            .map(|slots| slots.iter().all(|slot| slot.is_none()))
            .unwrap_or(true)
    }

    /// Iterate over every occupied cell, bottom row first
    pub fn occupants(&self) -> impl Iterator<Item = (CellCoord, Occupant)> + '_ {
        let width = self.width.max(1) as usize;
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            slot.map(|occupant| {
                let cell = CellCoord::new((idx % width) as i16 + 1, (idx / width) as i16 + 1);
                (cell, occupant)
            })
        })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant(id: u32) -> Occupant {
        Occupant {
            block: BlockId(id),
            kind: PieceKind::T,
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 20, 2);
        assert_eq!(grid.index(CellCoord::new(1, 1)), Some(0));
        assert_eq!(grid.index(CellCoord::new(10, 1)), Some(9));
        assert_eq!(grid.index(CellCoord::new(1, 2)), Some(10));
        assert_eq!(grid.index(CellCoord::new(10, 22)), Some(219));
        assert_eq!(grid.index(CellCoord::new(0, 1)), None);
        assert_eq!(grid.index(CellCoord::new(11, 1)), None);
        assert_eq!(grid.index(CellCoord::new(1, 0)), None);
        assert_eq!(grid.index(CellCoord::new(1, 23)), None);
    }

    #[test]
    fn test_uninitialized_grid_has_no_entries() {
        let grid = Grid::default();
        assert_eq!(grid.get(CellCoord::new(1, 1)), None);
        assert!(!grid.is_free(CellCoord::new(1, 1)));
    }

    #[test]
    fn test_take_empties_cell() {
        let mut grid = Grid::new(4, 4, 1);
        let cell = CellCoord::new(2, 3);
        assert!(grid.set(cell, Some(occupant(7))));
        assert_eq!(grid.take(cell), Some(occupant(7)));
        assert_eq!(grid.get(cell), Some(None));
        assert_eq!(grid.take(CellCoord::new(9, 9)), None);
    }

    #[test]
    fn test_occupants_report_coordinates() {
        let mut grid = Grid::new(4, 4, 0);
        grid.set(CellCoord::new(4, 1), Some(occupant(1)));
        grid.set(CellCoord::new(1, 3), Some(occupant(2)));

        let found: Vec<_> = grid.occupants().map(|(cell, o)| (cell, o.block)).collect();
        assert_eq!(
            found,
            vec![
                (CellCoord::new(4, 1), BlockId(1)),
                (CellCoord::new(1, 3), BlockId(2))
            ]
        );
    }
}

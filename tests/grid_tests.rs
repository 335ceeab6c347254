//! Grid tests - seeding, bounds and fail-closed lookups

use blockfall::core::{Grid, Occupant};
use blockfall::types::{BlockId, CellCoord, PieceKind};

fn occupant(id: u32) -> Occupant {
    Occupant {
        block: BlockId(id),
        kind: PieceKind::S,
    }
}

#[test]
fn test_grid_totality_after_initialize() {
    for width in 1..=12u8 {
        for height in 1..=24u8 {
            for buffer in 1..=3u8 {
                let grid = Grid::new(width, height, buffer);
                for row in 1..=(height as i16 + buffer as i16) {
                    for col in 1..=width as i16 {
                        assert_eq!(
                            grid.get(CellCoord::new(col, row)),
                            Some(None),
                            "{}x{}+{} at ({}, {})",
                            width,
                            height,
                            buffer,
                            col,
                            row
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_cells_outside_range_have_no_entry() {
    let grid = Grid::new(10, 20, 2);
    for cell in [
        CellCoord::new(0, 1),
        CellCoord::new(11, 1),
        CellCoord::new(1, 0),
        CellCoord::new(1, 23),
        CellCoord::new(-3, -3),
    ] {
        assert_eq!(grid.get(cell), None, "{}", cell);
        // Missing entries block like occupied ones.
        assert!(!grid.is_free(cell));
        assert!(!grid.is_occupied(cell));
    }
}

#[test]
fn test_set_overwrites_and_reports_missing() {
    let mut grid = Grid::new(10, 20, 2);
    let cell = CellCoord::new(4, 21);

    assert!(grid.set(cell, Some(occupant(1))));
    assert_eq!(grid.get(cell), Some(Some(occupant(1))));
    assert!(grid.set(cell, Some(occupant(2))));
    assert_eq!(grid.get(cell), Some(Some(occupant(2))));
    assert!(grid.set(cell, None));
    assert!(grid.is_free(cell));

    assert!(!grid.set(CellCoord::new(4, 23), Some(occupant(3))));
}

#[test]
fn test_initialize_resets_contents() {
    let mut grid = Grid::new(10, 20, 2);
    for col in 1..=10 {
        grid.set(CellCoord::new(col, 1), Some(occupant(col as u32)));
    }
    assert!(grid.is_row_full(1));

    grid.initialize(10, 20, 2);
    assert_eq!(grid.occupied_count(), 0);
    assert!(grid.is_row_empty(1));
}

#[test]
fn test_row_predicates() {
    let mut grid = Grid::new(3, 4, 1);
    assert!(grid.is_row_empty(2));
    assert!(!grid.is_row_full(2));

    grid.set(CellCoord::new(2, 2), Some(occupant(0)));
    assert!(!grid.is_row_empty(2));
    assert!(!grid.is_row_full(2));

    grid.set(CellCoord::new(1, 2), Some(occupant(1)));
    grid.set(CellCoord::new(3, 2), Some(occupant(2)));
    assert!(grid.is_row_full(2));

    // Rows outside the grid are never full.
    assert!(!grid.is_row_full(0));
    assert!(!grid.is_row_full(6));
}

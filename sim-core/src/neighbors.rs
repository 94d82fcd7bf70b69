//! Toroidal 3×3 neighborhood enumeration over the spatial grid.
//!
//! Slots are produced row-major around the center cell:
//!
//! ```text
//! 0 1 2     above-left  above  above-right
//! 3 4 5  =  left        self   right
//! 6 7 8     below-left  below  below-right
//! ```
//!
//! Each slot carries a [`CellWrap`] telling which world edges were crossed
//! to reach it, so particle positions read from that cell can be shifted
//! into the subject's frame of reference.

use glam::Vec2;

/// Which world edges a neighbor cell was reached across.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellWrap {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl CellWrap {
    /// Shift to add to a position read from the wrapped cell.
    ///
    /// A cell reached by wrapping past the left edge lies, from the
    /// subject's point of view, one world width further left, and so on.
    #[inline]
    pub fn offset(self, world: Vec2) -> Vec2 {
        let mut off = Vec2::ZERO;
        if self.left {
            off.x -= world.x;
        }
        if self.right {
            off.x += world.x;
        }
        if self.top {
            off.y -= world.y;
        }
        if self.bottom {
            off.y += world.y;
        }
        off
    }

    #[inline]
    pub fn is_wrapped(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// One slot of a 3×3 neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborCell {
    pub row: usize,
    pub col: usize,
    pub wrap: CellWrap,
}

/// Returns the cell `(row, col)` and its 8 neighbors on a `rows × cols`
/// torus, in the fixed row-major order documented at module level.
///
/// On grids narrower than three cells the same cell can appear in several
/// slots with different wrap flags; each slot then stands for a distinct
/// periodic image of that cell.
///
/// ### Parameters
/// - `row`, `col` - Center cell; must lie inside the grid.
/// - `rows`, `cols` - Grid dimensions, both at least `1`.
///
/// ### Returns
/// Nine slots, the center at index `4`, each with the wrap flags needed to
/// shift positions read from it.
pub fn neighbor_cells(row: usize, col: usize, rows: usize, cols: usize) -> [NeighborCell; 9] {
    debug_assert!(row < rows && col < cols);

    let left = if col == 0 { cols - 1 } else { col - 1 };
    let right = (col + 1) % cols;
    let above = if row == 0 { rows - 1 } else { row - 1 };
    let below = (row + 1) % rows;

    let wrap_left = col == 0;
    let wrap_right = col == cols - 1;
    let wrap_top = row == 0;
    let wrap_bottom = row == rows - 1;

    let slot = |r: usize, c: usize, dr: i8, dc: i8| NeighborCell {
        row: r,
        col: c,
        wrap: CellWrap {
            left: dc < 0 && wrap_left,
            right: dc > 0 && wrap_right,
            top: dr < 0 && wrap_top,
            bottom: dr > 0 && wrap_bottom,
        },
    };

    [
        slot(above, left, -1, -1),
        slot(above, col, -1, 0),
        slot(above, right, -1, 1),
        slot(row, left, 0, -1),
        slot(row, col, 0, 0),
        slot(row, right, 0, 1),
        slot(below, left, 1, -1),
        slot(below, col, 1, 0),
        slot(below, right, 1, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(cells: &[NeighborCell; 9]) -> Vec<(usize, usize)> {
        cells.iter().map(|n| (n.row, n.col)).collect()
    }

    #[test]
    fn interior_cell_has_plain_neighbors_in_row_major_order() {
        let cells = neighbor_cells(2, 2, 5, 5);
        assert_eq!(
            coords(&cells),
            vec![
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 1),
                (3, 2),
                (3, 3)
            ]
        );
        assert!(cells.iter().all(|n| !n.wrap.is_wrapped()));
    }

    #[test]
    fn top_left_corner_wraps_two_edges_on_the_diagonal() {
        let cells = neighbor_cells(0, 0, 4, 6);

        assert_eq!((cells[0].row, cells[0].col), (3, 5));
        assert!(cells[0].wrap.left && cells[0].wrap.top);
        assert!(!cells[0].wrap.right && !cells[0].wrap.bottom);

        assert_eq!((cells[1].row, cells[1].col), (3, 0));
        assert_eq!(
            cells[1].wrap,
            CellWrap {
                top: true,
                ..CellWrap::default()
            }
        );

        assert_eq!((cells[3].row, cells[3].col), (0, 5));
        assert_eq!(
            cells[3].wrap,
            CellWrap {
                left: true,
                ..CellWrap::default()
            }
        );

        assert!(!cells[4].wrap.is_wrapped());
        assert!(!cells[8].wrap.is_wrapped());
    }

    #[test]
    fn bottom_right_corner_wraps_right_and_bottom() {
        let cells = neighbor_cells(3, 5, 4, 6);

        assert_eq!((cells[8].row, cells[8].col), (0, 0));
        assert!(cells[8].wrap.right && cells[8].wrap.bottom);
        assert!(cells[5].wrap.right && !cells[5].wrap.bottom);
        assert!(cells[7].wrap.bottom && !cells[7].wrap.right);
        assert!(!cells[0].wrap.is_wrapped());
    }

    #[test]
    fn two_row_grid_reaches_other_row_as_distinct_images() {
        let cells = neighbor_cells(0, 1, 2, 4);
        // Above and below are the same row, reached across different edges.
        assert_eq!(cells[1].row, 1);
        assert_eq!(cells[7].row, 1);
        assert!(cells[1].wrap.top);
        assert!(!cells[7].wrap.bottom);
    }

    #[test]
    fn offset_follows_wrap_flags() {
        let world = Vec2::new(2.0, 1.0);
        let wrap = CellWrap {
            left: true,
            bottom: true,
            ..CellWrap::default()
        };
        assert_eq!(wrap.offset(world), Vec2::new(-2.0, 1.0));
        assert_eq!(CellWrap::default().offset(world), Vec2::ZERO);
    }
}

//! The fixed 4×10 key grid and cursor coordinates.

use crate::config::{GRID_COLS, GRID_ROWS};

/// Key layout, indexed `[row][col]`. `' '` is the space key.
pub const KEY_GRID: [[char; GRID_COLS as usize]; GRID_ROWS as usize] = [
    ['Q', 'W', 'E', 'R', 'T', 'Y', 'U', 'I', 'O', 'P'],
    ['A', 'S', 'D', 'F', 'G', 'H', 'J', 'K', 'L', '?'],
    ['Z', 'X', 'C', 'V', 'B', 'N', 'M', ' ', '.', '/'],
    ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'],
];

/// Cursor position on the key grid. Always inside `[0,9]×[0,3]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridPos {
    col: u8,
    row: u8,
}

impl GridPos {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    /// Build a position, clamping both coordinates onto the grid.
    pub fn new(col: u8, row: u8) -> Self {
        Self {
            col: col.min(GRID_COLS - 1),
            row: row.min(GRID_ROWS - 1),
        }
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    /// Move by at most one cell per axis, saturating at the edges.
    pub fn stepped(self, dcol: i8, drow: i8) -> Self {
        Self {
            col: step(self.col, dcol, GRID_COLS),
            row: step(self.row, drow, GRID_ROWS),
        }
    }

    /// Character printed on this key.
    pub fn key(&self) -> char {
        KEY_GRID[self.row as usize][self.col as usize]
    }

    /// Every position, row by row.
    pub fn all() -> impl Iterator<Item = GridPos> {
        (0..GRID_ROWS).flat_map(|row| (0..GRID_COLS).map(move |col| GridPos { col, row }))
    }
}

/// One saturating step within `0..count`.
fn step(value: u8, delta: i8, count: u8) -> u8 {
    match delta {
        d if d < 0 => value.saturating_sub(1),
        d if d > 0 && value + 1 < count => value + 1,
        _ => value,
    }
}

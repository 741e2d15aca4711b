//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! [`Board::collides`] is the only legality test in the engine; moves, rotations,
//! spawns and hard-drop targets all go through it.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows, as an index type.
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices, at most one entry per board row.
pub type RowList = ArrayVec<usize, BOARD_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True if any cell of `piece` is out of bounds or overlaps a filled cell.
    pub fn collides(&self, piece: &Tetromino) -> bool {
        piece.cells().iter().any(|&(x, y)| !self.is_valid(x, y))
    }

    /// Write the piece's cells into the board as permanent cells of its kind.
    ///
    /// Legality is the caller's job (see [`Board::collides`]); cells that fall
    /// outside the grid are dropped rather than wrapped.
    pub fn place(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// One row of cells, left to right.
    ///
    /// Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Indices of every full row, top to bottom.
    pub fn find_full_lines(&self) -> RowList {
        (0..BOARD_ROWS).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows and drop everything above them.
    ///
    /// Rows are removed regardless of whether they are full. The same number of
    /// empty rows is inserted at the top, so the height never changes. Duplicate
    /// and out-of-range indices are ignored. Returns the number of rows removed.
    pub fn clear_lines(&mut self, rows: &[usize]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_ROWS;

        // Two-pointer compaction from the bottom up.
        for read_y in (0..BOARD_ROWS).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                let dst_start = write_y * width;
                self.cells.copy_within(src_start..src_start + width, dst_start);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        write_y
    }

    /// Clear all full rows and return their indices (top to bottom, pre-clear positions).
    pub fn clear_full_rows(&mut self) -> RowList {
        let full = self.find_full_lines();
        if !full.is_empty() {
            self.clear_lines(&full);
        }
        full
    }

    /// True if any cell in the top `rows` rows is filled.
    pub fn top_rows_occupied(&self, rows: u8) -> bool {
        let rows = (rows as usize).min(BOARD_ROWS);
        self.cells[..rows * BOARD_WIDTH as usize]
            .iter()
            .any(|cell| cell.is_some())
    }

    /// Export as a `u8` grid: `0` for empty,
    /// [`PieceKind::code`](crate::types::PieceKind::code) otherwise.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, cell) in dst.iter_mut().zip(src) {
                *d = cell.map_or(0, |kind| kind.code());
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

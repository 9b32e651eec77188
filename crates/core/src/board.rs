//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid (20x10 by default) where each cell is `0`
//! (empty) or a piece's cell id. Storage is a flat row-major vector sized once
//! at construction; gameplay never reallocates it.
//! Coordinates: (x, y) where x grows left to right and y grows downwards, row 0
//! is the top.

use crate::catalog::Shape;
use crate::config::validate_dimensions;
use crate::error::ConfigError;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the canonical 20x10 dimensions
    pub fn new() -> Self {
        Self::empty(BOARD_HEIGHT as usize, BOARD_WIDTH as usize)
    }

    /// Create an empty board with custom dimensions
    pub fn with_size(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        validate_dimensions(rows, cols)?;
        Ok(Self::empty(rows, cols))
    }

    /// Build a board from rows of cell values (row 0 first)
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut board = Self::with_size(rows.len(), cols)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ConfigError::InvalidDimensions {
                    rows: rows.len(),
                    cols: row.len(),
                });
            }
            if let Some(&bad) = row.iter().find(|&&c| c > 7) {
                return Err(ConfigError::InvalidCell(bad));
            }
            board.cells[y * cols..(y + 1) * cols].copy_from_slice(row);
        }
        Ok(board)
    }

    pub(crate) fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or the value is not a cell id
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        if cell > 7 {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// One row of cells
    ///
    /// # Panics
    ///
    /// Panics if `y` is not below `height()`.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.cols..(y + 1) * self.cols]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.rows && self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Does `shape` anchored at (x, y) overlap a wall, the floor or a filled cell?
    ///
    /// Walls extend upward without limit, but cells above row 0 never touch
    /// board contents, so pieces may sit partly above the visible field while
    /// spawning or probing kicks.
    pub fn collide(&self, shape: &Shape, x: i16, y: i16) -> bool {
        shape.minos().iter().any(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px as usize >= self.cols || py >= self.rows as i16 {
                return true;
            }
            py >= 0 && self.cells[py as usize * self.cols + px as usize] != EMPTY
        })
    }

    /// Write every occupied shape cell into the board at (x, y)
    ///
    /// The caller must have checked `collide` first; cells outside the grid
    /// (only possible above row 0) are dropped.
    pub fn merge(&mut self, shape: &Shape, x: i16, y: i16) {
        for &(dx, dy) in shape.minos() {
            let value = shape.get(dx as usize, dy as usize);
            self.set(x + dx, y + dy, value);
        }
    }

    /// Remove every full row and compact the rows above downwards
    ///
    /// Scans bottom-up over all rows (row 0 included). When a row is removed
    /// the rows above shift down by one and the same index is examined again.
    /// Returns the number of cleared rows.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Clear a row and shift all rows above down, leaving an empty top row
    fn clear_row(&mut self, y: usize) {
        let width = self.cols;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Convert to rows of cells
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

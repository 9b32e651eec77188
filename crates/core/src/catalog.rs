//! Piece catalog - tetromino matrices and their rotation states
//!
//! Every piece is a square matrix (2x2, 3x3 or 4x4) whose nonzero entries mark
//! occupied cells and carry the piece's cell id. The four orientations of each
//! kind are enumerated once, when the catalog is built, by repeatedly applying
//! a clockwise quarter turn (transpose, then reverse each row).

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::types::{Cell, PieceKind, Rotation, EMPTY};

/// Largest supported matrix edge
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of an occupied cell from the matrix's top-left corner
pub type MinoOffset = (i16, i16);

/// A square piece matrix in one orientation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    /// Occupied offsets in row-major order, cached for collision checks.
    minos: ArrayVec<MinoOffset, 16>,
}

impl Shape {
    /// Build a shape from square rows of cell values
    ///
    /// Only the matrix geometry is checked here; catalog-level rules (four
    /// minos, matching cell ids) are enforced by [`PieceCatalog::from_matrices`].
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let size = rows.len();
        if !(2..=MAX_SHAPE_SIZE).contains(&size) || rows.iter().any(|r| r.as_ref().len() != size) {
            return None;
        }

        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..size].copy_from_slice(row.as_ref());
        }
        Some(Self::from_cells(size, cells))
    }

    fn from_cells(size: usize, cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        let mut minos = ArrayVec::new();
        for (y, row) in cells.iter().enumerate().take(size) {
            for (x, &cell) in row.iter().enumerate().take(size) {
                if cell != EMPTY {
                    minos.push((x as i16, y as i16));
                }
            }
        }
        Self { size, cells, minos }
    }

    /// Matrix edge length (also the shape's width for spawning and kicks)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell value at matrix column `x`, row `y` (empty outside the matrix)
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size || y >= self.size {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// Occupied offsets
    pub fn minos(&self) -> &[MinoOffset] {
        &self.minos
    }

    /// Rows of the matrix, each `size` cells long
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.size].iter().map(move |row| &row[..self.size])
    }

    /// Quarter turn clockwise: transpose, then reverse each row
    pub fn rotate_cw(&self) -> Self {
        let n = self.size;
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - x][y];
            }
        }
        Self::from_cells(n, cells)
    }
}

/// Spawn matrices of the standard set
const STANDARD: [(PieceKind, &[&[Cell]]); 7] = [
    (PieceKind::T, &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
    (PieceKind::O, &[&[2, 2], &[2, 2]]),
    (PieceKind::L, &[&[0, 3, 0], &[0, 3, 0], &[0, 3, 3]]),
    (PieceKind::J, &[&[0, 4, 0], &[0, 4, 0], &[4, 4, 0]]),
    (
        PieceKind::I,
        &[&[0, 0, 0, 0], &[5, 5, 5, 5], &[0, 0, 0, 0], &[0, 0, 0, 0]],
    ),
    (PieceKind::S, &[&[0, 6, 6], &[6, 6, 0], &[0, 0, 0]]),
    (PieceKind::Z, &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]]),
];

/// Immutable table of every kind's four orientations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    /// Indexed by `[kind.index()][rotation.index()]`
    shapes: Vec<[Shape; 4]>,
}

impl PieceCatalog {
    /// The standard seven tetrominoes
    pub fn standard() -> Self {
        let spawn = STANDARD.map(|(_, rows)| {
            Shape::from_rows(rows).unwrap_or_else(|| unreachable!("standard shapes are square"))
        });
        Self::from_spawn_shapes(spawn.to_vec())
    }

    /// Build and validate a catalog from caller-supplied spawn matrices
    ///
    /// Every kind must appear exactly once, as a square matrix of edge 2-4
    /// with exactly four occupied cells, each holding the kind's cell id.
    pub fn from_matrices(defs: &[(PieceKind, Vec<Vec<Cell>>)]) -> Result<Self, ConfigError> {
        let mut slots: [Option<Shape>; 7] = Default::default();

        for (kind, rows) in defs {
            let kind = *kind;
            if slots[kind.index()].is_some() {
                return Err(ConfigError::DuplicatePiece(kind));
            }
            let shape = Shape::from_rows(rows).ok_or_else(|| ConfigError::InvalidShape {
                kind,
                reason: "matrix must be square with edge 2 to 4".to_string(),
            })?;
            if shape.minos().len() != 4 {
                return Err(ConfigError::InvalidShape {
                    kind,
                    reason: format!("expected 4 occupied cells, found {}", shape.minos().len()),
                });
            }
            if let Some(bad) = shape.rows().flatten().find(|&&c| c != EMPTY && c != kind.cell()) {
                return Err(ConfigError::InvalidShape {
                    kind,
                    reason: format!("cell value {} does not match id {}", bad, kind.cell()),
                });
            }
            slots[kind.index()] = Some(shape);
        }

        let mut spawn = Vec::with_capacity(7);
        for (kind, slot) in PieceKind::ALL.iter().zip(slots) {
            spawn.push(slot.ok_or(ConfigError::MissingPiece(*kind))?);
        }
        Ok(Self::from_spawn_shapes(spawn))
    }

    fn from_spawn_shapes(spawn: Vec<Shape>) -> Self {
        let shapes = spawn
            .into_iter()
            .map(|north| {
                let east = north.rotate_cw();
                let south = east.rotate_cw();
                let west = south.rotate_cw();
                [north, east, south, west]
            })
            .collect();
        Self { shapes }
    }

    /// Shape of `kind` in `rotation`
    pub fn shape(&self, kind: PieceKind, rotation: Rotation) -> &Shape {
        &self.shapes[kind.index()][rotation.index()]
    }

    /// Shape of `kind` in its spawn orientation
    pub fn spawn_shape(&self, kind: PieceKind) -> &Shape {
        self.shape(kind, Rotation::North)
    }

    /// Widest matrix in the catalog
    pub fn max_size(&self) -> usize {
        self.shapes.iter().map(|s| s[0].size()).max().unwrap_or(0)
    }

    /// Check that every shape fits horizontally on a board `cols` wide
    pub fn check_fits(&self, cols: usize) -> Result<(), ConfigError> {
        for kind in PieceKind::ALL {
            let size = self.spawn_shape(kind).size();
            if size > cols {
                return Err(ConfigError::ShapeTooWide { kind, size, cols });
            }
        }
        Ok(())
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

//! Active piece - position, orientation and movement of the falling piece
//!
//! Movement is always tentative: the candidate placement is tested with
//! [`Board::collide`] and only committed when legal, so an illegal move or
//! rotation leaves the piece exactly where it was.
//!
//! Rotation uses a horizontal wall-kick search instead of the SRS kick
//! tables: after turning, offsets `0, +1, -1, +2, ...` are tried in order
//! (see [`kick_offsets`]) and the first free one wins.

use crate::board::Board;
use crate::catalog::{PieceCatalog, Shape};
use crate::types::{PieceKind, Rotation};

/// Lifecycle of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiecePhase {
    /// Just placed at the spawn position
    Spawned,
    /// Moving freely
    Falling,
    /// Grounded with the lock-delay timer armed
    Locking,
    /// Merged into the board (no active piece)
    Locked,
}

impl PiecePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiecePhase::Spawned => "spawned",
            PiecePhase::Falling => "falling",
            PiecePhase::Locking => "locking",
            PiecePhase::Locked => "locked",
        }
    }
}

/// Active falling piece
///
/// `(x, y)` is the top-left corner of the piece matrix in board coordinates;
/// `y` may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// Place `kind` in spawn orientation, horizontally centered on row 0
    pub fn at_spawn(kind: PieceKind, catalog: &PieceCatalog, cols: usize) -> Self {
        let size = catalog.spawn_shape(kind).size();
        Self {
            kind,
            rotation: Rotation::North,
            x: spawn_column(cols, size),
            y: 0,
        }
    }

    /// Get the matrix for the current rotation
    pub fn shape<'a>(&self, catalog: &'a PieceCatalog) -> &'a Shape {
        catalog.shape(self.kind, self.rotation)
    }

    /// Does the piece overlap walls, floor or settled cells?
    pub fn collides(&self, catalog: &PieceCatalog, board: &Board) -> bool {
        board.collide(self.shape(catalog), self.x, self.y)
    }

    /// Check if the piece is grounded (one row lower would collide)
    pub fn is_grounded(&self, catalog: &PieceCatalog, board: &Board) -> bool {
        board.collide(self.shape(catalog), self.x, self.y + 1)
    }

    /// Shift by (dx, dy) if the target placement is free
    pub fn try_shift(&mut self, dx: i16, dy: i16, catalog: &PieceCatalog, board: &Board) -> bool {
        if board.collide(self.shape(catalog), self.x + dx, self.y + dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate a quarter turn and resolve collisions with the kick search
    ///
    /// On failure the piece keeps its previous orientation and column.
    pub fn try_rotate(&mut self, clockwise: bool, catalog: &PieceCatalog, board: &Board) -> bool {
        let rotation = if clockwise {
            self.rotation.rotate_cw()
        } else {
            self.rotation.rotate_ccw()
        };
        let shape = catalog.shape(self.kind, rotation);

        let kick = kick_offsets(shape.size()).find(|&dx| !board.collide(shape, self.x + dx, self.y));
        match kick {
            Some(dx) => {
                self.rotation = rotation;
                self.x += dx;
                true
            }
            None => false,
        }
    }

    /// How many rows the piece can fall before touching something
    pub fn drop_distance(&self, catalog: &PieceCatalog, board: &Board) -> i16 {
        let shape = self.shape(catalog);
        let mut distance = 0;
        while !board.collide(shape, self.x, self.y + distance + 1) {
            distance += 1;
        }
        distance
    }
}

/// Spawn column for a matrix of `size` on a board `cols` wide
pub fn spawn_column(cols: usize, size: usize) -> i16 {
    (cols / 2) as i16 - (size / 2) as i16
}

/// Horizontal kick candidates for a matrix of edge `size`
///
/// Yields `0`, then alternates right and left with growing distance:
/// `+1, -1, +2, -2, ...`. The search stops before the step that would carry
/// the piece more than `size` columns past its previous try, which leaves
/// `0, +1` for 2-wide matrices and `0, +1, -1, +2` for 3- and 4-wide ones.
pub fn kick_offsets(size: usize) -> impl Iterator<Item = i16> {
    // Steps between tries are 1, -2, 3, -4, ...; the search ends at the first
    // rightward step longer than `size`, so the number of tries beyond the
    // initial one is `size` rounded up to even, minus one.
    let tries = (size + size % 2).saturating_sub(1);
    std::iter::once(0).chain((1..=tries).map(|j| {
        let step = ((j + 1) / 2) as i16;
        if j % 2 == 1 {
            step
        } else {
            -step
        }
    }))
}

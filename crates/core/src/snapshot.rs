//! Read-only view of a session for render collaborators.

use arrayvec::ArrayVec;

use crate::active::{ActivePiece, PiecePhase};
use crate::catalog::PieceCatalog;
use crate::types::{Cell, PieceKind, Rotation};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i16,
    pub y: i16,
    /// Absolute board coordinates of the piece's cells
    pub cells: ArrayVec<(i16, i16), 16>,
}

impl ActiveSnapshot {
    pub fn new(piece: ActivePiece, catalog: &PieceCatalog) -> Self {
        let cells = piece
            .shape(catalog)
            .minos()
            .iter()
            .map(|&(dx, dy)| (piece.x + dx, piece.y + dy))
            .collect();
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            cells,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LockSnapshot {
    pub armed: bool,
    pub remaining_ms: u32,
    pub reset_count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells, `rows * cols` long
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i16>,
    pub phase: PiecePhase,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub pieces_spawned: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub lock: LockSnapshot,
}

impl GameSnapshot {
    /// One board row
    ///
    /// # Panics
    ///
    /// Panics if `y` is not below `rows`.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.board[y * self.cols..(y + 1) * self.cols]
    }

    /// Board cells with the active piece drawn in
    pub fn composed_board(&self) -> Vec<Cell> {
        let mut cells = self.board.clone();
        if let Some(active) = &self.active {
            for &(x, y) in &active.cells {
                if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows {
                    cells[y as usize * self.cols + x as usize] = active.kind.cell();
                }
            }
        }
        cells
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            board: Vec::new(),
            active: None,
            ghost_y: None,
            phase: PiecePhase::Locked,
            next: PieceKind::T,
            hold: None,
            can_hold: true,
            started: false,
            paused: false,
            game_over: false,
            episode_id: 0,
            pieces_spawned: 0,
            score: 0,
            lines: 0,
            level: 0,
            drop_interval_ms: 0,
            lock: LockSnapshot::default(),
        }
    }
}

//! Construction-time errors.
//!
//! Gameplay never fails: illegal placements are reverted in place and game over
//! is a state flag. Only building a session (board dimensions, timing, piece
//! catalog) can be rejected.

use thiserror::Error;

use crate::types::{Cell, PieceKind};

/// Rejected session, board or catalog configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions {rows}x{cols} out of range (rows 4..=64, cols 4..=32)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid timing: {0}")]
    InvalidTiming(&'static str),

    #[error("piece catalog has no shape for {0:?}")]
    MissingPiece(PieceKind),

    #[error("piece catalog defines {0:?} more than once")]
    DuplicatePiece(PieceKind),

    #[error("shape for {kind:?} is malformed: {reason}")]
    InvalidShape { kind: PieceKind, reason: String },

    #[error("shape for {kind:?} is {size} wide but the board has {cols} columns")]
    ShapeTooWide {
        kind: PieceKind,
        size: usize,
        cols: usize,
    },

    #[error("board is {found_rows}x{found_cols}, session expects {rows}x{cols}")]
    BoardMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("cell value {0} is outside 0..=7")]
    InvalidCell(Cell),
}

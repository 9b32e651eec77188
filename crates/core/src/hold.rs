//! Hold slot - stash one piece, swap at most once per spawn

use crate::types::PieceKind;

/// What a hold request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// `can_hold` was false; nothing changed
    Refused,
    /// Slot was empty; the active piece is now stashed
    Stashed,
    /// Slot held this kind; it becomes the active piece
    Swapped(PieceKind),
}

/// Hold slot plus its once-per-spawn gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSlot {
    piece: Option<PieceKind>,
    can_hold: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self {
            piece: None,
            can_hold: true,
        }
    }

    /// Put `current` into the slot, returning what came out
    ///
    /// Closes the gate on success; only [`HoldSlot::rearm`] opens it again.
    pub fn hold(&mut self, current: PieceKind) -> HoldOutcome {
        if !self.can_hold {
            return HoldOutcome::Refused;
        }
        self.can_hold = false;
        match self.piece.replace(current) {
            None => HoldOutcome::Stashed,
            Some(previous) => HoldOutcome::Swapped(previous),
        }
    }

    /// Reopen the gate (natural spawn after a lock)
    pub fn rearm(&mut self) {
        self.can_hold = true;
    }

    pub fn piece(&self) -> Option<PieceKind> {
        self.piece
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}

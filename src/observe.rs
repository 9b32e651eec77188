//! Observation messages - JSON view of a session for external consumers
//!
//! One [`ObservationMessage`] is a line-delimited JSON object carrying the
//! render snapshot (board, active piece, next, hold, counters, flags) plus the
//! most recent lock event. Field names are snake_case; piece kinds and
//! rotations are lowercase strings.

use serde::{Deserialize, Serialize};

use crate::core::{GameSession, GameSnapshot, PiecePhase};
use crate::types::{LockEvent, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

impl Default for ObservationType {
    fn default() -> Self {
        Self::Observation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ObservationType,
    pub seq: u64,
    /// Session time in milliseconds
    pub clock_ms: u64,
    pub episode_id: u32,
    pub board: BoardSnapshot,
    pub board_hash: StateHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub active: Option<ActivePieceSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub ghost_y: Option<i16>,
    pub phase: PhaseLower,
    pub next: PieceKindLower,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub hold: Option<PieceKindLower>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub drop_interval_ms: u32,
    pub lock: LockState,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub last_event: Option<LastEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Rows top to bottom; 0 = empty, 1..=7 = piece id
    pub cells: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePieceSnapshot {
    pub kind: PieceKindLower,
    pub rotation: RotationLower,
    pub x: i16,
    pub y: i16,
    /// Absolute `[x, y]` board coordinates of the piece's cells
    pub cells: Vec<[i16; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    pub armed: bool,
    pub remaining_ms: u32,
    pub reset_count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEvent {
    pub lines_cleared: u32,
    pub score_awarded: u32,
    pub level: u32,
    pub hard_drop: bool,
}

impl From<LockEvent> for LastEvent {
    fn from(value: LockEvent) -> Self {
        Self {
            lines_cleared: value.lines_cleared,
            score_awarded: value.score_awarded,
            level: value.level,
            hard_drop: value.hard_drop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKindLower {
    #[serde(rename = "t")]
    T,
    #[serde(rename = "o")]
    O,
    #[serde(rename = "l")]
    L,
    #[serde(rename = "j")]
    J,
    #[serde(rename = "i")]
    I,
    #[serde(rename = "s")]
    S,
    #[serde(rename = "z")]
    Z,
}

impl From<PieceKind> for PieceKindLower {
    fn from(value: PieceKind) -> Self {
        match value {
            PieceKind::T => Self::T,
            PieceKind::O => Self::O,
            PieceKind::L => Self::L,
            PieceKind::J => Self::J,
            PieceKind::I => Self::I,
            PieceKind::S => Self::S,
            PieceKind::Z => Self::Z,
        }
    }
}

impl From<PieceKindLower> for PieceKind {
    fn from(value: PieceKindLower) -> Self {
        match value {
            PieceKindLower::T => PieceKind::T,
            PieceKindLower::O => PieceKind::O,
            PieceKindLower::L => PieceKind::L,
            PieceKindLower::J => PieceKind::J,
            PieceKindLower::I => PieceKind::I,
            PieceKindLower::S => PieceKind::S,
            PieceKindLower::Z => PieceKind::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationLower {
    #[serde(rename = "north")]
    North,
    #[serde(rename = "east")]
    East,
    #[serde(rename = "south")]
    South,
    #[serde(rename = "west")]
    West,
}

impl From<Rotation> for RotationLower {
    fn from(value: Rotation) -> Self {
        match value {
            Rotation::North => Self::North,
            Rotation::East => Self::East,
            Rotation::South => Self::South,
            Rotation::West => Self::West,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseLower {
    #[serde(rename = "spawned")]
    Spawned,
    #[serde(rename = "falling")]
    Falling,
    #[serde(rename = "locking")]
    Locking,
    #[serde(rename = "locked")]
    Locked,
}

impl From<PiecePhase> for PhaseLower {
    fn from(value: PiecePhase) -> Self {
        match value {
            PiecePhase::Spawned => Self::Spawned,
            PiecePhase::Falling => Self::Falling,
            PiecePhase::Locking => Self::Locking,
            PiecePhase::Locked => Self::Locked,
        }
    }
}

/// Board hash serialized as 16 lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(&s, 16)
            .map(StateHash)
            .map_err(serde::de::Error::custom)
    }
}

/// FNV-1a 64-bit over the row-major board cells
pub fn board_hash(cells: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in cells {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// Build an observation from a snapshot
pub fn build_observation(
    seq: u64,
    clock_ms: u64,
    snap: &GameSnapshot,
    last_event: Option<LockEvent>,
) -> ObservationMessage {
    let cells = if snap.cols == 0 {
        Vec::new()
    } else {
        snap.board.chunks(snap.cols).map(|r| r.to_vec()).collect()
    };

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        clock_ms,
        episode_id: snap.episode_id,
        board: BoardSnapshot {
            width: snap.cols,
            height: snap.rows,
            cells,
        },
        board_hash: StateHash(board_hash(&snap.board)),
        active: snap.active.as_ref().map(|a| ActivePieceSnapshot {
            kind: a.kind.into(),
            rotation: a.rotation.into(),
            x: a.x,
            y: a.y,
            cells: a.cells.iter().map(|&(x, y)| [x, y]).collect(),
        }),
        ghost_y: snap.ghost_y,
        phase: snap.phase.into(),
        next: snap.next.into(),
        hold: snap.hold.map(Into::into),
        can_hold: snap.can_hold,
        score: snap.score,
        lines: snap.lines,
        level: snap.level,
        paused: snap.paused,
        game_over: snap.game_over,
        drop_interval_ms: snap.drop_interval_ms,
        lock: LockState {
            armed: snap.lock.armed,
            remaining_ms: snap.lock.remaining_ms,
            reset_count: snap.lock.reset_count,
        },
        last_event: last_event.map(Into::into),
    }
}

/// Observe a session, consuming its pending lock event
pub fn observe(session: &mut GameSession, seq: u64) -> ObservationMessage {
    let last_event = session.take_last_event();
    let snap = session.snapshot();
    build_observation(seq, session.clock_ms(), &snap, last_event)
}

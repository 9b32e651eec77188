//! Game session - owns all mutable game state
//!
//! This module ties together the board, catalog, lookahead generator, hold
//! slot and lock-delay timer. It runs the spawn → fall → lock → clear →
//! respawn cycle, keeps score, and exposes one handler per player intent.
//!
//! Time only moves through [`GameSession::tick`] (or [`GameSession::tick_at`]
//! for absolute frame timestamps). Intents between ticks act at the current
//! session time, which keeps every run reproducible from its seed and input
//! sequence.

use crate::active::{ActivePiece, PiecePhase};
use crate::board::Board;
use crate::catalog::PieceCatalog;
use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::hold::{HoldOutcome, HoldSlot};
use crate::lock_delay::LockDelay;
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_level, get_drop_interval_ms, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, LockSnapshot};
use crate::types::{GameAction, LockEvent, PieceKind};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    catalog: PieceCatalog,
    board: Board,
    active: Option<ActivePiece>,
    phase: PiecePhase,
    /// Single-piece lookahead, refilled as soon as it is consumed.
    next: PieceKind,
    generator: PieceGenerator,
    hold: HoldSlot,
    lock: LockDelay,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    pieces_spawned: u32,
    score: u32,
    lines: u32,
    level: u32,
    /// Session time in ms; advances only while playing.
    clock_ms: u64,
    /// Time accumulated towards the next gravity step.
    drop_counter_ms: u32,
    /// Previous `tick_at` timestamp; cleared on pause so resume starts fresh.
    last_frame_ms: Option<u64>,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl GameSession {
    /// Create a new game on the canonical board with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(
            SessionConfig::with_seed(seed),
            PieceCatalog::standard(),
            seed,
        )
    }

    /// Create a game from a custom configuration
    pub fn with_config(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_catalog(config, PieceCatalog::standard())
    }

    /// Create a game from a custom configuration and piece catalog
    pub fn with_catalog(config: SessionConfig, catalog: PieceCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.check_fits(config.cols)?;
        let seed = config.seed;
        Ok(Self::build(config, catalog, seed))
    }

    fn build(config: SessionConfig, catalog: PieceCatalog, seed: u32) -> Self {
        let mut generator = PieceGenerator::new(config.randomizer, seed);
        let next = generator.draw();

        Self {
            board: Board::empty(config.rows, config.cols),
            lock: LockDelay::new(config.lock_delay_ms, config.lock_reset_limit),
            config,
            catalog,
            active: None,
            phase: PiecePhase::Locked,
            next,
            generator,
            hold: HoldSlot::new(),
            last_event: None,
            episode_id: 0,
            pieces_spawned: 0,
            score: 0,
            lines: 0,
            level: 0,
            clock_ms: 0,
            drop_counter_ms: 0,
            last_frame_ms: None,
            started: false,
            paused: false,
            game_over: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Final score once the game has ended
    pub fn final_score(&self) -> Option<u32> {
        self.game_over.then_some(self.score)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold.piece()
    }

    pub fn can_hold(&self) -> bool {
        self.hold.can_hold()
    }

    pub fn lock_delay(&self) -> &LockDelay {
        &self.lock
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Session time in milliseconds
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Replace the settled cells (puzzle setups, tests)
    ///
    /// The board must match the session's dimensions. The active piece is left
    /// where it is.
    pub fn load_board(&mut self, board: Board) -> Result<(), ConfigError> {
        if board.height() != self.config.rows || board.width() != self.config.cols {
            return Err(ConfigError::BoardMismatch {
                rows: self.config.rows,
                cols: self.config.cols,
                found_rows: board.height(),
                found_cols: board.width(),
            });
        }
        self.board = board;
        Ok(())
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    fn accepts_input(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Consume the lookahead and refill it
    fn take_next(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = self.generator.draw();
        kind
    }

    /// Natural spawn after a lock (or at start): reopens hold
    fn spawn_next(&mut self) -> bool {
        let kind = self.take_next();
        self.hold.rearm();
        self.spawn(kind)
    }

    /// Place `kind` at the spawn position as the active piece
    ///
    /// Replaces any current active piece. If the spawn position is already
    /// blocked the game is over and no piece is active.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::at_spawn(kind, &self.catalog, self.board.width());
        self.lock.reset();
        self.drop_counter_ms = 0;

        if piece.collides(&self.catalog, &self.board) {
            self.active = None;
            self.phase = PiecePhase::Locked;
            self.game_over = true;
            self.last_frame_ms = None;
            return false;
        }

        self.active = Some(piece);
        self.phase = PiecePhase::Spawned;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    /// A move or rotation went through: postpone lock if grounded
    fn on_manipulated(&mut self) {
        self.lock.notify_reset(self.clock_ms);
        self.phase = if self.lock.is_armed() {
            PiecePhase::Locking
        } else {
            PiecePhase::Falling
        };
    }

    /// Try to move the active piece one column (`dir` is -1 or +1)
    pub(crate) fn try_move(&mut self, dir: i16) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };
        if !piece.try_shift(dir, 0, &self.catalog, &self.board) {
            return false;
        }
        self.active = Some(piece);
        self.on_manipulated();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    /// Try to rotate the active piece with wall kicks
    pub(crate) fn try_rotate(&mut self, clockwise: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };
        if !piece.try_rotate(clockwise, &self.catalog, &self.board) {
            return false;
        }
        self.active = Some(piece);
        self.on_manipulated();
        true
    }

    /// Rotate clockwise
    pub fn rotate(&mut self) -> bool {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Move the piece down one row
    ///
    /// Returns whether it moved. A blocked piece arms the lock-delay timer
    /// instead of locking.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.step_down()
    }

    /// Shared by the soft-drop intent and gravity
    fn step_down(&mut self) -> bool {
        self.drop_counter_ms = 0;
        let Some(mut piece) = self.active else {
            return false;
        };

        if piece.try_shift(0, 1, &self.catalog, &self.board) {
            self.active = Some(piece);
            // Left the ground: any pending lock is void, budget restored
            self.lock.reset();
            self.phase = PiecePhase::Falling;
            true
        } else {
            self.lock.arm(self.clock_ms);
            self.phase = PiecePhase::Locking;
            false
        }
    }

    /// Drop the active piece to the bottom and lock it immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.y += piece.drop_distance(&self.catalog, &self.board);
        self.active = Some(piece);
        self.lock.cancel();
        self.lock_active(true);
        true
    }

    /// Lock-delay expiry
    ///
    /// Locks only if the piece is still grounded; a piece that slid off its
    /// ledge since the timer was armed just has the timer cancelled. Returns
    /// whether a lock happened.
    pub fn force_lock(&mut self) -> bool {
        if !self.lock.is_armed() {
            return false;
        }
        self.lock.cancel();

        let Some(piece) = self.active else {
            return false;
        };
        if piece.is_grounded(&self.catalog, &self.board) {
            self.lock_active(false);
            true
        } else {
            self.phase = PiecePhase::Falling;
            false
        }
    }

    /// Merge the active piece, clear lines, score, respawn
    fn lock_active(&mut self, hard_drop: bool) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(piece.shape(&self.catalog), piece.x, piece.y);
        self.phase = PiecePhase::Locked;

        let cleared = self.board.sweep();
        let awarded = line_clear_score(cleared);
        self.score = self.score.saturating_add(awarded);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = calculate_level(self.lines, self.config.lines_per_level);

        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            score_awarded: awarded,
            level: self.level,
            hard_drop,
        });

        self.spawn_next();
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Swap the active piece with the hold slot (once per spawn)
    pub fn hold(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        match self.hold.hold(piece.kind) {
            HoldOutcome::Refused => false,
            HoldOutcome::Stashed => {
                let kind = self.take_next();
                self.spawn(kind);
                true
            }
            HoldOutcome::Swapped(kind) => {
                self.spawn(kind);
                true
            }
        }
    }

    /// Pause or resume
    ///
    /// Pausing cancels a pending lock. Either way the frame clock is rebased,
    /// so time spent paused is never replayed as gravity.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        self.last_frame_ms = None;
        if self.paused && self.lock.is_armed() {
            self.lock.cancel();
            self.phase = PiecePhase::Falling;
        }
        true
    }

    /// Start a fresh episode with the same configuration and catalog
    ///
    /// The piece sequence continues from the current RNG state, so
    /// consecutive episodes differ.
    pub fn restart(&mut self) {
        let seed = self.generator.seed();
        let episode_id = self.episode_id.wrapping_add(1);
        let config = self.config.clone();
        let catalog = std::mem::take(&mut self.catalog);

        *self = Self::build(config, catalog, seed);
        self.episode_id = episode_id;
        self.start();
    }

    /// Check if the active piece is on the ground
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(ref piece) => piece.is_grounded(&self.catalog, &self.board),
            None => false,
        }
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i16> {
        let active = self.active?;
        Some(active.y + active.drop_distance(&self.catalog, &self.board))
    }

    /// Advance the session by `elapsed_ms`
    ///
    /// An expired lock timer is resolved first. Otherwise gravity time
    /// accumulates, and once it exceeds the drop interval the piece steps down
    /// (only while no lock timer is armed). Returns whether state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.accepts_input() {
            return false;
        }

        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms as u64);

        if self.lock.expired(self.clock_ms) {
            self.force_lock();
            return true;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms() && !self.lock.is_armed() {
            self.step_down();
            return true;
        }

        false
    }

    /// Advance using an absolute frame timestamp
    ///
    /// The first frame (and the first after a pause, resume or game start)
    /// only records the timestamp.
    pub fn tick_at(&mut self, timestamp_ms: u64) -> bool {
        if !self.accepts_input() {
            self.last_frame_ms = None;
            return false;
        }
        let elapsed = match self.last_frame_ms {
            Some(prev) => timestamp_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_frame_ms = Some(timestamp_ms);
        self.tick(elapsed.min(u32::MAX as u64) as u32)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.height();
        out.cols = self.board.width();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());

        out.active = self
            .active
            .map(|piece| ActiveSnapshot::new(piece, &self.catalog));
        out.ghost_y = self.ghost_y();
        out.phase = self.phase;
        out.next = self.next;
        out.hold = self.hold.piece();
        out.can_hold = self.hold.can_hold();
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.pieces_spawned = self.pieces_spawned;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms();
        out.lock = LockSnapshot {
            armed: self.lock.is_armed(),
            remaining_ms: self.lock.remaining_ms(self.clock_ms).unwrap_or(0),
            reset_count: self.lock.reset_count(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

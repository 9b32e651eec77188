//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every game rule and all mutable game state. It has no
//! dependencies on rendering, input devices, timers or I/O:
//!
//! - **Deterministic**: the same seed and intent sequence replay identically
//! - **Testable**: time is an explicit `tick(elapsed_ms)` argument, so lock
//!   delay and gravity are exercised without waiting on a wall clock
//! - **Portable**: any frontend (terminal, canvas, headless driver) can embed it
//!
//! # Module Structure
//!
//! - [`catalog`]: tetromino matrices and their four pre-enumerated rotations
//! - [`board`]: grid storage, collision test, merge and line sweep
//! - [`active`]: the falling piece, movement and the wall-kick search
//! - [`lock_delay`]: grounded-piece timer with the 15-reset limit
//! - [`hold`]: the once-per-spawn hold slot
//! - [`session`]: [`GameSession`], which owns everything and runs the cycle
//! - [`rng`]: seeded uniform and seven-bag generators for the lookahead
//! - [`scoring`]: line-clear points, levels and gravity intervals
//! - [`snapshot`]: read-only state for render collaborators
//!
//! # Game Rules
//!
//! - **Spawn**: centered on row 0; a blocked spawn ends the game
//! - **Rotation**: clockwise quarter turns with horizontal kicks `0, +1, -1, +2`
//! - **Lock Delay**: 500ms after grounding, restarted by moves and rotations up
//!   to 15 times
//! - **Hold**: one stash or swap per spawned piece
//! - **Scoring**: `100 * n²` for `n` lines cleared by one lock
//! - **Levels**: one per 10 lines, each shortening gravity down to 100ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_spawned(), 2);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`] once per frame with the elapsed milliseconds, or
//! [`GameSession::tick_at`] with the frame timestamp. Gravity steps the piece
//! once the accumulated time exceeds the level's drop interval; an armed lock
//! timer suspends gravity until it resolves.

pub mod active;
pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hold;
pub mod lock_delay;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use active::{kick_offsets, ActivePiece, PiecePhase};
pub use board::Board;
pub use catalog::{PieceCatalog, Shape};
pub use config::{Randomizer, SessionConfig};
pub use error::ConfigError;
pub use hold::{HoldOutcome, HoldSlot};
pub use lock_delay::LockDelay;
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_level, get_drop_interval_ms, line_clear_score};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot, LockSnapshot};

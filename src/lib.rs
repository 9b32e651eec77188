//! Blockfall (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `blockfall::{core,types}` and adds the headless runner
//! pieces: JSON observations, intent scripts and environment configuration.

pub use blockfall_core as core;
pub use blockfall_types as types;

pub mod config;
pub mod observe;
pub mod script;

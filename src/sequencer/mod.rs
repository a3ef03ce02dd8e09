//! Phase sequencing
//!
//! # Architecture
//!
//! - [`SequencerState`]: owned progress of a session
//! - [`PhaseSequencer`]: the state machine behind `configure`, `start`, `tick` and `stop`
//! - [`ticker`]: the periodic task that drives `tick` and honours cancellation

pub mod engine;
pub mod state;
pub mod ticker;

pub use engine::PhaseSequencer;
pub use state::SequencerState;
pub use ticker::{SharedSequencer, TickerExit, spawn_ticker};

//! `pacer` - Guided breathing exercise timer
//!
//! Walks a cyclic set of timed breathing phases (the 4-7-8 pattern by
//! default) one tick at a time, and renders each step to a terminal or as
//! JSON events.

pub mod cli;
pub mod config;
pub mod error;
pub mod locale;
pub mod observability;
pub mod phase;
pub mod presenter;
pub mod sequencer;
pub mod session;

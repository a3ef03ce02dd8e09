//! Observability module
//!
//! Diagnostic logging for `pacer`. Logs go to stderr so they never mix
//! with presenter output on stdout.

pub mod logging;

pub use logging::{LOG_LEVEL_ENV, LogFormat, init_logging, verbosity_to_directive};

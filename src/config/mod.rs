//! Configuration module
//!
//! Loads and validates `pacer` configuration files and resolves them,
//! together with command-line values, into runtime [`Settings`].

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use loader::{ConfigLoader, LoadResult, LoadWarning};
pub use schema::{PacerConfig, PhaseConfig};
pub use settings::{Settings, SettingsOverrides};
pub use validation::{ValidationResult, Validator};

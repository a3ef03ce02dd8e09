//! Error types for `pacer`
//!
//! One enum per concern, aggregated by [`PacerError`] which also carries
//! the mapping to process exit codes.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `pacer` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Sequencer error (reconfiguration while running, bad phase set)
    pub const SEQUENCER_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `pacer` operations.
#[derive(Debug, Error)]
pub enum PacerError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sequencer rejected an operation
    #[error(transparent)]
    Sequencer(#[from] SequencerError),

    /// Phase set could not be built
    #[error(transparent)]
    PhaseSet(#[from] PhaseSetError),

    /// Output could not be rendered
    #[error(transparent)]
    Present(#[from] PresentError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PacerError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::PhaseSet(_) | Self::Json(_) => ExitCode::CONFIG_ERROR,
            Self::Sequencer(_) => ExitCode::SEQUENCER_ERROR,
            Self::Present(_) => ExitCode::ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}: {} error(s)", errors.len())]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "phases[2].duration")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Sequencer Errors
// ============================================================================

/// Operations the phase sequencer refuses to perform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequencerError {
    /// Configuration attempted while a session is running
    #[error("sequencer is already running; stop it before reconfiguring")]
    AlreadyRunning,

    /// Cycle target must be at least one
    #[error("invalid cycle count {0}: must be at least 1")]
    InvalidCycles(u32),

    /// Replacement labels do not line up with the active phase set
    #[error("incompatible phase set: {reason}")]
    IncompatiblePhaseSet {
        /// Why the replacement was refused
        reason: String,
    },
}

/// Phase set construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseSetError {
    /// A phase set needs at least one phase
    #[error("phase set is empty")]
    Empty,

    /// Every phase must last at least one tick
    #[error("phase {index} has a zero duration")]
    ZeroDuration {
        /// Zero-based index of the offending phase
        index: usize,
    },

    /// Visual tag name not recognised
    #[error("unknown visual tag '{tag}'{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
    UnknownTag {
        /// The tag as written
        tag: String,
        /// Closest known tag, if any is near enough
        suggestion: Option<String>,
    },
}

// ============================================================================
// Presentation Errors
// ============================================================================

/// Rendering failures reported by a presenter.
///
/// These never affect sequencer state; the sequencer logs and carries on.
#[derive(Debug, Error)]
pub enum PresentError {
    /// Writing to the output failed
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing an event failed
    #[error("event serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::SEQUENCER_ERROR, 5);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_sequencer_error_exit_code() {
        let err: PacerError = SequencerError::AlreadyRunning.into();
        assert_eq!(err.exit_code(), ExitCode::SEQUENCER_ERROR);
    }

    #[test]
    fn test_phase_set_error_exit_code() {
        let err: PacerError = PhaseSetError::Empty.into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: PacerError = ConfigError::MissingFile {
            path: PathBuf::from("/test"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: PacerError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue {
            path: "phases[0].duration".to_string(),
            message: "duration must be positive".to_string(),
            severity: Severity::Error,
        };
        assert_eq!(
            issue.to_string(),
            "error: duration must be positive at phases[0].duration"
        );
    }

    #[test]
    fn test_validation_issue_warning_display() {
        let issue = ValidationIssue {
            path: "cycles".to_string(),
            message: "unusually many cycles".to_string(),
            severity: Severity::Warning,
        };
        assert_eq!(issue.to_string(), "warning: unusually many cycles at cycles");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("pacer.yaml"),
            line: Some(3),
            message: "unexpected token".to_string(),
        };
        assert!(err.to_string().contains("pacer.yaml"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_unknown_tag_display_with_suggestion() {
        let err = PhaseSetError::UnknownTag {
            tag: "inhail".to_string(),
            suggestion: Some("inhale".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unknown visual tag 'inhail' (did you mean 'inhale'?)"
        );
    }

    #[test]
    fn test_unknown_tag_display_without_suggestion() {
        let err = PhaseSetError::UnknownTag {
            tag: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown visual tag 'zzz'");
    }
}

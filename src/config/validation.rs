//! Configuration validation
//!
//! Semantic checks on a deserialized [`PacerConfig`]. Validation collects
//! ALL errors (doesn't stop at first) to give complete feedback.

use std::time::Duration;

use crate::config::schema::{PacerConfig, PhaseConfig};
use crate::error::{Severity, ValidationIssue};
use crate::phase::VisualTag;

/// Cycle counts above this are accepted but flagged.
pub const PRACTICAL_MAX_CYCLES: u32 = 10;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns every issue found.
    pub fn validate(&mut self, config: &PacerConfig) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        if let Some(cycles) = config.cycles {
            self.validate_cycles(cycles);
        }
        if let Some(tick) = &config.tick {
            if let Some(d) = self.validate_duration("tick", tick) {
                if d.is_zero() {
                    self.add_error("tick", "Tick length must be greater than zero");
                }
            }
        }
        if let Some(hold) = &config.completion_hold {
            self.validate_duration("completion_hold", hold);
        }
        if let Some(phases) = &config.phases {
            self.validate_phases(phases);
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_cycles(&mut self, cycles: u32) {
        if cycles == 0 {
            self.add_error("cycles", "Cycle count must be at least 1");
        } else if cycles > PRACTICAL_MAX_CYCLES {
            self.add_warning(
                "cycles",
                &format!("{cycles} cycles is more than the usual maximum of {PRACTICAL_MAX_CYCLES}"),
            );
        }
    }

    /// Parses a humantime duration, recording an error when it fails.
    fn validate_duration(&mut self, path: &str, value: &str) -> Option<Duration> {
        match humantime::parse_duration(value) {
            Ok(d) => Some(d),
            Err(e) => {
                self.add_error(path, &format!("Invalid duration '{value}': {e}"));
                None
            }
        }
    }

    fn validate_phases(&mut self, phases: &[PhaseConfig]) {
        if phases.is_empty() {
            self.add_error("phases", "At least one phase is required");
            return;
        }

        for (i, phase) in phases.iter().enumerate() {
            if phase.duration == 0 {
                self.add_error(
                    &format!("phases[{i}].duration"),
                    "Phase duration must be at least 1",
                );
            }
            if phase.label.trim().is_empty() {
                self.add_warning(&format!("phases[{i}].label"), "Phase label is empty");
            }
            if let Err(e) = phase.tag.parse::<VisualTag>() {
                self.add_error(&format!("phases[{i}].tag"), &e.to_string());
            }
        }
    }

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

//! Configuration file schema
//!
//! Mirrors the YAML accepted by `--config`. Every field is optional; unset
//! fields fall back to CLI flags, environment and built-in defaults. Values
//! are checked by [`Validator`](super::Validator), not by deserialization,
//! so that all problems can be reported at once.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Root of a `pacer` configuration file.
///
/// ```yaml
/// cycles: 4
/// locale: en
/// tick: 1s
/// completion_hold: 3s
/// phases:
///   - label: "breathe in"
///     duration: 4
///     tag: inhale
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacerConfig {
    /// Number of cycles per session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles: Option<u32>,

    /// Display language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,

    /// Tick length as a human-readable duration (`1s`, `500ms`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick: Option<String>,

    /// Delay before the idle prompt follows the completion message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_hold: Option<String>,

    /// Custom phases replacing the built-in 4-7-8 set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<PhaseConfig>>,
}

/// One configured phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseConfig {
    /// Display text; may contain line breaks.
    pub label: String,

    /// Length of the phase in ticks.
    pub duration: u32,

    /// Visual style: `inhale`, `hold` or `exhale`.
    pub tag: String,
}

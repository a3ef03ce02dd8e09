//! JSON event presenter
//!
//! Emits every sequencer event as one JSON object per line (JSONL), each
//! carrying a monotonically increasing sequence number, for consumption by
//! other programs.

use std::io::{BufWriter, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::PresentError;
use crate::locale::Locale;
use crate::phase::{Phase, Pulse, VisualTag, indicator};

use super::Presenter;

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// A discrete event rendered by [`JsonPresenter`].
///
/// Tagged with `"type"` when serialized so consumers can dispatch on it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A phase began.
    PhaseChanged {
        /// When the phase began.
        timestamp: DateTime<Utc>,
        /// Display text of the phase.
        label: String,
        /// Style category.
        tag: VisualTag,
        /// Indicator movement for the phase.
        pulse: Pulse,
        /// Ticks remaining.
        time_left: u32,
        /// Full length of the phase in ticks.
        duration: u32,
    },

    /// The countdown advanced within a phase.
    Tick {
        /// When the tick happened.
        timestamp: DateTime<Utc>,
        /// Ticks remaining.
        time_left: u32,
    },

    /// The session ended.
    Stopped {
        /// When the session ended.
        timestamp: DateTime<Utc>,
        /// Whether the cycle target was reached.
        completed: bool,
        /// Message shown to the user.
        message: String,
    },

    /// The idle prompt is showing.
    Idle {
        /// When the prompt appeared.
        timestamp: DateTime<Utc>,
        /// Prompt text.
        prompt: String,
    },

    /// The program is exiting.
    Farewell {
        /// When the program exited.
        timestamp: DateTime<Utc>,
        /// Closing message.
        message: String,
    },
}

/// Wraps an [`Event`] with its sequence number.
#[derive(Debug, Serialize)]
struct EventEnvelope<'a> {
    /// Zero-based, monotonically increasing sequence counter.
    sequence: u64,
    /// The wrapped event (flattened into the same JSON object).
    #[serde(flatten)]
    event: &'a Event,
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Buffered JSONL event writer.
///
/// Each event is serialized as a single line and flushed immediately.
/// Failures are returned to the sequencer, which logs them.
pub struct JsonPresenter {
    writer: BufWriter<Box<dyn Write + Send>>,
    sequence: u64,
    locale: Locale,
}

impl JsonPresenter {
    /// Creates a presenter that writes to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, locale: Locale) -> Self {
        Self {
            writer: BufWriter::new(writer),
            sequence: 0,
            locale,
        }
    }

    /// Creates a presenter that writes to stdout.
    #[must_use]
    pub fn stdout(locale: Locale) -> Self {
        Self::new(Box::new(std::io::stdout()), locale)
    }

    /// Writes one event line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails. The sequence
    /// number is consumed either way.
    pub fn emit(&mut self, event: &Event) -> Result<(), PresentError> {
        let envelope = EventEnvelope {
            sequence: self.sequence,
            event,
        };
        self.sequence += 1;

        let line = serde_json::to_string(&envelope)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the number of events emitted so far.
    #[must_use]
    pub const fn event_count(&self) -> u64 {
        self.sequence
    }
}

impl Presenter for JsonPresenter {
    fn on_phase_changed(&mut self, phase: &Phase, time_left: u32) -> Result<(), PresentError> {
        self.emit(&Event::PhaseChanged {
            timestamp: Utc::now(),
            label: phase.label().to_string(),
            tag: phase.visual_tag(),
            pulse: indicator(phase.visual_tag()).pulse,
            time_left,
            duration: phase.duration_secs(),
        })
    }

    fn on_tick(&mut self, time_left: u32) -> Result<(), PresentError> {
        self.emit(&Event::Tick {
            timestamp: Utc::now(),
            time_left,
        })
    }

    fn on_stopped(&mut self, completed: bool) -> Result<(), PresentError> {
        let prompts = self.locale.prompts();
        let message = if completed {
            prompts.completed
        } else {
            prompts.click_start
        };
        self.emit(&Event::Stopped {
            timestamp: Utc::now(),
            completed,
            message: message.to_string(),
        })
    }

    fn on_idle(&mut self) -> Result<(), PresentError> {
        self.emit(&Event::Idle {
            timestamp: Utc::now(),
            prompt: self.locale.prompts().click_start.to_string(),
        })
    }

    fn on_farewell(&mut self) -> Result<(), PresentError> {
        self.emit(&Event::Farewell {
            timestamp: Utc::now(),
            message: self.locale.prompts().thank_you.to_string(),
        })
    }

    fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}

// Box<dyn Write> is not Debug
impl std::fmt::Debug for JsonPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonPresenter")
            .field("sequence", &self.sequence)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

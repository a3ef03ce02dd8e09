//! Built-in language sets
//!
//! Each [`Locale`] supplies the default 4-7-8 phase set with localized
//! labels, plus the idle and completion prompts shown around a session.
//! Durations are identical across locales, so switching language mid-session
//! only changes what is displayed.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::phase::{Phase, PhaseSet, VisualTag};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Dutch.
    #[default]
    Nl,
    /// English.
    En,
}

/// Prompts shown outside of running phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prompts {
    /// Shown while idle, inviting the user to start.
    pub click_start: &'static str,
    /// Shown when all cycles were completed.
    pub completed: &'static str,
    /// Shown when leaving the program.
    pub thank_you: &'static str,
}

/// Labels of the default phases, with their durations and tags.
const PHASES_NL: [(&str, u32, VisualTag); 3] = [
    ("inademen\ndoor je neus", 4, VisualTag::Inhale),
    ("vasthouden", 7, VisualTag::Hold),
    ("uitademen\ndoor je mond", 8, VisualTag::Exhale),
];

const PHASES_EN: [(&str, u32, VisualTag); 3] = [
    ("inhale\nthrough your nose", 4, VisualTag::Inhale),
    ("hold", 7, VisualTag::Hold),
    ("exhale\nthrough your mouth", 8, VisualTag::Exhale),
];

impl Locale {
    /// The other locale.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Nl => Self::En,
            Self::En => Self::Nl,
        }
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Nl => "nl",
            Self::En => "en",
        }
    }

    /// The built-in phase set with labels in this language.
    ///
    /// # Panics
    ///
    /// Panics if a built-in table is empty or has a zero duration.
    #[must_use]
    pub fn phase_set(self) -> PhaseSet {
        let table = match self {
            Self::Nl => &PHASES_NL,
            Self::En => &PHASES_EN,
        };
        let phases = table
            .iter()
            .map(|&(label, secs, tag)| Phase::new(label, secs, tag))
            .collect();
        PhaseSet::new(phases).expect("built-in phase tables are valid")
    }

    /// Idle and completion prompts in this language.
    #[must_use]
    pub const fn prompts(self) -> Prompts {
        match self {
            Self::Nl => Prompts {
                click_start: "klik op start",
                completed: "goed gedaan!",
                thank_you: "bedankt!",
            },
            Self::En => Prompts {
                click_start: "click start",
                completed: "well done!",
                thank_you: "thank you!",
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

//! Phases and phase sets
//!
//! A [`Phase`] is one timed segment of a breathing cycle. A [`PhaseSet`] is
//! the ordered, cyclic list of phases a sequencer walks through: after the
//! last phase the first one follows again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PhaseSetError;

// ============================================================================
// Visual Tags
// ============================================================================

/// Style category of a phase, used by presenters to pick a visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualTag {
    /// Breathing in; the indicator grows.
    Inhale,
    /// Holding the breath; the indicator stays full.
    Hold,
    /// Breathing out; the indicator shrinks.
    Exhale,
}

impl VisualTag {
    /// Every tag, in cycle order.
    pub const ALL: [Self; 3] = [Self::Inhale, Self::Hold, Self::Exhale];

    /// Returns the configuration name of this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inhale => "inhale",
            Self::Hold => "hold",
            Self::Exhale => "exhale",
        }
    }
}

impl fmt::Display for VisualTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualTag {
    type Err = PhaseSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| PhaseSetError::UnknownTag {
                tag: s.to_string(),
                suggestion: suggest_tag(&wanted),
            })
    }
}

/// Suggests the closest known tag for a misspelled one.
///
/// Returns a match only if its Damerau-Levenshtein distance is ≤ 2.
#[must_use]
pub fn suggest_tag(input: &str) -> Option<String> {
    VisualTag::ALL
        .iter()
        .map(|t| (t.as_str(), strsim::damerau_levenshtein(input, t.as_str())))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name.to_string())
}

// ============================================================================
// Indicator
// ============================================================================

/// Direction the pulsing indicator moves in during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pulse {
    /// Grows from rest size to full size.
    Expand,
    /// Stays at full size.
    Steady,
    /// Shrinks from full size back to rest size.
    Contract,
}

/// How a presenter should draw the breathing indicator for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    /// Movement over the phase.
    pub pulse: Pulse,
    /// Truecolor accent for the phase.
    pub color: (u8, u8, u8),
}

/// Maps a visual tag to its indicator.
#[must_use]
pub const fn indicator(tag: VisualTag) -> Indicator {
    match tag {
        VisualTag::Inhale => Indicator {
            pulse: Pulse::Expand,
            color: (0x8E, 0x80, 0xFF),
        },
        VisualTag::Hold => Indicator {
            pulse: Pulse::Steady,
            color: (0xBA, 0xB2, 0xFF),
        },
        VisualTag::Exhale => Indicator {
            pulse: Pulse::Contract,
            color: (0xFF, 0x88, 0x59),
        },
    }
}

impl Pulse {
    /// Width of the indicator, in cells, after `elapsed` of `duration` ticks.
    ///
    /// Interpolates between `min` and `max`; the result never leaves that range.
    #[must_use]
    pub fn width(self, elapsed: u32, duration: u32, min: usize, max: usize) -> usize {
        let span = max.saturating_sub(min);
        let duration = duration.max(1) as usize;
        let elapsed = (elapsed as usize).min(duration);
        let grown = span * elapsed / duration;
        match self {
            Self::Expand => min + grown,
            Self::Steady => max,
            Self::Contract => max - grown,
        }
    }
}

// ============================================================================
// Phase
// ============================================================================

/// One named, timed segment of the breathing cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    label: String,
    duration_secs: u32,
    tag: VisualTag,
}

impl Phase {
    /// Creates a phase. Durations are checked when the phase joins a [`PhaseSet`].
    #[must_use]
    pub fn new(label: impl Into<String>, duration_secs: u32, tag: VisualTag) -> Self {
        Self {
            label: label.into(),
            duration_secs,
            tag,
        }
    }

    /// Display text; may span several lines.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Length of the phase in ticks.
    #[must_use]
    pub const fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Style category of the phase.
    #[must_use]
    pub const fn visual_tag(&self) -> VisualTag {
        self.tag
    }
}

// ============================================================================
// PhaseSet
// ============================================================================

/// Ordered, non-empty, cyclic sequence of phases.
///
/// The only constructor is [`PhaseSet::new`], so every value upholds: at
/// least one phase, and every duration is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhaseSet {
    phases: Vec<Phase>,
}

impl PhaseSet {
    /// Builds a phase set.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseSetError::Empty`] for an empty list and
    /// [`PhaseSetError::ZeroDuration`] for the first phase lasting zero ticks.
    pub fn new(phases: Vec<Phase>) -> Result<Self, PhaseSetError> {
        if phases.is_empty() {
            return Err(PhaseSetError::Empty);
        }
        if let Some(index) = phases.iter().position(|p| p.duration_secs == 0) {
            return Err(PhaseSetError::ZeroDuration { index });
        }
        Ok(Self { phases })
    }

    /// Number of phases in one cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Returns `false` for every constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Returns the phase at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Returns the phase at `index`, wrapping around the cycle.
    #[must_use]
    pub fn phase(&self, index: usize) -> &Phase {
        &self.phases[index % self.phases.len()]
    }

    /// Returns the first phase of the cycle.
    #[must_use]
    pub fn first(&self) -> &Phase {
        &self.phases[0]
    }

    /// Index of the phase following `index`, wrapping to 0 after the last.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phases.len()
    }

    /// Iterates the phases in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }

    /// Ticks in one full cycle.
    #[must_use]
    pub fn cycle_secs(&self) -> u64 {
        self.phases.iter().map(|p| u64::from(p.duration_secs)).sum()
    }

    /// Ticks in `cycles` full cycles.
    #[must_use]
    pub fn total_secs(&self, cycles: u32) -> u64 {
        self.cycle_secs() * u64::from(cycles)
    }

    /// Whether `other` has the same phase count and durations, so it can
    /// replace this set's labels without changing timing.
    #[must_use]
    pub fn same_timing(&self, other: &Self) -> bool {
        self.phases.len() == other.phases.len()
            && self
                .phases
                .iter()
                .zip(&other.phases)
                .all(|(a, b)| a.duration_secs == b.duration_secs)
    }
}

impl<'a> IntoIterator for &'a PhaseSet {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_seven_eight() -> PhaseSet {
        PhaseSet::new(vec![
            Phase::new("inhale", 4, VisualTag::Inhale),
            Phase::new("hold", 7, VisualTag::Hold),
            Phase::new("exhale", 8, VisualTag::Exhale),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(PhaseSet::new(vec![]), Err(PhaseSetError::Empty));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = PhaseSet::new(vec![
            Phase::new("in", 4, VisualTag::Inhale),
            Phase::new("hold", 0, VisualTag::Hold),
        ]);
        assert_eq!(result, Err(PhaseSetError::ZeroDuration { index: 1 }));
    }

    #[test]
    fn test_next_index_wraps() {
        let set = four_seven_eight();
        assert_eq!(set.next_index(0), 1);
        assert_eq!(set.next_index(1), 2);
        assert_eq!(set.next_index(2), 0);
    }

    #[test]
    fn test_single_phase_wraps_to_itself() {
        let set = PhaseSet::new(vec![Phase::new("breathe", 5, VisualTag::Hold)]).unwrap();
        assert_eq!(set.next_index(0), 0);
    }

    #[test]
    fn test_cycle_and_total_secs() {
        let set = four_seven_eight();
        assert_eq!(set.cycle_secs(), 19);
        assert_eq!(set.total_secs(4), 76);
    }

    #[test]
    fn test_same_timing_ignores_labels() {
        let a = four_seven_eight();
        let b = PhaseSet::new(vec![
            Phase::new("in", 4, VisualTag::Inhale),
            Phase::new("stil", 7, VisualTag::Hold),
            Phase::new("uit", 8, VisualTag::Exhale),
        ])
        .unwrap();
        assert!(a.same_timing(&b));

        let c = PhaseSet::new(vec![Phase::new("in", 4, VisualTag::Inhale)]).unwrap();
        assert!(!a.same_timing(&c));
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!("inhale".parse::<VisualTag>().unwrap(), VisualTag::Inhale);
        assert_eq!(" HOLD ".parse::<VisualTag>().unwrap(), VisualTag::Hold);
        let err = "exale".parse::<VisualTag>().unwrap_err();
        assert_eq!(
            err,
            PhaseSetError::UnknownTag {
                tag: "exale".to_string(),
                suggestion: Some("exhale".to_string()),
            }
        );
    }

    #[test]
    fn test_suggest_tag_far_input() {
        assert_eq!(suggest_tag("banana"), None);
    }

    #[test]
    fn test_indicator_mapping() {
        assert_eq!(indicator(VisualTag::Inhale).pulse, Pulse::Expand);
        assert_eq!(indicator(VisualTag::Hold).pulse, Pulse::Steady);
        assert_eq!(indicator(VisualTag::Exhale).pulse, Pulse::Contract);
    }

    #[test]
    fn test_pulse_width_interpolates() {
        assert_eq!(Pulse::Expand.width(0, 4, 2, 10), 2);
        assert_eq!(Pulse::Expand.width(2, 4, 2, 10), 6);
        assert_eq!(Pulse::Expand.width(4, 4, 2, 10), 10);
        assert_eq!(Pulse::Contract.width(0, 8, 2, 10), 10);
        assert_eq!(Pulse::Contract.width(8, 8, 2, 10), 2);
        assert_eq!(Pulse::Steady.width(3, 7, 2, 10), 10);
    }

    #[test]
    fn test_pulse_width_clamps_elapsed() {
        assert_eq!(Pulse::Expand.width(99, 4, 2, 10), 10);
        assert_eq!(Pulse::Contract.width(1, 0, 2, 10), 2);
    }
}

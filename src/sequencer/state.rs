//! Sequencer state
//!
//! Plain owned state for one sequencer. Only the engine mutates it; everyone
//! else reads a copy via [`PhaseSequencer::snapshot`](super::PhaseSequencer::snapshot).

use serde::Serialize;

/// Progress of the sequencer through its phase set.
///
/// Created once per sequencer and reset in place on every stop; it is never
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequencerState {
    running: bool,
    current_phase: usize,
    time_left: u32,
    completed_cycles: u32,
    total_cycles: u32,
}

impl SequencerState {
    /// Cycle target used until `configure` says otherwise.
    pub const DEFAULT_CYCLES: u32 = 4;

    /// Creates idle state with the given cycle target.
    #[must_use]
    pub const fn new(total_cycles: u32) -> Self {
        Self {
            running: false,
            current_phase: 0,
            time_left: 0,
            completed_cycles: 0,
            total_cycles,
        }
    }

    /// Returns whether a session is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the current phase.
    #[must_use]
    pub const fn current_phase(&self) -> usize {
        self.current_phase
    }

    /// Ticks remaining in the current phase.
    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Full cycles finished in this session.
    #[must_use]
    pub const fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// Cycles after which the session completes.
    #[must_use]
    pub const fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    pub(crate) const fn set_total_cycles(&mut self, total_cycles: u32) {
        self.total_cycles = total_cycles;
    }

    /// Enters the first phase of a fresh session.
    pub(crate) const fn begin(&mut self, first_duration: u32) {
        self.running = true;
        self.completed_cycles = 0;
        self.current_phase = 0;
        self.time_left = first_duration;
    }

    /// Decrements the countdown and returns the new value.
    pub(crate) const fn count_down(&mut self) -> u32 {
        self.time_left = self.time_left.saturating_sub(1);
        self.time_left
    }

    /// Moves to phase `next`, counting a cycle when it wraps to 0.
    ///
    /// Returns `true` if a full cycle was just completed.
    pub(crate) const fn advance_to(&mut self, next: usize) -> bool {
        self.current_phase = next;
        if next == 0 {
            self.completed_cycles = self.completed_cycles.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub(crate) const fn target_reached(&self) -> bool {
        self.completed_cycles >= self.total_cycles
    }

    pub(crate) const fn set_time_left(&mut self, time_left: u32) {
        self.time_left = time_left;
    }

    /// Leaves the running state and discards cycle progress.
    pub(crate) const fn halt(&mut self) {
        self.running = false;
        self.completed_cycles = 0;
    }
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CYCLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = SequencerState::default();
        assert!(!state.is_running());
        assert!(!state.is_running());
        assert_eq!(state.current_phase(), 0);
        assert_eq!(state.time_left(), 0);
        assert_eq!(state.completed_cycles(), 0);
        assert_eq!(state.total_cycles(), 4);
    }

    #[test]
    fn test_begin_resets_progress() {
        let mut state = SequencerState::new(2);
        state.begin(4);
        state.advance_to(1);
        state.advance_to(0);
        assert_eq!(state.completed_cycles(), 1);

        state.begin(4);
        assert!(state.is_running());
        assert_eq!(state.completed_cycles(), 0);
        assert_eq!(state.current_phase(), 0);
        assert_eq!(state.time_left(), 4);
    }

    #[test]
    fn test_count_down_saturates() {
        let mut state = SequencerState::new(1);
        state.begin(1);
        assert_eq!(state.count_down(), 0);
        assert_eq!(state.count_down(), 0);
    }

    #[test]
    fn test_cycle_counted_only_on_wrap() {
        let mut state = SequencerState::new(3);
        state.begin(4);
        assert!(!state.advance_to(1));
        assert!(!state.advance_to(2));
        assert_eq!(state.completed_cycles(), 0);
        assert!(state.advance_to(0));
        assert_eq!(state.completed_cycles(), 1);
        assert!(!state.target_reached());
    }

    #[test]
    fn test_halt_discards_cycles() {
        let mut state = SequencerState::new(3);
        state.begin(4);
        state.advance_to(0);
        state.halt();
        assert!(!state.is_running());
        assert_eq!(state.completed_cycles(), 0);
    }
}

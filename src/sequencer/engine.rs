//! Phase sequencer
//!
//! The `PhaseSequencer` walks a [`PhaseSet`] one tick at a time for a fixed
//! number of cycles and tells its [`Presenter`] about every state change.
//! It has no clock of its own: [`start`](PhaseSequencer::start) hands back a
//! cancellation token and a ticker (see [`super::ticker`]) calls
//! [`tick`](PhaseSequencer::tick) once per period until that token fires.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{PresentError, SequencerError};
use crate::phase::PhaseSet;
use crate::presenter::Presenter;

use super::state::SequencerState;

/// Finite-state timer over a cyclic phase set.
///
/// States are idle and running. `start` enters running, `stop` (called
/// externally or on reaching the cycle target) returns to idle and discards
/// cycle progress. There is no pause.
pub struct PhaseSequencer<P> {
    /// Phases walked in order, wrapping after the last
    phases: PhaseSet,
    /// Progress through the phases
    state: SequencerState,
    /// Token of the running session; `None` while idle
    cancel: Option<CancellationToken>,
    /// Receives every state change
    presenter: P,
}

impl<P: Presenter> PhaseSequencer<P> {
    /// Creates an idle sequencer with the default cycle target.
    #[must_use]
    pub fn new(phases: PhaseSet, presenter: P) -> Self {
        Self {
            phases,
            state: SequencerState::default(),
            cancel: None,
            presenter,
        }
    }

    /// Replaces the phase set and cycle target.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::AlreadyRunning`] while a session is in
    /// progress and [`SequencerError::InvalidCycles`] for a target of zero.
    /// State is untouched on error.
    pub fn configure(&mut self, phases: PhaseSet, total_cycles: u32) -> Result<(), SequencerError> {
        if self.state.is_running() {
            return Err(SequencerError::AlreadyRunning);
        }
        if total_cycles == 0 {
            return Err(SequencerError::InvalidCycles(total_cycles));
        }
        debug!(
            phases = phases.len(),
            total_cycles, "sequencer configured"
        );
        self.phases = phases;
        self.state.set_total_cycles(total_cycles);
        Ok(())
    }

    /// Starts a session.
    ///
    /// Returns the token the caller must tick against, or `None` if a session
    /// is already running, in which case nothing changes and no event is
    /// emitted.
    pub fn start(&mut self) -> Option<CancellationToken> {
        if self.state.is_running() {
            debug!("start ignored: already running");
            return None;
        }

        let first = self.phases.first().duration_secs();
        self.state.begin(first);
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        info!(
            total_cycles = self.state.total_cycles(),
            cycle_secs = self.phases.cycle_secs(),
            "session started"
        );

        let result = self.presenter.on_phase_changed(self.phases.first(), first);
        report(result, "phase_changed");
        Some(token)
    }

    /// Advances the countdown by one tick. Does nothing while idle.
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            return;
        }

        let time_left = self.state.count_down();
        if time_left > 0 {
            let result = self.presenter.on_tick(time_left);
            report(result, "tick");
            return;
        }

        let from = self.state.current_phase();
        let next = self.phases.next_index(from);
        if self.state.advance_to(next) {
            debug!(
                completed = self.state.completed_cycles(),
                total = self.state.total_cycles(),
                "cycle completed"
            );
            if self.state.target_reached() {
                self.stop(true);
                return;
            }
        }

        let phase = self.phases.phase(next);
        let duration = phase.duration_secs();
        debug!(from, to = next, label = %phase.label(), "phase transition");
        self.state.set_time_left(duration);

        let result = self.presenter.on_phase_changed(phase, duration);
        report(result, "phase_changed");
    }

    /// Ends the session. Does nothing while idle.
    ///
    /// Cancels the session token, so no ticker calls `tick` after this
    /// returns, resets cycle progress and emits exactly one stopped event.
    pub fn stop(&mut self, completed: bool) {
        if !self.state.is_running() {
            return;
        }

        self.state.halt();
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }

        info!(completed, "session stopped");
        let result = self.presenter.on_stopped(completed);
        report(result, "stopped");
    }

    /// Swaps in new display labels without touching timing.
    ///
    /// Allowed while running: the replacement must have the same phase count
    /// and durations, so only what is displayed from the next event on changes.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::IncompatiblePhaseSet`] if the timing differs.
    pub fn relabel(&mut self, phases: PhaseSet) -> Result<(), SequencerError> {
        if !self.phases.same_timing(&phases) {
            return Err(SequencerError::IncompatiblePhaseSet {
                reason: format!(
                    "expected {} phases lasting {}s per cycle, got {} lasting {}s",
                    self.phases.len(),
                    self.phases.cycle_secs(),
                    phases.len(),
                    phases.cycle_secs()
                ),
            });
        }
        self.phases = phases;
        Ok(())
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub const fn snapshot(&self) -> SequencerState {
        self.state
    }

    /// Returns whether a session is in progress.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Returns the active phase set.
    #[must_use]
    pub const fn phases(&self) -> &PhaseSet {
        &self.phases
    }

    /// Returns the presenter.
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns the presenter mutably, for locale switches and idle prompts.
    pub const fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

impl<P> std::fmt::Debug for PhaseSequencer<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseSequencer")
            .field("num_phases", &self.phases.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Logs a presenter failure. State has already been updated by then.
pub(crate) fn report(result: Result<(), PresentError>, event: &'static str) {
    if let Err(e) = result {
        warn!(event, error = %e, "presenter failed to render event");
    }
}

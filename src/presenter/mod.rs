//! Presenters
//!
//! A [`Presenter`] renders sequencer events. The sequencer owns one and calls
//! it after every state change; rendering failures are reported back as
//! [`PresentError`] and never influence sequencer state.
//!
//! - [`TerminalPresenter`]: human-readable countdown with a pulsing bar
//! - [`JsonPresenter`]: newline-delimited JSON events

pub mod json;
pub mod terminal;

pub use json::{Event, JsonPresenter};
pub use terminal::TerminalPresenter;

use crate::error::PresentError;
use crate::locale::Locale;
use crate::phase::Phase;

/// Consumer of sequencer events.
pub trait Presenter: Send {
    /// A new phase began with `time_left` ticks remaining.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be rendered.
    fn on_phase_changed(&mut self, phase: &Phase, time_left: u32) -> Result<(), PresentError>;

    /// The current phase counted down to `time_left` (always > 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be rendered.
    fn on_tick(&mut self, time_left: u32) -> Result<(), PresentError>;

    /// The session ended; `completed` is `true` when the cycle target was reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be rendered.
    fn on_stopped(&mut self, completed: bool) -> Result<(), PresentError>;

    /// Show the idle prompt inviting the user to start.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt could not be rendered.
    fn on_idle(&mut self) -> Result<(), PresentError> {
        Ok(())
    }

    /// Show the closing message when the program exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be rendered.
    fn on_farewell(&mut self) -> Result<(), PresentError> {
        Ok(())
    }

    /// Switch the language of prompts rendered from now on.
    fn set_locale(&mut self, _locale: Locale) {}
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn on_phase_changed(&mut self, phase: &Phase, time_left: u32) -> Result<(), PresentError> {
        (**self).on_phase_changed(phase, time_left)
    }

    fn on_tick(&mut self, time_left: u32) -> Result<(), PresentError> {
        (**self).on_tick(time_left)
    }

    fn on_stopped(&mut self, completed: bool) -> Result<(), PresentError> {
        (**self).on_stopped(completed)
    }

    fn on_idle(&mut self) -> Result<(), PresentError> {
        (**self).on_idle()
    }

    fn on_farewell(&mut self) -> Result<(), PresentError> {
        (**self).on_farewell()
    }

    fn set_locale(&mut self, locale: Locale) {
        (**self).set_locale(locale);
    }
}

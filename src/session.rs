//! Interactive session control
//!
//! A [`Session`] is the control surface around one sequencer: it owns the
//! ticker of the running session and offers the toggle, cycle selector and
//! language switch a user interacts with. [`Session::drive`] runs a session
//! from a stream of text commands until the user quits or the input ends.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{PacerError, SequencerError};
use crate::locale::Locale;
use crate::presenter::Presenter;
use crate::sequencer::engine::report;
use crate::sequencer::{PhaseSequencer, SequencerState, SharedSequencer, TickerExit, spawn_ticker};

/// Timing knobs for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Length of one tick.
    pub tick: Duration,
    /// How long the completion message stays before the idle prompt returns.
    pub completion_hold: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            completion_hold: Duration::from_secs(3),
        }
    }
}

/// A user command read from the control input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start when idle, stop when running.
    Toggle,
    /// Start a session.
    Start,
    /// Stop the running session.
    Stop,
    /// Switch to the other language.
    Language,
    /// Leave the program.
    Quit,
}

impl FromStr for Control {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "t" | "toggle" => Ok(Self::Toggle),
            "s" | "start" => Ok(Self::Start),
            "x" | "stop" => Ok(Self::Stop),
            "l" | "lang" | "language" => Ok(Self::Language),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

/// Totals reported when [`Session::drive`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Sessions that reached their cycle target.
    pub completed: u32,
    /// Sessions stopped by the user.
    pub stopped: u32,
}

/// Controller for a sequencer and its ticker.
pub struct Session<P> {
    sequencer: SharedSequencer<P>,
    ticker: Option<JoinHandle<TickerExit>>,
    /// Completion collected by `start` or `stop` before `finished` saw it
    unreported: Option<TickerExit>,
    locale: Locale,
    /// Phases came from configuration rather than the locale tables
    custom_phases: bool,
    options: SessionOptions,
}

impl<P: Presenter + 'static> Session<P> {
    /// Wraps an idle sequencer.
    ///
    /// With `custom_phases` set, language switches only change prompts and
    /// leave phase labels alone.
    #[must_use]
    pub fn new(
        sequencer: PhaseSequencer<P>,
        locale: Locale,
        custom_phases: bool,
        options: SessionOptions,
    ) -> Self {
        Self {
            sequencer: Arc::new(Mutex::new(sequencer)),
            ticker: None,
            unreported: None,
            locale,
            custom_phases,
            options,
        }
    }

    /// Returns the shared sequencer handle.
    #[must_use]
    pub fn sequencer(&self) -> SharedSequencer<P> {
        Arc::clone(&self.sequencer)
    }

    /// Returns the active language.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns a copy of the sequencer state.
    pub async fn snapshot(&self) -> SequencerState {
        self.sequencer.lock().await.snapshot()
    }

    /// Returns whether a ticker is attached.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Starts a session and its ticker. Returns `false` if one was running.
    pub async fn start(&mut self) -> bool {
        let token = self.sequencer.lock().await.start();
        let Some(token) = token else {
            return false;
        };
        self.collect_ticker().await;
        self.ticker = Some(spawn_ticker(
            Arc::clone(&self.sequencer),
            token,
            self.options.tick,
        ));
        true
    }

    /// Stops the running session. Returns `false` if nothing was running.
    ///
    /// Waits for the ticker task to exit before returning.
    pub async fn stop(&mut self) -> bool {
        let was_running = {
            let mut seq = self.sequencer.lock().await;
            let running = seq.is_running();
            seq.stop(false);
            running
        };
        self.collect_ticker().await;
        was_running
    }

    /// Starts when idle, stops when running.
    pub async fn toggle(&mut self) {
        let running = self.sequencer.lock().await.is_running();
        if running {
            self.stop().await;
        } else {
            self.start().await;
        }
    }

    /// Changes the cycle target.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::AlreadyRunning`] while a session runs and
    /// [`SequencerError::InvalidCycles`] for zero.
    pub async fn set_cycles(&mut self, cycles: u32) -> Result<(), SequencerError> {
        let mut seq = self.sequencer.lock().await;
        let phases = seq.phases().clone();
        seq.configure(phases, cycles)
    }

    /// Switches to the other language and returns it.
    ///
    /// Labels of the running phase set are swapped in place; durations of
    /// the session in flight are unaffected. When idle the idle prompt is
    /// shown again in the new language.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::IncompatiblePhaseSet`] if the built-in
    /// labels cannot replace the active phase set.
    pub async fn switch_locale(&mut self) -> Result<Locale, SequencerError> {
        let next = self.locale.toggle();
        let mut seq = self.sequencer.lock().await;
        if !self.custom_phases {
            seq.relabel(next.phase_set())?;
        }
        seq.presenter_mut().set_locale(next);
        if !seq.is_running() {
            report(seq.presenter_mut().on_idle(), "idle");
        }
        drop(seq);

        info!(locale = %next, "language switched");
        self.locale = next;
        Ok(next)
    }

    /// Shows the idle prompt.
    pub async fn show_idle(&self) {
        let mut seq = self.sequencer.lock().await;
        report(seq.presenter_mut().on_idle(), "idle");
    }

    /// Shows the closing message.
    pub async fn farewell(&self) {
        let mut seq = self.sequencer.lock().await;
        report(seq.presenter_mut().on_farewell(), "farewell");
    }

    /// Waits until the running session ends on its own.
    ///
    /// Pends forever while no ticker is attached, which makes it usable as
    /// a `select!` branch.
    pub async fn finished(&mut self) -> TickerExit {
        if let Some(exit) = self.unreported.take() {
            return exit;
        }
        let Some(handle) = self.ticker.as_mut() else {
            return std::future::pending().await;
        };
        let exit = ticker_exit(handle.await);
        self.ticker = None;
        exit
    }

    /// Joins the previous ticker, keeping a completion `finished` has not
    /// reported yet.
    async fn collect_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            let exit = ticker_exit(handle.await);
            if exit == TickerExit::Completed {
                self.unreported = Some(exit);
            }
        }
    }

    /// Starts a session and then follows commands from `input`.
    ///
    /// Returns when the user quits, or when `input` is exhausted and no
    /// session is running any more. A completed session shows its message
    /// for the completion hold before the idle prompt returns.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading `input` fails.
    pub async fn drive<R>(&mut self, input: R) -> Result<RunSummary, PacerError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut summary = RunSummary::default();
        let mut lines = input.lines();
        let mut input_open = true;

        // Pending return to the idle prompt after a completed session
        let hold = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(hold);
        let mut holding = false;

        self.start().await;

        loop {
            if !input_open && !self.is_ticking() && self.unreported.is_none() && !holding {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        debug!("control input closed");
                        input_open = false;
                        continue;
                    };
                    match line.parse::<Control>() {
                        Ok(Control::Quit) => {
                            if self.stop().await {
                                summary.stopped += 1;
                            }
                            break;
                        }
                        Ok(control) => {
                            if self.apply(control).await {
                                summary.stopped += 1;
                            }
                        }
                        Err(e) => warn!("{e}"),
                    }
                }
                exit = self.finished() => {
                    if exit == TickerExit::Completed {
                        summary.completed += 1;
                        hold.as_mut().reset(Instant::now() + self.options.completion_hold);
                        holding = true;
                    }
                }
                () = &mut hold, if holding => {
                    holding = false;
                    if !self.sequencer.lock().await.is_running() {
                        self.show_idle().await;
                    }
                }
            }
        }

        self.farewell().await;
        info!(
            completed = summary.completed,
            stopped = summary.stopped,
            "leaving"
        );
        Ok(summary)
    }

    /// Applies one control. Returns `true` if it stopped a running session.
    async fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::Toggle => {
                let running = self.sequencer.lock().await.is_running();
                self.toggle().await;
                running
            }
            Control::Start => {
                self.start().await;
                false
            }
            Control::Stop => self.stop().await,
            Control::Language => {
                if let Err(e) = self.switch_locale().await {
                    warn!(error = %e, "language switch refused");
                }
                false
            }
            Control::Quit => false,
        }
    }
}

impl<P> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("locale", &self.locale)
            .field("ticking", &self.ticker.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn ticker_exit(joined: Result<TickerExit, JoinError>) -> TickerExit {
    joined.unwrap_or_else(|e| {
        warn!(error = %e, "ticker task failed");
        TickerExit::Cancelled
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_parsing() {
        assert_eq!("".parse::<Control>(), Ok(Control::Toggle));
        assert_eq!("toggle".parse::<Control>(), Ok(Control::Toggle));
        assert_eq!(" START ".parse::<Control>(), Ok(Control::Start));
        assert_eq!("x".parse::<Control>(), Ok(Control::Stop));
        assert_eq!("lang".parse::<Control>(), Ok(Control::Language));
        assert_eq!("q".parse::<Control>(), Ok(Control::Quit));
        assert!("dance".parse::<Control>().is_err());
    }

    #[test]
    fn test_default_options() {
        let options = SessionOptions::default();
        assert_eq!(options.tick, Duration::from_secs(1));
        assert_eq!(options.completion_hold, Duration::from_secs(3));
    }
}

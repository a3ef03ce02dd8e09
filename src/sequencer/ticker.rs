//! Periodic tick driver
//!
//! One background task per running session calls
//! [`PhaseSequencer::tick`] once per period until the session's cancellation
//! token fires or the sequencer completes on its own.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::presenter::Presenter;

use super::engine::PhaseSequencer;

/// A sequencer shared between its ticker and the controlling session.
pub type SharedSequencer<P> = Arc<Mutex<PhaseSequencer<P>>>;

/// Why a ticker task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    /// The sequencer reached its cycle target.
    Completed,
    /// The session token was cancelled by an external stop.
    Cancelled,
}

/// Spawns the ticker for a session started with `cancel`.
///
/// The first tick fires one `period` after the call. Late ticks are delayed,
/// never bunched up. The sequencer lock is held for one `tick` at a time, and
/// the token is re-checked under the lock so a `stop` that got in first is
/// never followed by another tick.
pub fn spawn_ticker<P>(
    sequencer: SharedSequencer<P>,
    cancel: CancellationToken,
    period: Duration,
) -> JoinHandle<TickerExit>
where
    P: Presenter + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!("ticker cancelled");
                    return TickerExit::Cancelled;
                }
                _ = interval.tick() => {
                    let mut seq = sequencer.lock().await;
                    if cancel.is_cancelled() {
                        debug!("ticker cancelled while waiting for sequencer");
                        return TickerExit::Cancelled;
                    }
                    seq.tick();
                    trace!(state = ?seq.snapshot(), "tick");
                    if !seq.is_running() {
                        debug!("ticker finished: cycle target reached");
                        return TickerExit::Completed;
                    }
                }
            }
        }
    })
}

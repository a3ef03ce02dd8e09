//! `run` command
//!
//! Builds the presenter and sequencer from resolved settings and drives a
//! session from stdin until the user quits, the input ends after the last
//! session, or a shutdown signal arrives.

use std::io::IsTerminal;

use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{ColorChoice, OutputFormat, RunArgs};
use crate::error::PacerError;
use crate::observability::logging::use_color;
use crate::presenter::{JsonPresenter, Presenter, TerminalPresenter};
use crate::sequencer::PhaseSequencer;
use crate::session::Session;

use super::resolve_settings;

/// Run an interactive breathing session.
///
/// # Errors
///
/// Returns a configuration error if settings cannot be resolved, or an
/// I/O error if reading stdin fails.
pub async fn run(
    args: &RunArgs,
    color: ColorChoice,
    shutdown: CancellationToken,
) -> Result<(), PacerError> {
    let settings = resolve_settings(&args.session)?;

    let presenter: Box<dyn Presenter> = match args.format {
        OutputFormat::Human => Box::new(TerminalPresenter::stdout(
            settings.locale,
            use_color(color, std::io::stdout().is_terminal()),
        )),
        OutputFormat::Json => Box::new(JsonPresenter::stdout(settings.locale)),
    };

    let phases = settings.phase_set();
    let mut sequencer = PhaseSequencer::new(phases.clone(), presenter);
    sequencer.configure(phases, settings.cycles)?;

    tracing::info!(
        cycles = settings.cycles,
        locale = %settings.locale,
        tick = %humantime::format_duration(settings.session.tick),
        custom_phases = settings.has_custom_phases(),
        "starting session"
    );

    let mut session = Session::new(
        sequencer,
        settings.locale,
        settings.has_custom_phases(),
        settings.session,
    );
    let input = BufReader::new(tokio::io::stdin());

    let outcome = tokio::select! {
        result = session.drive(input) => Some(result?),
        () = shutdown.cancelled() => None,
    };

    if outcome.is_none() {
        tracing::info!("shutdown requested");
        session.stop().await;
        session.farewell().await;
    }

    Ok(())
}

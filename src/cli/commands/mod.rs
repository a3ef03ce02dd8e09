//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod phases;
pub mod run;
pub mod validate;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands, SessionArgs};
use crate::config::{Settings, SettingsOverrides};
use crate::error::PacerError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `shutdown` fires on SIGINT/SIGTERM; long-running commands wind down
/// when it does.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, shutdown: CancellationToken) -> Result<(), PacerError> {
    match cli.command {
        Commands::Run(args) => run::run(&args, cli.color, shutdown).await,
        Commands::Phases(args) => phases::run(&args),
        Commands::Validate(args) => validate::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Resolves settings from shared session arguments, logging any
/// configuration warnings.
fn resolve_settings(args: &SessionArgs) -> Result<Settings, PacerError> {
    let overrides = SettingsOverrides {
        cycles: args.cycles,
        locale: args.locale,
        tick: args.tick,
        completion_hold: args.completion_hold,
    };
    let (settings, warnings) = Settings::resolve(args.config.as_deref(), &overrides)?;

    for warning in &warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    Ok(settings)
}

//! `phases` command
//!
//! Prints the phases a session would walk through and how long it lasts.

use std::time::Duration;

use crate::cli::args::{OutputFormat, PhasesArgs};
use crate::config::Settings;
use crate::error::PacerError;

use super::resolve_settings;

/// Print the resolved phase set and session length.
///
/// # Errors
///
/// Returns a configuration error if settings cannot be resolved.
pub fn run(args: &PhasesArgs) -> Result<(), PacerError> {
    let settings = resolve_settings(&args.session)?;
    match args.format {
        OutputFormat::Human => print!("{}", render_human(&settings)),
        OutputFormat::Json => println!("{}", render_json(&settings)?),
    }
    Ok(())
}

/// Wall-clock length of `ticks` ticks.
fn span(tick: Duration, ticks: u64) -> Duration {
    tick.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
}

fn render_human(settings: &Settings) -> String {
    use std::fmt::Write;

    let phases = settings.phase_set();
    let tick = settings.session.tick;
    let mut out = String::new();

    let source = if settings.has_custom_phases() {
        "configured"
    } else {
        settings.locale.code()
    };
    let _ = writeln!(out, "phases ({source}, {} cycles)", settings.cycles);
    for (i, phase) in phases.iter().enumerate() {
        let label = phase.label().replace('\n', " / ");
        let length = humantime::format_duration(span(tick, u64::from(phase.duration_secs())));
        let _ = writeln!(
            out,
            "  {}. {:<7} {:>6}  {label}",
            i + 1,
            phase.visual_tag(),
            length.to_string()
        );
    }
    let _ = writeln!(
        out,
        "cycle: {}, session: {}",
        humantime::format_duration(span(tick, phases.cycle_secs())),
        humantime::format_duration(span(tick, phases.total_secs(settings.cycles)))
    );
    out
}

fn render_json(settings: &Settings) -> Result<String, PacerError> {
    let phases = settings.phase_set();
    let tick = settings.session.tick;
    let list: Vec<_> = phases
        .iter()
        .map(|p| {
            serde_json::json!({
                "label": p.label(),
                "duration": p.duration_secs(),
                "tag": p.visual_tag(),
            })
        })
        .collect();

    let doc = serde_json::json!({
        "locale": settings.locale,
        "cycles": settings.cycles,
        "tick_ms": u64::try_from(tick.as_millis()).unwrap_or(u64::MAX),
        "custom_phases": settings.has_custom_phases(),
        "phases": list,
        "cycle_ticks": phases.cycle_secs(),
        "total_ticks": phases.total_secs(settings.cycles),
        "total_ms": u64::try_from(span(tick, phases.total_secs(settings.cycles)).as_millis())
            .unwrap_or(u64::MAX),
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

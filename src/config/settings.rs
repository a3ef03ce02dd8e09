//! Resolved runtime settings
//!
//! Merges command-line values (which already carry their `PACER_*`
//! environment fallbacks through clap) over an optional configuration file
//! over built-in defaults.

use std::path::Path;
use std::time::Duration;

use crate::config::loader::{ConfigLoader, LoadWarning};
use crate::config::schema::{PacerConfig, PhaseConfig};
use crate::error::{ConfigError, PacerError};
use crate::locale::Locale;
use crate::phase::{Phase, PhaseSet, VisualTag};
use crate::sequencer::SequencerState;
use crate::session::SessionOptions;

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Cycle target.
    pub cycles: Option<u32>,
    /// Display language.
    pub locale: Option<Locale>,
    /// Tick length.
    pub tick: Option<Duration>,
    /// Completion hold.
    pub completion_hold: Option<Duration>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Cycle target.
    pub cycles: u32,
    /// Display language.
    pub locale: Locale,
    /// Tick length and completion hold.
    pub session: SessionOptions,
    /// Phases from the configuration file, if it defined any.
    pub phases: Option<PhaseSet>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cycles: SequencerState::DEFAULT_CYCLES,
            locale: Locale::default(),
            session: SessionOptions::default(),
            phases: None,
        }
    }
}

impl Settings {
    /// Loads `config_path` if given and applies `overrides` on top.
    ///
    /// Returns the settings together with any configuration warnings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be loaded or a
    /// resolved value is unusable.
    pub fn resolve(
        config_path: Option<&Path>,
        overrides: &SettingsOverrides,
    ) -> Result<(Self, Vec<LoadWarning>), PacerError> {
        let (config, warnings) = match config_path {
            Some(path) => {
                tracing::info!(config = %path.display(), "loading configuration");
                let result = ConfigLoader::new().load(path)?;
                (result.config, result.warnings)
            }
            None => (PacerConfig::default(), Vec::new()),
        };

        let settings = Self::merge(&config, overrides)?;
        Ok((settings, warnings))
    }

    /// Merges an already validated configuration with overrides.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero cycle target or tick, an unparseable
    /// duration, or phases that do not form a valid set.
    pub fn merge(config: &PacerConfig, overrides: &SettingsOverrides) -> Result<Self, PacerError> {
        let defaults = Self::default();

        let cycles = overrides
            .cycles
            .or(config.cycles)
            .unwrap_or(defaults.cycles);
        if cycles == 0 {
            return Err(invalid("cycles", "0", "at least 1").into());
        }

        let tick = match overrides.tick {
            Some(d) => d,
            None => config_duration("tick", config.tick.as_deref())?
                .unwrap_or(defaults.session.tick),
        };
        if tick.is_zero() {
            return Err(invalid("tick", "0s", "a duration greater than zero").into());
        }

        let completion_hold = match overrides.completion_hold {
            Some(d) => d,
            None => config_duration("completion_hold", config.completion_hold.as_deref())?
                .unwrap_or(defaults.session.completion_hold),
        };

        let phases = config.phases.as_deref().map(build_phases).transpose()?;

        Ok(Self {
            cycles,
            locale: overrides.locale.or(config.locale).unwrap_or(defaults.locale),
            session: SessionOptions {
                tick,
                completion_hold,
            },
            phases,
        })
    }

    /// Returns the phases to run: configured ones, else the locale's.
    #[must_use]
    pub fn phase_set(&self) -> PhaseSet {
        self.phases
            .clone()
            .unwrap_or_else(|| self.locale.phase_set())
    }

    /// Returns `true` if phases came from the configuration file.
    #[must_use]
    pub const fn has_custom_phases(&self) -> bool {
        self.phases.is_some()
    }
}

fn config_duration(field: &str, value: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    value
        .map(|v| {
            humantime::parse_duration(v)
                .map_err(|_| invalid(field, v, "a duration such as '1s' or '500ms'"))
        })
        .transpose()
}

fn build_phases(configs: &[PhaseConfig]) -> Result<PhaseSet, PacerError> {
    let phases = configs
        .iter()
        .map(|c| {
            let tag: VisualTag = c.tag.parse()?;
            Ok(Phase::new(c.label.clone(), c.duration, tag))
        })
        .collect::<Result<Vec<_>, PacerError>>()?;
    Ok(PhaseSet::new(phases)?)
}

fn invalid(field: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::PhaseSetError;

    #[test]
    fn test_defaults() {
        let (settings, warnings) = Settings::resolve(None, &SettingsOverrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cycles, 4);
        assert_eq!(settings.locale, Locale::Nl);
        assert!(warnings.is_empty());
        assert!(!settings.has_custom_phases());
        assert_eq!(settings.phase_set(), Locale::Nl.phase_set());
    }

    #[test]
    fn test_overrides_beat_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"cycles: 7\nlocale: en\ntick: 250ms\n").unwrap();

        let overrides = SettingsOverrides {
            cycles: Some(2),
            ..Default::default()
        };
        let (settings, _) = Settings::resolve(Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.cycles, 2);
        assert_eq!(settings.locale, Locale::En);
        assert_eq!(settings.session.tick, Duration::from_millis(250));
        assert_eq!(settings.session.completion_hold, Duration::from_secs(3));
    }

    #[test]
    fn test_file_phases_replace_locale_phases() {
        let config = PacerConfig {
            phases: Some(vec![
                PhaseConfig {
                    label: "in".into(),
                    duration: 5,
                    tag: "inhale".into(),
                },
                PhaseConfig {
                    label: "out".into(),
                    duration: 5,
                    tag: "exhale".into(),
                },
            ]),
            ..Default::default()
        };
        let settings = Settings::merge(&config, &SettingsOverrides::default()).unwrap();
        assert!(settings.has_custom_phases());
        let phases = settings.phase_set();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases.cycle_secs(), 10);
    }

    #[test]
    fn test_zero_cycles_override_rejected() {
        let overrides = SettingsOverrides {
            cycles: Some(0),
            ..Default::default()
        };
        let err = Settings::merge(&PacerConfig::default(), &overrides).unwrap_err();
        assert!(matches!(
            err,
            PacerError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_zero_tick_override_rejected() {
        let overrides = SettingsOverrides {
            tick: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(Settings::merge(&PacerConfig::default(), &overrides).is_err());
    }

    #[test]
    fn test_unvalidated_bad_phase_is_error() {
        let config = PacerConfig {
            phases: Some(vec![PhaseConfig {
                label: "in".into(),
                duration: 0,
                tag: "inhale".into(),
            }]),
            ..Default::default()
        };
        let err = Settings::merge(&config, &SettingsOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            PacerError::PhaseSet(PhaseSetError::ZeroDuration { index: 0 })
        ));
    }
}

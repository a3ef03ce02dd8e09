//! `validate` command
//!
//! Checks configuration files without running a session. Every file is
//! checked and reported before the first failure is returned.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::ConfigLoader;
use crate::error::{ConfigError, PacerError, Severity, ValidationIssue};

/// Outcome for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: PathBuf,
    valid: bool,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

/// Validate configuration files.
///
/// # Errors
///
/// Returns the error of the first file that failed to load or validate.
/// With `--strict`, warnings count as failures.
pub fn run(args: &ValidateArgs) -> Result<(), PacerError> {
    let mut loader = ConfigLoader::new();
    let mut reports = Vec::with_capacity(args.files.len());
    let mut first_failure: Option<ConfigError> = None;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");
        let (report, failure) = check(&mut loader, path, args.strict);
        if first_failure.is_none() {
            first_failure = failure;
        }
        reports.push(report);
    }

    match args.format {
        OutputFormat::Human => {
            for report in &reports {
                print!("{}", render_human(report));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    first_failure.map_or(Ok(()), |e| Err(e.into()))
}

fn check(loader: &mut ConfigLoader, path: &Path, strict: bool) -> (FileReport, Option<ConfigError>) {
    match loader.load(path) {
        Ok(result) => {
            let warnings: Vec<_> = result
                .warnings
                .into_iter()
                .map(|w| ValidationIssue {
                    path: w.location.unwrap_or_default(),
                    message: w.message,
                    severity: Severity::Warning,
                })
                .collect();

            let failure = (strict && !warnings.is_empty()).then(|| ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: warnings
                    .iter()
                    .cloned()
                    .map(|w| ValidationIssue {
                        severity: Severity::Error,
                        ..w
                    })
                    .collect(),
            });

            let report = FileReport {
                file: path.to_path_buf(),
                valid: failure.is_none(),
                errors: Vec::new(),
                warnings,
            };
            (report, failure)
        }
        Err(e) => {
            let errors = match &e {
                ConfigError::ValidationError { errors, .. } => errors.clone(),
                other => vec![ValidationIssue {
                    path: String::new(),
                    message: other.to_string(),
                    severity: Severity::Error,
                }],
            };
            let report = FileReport {
                file: path.to_path_buf(),
                valid: false,
                errors,
                warnings: Vec::new(),
            };
            (report, Some(e))
        }
    }
}

fn render_human(report: &FileReport) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let status = if report.valid { "ok" } else { "invalid" };
    let _ = writeln!(out, "{status}: {}", report.file.display());
    for issue in report.errors.iter().chain(&report.warnings) {
        if issue.path.is_empty() {
            let _ = writeln!(out, "  {}", issue.message);
        } else {
            let _ = writeln!(out, "  {issue}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_valid_file() {
        let file = write_config("cycles: 4\n");
        let (report, failure) = check(&mut ConfigLoader::new(), file.path(), false);
        assert!(report.valid);
        assert!(failure.is_none());
        assert!(render_human(&report).starts_with("ok: "));
    }

    #[test]
    fn test_warning_fails_only_when_strict() {
        let file = write_config("cycles: 20\n");
        let (report, failure) = check(&mut ConfigLoader::new(), file.path(), false);
        assert!(report.valid);
        assert!(failure.is_none());
        assert_eq!(report.warnings.len(), 1);

        let (report, failure) = check(&mut ConfigLoader::new(), file.path(), true);
        assert!(!report.valid);
        assert!(matches!(failure, Some(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_invalid_file_lists_issues() {
        let file = write_config("phases:\n  - label: in\n    duration: 4\n    tag: inhail\n");
        let (report, failure) = check(&mut ConfigLoader::new(), file.path(), false);
        assert!(!report.valid);
        assert!(failure.is_some());
        let text = render_human(&report);
        assert!(text.starts_with("invalid: "));
        assert!(text.contains("error: unknown visual tag"), "{text}");
        assert!(text.contains("phases[0].tag"));
    }

    #[test]
    fn test_missing_file() {
        let (report, failure) =
            check(&mut ConfigLoader::new(), Path::new("/no/such/pacer.yaml"), false);
        assert!(!report.valid);
        assert!(matches!(failure, Some(ConfigError::MissingFile { .. })));
        assert!(render_human(&report).contains("file not found"));
    }
}

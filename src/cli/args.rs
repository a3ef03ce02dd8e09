//! CLI argument definitions
//!
//! All Clap derive structs for `pacer` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::error::ExitCode;
use crate::locale::Locale;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Guided breathing exercise timer.
#[derive(Parser, Debug)]
#[command(name = "pacer", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PACER_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "PACER_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a breathing session, controlled from stdin.
    Run(RunArgs),

    /// Show the phases and timing a session would use.
    Phases(PhasesArgs),

    /// Validate configuration files.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Settings shared by `run` and `phases`.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Path to YAML configuration file.
    #[arg(short, long, env = "PACER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of cycles to breathe.
    #[arg(short = 'n', long, env = "PACER_CYCLES", value_parser = clap::value_parser!(u32).range(1..))]
    pub cycles: Option<u32>,

    /// Display language.
    #[arg(short, long, env = "PACER_LOCALE")]
    pub locale: Option<Locale>,

    /// Length of one tick (e.g. `1s`, `250ms`).
    #[arg(long, env = "PACER_TICK", value_parser = humantime::parse_duration)]
    pub tick: Option<Duration>,

    /// How long the completion message stays before the idle prompt.
    #[arg(long, value_parser = humantime::parse_duration)]
    pub completion_hold: Option<Duration>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Session settings.
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `phases`.
#[derive(Args, Debug)]
pub struct PhasesArgs {
    /// Session settings.
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

/// Exit code for a failed argument parse.
///
/// `--help` and `--version` arrive as errors too; they exit successfully.
#[must_use]
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        ExitCode::USAGE_ERROR
    } else {
        ExitCode::SUCCESS
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Command-line interface implementation
//!
//! The harness is meant to be run bare by a test runner, so arguments are
//! optional refinements. Unknown arguments are dropped and the flags that
//! were recognised still apply. A bad value for a known flag is a usage
//! error, so a requested candidate is never swapped for another.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::compose::{Blend, SrgbCompose, Unclamped};
use crate::config::{load_grid, SweepGrid};
use crate::report::{write_json, write_text, TextOptions};
use crate::verify::verify;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_FAILURE: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;
pub(crate) const EXIT_INVALID_CONFIG: u8 = 2;

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Formula under verification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Candidate {
    /// Clamped sRGB composition
    #[default]
    #[value(alias = "fixed")]
    Srgb,
    /// Same formula without the final clamp
    #[value(alias = "legacy")]
    Unclamped,
}

impl Candidate {
    pub fn formula(self) -> &'static dyn Blend {
        match self {
            Candidate::Srgb => &SrgbCompose,
            Candidate::Unclamped => &Unclamped,
        }
    }
}

/// compose-check - verify the sRGB palette composition formula
#[derive(Parser, Debug, Default)]
#[command(name = "compose-check")]
#[command(
    about = "Verify the sRGB composition formula used for palette images with tRNS and gamma"
)]
#[command(version)]
pub struct Cli {
    /// Sweep every triple instead of the sampled grid
    #[arg(long)]
    pub exhaustive: bool,

    /// TOML file overriding sweep steps
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Formula to verify
    #[arg(long, value_enum)]
    pub candidate: Option<Candidate>,

    /// Print at most N violations per property (all are still counted)
    #[arg(long, value_name = "N")]
    pub max_violations: Option<usize>,
}

impl Cli {
    /// Parse process arguments, dropping any that are not recognised.
    pub fn parse_lenient() -> Result<Self, clap::Error> {
        Self::parse_lenient_from(std::env::args_os())
    }

    pub fn parse_lenient_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        loop {
            match Self::try_parse_from(args.clone()) {
                Ok(cli) => return Ok(cli),
                Err(e) if e.kind() == ErrorKind::UnknownArgument => {
                    let Some(pos) = unknown_position(&e, &args) else {
                        return Err(e);
                    };
                    let dropped = args.remove(pos);
                    log::warn!("Ignoring argument {:?}", dropped);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Index of the token clap rejected as unknown, skipping the program name.
fn unknown_position(e: &clap::Error, args: &[OsString]) -> Option<usize> {
    let Some(ContextValue::String(invalid)) = e.get(ContextKind::InvalidArg) else {
        return None;
    };
    let with_value = format!("{}=", invalid);
    args.iter()
        .skip(1)
        .position(|arg| {
            let arg = arg.to_string_lossy();
            arg == invalid.as_str() || arg.starts_with(&with_value)
        })
        .map(|i| i + 1)
}

/// Run the CLI application
pub fn run() -> ExitCode {
    match Cli::parse_lenient() {
        Ok(cli) => run_with(cli),
        Err(e) => {
            // --help and --version land here too and go to stdout
            let _ = e.print();
            if e.use_stderr() {
                ExitCode::from(EXIT_INVALID_ARGS)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            }
        }
    }
}

/// Run a verification described by already parsed arguments.
pub fn run_with(cli: Cli) -> ExitCode {
    let formula = cli.candidate.unwrap_or_default().formula();

    let grid = match load_grid(cli.config.as_deref()) {
        Ok(grid) => grid,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_CONFIG);
        }
    };
    let grid = if cli.exhaustive { SweepGrid::exhaustive() } else { grid };

    let report = verify(formula, &grid);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match cli.format.unwrap_or_default() {
        Format::Text => {
            write_text(&mut out, &report, &TextOptions { max_violations: cli.max_violations })
        }
        Format::Json => write_json(&mut out, &report),
    };
    if let Err(e) = written.and_then(|()| out.flush()) {
        log::error!("Failed to write report: {}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    if report.passed() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_default_run() {
        let cli = Cli::parse_lenient_from(["compose-check"]).unwrap();
        assert!(!cli.exhaustive);
        assert!(cli.config.is_none());
        assert!(cli.format.is_none());
        assert!(cli.candidate.is_none());
    }

    #[test]
    fn test_recognized_flags() {
        let cli = Cli::parse_lenient_from([
            "compose-check",
            "--exhaustive",
            "--format",
            "json",
            "--candidate",
            "unclamped",
            "--max-violations",
            "3",
        ])
        .unwrap();
        assert!(cli.exhaustive);
        assert_eq!(cli.format, Some(Format::Json));
        assert_eq!(cli.candidate, Some(Candidate::Unclamped));
        assert_eq!(cli.max_violations, Some(3));
    }

    #[test]
    fn test_unknown_arguments_are_ignored() {
        let cli = Cli::parse_lenient_from(["compose-check", "--verbose", "extra", "args"]).unwrap();
        assert!(!cli.exhaustive);
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_unknown_argument_keeps_recognized_flags() {
        let cli = Cli::parse_lenient_from([
            "compose-check",
            "--candidate",
            "unclamped",
            "--bogus",
            "--format=json",
            "--level=3",
        ])
        .unwrap();
        assert_eq!(cli.candidate, Some(Candidate::Unclamped));
        assert_eq!(cli.format, Some(Format::Json));
    }

    #[test]
    fn test_candidate_aliases() {
        let cli = Cli::parse_lenient_from(["compose-check", "--candidate", "legacy"]).unwrap();
        assert_eq!(cli.candidate, Some(Candidate::Unclamped));
        assert_eq!(Candidate::Unclamped.formula().name(), "unclamped");
        assert_eq!(Candidate::default().formula().name(), "srgb");
    }

    #[test]
    fn test_unknown_candidate_is_a_usage_error() {
        let err = Cli::parse_lenient_from(["compose-check", "--candidate", "unclampd"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_bad_format_value_is_a_usage_error() {
        let err = Cli::parse_lenient_from(["compose-check", "--format", "xml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}

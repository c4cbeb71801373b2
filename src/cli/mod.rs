//! CLI module for the chstest harness
//!
//! ## Commands
//!
//! - (no subcommand) - verify every test script against its recorded baseline
//! - `retest` - regenerate all baselines from fresh output
//! - `exec` - run every test script with output streaming to the console
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::HarnessConfig;
use crate::harness::{self, Mode, ProcessExecutor};
use crate::version::CHSTEST_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-file test harness for the CHS toolchain
#[derive(Parser, Debug)]
#[command(name = "chstest")]
#[command(version = CHSTEST_VERSION)]
#[command(about = "Golden-file test harness for the CHS toolchain", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Show expected/actual text for mismatching tests
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate all baselines from fresh output (overwrites tests/out/)
    Retest,

    /// Run every test script with output streaming to the console
    Exec,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let mode = match cli.command {
        None => Mode::Verify,
        Some(Command::Retest) => Mode::Record,
        Some(Command::Exec) => Mode::RunOnly,
    };

    let config = HarnessConfig::default();
    let summary = harness::run_harness(&config, mode, &ProcessExecutor, cli.verbose)
        .map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    if summary.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Per-test failures were already reported line by line.
        Ok(ExitCode::FAILURE)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default_is_verify() {
        let cli = Cli::try_parse_from(["chstest"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_retest() {
        let cli = Cli::try_parse_from(["chstest", "retest"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Retest)));
    }

    #[test]
    fn test_cli_parse_exec() {
        let cli = Cli::try_parse_from(["chstest", "exec"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Exec)));
    }

    #[test]
    fn test_cli_parse_verbose_is_global() {
        let cli = Cli::try_parse_from(["chstest", "-v"]).unwrap();
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["chstest", "retest", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["chstest", "bogus"]).is_err());
    }
}

//! Test harness orchestration
//!
//! One orchestrator owns the whole pipeline: gate on the executable under
//! test, discover the corpus, then drive each script through the executable
//! and apply the selected mode. Execution is strictly sequential; one test
//! case is fully processed before the next begins, and a failing case never
//! halts the batch.
//!
//! ## Modes
//!
//! - `Verify` (default) - capture stdout, compare byte-for-byte against the
//!   recorded baseline, report a per-test verdict
//! - `Record` - overwrite every baseline with freshly captured stdout
//! - `RunOnly` - stream stdout to the console, then delete the `.chsb`
//!   artifact the executable leaves beside the script

pub mod baseline;
pub mod discovery;
pub mod error;
pub mod executor;

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::time::{Duration, Instant};

use crate::config::HarnessConfig;

pub use baseline::Verdict;
pub use discovery::TestCase;
pub use error::HarnessError;
pub use executor::{CapturedOutput, Executor, ProcessExecutor, RunStatus};

/// Operating mode, selected by the CLI subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Compare fresh output against recorded baselines
    #[default]
    Verify,
    /// Regenerate all baselines (destructive)
    Record,
    /// Run everything with inherited stdout, no comparison
    RunOnly,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Verify => write!(f, "verify"),
            Mode::Record => write!(f, "record"),
            Mode::RunOnly => write!(f, "run-only"),
        }
    }
}

/// Counts for one harness invocation.
#[derive(Debug, Default)]
pub struct HarnessSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub missing_baseline: usize,
    pub duration: Duration,
}

impl HarnessSummary {
    /// True when every processed case passed (a missing baseline counts as
    /// a failure for the exit code).
    pub fn success(&self) -> bool {
        self.failed == 0 && self.missing_baseline == 0
    }
}

/// Drive the whole corpus in the given mode.
///
/// Prints one console line per test case plus a summary footer, and returns
/// the counts so the CLI can derive the process exit code. When the
/// executable under test is absent, prints the build instruction and returns
/// an empty summary without touching the corpus.
pub fn run_harness(
    config: &HarnessConfig,
    mode: Mode,
    executor: &dyn Executor,
    verbose: bool,
) -> Result<HarnessSummary, HarnessError> {
    let start = Instant::now();

    let Some(program) = discovery::locate_executable(config) else {
        let name = config
            .executables
            .first()
            .map(String::as_str)
            .unwrap_or("chsvm");
        println!("Please use: make {}", name);
        return Ok(HarnessSummary::default());
    };

    let cases = discovery::discover_test_cases(config)?;
    if cases.is_empty() {
        println!("No test scripts found in '{}'", config.test_dir.display());
        return Ok(HarnessSummary::default());
    }

    tracing::info!(%mode, count = cases.len(), "processing test corpus");

    let mut summary = HarnessSummary {
        total: cases.len(),
        ..HarnessSummary::default()
    };

    for case in &cases {
        tracing::debug!(script = %case.file_name, "running test case");
        match mode {
            Mode::Verify => verify_case(case, &program, executor, verbose, &mut summary),
            Mode::Record => record_case(case, &program, executor, &mut summary)?,
            Mode::RunOnly => stream_case(case, &program, executor, &mut summary),
        }
    }

    summary.duration = start.elapsed();
    print_summary(mode, &summary);
    Ok(summary)
}

fn verify_case(
    case: &TestCase,
    program: &std::path::Path,
    executor: &dyn Executor,
    verbose: bool,
    summary: &mut HarnessSummary,
) {
    let output = match executor.run_captured(program, &case.source_path) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{} could not be run: {}", case.file_name, e);
            summary.failed += 1;
            return;
        }
    };

    match baseline::verify(case, &output) {
        Ok(Verdict::Passed) => {
            println!("{} has passed.", case.file_name);
            summary.passed += 1;
        }
        Ok(Verdict::Failed { expected }) => {
            println!("{} has incompatibilities.", case.file_name);
            if verbose {
                println!("  expected:");
                for line in expected.lines() {
                    println!("    {}", line);
                }
                println!("  actual:");
                for line in output.stdout.lines() {
                    println!("    {}", line);
                }
            }
            summary.failed += 1;
        }
        Ok(Verdict::MissingBaseline) => {
            println!("{} has no recorded baseline.", case.file_name);
            summary.missing_baseline += 1;
        }
        Err(e) => {
            eprintln!("{} could not be verified: {}", case.file_name, e);
            summary.failed += 1;
        }
    }
}

fn record_case(
    case: &TestCase,
    program: &std::path::Path,
    executor: &dyn Executor,
    summary: &mut HarnessSummary,
) -> Result<(), HarnessError> {
    let output = match executor.run_captured(program, &case.source_path) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{} could not be run: {}", case.file_name, e);
            summary.failed += 1;
            return Ok(());
        }
    };

    // A baseline write error aborts the record run, not just this case.
    baseline::record(case, &output)?;
    println!("{} baseline recorded.", case.file_name);
    summary.passed += 1;
    Ok(())
}

fn stream_case(
    case: &TestCase,
    program: &std::path::Path,
    executor: &dyn Executor,
    summary: &mut HarnessSummary,
) {
    match executor.run_streaming(program, &case.source_path) {
        Ok(status) => {
            if !status.success {
                tracing::debug!(
                    script = %case.file_name,
                    exit_code = ?status.exit_code,
                    "script exited non-zero"
                );
            }
            summary.passed += 1;
        }
        Err(e) => {
            eprintln!("{} could not be run: {}", case.file_name, e);
            summary.failed += 1;
        }
    }

    // The executable leaves its compiled form next to the script; remove it
    // so the next invocation starts from a clean directory.
    if let Err(e) = fs::remove_file(&case.artifact_path) {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(
                artifact = %case.artifact_path.display(),
                error = %e,
                "could not remove artifact"
            );
        }
    }
}

fn print_summary(mode: Mode, summary: &HarnessSummary) {
    let secs = summary.duration.as_secs_f64();

    if mode == Mode::RunOnly {
        println!("==== {} script(s) executed in {:.2}s ====", summary.total, secs);
        return;
    }

    let mut parts = Vec::new();
    match mode {
        Mode::Record => parts.push(format!("{} recorded", summary.passed)),
        _ => parts.push(format!("{} passed", summary.passed)),
    }
    if summary.failed > 0 {
        parts.push(format!("{} failed", summary.failed));
    }
    if summary.missing_baseline > 0 {
        parts.push(format!("{} missing baseline", summary.missing_baseline));
    }

    let color = if summary.success() {
        "\x1b[1;32m"
    } else {
        "\x1b[1;31m"
    };
    println!("{}==== {} in {:.2}s ====\x1b[0m", color, parts.join(", "), secs);
}

//! Subprocess invocation for the executable under test
//!
//! The executable is spawned directly with an explicit argument list
//! (`<exe> run <script>`); no shell is involved, so script file names are
//! never interpolated into a command string.
//!
//! Two invocation modes:
//! - captured: stdout goes through a pipe and is retained for comparison or
//!   recording; nothing is printed by the invocation itself
//! - streaming: stdout is inherited by the console and not retained
//!
//! The orchestrator is written against the `Executor` trait so its control
//! flow can be exercised without spawning real processes.

use std::path::Path;
use std::process::{Command, Stdio};

use super::error::HarnessError;

/// Subcommand the executable under test expects before the script path.
const RUN_SUBCOMMAND: &str = "run";

/// Stdout captured from one run of the executable under test.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub stdout: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// Exit information from a streaming run (output went to the console).
#[derive(Debug, Clone, Copy)]
pub struct RunStatus {
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// Run the executable under test against one script.
///
/// Implementations block until the process exits. A non-zero exit status is
/// not an error at this layer; whatever reached stdout is the result.
pub trait Executor {
    /// Run with stdout captured through a pipe.
    fn run_captured(&self, program: &Path, script: &Path) -> Result<CapturedOutput, HarnessError>;

    /// Run with stdout inherited by the console.
    fn run_streaming(&self, program: &Path, script: &Path) -> Result<RunStatus, HarnessError>;
}

/// Real subprocess executor.
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn run_captured(&self, program: &Path, script: &Path) -> Result<CapturedOutput, HarnessError> {
        let output = Command::new(program)
            .arg(RUN_SUBCOMMAND)
            .arg(script)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| HarnessError::Spawn {
                program: program.display().to_string(),
                source: e,
            })?;

        tracing::debug!(
            script = %script.display(),
            exit_code = ?output.status.code(),
            "captured run finished"
        );

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            success: output.status.success(),
            exit_code: output.status.code(),
        })
    }

    fn run_streaming(&self, program: &Path, script: &Path) -> Result<RunStatus, HarnessError> {
        let mut child = Command::new(program)
            .arg(RUN_SUBCOMMAND)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| HarnessError::Spawn {
                program: program.display().to_string(),
                source: e,
            })?;

        let status = child.wait().map_err(|e| HarnessError::Spawn {
            program: program.display().to_string(),
            source: e,
        })?;

        Ok(RunStatus {
            success: status.success(),
            exit_code: status.code(),
        })
    }
}

//! Baseline recording and byte-exact verification
//!
//! A baseline is the recorded expected stdout for one script. Verification
//! compares captured stdout against the baseline byte for byte: no trimming,
//! no line-ending or trailing-newline normalization.

use std::fs;
use std::io::ErrorKind;

use super::discovery::TestCase;
use super::error::HarnessError;
use super::executor::CapturedOutput;

/// Outcome of verifying one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// Captured stdout differed from the baseline; carries the baseline text
    /// so the caller can show the mismatch.
    Failed { expected: String },
    /// No baseline has been recorded for this case.
    MissingBaseline,
}

/// Overwrite the baseline for `case` with the captured stdout, creating the
/// baseline directory on first record.
pub fn record(case: &TestCase, output: &CapturedOutput) -> Result<(), HarnessError> {
    if let Some(parent) = case.baseline_path.parent() {
        fs::create_dir_all(parent).map_err(|e| HarnessError::io(parent, e))?;
    }
    fs::write(&case.baseline_path, output.stdout.as_bytes())
        .map_err(|e| HarnessError::io(&case.baseline_path, e))
}

/// Compare captured stdout against the recorded baseline.
pub fn verify(case: &TestCase, output: &CapturedOutput) -> Result<Verdict, HarnessError> {
    let expected = match fs::read(&case.baseline_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Verdict::MissingBaseline),
        Err(e) => return Err(HarnessError::io(&case.baseline_path, e)),
    };

    if expected == output.stdout.as_bytes() {
        Ok(Verdict::Passed)
    } else {
        Ok(Verdict::Failed {
            expected: String::from_utf8_lossy(&expected).to_string(),
        })
    }
}

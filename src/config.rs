//! Harness configuration
//!
//! The filesystem layout is fixed relative to the working directory:
//! `./tests/*.chs` scripts, `./tests/out/<name>.chs.out.expect` baselines,
//! and `./tmp/<executable>` for the binary under test. The configuration
//! exists so tests can point the harness at a different root.

use std::path::{Path, PathBuf};

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory containing the `.chs` test scripts
    pub test_dir: PathBuf,
    /// Directory holding the recorded baselines (sibling `out/` of `test_dir`)
    pub baseline_dir: PathBuf,
    /// Directory probed for the executable under test
    pub bin_dir: PathBuf,
    /// File extension that marks a test script
    pub script_ext: String,
    /// Suffix appended to a script file name to form its baseline file name
    pub baseline_suffix: String,
    /// Suffix of the transient artifact some executables leave beside the script
    pub artifact_suffix: String,
    /// Candidate executable names, probed in order
    pub executables: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            test_dir: PathBuf::from("tests"),
            baseline_dir: PathBuf::from("tests").join("out"),
            bin_dir: PathBuf::from("tmp"),
            script_ext: "chs".to_string(),
            baseline_suffix: ".out.expect".to_string(),
            artifact_suffix: ".chsb".to_string(),
            executables: vec!["chsvm".to_string(), "chsc".to_string()],
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the test script directory (baselines move to its `out/` subdirectory)
    pub fn with_test_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.test_dir = dir.as_ref().to_path_buf();
        self.baseline_dir = self.test_dir.join("out");
        self
    }

    /// Set the directory probed for the executable under test
    pub fn with_bin_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.bin_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the candidate executable names
    pub fn with_executables(mut self, names: &[&str]) -> Self {
        self.executables = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Whether a file name qualifies as a test script
    pub fn is_test_script(&self, file_name: &str) -> bool {
        file_name.ends_with(&format!(".{}", self.script_ext))
    }

    /// Baseline path for a script file name (`tests/out/<name>.out.expect`)
    pub fn baseline_path(&self, file_name: &str) -> PathBuf {
        self.baseline_dir
            .join(format!("{}{}", file_name, self.baseline_suffix))
    }

    /// Artifact path for a script file name (`tests/<name>.chsb`)
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.test_dir
            .join(format!("{}{}", file_name, self.artifact_suffix))
    }
}

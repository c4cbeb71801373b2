//! Test discovery and executable gating
//!
//! Discovery enumerates the test directory and keeps every file whose name
//! ends with the script extension. Nothing runs unless one of the candidate
//! executables is present in the bin directory; that precondition is checked
//! once, before any test case is processed.

use std::fs;
use std::path::PathBuf;

use crate::config::HarnessConfig;

use super::error::HarnessError;

/// One script file in the corpus plus its derived paths.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// File name within the test directory (e.g. `fib.chs`)
    pub file_name: String,
    /// Path to the script itself
    pub source_path: PathBuf,
    /// Path of the recorded expected-output file
    pub baseline_path: PathBuf,
    /// Path of the transient artifact the executable may leave behind
    pub artifact_path: PathBuf,
}

impl TestCase {
    fn new(config: &HarnessConfig, file_name: String) -> Self {
        let source_path = config.test_dir.join(&file_name);
        let baseline_path = config.baseline_path(&file_name);
        let artifact_path = config.artifact_path(&file_name);
        Self {
            file_name,
            source_path,
            baseline_path,
            artifact_path,
        }
    }
}

/// Find the executable under test: the first candidate name present in the
/// bin directory. `None` means nothing may run.
pub fn locate_executable(config: &HarnessConfig) -> Option<PathBuf> {
    for name in &config.executables {
        let path = config.bin_dir.join(name);
        if path.is_file() {
            tracing::info!(executable = %path.display(), "selected executable under test");
            return Some(path);
        }
    }
    None
}

/// Enumerate the test corpus.
///
/// Directory order is not part of the contract; entries are sorted by file
/// name only so console output is stable between runs.
pub fn discover_test_cases(config: &HarnessConfig) -> Result<Vec<TestCase>, HarnessError> {
    let entries = fs::read_dir(&config.test_dir).map_err(|e| HarnessError::TestDir {
        path: config.test_dir.clone(),
        source: e,
    })?;

    let mut cases = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if config.is_test_script(name) {
            cases.push(TestCase::new(config, name.to_string()));
        }
    }

    cases.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chstest_discovery_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_discovery_filters_by_extension() {
        let dir = scratch_dir("filter");
        fs::write(dir.join("a.chs"), "1 print").unwrap();
        fs::write(dir.join("b.txt"), "not a test").unwrap();
        fs::write(dir.join("c.chs"), "2 print").unwrap();

        let config = HarnessConfig::new().with_test_dir(&dir);
        let cases = discover_test_cases(&config).unwrap();

        let names: Vec<&str> = cases.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.chs", "c.chs"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_discovery_skips_subdirectories() {
        let dir = scratch_dir("subdirs");
        fs::write(dir.join("a.chs"), "").unwrap();
        fs::create_dir_all(dir.join("out")).unwrap();

        let config = HarnessConfig::new().with_test_dir(&dir);
        let cases = discover_test_cases(&config).unwrap();
        assert_eq!(cases.len(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_case_paths_derived_from_config() {
        let dir = scratch_dir("paths");
        fs::write(dir.join("fib.chs"), "").unwrap();

        let config = HarnessConfig::new().with_test_dir(&dir);
        let cases = discover_test_cases(&config).unwrap();

        assert_eq!(cases[0].source_path, dir.join("fib.chs"));
        assert_eq!(cases[0].baseline_path, dir.join("out/fib.chs.out.expect"));
        assert_eq!(cases[0].artifact_path, dir.join("fib.chs.chsb"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_discovery_missing_dir_is_an_error() {
        let config = HarnessConfig::new().with_test_dir("/nonexistent/chstest");
        assert!(discover_test_cases(&config).is_err());
    }

    #[test]
    fn test_locate_executable_probes_in_order() {
        let dir = scratch_dir("locate");
        fs::write(dir.join("chsc"), "").unwrap();

        let config = HarnessConfig::new().with_bin_dir(&dir);
        let found = locate_executable(&config).unwrap();
        assert_eq!(found, dir.join("chsc"));

        // First candidate wins once present.
        fs::write(dir.join("chsvm"), "").unwrap();
        let found = locate_executable(&config).unwrap();
        assert_eq!(found, dir.join("chsvm"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_locate_executable_absent() {
        let dir = scratch_dir("locate_absent");
        let config = HarnessConfig::new().with_bin_dir(&dir);
        assert!(locate_executable(&config).is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}

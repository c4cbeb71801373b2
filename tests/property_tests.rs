//! Property-based tests for the harness
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use chstest::harness::{baseline, discovery};
use chstest::{CapturedOutput, HarnessConfig, Verdict};

static SCRATCH_ID: AtomicUsize = AtomicUsize::new(0);

/// One discovered test case in a fresh scratch directory.
fn scratch_case() -> (std::path::PathBuf, discovery::TestCase) {
    let id = SCRATCH_ID.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("chstest_prop_{}_{}", std::process::id(), id));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("x.chs"), "").unwrap();

    let config = HarnessConfig::new().with_test_dir(&dir);
    let case = discovery::discover_test_cases(&config).unwrap().remove(0);
    (dir, case)
}

fn captured(stdout: &str) -> CapturedOutput {
    CapturedOutput {
        stdout: stdout.to_string(),
        success: true,
        exit_code: Some(0),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: verification passes exactly when recorded and fresh output
    /// are identical - no trimming or normalization ever sneaks in.
    #[test]
    fn verify_passes_iff_outputs_identical(a in ".{0,40}", b in ".{0,40}") {
        let (dir, case) = scratch_case();

        baseline::record(&case, &captured(&a)).unwrap();
        let verdict = baseline::verify(&case, &captured(&b)).unwrap();

        if a == b {
            prop_assert_eq!(verdict, Verdict::Passed);
        } else {
            let is_failed = matches!(verdict, Verdict::Failed { .. });
            prop_assert!(is_failed);
        }

        let _ = fs::remove_dir_all(&dir);
    }

    /// Property: record followed by verify of the same output always passes.
    #[test]
    fn record_verify_round_trip(output in ".{0,60}") {
        let (dir, case) = scratch_case();

        baseline::record(&case, &captured(&output)).unwrap();
        let verdict = baseline::verify(&case, &captured(&output)).unwrap();
        prop_assert_eq!(verdict, Verdict::Passed);

        let _ = fs::remove_dir_all(&dir);
    }
}

proptest! {
    /// Property: the script filter accepts exactly the names with the
    /// configured extension.
    #[test]
    fn script_filter_matches_suffix_only(stem in "[a-zA-Z0-9_]{1,12}", ext in "[a-z]{1,5}") {
        let config = HarnessConfig::default();
        let name = format!("{}.{}", stem, ext);
        prop_assert_eq!(config.is_test_script(&name), ext == "chs");
    }

    /// Property: derived baseline paths always live in the baseline
    /// directory and carry the baseline suffix.
    #[test]
    fn baseline_paths_stay_in_baseline_dir(stem in "[a-zA-Z0-9_]{1,12}") {
        let config = HarnessConfig::default();
        let name = format!("{}.chs", stem);
        let path = config.baseline_path(&name);

        prop_assert!(path.starts_with(&config.baseline_dir));
        prop_assert!(path.to_str().unwrap().ends_with(".chs.out.expect"));
    }
}

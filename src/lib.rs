#![forbid(unsafe_code)]
//! Golden-file test harness for the CHS toolchain
//!
//! chstest drives an external executable (a CHS virtual machine or compiler)
//! against a corpus of `.chs` scripts, captures its standard output, and
//! either records it as the expected baseline or verifies fresh output
//! against a previously recorded one, byte for byte.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod harness;
pub mod version;

pub use config::HarnessConfig;

pub use harness::baseline::Verdict;
pub use harness::discovery::TestCase;
pub use harness::executor::{CapturedOutput, Executor, ProcessExecutor, RunStatus};
pub use harness::{run_harness, HarnessError, HarnessSummary, Mode};

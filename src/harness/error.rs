//! Harness error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while driving the test corpus
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("cannot read test directory '{path}': {source}")]
    TestDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Attach path context to a raw I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

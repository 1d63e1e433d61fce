//! Errors surfaced to callers.
//!
//! Generation itself cannot fail: broken internal invariants panic. These
//! variants cover the I/O around a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write program to {target}: {source}")]
    WriteProgram {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write manifest '{}': {source}", .path.display())]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Run manifest.
//!
//! A small JSON document recording everything needed to reproduce a run:
//! the seed, the emitter version, the generator build, and the shape of
//! the planned catalogue.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalogue::CatalogueSummary;
use crate::emit::EMITTER_VERSION;
use crate::error::{Error, Result};
use crate::Program;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");
const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");
const BUILD_DATE: Option<&str> = option_env!("VERGEN_BUILD_DATE");

const UNKNOWN: &str = "unknown";

/// Generator version information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub version: String,
    pub emitter_version: String,
    pub git_sha: String,
    pub build_date: String,
}

impl GeneratorInfo {
    /// Create generator info from build-time constants.
    pub fn current() -> Self {
        let sha = short_sha(GIT_SHA.unwrap_or(UNKNOWN));
        let git_sha = if GIT_DIRTY == Some("true") {
            format!("{sha}+")
        } else {
            sha.to_string()
        };

        Self {
            version: VERSION.to_string(),
            emitter_version: EMITTER_VERSION.to_string(),
            git_sha,
            build_date: BUILD_DATE.unwrap_or(UNKNOWN).to_string(),
        }
    }
}

/// The complete manifest for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub seed: u64,
    /// Program file, or `None` when the program went to stdout.
    pub output: Option<PathBuf>,
    pub generator: GeneratorInfo,
    pub catalogue: CatalogueSummary,
}

impl Manifest {
    pub fn new(program: &Program, output: Option<&Path>) -> Self {
        Self {
            seed: program.seed.get(),
            output: output.map(Path::to_path_buf),
            generator: GeneratorInfo::current(),
            catalogue: program.summary,
        }
    }

    /// Write the manifest as pretty-printed JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| Error::WriteManifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Get the short form of a git SHA (first 7 characters).
fn short_sha(sha: &str) -> &str {
    if sha.len() >= 7 { &sha[..7] } else { sha }
}

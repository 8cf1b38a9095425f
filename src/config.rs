//! # Configuration Module
//!
//! The only setting is where the directory's JSON backing file lives.
//!
//! ## Resolution Order
//!
//! 1. `--data <PATH>` on the command line
//! 2. `MELOMANE_DATA` environment variable (read by clap)
//! 3. [`DEFAULT_DATA_FILE`] in the current working directory
//!
//! The chosen path is made absolute so log lines and messages show exactly
//! which file is being read and rewritten.

use anyhow::{Context, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Backing file name used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "melomaniac_data.json";

/// Environment variable naming the backing file.
pub const DATA_ENV_VAR: &str = "MELOMANE_DATA";

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Absolute path to the JSON backing file
    pub data_path: PathBuf,
}

impl RuntimeConfig {
    /// Resolve the configuration from an optional explicit path.
    ///
    /// # Errors
    ///
    /// Fails if the current working directory cannot be determined while
    /// making the path absolute.
    pub fn resolve(data: Option<PathBuf>) -> Result<Self> {
        let requested = data.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Ok(Self {
            data_path: absolute(&requested)?,
        })
    }
}

/// Make `path` absolute against the current working directory.
///
/// # Errors
///
/// Fails if the working directory is unavailable.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let absolute = path
        .absolutize()
        .with_context(|| format!("Failed to resolve path {}", path.display()))?;
    Ok(absolute.into_owned())
}

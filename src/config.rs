//! # Configuration Module
//!
//! Locates the catalog file. SyncUp keeps its data in the platform-standard
//! data directory:
//! - Linux: `~/.local/share/syncup/`
//! - macOS: `~/Library/Application Support/syncup/`
//! - Windows: `%APPDATA%\syncup\`
//!
//! The catalog itself lives at `data/canciones.csv` inside that directory.
//! Both the CLI flag `--catalog` and the `SYNCUP_CATALOG` environment
//! variable override the location.

use anyhow::{Context, Result};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog location relative to the data directory (or the working
/// directory, when no data directory can be determined).
pub const CATALOG_RELATIVE_PATH: &str = "data/canciones.csv";

/// Returns the platform-appropriate data directory for SyncUp, creating it
/// if needed.
///
/// # Errors
///
/// - The system data directory cannot be determined
/// - The `syncup` subdirectory cannot be created
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let syncup_dir = data_dir.join("syncup");
    fs::create_dir_all(&syncup_dir).with_context(|| {
        format!(
            "Failed to create SyncUp data directory at {}. Please check file permissions.",
            syncup_dir.display()
        )
    })?;

    Ok(syncup_dir)
}

/// Default catalog path: `<data dir>/data/canciones.csv`, or
/// `data/canciones.csv` under the working directory when the data directory
/// is unavailable.
#[must_use]
pub fn default_catalog_path() -> PathBuf {
    match get_data_dir() {
        Ok(dir) => dir.join(CATALOG_RELATIVE_PATH),
        Err(e) => {
            log::warn!("{e:#}; falling back to ./{CATALOG_RELATIVE_PATH}");
            PathBuf::from(CATALOG_RELATIVE_PATH)
        }
    }
}

/// Turn a user-supplied path into an absolute one without touching the
/// filesystem.
pub fn resolve_catalog_path(path: &Path) -> Result<PathBuf> {
    let absolute = path
        .absolutize()
        .with_context(|| format!("Cannot resolve catalog path {}", path.display()))?;
    Ok(absolute.into_owned())
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Path to the catalog CSV file
    pub catalog_path: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
        }
    }
}

impl RuntimeConfig {
    /// Configuration with an explicit catalog path, made absolute.
    pub fn with_catalog_path(catalog_path: &Path) -> Result<Self> {
        Ok(Self {
            catalog_path: resolve_catalog_path(catalog_path)?,
        })
    }
}

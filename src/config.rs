//! # Configuration Module
//!
//! Locates the catalog data directory and carries the runtime settings the
//! binary passes down to sessions.
//!
//! ## Data Storage
//!
//! Yearly catalog files live in the platform-standard data directory:
//! - Linux: `~/.local/share/retrovision/data/`
//! - macOS: `~/Library/Application Support/retrovision/data/`
//! - Windows: `%APPDATA%\retrovision\data\`
//!
//! The `--data-dir` flag (or `RETROVISION_DATA_DIR`) points elsewhere, which
//! is how a checkout's `public/data` folder is used directly.

use crate::scheduler::{SchedulerConfig, SelectionMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the platform-appropriate catalog directory, creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The `retrovision/data` subdirectory cannot be created
///
/// # Examples
///
/// ```no_run
/// use retrovision::config::get_data_dir;
///
/// let data_dir = get_data_dir()?;
/// println!("Catalog files go in {}", data_dir.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Pass --data-dir to point at your catalog files."
        )
    })?;

    let catalog_dir = data_dir.join("retrovision").join("data");
    fs::create_dir_all(&catalog_dir).with_context(|| {
        format!(
            "Failed to create Retrovision data directory at {}. Please check file permissions.",
            catalog_dir.display()
        )
    })?;

    Ok(catalog_dir)
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Directory holding the `<year>.json` catalog files
    pub data_dir: PathBuf,
    pub mode: SelectionMode,
    pub quota: SchedulerConfig,
    /// Start over instead of stopping once a quota session has played everything
    pub loop_on_exhaust: bool,
}

impl RuntimeConfig {
    /// Resolve the data directory: an explicit path wins over the platform default.
    ///
    /// # Errors
    ///
    /// Fails if the explicit path is not a directory, or if no explicit path is
    /// given and the platform directory cannot be prepared.
    pub fn resolve(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(path) => {
                if !path.is_dir() {
                    anyhow::bail!("Catalog directory {} does not exist or is not a directory", path.display());
                }
                path.to_path_buf()
            }
            None => get_data_dir()?,
        };
        Ok(Self::with_data_dir(data_dir))
    }

    /// Create configuration with explicit data directory
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            mode: SelectionMode::default(),
            quota: SchedulerConfig::default(),
            loop_on_exhaust: false,
        }
    }

    /// # Errors
    ///
    /// Propagates quota window validation failures.
    pub fn validate(&self) -> Result<()> {
        self.quota.validate().context("Invalid quota configuration")
    }
}

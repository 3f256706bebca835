//! Path management for funding-recon
//!
//! ## Path Resolution Order
//!
//! 1. `FUNDING_RECON_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/funding-recon` or `~/.config/funding-recon`
//! 3. Windows: `%APPDATA%\funding-recon`

use std::path::{Path, PathBuf};

use crate::error::{FundingError, FundingResult};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "FUNDING_RECON_CONFIG_DIR";

const APP_DIR_NAME: &str = "funding-recon";

/// Manages the paths used by funding-recon
#[derive(Debug, Clone)]
pub struct ReconPaths {
    base_dir: PathBuf,
}

impl ReconPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application-data directory can be found.
    pub fn new() -> FundingResult<Self> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The configuration directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Create the configuration directory if needed
    pub fn ensure_directories(&self) -> FundingResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            FundingError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> FundingResult<PathBuf> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                FundingError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join(APP_DIR_NAME))
}

#[cfg(windows)]
fn resolve_default_path() -> FundingResult<PathBuf> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FundingError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
}

//! Path management for caisse-cli
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `CAISSE_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/caisse-cli` or `~/.config/caisse-cli`
//! 3. Windows: `%APPDATA%\caisse-cli`

use std::path::PathBuf;

use crate::error::CaisseError;

/// Manages all paths used by caisse-cli
#[derive(Debug, Clone)]
pub struct CaissePaths {
    /// Base directory for all caisse-cli data
    base_dir: PathBuf,
}

impl CaissePaths {
    /// Create a new CaissePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CaisseError> {
        let base_dir = if let Ok(custom) = std::env::var("CAISSE_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CaissePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/caisse-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the default directory for generated documents
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the report preferences file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), CaisseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CaisseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir())
            .map_err(|e| CaisseError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CaisseError> {
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("caisse-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CaisseError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CaisseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("caisse-cli"))
}

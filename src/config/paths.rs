//! Path management for fxpro
//!
//! Resolves where configuration, the credential database, the session file
//! and logs live.
//!
//! ## Path Resolution Order
//!
//! 1. `FXPRO_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/fxpro` on Linux, `~/Library/Application Support/fxpro` on
//!    macOS, `%APPDATA%\fxpro\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FxError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FXPRO_DATA_DIR";

/// Manages all paths used by fxpro
#[derive(Debug, Clone)]
pub struct FxPaths {
    /// Base directory for all fxpro data
    base_dir: PathBuf,
}

impl FxPaths {
    /// Create a new FxPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FxError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FxPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the SQLite credential and history database
    pub fn database_file(&self) -> PathBuf {
        self.base_dir.join("auth.db")
    }

    /// Get the path to the persisted login session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the authentication audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the diagnostic log written in TUI mode
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("fxpro.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), FxError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FxError::Io(format!("Failed to create base directory: {}", e)))?;
        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, FxError> {
    ProjectDirs::from("", "", "fxpro")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FxError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FxPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.database_file(), temp_dir.path().join("auth.db"));
        assert_eq!(paths.session_file(), temp_dir.path().join("session.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("fxpro");
        let paths = FxPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();

        assert!(nested.exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FxPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(paths.log_file(), temp_dir.path().join("fxpro.log"));
    }
}

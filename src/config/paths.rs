//! Platform-specific configuration and data paths.

use crate::constants::{APP_NAME, history};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/fientesia/`
/// - macOS: `~/Library/Application Support/fientesia/`
/// - Windows: `%APPDATA%\fientesia\`
pub fn config_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the data directory for the current platform.
///
/// - Linux: `~/.local/share/fientesia/`
pub fn data_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(Error::DataDirNotFound)
}

/// Default activity history file.
pub fn history_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(history::FILE_NAME))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_returns_path() {
        let path = config_dir().unwrap();
        assert!(path.to_string_lossy().contains("fientesia"));
    }

    #[test]
    fn test_config_file_path_ends_with_toml() {
        let path = config_file_path().unwrap();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_history_file_in_data_dir() {
        let path = history_file_path().unwrap();
        assert!(path.starts_with(data_dir().unwrap()));
        assert!(path.to_string_lossy().ends_with("history.json"));
    }
}

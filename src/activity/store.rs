//! JSON persistence for the activity history.

use super::{ActivityEntry, ActivityLog};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Load the history from a JSON file.
///
/// Returns an empty log if the file does not exist.
pub fn load_history(path: &Path) -> Result<ActivityLog> {
    if !path.exists() {
        debug!("No history file at {}", path.display());
        return Ok(ActivityLog::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::HistoryRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let entries: Vec<ActivityEntry> =
        serde_json::from_str(&contents).map_err(|e| Error::HistoryParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!("Loaded {} history entries", entries.len());

    Ok(ActivityLog::from_entries(entries))
}

/// Save the history to a JSON file, newest entry first.
pub fn save_history(log: &ActivityLog, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::HistoryWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let entries: Vec<&ActivityEntry> = log.history().collect();
    let contents =
        serde_json::to_string_pretty(&entries).map_err(|e| Error::JsonSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::HistoryWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;
    use crate::risk::PredictionAnalysis;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_log() {
        let dir = TempDir::new().unwrap();
        let log = load_history(&dir.path().join("history.json")).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let values = [30.5, 55.0, 0.002, 0.005].repeat(3);
        let mut log = ActivityLog::new();
        log.record_prediction(PredictionAnalysis::analyze(&values, 21).unwrap());
        log.record_prediction(PredictionAnalysis::analyze(&values, 35).unwrap());
        save_history(&log, &path).unwrap();

        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.history().all(|e| e.kind == ActivityKind::Prediction));
        assert_eq!(loaded.last_prediction().map(|a| a.age), Some(35));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = load_history(&path);
        assert!(matches!(result, Err(Error::HistoryParse { .. })));
    }
}

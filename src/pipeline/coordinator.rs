//! Input collection and report placement.

use crate::config::OutputFormat;
use crate::constants::recorded::{FORECAST_SUFFIX, SCORES_SUFFIX};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// What the collected JSON files hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Sequence windows; recorded sidecars are skipped.
    Window,
    /// Recorded forecaster outputs.
    ModelOutput,
}

/// Determine the output directory for a file.
pub fn output_dir_for(input: &Path, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        Path::to_path_buf,
    )
}

/// Report path for an input (`<stem>.risk.<ext>`).
pub fn report_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let name = input
        .file_name()
        .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned());
    let stem = [FORECAST_SUFFIX, ".json"]
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(&name);

    output_dir.join(format!("{stem}.risk.{}", format.extension()))
}

/// Collect input files from paths (files and directories).
///
/// Explicit files are always kept; directories are scanned recursively for
/// JSON files matching `kind`.
pub fn collect_input_files(paths: &[PathBuf], kind: InputKind) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            collect_json_files_recursive(path, kind, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

fn collect_json_files_recursive(dir: &Path, kind: InputKind, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_json_files_recursive(&path, kind, files)?;
        } else if matches_kind(&path, kind) {
            files.push(path);
        }
    }

    Ok(())
}

fn matches_kind(path: &Path, kind: InputKind) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    let name = name.to_lowercase();
    if !name.ends_with(".json") || name.ends_with(SCORES_SUFFIX) {
        return false;
    }

    match kind {
        InputKind::Window => !name.ends_with(FORECAST_SUFFIX),
        InputKind::ModelOutput => name.ends_with(FORECAST_SUFFIX),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_dir_for_with_explicit() {
        let input = Path::new("/data/window.json");
        let output = output_dir_for(input, Some(Path::new("/results")));
        assert_eq!(output, PathBuf::from("/results"));
    }

    #[test]
    fn test_output_dir_for_without_explicit() {
        let input = Path::new("/data/window.json");
        let output = output_dir_for(input, None);
        assert_eq!(output, PathBuf::from("/data"));
    }

    #[test]
    fn test_report_path_for() {
        let dir = Path::new("/out");
        assert_eq!(
            report_path_for(Path::new("barn1.json"), dir, OutputFormat::Csv),
            PathBuf::from("/out/barn1.risk.csv")
        );
        assert_eq!(
            report_path_for(Path::new("barn1.forecast.json"), dir, OutputFormat::Json),
            PathBuf::from("/out/barn1.risk.json")
        );
        assert_eq!(
            report_path_for(Path::new("poulailler_é.json"), dir, OutputFormat::Text),
            PathBuf::from("/out/poulailler_é.risk.txt")
        );
    }

    #[test]
    fn test_matches_kind() {
        assert!(matches_kind(Path::new("w.json"), InputKind::Window));
        assert!(!matches_kind(Path::new("w.forecast.json"), InputKind::Window));
        assert!(!matches_kind(Path::new("p.scores.json"), InputKind::Window));
        assert!(!matches_kind(Path::new("w.csv"), InputKind::Window));
        assert!(matches_kind(Path::new("w.FORECAST.JSON"), InputKind::ModelOutput));
        assert!(!matches_kind(Path::new("w.json"), InputKind::ModelOutput));
    }

    #[test]
    fn test_collect_from_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("barn2");
        std::fs::create_dir(&nested).unwrap();
        for name in ["a.json", "a.forecast.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "[]").unwrap();
        }
        std::fs::write(nested.join("b.json"), "[]").unwrap();

        let windows = collect_input_files(&[dir.path().to_path_buf()], InputKind::Window).unwrap();
        assert_eq!(windows, vec![dir.path().join("a.json"), nested.join("b.json")]);

        let outputs =
            collect_input_files(&[dir.path().to_path_buf()], InputKind::ModelOutput).unwrap();
        assert_eq!(outputs, vec![dir.path().join("a.forecast.json")]);
    }

    #[test]
    fn test_collect_skips_missing_paths() {
        let files =
            collect_input_files(&[PathBuf::from("/nonexistent/w.json")], InputKind::Window).unwrap();
        assert!(files.is_empty());
    }
}

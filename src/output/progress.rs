//! Progress bar utilities for multi-file runs.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for processing multiple files.
///
/// Returns `None` when disabled or when there is at most one file.
pub fn create_file_progress(total_files: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_files <= 1 {
        return None;
    }

    let pb = ProgressBar::new(total_files as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_or_single_file_has_no_bar() {
        assert!(create_file_progress(5, false).is_none());
        assert!(create_file_progress(1, true).is_none());
        assert!(create_file_progress(0, true).is_none());
    }

    #[test]
    fn test_bar_counts_files() {
        let pb = create_file_progress(3, true);
        inc_progress(pb.as_ref());
        assert_eq!(pb.as_ref().map(ProgressBar::position), Some(1));
        assert_eq!(pb.as_ref().and_then(ProgressBar::length), Some(3));
        finish_progress(pb, "done");
    }
}

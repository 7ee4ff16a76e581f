//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{InputKind, collect_input_files, output_dir_for, report_path_for};
pub use processor::{analyze_output_file, classify, forecast, process_window};

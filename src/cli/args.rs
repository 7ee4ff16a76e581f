//! CLI argument definitions.

use crate::config::OutputFormat;
use crate::constants::stage;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Poultry house risk analysis from forecaster and classifier outputs.
#[derive(Debug, Parser)]
#[command(name = "fientesia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "FIENTESIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not read or write the activity history.
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Only print warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze environment forecasts for sequence windows.
    Predict(PredictArgs),
    /// Diagnose droppings photos from classifier scores.
    Diagnose(DiagnoseArgs),
    /// Validate a sequence window file.
    Sequence(SequenceArgs),
    /// Print the thresholds applied at a flock age.
    Thresholds {
        /// Flock age selection.
        #[command(flatten)]
        age: AgeArgs,
        /// Report format.
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
    /// Show or clear the activity history.
    History {
        /// Number of entries to show.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Remove all entries.
        #[arg(long)]
        clear: bool,
    },
    /// Show the overall flock status.
    Status,
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Flock stage presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgeStage {
    /// Chicks, 0 to 7 days.
    Chicks,
    /// Growing birds, 8 to 14 days.
    Growing,
    /// Finishing birds, 15 to 28 days.
    Finishing,
    /// Adult birds, beyond 28 days.
    Adult,
}

impl AgeStage {
    /// Representative age in days.
    pub const fn days(self) -> u32 {
        match self {
            Self::Chicks => stage::CHICKS,
            Self::Growing => stage::GROWING,
            Self::Finishing => stage::FINISHING,
            Self::Adult => stage::ADULT,
        }
    }
}

/// Flock age given as days or as a stage.
#[derive(Debug, Clone, Copy, Args)]
pub struct AgeArgs {
    /// Flock age in days.
    #[arg(short, long, conflicts_with = "stage")]
    pub age: Option<u32>,

    /// Flock stage (uses a representative age).
    #[arg(long, value_enum)]
    pub stage: Option<AgeStage>,
}

impl AgeArgs {
    /// Age in days, if given on the command line.
    pub fn days(self) -> Option<u32> {
        self.age.or_else(|| self.stage.map(AgeStage::days))
    }
}

/// Arguments for the predict command.
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Sequence window files (or recorded model outputs with --from-output).
    pub inputs: Vec<PathBuf>,

    /// Flock age selection.
    #[command(flatten)]
    pub age: AgeArgs,

    /// Treat inputs as recorded forecaster outputs instead of windows.
    #[arg(long)]
    pub from_output: bool,

    /// Report format.
    #[arg(short, long, env = "FIENTESIA_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write one report per input into this directory instead of stdout.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the diagnose command.
#[derive(Debug, Args)]
pub struct DiagnoseArgs {
    /// Droppings photos.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Minimum top-class probability (0.0-1.0).
    #[arg(short = 'c', long, value_parser = parse_confidence)]
    pub min_confidence: Option<f32>,

    /// Report format.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the sequence command.
#[derive(Debug, Args)]
pub struct SequenceArgs {
    /// Sequence window file.
    pub file: PathBuf,

    /// Scaler parameter file to apply (overrides config).
    #[arg(long)]
    pub scaler: Option<PathBuf>,

    /// Print the standardized tensor as JSON. Needs a scaler from
    /// `--scaler` or the config.
    #[arg(long)]
    pub dump: bool,
}

/// Parse and validate confidence value.
fn parse_confidence(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

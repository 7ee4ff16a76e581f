//! Fientesia - poultry house risk analysis.
//!
//! Turns environment forecasts and droppings classifier scores into graded
//! risk levels for a flock of a given age.

#![warn(missing_docs)]

pub mod activity;
pub mod cli;
pub mod config;
pub mod constants;
pub mod diagnostic;
pub mod error;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod risk;

use activity::{ActivityEvent, ActivityLog, ActivityRecord, load_history, save_history};
use clap::Parser;
use cli::{Cli, Command, ConfigAction, DiagnoseArgs, GlobalArgs, PredictArgs, SequenceArgs};
use config::{Config, config_file_path, history_file_path, load_config, save_config};
use inference::{FeatureScaler, RecordedBackend, SequenceWindow};
use output::{ReportWriter, create_writer, progress};
use pipeline::{
    InputKind, analyze_output_file, classify, collect_input_files, output_dir_for, process_window,
    report_path_for,
};
use risk::AgeThresholds;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the fientesia CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    handle_command(cli.command, &cli.global)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Reports go to stdout; keep logs out of them.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch a subcommand. Configuration is loaded only by the commands that
/// use it, so `config` still works when the file is broken.
fn handle_command(command: Command, global: &GlobalArgs) -> Result<()> {
    let config_path = global.config.as_deref();
    let load = || load_config(config_path);

    match command {
        Command::Config { action } => handle_config_command(action, config_path),
        Command::Predict(args) => {
            let config = load()?;
            let mut history = History::open(&config, recording_enabled(global, &config))?;
            let outcome = handle_predict(&args, global, &config, &mut history);
            history.save()?;
            outcome
        }
        Command::Diagnose(args) => {
            let config = load()?;
            let mut history = History::open(&config, recording_enabled(global, &config))?;
            let outcome = handle_diagnose(&args, &config, &mut history);
            history.save()?;
            outcome
        }
        Command::Sequence(args) => handle_sequence(&args, &load()?),
        Command::Thresholds { age, format } => {
            let config = load()?;
            let age = age.days().unwrap_or(config.defaults.age_days);
            let mut writer = stdout_writer(format.unwrap_or(config.defaults.format));
            writer.write_thresholds(&AgeThresholds::for_age(age))?;
            writer.finalize()
        }
        Command::History { limit, clear } => {
            let mut history = History::open(&load()?, !global.no_history)?;
            if clear {
                history.log.clear();
                history.save()?;
                println!("History cleared");
                return Ok(());
            }
            print_history(&history.log, limit);
            Ok(())
        }
        Command::Status => {
            let history = History::open(&load()?, !global.no_history)?;
            print_status(&history.log);
            Ok(())
        }
    }
}

fn recording_enabled(global: &GlobalArgs, config: &Config) -> bool {
    config.defaults.history && !global.no_history
}

/// Activity history bound to its file.
///
/// When disabled nothing is read, recorded or written.
struct History {
    log: ActivityLog,
    path: Option<PathBuf>,
}

impl History {
    fn open(config: &Config, enabled: bool) -> Result<Self> {
        if !enabled {
            return Ok(Self {
                log: ActivityLog::new(),
                path: None,
            });
        }

        let path = match &config.history.file {
            Some(path) => path.clone(),
            None => history_file_path()?,
        };
        let mut log = load_history(&path)?;
        log.subscribe(|event| match event {
            ActivityEvent::Added(entry) => debug!("History: recorded #{} {}", entry.id, entry.title),
            ActivityEvent::Cleared => debug!("History: cleared"),
        });

        Ok(Self {
            log,
            path: Some(path),
        })
    }

    fn record(&mut self, record: ActivityRecord) {
        if self.path.is_some() {
            self.log.append(record);
        }
    }

    fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => save_history(&self.log, path),
            None => Ok(()),
        }
    }
}

fn stdout_writer(format: config::OutputFormat) -> Box<dyn ReportWriter> {
    create_writer(format, Box::new(std::io::stdout()))
}

fn file_writer(path: &Path, format: config::OutputFormat) -> Result<Box<dyn ReportWriter>> {
    let file = File::create(path)?;
    Ok(create_writer(format, Box::new(BufWriter::new(file))))
}

fn source_name(path: &Path) -> String {
    path.display().to_string()
}

/// Outcome counts for a multi-input run.
#[derive(Default)]
struct RunSummary {
    processed: usize,
    errors: usize,
    last_error: Option<Error>,
}

impl RunSummary {
    fn failed(&mut self, path: &Path, e: Error) {
        error!(code = e.code(), "Failed to process {}: {}", path.display(), e);
        self.errors += 1;
        self.last_error = Some(e);
    }

    /// Fails only when every input failed.
    fn finish(self) -> Result<()> {
        if self.errors > 0 {
            warn!("{} file(s) had errors", self.errors);
        }
        match self.last_error {
            Some(e) if self.processed == 0 => Err(e),
            _ => Ok(()),
        }
    }
}

fn handle_predict(
    args: &PredictArgs,
    global: &GlobalArgs,
    config: &Config,
    history: &mut History,
) -> Result<()> {
    let total_start = Instant::now();

    let kind = if args.from_output {
        InputKind::ModelOutput
    } else {
        InputKind::Window
    };
    let files = collect_input_files(&args.inputs, kind)?;
    if files.is_empty() {
        return Err(Error::NoInputFiles);
    }
    info!("Found {} input file(s) to process", files.len());

    let age = args.age.days().unwrap_or(config.defaults.age_days);
    let format = args.format.unwrap_or(config.defaults.format);
    let backend = RecordedBackend::new();
    let (timesteps, features) = (config.sequence.timesteps, config.sequence.features);

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir).map_err(|e| Error::OutputDirCreateFailed {
            path: dir.clone(),
            source: e,
        })?;
    }

    let progress_enabled = !global.quiet && !args.no_progress;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);
    let mut stdout = args.output_dir.is_none().then(|| stdout_writer(format));
    let mut summary = RunSummary::default();
    let mut halted = None;

    for file in &files {
        let result = if args.from_output {
            analyze_output_file(file, age)
        } else {
            process_window(&backend, file, timesteps, features, age)
        };

        let written = result.and_then(|analysis| {
            let source = source_name(file);
            match stdout.as_mut() {
                Some(writer) => writer.write_analysis(&source, &analysis)?,
                None => {
                    let dir = output_dir_for(file, args.output_dir.as_deref());
                    let path = report_path_for(file, &dir, format);
                    let mut writer = file_writer(&path, format)?;
                    writer.write_analysis(&source, &analysis)?;
                    writer.finalize()?;
                    debug!("Wrote {}", path.display());
                }
            }
            Ok(analysis)
        });

        match written {
            Ok(analysis) => {
                info!("{}: {}", file.display(), analysis.global_risk);
                history.record(ActivityRecord::Prediction(analysis));
                summary.processed += 1;
            }
            Err(e) if args.fail_fast => {
                error!(code = e.code(), "Stopping at {}: {}", file.display(), e);
                halted = Some(e);
                break;
            }
            Err(e) => summary.failed(file, e),
        }
        progress::inc_progress(file_progress.as_ref());
    }

    // Reports already analyzed are emitted even when the run stopped early.
    progress::finish_progress(
        file_progress,
        if halted.is_some() { "Failed" } else { "Complete" },
    );
    if let Some(writer) = stdout.as_mut() {
        writer.finalize()?;
    }
    if let Some(e) = halted {
        return Err(e);
    }

    info!(
        "Complete: {} processed, {} errors in {:.2}s",
        summary.processed,
        summary.errors,
        total_start.elapsed().as_secs_f64()
    );
    summary.finish()
}

fn handle_diagnose(args: &DiagnoseArgs, config: &Config, history: &mut History) -> Result<()> {
    let backend = RecordedBackend::new();
    let min_confidence = args
        .min_confidence
        .unwrap_or(config.diagnostic.min_confidence);
    let mut writer = stdout_writer(args.format.unwrap_or(config.defaults.format));
    let mut summary = RunSummary::default();

    for image in &args.images {
        match classify(&backend, image) {
            Ok(diagnosis) => {
                let uncertain = diagnosis.confidence < min_confidence;
                if uncertain {
                    warn!(
                        "{}: top class {} below minimum confidence {min_confidence}",
                        image.display(),
                        diagnosis.label
                    );
                }
                writer.write_diagnosis(&source_name(image), &diagnosis, uncertain)?;
                history.record(ActivityRecord::Diagnostic(diagnosis));
                summary.processed += 1;
            }
            Err(e) => summary.failed(image, e),
        }
    }

    writer.finalize()?;
    summary.finish()
}

fn handle_sequence(args: &SequenceArgs, config: &Config) -> Result<()> {
    let window = SequenceWindow::load(
        &args.file,
        config.sequence.timesteps,
        config.sequence.features,
    )?;
    println!(
        "{}: {} timesteps x {} features",
        args.file.display(),
        window.timesteps(),
        window.features()
    );

    let scaler_path = args.scaler.as_ref().or(config.sequence.scaler.as_ref());
    let Some(scaler_path) = scaler_path else {
        return if args.dump { Err(Error::NoScaler) } else { Ok(()) };
    };

    let scaler = FeatureScaler::load(scaler_path)?;
    if scaler.len() < window.features() {
        warn!(
            "Scaler covers {} of {} features; the rest pass through unscaled",
            scaler.len(),
            window.features()
        );
    }
    println!("scaler: {} feature(s)", scaler.len());

    if args.dump {
        let tensor = window.to_input_tensor(&scaler);
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer(&mut stdout, &tensor)
            .map_err(|e| Error::JsonSerialize { source: e })?;
        writeln!(stdout)?;
    }
    Ok(())
}

fn print_history(log: &ActivityLog, limit: Option<usize>) {
    if log.is_empty() {
        println!("No activity recorded");
        return;
    }
    for entry in log.history().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "#{:<4} {}  {:<10} {}",
            entry.id,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.kind,
            entry.title
        );
    }
}

fn print_status(log: &ActivityLog) {
    let status = log.flock_status();
    println!("Flock status: {} ({})", status.label, status.level.subtitle());

    if let Some(analysis) = log.last_prediction() {
        println!(
            "  Last forecast:  {} (age {} days, {})",
            analysis.global_risk.as_str().to_uppercase(),
            analysis.age,
            analysis.analyzed_at.format("%Y-%m-%d %H:%M")
        );
    }
    if let Some(diagnosis) = log.last_diagnostic() {
        println!(
            "  Last diagnosis: {} ({:.1}%)",
            diagnosis.name,
            f64::from(diagnosis.confidence) * 100.0
        );
    }
    for item in status.level.recommendations() {
        println!("  - {item}");
    }
}

fn handle_config_command(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(Some(&path))?;
            let contents =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

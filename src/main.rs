// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};

use autosubs::app_config::{Config, LogLevel};
use autosubs::app_controller::Controller;
use autosubs::text_format::CaseMode;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

/// CLI Wrapper for CaseMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCaseMode {
    AsIs,
    Sentence,
    Upper,
    Lower,
}

impl From<CliCaseMode> for CaseMode {
    fn from(cli_mode: CliCaseMode) -> Self {
        match cli_mode {
            CliCaseMode::AsIs => CaseMode::AsIs,
            CliCaseMode::Sentence => CaseMode::Sentence,
            CliCaseMode::Upper => CaseMode::Upper,
            CliCaseMode::Lower => CaseMode::Lower,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Segment a word-timestamp transcript into an SRT subtitle file
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Shift every timestamp in an SRT file by a fixed offset
    Shift(ShiftArgs),

    /// Convert an SRT file into absolute timeline frame windows
    Sync(SyncArgs),

    /// Generate shell completions for autosubs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Word-timestamp JSON file produced by the transcription engine
    #[arg(value_name = "TRANSCRIPT")]
    transcript: PathBuf,

    /// Output SRT path (defaults to the transcript path with .srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum words per cue
    #[arg(long)]
    max_words: Option<usize>,

    /// Maximum characters per cue
    #[arg(long)]
    max_chars: Option<usize>,

    /// Silence gap in seconds that forces a cue break
    #[arg(long)]
    max_gap: Option<f64>,

    /// Comma-separated list of words to censor
    #[arg(long)]
    censor: Option<String>,

    /// Strip trailing commas and full stops
    #[arg(long)]
    remove_punctuation: bool,

    /// Case formatting applied to each cue
    #[arg(long, value_enum)]
    case_mode: Option<CliCaseMode>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ShiftArgs {
    /// Input SRT file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Offset in seconds, negative to shift earlier
    #[arg(long, allow_hyphen_values = true)]
    offset_seconds: f64,

    /// Output SRT path (defaults to rewriting the input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// Input SRT file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Timeline frame rate (e.g. 24, 23.976)
    #[arg(long)]
    frame_rate: Option<f64>,

    /// Frame offset at which the transcribed clip starts on the timeline
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    in_point: i64,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// autosubs - AI subtitles for the editing timeline
///
/// Turns word-level speech-to-text output into timed subtitle cues, written
/// as SRT or mapped to absolute timeline frames.
#[derive(Parser, Debug)]
#[command(name = "autosubs")]
#[command(version = "1.0.0")]
#[command(about = "Word-timestamp to subtitle cue converter")]
#[command(long_about = "autosubs segments word-level transcription output into timed subtitle cues.

EXAMPLES:
    autosubs generate words.json                     # Segment using default config
    autosubs generate words.json -o subs.srt         # Choose the output path
    autosubs generate --max-words 4 words.json       # Override a segmentation limit
    autosubs generate --censor darn,heck words.json  # Mask censored words
    autosubs shift subs.srt --offset-seconds -5      # Re-align an external SRT
    autosubs sync subs.srt --frame-rate 23.976       # Print timeline frame windows
    autosubs completions bash > autosubs.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "autosubs", &mut std::io::stdout());
            Ok(())
        }
        Commands::Generate(args) => run_generate(args),
        Commands::Shift(args) => run_shift(args),
        Commands::Sync(args) => run_sync(args),
    }
}

/// Load the config file, creating a default one when it does not exist
fn load_config(config_path: &str, log_level: &Option<CliLogLevel>) -> Result<Config> {
    if let Some(cmd_log_level) = log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = if std::path::Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(cmd_log_level) = log_level {
        config.log_level = cmd_log_level.clone().into();
    } else {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_config(&args.config_path, &args.log_level)?;

    // Apply command line overrides on top of the config file
    if let Some(max_words) = args.max_words {
        config.segmentation.max_words = max_words;
    }
    if let Some(max_chars) = args.max_chars {
        config.segmentation.max_chars = max_chars;
    }
    if let Some(max_gap) = args.max_gap {
        config.segmentation.max_gap_seconds = max_gap;
    }
    if let Some(censor) = args.censor {
        config.formatting.censor_words = censor;
    }
    if args.remove_punctuation {
        config.formatting.remove_punctuation = true;
    }
    if let Some(case_mode) = args.case_mode {
        config.formatting.case_mode = case_mode.into();
    }

    let controller = Controller::with_config(config)?;
    let collection = controller.generate(&args.transcript, args.output.as_deref())?;
    info!("Generated {} subtitle cues", collection.entries.len());

    Ok(())
}

fn run_shift(args: ShiftArgs) -> Result<()> {
    if let Some(cmd_log_level) = &args.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let offset_ms = (args.offset_seconds * 1000.0).round() as i64;
    let output = args.output.clone().unwrap_or_else(|| args.input.clone());

    let controller = Controller::with_config(Config::default())?;
    let outcome = controller.shift_file(&args.input, &output, offset_ms)?;
    if outcome.clamped() {
        warn!(
            "{} timestamp range(s) were clamped to zero",
            outcome.underflows.len()
        );
    }

    Ok(())
}

fn run_sync(args: SyncArgs) -> Result<()> {
    let config = load_config(&args.config_path, &args.log_level)?;
    let frame_rate = args.frame_rate.unwrap_or(config.timeline.frame_rate);

    let controller = Controller::with_config(config)?;
    let clips = controller.sync_file(&args.input, frame_rate, args.in_point)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    for clip in &clips {
        let line = serde_json::to_string(clip).context("Failed to serialize clip")?;
        writeln!(handle, "{}", line)?;
    }

    Ok(())
}

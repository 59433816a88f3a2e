// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use wordsrt::app_config::{self, Config, RenderMode};
use wordsrt::app_controller::Controller;
use wordsrt::FileManager;

/// CLI Wrapper for RenderMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliRenderMode {
    Highlight,
    SingleWords,
    PlainText,
}

impl From<CliRenderMode> for RenderMode {
    fn from(cli_mode: CliRenderMode) -> Self {
        match cli_mode {
            CliRenderMode::Highlight => RenderMode::Highlight,
            CliRenderMode::SingleWords => RenderMode::SingleWords,
            CliRenderMode::PlainText => RenderMode::PlainText,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert transcript JSON files to SRT
    Render(RenderArgs),

    /// Check SRT files for structural problems
    Validate(ValidateArgs),

    /// Generate shell completions for wordsrt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Transcript JSON files; several files are stitched in the given order
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output SRT file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Subtitle style
    #[arg(short, long, value_enum)]
    mode: Option<CliRenderMode>,

    /// Highlight color for the highlight style
    #[arg(short, long)]
    color: Option<String>,

    /// Regroup into segments of this many words (plain-text style)
    #[arg(short, long)]
    words_per_segment: Option<usize>,

    /// Configuration file path
    #[arg(long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// SRT file or directory to scan for .srt files
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Also check cue timing and numbering
    #[arg(short, long)]
    strict: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// wordsrt - word-timed transcripts to SubRip subtitles
#[derive(Parser, Debug)]
#[command(name = "wordsrt")]
#[command(version)]
#[command(about = "Convert word-timed speech transcripts to SRT subtitles")]
#[command(long_about = "wordsrt turns speech-recognition output (segments with word timings) into SRT subtitles.

EXAMPLES:
    wordsrt render talk.json -o talk.srt                 # One cue per segment
    wordsrt render talk.json -m highlight -c yellow      # Karaoke-style word highlight
    wordsrt render talk.json -w 5                        # Regroup into 5-word cues
    wordsrt render part1.json part2.json -o full.srt     # Stitch chunk transcripts
    wordsrt validate subtitles/ --strict                 # Check every .srt below a folder
    wordsrt completions bash > wordsrt.bash              # Generate bash completions")]
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

    // @returns: Tag and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
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
            let (tag, color) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn apply_log_level(level: &app_config::LogLevel) {
    log::set_max_level(level.to_level_filter());
}

fn main() -> Result<()> {
    // The logger accepts everything; log::set_max_level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wordsrt", &mut std::io::stdout());
            Ok(())
        }
        Commands::Render(args) => run_render(args),
        Commands::Validate(args) => run_validate(args),
    }
}

/// Load the config file, creating a default one when it does not exist yet
fn load_or_create_config(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        let file = File::open(config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        if let Some(parent) = config_path.parent() {
            FileManager::ensure_dir(parent).context("Failed to create config directory")?;
        }
        wordsrt::write_to_file(config_path, &config_json)
            .context("Failed to write default config")?;
        Ok(config)
    }
}

fn run_render(options: RenderArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        apply_log_level(&cmd_log_level.clone().into());
    }

    let mut config = match &options.config_path {
        Some(path) => load_or_create_config(path)?,
        None => Config::default(),
    };

    // Override config with CLI options if provided
    if let Some(mode) = &options.mode {
        config.render.mode = mode.clone().into();
    }
    if let Some(color) = &options.color {
        config.render.highlight_color = color.clone();
    }
    if options.words_per_segment.is_some() {
        config.render.words_per_segment = options.words_per_segment;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        apply_log_level(&config.log_level);
    }

    let controller = Controller::with_config(config)?;
    let srt = controller.run(&options.inputs, options.output.as_deref())?;

    if options.output.is_none() {
        print!("{}", srt);
    }

    Ok(())
}

fn run_validate(options: ValidateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        apply_log_level(&cmd_log_level.clone().into());
    }

    if !options.path.exists() {
        return Err(anyhow!("Path does not exist: {}", options.path.display()));
    }

    let controller = Controller::with_config(Config::default())?;
    let results = controller.validate_path(&options.path, options.strict)?;

    let mut failures = 0;
    for result in &results {
        if let Some(syntax_error) = &result.syntax_error {
            error!("{}: {}", result.path.display(), syntax_error);
        }
        if let Some(timecodes) = &result.timecodes {
            for entry in timecodes.failed_entries() {
                for issue in &entry.issues {
                    error!("{}: cue {}: {}", result.path.display(), entry.index, issue);
                }
            }
        }
        if result.passed() {
            info!("Valid: {}", result.path.display());
        } else {
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} SRT file(s) failed validation", failures, results.len()));
    }

    Ok(())
}

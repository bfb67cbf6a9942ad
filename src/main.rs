// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, Context};
use log::{warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{CodeLength, Config, LogLevel};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod classification_service;
mod classifier;
mod decision_engine;
mod errors;
mod file_utils;
mod filename_builder;
mod filename_tokenizer;
mod language_utils;
mod sdh_detector;
mod subtitle_processor;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for srtlang
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Command-line options for srtlang
#[derive(Parser, Debug)]
#[command(name = "srtlang")]
#[command(version = "1.0.0")]
#[command(about = "Detect the language of subtitle (srt) files")]
#[command(long_about = "srtlang inspects SRT subtitle files, detects the language of their text and
renames them to a canonical 'title[.ordinal].lang[.sdh|.cc][.forced].srt' form.

The default is a dry-run that only reports what would happen. Nothing on disk
changes until --rename-files is given.

EXAMPLES:
    srtlang movie.srt                        # Report what would change
    srtlang -r movie.srt                     # Actually rename the file
    srtlang -r -3 /media/subtitles/          # Whole directory, 3-letter codes
    srtlang -r -k en -k fr /media/subs/      # Delete everything but English/French
    srtlang -c 80 -v movie.srt               # Demand 80% confidence, explain steps
    srtlang completions bash > srtlang.bash  # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// One or more subtitle files or directories to operate on
    #[arg(value_name = "SRT")]
    srt: Vec<PathBuf>,

    /// The default is to do a dry-run. You must specify this option to rename
    /// (or delete) files!
    #[arg(short = 'r', long)]
    rename_files: bool,

    /// One or more languages to keep. If --rename-files is specified, this
    /// will delete any subtitle file whose language doesn't match!
    #[arg(short = 'k', long, value_name = "LANG")]
    keep_only: Vec<String>,

    /// Require a confidence percentage equal or higher than the provided
    /// value to rename or delete a file based on its language
    #[arg(short = 'c', long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    require_lang_confidence: u8,

    /// Minimum SDH confidence percentage to flag a file as SDH
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_sdh_confidence: u8,

    /// Maximum SDH confidence percentage to flag a file as SDH
    #[arg(long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(0..=100))]
    max_sdh_confidence: u8,

    /// SDH confidence percentage at or below which the SDH flag is removed
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=100))]
    reject_sdh_confidence: u8,

    /// Prefer 2 letter language codes
    #[arg(short = '2', long, conflicts_with = "three_letter")]
    two_letter: bool,

    /// Prefer 3 letter language codes
    #[arg(short = '3', long)]
    three_letter: bool,

    /// Print a summary of the changes at the end of the run
    #[arg(short = 's', long)]
    summary: bool,

    /// Quiet output. Only errors will be printed on screen
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose output. Every decision step will be printed on screen
    #[arg(short = 'v', long)]
    verbose: bool,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
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
            let color = Self::color_for_level(record.level());
            let emoji = Self::get_emoji_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    let cli = CommandLineOptions::parse();

    // Handle subcommands before touching the logger or filesystem
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtlang", &mut std::io::stdout());
        return Ok(());
    }

    let log_level = if cli.quiet {
        LogLevel::Error
    } else if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let level_filter = match log_level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    };
    CustomLogger::init(level_filter)?;

    if cli.srt.is_empty() {
        warn!("No subtitle files or directories specified.");
        return Ok(());
    }

    let code_length = if cli.three_letter {
        CodeLength::Three
    } else {
        CodeLength::Two
    };

    let config = Config {
        rename_files: cli.rename_files,
        keep_only: Config::normalize_keep_only(code_length, &cli.keep_only),
        require_lang_confidence: cli.require_lang_confidence,
        min_sdh_confidence: cli.min_sdh_confidence,
        max_sdh_confidence: cli.max_sdh_confidence,
        reject_sdh_confidence: cli.reject_sdh_confidence,
        code_length,
        summary: cli.summary,
        log_level,
    };

    config.validate().context("Configuration validation failed")?;

    debug!(
        "Effective configuration: {}",
        serde_json::to_string(&config).unwrap_or_else(|_| "<unserializable>".to_string())
    );

    let controller = Controller::with_config(config)?;
    controller.run(&cli.srt)?;

    Ok(())
}

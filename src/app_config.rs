use anyhow::{Result, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::language_utils;

/// Application configuration module
/// This module holds the settings that drive the per-file decision pipeline.
/// Everything is read-only after the command line has been parsed.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Apply actions to the filesystem. The default is a dry-run that only
    /// reports what would happen.
    #[serde(default)]
    pub rename_files: bool,

    /// Languages to keep, already normalized to `code_length`. An empty list
    /// disables the filter entirely.
    #[serde(default)]
    pub keep_only: Vec<String>,

    /// Confidence percentage required before a file is renamed or deleted
    #[serde(default = "default_require_lang_confidence")]
    pub require_lang_confidence: u8,

    /// Lower bound of the SDH score window that marks a file as SDH
    #[serde(default = "default_min_sdh_confidence")]
    pub min_sdh_confidence: u8,

    /// Upper bound of the SDH score window that marks a file as SDH
    #[serde(default = "default_max_sdh_confidence")]
    pub max_sdh_confidence: u8,

    /// SDH score at or below which an existing SDH marker is dropped
    #[serde(default = "default_reject_sdh_confidence")]
    pub reject_sdh_confidence: u8,

    /// Preferred language code length in canonical filenames
    #[serde(default)]
    pub code_length: CodeLength,

    /// Print per-run counters when the run completes
    #[serde(default)]
    pub summary: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Preferred ISO 639 code length for canonical filenames
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CodeLength {
    /// ISO 639-1 (2-letter) codes
    #[default]
    Two,
    /// ISO 639-2/T (3-letter) codes
    Three,
}

impl CodeLength {
    /// Sentinel code used when the subtitle language cannot be identified
    pub fn unknown_sentinel(&self) -> &'static str {
        match self {
            CodeLength::Two => "un",
            CodeLength::Three => "unk",
        }
    }

    /// Convert a language code to this length
    pub fn convert(&self, code: &str) -> Result<String> {
        match self {
            CodeLength::Two => language_utils::to_two_letter(code),
            CodeLength::Three => language_utils::to_three_letter(code),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_require_lang_confidence() -> u8 {
    50
}

fn default_min_sdh_confidence() -> u8 {
    5
}

fn default_max_sdh_confidence() -> u8 {
    85
}

fn default_reject_sdh_confidence() -> u8 {
    1
}

impl Config {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let percentages = [
            ("require-lang-confidence", self.require_lang_confidence),
            ("min-sdh-confidence", self.min_sdh_confidence),
            ("max-sdh-confidence", self.max_sdh_confidence),
            ("reject-sdh-confidence", self.reject_sdh_confidence),
        ];

        for (name, value) in percentages {
            if value > 100 {
                return Err(anyhow!("{} must be within 0-100, got {}", name, value));
            }
        }

        Ok(())
    }

    /// Normalize raw keep-only values to the given code length.
    ///
    /// Values that do not resolve to a real language are dropped, so a typo
    /// in the list narrows the filter instead of aborting the run.
    pub fn normalize_keep_only(code_length: CodeLength, raw: &[String]) -> Vec<String> {
        raw.iter()
            .filter_map(|code| match code_length.convert(code) {
                Ok(normalized) => Some(normalized),
                Err(_) => {
                    debug!("Ignoring invalid keep-only language '{}'", code);
                    None
                }
            })
            .collect()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            rename_files: false,
            keep_only: Vec::new(),
            require_lang_confidence: default_require_lang_confidence(),
            min_sdh_confidence: default_min_sdh_confidence(),
            max_sdh_confidence: default_max_sdh_confidence(),
            reject_sdh_confidence: default_reject_sdh_confidence(),
            code_length: CodeLength::default(),
            summary: false,
            log_level: LogLevel::default(),
        }
    }
}

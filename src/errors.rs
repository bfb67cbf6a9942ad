/*!
 * Error types for the srtlang application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and parsing subtitle content
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error when neither strict UTF-8 nor the detected encoding yields clean text
    #[error("Could not decode '{}': {reason}", .path.display())]
    DecodeFailed {
        /// File the bytes were read from
        path: PathBuf,
        /// Description of the decoding failure
        reason: String,
    },

    /// Error when the SRT parser rejects the decoded text
    #[error("Could not parse subtitles in '{}': {reason}", .path.display())]
    ParseFailed {
        /// File the text came from
        path: PathBuf,
        /// Description of the parsing failure
        reason: String,
    },
}

/// Errors that can occur while constructing a target filename
#[derive(Error, Debug)]
pub enum FilenameError {
    /// Error when the collision probe runs out of ordinals without finding a free name
    #[error("No free filename for '{base}' within {limit} ordinals")]
    ProbeExhausted {
        /// Filename the probe started from
        base: String,
        /// Highest ordinal that was tried
        limit: u32,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from filename construction
    #[error("Filename error: {0}")]
    Filename(#[from] FilenameError),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

/*!
 * # srtlang
 *
 * A Rust library for detecting the language of SRT subtitle files and
 * renaming them to a canonical naming convention.
 *
 * ## Features
 *
 * - Statistical language identification of subtitle text
 * - SDH (hearing-impaired) markup scoring with set/clear hysteresis
 * - Canonical `title[.ordinal].lang[.special][.forced].srt` renaming
 * - Collision-free target names via an incrementing ordinal probe
 * - Keep-only filtering to delete subtitles in unwanted languages
 * - Dry-run by default; filesystem mutation is opt-in
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `classifier`: Language identification backends
 * - `classification_service`: Decode, parse and classify one file
 * - `decision_engine`: Reduce classification results to actions
 * - `filename_tokenizer`: Scan existing names for attributes
 * - `filename_builder`: Construct canonical target names
 * - `sdh_detector`: Score hearing-impaired markup density
 * - `subtitle_processor`: Subtitle file handling and parsing
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classification_service;
pub mod classifier;
pub mod decision_engine;
pub mod errors;
pub mod file_utils;
pub mod filename_builder;
pub mod filename_tokenizer;
pub mod language_utils;
pub mod sdh_detector;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::{CodeLength, Config, LogLevel};
pub use app_controller::{Controller, RunStats};
pub use classification_service::{Classification, ClassificationOutcome, ClassificationService};
pub use classifier::{DetectedLanguage, LanguageClassifier, WhatlangClassifier};
pub use decision_engine::{Action, DecisionEngine, SkipReason};
pub use errors::{AppError, FilenameError, SubtitleError};
pub use filename_tokenizer::{ParsedNameAttributes, SpecialMarker};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};

/*!
 * Per-file decision logic.
 *
 * Takes what the filename says and what the classifier says and reduces them
 * to a single action for the file. The engine is pure apart from the
 * existence checks inside the collision probe; actually renaming or deleting
 * is the controller's job.
 */

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

use crate::app_config::Config;
use crate::classification_service::{Classification, ClassificationOutcome};
use crate::errors::SubtitleError;
use crate::filename_builder;
use crate::filename_tokenizer::{ParsedNameAttributes, SpecialMarker};
use crate::language_utils;
use crate::sdh_detector;

/// What should happen to a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The canonical name matches the current one
    NoChange,
    /// Move the file to the contained path
    Rename(PathBuf),
    /// Remove the file
    Delete,
    /// Leave the file alone for the contained reason
    Skip(SkipReason),
}

/// Why a file was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file parsed cleanly but holds no subtitle entries
    NoSubtitles,
    /// The classifier could not name a known language
    UnknownLanguage,
    /// The classifier's confidence fell below the configured threshold
    LowConfidence,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoSubtitles => write!(f, "no subtitles"),
            SkipReason::UnknownLanguage => write!(f, "unknown language, refuse to rename"),
            SkipReason::LowConfidence => write!(f, "insufficient confidence"),
        }
    }
}

/// Language resolution result used internally by the engine
struct ResolvedLanguage {
    /// Code at the configured length, or the unknown sentinel
    code: String,
    /// Whether the code names a real language
    known: bool,
    /// Classifier confidence scaled to [0, 100]
    confidence_percent: f64,
}

/// Reduces classification results to filesystem actions
pub struct DecisionEngine<'c> {
    config: &'c Config,
}

impl DecisionEngine<'_> {
    pub fn new(config: &Config) -> DecisionEngine<'_> {
        DecisionEngine { config }
    }

    /// Decide what to do with `path` given its parsed name attributes and its
    /// classification outcome.
    ///
    /// Decode and parse failures surface as errors carrying the path; every
    /// other input reduces to an [`Action`]. The steps run in fixed order:
    /// empty-check, language resolution, SDH hysteresis, target construction,
    /// keep-only filter, no-change check, confidence gate. The keep-only
    /// filter fires before the no-change check on purpose, so an unwanted
    /// language is deleted even when its name is already canonical.
    pub fn decide(
        &self,
        path: &Path,
        parsed: &ParsedNameAttributes,
        outcome: &ClassificationOutcome,
    ) -> Result<Action> {
        let classification = match outcome {
            ClassificationOutcome::DecodeFailed { reason } => {
                return Err(SubtitleError::DecodeFailed {
                    path: path.to_path_buf(),
                    reason: reason.clone(),
                }
                .into());
            }
            ClassificationOutcome::ParseFailed { reason } => {
                return Err(SubtitleError::ParseFailed {
                    path: path.to_path_buf(),
                    reason: reason.clone(),
                }
                .into());
            }
            ClassificationOutcome::Empty => {
                return Ok(Action::Skip(SkipReason::NoSubtitles));
            }
            ClassificationOutcome::Classified(classification) => classification,
        };

        let resolved = self.resolve_language(classification);
        let special = self.apply_sdh_hysteresis(&classification.text, parsed.special);

        let target = filename_builder::build_target_path(
            path,
            &resolved.code,
            parsed.language_code.as_deref(),
            special,
            parsed.forced,
        )?;

        // An unwanted language is deleted even when the name would not change
        if !self.config.keep_only.is_empty()
            && !self.config.keep_only.iter().any(|kept| *kept == resolved.code)
            && self.meets_confidence(resolved.confidence_percent)
        {
            debug!(
                "Confidence {} meets required value to delete ({})",
                resolved.confidence_percent.trunc(),
                self.config.require_lang_confidence
            );
            return Ok(Action::Delete);
        }

        if target.as_path() == path {
            return Ok(Action::NoChange);
        }

        if !self.meets_confidence(resolved.confidence_percent) {
            debug!(
                "Confidence {} below required value to rename ({})",
                resolved.confidence_percent.trunc(),
                self.config.require_lang_confidence
            );
            return Ok(Action::Skip(SkipReason::LowConfidence));
        }

        if !resolved.known {
            return Ok(Action::Skip(SkipReason::UnknownLanguage));
        }

        Ok(Action::Rename(target))
    }

    /// Resolve the classifier's guess to a code at the configured length.
    ///
    /// Guesses that cannot be named or converted collapse to the unknown
    /// sentinel so downstream comparisons stay well-defined; the keep-only
    /// filter can still delete such files.
    fn resolve_language(&self, classification: &Classification) -> ResolvedLanguage {
        let sentinel = self.config.code_length.unknown_sentinel();

        let Some(detected) = &classification.language else {
            debug!("Classifier produced no language guess");
            return ResolvedLanguage {
                code: sentinel.to_string(),
                known: false,
                confidence_percent: 0.0,
            };
        };

        let confidence_percent = detected.confidence * 100.0;

        let named = language_utils::get_language_name(&detected.code);
        let converted = named
            .as_ref()
            .ok()
            .and_then(|_| self.config.code_length.convert(&detected.code).ok());

        match (named, converted) {
            (Ok(name), Some(code)) => {
                debug!(
                    "Subtitles identified as {}: {}%",
                    name, confidence_percent
                );
                ResolvedLanguage {
                    code,
                    known: true,
                    confidence_percent,
                }
            }
            _ => {
                debug!(
                    "Cannot resolve classifier language '{}' to a usable code",
                    detected.code
                );
                ResolvedLanguage {
                    code: sentinel.to_string(),
                    known: false,
                    confidence_percent,
                }
            }
        }
    }

    /// Apply the SDH set/clear hysteresis to the parsed special marker.
    ///
    /// The set condition is checked first and the two conditions never both
    /// fire for the same input, even with overlapping threshold windows.
    fn apply_sdh_hysteresis(
        &self,
        text: &str,
        parsed_special: Option<SpecialMarker>,
    ) -> Option<SpecialMarker> {
        let score = sdh_detector::sdh_percent(text);
        debug!("SDH confidence: {}%", score);

        let min = f64::from(self.config.min_sdh_confidence);
        let max = f64::from(self.config.max_sdh_confidence);
        let reject = f64::from(self.config.reject_sdh_confidence);

        if score >= min && score <= max && parsed_special != Some(SpecialMarker::Sdh) {
            debug!("Marking file as SDH");
            Some(SpecialMarker::Sdh)
        } else if score <= reject && parsed_special == Some(SpecialMarker::Sdh) {
            debug!("Removing SDH flag");
            None
        } else {
            parsed_special
        }
    }

    /// Integer comparison of truncated confidence against the threshold
    fn meets_confidence(&self, confidence_percent: f64) -> bool {
        confidence_percent.trunc() as u32 >= u32::from(self.config.require_lang_confidence)
    }
}

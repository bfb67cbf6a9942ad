/*!
 * Per-file classification pipeline: bytes to decoded text to parsed entries
 * to a language guess.
 *
 * Decoding is strict UTF-8 first. When that produces replacement characters
 * the raw bytes go through encoding detection and one retry with the guessed
 * encoding. Anything still broken after that is reported as a decode failure
 * for that file alone.
 */

use std::path::Path;

use anyhow::Result;
use chardetng::EncodingDetector;
use encoding_rs::UTF_8;
use log::debug;

use crate::classifier::{DetectedLanguage, LanguageClassifier};
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCollection;

/// Subtitle text with the classifier's guess for it
#[derive(Debug, Clone)]
pub struct Classification {
    /// Entry texts joined into one block, blank-line separated
    pub text: String,
    /// Top language guess, absent when the classifier had nothing to say
    pub language: Option<DetectedLanguage>,
}

/// Result of running the per-file pipeline up to classification
#[derive(Debug, Clone)]
pub enum ClassificationOutcome {
    /// The file decoded, parsed and was handed to the classifier
    Classified(Classification),
    /// The file parsed cleanly but contains no subtitle entries
    Empty,
    /// Neither strict UTF-8 nor the detected encoding produced clean text
    DecodeFailed {
        /// Description of the failure
        reason: String,
    },
    /// The SRT parser rejected the decoded text
    ParseFailed {
        /// Description of the failure
        reason: String,
    },
}

/// Runs decode, parse and classification for one file at a time
#[derive(Debug)]
pub struct ClassificationService {
    classifier: Box<dyn LanguageClassifier>,
}

impl ClassificationService {
    /// Create a service around the given classifier backend
    pub fn new(classifier: Box<dyn LanguageClassifier>) -> Self {
        ClassificationService { classifier }
    }

    /// Classify the subtitle file at `path`.
    ///
    /// Decode and parse problems are data, not errors: they come back as
    /// [`ClassificationOutcome`] variants so the caller can report them and
    /// move on. Only failing to read the bytes at all is an `Err`.
    pub fn classify_file(&self, path: &Path) -> Result<ClassificationOutcome> {
        let bytes = FileManager::read_bytes(path)?;

        let text = match Self::decode_bytes(path, &bytes) {
            Ok(text) => text,
            Err(reason) => return Ok(ClassificationOutcome::DecodeFailed { reason }),
        };

        let collection = match SubtitleCollection::parse(path.to_path_buf(), &text) {
            Ok(collection) => collection,
            Err(e) => {
                return Ok(ClassificationOutcome::ParseFailed {
                    reason: e.to_string(),
                });
            }
        };

        if collection.entries.is_empty() {
            return Ok(ClassificationOutcome::Empty);
        }

        let blob = collection.joined_text();
        let language = self.classifier.classify(&blob);

        Ok(ClassificationOutcome::Classified(Classification {
            text: blob,
            language,
        }))
    }

    /// Decode subtitle bytes, preferring strict UTF-8 and falling back to a
    /// detected encoding exactly once
    fn decode_bytes(path: &Path, bytes: &[u8]) -> Result<String, String> {
        let (text, _, had_errors) = UTF_8.decode(bytes);
        if !had_errors {
            return Ok(text.into_owned());
        }

        debug!("'{}' is not valid UTF-8, detecting encoding", path.display());

        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        let encoding = detector.guess(None, true);

        let (text, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(format!(
                "detected encoding {} still produced invalid text",
                encoding.name()
            ));
        }

        debug!("Decoded '{}' as {}", path.display(), encoding.name());
        Ok(text.into_owned())
    }
}

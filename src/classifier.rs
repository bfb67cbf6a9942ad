/*!
 * Language identification backends.
 *
 * The trait keeps the statistical classifier swappable. Production code uses
 * the whatlang-backed implementation; tests plug in a scripted fake.
 */

use std::fmt;

use whatlang::Detector;

/// A language guess produced by a classifier backend
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLanguage {
    /// ISO 639-3 code of the top guess
    pub code: String,
    /// Normalized confidence in [0, 1]
    pub confidence: f64,
}

/// Common trait for language identification backends
///
/// Implementations are stateless and reusable. The controller constructs one
/// at startup and hands it to the classification service for the whole run.
pub trait LanguageClassifier: Send + Sync + fmt::Debug {
    /// Identify the dominant language of `text`, or `None` when the backend
    /// cannot produce a guess at all
    fn classify(&self, text: &str) -> Option<DetectedLanguage>;
}

/// Classifier backed by the whatlang trigram model
pub struct WhatlangClassifier {
    detector: Detector,
}

impl WhatlangClassifier {
    pub fn new() -> Self {
        WhatlangClassifier {
            detector: Detector::new(),
        }
    }
}

impl Default for WhatlangClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WhatlangClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatlangClassifier").finish()
    }
}

impl LanguageClassifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Option<DetectedLanguage> {
        let info = self.detector.detect(text)?;
        Some(DetectedLanguage {
            code: info.lang().code().to_string(),
            confidence: info.confidence(),
        })
    }
}

/*!
 * Mock classifier implementation for testing
 *
 * Provides a LanguageClassifier that returns predetermined results so tests
 * never depend on the statistical behavior of the real detector.
 */

use std::sync::{Arc, Mutex};

use srtlang::classifier::{DetectedLanguage, LanguageClassifier};

/// Tracks classification calls made during a test
#[derive(Debug, Default)]
pub struct ClassifyCallTracker {
    /// Count of classification calls made
    pub call_count: usize,
    /// Last text received
    pub last_text: Option<String>,
}

/// Mock classifier returning a fixed result for every call
#[derive(Debug)]
pub struct MockClassifier {
    result: Option<DetectedLanguage>,
    tracker: Arc<Mutex<ClassifyCallTracker>>,
}

impl MockClassifier {
    /// Create a mock that always reports the given language code and confidence
    pub fn returning(code: &str, confidence: f64) -> Self {
        MockClassifier {
            result: Some(DetectedLanguage {
                code: code.to_string(),
                confidence,
            }),
            tracker: Arc::new(Mutex::new(ClassifyCallTracker::default())),
        }
    }

    /// Create a mock that never identifies a language
    pub fn unknown() -> Self {
        MockClassifier {
            result: None,
            tracker: Arc::new(Mutex::new(ClassifyCallTracker::default())),
        }
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<ClassifyCallTracker>> {
        self.tracker.clone()
    }
}

impl LanguageClassifier for MockClassifier {
    fn classify(&self, text: &str) -> Option<DetectedLanguage> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.call_count += 1;
        tracker.last_text = Some(text.to_string());
        self.result.clone()
    }
}

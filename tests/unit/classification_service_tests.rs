/*!
 * Tests for the file classification service
 */

use anyhow::Result;
use srtlang::classification_service::{ClassificationOutcome, ClassificationService};
use crate::common;
use crate::common::mock_classifier::MockClassifier;

/// Test classification of a plain UTF-8 subtitle file
#[test]
fn test_classify_file_withUtf8File_shouldReturnClassification() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_subtitle(&dir, "movie.srt")?;

    let service = ClassificationService::new(Box::new(MockClassifier::returning("eng", 0.87)));
    let outcome = service.classify_file(&file)?;

    match outcome {
        ClassificationOutcome::Classified(classification) => {
            let language = classification.language.expect("language should be set");
            assert_eq!(language.code, "eng");
            assert_eq!(language.confidence, 0.87);
            assert!(classification.text.contains("This is a test subtitle."));
        }
        other => panic!("Expected Classified, got {:?}", other),
    }

    Ok(())
}

/// Test that the classifier receives the joined entry text
#[test]
fn test_classify_file_withMultipleEntries_shouldJoinTextForClassifier() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_subtitle_with_text(&dir, "movie.srt", &["First line", "Second line"])?;

    let classifier = MockClassifier::returning("eng", 0.9);
    let tracker = classifier.tracker();
    let service = ClassificationService::new(Box::new(classifier));
    service.classify_file(&file)?;

    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.call_count, 1);
    assert_eq!(tracker.last_text.as_deref(), Some("First line\n\nSecond line"));

    Ok(())
}

/// Test the single byte encoding fallback
#[test]
fn test_classify_file_withLatin1File_shouldDecodeThroughFallback() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    // "café au lait" with a latin-1 e-acute, invalid as UTF-8
    let content = b"1\n00:00:01,000 --> 00:00:04,000\nUn caf\xe9 au lait pour monsieur, tout de suite.\n\n";
    let file = common::create_test_file_bytes(&dir, "movie.srt", content)?;

    let service = ClassificationService::new(Box::new(MockClassifier::returning("fra", 0.9)));
    let outcome = service.classify_file(&file)?;

    match outcome {
        ClassificationOutcome::Classified(classification) => {
            assert!(classification.text.contains("café au lait"));
        }
        other => panic!("Expected Classified, got {:?}", other),
    }

    Ok(())
}

/// Test that a UTF-16 file with a byte order mark decodes
#[test]
fn test_classify_file_withUtf16BomFile_shouldDecode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let text = "1\n00:00:01,000 --> 00:00:04,000\nHello over there.\n\n";
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let file = common::create_test_file_bytes(&dir, "movie.srt", &bytes)?;

    let service = ClassificationService::new(Box::new(MockClassifier::returning("eng", 0.9)));
    let outcome = service.classify_file(&file)?;

    match outcome {
        ClassificationOutcome::Classified(classification) => {
            assert!(classification.text.contains("Hello over there."));
        }
        other => panic!("Expected Classified, got {:?}", other),
    }

    Ok(())
}

/// Test that an empty file is reported as empty, not an error
#[test]
fn test_classify_file_withEmptyFile_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir, "movie.srt", "")?;

    let service = ClassificationService::new(Box::new(MockClassifier::returning("eng", 0.9)));
    let outcome = service.classify_file(&file)?;

    assert!(matches!(outcome, ClassificationOutcome::Empty));

    Ok(())
}

/// Test that a whitespace-only file is reported as empty
#[test]
fn test_classify_file_withWhitespaceFile_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir, "movie.srt", "\n\n   \n")?;

    let service = ClassificationService::new(Box::new(MockClassifier::returning("eng", 0.9)));
    let outcome = service.classify_file(&file)?;

    assert!(matches!(outcome, ClassificationOutcome::Empty));

    Ok(())
}

/// Test that non-subtitle content is reported as a parse failure
#[test]
fn test_classify_file_withGarbageContent_shouldReturnParseFailed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir, "movie.srt", "this is not a subtitle file at all")?;

    let service = ClassificationService::new(Box::new(MockClassifier::returning("eng", 0.9)));
    let outcome = service.classify_file(&file)?;

    assert!(matches!(outcome, ClassificationOutcome::ParseFailed { .. }));

    Ok(())
}

/// Test that a missing file propagates an error
#[test]
fn test_classify_file_withMissingFile_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("not_there.srt");

    let service = ClassificationService::new(Box::new(MockClassifier::returning("eng", 0.9)));

    assert!(service.classify_file(&missing).is_err());

    Ok(())
}

/// Test that an undecided classifier still yields a classification
#[test]
fn test_classify_file_withUndecidedClassifier_shouldReturnNoLanguage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_subtitle(&dir, "movie.srt")?;

    let service = ClassificationService::new(Box::new(MockClassifier::unknown()));
    let outcome = service.classify_file(&file)?;

    match outcome {
        ClassificationOutcome::Classified(classification) => {
            assert!(classification.language.is_none());
        }
        other => panic!("Expected Classified, got {:?}", other),
    }

    Ok(())
}

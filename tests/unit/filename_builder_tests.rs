/*!
 * Tests for canonical filename construction
 */

use std::path::Path;
use anyhow::Result;
use srtlang::errors::FilenameError;
use srtlang::filename_builder::{build_target_path, build_target_path_with_limit};
use srtlang::filename_tokenizer::SpecialMarker;
use crate::common;

/// Test appending a language code to a plain name
#[test]
fn test_build_target_path_withPlainName_shouldAppendLanguage() -> Result<()> {
    let original = Path::new("/nonexistent/movie.srt");

    let target = build_target_path(original, "en", None, None, false)?;

    assert_eq!(target, Path::new("/nonexistent/movie.en.srt"));
    Ok(())
}

/// Test replacing an embedded language code with the detected one
#[test]
fn test_build_target_path_withPreviousLanguage_shouldReplaceCode() -> Result<()> {
    let original = Path::new("/nonexistent/movie.fr.srt");

    let target = build_target_path(original, "en", Some("fr"), None, false)?;

    assert_eq!(target, Path::new("/nonexistent/movie.en.srt"));
    Ok(())
}

/// Test reconstructing special and forced markers in canonical order
#[test]
fn test_build_target_path_withSdhAndForced_shouldOrderMarkers() -> Result<()> {
    let original = Path::new("/nonexistent/movie.srt");

    let target = build_target_path(original, "en", None, Some(SpecialMarker::Sdh), true)?;

    assert_eq!(target, Path::new("/nonexistent/movie.en.sdh.forced.srt"));
    Ok(())
}

/// Test that an old cc marker is stripped when the rebuilt name drops it
#[test]
fn test_build_target_path_withDroppedCcMarker_shouldStripOldMarker() -> Result<()> {
    let original = Path::new("/nonexistent/show.en.cc.srt");

    let target = build_target_path(original, "en", Some("en"), None, false)?;

    assert_eq!(target, Path::new("/nonexistent/show.en.srt"));
    Ok(())
}

/// Test that a short ordinal is stripped while a year-like number survives
#[test]
fn test_build_target_path_withNumericTokens_shouldStripOnlyShortOrdinals() -> Result<()> {
    let with_ordinal = Path::new("/nonexistent/movie.12.en.srt");
    let target = build_target_path(with_ordinal, "en", Some("en"), None, false)?;
    assert_eq!(target, Path::new("/nonexistent/movie.en.srt"));

    let with_year = Path::new("/nonexistent/movie.1984.en.srt");
    let target = build_target_path(with_year, "en", Some("en"), None, false)?;
    assert_eq!(target, Path::new("/nonexistent/movie.1984.en.srt"));
    Ok(())
}

/// Test that language stripping is byte exact, leaving differently cased tokens alone
#[test]
fn test_build_target_path_withUppercaseLanguageToken_shouldNotStripToken() -> Result<()> {
    let original = Path::new("/nonexistent/Movie.EN.srt");

    let target = build_target_path(original, "en", Some("en"), None, false)?;

    assert_eq!(target, Path::new("/nonexistent/Movie.EN.en.srt"));
    Ok(())
}

/// Test that a name already in canonical form resolves to itself even when it exists
#[test]
fn test_build_target_path_withCanonicalExistingFile_shouldReturnOriginal() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let original = common::create_test_subtitle(&dir, "movie.en.srt")?;

    let target = build_target_path(&original, "en", Some("en"), None, false)?;

    assert_eq!(target, original);
    Ok(())
}

/// Test that a colliding sibling forces an ordinal into the target name
#[test]
fn test_build_target_path_withExistingSibling_shouldInsertOrdinal() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_subtitle(&dir, "movie.en.srt")?;
    let original = common::create_test_subtitle(&dir, "movie.fr.srt")?;

    let target = build_target_path(&original, "en", Some("fr"), None, false)?;

    assert_eq!(target, dir.join("movie.1.en.srt"));
    Ok(())
}

/// Test that the probe gives up once the ordinal ceiling is reached
#[test]
fn test_build_target_path_withExhaustedProbe_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_subtitle(&dir, "movie.en.srt")?;
    common::create_test_subtitle(&dir, "movie.1.en.srt")?;
    common::create_test_subtitle(&dir, "movie.2.en.srt")?;
    let original = common::create_test_subtitle(&dir, "movie.fr.srt")?;

    let result = build_target_path_with_limit(&original, "en", Some("fr"), None, false, 2);

    match result {
        Err(FilenameError::ProbeExhausted { base, limit }) => {
            assert_eq!(base, "movie.fr.srt");
            assert_eq!(limit, 2);
        }
        other => panic!("Expected ProbeExhausted, got {:?}", other),
    }
    Ok(())
}

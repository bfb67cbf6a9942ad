/*!
 * Canonical subtitle filename construction.
 *
 * Target names follow `<title>[.<ordinal>].<lang>[.<special>][.forced].srt`.
 * The builder strips the attribute tokens it is about to reconstruct from the
 * original name, then probes the target directory for a free name, inserting
 * an incrementing ordinal when a sibling already claimed the plain form.
 */

use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FilenameError;
use crate::filename_tokenizer::{SUBTITLE_EXTENSION, SpecialMarker};

/// Highest ordinal the collision probe will try before giving up
pub const MAX_PROBE_ORDINAL: u32 = 999;

/// Matches a 1- or 2-digit token. Longer numbers stay in the title, they are
/// assumed to be meaningful (a year, for example).
static SHORT_ORDINAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}$").unwrap()
});

/// Build the canonical target path for a subtitle file.
///
/// `previous_language` is the code already embedded in the name (if any), so
/// it can be stripped alongside the other reconstructed tokens. Returns the
/// original path itself when the canonical form matches it, which callers
/// treat as "no change needed".
pub fn build_target_path(
    original: &Path,
    language: &str,
    previous_language: Option<&str>,
    special: Option<SpecialMarker>,
    forced: bool,
) -> Result<PathBuf, FilenameError> {
    build_target_path_with_limit(
        original,
        language,
        previous_language,
        special,
        forced,
        MAX_PROBE_ORDINAL,
    )
}

/// Same as [`build_target_path`] with an explicit probe ceiling
pub fn build_target_path_with_limit(
    original: &Path,
    language: &str,
    previous_language: Option<&str>,
    special: Option<SpecialMarker>,
    forced: bool,
    limit: u32,
) -> Result<PathBuf, FilenameError> {
    let directory = original.parent().unwrap_or_else(|| Path::new(""));
    let file_name = original
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut reversed: Vec<&str> = file_name.split('.').collect();
    reversed.reverse();

    // Strip the parts that will be reconstructed. The scan bails at the first
    // token it does not recognize so title words are never eaten.
    let mut kept_from = reversed.len();
    for (idx, token) in reversed.iter().enumerate() {
        let lowered = token.to_lowercase();
        let strippable = lowered == SUBTITLE_EXTENSION
            || lowered == "forced"
            || SHORT_ORDINAL_REGEX.is_match(token)
            || lowered == "sdh"
            || lowered == "cc"
            || previous_language.is_some_and(|previous| *token == previous)
            || *token == language;

        if !strippable {
            kept_from = idx;
            break;
        }
    }

    // Flip the survivors back to original order
    let mut title_tokens: Vec<&str> = reversed[kept_from..].to_vec();
    title_tokens.reverse();

    // Probe for a free name, disambiguating with an ordinal when a sibling
    // already resolved to the same canonical form earlier in the run
    let mut ordinal = 0u32;
    loop {
        let mut parts: Vec<String> = title_tokens.iter().map(|token| token.to_string()).collect();

        if ordinal >= 1 {
            parts.push(ordinal.to_string());
        }

        parts.push(language.to_string());

        if let Some(marker) = special {
            parts.push(marker.as_token().to_string());
        }

        if forced {
            parts.push("forced".to_string());
        }

        parts.push(SUBTITLE_EXTENSION.to_string());

        let candidate = directory.join(parts.join("."));

        if candidate == original {
            return Ok(candidate);
        }

        if !candidate.exists() {
            debug!("  '{}' does not exist on disk", candidate.display());
            return Ok(candidate);
        }

        debug!("  '{}' already exists", candidate.display());

        if ordinal >= limit {
            return Err(FilenameError::ProbeExhausted {
                base: file_name,
                limit,
            });
        }
        ordinal += 1;
    }
}

/*!
 * Filename attribute scanning.
 *
 * Subtitle names in the wild follow a loose `title.lang.marker.srt` layout.
 * The scan here walks the dot-separated tokens from the end of the name and
 * collects the recognized trailing attributes. Everything before the first
 * unrecognized token is treated as the title.
 */

use std::path::Path;

use crate::language_utils;

/// File extension handled by the pipeline
pub const SUBTITLE_EXTENSION: &str = "srt";

/// Special subtitle marker embedded in a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMarker {
    /// Closed captions
    Cc,
    /// Subtitles for the deaf and hard of hearing
    Sdh,
}

impl SpecialMarker {
    /// The lowercase token this marker uses inside a filename
    pub fn as_token(&self) -> &'static str {
        match self {
            SpecialMarker::Cc => "cc",
            SpecialMarker::Sdh => "sdh",
        }
    }
}

/// Attributes recovered from a subtitle file name
///
/// Derived once per file from the name alone and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNameAttributes {
    /// Embedded language code, present only when it validates as ISO 639
    pub language_code: Option<String>,
    /// Embedded `sdh` or `cc` marker
    pub special: Option<SpecialMarker>,
    /// Whether the name carries a `forced` token
    pub forced: bool,
    /// Tokens before the recognized trailing attributes, in original order
    pub title_tokens: Vec<String>,
}

/// Scan a file's base name for trailing subtitle attributes.
///
/// Tokens are visited from the end of the name towards the front, applying
/// these checks in priority order and stopping at the first token that
/// matches none of them:
/// 1. the `srt` extension token is consumed,
/// 2. `forced` sets the forced flag,
/// 3. `cc` / `sdh` set the special marker,
/// 4. a 2- or 3-character token is tentatively recorded as the language,
/// 5. a purely numeric token is consumed as a disambiguating ordinal.
///
/// Language-shaped tokens overwrite each other as the scan moves left, so the
/// leftmost one in the trailing run wins. The tentative language is kept only
/// when it validates as a real ISO 639 code; an invalid token is dropped
/// entirely rather than returned to the title.
pub fn parse_filename<P: AsRef<Path>>(path: P) -> ParsedNameAttributes {
    let file_name = path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let tokens: Vec<&str> = file_name.split('.').collect();

    let mut forced = false;
    let mut special: Option<SpecialMarker> = None;
    let mut tentative_language: Option<String> = None;
    let mut title_boundary = 0usize;

    for (idx, token) in tokens.iter().enumerate().rev() {
        let lowered = token.to_lowercase();
        let char_len = token.chars().count();

        if lowered == SUBTITLE_EXTENSION {
            continue;
        } else if lowered == "forced" {
            forced = true;
        } else if lowered == "cc" {
            special = Some(SpecialMarker::Cc);
        } else if lowered == "sdh" {
            special = Some(SpecialMarker::Sdh);
        } else if char_len == 2 || char_len == 3 {
            tentative_language = Some(lowered);
        } else if is_numeric(token) {
            // Disambiguating ordinal, not part of the title
        } else {
            title_boundary = idx + 1;
            break;
        }
    }

    let language_code = tentative_language
        .filter(|code| language_utils::validate_language_code(code).is_ok());

    let title_tokens = tokens[..title_boundary]
        .iter()
        .map(|token| token.to_string())
        .collect();

    ParsedNameAttributes {
        language_code,
        special,
        forced,
        title_tokens,
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

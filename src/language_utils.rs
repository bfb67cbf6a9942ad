use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating ISO 639-1 (2-letter) and
/// ISO 639-2 (3-letter) language codes and converting between the two forms.
/// Language code type
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Map an ISO 639-2/B (bibliographic) code to its ISO 639-2/T equivalent.
/// isolang only indexes the terminological codes, so the codes that differ
/// between the two tables are handled here.
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"), // French
        "ger" => Some("deu"), // German
        "dut" => Some("nld"), // Dutch
        "gre" => Some("ell"), // Greek
        "chi" => Some("zho"), // Chinese
        "cze" => Some("ces"), // Czech
        "ice" => Some("isl"), // Icelandic
        "alb" => Some("sqi"), // Albanian
        "arm" => Some("hye"), // Armenian
        "baq" => Some("eus"), // Basque
        "bur" => Some("mya"), // Burmese
        "per" => Some("fas"), // Persian
        "geo" => Some("kat"), // Georgian
        "may" => Some("msa"), // Malay
        "mac" => Some("mkd"), // Macedonian
        "rum" => Some("ron"), // Romanian
        "slo" => Some("slk"), // Slovak
        "wel" => Some("cym"), // Welsh
        _ => None,
    }
}

/// Resolve a 2- or 3-letter code (ISO 639-1, 639-2/T or 639-2/B) to a language
fn lookup(code: &str) -> Result<Language> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang);
        }
    } else if normalized_code.len() == 3 {
        let part2t = part2b_to_part2t(&normalized_code).unwrap_or(&normalized_code);
        if let Some(lang) = Language::from_639_3(part2t) {
            return Ok(lang);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    // Check for ISO 639-1 (2-letter) code
    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    }
    // Check for ISO 639-2 (3-letter) code
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
        if part2b_to_part2t(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2B);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Convert an accepted code to its ISO 639-1 (2-letter) form
///
/// Fails when the language has no ISO 639-1 code at all, which happens for
/// codes that only exist in the full ISO 639-3 table (e.g. "cmn").
pub fn to_two_letter(code: &str) -> Result<String> {
    let lang = lookup(code)?;
    lang.to_639_1()
        .map(|c| c.to_string())
        .ok_or_else(|| anyhow!("No ISO 639-1 form for language code: {}", code))
}

/// Convert an accepted code to its ISO 639-2/T (3-letter) form
pub fn to_three_letter(code: &str) -> Result<String> {
    Ok(lookup(code)?.to_639_3().to_string())
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(lookup(code)?.to_name().to_string())
}

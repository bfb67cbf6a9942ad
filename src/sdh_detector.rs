use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a line that starts with a bracketed cue: `[...]`, `<...>` or `(...)`
static SDH_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\[.*\]|<.*>|\(.*\))").unwrap()
});

/// Collapses runs of blank lines into a single line break
static BLANK_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

/// Fraction of lines that look like SDH cues, rounded to two decimals.
///
/// Subtitles for the deaf and hard of hearing annotate non-speech audio in
/// square brackets, angle brackets or parentheses. The score is the fraction
/// of lines opening with such an annotation. The line count includes a
/// trailing empty line left behind by a terminal newline, so text ending in
/// '\n' scores slightly lower than the same text without it.
pub fn sdh_ratio(text: &str) -> f64 {
    let collapsed = BLANK_RUN_REGEX.replace_all(text, "\n");

    let mut sdh_lines = 0usize;
    let mut total_lines = 0usize;
    for line in collapsed.split('\n') {
        total_lines += 1;
        if SDH_LINE_REGEX.is_match(line) {
            sdh_lines += 1;
        }
    }

    round_to_two_decimals(sdh_lines as f64 / total_lines as f64)
}

/// SDH score as a percentage in [0, 100]
pub fn sdh_percent(text: &str) -> f64 {
    sdh_ratio(text) * 100.0
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

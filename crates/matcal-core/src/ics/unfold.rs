//! Line unfolding and VEVENT block extraction.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// A line break followed by one space or tab marks a folded continuation.
static FOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]").expect("Invalid fold regex"));

/// Joins folded continuation lines back onto their logical line.
pub fn unfold(text: &str) -> Cow<'_, str> {
    FOLD_REGEX.replace_all(text, "")
}

/// Splits feed text into one span per VEVENT.
///
/// Text before the first `BEGIN:VEVENT` is ignored. Each span runs up to the
/// next `END:VEVENT`, or to the end of the text when the marker is missing.
pub fn extract_blocks(text: &str) -> Vec<&str> {
    text.split(BEGIN_EVENT)
        .skip(1)
        .map(|chunk| chunk.split(END_EVENT).next().unwrap_or(chunk))
        .collect()
}

//! Property extraction from a single VEVENT block.
//!
//! Properties are matched by name at the start of a line. Anything between
//! the name and the first colon (`;VALUE=DATE`, `;TZID=...`) is ignored.

use std::sync::LazyLock;

use regex::Regex;

fn property_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?m)^{}[^:\n]*:(.*)", regex::escape(name)))
        .expect("Invalid property regex")
}

static SUMMARY_REGEX: LazyLock<Regex> = LazyLock::new(|| property_regex("SUMMARY"));
static LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| property_regex("LOCATION"));
static DTSTART_REGEX: LazyLock<Regex> = LazyLock::new(|| property_regex("DTSTART"));
static RRULE_REGEX: LazyLock<Regex> = LazyLock::new(|| property_regex("RRULE"));
static EXDATE_REGEX: LazyLock<Regex> = LazyLock::new(|| property_regex("EXDATE"));

/// The raw properties of one VEVENT.
///
/// Every field defaults to empty when its property is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    /// Unescaped `SUMMARY`.
    pub title: String,
    /// Unescaped `LOCATION`.
    pub location: String,
    /// Raw `DTSTART` value.
    pub start: String,
    /// Raw `RRULE` value.
    pub rrule: String,
    /// One raw value per `EXDATE` line.
    pub exdates: Vec<String>,
}

impl EventFields {
    /// Extracts the recognised properties from an unfolded block.
    pub fn from_block(block: &str) -> Self {
        Self {
            title: unescape_text(&first_value(&SUMMARY_REGEX, block)),
            location: unescape_text(&first_value(&LOCATION_REGEX, block)),
            start: first_value(&DTSTART_REGEX, block),
            rrule: first_value(&RRULE_REGEX, block),
            exdates: EXDATE_REGEX
                .captures_iter(block)
                .filter_map(|caps| caps.get(1))
                .filter_map(|m| m.as_str().trim().split(',').next())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Returns `true` if the block has the properties an event needs.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.start.is_empty()
    }

    /// Returns `true` if the block carries a recurrence rule.
    pub fn is_recurring(&self) -> bool {
        !self.rrule.is_empty()
    }
}

fn first_value(regex: &Regex, block: &str) -> String {
    regex
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Reverses iCalendar text escaping.
///
/// `\,` becomes `,`, `\n` becomes a single space, and any other backslash is
/// dropped.
pub fn unescape_text(value: &str) -> String {
    value.replace("\\,", ",").replace("\\n", " ").replace('\\', "")
}

//! Title-based event classification.

use crate::event::EventType;

const PRACTICE_KEYWORDS: &[&str] = &["practice", "skinfold", "nutrition"];

const TOURNAMENT_KEYWORDS: &[&str] = &[
    "tournament",
    "invitational",
    "districts",
    "regional",
    "team reg",
    "finals",
    "caac",
];

const MATCH_KEYWORDS: &[&str] = &["vs", "vs.", "@ ", "dual", "duals", "scrimmage"];

/// Classifies an event by keywords in its title.
///
/// Groups are checked in order (practice, tournament, match) and the first
/// group with a hit wins. Titles matching nothing are [`EventType::Event`].
pub fn classify(title: &str) -> EventType {
    let title = title.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| title.contains(k));

    if contains_any(PRACTICE_KEYWORDS) {
        EventType::Practice
    } else if contains_any(TOURNAMENT_KEYWORDS) {
        EventType::Tournament
    } else if contains_any(MATCH_KEYWORDS) || title.starts_with('@') {
        EventType::Match
    } else {
        EventType::Event
    }
}

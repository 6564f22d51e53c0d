//! Trigger-word heuristics
//!
//! Word lists are plain constants so they can be inspected and tested; each
//! list compiles once into a case-insensitive, whole-word regex.

use lazy_static::lazy_static;
use regex::Regex;

/// Intensifiers removed when a phase has to shrink
pub const INTENSIFIER_STOPLIST: &[&str] = &[
    "very",
    "really",
    "quite",
    "actually",
    "basically",
    "essentially",
    "just",
    "simply",
    "literally",
    "totally",
];

/// Markers of a worked example
pub const EXAMPLE_TRIGGERS: &[&str] = &["example", "for instance", "such as", "like"];

/// Markers of a practice opportunity
pub const PRACTICE_TRIGGERS: &[&str] = &["practice", "exercise", "try", "activity", "your turn"];

/// Markers of a reflection point
pub const REFLECTION_TRIGGERS: &[&str] = &["reflect", "think about", "consider", "ask yourself"];

lazy_static! {
    pub static ref INTENSIFIERS: Regex = word_list_regex(INTENSIFIER_STOPLIST);
    pub static ref EXAMPLES: Regex = word_list_regex(EXAMPLE_TRIGGERS);
    pub static ref PRACTICE: Regex = word_list_regex(PRACTICE_TRIGGERS);
    pub static ref REFLECTION: Regex = word_list_regex(REFLECTION_TRIGGERS);
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// `(?i)\b(?:w1|w2|...)\b` with every word escaped
fn word_list_regex(words: &[&str]) -> Regex {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).unwrap()
}

/// Count non-overlapping matches of `pattern` in `text`
pub fn count_matches(pattern: &Regex, text: &str) -> usize {
    pattern.find_iter(text).count()
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

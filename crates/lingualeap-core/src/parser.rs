//! Two-part message format parser.
//!
//! Replies and seed lines arrive as `"<english>\n(<translation>)"`. The
//! translation is the parenthesized segment that ends the string; the
//! English part may itself span several lines.

use std::sync::OnceLock;
use regex::Regex;

/// A raw message split into display fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedText {
    pub text: String,
    pub translation: Option<String>,
}

fn two_part_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // `(?s)` lets `.` cross newlines; `\z` anchors at the absolute end.
    // The greedy primary group makes the last "\n(" the split point.
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\A(.*)\n\((.*)\)\z").expect("two-part pattern is valid")
    })
}

/// Split a raw message into primary text and an optional translation.
///
/// The closing parenthesis must be the very last character; even a
/// trailing newline disqualifies the split. Never fails: input that does
/// not match, or whose primary or translation capture is empty, comes
/// back trimmed with no translation.
pub fn parse_message_text(raw: &str) -> ParsedText {
    if let Some(caps) = two_part_pattern().captures(raw) {
        let primary = caps.get(1).map_or("", |m| m.as_str());
        let translation = caps.get(2).map_or("", |m| m.as_str());
        if !primary.is_empty() && !translation.is_empty() {
            return ParsedText {
                text: primary.trim().to_string(),
                translation: Some(translation.trim().to_string()),
            };
        }
    }

    ParsedText {
        text: raw.trim().to_string(),
        translation: None,
    }
}

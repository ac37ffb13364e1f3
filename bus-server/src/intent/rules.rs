//! Rule-based intent extraction.
//!
//! The fallback when no model provider is configured or the model output
//! could not be used. Pure regex work, no I/O.

use std::sync::LazyLock;

use regex::Regex;

use super::{Intent, RouteQuery};

/// Words that name no real place; extracted endpoints matching one of
/// these are blanked so the chat layer asks again.
const GENERIC_WORDS: &[&str] = &[
    "here",
    "there",
    "somewhere",
    "anywhere",
    "place",
    "destination",
    "source",
];

static GREETING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bhi+\b",
        r"\bhello+\b",
        r"\bhey+\b",
        r"\bthanks?\b",
        r"\bhow are you\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("greeting patterns are valid"))
    .collect()
});

/// Route query patterns, most specific first. The input is already
/// lowercased and whitespace-collapsed.
static ROUTE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"from\s+(?P<from>.+?)\s+to\s+(?P<to>.+?)\s+after\s+(?P<time>\d{1,2}:\d{2})$",
        r"(?P<from>.+?)\s+to\s+(?P<to>.+?)\s+after\s+(?P<time>\d{1,2}:\d{2})$",
        r"from\s+(?P<from>.+?)\s+to\s+(?P<to>.+)$",
        r"(?P<from>.+?)\s+to\s+(?P<to>.+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("route patterns are valid"))
    .collect()
});

static AFTER_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("after-time pattern is valid"));

/// Extract an intent from a message using rules alone.
pub fn rule_fallback(message: &str) -> Intent {
    let text = crate::domain::normalize(message);

    if is_greeting(&text) {
        return Intent::Greeting;
    }

    if let Some(query) = extract_route(&text) {
        return Intent::RouteQuery(query);
    }

    Intent::Unknown
}

fn is_greeting(text: &str) -> bool {
    GREETING_PATTERNS.iter().any(|p| p.is_match(text))
}

fn extract_route(text: &str) -> Option<RouteQuery> {
    for pattern in ROUTE_PATTERNS.iter() {
        let Some(captures) = pattern.captures(text) else {
            continue;
        };

        return Some(RouteQuery {
            from: clean_place(&captures["from"]),
            to: clean_place(&captures["to"]),
            after_time: clean_after_time(
                captures.name("time").map(|m| m.as_str()).unwrap_or(""),
            ),
        });
    }

    None
}

/// Strip a place mention down to letters, drop leading "from"/"to"
/// phrasing, and blank generic non-places.
pub(super) fn clean_place(value: &str) -> String {
    let letters_only: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut cleaned = crate::domain::normalize(&letters_only);

    for prefix in ["bus from ", "from "] {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.to_string();
            break;
        }
    }
    for prefix in ["bus to ", "to "] {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.to_string();
            break;
        }
    }

    if GENERIC_WORDS.contains(&cleaned.as_str()) {
        return String::new();
    }
    cleaned
}

/// Keep a time mention only if it looks like "H:MM" or "HH:MM".
pub(super) fn clean_after_time(value: &str) -> String {
    let text = value.trim();
    if AFTER_TIME.is_match(text) {
        text.to_string()
    } else {
        String::new()
    }
}

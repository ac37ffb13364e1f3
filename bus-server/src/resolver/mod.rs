//! Stop name resolution.
//!
//! Turns free-text stop names into canonical timetable stops: normalize,
//! expand aliases, try an exact lookup, then fall back to approximate
//! matching against every known stop.

mod similarity;

pub use similarity::{MIN_SCORE, ratio, score};

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::StopKey;
use crate::timetable::Timetable;

/// Informal or alternate names mapped to the canonical stop they mean.
///
/// Applied after normalization, before exact or fuzzy lookup.
fn builtin_aliases() -> HashMap<StopKey, StopKey> {
    [
        ("airport", "amausi airport"),
        ("amausi", "amausi airport"),
        ("station", "charbagh"),
        ("railway station", "charbagh"),
        ("charbagh station", "charbagh"),
        ("gomtinagar", "gomti nagar"),
        ("gomti nagr", "gomti nagar"),
    ]
    .into_iter()
    .map(|(alias, target)| (StopKey::new(alias), StopKey::new(target)))
    .collect()
}

/// Resolves free-text stop names against the timetable's known stops.
pub struct StopResolver {
    timetable: Arc<Timetable>,
    aliases: HashMap<StopKey, StopKey>,
}

impl StopResolver {
    /// Create a resolver with the built-in alias table.
    pub fn new(timetable: Arc<Timetable>) -> Self {
        Self::with_aliases(timetable, builtin_aliases())
    }

    /// Create a resolver with a custom alias table.
    pub fn with_aliases(timetable: Arc<Timetable>, aliases: HashMap<StopKey, StopKey>) -> Self {
        Self { timetable, aliases }
    }

    /// Resolve raw text to a canonical stop display name.
    ///
    /// Returns `None` for empty input and for input that scores below the
    /// acceptance threshold against every known stop. Ties between equally
    /// scored stops keep the first-seen candidate in known-stop order.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let mut key = StopKey::new(raw);
        if key.is_empty() {
            return None;
        }

        if let Some(target) = self.aliases.get(&key) {
            key = target.clone();
        }

        if let Some(name) = self.timetable.canonical(&key) {
            return Some(name.to_string());
        }

        let mut best_name: Option<&str> = None;
        let mut best_score = 0.0_f64;
        for (stop_key, display) in self.timetable.known_stop_entries() {
            let candidate_score = score(key.as_str(), stop_key.as_str());
            if candidate_score > best_score {
                best_score = candidate_score;
                best_name = Some(display);
            }
        }

        if best_score < MIN_SCORE {
            return None;
        }
        best_name.map(str::to_string)
    }
}

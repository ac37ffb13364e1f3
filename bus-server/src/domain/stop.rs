//! Stop identity.
//!
//! Stops are identified by a normalized form of their display text. Two
//! stop strings name the same stop iff their normalized forms are equal.

use std::fmt;

/// Normalize free-text stop names: trim, lowercase, and collapse internal
/// whitespace to single spaces.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The normalized identity of a stop.
///
/// Equality and hashing use the normalized form, so `StopKey` values built
/// from `" Charbagh  Station "` and `"charbagh station"` compare equal.
///
/// # Examples
///
/// ```
/// use bus_server::domain::StopKey;
///
/// let a = StopKey::new(" Charbagh  Station ");
/// let b = StopKey::new("charbagh station");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "charbagh station");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopKey(String);

impl StopKey {
    /// Build a key from raw display text.
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// The normalized form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the input normalized to nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for StopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopKey({})", self.0)
    }
}

impl fmt::Display for StopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Hazratganj "), "hazratganj");
        assert_eq!(normalize("AMAUSI AIRPORT"), "amausi airport");
    }

    #[test]
    fn normalize_collapses_internal_whitespace() {
        assert_eq!(normalize("Charbagh   Station"), "charbagh station");
        assert_eq!(normalize("gomti\t nagar"), "gomti nagar");
    }

    #[test]
    fn normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn keys_compare_on_normalized_form() {
        assert_eq!(StopKey::new(" Charbagh  Station "), StopKey::new("charbagh station"));
        assert_ne!(StopKey::new("charbagh"), StopKey::new("alambagh"));
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StopKey::new("Gomti Nagar"));
        assert!(set.contains(&StopKey::new("gomti  nagar")));
        assert!(!set.contains(&StopKey::new("indira nagar")));
    }

    #[test]
    fn empty_key() {
        assert!(StopKey::new("  ").is_empty());
        assert!(!StopKey::new("x").is_empty());
    }
}

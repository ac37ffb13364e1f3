//! The immutable timetable and its derived indices.
//!
//! Built once at startup, then treated as read-only for the life of the
//! process. Any number of concurrent readers may query it without locks.

mod error;
mod load;

pub use error::TimetableError;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use crate::domain::{RouteRecord, StopKey};

/// The from/to option lists exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopOptions {
    /// Sorted unique list of all nominal origin stops.
    pub from_options: Vec<String>,
    /// Sorted unique list of all nominal destination stops.
    pub to_options: Vec<String>,
}

/// All route records plus the indices derived from them.
///
/// The known-stop list preserves first-appearance order across records in
/// load order; the stop resolver relies on that order as a tie-break.
#[derive(Debug, Clone)]
pub struct Timetable {
    routes: Vec<RouteRecord>,
    known_stops: Vec<String>,
    known_keys: Vec<StopKey>,
    stop_lookup: HashMap<StopKey, String>,
    from_options: Vec<String>,
    to_options: Vec<String>,
}

impl Timetable {
    /// Build the timetable and all derived indices from route records.
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        let mut known_stops = Vec::new();
        let mut known_keys = Vec::new();
        let mut seen: HashSet<StopKey> = HashSet::new();

        for route in &routes {
            for (stop, key) in route.stops.iter().zip(route.stop_keys()) {
                if seen.insert(key.clone()) {
                    known_stops.push(stop.clone());
                    known_keys.push(key.clone());
                }
            }
        }

        let stop_lookup = known_keys
            .iter()
            .cloned()
            .zip(known_stops.iter().cloned())
            .collect();

        let from_options = sorted_unique(routes.iter().map(|r| &r.from_stop));
        let to_options = sorted_unique(routes.iter().map(|r| &r.to_stop));

        Self {
            routes,
            known_stops,
            known_keys,
            stop_lookup,
            from_options,
            to_options,
        }
    }

    /// Load a timetable from CSV data.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TimetableError> {
        Ok(Self::new(load::read_routes(reader)?))
    }

    /// Load a timetable from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// All route records, in load order.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Distinct stop display names, in first-appearance order.
    pub fn known_stops(&self) -> &[String] {
        &self.known_stops
    }

    /// Known stops as (normalized key, canonical display name) pairs,
    /// in first-appearance order.
    pub fn known_stop_entries(&self) -> impl Iterator<Item = (&StopKey, &str)> {
        self.known_keys
            .iter()
            .zip(self.known_stops.iter().map(String::as_str))
    }

    /// The canonical display name for a normalized key, if known.
    pub fn canonical(&self, key: &StopKey) -> Option<&str> {
        self.stop_lookup.get(key).map(String::as_str)
    }

    /// The from/to option lists.
    pub fn options(&self) -> StopOptions {
        StopOptions {
            from_options: self.from_options.clone(),
            to_options: self.to_options.clone(),
        }
    }

    /// Number of route records.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if the timetable has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

//! Timetable loading errors.
//!
//! Every variant here is fatal: a malformed dataset aborts startup rather
//! than serving partial data.

use crate::domain::TimeError;

/// Errors raised while loading the timetable dataset.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Could not read the dataset file
    #[error("failed to read timetable: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV itself is malformed (bad header, ragged row, bad quoting)
    #[error("failed to parse timetable: {0}")]
    Csv(#[from] csv::Error),

    /// A departure time is not valid "HH:MM"
    #[error("route {route_id}: bad departure time {value:?}: {source}")]
    BadTime {
        route_id: String,
        value: String,
        source: TimeError,
    },

    /// A duration is not a positive integer
    #[error("route {route_id}: duration must be a positive integer, got {value:?}")]
    BadDuration { route_id: String, value: String },

    /// A route has fewer than two stops
    #[error("route {route_id}: a route needs at least two stops")]
    TooFewStops { route_id: String },
}

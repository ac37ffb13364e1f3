//! CSV loading for the timetable.
//!
//! One route per row, with columns `route_id`, `from_stop`, `to_stop`,
//! `bus_number`, `departure_time` ("HH:MM"), `duration_minutes`, and
//! `stops` (`|`-delimited, in traversal order). Any malformed row is a
//! fatal load error.

use std::io::Read;

use serde::Deserialize;

use crate::domain::{DayTime, RouteRecord};

use super::error::TimetableError;

/// The delimiter between stop names within the `stops` column.
const STOP_DELIMITER: char = '|';

/// A raw CSV row before validation.
///
/// `duration_minutes` is read as text so a bad value can be reported with
/// its route id instead of a bare deserialization error.
#[derive(Debug, Deserialize)]
struct RawRoute {
    route_id: String,
    from_stop: String,
    to_stop: String,
    bus_number: String,
    departure_time: String,
    duration_minutes: String,
    stops: String,
}

/// Read and validate all route records from CSV data.
pub fn read_routes<R: Read>(reader: R) -> Result<Vec<RouteRecord>, TimetableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut routes = Vec::new();

    for row in csv_reader.deserialize() {
        let raw: RawRoute = row?;
        routes.push(validate(raw)?);
    }

    Ok(routes)
}

/// Validate one raw row into a `RouteRecord`.
fn validate(raw: RawRoute) -> Result<RouteRecord, TimetableError> {
    let route_id = raw.route_id.trim().to_string();

    let departure_time = raw.departure_time.trim().to_string();
    let departure = DayTime::parse(&departure_time).map_err(|source| TimetableError::BadTime {
        route_id: route_id.clone(),
        value: departure_time.clone(),
        source,
    })?;

    let duration_text = raw.duration_minutes.trim();
    let duration_minutes = duration_text
        .parse::<u32>()
        .ok()
        .filter(|&d| d > 0)
        .ok_or_else(|| TimetableError::BadDuration {
            route_id: route_id.clone(),
            value: duration_text.to_string(),
        })?;

    let stops: Vec<String> = raw
        .stops
        .split(STOP_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if stops.len() < 2 {
        return Err(TimetableError::TooFewStops { route_id });
    }

    Ok(RouteRecord::new(
        route_id,
        raw.from_stop.trim().to_string(),
        raw.to_stop.trim().to_string(),
        raw.bus_number.trim().to_string(),
        departure_time,
        departure,
        duration_minutes,
        stops,
    ))
}

//! Direct route search.

use crate::domain::{DayTime, StopKey};
use crate::timetable::Timetable;

/// A matched direct route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Display label for the bus.
    pub bus_number: String,
    /// Departure time as it appeared in the dataset.
    pub departure_time: String,
    /// Full end-to-end duration of the record, not segment-adjusted.
    pub duration_minutes: u32,
    /// The traversed stop slice, from the resolved origin to the
    /// resolved destination inclusive.
    pub stops: Vec<String>,
}

/// Find the best direct route between two resolved stops.
///
/// With a time filter, candidates departing earlier are discarded and the
/// soonest departure at or after the filter wins, then shortest trip, then
/// route id. Without one, the shortest trip wins, then earliest departure,
/// then route id.
pub fn best_direct(
    timetable: &Timetable,
    from: &StopKey,
    to: &StopKey,
    after: Option<DayTime>,
) -> Option<RouteMatch> {
    timetable
        .routes()
        .iter()
        .filter_map(|route| {
            let (start, end) = route.leg_between(from, to)?;
            if let Some(filter) = after {
                if route.departure < filter {
                    return None;
                }
            }

            let key = match after {
                Some(filter) => (
                    route.departure_minutes() as i64 - filter.minutes() as i64,
                    route.duration_minutes as i64,
                    route.route_id.as_str(),
                ),
                None => (
                    route.duration_minutes as i64,
                    route.departure_minutes() as i64,
                    route.route_id.as_str(),
                ),
            };

            Some((key, route, start, end))
        })
        .min_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, route, start, end)| RouteMatch {
            bus_number: route.bus_number.clone(),
            departure_time: route.departure_time.clone(),
            duration_minutes: route.duration_minutes,
            stops: route.stops[start..=end].to_vec(),
        })
}

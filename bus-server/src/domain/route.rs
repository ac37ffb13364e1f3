//! Route records.

use super::stop::StopKey;
use super::time::DayTime;

/// One timetable row: a single scheduled bus run over an ordered
/// sequence of stops.
///
/// Records are immutable after construction. Normalized stop keys are
/// precomputed once so query-time matching is pure index work.
///
/// Route matching uses only the `stops` sequence; the nominal
/// `from_stop`/`to_stop` endpoint fields exist for the option lists and
/// display, and no ordering constraint between them and `stops` is
/// enforced beyond what the sequence itself encodes.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    /// Opaque identifier, unique per record.
    pub route_id: String,
    /// Nominal origin for display and the from-options list.
    pub from_stop: String,
    /// Nominal destination for display and the to-options list.
    pub to_stop: String,
    /// Display label for the bus; not unique.
    pub bus_number: String,
    /// Departure time exactly as it appeared in the dataset.
    pub departure_time: String,
    /// Parsed departure, derived once at load time.
    pub departure: DayTime,
    /// Total trip duration end-to-end, in minutes. Always positive.
    pub duration_minutes: u32,
    /// The route's path in traversal order. Always at least two stops.
    pub stops: Vec<String>,
    stop_keys: Vec<StopKey>,
}

impl RouteRecord {
    /// Create a record, precomputing normalized stop keys.
    ///
    /// Field validation (parseable time, positive duration, at least two
    /// stops) is the loader's job; see `timetable::load`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        route_id: String,
        from_stop: String,
        to_stop: String,
        bus_number: String,
        departure_time: String,
        departure: DayTime,
        duration_minutes: u32,
        stops: Vec<String>,
    ) -> Self {
        let stop_keys = stops.iter().map(|s| StopKey::new(s)).collect();
        Self {
            route_id,
            from_stop,
            to_stop,
            bus_number,
            departure_time,
            departure,
            duration_minutes,
            stops,
            stop_keys,
        }
    }

    /// Normalized keys parallel to `stops`.
    pub fn stop_keys(&self) -> &[StopKey] {
        &self.stop_keys
    }

    /// Departure as minutes since midnight.
    pub fn departure_minutes(&self) -> u16 {
        self.departure.minutes()
    }

    /// First index of `stop` along the route, if present.
    pub fn position_of(&self, stop: &StopKey) -> Option<usize> {
        self.stop_keys.iter().position(|k| k == stop)
    }

    /// Locate a contiguous leg from `from` to `to` along the route.
    ///
    /// Uses the first occurrence of `from`, then the first later
    /// occurrence of `to`. Returns the inclusive index pair.
    pub fn leg_between(&self, from: &StopKey, to: &StopKey) -> Option<(usize, usize)> {
        let start = self.position_of(from)?;
        let end = self.stop_keys[start + 1..]
            .iter()
            .position(|k| k == to)
            .map(|offset| start + 1 + offset)?;
        Some((start, end))
    }

    /// Prorated duration for the segment between two stop indices.
    ///
    /// The record only carries an end-to-end duration, so segments get a
    /// share proportional to the edges they cover, floored at 5 minutes.
    pub fn segment_duration(&self, start: usize, end: usize) -> u32 {
        let total_edges = (self.stops.len() - 1).max(1);
        let segment_edges = end.saturating_sub(start).max(1);
        let prorated =
            (self.duration_minutes as f64 * segment_edges as f64 / total_edges as f64).round();
        (prorated as u32).max(5)
    }
}

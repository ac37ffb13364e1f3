//! Route planning over the immutable timetable.
//!
//! `RoutePlanner` is the query surface the rest of the application talks
//! to: resolve the endpoints, try a direct route, and synthesize a
//! one-transfer itinerary when asked. All queries are pure reads.

mod direct;
mod transfer;

pub use direct::RouteMatch;
pub use transfer::{TransferLeg, TransferPlan};

use std::sync::Arc;

use crate::domain::{DayTime, StopKey};
use crate::resolver::StopResolver;
use crate::timetable::{StopOptions, Timetable};

/// Plans routes between free-text stop names.
pub struct RoutePlanner {
    timetable: Arc<Timetable>,
    resolver: StopResolver,
}

impl RoutePlanner {
    /// Create a planner over a loaded timetable.
    pub fn new(timetable: Arc<Timetable>) -> Self {
        let resolver = StopResolver::new(Arc::clone(&timetable));
        Self {
            timetable,
            resolver,
        }
    }

    /// The underlying timetable.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// The stop resolver.
    pub fn resolver(&self) -> &StopResolver {
        &self.resolver
    }

    /// The from/to option lists for the UI.
    pub fn options(&self) -> StopOptions {
        self.timetable.options()
    }

    /// Find the best direct route between two free-text stops.
    ///
    /// `after_time` is an optional "HH:MM" lower bound on departure; an
    /// unparsable value means no filter. Returns `None` when either stop
    /// fails to resolve or no record connects them.
    pub fn find_route(&self, from: &str, to: &str, after_time: &str) -> Option<RouteMatch> {
        let (from_key, to_key, _, _) = self.resolve_endpoints(from, to)?;
        let after = DayTime::parse_filter(after_time);
        direct::best_direct(&self.timetable, &from_key, &to_key, after)
    }

    /// Suggest a one-transfer itinerary between two free-text stops.
    ///
    /// Intended as a fallback after `find_route` comes back empty, but
    /// safe to call independently. Returns `None` when either stop fails
    /// to resolve or no shared-transfer pairing survives.
    pub fn suggest_alternative(&self, from: &str, to: &str, after_time: &str) -> Option<TransferPlan> {
        let (from_key, to_key, from_display, to_display) = self.resolve_endpoints(from, to)?;
        let after = DayTime::parse_filter(after_time);
        transfer::best_transfer(
            &self.timetable,
            &from_key,
            &to_key,
            &from_display,
            &to_display,
            after,
        )
    }

    fn resolve_endpoints(&self, from: &str, to: &str) -> Option<(StopKey, StopKey, String, String)> {
        let from_display = self.resolver.resolve(from)?;
        let to_display = self.resolver.resolve(to)?;
        let from_key = StopKey::new(&from_display);
        let to_key = StopKey::new(&to_display);
        Some((from_key, to_key, from_display, to_display))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteRecord;

    fn route(id: &str, bus: &str, dep: &str, duration: u32, stops: &[&str]) -> RouteRecord {
        RouteRecord::new(
            id.to_string(),
            stops[0].to_string(),
            stops[stops.len() - 1].to_string(),
            bus.to_string(),
            dep.to_string(),
            DayTime::parse(dep).unwrap(),
            duration,
            stops.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn planner() -> RoutePlanner {
        RoutePlanner::new(Arc::new(Timetable::new(vec![
            route("R1", "10A", "08:00", 25, &["Charbagh", "Aminabad", "Hazratganj"]),
            route("R2", "22", "08:30", 35, &["Hazratganj", "Polytechnic", "Gomti Nagar"]),
            route("R3", "45", "07:45", 50, &["Charbagh", "Alambagh", "Amausi Airport"]),
        ])))
    }

    #[test]
    fn find_route_resolves_fuzzy_endpoints() {
        let p = planner();
        let found = p.find_route("charbag", "hazratgan", "").unwrap();
        assert_eq!(found.bus_number, "10A");
        assert_eq!(found.stops.first().map(String::as_str), Some("Charbagh"));
        assert_eq!(found.stops.last().map(String::as_str), Some("Hazratganj"));
    }

    #[test]
    fn find_route_applies_alias() {
        let p = planner();
        let found = p.find_route("charbagh", "airport", "").unwrap();
        assert_eq!(found.bus_number, "45");
    }

    #[test]
    fn find_route_honors_time_filter() {
        let p = planner();
        assert!(p.find_route("charbagh", "hazratganj", "07:00").is_some());
        assert!(p.find_route("charbagh", "hazratganj", "09:00").is_none());
        // Unparsable filter means no filter
        assert!(p.find_route("charbagh", "hazratganj", "nonsense").is_some());
    }

    #[test]
    fn unresolvable_stop_fails_both_queries() {
        let p = planner();
        assert!(p.find_route("", "hazratganj", "").is_none());
        assert!(p.find_route("charbagh", "zzzzzz", "").is_none());
        assert!(p.suggest_alternative("zzzzzz", "hazratganj", "").is_none());
    }

    #[test]
    fn suggest_alternative_finds_transfer() {
        let p = planner();
        // No direct Charbagh -> Gomti Nagar record
        assert!(p.find_route("charbagh", "gomti nagar", "").is_none());

        let alt = p.suggest_alternative("charbagh", "gomti nagar", "").unwrap();
        assert_eq!(alt.from_stop, "Charbagh");
        assert_eq!(alt.to_stop, "Gomti Nagar");
        assert_eq!(alt.transfer_stop, "Hazratganj");
        assert_eq!(alt.leg1.stops.last(), alt.leg2.stops.first());
    }

    #[test]
    fn suggest_alternative_none_without_shared_stop() {
        let p = RoutePlanner::new(Arc::new(Timetable::new(vec![
            route("R1", "1", "08:00", 10, &["A", "B"]),
            route("R2", "2", "09:00", 10, &["C", "D"]),
        ])));
        assert!(p.suggest_alternative("A", "D", "").is_none());
    }

    #[test]
    fn shipped_dataset_end_to_end() {
        let timetable = Timetable::from_csv_path("data/bus_routes.csv").unwrap();
        let p = RoutePlanner::new(Arc::new(timetable));

        // Aliased and abbreviated names resolve
        let direct = p.find_route("charbagh station", "airport", "").unwrap();
        assert_eq!(direct.bus_number, "45");
        assert_eq!(direct.stops.last().map(String::as_str), Some("Amausi Airport"));

        // A time filter moves the answer to a later bus
        let later = p.find_route("charbagh", "amausi", "12:00").unwrap();
        assert_eq!(later.bus_number, "45C");

        // No direct Alambagh -> Chinhat record; transfer via Nishatganj
        assert!(p.find_route("alambagh", "chinhat", "").is_none());
        let alt = p.suggest_alternative("alambagh", "chinhat", "").unwrap();
        assert_eq!(alt.transfer_stop, "Nishatganj");
        assert_eq!(alt.leg1.bus_number, "31");
        assert_eq!(alt.leg2.bus_number, "33");
        assert_eq!(alt.total_duration_minutes, 76);
    }

    #[test]
    fn options_come_from_timetable() {
        let p = planner();
        let options = p.options();
        assert_eq!(options.from_options, vec!["Charbagh", "Hazratganj"]);
        assert_eq!(
            options.to_options,
            vec!["Amausi Airport", "Gomti Nagar", "Hazratganj"]
        );
    }
}

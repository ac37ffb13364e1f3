//! One-transfer itinerary synthesis.
//!
//! When no single record connects the endpoints, look for a pair of
//! routes sharing a common stop: a first leg from the origin to some
//! transfer stop, and a second leg from that stop to the destination.
//! Legs are joined only when their stored stop strings normalize
//! identically; no fuzzy matching happens at the join.

use std::collections::HashMap;

use crate::domain::{DayTime, StopKey};
use crate::timetable::Timetable;

/// One leg of a transfer itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLeg {
    /// Display label for the bus.
    pub bus_number: String,
    /// Departure time as it appeared in the dataset.
    pub departure_time: String,
    /// Prorated duration of this segment.
    pub duration_minutes: u32,
    /// The traversed stop slice, inclusive at both ends.
    pub stops: Vec<String>,
}

/// A synthesized two-bus itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    /// Resolved origin stop.
    pub from_stop: String,
    /// Resolved destination stop.
    pub to_stop: String,
    /// Where to change buses; display form taken from the first leg.
    pub transfer_stop: String,
    /// Origin to transfer stop.
    pub leg1: TransferLeg,
    /// Transfer stop to destination.
    pub leg2: TransferLeg,
    /// Leg durations plus the wait at the transfer stop.
    pub total_duration_minutes: u32,
}

/// A candidate leg before pairing.
#[derive(Debug, Clone)]
struct LegCandidate {
    transfer_key: StopKey,
    transfer_stop: String,
    bus_number: String,
    departure_time: String,
    departure_minutes: u16,
    duration_minutes: u32,
    stops: Vec<String>,
}

impl LegCandidate {
    fn into_leg(self) -> TransferLeg {
        TransferLeg {
            bus_number: self.bus_number,
            departure_time: self.departure_time,
            duration_minutes: self.duration_minutes,
            stops: self.stops,
        }
    }
}

/// Find the best one-transfer itinerary between two resolved stops.
///
/// The time filter applies to first legs only; a second bus may be
/// boarded at any time (waits that run "backwards" are treated as
/// next-day continuations when picking the second leg).
pub fn best_transfer(
    timetable: &Timetable,
    from: &StopKey,
    to: &StopKey,
    from_display: &str,
    to_display: &str,
    after: Option<DayTime>,
) -> Option<TransferPlan> {
    let first_legs = build_first_legs(timetable, from, after);
    let second_legs = build_second_legs(timetable, to);

    let mut best: Option<((u32, u16, u16, String), TransferPlan)> = None;

    for leg1 in &first_legs {
        let Some(leg2) = second_legs
            .get(&leg1.transfer_key)
            .and_then(|candidates| best_second_leg(candidates, leg1.departure_minutes))
        else {
            continue;
        };

        // A "transfer" whose legs share both endpoints is the same
        // end-to-end trip twice, not a genuine two-bus itinerary.
        if same_endpoints(&leg1.stops, &leg2.stops) {
            continue;
        }

        let wait = (leg2.departure_minutes as i32 - leg1.departure_minutes as i32).max(0) as u32;
        let total = leg1.duration_minutes + leg2.duration_minutes + wait;

        let key = (
            total,
            leg1.departure_minutes,
            leg2.departure_minutes,
            leg1.bus_number.clone(),
        );

        let better = match &best {
            Some((best_key, _)) => key < *best_key,
            None => true,
        };
        if better {
            let plan = TransferPlan {
                from_stop: from_display.to_string(),
                to_stop: to_display.to_string(),
                transfer_stop: leg1.transfer_stop.clone(),
                leg1: leg1.clone().into_leg(),
                leg2: leg2.clone().into_leg(),
                total_duration_minutes: total,
            };
            best = Some((key, plan));
        }
    }

    best.map(|(_, plan)| plan)
}

/// Enumerate candidate first legs: for every record containing the origin,
/// one leg per possible transfer index after it.
fn build_first_legs(
    timetable: &Timetable,
    from: &StopKey,
    after: Option<DayTime>,
) -> Vec<LegCandidate> {
    let mut legs = Vec::new();

    for route in timetable.routes() {
        let Some(start) = route.position_of(from) else {
            continue;
        };
        if let Some(filter) = after {
            if route.departure < filter {
                continue;
            }
        }

        for transfer_idx in (start + 1)..route.stops.len() {
            legs.push(LegCandidate {
                transfer_key: route.stop_keys()[transfer_idx].clone(),
                transfer_stop: route.stops[transfer_idx].clone(),
                bus_number: route.bus_number.clone(),
                departure_time: route.departure_time.clone(),
                departure_minutes: route.departure_minutes(),
                duration_minutes: route.segment_duration(start, transfer_idx),
                stops: route.stops[start..=transfer_idx].to_vec(),
            });
        }
    }

    legs
}

/// Enumerate candidate second legs, grouped by normalized transfer stop:
/// for every record containing the destination, one leg per possible
/// boarding index before it. No time filter here.
fn build_second_legs(timetable: &Timetable, to: &StopKey) -> HashMap<StopKey, Vec<LegCandidate>> {
    let mut by_transfer: HashMap<StopKey, Vec<LegCandidate>> = HashMap::new();

    for route in timetable.routes() {
        let Some(end) = route.position_of(to) else {
            continue;
        };

        for transfer_idx in 0..end {
            let transfer_key = route.stop_keys()[transfer_idx].clone();
            let leg = LegCandidate {
                transfer_key: transfer_key.clone(),
                transfer_stop: route.stops[transfer_idx].clone(),
                bus_number: route.bus_number.clone(),
                departure_time: route.departure_time.clone(),
                departure_minutes: route.departure_minutes(),
                duration_minutes: route.segment_duration(transfer_idx, end),
                stops: route.stops[transfer_idx..=end].to_vec(),
            };
            by_transfer.entry(transfer_key).or_default().push(leg);
        }
    }

    by_transfer
}

/// Pick the best second leg for a given first-leg departure.
///
/// A second bus departing before the first models a next-day continuation,
/// so negative waits wrap forward by a full day.
fn best_second_leg(candidates: &[LegCandidate], first_departure: u16) -> Option<&LegCandidate> {
    candidates.iter().min_by(|a, b| {
        second_leg_key(a, first_departure).cmp(&second_leg_key(b, first_departure))
    })
}

fn second_leg_key(leg: &LegCandidate, first_departure: u16) -> (i32, u32, &str) {
    let mut wait = leg.departure_minutes as i32 - first_departure as i32;
    if wait < 0 {
        wait += 24 * 60;
    }
    (wait, leg.duration_minutes, leg.bus_number.as_str())
}

fn same_endpoints(a: &[String], b: &[String]) -> bool {
    let first_matches = match (a.first(), b.first()) {
        (Some(x), Some(y)) => StopKey::new(x) == StopKey::new(y),
        _ => false,
    };
    let last_matches = match (a.last(), b.last()) {
        (Some(x), Some(y)) => StopKey::new(x) == StopKey::new(y),
        _ => false,
    };
    first_matches && last_matches
}

//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::{RouteMatch, TransferLeg, TransferPlan};
use crate::timetable::StopOptions;

/// A chat message from the user.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The raw message text
    pub message: String,
}

/// The chatbot's reply.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Human-readable reply text
    pub reply: String,

    /// Structured route payload, when the reply describes a route
    pub route: Option<RoutePayload>,

    /// All origin options, for the UI's pickers
    pub from_options: Vec<String>,

    /// All destination options, for the UI's pickers
    pub to_options: Vec<String>,
}

/// Response for the options endpoint.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub from_options: Vec<String>,
    pub to_options: Vec<String>,
}

impl From<StopOptions> for OptionsResponse {
    fn from(options: StopOptions) -> Self {
        Self {
            from_options: options.from_options,
            to_options: options.to_options,
        }
    }
}

/// A route in a chat reply: direct or with one transfer.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RoutePayload {
    Direct(DirectRouteDto),
    Transfer(TransferPlanDto),
}

/// A direct route.
#[derive(Debug, Serialize)]
pub struct DirectRouteDto {
    pub bus_number: String,
    pub departure_time: String,
    pub duration_minutes: u32,
    pub stops: Vec<String>,
}

impl From<RouteMatch> for DirectRouteDto {
    fn from(found: RouteMatch) -> Self {
        Self {
            bus_number: found.bus_number,
            departure_time: found.departure_time,
            duration_minutes: found.duration_minutes,
            stops: found.stops,
        }
    }
}

/// A two-bus itinerary.
#[derive(Debug, Serialize)]
pub struct TransferPlanDto {
    /// Always "transfer"; distinguishes this payload for the UI
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub from_stop: String,
    pub to_stop: String,
    pub transfer_stop: String,
    pub leg1: TransferLegDto,
    pub leg2: TransferLegDto,
    pub total_duration_minutes: u32,
}

/// One leg of a transfer itinerary.
#[derive(Debug, Serialize)]
pub struct TransferLegDto {
    pub bus_number: String,
    pub departure_time: String,
    pub duration_minutes: u32,
    pub stops: Vec<String>,
}

impl From<TransferLeg> for TransferLegDto {
    fn from(leg: TransferLeg) -> Self {
        Self {
            bus_number: leg.bus_number,
            departure_time: leg.departure_time,
            duration_minutes: leg.duration_minutes,
            stops: leg.stops,
        }
    }
}

impl From<TransferPlan> for TransferPlanDto {
    fn from(plan: TransferPlan) -> Self {
        Self {
            kind: "transfer",
            from_stop: plan.from_stop,
            to_stop: plan.to_stop,
            transfer_stop: plan.transfer_stop,
            leg1: plan.leg1.into(),
            leg2: plan.leg2.into(),
            total_duration_minutes: plan.total_duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_payload_shape() {
        let payload = RoutePayload::Direct(DirectRouteDto {
            bus_number: "10A".into(),
            departure_time: "08:00".into(),
            duration_minutes: 25,
            stops: vec!["Charbagh".into(), "Hazratganj".into()],
        });

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["bus_number"], "10A");
        assert_eq!(json["stops"][1], "Hazratganj");
        assert!(json.get("type").is_none());
    }

    #[test]
    fn transfer_payload_is_tagged() {
        let plan = TransferPlan {
            from_stop: "Charbagh".into(),
            to_stop: "Gomti Nagar".into(),
            transfer_stop: "Hazratganj".into(),
            leg1: TransferLeg {
                bus_number: "10A".into(),
                departure_time: "08:00".into(),
                duration_minutes: 25,
                stops: vec!["Charbagh".into(), "Hazratganj".into()],
            },
            leg2: TransferLeg {
                bus_number: "22".into(),
                departure_time: "08:30".into(),
                duration_minutes: 35,
                stops: vec!["Hazratganj".into(), "Gomti Nagar".into()],
            },
            total_duration_minutes: 90,
        };

        let json = serde_json::to_value(RoutePayload::Transfer(plan.into())).unwrap();
        assert_eq!(json["type"], "transfer");
        assert_eq!(json["transfer_stop"], "Hazratganj");
        assert_eq!(json["leg2"]["bus_number"], "22");
        assert_eq!(json["total_duration_minutes"], 90);
    }
}

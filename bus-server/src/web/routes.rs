//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::intent::Intent;
use crate::planner::{RouteMatch, TransferPlan};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `ui_dir` is the path to the static UI directory (must contain
/// `index.html`).
pub fn create_router(state: AppState, ui_dir: &str) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(format!("{ui_dir}/index.html")))
        .route("/health", get(health))
        .route("/options", get(options))
        .route("/chat", post(chat))
        .nest_service("/static", ServeDir::new(ui_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stop option lists for the UI's pickers.
async fn options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(state.planner.options().into())
}

/// Chat endpoint: extract an intent, answer it.
async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    let text = req.message.trim();
    let intent = state.intent.parse_intent(text).await;
    info!(message = %text, ?intent, "chat request");

    let (reply, route) = match intent {
        Intent::Greeting => (
            "Hello! You can ask me about bus routes in Lucknow.".to_string(),
            None,
        ),
        Intent::RouteQuery(query) if query.from.is_empty() || query.to.is_empty() => (
            "Please tell me the starting place and destination.".to_string(),
            None,
        ),
        Intent::RouteQuery(query) => answer_route_query(&state, &query.from, &query.to, &query.after_time),
        Intent::Unknown => (
            "Please tell me the starting place and destination.".to_string(),
            None,
        ),
    };

    let options = state.planner.options();
    Json(ChatResponse {
        reply,
        route,
        from_options: options.from_options,
        to_options: options.to_options,
    })
}

/// Answer a resolved route query: direct route, else transfer, else miss.
fn answer_route_query(
    state: &AppState,
    from: &str,
    to: &str,
    after_time: &str,
) -> (String, Option<RoutePayload>) {
    if let Some(found) = state.planner.find_route(from, to, after_time) {
        let reply = render_direct(&found);
        return (reply, Some(RoutePayload::Direct(found.into())));
    }

    if let Some(plan) = state.planner.suggest_alternative(from, to, after_time) {
        let reply = render_transfer(&plan);
        return (reply, Some(RoutePayload::Transfer(plan.into())));
    }

    ("No matching bus route found.".to_string(), None)
}

fn render_direct(found: &RouteMatch) -> String {
    format!(
        "Bus {} departs at {}. Duration {} minutes. Stops: {}",
        found.bus_number,
        found.departure_time,
        found.duration_minutes,
        found.stops.join(" -> ")
    )
}

fn render_transfer(plan: &TransferPlan) -> String {
    let leg1_from = plan.leg1.stops.first().map(String::as_str).unwrap_or("");
    format!(
        "No direct bus route found. Alternate route: Take Bus {} at {} from {} to {}. \
         Then take Bus {} at {} from {} to {}.",
        plan.leg1.bus_number,
        plan.leg1.departure_time,
        leg1_from,
        plan.transfer_stop,
        plan.leg2.bus_number,
        plan.leg2.departure_time,
        plan.transfer_stop,
        plan.to_stop
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayTime, RouteRecord};
    use crate::intent::{IntentParser, IntentProvider};
    use crate::planner::{RoutePlanner, TransferLeg};
    use crate::timetable::Timetable;
    use futures::future::BoxFuture;
    use std::sync::Arc;

    /// Provider that always declines, forcing rule-based parsing.
    struct NoProvider;

    impl IntentProvider for NoProvider {
        fn generate<'a>(&'a self, _message: &'a str) -> BoxFuture<'a, Option<String>> {
            Box::pin(async { None })
        }
    }

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

    fn state() -> AppState {
        let timetable = Timetable::new(vec![
            route("R1", "10A", "08:00", 25, &["Charbagh", "Aminabad", "Hazratganj"]),
            route("R2", "22", "08:30", 35, &["Hazratganj", "Gomti Nagar"]),
        ]);
        AppState::new(
            RoutePlanner::new(Arc::new(timetable)),
            IntentParser::new(Box::new(NoProvider)),
        )
    }

    #[tokio::test]
    async fn chat_greeting() {
        let response = chat(
            State(state()),
            Json(ChatRequest {
                message: "hello".into(),
            }),
        )
        .await;

        assert!(response.0.reply.starts_with("Hello!"));
        assert!(response.0.route.is_none());
        assert_eq!(response.0.from_options, vec!["Charbagh", "Hazratganj"]);
    }

    #[tokio::test]
    async fn chat_direct_route() {
        let response = chat(
            State(state()),
            Json(ChatRequest {
                message: "charbagh to hazratganj".into(),
            }),
        )
        .await;

        assert!(response.0.reply.contains("Bus 10A departs at 08:00"));
        assert!(response.0.reply.contains("Charbagh -> Aminabad -> Hazratganj"));
        assert!(matches!(response.0.route, Some(RoutePayload::Direct(_))));
    }

    #[tokio::test]
    async fn chat_transfer_fallback() {
        let response = chat(
            State(state()),
            Json(ChatRequest {
                message: "charbagh to gomti nagar".into(),
            }),
        )
        .await;

        assert!(response.0.reply.starts_with("No direct bus route found."));
        assert!(response.0.reply.contains("Take Bus 10A at 08:00 from Charbagh to Hazratganj"));
        assert!(response.0.reply.contains("Then take Bus 22 at 08:30"));
        assert!(matches!(response.0.route, Some(RoutePayload::Transfer(_))));
    }

    #[tokio::test]
    async fn chat_no_route() {
        let response = chat(
            State(state()),
            Json(ChatRequest {
                message: "charbagh to antarctica".into(),
            }),
        )
        .await;

        assert_eq!(response.0.reply, "No matching bus route found.");
        assert!(response.0.route.is_none());
    }

    #[tokio::test]
    async fn chat_missing_endpoint_prompts() {
        let response = chat(
            State(state()),
            Json(ChatRequest {
                message: "take me somewhere nice".into(),
            }),
        )
        .await;

        assert_eq!(
            response.0.reply,
            "Please tell me the starting place and destination."
        );
    }

    #[tokio::test]
    async fn options_endpoint() {
        let response = options(State(state())).await;
        assert_eq!(response.0.from_options, vec!["Charbagh", "Hazratganj"]);
        assert_eq!(response.0.to_options, vec!["Gomti Nagar", "Hazratganj"]);
    }

    #[test]
    fn render_transfer_reply() {
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

        let reply = render_transfer(&plan);
        assert_eq!(
            reply,
            "No direct bus route found. Alternate route: Take Bus 10A at 08:00 from Charbagh \
             to Hazratganj. Then take Bus 22 at 08:30 from Hazratganj to Gomti Nagar."
        );
    }
}

use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bus_server::intent::{HuggingFaceProvider, IntentParser, ProviderConfig};
use bus_server::planner::RoutePlanner;
use bus_server::timetable::Timetable;
use bus_server::web::{AppState, create_router};

/// Default timetable location, relative to the working directory.
const DEFAULT_ROUTES_CSV: &str = "data/bus_routes.csv";

/// Default static UI location.
const DEFAULT_UI_DIR: &str = "ui";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load the timetable (fail fast on a malformed dataset)
    let csv_path =
        std::env::var("BUS_ROUTES_CSV").unwrap_or_else(|_| DEFAULT_ROUTES_CSV.to_string());
    let timetable = Timetable::from_csv_path(&csv_path)
        .unwrap_or_else(|e| panic!("Failed to load timetable from {csv_path}: {e}"));
    info!(
        routes = timetable.len(),
        stops = timetable.known_stops().len(),
        "loaded timetable from {csv_path}"
    );

    let planner = RoutePlanner::new(std::sync::Arc::new(timetable));

    // Create the intent provider
    let provider_config = ProviderConfig::from_env();
    if provider_config.api_token.is_none() {
        warn!("HF_API_TOKEN not set; intent parsing will use rules only");
    }
    let provider =
        HuggingFaceProvider::new(provider_config).expect("Failed to create intent provider");
    let intent = IntentParser::new(Box::new(provider));

    // Build app state and router
    let state = AppState::new(planner, intent);
    let app = create_router(state, DEFAULT_UI_DIR);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Bus route chatbot listening on http://{addr}");
    info!("API endpoints: GET /health, GET /options, POST /chat");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

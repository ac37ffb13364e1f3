//! Web layer: HTTP routes, DTOs, and application state.

mod dto;
mod routes;
mod state;

pub use dto::{ChatRequest, ChatResponse, OptionsResponse, RoutePayload};
pub use routes::create_router;
pub use state::AppState;

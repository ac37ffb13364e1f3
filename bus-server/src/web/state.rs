//! Application state for the web layer.

use std::sync::Arc;

use crate::intent::IntentParser;
use crate::planner::RoutePlanner;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Everything here
/// is read-only after startup, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    /// Route planner over the loaded timetable
    pub planner: Arc<RoutePlanner>,

    /// Natural-language intent parser
    pub intent: Arc<IntentParser>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: RoutePlanner, intent: IntentParser) -> Self {
        Self {
            planner: Arc::new(planner),
            intent: Arc::new(intent),
        }
    }
}

//! Domain types for the bus route planner.
//!
//! This module contains the core domain model types that represent
//! validated timetable data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod route;
mod stop;
mod time;

pub use route::RouteRecord;
pub use stop::{StopKey, normalize};
pub use time::{DayTime, TimeError};

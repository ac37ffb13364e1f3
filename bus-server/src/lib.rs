//! Bus route chatbot server.
//!
//! A web application that answers: "how do I get from stop A to stop B
//! (after time T)?" over a fixed city bus timetable, resolving imprecise
//! stop names and, failing a direct route, synthesizing a one-transfer
//! itinerary.

pub mod domain;
pub mod intent;
pub mod planner;
pub mod resolver;
pub mod timetable;
pub mod web;

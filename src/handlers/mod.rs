//! Route handlers for the `/api` endpoints

pub mod calendar;
pub mod energy;

pub use calendar::{create_event, delete_event, get_calendars, get_events, update_event};
pub use energy::{get_energy_levels, get_recommendations, record_energy_level};

use axum::http::StatusCode;

/// Fallback for unknown routes and for unsupported methods on known routes
pub async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found")
}

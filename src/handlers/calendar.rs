use axum::{extract::Path, http::StatusCode, Json};
use chrono::Utc;
use tracing::info;

use crate::extract::JsonBody;
use crate::models::{mock_calendars, mock_events, Calendar, Event, NEW_EVENT_ID};

/// `GET /api/calendars`
pub async fn get_calendars() -> Json<Vec<Calendar>> {
    Json(mock_calendars())
}

/// `GET /api/events`
pub async fn get_events() -> Json<Vec<Event>> {
    Json(mock_events(Utc::now()))
}

/// `POST /api/events`
///
/// Nothing is stored; the event comes back with the placeholder id.
pub async fn create_event(JsonBody(mut event): JsonBody<Event>) -> (StatusCode, Json<Event>) {
    event.id = NEW_EVENT_ID.to_string();
    info!("Created event '{}' in calendar {}", event.title, event.calendar_id);

    (StatusCode::CREATED, Json(event))
}

/// `PUT /api/events/{id}`
pub async fn update_event(
    Path(id): Path<String>,
    JsonBody(mut event): JsonBody<Event>,
) -> Json<Event> {
    event.id = id;
    info!("Updated event {}", event.id);

    Json(event)
}

/// `DELETE /api/events/{id}`
pub async fn delete_event(Path(id): Path<String>) -> StatusCode {
    info!("Deleted event {}", id);
    StatusCode::NO_CONTENT
}

use axum::{http::StatusCode, Json};
use chrono::Utc;
use tracing::info;

use crate::extract::JsonBody;
use crate::models::{
    mock_energy_levels, mock_recommendations, EnergyLevel, Recommendation, NEW_ENERGY_ID,
};

/// `GET /api/energy`
pub async fn get_energy_levels() -> Json<Vec<EnergyLevel>> {
    Json(mock_energy_levels(Utc::now()))
}

/// `POST /api/energy`
///
/// The client's timestamp is replaced with the time of recording.
pub async fn record_energy_level(
    JsonBody(mut energy_level): JsonBody<EnergyLevel>,
) -> (StatusCode, Json<EnergyLevel>) {
    energy_level.id = NEW_ENERGY_ID.to_string();
    energy_level.timestamp = Utc::now().fixed_offset();
    info!(
        "Recorded energy level '{}' for user {}",
        energy_level.level, energy_level.user_id
    );

    (StatusCode::CREATED, Json(energy_level))
}

/// `GET /api/energy/recommendations`
pub async fn get_recommendations() -> Json<Vec<Recommendation>> {
    Json(mock_recommendations())
}

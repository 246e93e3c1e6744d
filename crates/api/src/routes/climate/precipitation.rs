use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{db::PrecipitationReading, ApiError, AppState, ErrorResponse};

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PrecipitationEntry {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Precipitation")]
    pub precipitation: Option<f64>,
}

impl From<PrecipitationReading> for PrecipitationEntry {
    fn from(reading: PrecipitationReading) -> Self {
        Self {
            date: reading.date,
            precipitation: reading.precipitation,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Every recorded date with its precipitation", body = Vec<PrecipitationEntry>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorResponse)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationEntry>>, ApiError> {
    let readings = state.climate_db.precipitation().await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

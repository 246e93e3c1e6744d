use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::round_hundredths;
use crate::{
    db::{Aggregate, StationSummary},
    ApiError, AppState, ErrorResponse,
};

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct StationEntry {
    #[serde(rename = "station ID")]
    pub station_id: String,
    #[serde(rename = "station Name")]
    pub station_name: String,
    #[serde(rename = "Location")]
    pub location: Location,
    #[serde(rename = "Elevation")]
    pub elevation: Option<f64>,
    #[serde(rename = "Meteorology")]
    pub meteorology: Meteorology,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct Location {
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct Meteorology {
    #[serde(rename = "Temperature")]
    pub temperature: SummaryStats,
    #[serde(rename = "Precipitation")]
    pub precipitation: SummaryStats,
}

/// Min/max over all of a station's rows, average rounded to hundredths
#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct SummaryStats {
    #[serde(rename = "Min")]
    pub min: Option<f64>,
    #[serde(rename = "Max")]
    pub max: Option<f64>,
    #[serde(rename = "Avg")]
    pub avg: Option<f64>,
}

impl From<Aggregate> for SummaryStats {
    fn from(aggregate: Aggregate) -> Self {
        Self {
            min: aggregate.min,
            max: aggregate.max,
            avg: aggregate.avg.map(round_hundredths),
        }
    }
}

impl From<StationSummary> for StationEntry {
    fn from(summary: StationSummary) -> Self {
        Self {
            station_id: summary.station_id,
            station_name: summary.name,
            location: Location {
                latitude: summary.latitude,
                longitude: summary.longitude,
            },
            elevation: summary.elevation,
            meteorology: Meteorology {
                temperature: summary.temperature.into(),
                precipitation: summary.precipitation.into(),
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every reporting station with its location and measurement summary", body = Vec<StationEntry>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorResponse)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationEntry>>, ApiError> {
    let summaries = state.climate_db.station_summaries().await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

use axum::{extract::State, Json};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    db::{ActiveStation, TemperatureReading},
    ApiError, AppState, ErrorResponse,
};

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ActiveStationObservation {
    #[serde(rename = "station ID")]
    pub station_id: String,
    #[serde(rename = "station Name")]
    pub station_name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "TOBS")]
    pub tobs: Option<f64>,
}

impl ActiveStationObservation {
    fn new(station: &ActiveStation, reading: TemperatureReading) -> Self {
        Self {
            station_id: station.station_id.clone(),
            station_name: station.name.clone(),
            date: reading.date,
            tobs: reading.tobs,
        }
    }
}

/// Temperature observations of the station with the most measurement rows,
/// limited to the year leading up to the last recorded date.
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Last year of temperature observations for the most active station", body = Vec<ActiveStationObservation>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorResponse)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ActiveStationObservation>>, ApiError> {
    let (Some(range), Some(station)) = (
        state.climate_db.date_range().await?,
        state.climate_db.most_active_station().await?,
    ) else {
        info!("no measurements recorded, returning no observations");
        return Ok(Json(vec![]));
    };

    let window = range.trailing_year();
    debug!(
        "most active station {} ({} rows), window {} to {}",
        station.station_id, station.observations, window.start, window.end
    );

    let readings = state
        .climate_db
        .station_temperatures(station.station_id.clone(), window)
        .await?;

    Ok(Json(
        readings
            .into_iter()
            .map(|reading| ActiveStationObservation::new(&station, reading))
            .collect(),
    ))
}

use axum::{
    extract::{rejection::PathRejection, OriginalUri, Path, State},
    http::Uri,
    Json,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    db::{Aggregate, DateRange},
    ApiError, AppState, ErrorResponse,
};

/// Temperature aggregates over a requested period
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct TemperatureSummary {
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "End Date")]
    pub end_date: String,
    #[serde(rename = "T-MIN")]
    pub t_min: Option<f64>,
    #[serde(rename = "T-MAX")]
    pub t_max: Option<f64>,
    #[serde(rename = "T-AVG")]
    pub t_avg: Option<f64>,
}

impl TemperatureSummary {
    fn new(start_date: String, end_date: String, stats: Aggregate) -> Self {
        Self {
            start_date,
            end_date,
            t_min: stats.min,
            t_max: stats.max,
            t_avg: stats.avg,
        }
    }
}

/// Pull the value out of a `key=value` path segment.
pub fn date_param<'a>(segment: &'a str, key: &str) -> Option<&'a str> {
    segment.strip_prefix(key)?.strip_prefix('=')
}

/// Path segments after `/api/v1.0/` as sent, without percent-decoding.
/// Used when a segment does not decode to UTF-8.
fn raw_segments(uri: &Uri) -> Vec<String> {
    uri.path()
        .strip_prefix("/api/v1.0/")
        .unwrap_or_default()
        .split('/')
        .map(String::from)
        .collect()
}

async fn dataset_range(state: &AppState) -> Result<DateRange, ApiError> {
    state
        .climate_db
        .date_range()
        .await?
        .ok_or(ApiError::NoObservations)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/start={start}",
    params(
        ("start" = String, Path, description = "First date of the period, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature min/max/avg from the start date through the last recorded date", body = Vec<TemperatureSummary>),
        (status = NOT_FOUND, description = "Start date outside the recorded range", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorResponse)
    ))]
pub async fn start_date(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    segment: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    let segment = match segment {
        Ok(Path(segment)) => segment,
        Err(e) => {
            debug!("falling back to raw start segment: {}", e);
            raw_segments(&uri).into_iter().next().unwrap_or_default()
        }
    };
    let raw_start =
        date_param(&segment, "start").ok_or_else(|| ApiError::RouteNotFound(uri.path().into()))?;

    let range = dataset_range(&state).await?;
    let start = range
        .resolve(raw_start)
        .ok_or_else(|| ApiError::DateNotFound {
            start: raw_start.to_string(),
            first: range.first,
            last: range.last,
        })?;

    let stats = state.climate_db.temperature_stats(start, None).await?;
    Ok(Json(vec![TemperatureSummary::new(
        start.to_string(),
        range.last.to_string(),
        stats,
    )]))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/start={start}/end={end}",
    params(
        ("start" = String, Path, description = "First date of the period, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last date of the period, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature min/max/avg between the two dates, inclusive", body = Vec<TemperatureSummary>),
        (status = BAD_REQUEST, description = "Start date is after end date", body = ErrorResponse),
        (status = NOT_FOUND, description = "A date outside the recorded range", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorResponse)
    ))]
pub async fn period(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    segments: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Vec<TemperatureSummary>>, ApiError> {
    let (start_segment, end_segment) = match segments {
        Ok(Path(segments)) => segments,
        Err(e) => {
            debug!("falling back to raw period segments: {}", e);
            let mut raw = raw_segments(&uri).into_iter();
            (
                raw.next().unwrap_or_default(),
                raw.next().unwrap_or_default(),
            )
        }
    };
    let (Some(raw_start), Some(raw_end)) = (
        date_param(&start_segment, "start"),
        date_param(&end_segment, "end"),
    ) else {
        return Err(ApiError::RouteNotFound(uri.path().into()));
    };

    let range = dataset_range(&state).await?;
    let (Some(start), Some(end)) = (range.resolve(raw_start), range.resolve(raw_end)) else {
        return Err(ApiError::PeriodNotFound {
            start: raw_start.to_string(),
            end: raw_end.to_string(),
            first: range.first,
            last: range.last,
        });
    };
    if start > end {
        return Err(ApiError::InvertedPeriod { start, end });
    }

    let stats = state.climate_db.temperature_stats(start, Some(end)).await?;
    Ok(Json(vec![TemperatureSummary::new(
        start.to_string(),
        end.to_string(),
        stats,
    )]))
}

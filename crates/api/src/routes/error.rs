use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use crate::db;

/// Body returned for every non-2xx JSON response
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Date: {start} not found. Date must be between {first} and {last}")]
    DateNotFound {
        start: String,
        first: Date,
        last: Date,
    },
    #[error("Date: {start} to {end} not found. Date must be between {first} and {last}")]
    PeriodNotFound {
        start: String,
        end: String,
        first: Date,
        last: Date,
    },
    #[error("{start} is greater than {end}")]
    InvertedPeriod { start: Date, end: Date },
    #[error("Route not found: {0}")]
    RouteNotFound(String),
    #[error("No observations recorded")]
    NoObservations,
    #[error("Failed to query climate data")]
    Storage(#[from] db::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DateNotFound { .. }
            | ApiError::PeriodNotFound { .. }
            | ApiError::RouteNotFound(_)
            | ApiError::NoObservations => StatusCode::NOT_FOUND,
            ApiError::InvertedPeriod { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(e) = &self {
            error!("error querying climate data: {}", e);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Fallback for paths no route matches
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound(uri.path().into())
}

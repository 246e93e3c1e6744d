use crate::helpers::{hawaii_range, spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::{Aggregate, TemperatureSummary};
use std::sync::Arc;
use time::macros::date;

fn stats() -> Aggregate {
    Aggregate {
        min: Some(58.0),
        max: Some(87.0),
        avg: Some(74.59058295964125),
    }
}

fn with_hawaii_range() -> MockClimateAccess {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_date_range()
        .returning(|| Ok(Some(hawaii_range())));
    climate_data
}

#[tokio::test]
async fn start_date_aggregates_through_last_recorded_date() {
    let mut climate_data = with_hawaii_range();
    climate_data
        .expect_temperature_stats()
        .withf(|start, end| *start == date!(2016 - 08 - 23) && end.is_none())
        .times(1)
        .returning(|_, _| Ok(stats()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get("/api/v1.0/start=2016-08-23").await;

    assert_eq!(status, StatusCode::OK);
    let summaries: Vec<TemperatureSummary> = serde_json::from_slice(&body).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].start_date, "2016-08-23");
    assert_eq!(summaries[0].end_date, "2017-08-23");
    assert_eq!(summaries[0].t_min, Some(58.0));
    assert_eq!(summaries[0].t_max, Some(87.0));
    assert_eq!(summaries[0].t_avg, Some(74.59058295964125));
}

#[tokio::test]
async fn start_date_response_keeps_key_order() {
    let mut climate_data = with_hawaii_range();
    climate_data.expect_temperature_stats().returning(|_, _| {
        Ok(Aggregate {
            min: Some(71.0),
            max: Some(82.0),
            avg: Some(76.5),
        })
    });
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (_, body) = test_app.get("/api/v1.0/start=2017-08-23").await;

    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"[{"Start Date":"2017-08-23","End Date":"2017-08-23","T-MIN":71.0,"T-MAX":82.0,"T-AVG":76.5}]"#
    );
}

#[tokio::test]
async fn start_date_before_dataset_is_not_found() {
    let mut climate_data = with_hawaii_range();
    climate_data.expect_temperature_stats().times(0);
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, json) = test_app.get_json("/api/v1.0/start=2009-12-31").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"],
        "Date: 2009-12-31 not found. Date must be between 2010-01-01 and 2017-08-23"
    );
}

#[tokio::test]
async fn malformed_start_date_is_not_found() {
    let test_app = spawn_app(Arc::new(with_hawaii_range())).await;

    let (status, json) = test_app.get_json("/api/v1.0/start=23-08-2016").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"],
        "Date: 23-08-2016 not found. Date must be between 2010-01-01 and 2017-08-23"
    );
}

#[tokio::test]
async fn period_aggregates_between_both_dates() {
    let mut climate_data = with_hawaii_range();
    climate_data
        .expect_temperature_stats()
        .withf(|start, end| {
            *start == date!(2016 - 08 - 23) && *end == Some(date!(2017 - 01 - 01))
        })
        .times(1)
        .returning(|_, _| Ok(stats()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, json) = test_app
        .get_json("/api/v1.0/start=2016-08-23/end=2017-01-01")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["Start Date"], "2016-08-23");
    assert_eq!(json[0]["End Date"], "2017-01-01");
    assert_eq!(json[0]["T-MAX"], 87.0);
}

#[tokio::test]
async fn period_on_a_single_day_is_allowed() {
    let mut climate_data = with_hawaii_range();
    climate_data
        .expect_temperature_stats()
        .withf(|start, end| Some(*start) == *end)
        .times(1)
        .returning(|_, _| Ok(stats()));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, _) = test_app
        .get("/api/v1.0/start=2012-02-29/end=2012-02-29")
        .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn inverted_period_is_a_bad_request() {
    let mut climate_data = with_hawaii_range();
    climate_data.expect_temperature_stats().times(0);
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, json) = test_app
        .get_json("/api/v1.0/start=2017-01-01/end=2016-01-01")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "2017-01-01 is greater than 2016-01-01");
}

#[tokio::test]
async fn period_checks_both_dates_against_dataset() {
    let test_app = spawn_app(Arc::new(with_hawaii_range())).await;

    let (status, json) = test_app
        .get_json("/api/v1.0/start=2001-01-01/end=2016-01-01")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"],
        "Date: 2001-01-01 to 2016-01-01 not found. Date must be between 2010-01-01 and 2017-08-23"
    );

    let (status, _) = test_app
        .get_json("/api/v1.0/start=2016-01-01/end=2018-01-01")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_segment_is_route_not_found() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_date_range().times(0);
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, json) = test_app.get_json("/api/v1.0/begin=2016-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Route not found: /api/v1.0/begin=2016-01-01");

    let (status, json) = test_app
        .get_json("/api/v1.0/start=2016-01-01/until=2017-01-01")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"],
        "Route not found: /api/v1.0/start=2016-01-01/until=2017-01-01"
    );
}

#[tokio::test]
async fn date_routes_on_empty_dataset_are_not_found() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_date_range().returning(|| Ok(None));
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, json) = test_app.get_json("/api/v1.0/start=2016-08-23").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No observations recorded");
}

#[tokio::test]
async fn undecodable_dates_are_not_found() {
    let mut climate_data = with_hawaii_range();
    climate_data.expect_temperature_stats().times(0);
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, json) = test_app.get_json("/api/v1.0/start=%FF").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"],
        "Date: %FF not found. Date must be between 2010-01-01 and 2017-08-23"
    );

    let (status, json) = test_app
        .get_json("/api/v1.0/start=2016-01-01/end=%C3%28")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json["error"],
        "Date: 2016-01-01 to %C3%28 not found. Date must be between 2010-01-01 and 2017-08-23"
    );
}

#[tokio::test]
async fn unmatched_paths_get_json_not_found() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_date_range().times(0);
    let test_app = spawn_app(Arc::new(climate_data)).await;

    for path in [
        "/api/v1.0/start=2016-01-01/end=2017-01-01/extra",
        "/api/v1.0/start=2016-01-01/",
        "/api/v1.0/",
        "/nowhere",
    ] {
        let (status, json) = test_app.get_json(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(json["error"], format!("Route not found: {path}"));
    }
}

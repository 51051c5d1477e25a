use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::Request,
};
use backend::{AppState, create_router, fixtures::FixtureStore};
use hyper::StatusCode;
use serde_json::{Value, json};
use shared::{GeocodeResult, LocationSuggestion, RouteResult, polyline};
use tower::ServiceExt;

const SAMPLE_FIXTURE: &str = include_str!("../data/sample_fixture.json");

fn test_app() -> axum::Router {
    let fixtures = FixtureStore::from_reader(SAMPLE_FIXTURE.as_bytes()).expect("fixture");
    create_router(AppState {
        fixtures: Arc::new(fixtures),
    })
}

fn post_trip(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/calculate-route")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn calculate_route_returns_fixture_route() {
    let payload = json!({
        "current_location": "Chicago, IL",
        "pickup_location": "Chicago, IL",
        "dropoff_location": "Indianapolis, IN",
        "current_cycle_hours": 10
    });

    let response = test_app().oneshot(post_trip(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let route: RouteResult = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(route.stops.len(), 4);
    assert_eq!(route.logs.len(), 1);
    let path = polyline::decode(&route.polyline).expect("encoded from stops");
    assert_eq!(path.len(), route.stops.len());
}

#[tokio::test]
async fn unknown_location_reports_geocoding_failure() {
    let payload = json!({
        "current_location": "Chicago, IL",
        "pickup_location": "Atlantis",
        "dropoff_location": "Indianapolis, IN",
        "current_cycle_hours": 10
    });

    let response = test_app().oneshot(post_trip(&payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({"detail": "geocoding failed"}));
}

#[tokio::test]
async fn invalid_trip_is_rejected_with_error_field() {
    let app = test_app();
    let cases = [
        json!({
            "current_location": "  ",
            "pickup_location": "Chicago",
            "dropoff_location": "Indianapolis",
            "current_cycle_hours": 0
        }),
        json!({
            "current_location": "Chicago",
            "pickup_location": "Chicago",
            "dropoff_location": "Indianapolis",
            "current_cycle_hours": 70.5
        }),
        json!({ "current_location": "Chicago" }),
    ];

    for payload in cases {
        let response = app.clone().oneshot(post_trip(&payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body = json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()), "{body}");
    }
}

#[tokio::test]
async fn geocode_hits_misses_and_empty_address() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get("/api/geocode?address=indianapolis"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let found: GeocodeResult = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(found.display_name, "Indianapolis, IN, USA");

    let response = app
        .clone()
        .oneshot(get("/api/geocode?address=Atlantis"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"detail": "Address not found"}));

    let response = app.oneshot(get("/api/geocode?address=")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn suggestions_match_by_substring() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get("/api/location-suggestions?query=chi"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let hits: Vec<LocationSuggestion> =
        serde_json::from_value(json_body(response).await).unwrap();
    let names: Vec<_> = hits.iter().map(|hit| hit.display_name.as_str()).collect();
    assert_eq!(names, ["Chicago, IL, USA", "Chicago Heights, IL, USA"]);

    let response = app
        .oneshot(get("/api/location-suggestions?query=ch"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!([]));
}

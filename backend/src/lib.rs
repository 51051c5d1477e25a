pub mod error;
pub mod fixtures;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use shared::{ErrorBody, GeocodeResult, LocationSuggestion, MAX_CYCLE_HOURS, RouteResult, TripRequest};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::fixtures::FixtureStore;

pub const GEOCODING_FAILED: &str = "geocoding failed";
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

#[derive(Clone)]
pub struct AppState {
    pub fixtures: Arc<FixtureStore>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/calculate-route", post(calculate_route_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/api/location-suggestions", get(suggestions_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

type ApiFailure = (StatusCode, Json<ErrorBody>);

fn bad_request(message: impl Into<String>) -> ApiFailure {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::error(message)))
}

fn validate(req: &TripRequest) -> Result<(), ApiFailure> {
    let locations = [
        ("current_location", &req.current_location),
        ("pickup_location", &req.pickup_location),
        ("dropoff_location", &req.dropoff_location),
    ];
    if let Some((name, _)) = locations.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(bad_request(format!("{name} is required")));
    }
    if !(0.0..=MAX_CYCLE_HOURS).contains(&req.current_cycle_hours) {
        return Err(bad_request(format!(
            "current_cycle_hours must be between 0 and {MAX_CYCLE_HOURS}"
        )));
    }
    Ok(())
}

async fn calculate_route_handler(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<RouteResult>, ApiFailure> {
    let Json(req) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;
    validate(&req)?;

    for address in [&req.current_location, &req.pickup_location, &req.dropoff_location] {
        if state.fixtures.geocode(address).is_none() {
            tracing::warn!(%address, "no fixture place for trip location");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::detail(GEOCODING_FAILED)),
            ));
        }
    }

    let route = state.fixtures.route().clone();
    tracing::debug!(
        stops = route.stops.len(),
        logs = route.logs.len(),
        "serving fixture route"
    );
    Ok(Json(route))
}

#[derive(Debug, Deserialize)]
struct GeocodeParams {
    #[serde(default)]
    address: String,
}

async fn geocode_handler(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResult>, ApiFailure> {
    if params.address.trim().is_empty() {
        return Err(bad_request("address is required"));
    }
    state.fixtures.geocode(&params.address).map(Json).ok_or((
        StatusCode::NOT_FOUND,
        Json(ErrorBody::detail(ADDRESS_NOT_FOUND)),
    ))
}

#[derive(Debug, Deserialize)]
struct SuggestionParams {
    #[serde(default)]
    query: String,
}

async fn suggestions_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Json<Vec<LocationSuggestion>> {
    Json(state.fixtures.suggestions(&params.query))
}

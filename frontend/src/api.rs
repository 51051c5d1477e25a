//! Calls to the route API. Every function resolves to a value the update
//! loop can consume directly; nothing here panics or retries.

use seed::browser::fetch::{FetchError, Method, Request};
use serde::de::DeserializeOwned;
use shared::{GeocodeResult, LocationSuggestion, RouteResult, TripRequest};

use crate::error::ApiError;
use crate::logging;

pub async fn calculate_route(api_root: String, payload: TripRequest) -> Result<RouteResult, ApiError> {
    let request = Request::new(format!("{api_root}/calculate-route"))
        .method(Method::Post)
        .json(&payload)
        .map_err(fetch_error)?;
    send(request).await
}

pub async fn geocode(api_root: String, address: String) -> Result<GeocodeResult, ApiError> {
    let url = format!("{api_root}/geocode?address={}", urlencoding::encode(&address));
    send(Request::new(url)).await
}

/// Never fails: errors and short queries yield an empty list.
pub async fn location_suggestions(
    api_root: String,
    query: String,
    min_len: usize,
) -> Vec<LocationSuggestion> {
    if query.trim().chars().count() < min_len {
        return Vec::new();
    }
    let url = format!(
        "{api_root}/location-suggestions?query={}",
        urlencoding::encode(&query)
    );
    match send(Request::new(url)).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            logging::error(&format!("location suggestions for {query:?} failed: {err}"));
            Vec::new()
        }
    }
}

async fn send<T: DeserializeOwned + 'static>(request: Request<'_>) -> Result<T, ApiError> {
    let response = request.fetch().await.map_err(fetch_error)?;
    let status = response.status().code;
    let body = response.text().await.map_err(fetch_error)?;
    classify(status, &body)
}

/// Turns a received response into a value: 2xx bodies must decode as `T`,
/// every other status is a server error carrying the raw body.
fn classify<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::server(status, body));
    }
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn fetch_error(err: FetchError) -> ApiError {
    match err {
        FetchError::NetworkError(raw) => ApiError::Network(format!("{raw:?}")),
        FetchError::JsonError(raw) => ApiError::Decode(format!("{raw:?}")),
        other => ApiError::Request(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_decodes() {
        let found: GeocodeResult =
            classify(200, r#"{"display_name":"Gary, IN, USA","lat":41.59,"lng":-87.35}"#).unwrap();
        assert_eq!(found.display_name, "Gary, IN, USA");
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = classify::<RouteResult>(200, "{\"total_distance\": \"far\"}").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        let err = classify::<Vec<LocationSuggestion>>(204, "").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn non_success_status_is_a_server_error() {
        let err = classify::<RouteResult>(500, r#"{"detail":"geocoding failed"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(err.user_message(), "geocoding failed");

        let err = classify::<GeocodeResult>(404, "<html>not here</html>").unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 404, .. }));
        assert_eq!(err.user_message(), "Server error: 404");
    }
}

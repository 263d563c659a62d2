use std::sync::Arc;

use axum::{
    Router,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{debug, error, info, warn};
use weather_core::{
    CoordinatePair, WeatherError, WeatherProvider, WeatherReport, coords::parse_query, render,
};

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "This endpoint only support GET and POST requests";
pub const INVALID_COORDINATES_MESSAGE: &str =
    "Valid coordinates not provided. Please provide exactly one floating-point number for each.";
pub const UPSTREAM_MESSAGE: &str = "Error fetching weather data.";
pub const READ_MESSAGE: &str = "Error reading response";
pub const DECODE_MESSAGE: &str = "Error parsing JSON response";

/// Shared, read-only per-request state.
#[derive(Debug, Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/weather",
            get(handle_get)
                .head(method_not_allowed)
                .post(handle_post)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

/// GET /weather?lat=..&lon=..
async fn handle_get(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<String, ApiError> {
    let params = parse_query(query.as_deref().unwrap_or_default());
    let coords = CoordinatePair::from_params(&params)?;

    info!("Fetching weather data...");
    debug!(
        lat = %coords.latitude,
        long = %coords.longitude,
        "User-provided coordinates from query params"
    );

    let body = state.provider.fetch_current(&coords).await?;
    let report = WeatherReport::from_slice(&body)?;
    let sentence = render(&report);

    debug!("{sentence}");
    debug!(temp = report.celsius(), "Temperature in Celsius");

    Ok(sentence)
}

/// POST /weather: accepted, body ignored, nothing returned.
async fn handle_post() -> StatusCode {
    debug!("POST /weather has no coordinate support; request body ignored");
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    plain_error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// Error body: fixed text plus newline.
fn plain_error(status: StatusCode, message: &str) -> Response {
    (status, format!("{message}\n")).into_response()
}

/// Maps a core failure to a status code and a caller-safe message.
#[derive(Debug)]
pub struct ApiError(WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            WeatherError::InvalidCoordinates { .. } => {
                (StatusCode::BAD_REQUEST, INVALID_COORDINATES_MESSAGE)
            }
            WeatherError::Transport(_) | WeatherError::Rejected { .. } => {
                (StatusCode::BAD_GATEWAY, UPSTREAM_MESSAGE)
            }
            WeatherError::ReadBody(_) => (StatusCode::INTERNAL_SERVER_ERROR, READ_MESSAGE),
            WeatherError::Decode(_) => (StatusCode::INTERNAL_SERVER_ERROR, DECODE_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self.0, %status, "weather request failed");
        } else {
            warn!(error = %self.0, %status, "weather request rejected");
        }
        plain_error(status, message)
    }
}

//! HTTP handlers for the collector and query APIs

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;
use tokio::sync::Notify;
use tracing::{info, warn};

use crate::app::WeatherApp;
use crate::error::{ErrorCode, WeatherError};
use crate::models::{Airport, AtmosphericInformation, DataPoint, HealthStatus};

/// Shared handler state
#[derive(Clone)]
pub struct ApiState {
    pub app: Arc<WeatherApp>,
    /// Notified by `/collect/exit`
    pub shutdown: Arc<Notify>,
}

impl ApiState {
    pub fn new(app: Arc<WeatherApp>, shutdown: Arc<Notify>) -> Self {
        Self { app, shutdown }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation | ErrorCode::Format => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Duplicate => StatusCode::CONFLICT,
        ErrorCode::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = status_for(code);
        warn!(code = %code, status = status.as_u16(), error = %self, "Request rejected");

        let body = ErrorBody {
            code: code.as_str(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, WeatherError>;

pub fn router(state: ApiState) -> Router {
    Router::new()
        .nest("/collect", collect_router())
        .nest("/query", query_router())
        .with_state(state)
}

fn collect_router() -> Router<ApiState> {
    Router::new()
        .route("/ping", get(collector_ping))
        .route("/weather/{iata}/{point_type}", post(update_weather))
        .route("/airports", get(get_airports))
        .route(
            "/airport/{iata}",
            get(get_airport).delete(delete_airport),
        )
        .route("/airport/{iata}/{lat}/{long}", post(add_airport))
        .route("/exit", get(exit))
}

fn query_router() -> Router<ApiState> {
    Router::new()
        .route("/ping", get(query_ping))
        .route("/weather/{iata}/{radius}", get(get_weather))
}

async fn collector_ping() -> &'static str {
    "1"
}

async fn update_weather(
    State(state): State<ApiState>,
    Path((iata, point_type)): Path<(String, String)>,
    body: String,
) -> ApiResult<&'static str> {
    let point: DataPoint = serde_json::from_str(&body)
        .map_err(|e| WeatherError::format("data point", e.to_string()))?;

    state.app.weather().add_data_point(&iata, &point_type, point)?;
    Ok("OK")
}

async fn get_airports(State(state): State<ApiState>) -> Json<BTreeSet<String>> {
    Json(state.app.airports().all_airport_codes())
}

async fn get_airport(
    State(state): State<ApiState>,
    Path(iata): Path<String>,
) -> ApiResult<Json<Airport>> {
    state.app.airports().get_airport(&iata).map(Json)
}

async fn add_airport(
    State(state): State<ApiState>,
    Path((iata, lat, long)): Path<(String, String, String)>,
) -> ApiResult<&'static str> {
    state.app.airports().add_airport(&iata, &lat, &long)?;
    Ok("OK")
}

async fn delete_airport(
    State(state): State<ApiState>,
    Path(iata): Path<String>,
) -> ApiResult<Json<bool>> {
    state.app.airports().delete_airport(&iata).map(Json)
}

async fn exit(State(state): State<ApiState>) -> &'static str {
    info!("Shutdown requested through the collector API");
    state.shutdown.notify_one();
    "Shutting down"
}

async fn query_ping(State(state): State<ApiState>) -> Json<HealthStatus> {
    Json(state.app.weather().health_status())
}

async fn get_weather(
    State(state): State<ApiState>,
    Path((iata, radius)): Path<(String, String)>,
) -> ApiResult<Json<Vec<AtmosphericInformation>>> {
    let radius = parse_radius(&radius)?;
    state.app.weather().get_airport_weather(&iata, radius).map(Json)
}

/// Blank means "this airport only"
fn parse_radius(raw: &str) -> ApiResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| WeatherError::format("radius", format!("`{raw}` is not a number.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::Validation, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::Format, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::Duplicate, StatusCode::CONFLICT)]
    #[case(ErrorCode::Config, StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] code: ErrorCode, #[case] status: StatusCode) {
        assert_eq!(status_for(code), status);
    }

    #[test]
    fn test_error_response_status() {
        let response = WeatherError::duplicate_airport("BOS").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[case("", 0.0)]
    #[case("  ", 0.0)]
    #[case("0", 0.0)]
    #[case("12.5", 12.5)]
    fn test_parse_radius(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_radius(raw).unwrap(), expected);
    }

    #[test]
    fn test_parse_radius_rejects_text() {
        let err = parse_radius("far").unwrap_err();
        assert!(matches!(err, WeatherError::Format { .. }));
    }
}

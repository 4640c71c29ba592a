// HTTP request handlers
use crate::application::exchange_rate_service::ServiceError;
use crate::application::rate_source::UpstreamError;
use crate::domain::error::PipelineError;
use crate::domain::range::RangeToken;
use crate::infrastructure::http_response::{
    FETCH_FAILED_MESSAGE, error_envelope, raw_json_response, upstream_status,
};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;

/// Shown to end users when the payload cannot be decoded
const PROCESSING_FAILED_MESSAGE: &str = "Unable to process data";

#[derive(Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

impl RangeQuery {
    fn token(&self) -> Result<RangeToken, PipelineError> {
        match &self.range {
            Some(range) => range.parse(),
            None => Ok(RangeToken::default()),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Relay the provider response untouched
pub async fn proxy_exchange_rates(State(state): State<Arc<AppState>>) -> Response {
    match state.rate_service.fetch_raw().await {
        Ok(body) => raw_json_response(body),
        Err(e) => upstream_error_response(e),
    }
}

pub async fn method_not_allowed() -> Response {
    error_envelope(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Filtered series and monthly summary for the requested range
pub async fn chart_view(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let token = match query.token() {
        Ok(token) => token,
        Err(e) => return pipeline_error_response(e),
    };

    match state.rate_service.view(token, Local::now()).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => service_error_response(e),
    }
}

/// Re-fetch the provider data, then answer like [`chart_view`]
pub async fn reload_rates(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let token = match query.token() {
        Ok(token) => token,
        Err(e) => return pipeline_error_response(e),
    };

    match state.rate_service.reload(token, Local::now()).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => service_error_response(e),
    }
}

fn service_error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Upstream(e) => upstream_error_response(e),
        ServiceError::Pipeline(e) => pipeline_error_response(e),
    }
}

fn upstream_error_response(err: UpstreamError) -> Response {
    match err {
        UpstreamError::Status { status, body } => error_envelope(upstream_status(status), body),
        UpstreamError::Unreachable(_) => {
            error_envelope(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
        }
    }
}

fn pipeline_error_response(err: PipelineError) -> Response {
    let message = err.to_string();
    match err {
        PipelineError::Format(detail) => {
            tracing::error!("Failed to process exchange rate data: {}", detail);
            error_envelope(StatusCode::BAD_GATEWAY, PROCESSING_FAILED_MESSAGE)
        }
        PipelineError::Config(_) => error_envelope(StatusCode::BAD_REQUEST, message),
    }
}

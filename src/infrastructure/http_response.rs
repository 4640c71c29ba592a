// HTTP response utilities for JSON bodies and error envelopes
use axum::{
    Json,
    body::Body,
    http::{Response, StatusCode, header},
    response::IntoResponse,
};
use bytes::Bytes;
use serde_json::{Value, json};

/// Body used when no upstream response was received
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch exchange rate data";

/// Relay an upstream JSON body without re-encoding it
pub fn raw_json_response(body: Bytes) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

/// `{ "error": <error> }` with the given status
pub fn error_envelope(status: StatusCode, error: impl Into<Value>) -> Response<Body> {
    (status, Json(json!({ "error": error.into() }))).into_response()
}

/// Map an upstream status code, falling back to 500 for codes axum rejects
pub fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

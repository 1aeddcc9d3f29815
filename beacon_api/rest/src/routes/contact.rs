use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use beacon_core_contact_contracts::ContactFeatureService;
use beacon_models::contact::ContactSubmission;
use serde_json::Value;
use tracing::{debug, warn};

use super::error;
use crate::models::ApiResponse;

const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";
const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
const NOT_CONFIGURED_MESSAGE: &str =
    "Email service is not configured. Please try again later.";
const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

/// The body is read as raw bytes so that malformed json, a missing content
/// type and an oversized body end up in our own response format.
async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            debug!("rejecting unreadable contact request: {err}");
            return error(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
        }
    };

    let submission = match serde_json::from_slice::<Value>(&body) {
        Ok(value) => ContactSubmission(value),
        Err(err) => {
            debug!("rejecting malformed contact request: {err}");
            return error(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
        }
    };

    let payload = match submission.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            debug!("rejecting invalid contact request: {errors}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::failure(VALIDATION_FAILED_MESSAGE).with_errors(errors)),
            )
                .into_response();
        }
    };

    if !service.is_configured() {
        warn!("contact request received, but no email service is configured");
        return error(StatusCode::SERVICE_UNAVAILABLE, NOT_CONFIGURED_MESSAGE);
    }

    match service.send_message(payload).await {
        Ok(()) => Json(ApiResponse::success()).into_response(),
        Err(err) => {
            tracing::error!("Failed to send contact message: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_MESSAGE)
        }
    }
}

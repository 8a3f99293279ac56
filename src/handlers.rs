use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::config::Config;
use crate::db_storage::LeadStore;
use crate::errors::AppError;
use crate::models::{ErrorBody, LeadResponse, SanitizedLead};
use crate::resend_client::LeadNotifier;
use crate::services::LeadSubmissionService;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Record store, `None` when it could not be acquired at startup.
    pub store: Option<Arc<dyn LeadStore>>,
    /// Email notification channel.
    pub notifier: Arc<dyn LeadNotifier>,
}

/// Health check endpoint.
///
/// Returns the service status, version, and whether the record store is configured.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running"))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let store_status = if state.store.is_some() {
        "configured"
    } else {
        "unavailable"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "shipping-lead-api",
            "version": env!("CARGO_PKG_VERSION"),
            "store": store_status,
        })),
    )
}

/// POST /shipping-lead
///
/// Lead intake endpoint. OPTIONS gets a plain acknowledgment, every other
/// non-POST method a 405. The body is parsed by the pipeline itself so that
/// malformed JSON maps to the documented 400.
#[utoipa::path(
    post,
    path = "/shipping-lead",
    request_body = SanitizedLead,
    responses(
        (status = 200, description = "Lead accepted by the store and/or email", body = LeadResponse),
        (status = 400, description = "Invalid JSON or missing required fields", body = ErrorBody),
        (status = 405, description = "Method not allowed", body = ErrorBody),
        (status = 413, description = "Request body too large", body = ErrorBody),
        (status = 500, description = "Lead could not be saved or unexpected error", body = ErrorBody)
    )
)]
pub async fn shipping_lead(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok((StatusCode::OK, "ok").into_response());
    }
    if method != Method::POST {
        tracing::warn!("Rejected {} request to lead endpoint", method);
        return Err(AppError::MethodNotAllowed);
    }

    let body = body.map_err(|rejection| {
        tracing::warn!("Rejected lead request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest("Invalid request body".to_string())
        }
    })?;

    let service = LeadSubmissionService::new(state.store.clone(), state.notifier.clone());
    let response = service.submit(&body).await?;

    Ok((StatusCode::OK, Json(response)).into_response())
}

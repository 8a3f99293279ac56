use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::errors::panic_response;
use crate::handlers::{self, AppState};
use crate::openapi;

/// Builds the HTTP application.
///
/// Lead routes get the body size limit and, when configured, per-IP rate
/// limiting. Health and docs bypass both. The limit is enforced by the body
/// extractor so an oversized body gets the JSON 413 from `AppError`.
pub fn build_app(state: Arc<AppState>) -> anyhow::Result<Router> {
    let lead_routes: Router<Arc<AppState>> = Router::new()
        .route("/shipping-lead", any(handlers::shipping_lead))
        .route("/api/v1/leads", any(handlers::shipping_lead));
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    let lead_routes = match state.config.rate_limit {
        Some(rate_limit) => {
            let governor_conf = Arc::new(
                GovernorConfigBuilder::default()
                    .per_second(rate_limit.per_second)
                    .burst_size(rate_limit.burst_size)
                    .key_extractor(SmartIpKeyExtractor)
                    .finish()
                    .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
            );
            tracing::info!(
                "Rate limiting enabled: {} req/sec per IP, burst of {}",
                rate_limit.per_second,
                rate_limit.burst_size
            );
            lead_routes.layer(
                ServiceBuilder::new()
                    // Request size limit (prevents memory exhaustion)
                    .layer(body_limit)
                    .layer(GovernorLayer {
                        config: governor_conf,
                    }),
            )
        }
        None => lead_routes.layer(body_limit),
    };

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/docs", get(openapi::serve_swagger_ui))
        .route("/api-docs/openapi.json", get(openapi::serve_openapi_spec))
        .merge(lead_routes)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Ok(app)
}

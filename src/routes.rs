//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{short_id}`             - Short link redirect
//! - `GET    /health`                 - Health check: DB, click queue
//! - `POST   /api/links`              - Create a short link
//! - `DELETE /api/links/{short_id}`   - Delete a short link
//! - `GET    /api/links/{short_id}/stats` - Aggregated click statistics
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::{delete, get, post};
use tower::Layer;
use tower_http::LatencyUnit;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, redirect_handler, stats_handler,
};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = Router::new()
        .route("/links", post(create_link_handler))
        .route("/links/{short_id}", delete(delete_link_handler))
        .route("/links/{short_id}/stats", get(stats_handler));

    let router = Router::new()
        .route("/{short_id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;

use crate::application::services::RequestMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short ID to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Request Flow
///
/// 1. Look up the link under the configured deadline
/// 2. Send a click event to the background worker (fire-and-forget)
/// 3. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped; the redirect is never
/// delayed or failed by tracking.
///
/// # Errors
///
/// Returns 404 Not Found if the short ID doesn't exist.
/// Returns 503 Service Unavailable if the store misses the lookup deadline.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let meta = RequestMeta {
        ip: Some(addr.ip().to_string()),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        referer: headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
    };

    let original_url = state.redirect_service.resolve(&short_id, meta).await?;

    Ok(Redirect::temporary(&original_url))
}

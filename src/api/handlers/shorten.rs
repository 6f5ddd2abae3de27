//! Handler for link creation.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::handlers::user_id_from_headers;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Ownership
///
/// The upstream gateway identifies the caller via the `X-User-Id` header.
/// Without it the link is created anonymously.
///
/// # Errors
///
/// Returns 400 Bad Request for malformed URLs or disallowed schemes.
/// Returns 500 Internal Server Error when the short ID space is exhausted.
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let owner_id = user_id_from_headers(&headers)?;

    let link = state.link_service.create_link(payload.url, owner_id).await?;
    let short_url = state.link_service.short_url(&link.short_id);

    tracing::info!(short_id = %link.short_id, owner_id, "short link created");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::from_link(&link, short_url)),
    ))
}

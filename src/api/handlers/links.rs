//! Handler for link deletion.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::handlers::user_id_from_headers;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/links/{short_id}`
///
/// # Ownership
///
/// Owned links may only be deleted by their owner, identified via the
/// `X-User-Id` header. Anonymous links are deletable by anyone.
///
/// # Errors
///
/// Returns 404 Not Found for unknown short IDs.
/// Returns 403 Forbidden when the caller is not the owner.
pub async fn delete_link_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let requester_id = user_id_from_headers(&headers)?;

    state.link_service.delete_link(&short_id, requester_id).await?;

    tracing::info!(short_id, requester_id, "short link deleted");

    Ok(StatusCode::NO_CONTENT)
}

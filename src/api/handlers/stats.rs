//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::stats::{StatsQuery, StatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns aggregated click statistics for a link.
///
/// # Endpoint
///
/// `GET /api/links/{short_id}/stats?since=2026-08-01T00:00:00Z`
///
/// # Query Parameters
///
/// - `since` (optional): only count clicks at or after this RFC 3339 instant
///
/// # Errors
///
/// Returns 404 Not Found for unknown short IDs.
pub async fn stats_handler(
    Path(short_id): Path<String>,
    Query(query): Query<StatsQuery>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let summary = state.stats_service.summarize(&short_id, query.since).await?;

    Ok(Json(summary.into()))
}

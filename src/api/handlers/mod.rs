pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use links::delete_link_handler;
pub use redirect::redirect_handler;
pub use shorten::create_link_handler;
pub use stats::stats_handler;

use axum::http::HeaderMap;
use serde_json::json;

use crate::error::AppError;

/// Header carrying the caller's user ID, set by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracts the authenticated user ID from the request headers.
///
/// Absence means an anonymous caller; a present but non-numeric value is a
/// client error.
pub fn user_id_from_headers(headers: &HeaderMap) -> Result<Option<i64>, AppError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .map(Some)
        .ok_or_else(|| {
            AppError::bad_request(
                "Invalid X-User-Id header",
                json!({ "header": USER_ID_HEADER }),
            )
        })
}

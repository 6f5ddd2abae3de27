//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request body for creating a short link.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Response body for a created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_id: String,
    pub short_url: String,
    pub original_url: String,
}

impl ShortenResponse {
    pub fn from_link(link: &Link, short_url: String) -> Self {
        Self {
            short_id: link.short_id.clone(),
            short_url,
            original_url: link.original_url.clone(),
        }
    }
}

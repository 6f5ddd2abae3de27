//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link.
///
/// `short_id` and `original_url` are immutable once created; edits create a
/// new link rather than mutating this one, preserving analytics history.
/// `click_count` only ever grows, and only through the store's atomic
/// increment.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub short_id: String,
    pub original_url: String,
    /// Owning user, if the link was created by an authenticated user.
    pub owner_id: Option<i64>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_id: String,
        original_url: String,
        owner_id: Option<i64>,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_id,
            original_url,
            owner_id,
            click_count,
            created_at,
        }
    }

    /// Returns true if the link was created anonymously.
    pub fn is_anonymous(&self) -> bool {
        self.owner_id.is_none()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_id: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
}

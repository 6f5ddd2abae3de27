//! Repository trait for click event storage.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for click events.
///
/// Writes come exclusively from the background click worker; reads serve the
/// on-demand analytics aggregation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Records a new click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. The worker logs and
    /// drops these; they never reach a request.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Returns raw click events for a link, newest data included, optionally
    /// bounded below by `since`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn clicks_for_link(
        &self,
        link_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Click>, AppError>;
}

//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The store exclusively owns persisted link state; services hold no state of
/// their own and coordinate entirely through this contract. Short-ID
/// uniqueness under concurrent creation is resolved here (by a storage-level
/// unique constraint), never assumed absent by the generator.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short ID is already taken (the
    /// unique constraint catches races the generator's probe missed).
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its storage key.
    ///
    /// The click worker's staleness check: a queued click whose link has
    /// since been deleted resolves to `None` here and is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Returns whether a short ID is already taken.
    ///
    /// The generator's collision probe. A `false` here is advisory only;
    /// [`Self::create`] remains the arbiter under concurrency.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn short_id_exists(&self, short_id: &str) -> Result<bool, AppError>;

    /// Atomically increments the click counter for a link.
    ///
    /// A single `UPDATE ... SET click_count = click_count + 1`, commutative
    /// under any interleaving of concurrent redirects. Never a
    /// read-then-write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, short_id: &str) -> Result<(), AppError>;

    /// Deletes a link and, by cascade, its click events.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if no link with
    /// that id existed. Ownership checks live in the service layer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lightweight connectivity probe for health checks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] when the
    /// store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}

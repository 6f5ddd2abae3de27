//! Link creation, retrieval, and deletion.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::short_id::{ShortIdConfig, generate_short_id};
use crate::utils::url_validator::validate_url;

/// Service for the link creation path.
///
/// Validates and normalizes the target URL, mints a unique short ID, and
/// registers the mapping. Holds no state of its own; all coordination runs
/// through the repository contract.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    short_id_config: ShortIdConfig,
    allowed_schemes: Vec<String>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// Configuration is passed in explicitly so the service is testable
    /// without ambient state.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        short_id_config: ShortIdConfig,
        allowed_schemes: Vec<String>,
        base_url: String,
    ) -> Self {
        Self {
            link_repository,
            short_id_config,
            allowed_schemes,
            base_url,
        }
    }

    /// Creates a short link for a long URL.
    ///
    /// The URL is validated once, here; resolution never re-validates it.
    /// If the store reports a duplicate short ID despite the generator's own
    /// probe (the race window between probe and insert), generation is
    /// retried exactly once before the condition surfaces as ID-space
    /// exhaustion.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed URLs or disallowed
    /// schemes, [`AppError::Exhausted`] when no free short ID could be found.
    pub async fn create_link(
        &self,
        original_url: String,
        owner_id: Option<i64>,
    ) -> Result<Link, AppError> {
        let normalized_url = validate_url(&original_url, &self.allowed_schemes).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let mut attempts_left = 2;
        loop {
            let short_id = self.generate_unique_short_id().await?;

            let new_link = NewLink {
                short_id,
                original_url: normalized_url.clone(),
                owner_id,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    attempts_left -= 1;
                    if attempts_left == 0 {
                        return Err(AppError::exhausted(
                            "Short ID space exhausted",
                            json!({ "length": self.short_id_config.length }),
                        ));
                    }
                    // Lost the race; regenerate with fresh randomness.
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Retrieves a link by its short ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    pub async fn get_link_by_short_id(&self, short_id: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "short_id": short_id }))
            })
    }

    /// Deletes a link, checking ownership first.
    ///
    /// Anonymous links (no owner) are deletable by anyone; owned links only
    /// by their owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown short IDs and
    /// [`AppError::Forbidden`] when the requester does not match the owner.
    pub async fn delete_link(
        &self,
        short_id: &str,
        requester_id: Option<i64>,
    ) -> Result<(), AppError> {
        let link = self.get_link_by_short_id(short_id).await?;

        if let Some(owner_id) = link.owner_id
            && requester_id != Some(owner_id)
        {
            return Err(AppError::forbidden(
                "Only the link owner may delete it",
                json!({ "short_id": short_id }),
            ));
        }

        self.link_repository.delete(link.id).await?;
        Ok(())
    }

    /// Constructs the full short URL for a short ID.
    pub fn short_url(&self, short_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_id)
    }

    /// Generates a short ID that is free at probe time.
    ///
    /// Retries with fresh randomness up to the configured attempt budget.
    /// Exhaustion is a capacity condition: the caller should widen the ID
    /// length rather than retry.
    ///
    /// Each attempt is an independent store call; no lock is held across
    /// attempts.
    async fn generate_unique_short_id(&self) -> Result<String, AppError> {
        for _ in 0..self.short_id_config.max_attempts {
            let short_id = generate_short_id(&self.short_id_config);

            if !self.link_repository.short_id_exists(&short_id).await? {
                return Ok(short_id);
            }
        }

        Err(AppError::exhausted(
            "Short ID space exhausted",
            json!({
                "length": self.short_id_config.length,
                "attempts": self.short_id_config.max_attempts,
            }),
        ))
    }
}

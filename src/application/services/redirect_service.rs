//! The hot path: short ID in, original URL out.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Request metadata captured at the edge for click recording.
///
/// Everything here is best-effort; absent fields simply classify as unknown
/// downstream.
#[derive(Debug, Default, Clone)]
pub struct RequestMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Resolves short IDs to their original URLs.
///
/// Latency-critical: the store lookup runs under a short deadline, and click
/// recording is handed off to the background worker without waiting. A full
/// click queue never delays or fails the redirect.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
    click_sender: mpsc::Sender<ClickEvent>,
    lookup_timeout: Duration,
}

impl RedirectService {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            link_repository,
            click_sender,
            lookup_timeout,
        }
    }

    /// Resolves a short ID and enqueues a click event for it.
    ///
    /// Returns the original URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown short IDs and
    /// [`AppError::Unavailable`] when the store does not answer within the
    /// lookup deadline. The two are distinct on purpose: a miss is permanent,
    /// a timeout is retryable.
    pub async fn resolve(&self, short_id: &str, meta: RequestMeta) -> Result<String, AppError> {
        let lookup = self.link_repository.find_by_short_id(short_id);

        let link = match timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result?,
            Err(_) => {
                counter!("redirect_lookup_timeouts_total").increment(1);
                tracing::warn!(short_id, timeout_ms = self.lookup_timeout.as_millis() as u64, "store lookup timed out");
                return Err(AppError::unavailable(
                    "Link store did not respond in time",
                    json!({ "short_id": short_id }),
                ));
            }
        };

        let Some(link) = link else {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "short_id": short_id }),
            ));
        };

        let event = ClickEvent::capture(
            link.id,
            link.short_id.clone(),
            meta.ip,
            meta.user_agent.as_deref(),
            meta.referer.as_deref(),
        );

        // Fire and forget. try_send never blocks the redirect; a full queue
        // drops the click, not the response.
        if let Err(e) = self.click_sender.try_send(event) {
            counter!("clicks_dropped_total").increment(1);
            tracing::warn!(short_id = %link.short_id, error = %e, "click queue full, dropping click event");
        }

        Ok(link.original_url)
    }
}

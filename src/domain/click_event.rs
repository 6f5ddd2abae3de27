//! Click event message for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// An in-flight click event passed from the redirect path to the background
/// worker via a bounded channel. This decouples the HTTP response from
/// database writes, allowing fast redirects without blocking.
///
/// Carries both `link_id` (for the click row) and `short_id` (for the atomic
/// counter increment) so the worker never needs a lookup. The timestamp is
/// assigned at capture, when the redirect was served, not when the worker
/// eventually processes the event.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub short_id: String,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn capture(
        link_id: i64,
        short_id: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            short_id,
            clicked_at: Utc::now(),
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

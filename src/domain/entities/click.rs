//! Click entity representing a single recorded redirect.

use chrono::{DateTime, Utc};

use crate::domain::user_agent::{Browser, DeviceType, Os};

/// A click recorded when a shortened link is accessed.
///
/// Created once by the background recorder and never updated; rows are
/// removed only when the owning link is deleted (cascade). Device, OS, and
/// browser are classified at write time and stored, never recomputed later.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    /// Capture time, assigned when the redirect was served, not when the row
    /// was eventually written.
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub device_type: DeviceType,
    pub os: Os,
    pub browser: Browser,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Input data for recording a new click.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub device_type: DeviceType,
    pub os: Os,
    pub browser: Browser,
    pub country: Option<String>,
    pub city: Option<String>,
}

//! DTOs for the per-link statistics endpoint.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::AnalyticsSummary;

/// Query parameters accepted by the statistics endpoint.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Only count clicks at or after this instant (RFC 3339).
    pub since: Option<DateTime<Utc>>,
}

/// Aggregated statistics for one link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_id: String,
    pub total_clicks: i64,
    pub recorded_clicks: i64,
    pub by_device_type: BTreeMap<String, i64>,
    pub by_browser: BTreeMap<String, i64>,
    pub by_country: BTreeMap<String, i64>,
    pub by_day: BTreeMap<NaiveDate, i64>,
}

impl From<AnalyticsSummary> for StatsResponse {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            short_id: summary.short_id,
            total_clicks: summary.total_clicks,
            recorded_clicks: summary.recorded_clicks,
            by_device_type: summary.by_device_type,
            by_browser: summary.by_browser,
            by_country: summary.by_country,
            by_day: summary.by_day,
        }
    }
}

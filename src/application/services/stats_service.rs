//! Per-link analytics aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::AppError;

/// Bucket key for clicks with no geolocation.
const UNKNOWN_COUNTRY: &str = "unknown";

/// Aggregated click statistics for one link.
///
/// `total_clicks` is the atomic counter on the link row and counts every
/// served redirect; `recorded_clicks` counts the click rows that made it
/// through the background worker. The two can drift apart when events are
/// dropped under load, and `recorded_clicks` shrinks under a `since` filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub short_id: String,
    pub total_clicks: i64,
    pub recorded_clicks: i64,
    pub by_device_type: BTreeMap<String, i64>,
    pub by_browser: BTreeMap<String, i64>,
    pub by_country: BTreeMap<String, i64>,
    pub by_day: BTreeMap<NaiveDate, i64>,
}

/// Read-only aggregation over recorded clicks.
///
/// Pure with respect to the store: summarizing never mutates anything, so
/// repeated calls over the same data return the same summary.
pub struct StatsService {
    link_repository: Arc<dyn LinkRepository>,
    stats_repository: Arc<dyn StatsRepository>,
}

impl StatsService {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        stats_repository: Arc<dyn StatsRepository>,
    ) -> Self {
        Self {
            link_repository,
            stats_repository,
        }
    }

    /// Builds the analytics summary for a link, optionally restricted to
    /// clicks at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown short IDs.
    pub async fn summarize(
        &self,
        short_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<AnalyticsSummary, AppError> {
        let link = self
            .link_repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "short_id": short_id }))
            })?;

        let clicks = self.stats_repository.clicks_for_link(link.id, since).await?;

        let mut summary = AnalyticsSummary {
            short_id: link.short_id,
            total_clicks: link.click_count,
            recorded_clicks: clicks.len() as i64,
            by_device_type: BTreeMap::new(),
            by_browser: BTreeMap::new(),
            by_country: BTreeMap::new(),
            by_day: BTreeMap::new(),
        };

        for click in &clicks {
            bump(&mut summary.by_device_type, click.device_type.as_str());
            bump(&mut summary.by_browser, click.browser.as_str());
            bump(
                &mut summary.by_country,
                click.country.as_deref().unwrap_or(UNKNOWN_COUNTRY),
            );
            *summary
                .by_day
                .entry(click.clicked_at.date_naive())
                .or_insert(0) += 1;
        }

        Ok(summary)
    }
}

fn bump(map: &mut BTreeMap<String, i64>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Click, Link};
    use crate::domain::repositories::{MockLinkRepository, MockStatsRepository};
    use crate::domain::user_agent::{Browser, DeviceType, Os};
    use chrono::TimeZone;

    fn test_link(id: i64, short_id: &str, click_count: i64) -> Link {
        Link::new(
            id,
            short_id.to_string(),
            "https://example.com".to_string(),
            None,
            click_count,
            Utc::now(),
        )
    }

    fn test_click(
        link_id: i64,
        clicked_at: DateTime<Utc>,
        device_type: DeviceType,
        browser: Browser,
        country: Option<&str>,
    ) -> Click {
        Click {
            id: 0,
            link_id,
            clicked_at,
            ip: None,
            user_agent: None,
            referer: None,
            device_type,
            os: Os::Unknown,
            browser,
            country: country.map(|s| s.to_string()),
            city: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn service(
        repo: MockLinkRepository,
        stats: MockStatsRepository,
    ) -> StatsService {
        StatsService::new(Arc::new(repo), Arc::new(stats))
    }

    #[tokio::test]
    async fn test_summarize_counts_dimensions() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_short_id()
            .returning(|_| Ok(Some(test_link(3, "abc123", 5))));

        let mut stats = MockStatsRepository::new();
        stats.expect_clicks_for_link().returning(|_, _| {
            Ok(vec![
                test_click(3, day(2026, 8, 20), DeviceType::Desktop, Browser::Chrome, Some("DE")),
                test_click(3, day(2026, 8, 20), DeviceType::Mobile, Browser::Safari, Some("DE")),
                test_click(3, day(2026, 8, 21), DeviceType::Desktop, Browser::Chrome, None),
            ])
        });

        let summary = service(repo, stats).summarize("abc123", None).await.unwrap();

        assert_eq!(summary.short_id, "abc123");
        assert_eq!(summary.total_clicks, 5);
        assert_eq!(summary.recorded_clicks, 3);
        assert_eq!(summary.by_device_type["desktop"], 2);
        assert_eq!(summary.by_device_type["mobile"], 1);
        assert_eq!(summary.by_browser["chrome"], 2);
        assert_eq!(summary.by_browser["safari"], 1);
        assert_eq!(summary.by_country["DE"], 2);
        assert_eq!(summary.by_country["unknown"], 1);
        assert_eq!(summary.by_day[&NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()], 2);
        assert_eq!(summary.by_day[&NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()], 1);
    }

    #[tokio::test]
    async fn test_summarize_empty_history() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_short_id()
            .returning(|_| Ok(Some(test_link(3, "abc123", 0))));

        let mut stats = MockStatsRepository::new();
        stats.expect_clicks_for_link().returning(|_, _| Ok(vec![]));

        let summary = service(repo, stats).summarize("abc123", None).await.unwrap();

        assert_eq!(summary.total_clicks, 0);
        assert_eq!(summary.recorded_clicks, 0);
        assert!(summary.by_device_type.is_empty());
        assert!(summary.by_day.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_is_idempotent() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_short_id()
            .times(2)
            .returning(|_| Ok(Some(test_link(3, "abc123", 2))));

        let mut stats = MockStatsRepository::new();
        stats.expect_clicks_for_link().times(2).returning(|_, _| {
            Ok(vec![
                test_click(3, day(2026, 8, 20), DeviceType::Desktop, Browser::Chrome, Some("US")),
                test_click(3, day(2026, 8, 20), DeviceType::Tablet, Browser::Safari, Some("US")),
            ])
        });

        let service = service(repo, stats);
        let first = service.summarize("abc123", None).await.unwrap();
        let second = service.summarize("abc123", None).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_summarize_passes_since_through() {
        let since = day(2026, 8, 1);

        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_short_id()
            .returning(|_| Ok(Some(test_link(3, "abc123", 1))));

        let mut stats = MockStatsRepository::new();
        stats
            .expect_clicks_for_link()
            .withf(move |&link_id, &s| link_id == 3 && s == Some(since))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let result = service(repo, stats).summarize("abc123", Some(since)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_summarize_unknown_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_short_id().returning(|_| Ok(None));

        let stats = MockStatsRepository::new();

        let result = service(repo, stats).summarize("nosuch", None).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}

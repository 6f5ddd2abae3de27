//! PostgreSQL implementation of the click event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::StatsRepository;
use crate::domain::user_agent::{Browser, DeviceType, Os};
use crate::error::AppError;

/// PostgreSQL repository for click events.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    ip: Option<String>,
    user_agent: Option<String>,
    referer: Option<String>,
    device_type: String,
    os: String,
    browser: String,
    country: Option<String>,
    city: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click {
            id: r.id,
            link_id: r.link_id,
            clicked_at: r.clicked_at,
            ip: r.ip,
            user_agent: r.user_agent,
            referer: r.referer,
            device_type: DeviceType::from_str_lossy(&r.device_type),
            os: Os::from_str_lossy(&r.os),
            browser: Browser::from_str_lossy(&r.browser),
            country: r.country,
            city: r.city,
        }
    }
}

const CLICK_COLUMNS: &str =
    "id, link_id, clicked_at, ip, user_agent, referer, device_type, os, browser, country, city";

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row: ClickRow = sqlx::query_as(&format!(
            "INSERT INTO link_clicks
                 (link_id, clicked_at, ip, user_agent, referer,
                  device_type, os, browser, country, city)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {CLICK_COLUMNS}"
        ))
        .bind(new_click.link_id)
        .bind(new_click.clicked_at)
        .bind(&new_click.ip)
        .bind(&new_click.user_agent)
        .bind(&new_click.referer)
        .bind(new_click.device_type.as_str())
        .bind(new_click.os.as_str())
        .bind(new_click.browser.as_str())
        .bind(&new_click.country)
        .bind(&new_click.city)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn clicks_for_link(
        &self,
        link_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Click>, AppError> {
        let rows: Vec<ClickRow> = sqlx::query_as(&format!(
            "SELECT {CLICK_COLUMNS}
             FROM link_clicks
             WHERE link_id = $1
               AND ($2::timestamptz IS NULL OR clicked_at >= $2)
             ORDER BY clicked_at"
        ))
        .bind(link_id)
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

//! Background click recorder.
//!
//! Consumes click events from the bounded channel the redirect path feeds,
//! classifies the user agent, looks up approximate geography, persists the
//! click, and bumps the link's atomic counter.
//!
//! Click accounting is best-effort, not an exactly-once ledger: every failure
//! here is logged, counted, and dropped. Nothing is retried and nothing
//! propagates back to a request that has long since been answered. Events
//! already in the queue are processed even if the client that caused them has
//! disconnected. Events whose link was deleted while they sat in the queue
//! are dropped without recording; their click rows would cascade away with
//! the link anyway.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::domain::user_agent::{self, UserAgentInfo};
use crate::infrastructure::geo::GeoLocator;

/// Runs until the channel closes.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    stats_repository: Arc<dyn StatsRepository>,
    link_repository: Arc<dyn LinkRepository>,
    geo: Arc<dyn GeoLocator>,
) {
    while let Some(event) = rx.recv().await {
        process_event(event, stats_repository.as_ref(), link_repository.as_ref(), geo.as_ref())
            .await;
    }
}

async fn process_event(
    event: ClickEvent,
    stats_repository: &dyn StatsRepository,
    link_repository: &dyn LinkRepository,
    geo: &dyn GeoLocator,
) {
    // The link can vanish between the redirect and this write; a click for a
    // deleted link has nowhere to hang (the foreign key would reject it).
    match link_repository.find_by_id(event.link_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            counter!("clicks_stale_total").increment(1);
            tracing::debug!(short_id = %event.short_id, "link deleted before click was recorded, dropping");
            return;
        }
        Err(e) => {
            counter!("clicks_failed_total").increment(1);
            warn!(short_id = %event.short_id, error = %e, "Failed to look up link for click");
            return;
        }
    }

    let ua_info = event
        .user_agent
        .as_deref()
        .map(user_agent::classify)
        .unwrap_or(UserAgentInfo::UNKNOWN);

    let location = match event.ip.as_deref() {
        Some(ip) => geo.locate(ip).await,
        None => None,
    };

    let new_click = NewClick {
        link_id: event.link_id,
        clicked_at: event.clicked_at,
        ip: event.ip,
        user_agent: event.user_agent,
        referer: event.referer,
        device_type: ua_info.device_type,
        os: ua_info.os,
        browser: ua_info.browser,
        country: location.as_ref().and_then(|l| l.country.clone()),
        city: location.and_then(|l| l.city),
    };

    if let Err(e) = stats_repository.record_click(new_click).await {
        counter!("clicks_failed_total").increment(1);
        warn!(short_id = %event.short_id, error = %e, "Failed to record click");
        return;
    }

    if let Err(e) = link_repository.increment_clicks(&event.short_id).await {
        counter!("clicks_failed_total").increment(1);
        warn!(short_id = %event.short_id, error = %e, "Failed to increment click count");
        return;
    }

    counter!("clicks_recorded_total").increment(1);
}

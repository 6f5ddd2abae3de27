//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Handler-facing view of the application.
///
/// Clone is cheap; everything inside is behind an `Arc`. Handlers reach
/// services, never repositories, except the health check which pings the
/// store directly.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        redirect_service: Arc<RedirectService>,
        stats_service: Arc<StatsService>,
        link_repository: Arc<dyn LinkRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            link_service,
            redirect_service,
            stats_service,
            link_repository,
            click_sender,
        }
    }
}

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;

use minilink::application::services::{LinkService, RedirectService, StatsService};
use minilink::domain::click_event::ClickEvent;
use minilink::domain::entities::{Click, Link, NewClick, NewLink};
use minilink::domain::repositories::{LinkRepository, StatsRepository};
use minilink::error::AppError;
use minilink::state::AppState;
use minilink::utils::short_id::ShortIdConfig;

/// In-memory link store with the same contract as the Postgres-backed one,
/// including the unique constraint on short IDs.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn find_link(&self, short_id: &str) -> Option<Link> {
        self.links.lock().unwrap().get(short_id).cloned()
    }

    pub fn click_count(&self, short_id: &str) -> Option<i64> {
        self.links
            .lock()
            .unwrap()
            .get(short_id)
            .map(|link| link.click_count)
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.contains_key(&new_link.short_id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "short_id": new_link.short_id }),
            ));
        }

        let link = Link::new(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            new_link.short_id.clone(),
            new_link.original_url,
            new_link.owner_id,
            0,
            Utc::now(),
        );
        links.insert(new_link.short_id, link.clone());
        Ok(link)
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.lock().unwrap().get(short_id).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .values()
            .find(|link| link.id == id)
            .cloned())
    }

    async fn short_id_exists(&self, short_id: &str) -> Result<bool, AppError> {
        Ok(self.links.lock().unwrap().contains_key(short_id))
    }

    async fn increment_clicks(&self, short_id: &str) -> Result<(), AppError> {
        if let Some(link) = self.links.lock().unwrap().get_mut(short_id) {
            link.click_count += 1;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let key = links
            .iter()
            .find(|(_, link)| link.id == id)
            .map(|(key, _)| key.clone());

        match key {
            Some(key) => {
                links.remove(&key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory click store.
#[derive(Default)]
pub struct InMemoryStatsRepository {
    clicks: Mutex<Vec<Click>>,
    next_id: AtomicI64,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self {
            clicks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn recorded_count(&self) -> usize {
        self.clicks.lock().unwrap().len()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let click = Click {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            link_id: new_click.link_id,
            clicked_at: new_click.clicked_at,
            ip: new_click.ip,
            user_agent: new_click.user_agent,
            referer: new_click.referer,
            device_type: new_click.device_type,
            os: new_click.os,
            browser: new_click.browser,
            country: new_click.country,
            city: new_click.city,
        };
        self.clicks.lock().unwrap().push(click.clone());
        Ok(click)
    }

    async fn clicks_for_link(
        &self,
        link_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Click>, AppError> {
        let mut clicks: Vec<Click> = self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|click| click.link_id == link_id)
            .filter(|click| since.is_none_or(|s| click.clicked_at >= s))
            .cloned()
            .collect();
        clicks.sort_by_key(|click| click.clicked_at);
        Ok(clicks)
    }
}

/// Everything a handler test needs, wired over the in-memory stores.
pub struct TestApp {
    pub state: AppState,
    pub click_rx: mpsc::Receiver<ClickEvent>,
    pub links: Arc<InMemoryLinkRepository>,
    pub stats: Arc<InMemoryStatsRepository>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(ShortIdConfig::default(), 64)
}

pub fn create_test_app_with(short_id_config: ShortIdConfig, queue_capacity: usize) -> TestApp {
    let links = Arc::new(InMemoryLinkRepository::new());
    let stats = Arc::new(InMemoryStatsRepository::new());
    let (click_tx, click_rx) = mpsc::channel(queue_capacity);

    let link_repository: Arc<dyn LinkRepository> = links.clone();
    let stats_repository: Arc<dyn StatsRepository> = stats.clone();

    let link_service = Arc::new(LinkService::new(
        link_repository.clone(),
        short_id_config,
        vec!["http".to_string(), "https".to_string()],
        "https://sho.rt".to_string(),
    ));
    let redirect_service = Arc::new(RedirectService::new(
        link_repository.clone(),
        click_tx.clone(),
        Duration::from_millis(200),
    ));
    let stats_service = Arc::new(StatsService::new(link_repository.clone(), stats_repository));

    let state = AppState::new(
        link_service,
        redirect_service,
        stats_service,
        link_repository,
        click_tx,
    );

    TestApp {
        state,
        click_rx,
        links,
        stats,
    }
}

pub async fn create_test_link(
    repo: &InMemoryLinkRepository,
    short_id: &str,
    url: &str,
    owner_id: Option<i64>,
) -> Link {
    repo.create(NewLink {
        short_id: short_id.to_string(),
        original_url: url.to_string(),
        owner_id,
    })
    .await
    .unwrap()
}

pub async fn record_test_click(repo: &InMemoryStatsRepository, new_click: NewClick) -> Click {
    repo.record_click(new_click).await.unwrap()
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// the mock transport.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "203.0.113.10:44000".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

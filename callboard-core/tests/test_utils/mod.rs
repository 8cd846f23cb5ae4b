// File: callboard-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::{mpsc, Notify};
use tower::ServiceExt;

use callboard_common::models::analytics::PricingViewEvent;
use callboard_common::traits::{campaign_traits::CampaignRunner, repository_traits::AnalyticsRepo};
use callboard_core::api::{self, AppState};
use callboard_core::config::LocaleConfig;
use callboard_core::services::{AnalyticsService, CampaignService, LocaleService};
use callboard_core::{Database, Error};

/// Analytics store kept in memory. With `fail` set, every insert errors
/// without storing anything.
#[derive(Clone, Default)]
pub struct InMemoryAnalyticsRepo {
    pub events: Arc<Mutex<Vec<PricingViewEvent>>>,
    pub fail: bool,
}

impl InMemoryAnalyticsRepo {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn stored(&self) -> Vec<PricingViewEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsRepo for InMemoryAnalyticsRepo {
    async fn insert_pricing_view(&self, event: &PricingViewEvent) -> Result<(), Error> {
        if self.fail {
            return Err(Error::Parse("connection reset by peer".into()));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Analytics store whose insert panics, standing in for a collaborator bug.
pub struct PanickingAnalyticsRepo;

#[async_trait]
impl AnalyticsRepo for PanickingAnalyticsRepo {
    async fn insert_pricing_view(&self, _event: &PricingViewEvent) -> Result<(), Error> {
        panic!("analytics store exploded");
    }
}

/// Campaign runner that panics as soon as it is started.
pub struct PanickingRunner;

#[async_trait]
impl CampaignRunner for PanickingRunner {
    async fn start_campaign(&self, campaign_id: &str) -> Result<(), Error> {
        panic!("runner exploded on {}", campaign_id);
    }
}

/// Campaign runner that reports each start on a channel, then blocks until
/// `gate` is notified.
pub struct GatedRunner {
    started: mpsc::UnboundedSender<String>,
    gate: Arc<Notify>,
}

impl GatedRunner {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>, Arc<Notify>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let gate = Arc::new(Notify::new());
        (Self { started: tx, gate: gate.clone() }, rx, gate)
    }
}

#[async_trait]
impl CampaignRunner for GatedRunner {
    async fn start_campaign(&self, campaign_id: &str) -> Result<(), Error> {
        let _ = self.started.send(campaign_id.to_string());
        self.gate.notified().await;
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: InMemoryAnalyticsRepo,
    pub started: mpsc::UnboundedReceiver<String>,
    pub gate: Arc<Notify>,
}

pub fn build_app_with_repo(repo: InMemoryAnalyticsRepo) -> TestApp {
    let (runner, started, gate) = GatedRunner::new();
    let state = AppState::new(
        AnalyticsService::new(Arc::new(repo.clone())),
        CampaignService::new(Arc::new(runner)),
        LocaleService::new(LocaleConfig::default()),
    );
    TestApp { router: api::router(state), repo, started, gate }
}

/// Router over arbitrary collaborators, with the default locale config.
pub fn build_router(repo: Arc<dyn AnalyticsRepo>, runner: Arc<dyn CampaignRunner>) -> Router {
    api::router(AppState::new(
        AnalyticsService::new(repo),
        CampaignService::new(runner),
        LocaleService::new(LocaleConfig::default()),
    ))
}

pub fn build_app() -> TestApp {
    build_app_with_repo(InMemoryAnalyticsRepo::default())
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request through the router and split the reply.
pub async fn send(router: &Router, req: Request<Body>) -> (Response<()>, Value) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let (parts, body) = resp.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (Response::from_parts(parts, ()), json)
}

/// Pool to the test DB from `TEST_DATABASE_URL`, migrated and emptied.
pub async fn setup_test_database() -> Result<Database, Error> {
    let url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://callboard@localhost/callboard_test".to_string());
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    let db = Database::from_pool(pool);
    db.migrate().await?;
    sqlx::query("TRUNCATE TABLE analytics_events").execute(db.pool()).await?;
    Ok(db)
}

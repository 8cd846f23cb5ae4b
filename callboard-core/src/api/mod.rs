//! HTTP surface: routes, shared handler state and JSON replies.

pub mod analytics;
pub mod campaign;
pub mod health;
pub mod locale;
pub mod response;

use std::sync::Arc;
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::services::{AnalyticsService, CampaignService, LocaleService};

pub use response::ApiError;
use response::{campaign_error_on_panic, server_error_on_panic};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<AnalyticsService>,
    pub campaigns: Arc<CampaignService>,
    pub locale: Arc<LocaleService>,
}

impl AppState {
    pub fn new(
        analytics: AnalyticsService,
        campaigns: CampaignService,
        locale: LocaleService,
    ) -> Self {
        Self {
            analytics: Arc::new(analytics),
            campaigns: Arc::new(campaigns),
            locale: Arc::new(locale),
        }
    }
}

/// A panic inside a handler or one of its collaborators is answered with the
/// route's JSON 500. The campaign route has its own body; everything else
/// gets `{ok:false, error:"server_error"}`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::handle_health))
        .route("/api/analytics/pricing-view", post(analytics::handle_pricing_view))
        .route(
            "/api/campaign/start",
            post(campaign::handle_campaign_start)
                .layer(CatchPanicLayer::custom(campaign_error_on_panic)),
        )
        .route(
            "/api/locale",
            get(locale::handle_get_locale).post(locale::handle_set_locale),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(server_error_on_panic)),
        )
}

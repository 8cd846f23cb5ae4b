use std::sync::Arc;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};
use callboard_common::{
    models::analytics::{EventMetadata, PricingViewEvent},
    traits::repository_traits::AnalyticsRepo,
};

/// Validated body of a pricing view request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingViewInput {
    pub country: String,
    pub plan_viewed: String,
    pub session_id: Option<String>,
    pub organization_id: Option<String>,
}

impl PricingViewInput {
    /// `country` and `plan_viewed` must be non-empty strings. Anything else
    /// (absent, null, "", a number...) counts as missing.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        Some(Self {
            country: non_empty_str(payload, "country")?,
            plan_viewed: non_empty_str(payload, "plan_viewed")?,
            session_id: non_empty_str(payload, "session_id"),
            organization_id: non_empty_str(payload, "organization_id"),
        })
    }
}

fn non_empty_str(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Request headers copied into the event metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

pub struct AnalyticsService {
    repo: Arc<dyn AnalyticsRepo>,
}

impl AnalyticsService {
    pub fn new(repo: Arc<dyn AnalyticsRepo>) -> Self {
        Self { repo }
    }

    /// Build the event and write it once. The insert is best effort: a
    /// failed write is logged and the event is still returned.
    pub async fn record_pricing_view(
        &self,
        input: PricingViewInput,
        meta: RequestMeta,
    ) -> PricingViewEvent {
        let metadata = EventMetadata::new(meta.user_agent, meta.referer, Utc::now());
        let event = PricingViewEvent::new(
            input.country,
            input.plan_viewed,
            input.session_id,
            input.organization_id,
            metadata,
        );

        match self.repo.insert_pricing_view(&event).await {
            Ok(()) => debug!(
                "Recorded pricing view {} (country={}, plan={})",
                event.event_id, event.country, event.plan_viewed
            ),
            Err(e) => warn!("Dropping pricing view {}: insert failed: {}", event.event_id, e),
        }

        event
    }
}

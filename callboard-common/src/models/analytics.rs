use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Every row written by the pricing-page ingestion carries this event type.
pub const PRICING_VIEW_EVENT_TYPE: &str = "pricing_view";

/// Request metadata captured at ingestion time.
/// Stored as JSONB next to the event row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    /// RFC 3339 / ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
}

impl EventMetadata {
    pub fn new(user_agent: Option<String>, referer: Option<String>, at: DateTime<Utc>) -> Self {
        Self {
            user_agent,
            referer,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// A single pricing page view. Append-only; never updated once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingViewEvent {
    pub event_id: Uuid,
    pub event_type: String,
    pub country: String,
    pub plan_viewed: String,
    pub session_id: Option<String>,
    pub organization_id: Option<String>,
    pub metadata: EventMetadata,
}

impl PricingViewEvent {
    pub fn new(
        country: String,
        plan_viewed: String,
        session_id: Option<String>,
        organization_id: Option<String>,
        metadata: EventMetadata,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: PRICING_VIEW_EVENT_TYPE.to_string(),
            country,
            plan_viewed,
            session_id,
            organization_id,
            metadata,
        }
    }
}

/// Row shape of `analytics_events` when read back.
#[derive(Clone, Debug, FromRow)]
pub struct AnalyticsEventRow {
    pub event_id: Uuid,
    pub event_type: String,
    pub country: String,
    pub plan_viewed: String,
    pub session_id: Option<String>,
    pub organization_id: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

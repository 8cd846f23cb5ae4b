use async_trait::async_trait;
use crate::error::Error;
use crate::models::analytics::PricingViewEvent;

/// Write side of the analytics store.
#[async_trait]
pub trait AnalyticsRepo: Send + Sync {
    /// Append a single pricing view event.
    async fn insert_pricing_view(&self, event: &PricingViewEvent) -> Result<(), Error>;
}

use async_trait::async_trait;
use crate::error::Error;

/// The external service that actually places the calls of a campaign.
///
/// Implementations must be safe to share across concurrent requests; callers
/// never wait on the outcome from a request context.
#[async_trait]
pub trait CampaignRunner: Send + Sync {
    async fn start_campaign(&self, campaign_id: &str) -> Result<(), Error>;
}

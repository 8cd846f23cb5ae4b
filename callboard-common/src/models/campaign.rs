use serde::{Deserialize, Serialize};

/// Admission value for a campaign start. Never persisted here; campaign
/// state belongs to the external runner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignTrigger {
    pub campaign_id: String,
}

impl CampaignTrigger {
    pub fn new(campaign_id: impl Into<String>) -> Self {
        Self { campaign_id: campaign_id.into() }
    }
}

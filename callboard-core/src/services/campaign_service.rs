use std::sync::Arc;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};
use callboard_common::{
    models::campaign::CampaignTrigger,
    traits::campaign_traits::CampaignRunner,
};

/// Pull `campaign_id` out of a request body. Non-empty strings and non-zero
/// integers are accepted; anything else (floats included) is treated as absent.
pub fn campaign_trigger_from_payload(payload: &Value) -> Option<CampaignTrigger> {
    match payload.get("campaign_id")? {
        Value::String(s) if !s.is_empty() => Some(CampaignTrigger::new(s.clone())),
        Value::Number(n) if (n.is_i64() || n.is_u64()) && n.as_f64() != Some(0.0) => {
            Some(CampaignTrigger::new(n.to_string()))
        }
        _ => None,
    }
}

/// Admits campaign starts and hands them to the runner in the background.
pub struct CampaignService {
    runner: Arc<dyn CampaignRunner>,
}

impl CampaignService {
    pub fn new(runner: Arc<dyn CampaignRunner>) -> Self {
        Self { runner }
    }

    /// Start the campaign on a detached task and return immediately.
    ///
    /// The outcome only reaches the log. No cancellation or timeout is
    /// applied; the handle is returned for callers that want to wait
    /// (tests, shutdown), request handlers drop it.
    pub fn dispatch(&self, trigger: CampaignTrigger) -> JoinHandle<()> {
        let runner = self.runner.clone();
        info!("Dispatching campaign {}", trigger.campaign_id);

        tokio::spawn(async move {
            match runner.start_campaign(&trigger.campaign_id).await {
                Ok(()) => info!("Campaign {} started successfully", trigger.campaign_id),
                Err(e) => error!("Campaign {} failed to start: {}", trigger.campaign_id, e),
            }
        })
    }
}

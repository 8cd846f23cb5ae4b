//! HTTP-backed [`CampaignRunner`]: asks the external calling service to start
//! a campaign by POSTing to `<base>/campaigns/<id>/start`.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use url::Url;
use callboard_common::{error::Error, traits::campaign_traits::CampaignRunner};
use crate::http::HttpClient;

pub struct HttpCampaignRunner<C: HttpClient> {
    client: C,
    base_url: Url,
}

impl<C: HttpClient> HttpCampaignRunner<C> {
    pub fn new(client: C, base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid campaign runner url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("campaign runner url '{}' cannot be a base", base_url)));
        }
        Ok(Self { client, base_url })
    }

    /// Each path segment is percent-encoded, so ids containing `/` or `?`
    /// stay inside their segment.
    pub fn start_url(&self, campaign_id: &str) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::CampaignRunner("runner url cannot be a base".into()))?
            .pop_if_empty()
            .extend(["campaigns", campaign_id, "start"]);
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> CampaignRunner for HttpCampaignRunner<C> {
    async fn start_campaign(&self, campaign_id: &str) -> Result<(), Error> {
        let url = self.start_url(campaign_id)?;
        debug!("POST {}", url);
        self.client
            .post_json(url.to_string(), json!({ "campaign_id": campaign_id }))
            .await
            .map_err(|e| Error::CampaignRunner(e.to_string()))?;
        Ok(())
    }
}

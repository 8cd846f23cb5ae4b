pub mod analytics_service;
pub mod campaign_runner;
pub mod campaign_service;
pub mod locale_service;

pub use analytics_service::{AnalyticsService, PricingViewInput, RequestMeta};
pub use campaign_runner::HttpCampaignRunner;
pub use campaign_service::CampaignService;
pub use locale_service::LocaleService;

// File: callboard-common/src/models/mod.rs
pub mod analytics;
pub mod campaign;
pub mod locale;

pub use analytics::{EventMetadata, PricingViewEvent, PRICING_VIEW_EVENT_TYPE};
pub use campaign::CampaignTrigger;
pub use locale::LocaleSelection;

pub mod repository_traits;
pub mod campaign_traits;

pub mod event;
pub mod stats;

pub use event::{ClickEvent, ClickPayload, ConversionEvent, ConversionPayload};
pub use stats::CampaignStats;

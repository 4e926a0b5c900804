use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A click on one of a campaign's ads.
#[derive(Debug, Clone, Serialize)]
pub struct ClickEvent {
    pub campaign_id: String,
    pub user_id: String,
    /// Stamped on receipt, never taken from the caller
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub ad_id: Option<String>,
}

/// A purchase or other goal completion attributed to a campaign.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionEvent {
    pub campaign_id: String,
    pub user_id: String,
    /// Stamped on receipt, never taken from the caller
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub product: Option<String>,
}

impl ClickEvent {
    pub fn new(campaign_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            source: None,
            ad_id: None,
        }
    }
}

impl ConversionEvent {
    pub fn new(campaign_id: impl Into<String>, user_id: impl Into<String>, amount: f64) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            amount,
            product: None,
        }
    }
}

/// Body of `POST /api/click`
///
/// Any `timestamp` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct ClickPayload {
    pub campaign_id: String,
    pub user_id: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub ad_id: Option<String>,
}

/// Body of `POST /api/conversion`
#[derive(Debug, Deserialize)]
pub struct ConversionPayload {
    pub campaign_id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(default)]
    pub product: Option<String>,
}

impl ClickPayload {
    /// Turn the decoded payload into an event stamped with the receive time.
    pub fn into_event(self) -> ClickEvent {
        ClickEvent {
            campaign_id: self.campaign_id,
            user_id: self.user_id,
            timestamp: Utc::now(),
            source: self.source,
            ad_id: self.ad_id,
        }
    }
}

impl ConversionPayload {
    pub fn into_event(self) -> ConversionEvent {
        ConversionEvent {
            campaign_id: self.campaign_id,
            user_id: self.user_id,
            timestamp: Utc::now(),
            amount: self.amount,
            product: self.product,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Running totals for one campaign.
///
/// Counters only ever grow. The unique-user set is kept up to date but is
/// not part of the JSON representation.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignStats {
    pub campaign_id: String,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub total_revenue: f64,
    /// Conversions as a percentage of clicks
    pub conversion_rate: f64,
    pub last_updated: DateTime<Utc>,
    #[serde(skip)]
    unique_users: HashSet<String>,
}

impl CampaignStats {
    /// Zero-valued record for a campaign seen for the first time
    pub fn new(campaign_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            total_clicks: 0,
            total_conversions: 0,
            total_revenue: 0.0,
            conversion_rate: 0.0,
            last_updated: Utc::now(),
            unique_users: HashSet::new(),
        }
    }

    pub fn record_click(&mut self, user_id: &str) {
        self.total_clicks += 1;
        self.add_user(user_id);
        self.touch();
    }

    /// Count a conversion. `amount` is `None` for conversions that should
    /// not contribute revenue.
    pub fn record_conversion(&mut self, user_id: &str, amount: Option<f64>) {
        self.total_conversions += 1;
        if let Some(amount) = amount {
            self.total_revenue += amount;
        }
        self.add_user(user_id);
        self.touch();
    }

    /// Mark the campaign as updated without changing any counter
    pub fn record_seen(&mut self) {
        self.touch();
    }

    /// Number of distinct users that clicked or converted
    pub fn unique_user_count(&self) -> usize {
        self.unique_users.len()
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.unique_users.contains(user_id)
    }

    pub fn unique_users(&self) -> impl Iterator<Item = &str> {
        self.unique_users.iter().map(String::as_str)
    }

    fn add_user(&mut self, user_id: &str) {
        if !self.unique_users.contains(user_id) {
            self.unique_users.insert(user_id.to_string());
        }
    }

    /// Recompute the rate and bump `last_updated`.
    ///
    /// With zero clicks the previous rate is kept, so a conversion that
    /// arrives before any click leaves it at 0 instead of dividing by zero.
    fn touch(&mut self) {
        if self.total_clicks > 0 {
            self.conversion_rate =
                100.0 * self.total_conversions as f64 / self.total_clicks as f64;
        }
        self.last_updated = Utc::now();
    }
}

//! Read-only lookups over the stats store

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::CampaignStats;
use crate::store::StatsStore;

#[derive(Debug)]
pub enum QueryOutcome {
    Campaign(CampaignStats),
    All(HashMap<String, CampaignStats>),
    NotFound,
}

#[derive(Clone)]
pub struct StatsQuery {
    store: Arc<StatsStore>,
}

impl StatsQuery {
    pub fn new(store: Arc<StatsStore>) -> Self {
        Self { store }
    }

    /// Look up one campaign, or every campaign when no id (or an empty
    /// id) is given.
    pub async fn query(&self, campaign_id: Option<&str>) -> QueryOutcome {
        match campaign_id.filter(|id| !id.is_empty()) {
            Some(id) => match self.store.read_one(id).await {
                Some(stats) => QueryOutcome::Campaign(stats),
                None => QueryOutcome::NotFound,
            },
            None => QueryOutcome::All(self.store.read_all().await),
        }
    }

    pub async fn campaign_count(&self) -> usize {
        self.store.len().await
    }
}

//! In-memory campaign statistics store
//!
//! One reader/writer lock guards the whole campaign map. Writers hold the
//! exclusive lock for the full find-or-insert plus mutation, so two
//! concurrent events for an unseen campaign can never create two records
//! or lose an increment. Queries take the shared lock and clone what they
//! return.

use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::models::CampaignStats;

#[derive(Debug, Default)]
pub struct StatsStore {
    campaigns: RwLock<HashMap<String, CampaignStats>>,
}

/// Exclusive handle on the store, held for one read-modify-write sequence
pub struct StoreWriter<'a> {
    guard: RwLockWriteGuard<'a, HashMap<String, CampaignStats>>,
}

impl StoreWriter<'_> {
    /// Return the campaign's record, inserting a zero-valued one first if
    /// the campaign has never been seen.
    pub fn get_or_create(&mut self, campaign_id: &str) -> &mut CampaignStats {
        self.guard
            .entry(campaign_id.to_string())
            .or_insert_with(|| CampaignStats::new(campaign_id))
    }
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock.
    pub async fn write(&self) -> StoreWriter<'_> {
        StoreWriter {
            guard: self.campaigns.write().await,
        }
    }

    /// Find-or-insert `campaign_id` and apply `f` to it, all under one
    /// write lock.
    pub async fn update<F, R>(&self, campaign_id: &str, f: F) -> R
    where
        F: FnOnce(&mut CampaignStats) -> R,
    {
        let mut writer = self.write().await;
        f(writer.get_or_create(campaign_id))
    }

    /// Point-in-time copy of every campaign
    pub async fn read_all(&self) -> HashMap<String, CampaignStats> {
        self.campaigns.read().await.clone()
    }

    pub async fn read_one(&self, campaign_id: &str) -> Option<CampaignStats> {
        self.campaigns.read().await.get(campaign_id).cloned()
    }

    /// Number of campaigns seen so far
    pub async fn len(&self) -> usize {
        self.campaigns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.campaigns.read().await.is_empty()
    }
}

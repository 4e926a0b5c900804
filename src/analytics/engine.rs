//! Aggregation engine
//!
//! Folds click and conversion events into the shared [`StatsStore`]. Every
//! apply runs inside a single write-lock critical section, so an event is
//! either fully reflected in its campaign's totals or not at all.

use std::sync::Arc;
use tracing::trace;

use crate::ingest::parser::{parse_line, HistoricalEvent};
use crate::models::{ClickEvent, ConversionEvent};
use crate::store::StatsStore;

#[derive(Clone)]
pub struct AggregationEngine {
    store: Arc<StatsStore>,
}

impl AggregationEngine {
    pub fn new(store: Arc<StatsStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<StatsStore> {
        &self.store
    }

    pub async fn apply_click(&self, event: &ClickEvent) {
        trace!(campaign_id = %event.campaign_id, "Applying click");
        self.store
            .update(&event.campaign_id, |stats| stats.record_click(&event.user_id))
            .await;
    }

    pub async fn apply_conversion(&self, event: &ConversionEvent) {
        trace!(campaign_id = %event.campaign_id, amount = event.amount, "Applying conversion");
        self.store
            .update(&event.campaign_id, |stats| {
                stats.record_conversion(&event.user_id, Some(event.amount))
            })
            .await;
    }

    /// Decode a historical log line and apply it.
    ///
    /// Any line with at least three fields get-or-creates its campaign,
    /// even when it changes no counter. Returns whether a counter changed.
    /// Historical conversions do not add revenue.
    pub async fn apply_historical_line(&self, line: &str) -> bool {
        let Some(event) = parse_line(line) else {
            return false;
        };
        trace!(campaign_id = event.campaign_id(), "Applying historical line");

        let counted = event.is_counted();
        self.apply_historical(event).await;
        counted
    }

    async fn apply_historical(&self, event: HistoricalEvent<'_>) {
        match event {
            HistoricalEvent::Click {
                campaign_id,
                user_id,
            } => {
                self.store
                    .update(campaign_id, |stats| stats.record_click(user_id))
                    .await;
            }
            HistoricalEvent::Conversion {
                campaign_id,
                user_id,
            } => {
                self.store
                    .update(campaign_id, |stats| stats.record_conversion(user_id, None))
                    .await;
            }
            HistoricalEvent::Seen { campaign_id } => {
                self.store
                    .update(campaign_id, |stats| stats.record_seen())
                    .await;
            }
        }
    }
}

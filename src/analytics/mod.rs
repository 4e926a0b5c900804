//! Campaign analytics
//!
//! The aggregation engine applies click and conversion events to the
//! stats store; the query side reads it back for the API and dashboard.

pub mod engine;
pub mod query;

pub use engine::AggregationEngine;
pub use query::{QueryOutcome, StatsQuery};

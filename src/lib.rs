pub mod analytics;
pub mod api;
pub mod config;
pub mod ingest;
pub mod models;
pub mod store;

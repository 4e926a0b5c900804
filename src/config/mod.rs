use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ingest: IngestConfig,
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Historical log file read once at startup
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Path to directory containing the dashboard files
    /// If None, uses the embedded dashboard
    pub static_dir: Option<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl IngestConfig {
    const DEFAULT_DATA_FILE: &'static str = "./data/sample_logs.txt";
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = non_empty_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = non_empty_var("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let data_file = non_empty_var("DATA_FILE")
            .unwrap_or_else(|| IngestConfig::DEFAULT_DATA_FILE.to_string());

        let frontend_static_dir = non_empty_var("FRONTEND_STATIC_DIR");

        Ok(Config {
            server: ServerConfig { host, port },
            ingest: IngestConfig {
                data_file: PathBuf::from(data_file),
            },
            frontend: FrontendConfig {
                static_dir: frontend_static_dir,
            },
        })
    }
}

/// Unset and empty variables both fall back to the default
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

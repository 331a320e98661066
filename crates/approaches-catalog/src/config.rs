use std::time::Duration;

use crate::error::AppError;
use handbook_common::fetch::CatalogSource;

/// Location the handbook page fetches its catalog from.
const DEFAULT_CATALOG: &str = "assets/data/approaches.json";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog file path or HTTP(S) URL.
    pub catalog: CatalogSource,
    /// Upper bound on a catalog fetch over HTTP.
    pub fetch_timeout: Duration,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `HANDBOOK_CATALOG`: catalog path or URL (default: "assets/data/approaches.json")
    /// - `HANDBOOK_FETCH_TIMEOUT_SECS`: positive integer (default: 30)
    /// - `MCP_TCP_LISTEN_ADDR`: e.g. "127.0.0.1:7311"
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let catalog = lookup("HANDBOOK_CATALOG")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG.to_string());

        let fetch_timeout = match lookup("HANDBOOK_FETCH_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&n| n > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "HANDBOOK_FETCH_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    ))
                })?,
        };

        let tcp_listen_addr = lookup("MCP_TCP_LISTEN_ADDR").filter(|s| !s.trim().is_empty());

        Ok(Self {
            catalog: CatalogSource::parse(&catalog),
            fetch_timeout,
            tcp_listen_addr,
        })
    }
}

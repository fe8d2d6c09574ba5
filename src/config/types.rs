use serde::Deserialize;

/// Main configuration structure for Termtally
///
/// Fixed for the lifetime of the process once the engine is constructed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub server: ServerConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of link hops to follow from a seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Per-request fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Number of concurrent fetch slots in the worker pool
    #[serde(rename = "worker-pool-size")]
    pub worker_pool_size: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            fetch_timeout_secs: 10,
            worker_pool_size: 10,
        }
    }
}

/// Web endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the count endpoint listens on
    #[serde(rename = "bind-address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

use crate::config::types::Config;
use crate::ConfigError;
use std::path::Path;

/// Loads and validates a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.worker_pool_size == 0 {
        return Err(ConfigError::Validation(
            "worker-pool-size must be at least 1".to_string(),
        ));
    }
    if config.crawler.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be at least 1".to_string(),
        ));
    }
    if config.server.bind_address.is_empty() {
        return Err(ConfigError::Validation(
            "bind-address must not be empty".to_string(),
        ));
    }
    Ok(())
}

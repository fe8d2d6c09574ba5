//! Configuration module
//!
//! Handles loading and validating the optional TOML configuration file.
//! Every setting has a default, so the engine also runs with no file at all.

mod parser;
mod types;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, ServerConfig};

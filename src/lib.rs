//! Termtally: a depth-bounded keyword counting crawler
//!
//! This crate fetches a seed web page, follows its hyperlinks up to a bounded
//! depth with concurrent sibling fetches, tokenizes every page it visits into
//! an in-memory index, and answers queries of the form "how many times does
//! term T occur across page P and everything within depth D of it".

pub mod config;
pub mod crawler;
pub mod engine;
pub mod index;
pub mod server;
pub mod tokenizer;
pub mod url;

use thiserror::Error;

/// Main error type for Termtally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Malformed URL `{input}`: {message}")]
    Malformed { input: String, message: String },
}

/// Errors classifying a failed page fetch
///
/// Every variant is non-fatal to the crawl: the URL is skipped with a warning
/// and its siblings proceed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("bad response from {url}: HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("error downloading {url}: {message}")]
    Network { url: String, message: String },

    #[error("unsupported content type `{content_type}` for url `{url}`")]
    UnsupportedContentType { url: String, content_type: String },
}

/// Result type alias for Termtally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::Engine;
pub use index::IndexStore;
pub use crate::url::normalize_url;

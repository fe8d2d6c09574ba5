//! HTTP fetcher adapter
//!
//! Performs the network GET for a canonical URL and classifies the response.
//! Only `text/html*` and `text/plain*` bodies are accepted; everything else,
//! along with non-2xx statuses and transport failures, comes back as a
//! `FetchError` the orchestrator recovers from by skipping the URL.

use crate::FetchError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// How the body of a fetched page should be dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// `text/html*`: tokenize body text, extract anchors
    Html,
    /// `text/plain*`: tokenize the full text, no links
    Plain,
}

/// A successfully fetched page body
#[derive(Debug)]
pub struct FetchedPage {
    pub kind: PageKind,
    pub body: String,
}

/// Builds the HTTP client shared by all fetch tasks
///
/// # Arguments
///
/// * `timeout` - Per-request timeout; an elapsed timeout is reported as a
///   `FetchError::Network`
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("termtally/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// # Returns
///
/// * `Ok(FetchedPage)` - 2xx response with a supported content type
/// * `Err(FetchError::Http)` - non-success status
/// * `Err(FetchError::Network)` - connection, DNS, or timeout failure
/// * `Err(FetchError::UnsupportedContentType)` - anything that is neither
///   `text/html*` nor `text/plain*`
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| network_error(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let kind = if content_type.starts_with("text/html") {
        PageKind::Html
    } else if content_type.starts_with("text/plain") {
        PageKind::Plain
    } else {
        return Err(FetchError::UnsupportedContentType {
            url: url.to_string(),
            content_type,
        });
    };

    let body = response
        .text()
        .await
        .map_err(|e| network_error(url, &e))?;

    Ok(FetchedPage { kind, body })
}

fn network_error(url: &Url, source: &reqwest::Error) -> FetchError {
    let message = if source.is_timeout() {
        "request timeout".to_string()
    } else if source.is_connect() {
        "connection failed".to_string()
    } else {
        source.to_string()
    };
    FetchError::Network {
        url: url.to_string(),
        message,
    }
}

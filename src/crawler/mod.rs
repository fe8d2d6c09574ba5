//! Page fetching and content extraction
//!
//! This module wraps the HTTP transport and the HTML parser:
//! - fetching a page body with a bounded timeout and classifying the
//!   response by content type
//! - extracting body text nodes and anchor hrefs from HTML

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_page, FetchedPage, PageKind};
pub use parser::{parse_page, ParsedPage};

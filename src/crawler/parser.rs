//! HTML content extraction
//!
//! Pulls out of an HTML document exactly the two things the engine indexes:
//! the text nodes under `<body>` and the raw `href` values of anchors.
//! Head and title text never reaches the tokenizer.

use scraper::{Html, Selector};

/// Extracted content of an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Text node contents under the document body, in document order
    pub texts: Vec<String>,

    /// Raw (possibly relative) href values of `<a>` tags
    pub hrefs: Vec<String>,
}

/// Parses HTML and extracts body text nodes and anchor hrefs
///
/// The html5ever tree builder always synthesizes a `<body>` element, so
/// fragment-like input without explicit structure still yields its text.
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let mut texts = Vec::new();
    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            texts.extend(body.text().map(str::to_string));
        }
    }

    let mut hrefs = Vec::new();
    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    ParsedPage { texts, hrefs }
}

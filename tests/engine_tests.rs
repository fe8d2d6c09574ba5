//! Integration tests for the crawl engine
//!
//! These tests run the full fetch, tokenize, index, and count cycle against
//! wiremock HTTP servers.

use std::time::Instant;
use termtally::config::Config;
use termtally::engine::Engine;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_engine() -> Engine {
    Engine::new(&Config::default()).expect("failed to build engine")
}

fn html_page(body: &str) -> ResponseTemplate {
    // set_body_raw rather than set_body_string + insert_header: wiremock's
    // body mime would otherwise override the explicit content-type header
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_index_url_over_http() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/page.html",
        "<html><body>a tiny webserver page</body></html>",
    )
    .await;

    let engine = test_engine();
    let url = format!("{}/page.html", server.uri());
    engine.index(&url, 1).await;

    assert!(engine.has_url(&url));
    assert_eq!(engine.count(&url, "webserver", 1).await, 1);
}

#[tokio::test]
async fn test_relative_link_resolution() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/parent.html",
        r#"<html><body>the parent <a href="child.html">next</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/child.html", "<html><body>the child</body></html>").await;

    let engine = test_engine();
    let parent = format!("{}/parent.html", server.uri());
    let child = format!("{}/child.html", server.uri());
    engine.index(&parent, 1).await;

    assert!(engine.has_url(&parent));
    assert!(engine.has_url(&child));
    assert_eq!(engine.count(&parent, "parent", 1).await, 1);
    assert_eq!(engine.count(&parent, "child", 1).await, 1);
    assert_eq!(engine.count(&parent, "the", 1).await, 2);
}

#[tokio::test]
async fn test_absolute_link_resolution() {
    let server = MockServer::start().await;
    let child = format!("{}/child.html", server.uri());
    mount_html(
        &server,
        "/parent.html",
        &format!(r#"<html><body>the parent <a href="{child}">next</a></body></html>"#),
    )
    .await;
    mount_html(&server, "/child.html", "<html><body>the child</body></html>").await;

    let engine = test_engine();
    let parent = format!("{}/parent.html", server.uri());
    engine.index(&parent, 1).await;

    assert!(engine.has_url(&parent));
    assert!(engine.has_url(&child));
    assert_eq!(engine.count(&parent, "the", 1).await, 2);
}

#[tokio::test]
async fn test_self_reference_indexes_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop.html"))
        .respond_with(html_page(
            r#"<html><body>recursive <a href="/loop.html">again</a></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let engine = test_engine();
    let url = format!("{}/loop.html", server.uri());
    engine.index(&url, 3).await;

    assert!(engine.has_url(&url));
    assert_eq!(engine.count(&url, "recursive", 1).await, 1);
}

#[tokio::test]
async fn test_cyclic_links_terminate() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/a.html",
        r#"<html><body>alpha <a href="/b.html">b</a></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/b.html",
        r#"<html><body>beta <a href="/a.html">a</a></body></html>"#,
    )
    .await;

    let engine = test_engine();
    let a = format!("{}/a.html", server.uri());
    engine.index(&a, 5).await;

    assert!(engine.has_url(&a));
    assert!(engine.has_url(&format!("{}/b.html", server.uri())));
    assert_eq!(engine.count(&a, "alpha", 2).await, 1);
    assert_eq!(engine.count(&a, "beta", 2).await, 1);
}

#[tokio::test]
async fn test_fifty_children_fan_out() {
    let server = MockServer::start().await;

    let links: String = (0..50)
        .map(|i| format!(r#"<a href="/kid-{i}.html">kid {i}</a>"#))
        .collect();
    mount_html(
        &server,
        "/fanout.html",
        &format!("<html><body>the parent {links}</body></html>"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/kid-\d+\.html$"))
        .respond_with(html_page("<html><body>one child here</body></html>"))
        .mount(&server)
        .await;

    let engine = test_engine();
    let url = format!("{}/fanout.html", server.uri());

    let start = Instant::now();
    engine.index(&url, 1).await;
    let count = engine.count(&url, "child", 1).await;
    let elapsed = start.elapsed();

    assert!(engine.has_url(&url));
    assert_eq!(engine.count(&url, "parent", 1).await, 1);
    assert_eq!(count, 50);
    assert!(elapsed.as_secs() < 20, "fan-out took {elapsed:?}");
}

#[tokio::test]
async fn test_depth_bound() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/grand.html",
        r#"<html><body>grandparent <a href="/middle.html">down</a></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/middle.html",
        r#"<html><body>parent <a href="/leaf.html">down</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/leaf.html", "<html><body>child</body></html>").await;

    let engine = test_engine();
    let grand = format!("{}/grand.html", server.uri());
    engine.index(&grand, 1).await;

    assert_eq!(engine.count(&grand, "grandparent", 1).await, 1);
    assert_eq!(engine.count(&grand, "parent", 1).await, 1);
    // Two hops away, outside the budget
    assert_eq!(engine.count(&grand, "child", 1).await, 0);
    assert!(!engine.has_url(&format!("{}/leaf.html", server.uri())));
}

#[tokio::test]
async fn test_depth_two_reaches_grandchild() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/grand.html",
        r#"<html><body>grandparent <a href="/middle.html">down</a></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/middle.html",
        r#"<html><body>parent <a href="/leaf.html">down</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/leaf.html", "<html><body>child</body></html>").await;

    let engine = test_engine();
    let grand = format!("{}/grand.html", server.uri());
    engine.index(&grand, 2).await;

    assert!(engine.has_url(&format!("{}/leaf.html", server.uri())));
    assert_eq!(engine.count(&grand, "child", 2).await, 1);
}

#[tokio::test]
async fn test_query_triggers_lazy_indexing() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/parent.html",
        r#"<html><body>the parent <a href="/child.html">next</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/child.html", "<html><body>the child</body></html>").await;

    let engine = test_engine();
    let parent = format!("{}/parent.html", server.uri());

    // No explicit indexing happened; the query fetches the root on demand
    assert_eq!(engine.count(&parent, "parent", 1).await, 1);
    assert!(engine.has_url(&parent));
    assert!(!engine.has_url(&format!("{}/child.html", server.uri())));

    // A deeper budget extends the index past what was crawled before
    assert_eq!(engine.count(&parent, "child", 2).await, 1);
    assert!(engine.has_url(&format!("{}/child.html", server.uri())));
}

#[tokio::test]
async fn test_reindex_is_noop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/once.html"))
        .respond_with(html_page("<html><body>stable content</body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let engine = test_engine();
    let url = format!("{}/once.html", server.uri());
    engine.index(&url, 1).await;
    engine.index(&url, 1).await;

    assert_eq!(engine.count(&url, "stable", 1).await, 1);
    assert_eq!(engine.store().len(), 1);
}

#[tokio::test]
async fn test_http_error_skips_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let engine = test_engine();
    let url = format!("{}/missing.html", server.uri());
    engine.index(&url, 1).await;

    assert!(!engine.has_url(&url));
    assert_eq!(engine.count(&url, "anything", 0).await, 0);
}

#[tokio::test]
async fn test_connection_error_skips_url() {
    // Nothing listens on the discard port
    let url = "http://127.0.0.1:9/fake.html";

    let engine = test_engine();
    engine.index(url, 1).await;

    assert!(!engine.has_url(url));
    assert_eq!(engine.count(url, "anything", 0).await, 0);
}

#[tokio::test]
async fn test_failed_child_does_not_abort_siblings() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/parent.html",
        r#"<html><body>parent
        <a href="/good.html">good</a>
        <a href="/gone.html">gone</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/good.html", "<html><body>survivor</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/gone.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let engine = test_engine();
    let parent = format!("{}/parent.html", server.uri());
    engine.index(&parent, 1).await;

    assert!(engine.has_url(&format!("{}/good.html", server.uri())));
    assert!(!engine.has_url(&format!("{}/gone.html", server.uri())));
    assert_eq!(engine.count(&parent, "survivor", 1).await, 1);
}

#[tokio::test]
async fn test_plain_text_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("plain text tokens here\nplain again", "text/plain; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let engine = test_engine();
    let url = format!("{}/notes.txt", server.uri());
    engine.index(&url, 1).await;

    assert!(engine.has_url(&url));
    assert_eq!(engine.count(&url, "plain", 1).await, 2);
    // Plain text has no links
    let canonical = format!("{}/notes.txt", server.uri());
    assert_eq!(
        engine.store().outbound_of(&canonical),
        Some(Default::default())
    );
}

#[tokio::test]
async fn test_unsupported_content_type_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"word": "hidden"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let engine = test_engine();
    let url = format!("{}/data.json", server.uri());
    engine.index(&url, 1).await;

    assert!(!engine.has_url(&url));
    assert_eq!(engine.count(&url, "hidden", 0).await, 0);
}

#[tokio::test]
async fn test_fragment_only_anchor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anchor.html"))
        .respond_with(html_page(
            r##"<html><body>anchor text <a href="#section">jump</a></body></html>"##,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let engine = test_engine();
    let url = format!("{}/anchor.html", server.uri());
    engine.index(&url, 1).await;

    assert!(engine.has_url(&url));
    assert_eq!(engine.count(&url, "anchor", 1).await, 1);
    assert_eq!(engine.store().len(), 1);
}

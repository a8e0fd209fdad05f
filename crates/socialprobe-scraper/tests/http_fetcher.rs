//! Integration tests for `HttpFetcher`.
//!
//! Each test stands up a local `wiremock` server so no real network traffic
//! is made. The politeness delay is disabled throughout.

use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use socialprobe_scraper::{FetchSettings, HttpFetcher, PageFetcher, PolitenessDelay, ScraperError};

/// Fetcher with a 5-second timeout, a single fixed user agent and a
/// 500-character body cutoff.
fn test_fetcher() -> HttpFetcher {
    HttpFetcher::new(FetchSettings {
        request_timeout_secs: 5,
        connect_timeout_secs: 5,
        user_agents: vec!["socialprobe-test/0.1".to_owned()],
        delay: PolitenessDelay::none(),
        min_body_chars: 500,
    })
    .expect("failed to build test HttpFetcher")
}

fn page(chars: usize) -> String {
    "a".repeat(chars)
}

#[tokio::test]
async fn returns_body_when_long_enough() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nasa/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(800)))
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&format!("{}/nasa/", server.uri()))
        .await
        .expect("expected body");

    assert_eq!(body.len(), 800);
}

#[tokio::test]
async fn sends_browser_like_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nasa"))
        .and(header("user-agent", "socialprobe-test/0.1"))
        .and(header("referer", "https://www.google.com/"))
        .and(header_exists("accept-language"))
        .and(header("dnt", "1"))
        .and(header("sec-fetch-mode", "navigate"))
        .and(header_exists("accept"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(600)))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_fetcher()
        .fetch(&format!("{}/nasa", server.uri()))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn short_body_is_rejected_with_char_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(120)))
        .mount(&server)
        .await;

    let err = test_fetcher()
        .fetch(&format!("{}/login", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::ShortBody { chars: 120, .. }),
        "expected ShortBody, got: {err:?}"
    );
}

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let err = test_fetcher().fetch(&url).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::NotFound { url: ref u } if *u == url),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string(page(900)))
        .mount(&server)
        .await;

    let err = test_fetcher()
        .fetch(&format!("{}/nasa", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 429, .. }),
        "expected UnexpectedStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn follows_redirects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(700)))
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&format!("{}/old", server.uri()))
        .await
        .expect("redirect followed");

    assert_eq!(body.len(), 700);
}

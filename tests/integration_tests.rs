//! End-to-end tests against a mock archive endpoint

use adscope::config::{FetchLimits, SearchConfig};
use adscope::fetch::{PaginatedFetcher, Termination};
use adscope::http::{HttpTransport, HttpTransportConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARCHIVE_PATH: &str = "/v24.0/ads_archive";

fn transport() -> HttpTransport {
    HttpTransport::with_config(HttpTransportConfig::new().without_pacer())
}

fn fast_limits() -> FetchLimits {
    FetchLimits::new()
        .with_inter_page_delay(Duration::ZERO)
        .with_retry_backoff(Duration::ZERO)
}

fn search() -> SearchConfig {
    SearchConfig::new("coffee", "test-token").with_country("DZ")
}

fn ad(id: &str, page_name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "page_name": page_name,
        "ad_creation_time": "2024-05-01T10:00:00+0000",
        "ad_creative_bodies": ["body text"],
        "ad_snapshot_url": format!("https://example.com/snapshot/{id}")
    })
}

#[tokio::test]
async fn test_two_page_fetch() {
    let server = MockServer::start().await;

    let next_url = format!(
        "{}{ARCHIVE_PATH}?access_token=test-token&after=cursor1&limit=10",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .and(query_param("search_terms", "coffee"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ad("1", "Brew Co."), ad("2", "Brew Co."), ad("3", "Roastery")],
            "paging": { "next": next_url }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .and(query_param("after", "cursor1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ad("4", "Roastery"), ad("5", "Beanery")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PaginatedFetcher::new(transport()).with_limits(fast_limits());
    let endpoint = format!("{}{ARCHIVE_PATH}", server.uri());
    let result = fetcher.fetch_all(&endpoint, search().initial_spec()).await;

    assert!(result.termination.is_exhausted());
    assert_eq!(result.pages_processed, 2);
    assert_eq!(result.len(), 5);

    let ids: Vec<&str> = result
        .records
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_page_cap_stops_fetch() {
    let server = MockServer::start().await;

    let next_url = format!(
        "{}{ARCHIVE_PATH}?access_token=test-token&after=again",
        server.uri()
    );

    // Every response advertises another page.
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ad("x", "Endless Ads")],
            "paging": { "next": next_url }
        })))
        .expect(3)
        .mount(&server)
        .await;

    let fetcher =
        PaginatedFetcher::new(transport()).with_limits(fast_limits().with_max_pages(3));
    let endpoint = format!("{}{ARCHIVE_PATH}", server.uri());
    let result = fetcher.fetch_all(&endpoint, search().initial_spec()).await;

    assert!(matches!(result.termination, Termination::PageCapReached));
    assert_eq!(result.pages_processed, 3);
    assert_eq!(result.len(), 3);
}

#[tokio::test]
async fn test_api_error_body_surfaces_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {
                "message": "Invalid OAuth access token",
                "type": "OAuthException",
                "code": 190
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PaginatedFetcher::new(transport()).with_limits(fast_limits());
    let endpoint = format!("{}{ARCHIVE_PATH}", server.uri());
    let result = fetcher.fetch_all(&endpoint, search().initial_spec()).await;

    match &result.termination {
        Termination::ApiError(failure) => {
            assert_eq!(failure.message, "Invalid OAuth access token");
            assert_eq!(failure.code, Some(190));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_http_error_status_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("server down"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PaginatedFetcher::new(transport()).with_limits(fast_limits());
    let endpoint = format!("{}{ARCHIVE_PATH}", server.uri());
    let result = fetcher.fetch_all(&endpoint, search().initial_spec()).await;

    assert!(matches!(
        result.termination,
        Termination::Fatal(adscope::Error::HttpStatus { status: 500, .. })
    ));
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_empty_first_page_reports_no_ads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PaginatedFetcher::new(transport()).with_limits(fast_limits());
    let endpoint = format!("{}{ARCHIVE_PATH}", server.uri());
    let result = fetcher.fetch_all(&endpoint, search().initial_spec()).await;

    assert!(result.termination.is_exhausted());
    assert!(result.is_empty());
    assert_eq!(result.pages_processed, 1);
}

//! Integration tests for `NewsApiClient` using wiremock HTTP mocks.

use pris_collector::{CollectorError, NewsApiClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NewsApiClient {
    NewsApiClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_normalized_signals() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": { "id": null, "name": "Daily Nation" },
                "title": "Vaccine causes paralysis, doctors warn",
                "description": "Claims spread in Garissa county",
                "publishedAt": "2026-08-31T06:15:00Z"
            },
            {
                "source": { "id": null, "name": null },
                "title": "Local council opens new clinic",
                "description": null,
                "publishedAt": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "polio vaccine Kenya"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let signals = client
        .search("polio vaccine Kenya")
        .await
        .expect("should parse articles");

    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0].source, "Daily Nation");
    assert_eq!(signals[0].title, "Vaccine causes paralysis, doctors warn");
    assert_eq!(
        signals[0].description.as_deref(),
        Some("Claims spread in Garissa county")
    );
    assert!(signals[0].published_at.is_some());

    assert_eq!(signals[1].source, "unknown");
    assert!(signals[1].description.is_none());
    assert!(signals[1].published_at.is_none());
    // Collection timestamp is stamped per batch.
    assert_eq!(signals[0].collected_at, signals[1].collected_at);
}

#[tokio::test]
async fn search_with_no_hits_returns_empty_batch() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "ok", "totalResults": 0, "articles": [] });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let signals = client.search("no such region").await.unwrap();
    assert!(signals.is_empty());
}

#[tokio::test]
async fn articles_without_titles_are_dropped() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "ok",
        "articles": [
            { "source": { "name": "KBC" }, "title": null, "description": "orphan" },
            { "source": { "name": "KBC" }, "title": "   ", "description": "blank" },
            { "source": { "name": "KBC" }, "title": "Kept", "description": null }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let signals = client.search("polio").await.unwrap();

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].title, "Kept");
}

#[tokio::test]
async fn rejected_api_key_surfaces_as_upstream_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "error",
        "code": "apiKeyInvalid",
        "message": "Your API key is invalid or incorrect."
    });

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("polio").await.unwrap_err();

    match err {
        CollectorError::Upstream { code, message } => {
            assert_eq!(code, "apiKeyInvalid");
            assert!(message.contains("invalid"));
        }
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_failure_surfaces_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("polio").await.unwrap_err();
    assert!(matches!(err, CollectorError::HttpStatus(502)));
}

//! Tests for HTTP module functionality.

use page_loader::http::{create_http_client, Fetcher, HttpClientConfig};
use page_loader::Error;
use reqwest::StatusCode;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

#[test]
fn test_default_config() {
    let config = HttpClientConfig::default();
    assert_eq!(config.retries, 0);
    assert!(config.timeout.is_none());
    assert!(config.proxy.is_none());
    assert!(config.headers.is_none());
}

#[test]
fn test_create_http_client_with_retries() {
    let client = create_http_client(create_test_http_config_with_retries(5));
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_fetch_returns_body_and_content_type() {
    let server = MockServer::start().await;
    mount_page(&server, TEST_PAGE_PATH, "<html><body>hi</body></html>").await;

    let fetcher = Fetcher::from_config(HttpClientConfig::default()).unwrap();
    let resource = fetcher
        .fetch(&server_url(&server, TEST_PAGE_PATH))
        .await
        .unwrap();

    assert_eq!(resource.status, StatusCode::OK);
    assert_eq!(resource.content_type.as_deref(), Some(HTML_CONTENT_TYPE));
    assert_eq!(resource.text(), "<html><body>hi</body></html>");
}

#[tokio::test]
async fn test_fetch_keeps_binary_bodies_intact() {
    let server = MockServer::start().await;
    let content = create_test_content(64 * 1024);
    mount_asset(&server, "/blob.bin", &content, 1).await;

    let fetcher = Fetcher::from_config(HttpClientConfig::default()).unwrap();
    let resource = fetcher.fetch(&server_url(&server, "/blob.bin")).await.unwrap();

    assert_eq!(resource.body.as_ref(), content.as_slice());
}

#[tokio::test]
async fn test_fetch_sends_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = Fetcher::from_config(create_test_http_config_with_retries(0)).unwrap();
    let resource = fetcher.fetch(&server_url(&server, "/ua")).await.unwrap();
    assert_eq!(resource.status, StatusCode::OK);
}

#[tokio::test]
async fn test_fetch_reports_http_status() {
    let server = MockServer::start().await;
    mount_status(&server, "/missing", 404).await;
    mount_status(&server, "/broken", 500).await;

    let fetcher = Fetcher::from_config(HttpClientConfig::default()).unwrap();

    let err = fetcher.fetch(&server_url(&server, "/missing")).await.unwrap_err();
    assert!(matches!(err, Error::Http { .. }));
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let err = fetcher.fetch(&server_url(&server, "/broken")).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn test_fetch_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_asset(&server, "/flaky", b"ok", 1).await;

    let fetcher = Fetcher::from_config(HttpClientConfig {
        retries: 2,
        ..HttpClientConfig::default()
    })
    .unwrap();

    let resource = fetcher.fetch(&server_url(&server, "/flaky")).await.unwrap();
    assert_eq!(resource.body.as_ref(), b"ok");
}

#[tokio::test]
async fn test_fetch_reports_network_errors() {
    // Bind a port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = reqwest::Url::parse(&format!("http://127.0.0.1:{}/gone", port)).unwrap();

    let fetcher = Fetcher::from_config(HttpClientConfig::default()).unwrap();
    let err = fetcher.fetch(&url).await.unwrap_err();
    assert!(matches!(err, Error::Network { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_fetch_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let fetcher = Fetcher::from_config(HttpClientConfig {
        timeout: Some(Duration::from_millis(200)),
        ..HttpClientConfig::default()
    })
    .unwrap();

    let err = fetcher.fetch(&server_url(&server, "/slow")).await.unwrap_err();
    assert!(matches!(err, Error::Network { .. }));
}

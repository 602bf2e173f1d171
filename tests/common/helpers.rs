use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;
use page_loader::naming::{assets_dirname, page_filename, resource_filename};
use page_loader::progress::{ProgressBarOpts, StyleOptions};
use page_loader::{HttpClientConfig, PageLoaderBuilder, ResourceKind};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Common test constants
pub const TEST_PAGE_PATH: &str = "/courses";
pub const TEST_USER_AGENT: &str = "page-loader-test-agent";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Routes `tracing` output to the test harness, filtered by `RUST_LOG`
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates binary test content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

// === Mock Server Helpers ===

/// Full URL of `path` on the mock server
pub fn server_url(server: &MockServer, path: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), path)).expect("Invalid mock server url")
}

/// Serves `body` as HTML at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", HTML_CONTENT_TYPE)
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Serves `body` as raw bytes at `route`, expecting exactly `hits` requests
pub async fn mount_asset(server: &MockServer, route: &str, body: &[u8], hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(hits)
        .mount(server)
        .await;
}

/// Answers every request to `route` with `status`
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

// === Naming Helpers ===

/// Expected page file of `page` inside `dir`
pub fn expected_page_file(dir: &Path, page: &Url) -> PathBuf {
    dir.join(page_filename(page))
}

/// Expected asset directory of `page` inside `dir`
pub fn expected_assets_dir(dir: &Path, page: &Url) -> PathBuf {
    dir.join(assets_dirname(page))
}

/// Reference written into the page for a saved asset: `<slug>_files/<name>`
pub fn expected_reference(page: &Url, asset: &Url, kind: ResourceKind) -> String {
    format!(
        "{}/{}",
        assets_dirname(page),
        resource_filename(asset, kind, None)
    )
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a test HTTP client configuration with custom retries
pub fn create_test_http_config_with_retries(retries: u32) -> HttpClientConfig {
    HttpClientConfig {
        retries,
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

// === Progress Bar Helpers ===

/// Creates default test progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::new(None, None, true, false)
}

/// Creates default test style options
pub fn create_test_style_options() -> StyleOptions {
    StyleOptions::new(create_test_progress_opts(), ProgressBarOpts::with_pip_style())
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
}

// === Loader Builder Helpers ===

/// Creates a loader builder without progress bars, as tests run headless
pub fn create_test_loader_builder() -> PageLoaderBuilder {
    PageLoaderBuilder::hidden().headers(create_test_headers())
}

// === Assertion Helpers ===

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that nothing exists at the given path
pub fn assert_not_exists(path: &Path) {
    assert!(!path.exists(), "Nothing should exist at path: {:?}", path);
}

/// Asserts that a directory is empty
pub fn assert_dir_empty(path: &Path) {
    let count = fs::read_dir(path).expect("Failed to read directory").count();
    assert_eq!(count, 0, "Directory should be empty: {:?}", path);
}

/// Asserts that progress bar options are configured correctly
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(!pb.is_hidden(), "Progress bar should be enabled");
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}

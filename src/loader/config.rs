//! Configuration structures and defaults for the page loader.
//!
//! ```rust
//! use page_loader::asset::{AssetSummary, Status};
//! use page_loader::loader::AssetCallback;
//!
//! let callback: AssetCallback = Box::new(|summary: &AssetSummary| {
//!     match summary.status() {
//!         Status::Success => println!("✓ {}", summary.file_name()),
//!         Status::Fail(msg) => println!("✗ {} - {}", summary.url(), msg),
//!         Status::NotStarted => {}
//!     }
//! });
//! ```

use crate::asset::AssetSummary;
use crate::http::HttpClientConfig;
use crate::progress::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Proxy;
use std::sync::Arc;
use std::time::Duration;

/// Callback type for asset completion events.
pub type AssetCallback = Box<dyn Fn(&AssetSummary) + Send + Sync>;

/// User agent sent unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("page-loader/", env!("CARGO_PKG_VERSION"));

/// Configuration structure for the page loader.
#[derive(Clone)]
pub struct LoaderConfig {
    /// Number of retries for transient failures, per resource.
    pub retries: u32,
    /// Timeout applied to every request.
    pub timeout: Option<Duration>,
    /// Number of maximum concurrent asset fetches.
    pub concurrent_downloads: usize,
    /// Progress bar style options.
    pub style_options: StyleOptions,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy.
    pub proxy: Option<Proxy>,
    /// Callback for when each asset is settled.
    pub on_asset: Option<Arc<AssetCallback>>,
}

impl LoaderConfig {
    /// Default number of concurrent asset fetches.
    pub const DEFAULT_CONCURRENT_DOWNLOADS: usize = 8;

    /// HTTP client settings derived from this configuration.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retries: self.retries,
            timeout: self.timeout,
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
        }
    }
}

impl std::fmt::Debug for LoaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderConfig")
            .field("retries", &self.retries)
            .field("timeout", &self.timeout)
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("style_options", &self.style_options)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("on_asset", &self.on_asset.is_some())
            .finish()
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        Self {
            retries: 0,
            timeout: None,
            concurrent_downloads: Self::DEFAULT_CONCURRENT_DOWNLOADS,
            style_options: StyleOptions::default(),
            headers: Some(headers),
            proxy: None,
            on_asset: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.retries, 0);
        assert!(config.timeout.is_none());
        assert_eq!(config.concurrent_downloads, 8);

        let http = config.http_client_config();
        assert_eq!(
            http.headers.unwrap().get(USER_AGENT),
            Some(&HeaderValue::from_static(DEFAULT_USER_AGENT))
        );
    }
}

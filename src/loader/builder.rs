//! Builder pattern implementation for creating PageLoader instances.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use page_loader::loader::PageLoaderBuilder;
//! use std::time::Duration;
//!
//! let loader = PageLoaderBuilder::new()
//!     .concurrent_downloads(4)
//!     .retries(2)
//!     .timeout(Duration::from_secs(30))
//!     .build();
//! ```
//!
//! ## Reporting Assets
//!
//! ```rust
//! use page_loader::asset::Status;
//! use page_loader::loader::PageLoaderBuilder;
//!
//! let loader = PageLoaderBuilder::hidden()
//!     .on_asset(|summary| {
//!         if let Status::Fail(msg) = summary.status() {
//!             eprintln!("kept remote {}: {}", summary.url(), msg);
//!         }
//!     })
//!     .build();
//! ```

use super::{config::LoaderConfig, loader::PageLoader};
use crate::asset::AssetSummary;
use crate::progress::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`PageLoader`].
///
/// ```rust
/// # fn main()  {
/// use page_loader::loader::PageLoaderBuilder;
///
/// let loader = PageLoaderBuilder::new().retries(3).concurrent_downloads(1).build();
/// # }
/// ```
#[derive(Default)]
pub struct PageLoaderBuilder {
    config: LoaderConfig,
}

impl PageLoaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        PageLoaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        PageLoaderBuilder::default().style_options(StyleOptions::hidden())
    }

    /// Set the number of retries per resource.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Set the timeout of every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the number of assets fetched at once. `1` fetches them in
    /// document order, one after the other.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads.max(1);
        self
    }

    /// Set the progress bar style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set callback for when each asset is settled, saved or not.
    pub fn on_asset<F>(mut self, callback: F) -> Self
    where
        F: Fn(&AssetSummary) + Send + Sync + 'static,
    {
        self.config.on_asset = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header.
    ///
    /// ```
    /// use page_loader::loader::PageLoaderBuilder;
    /// use reqwest::header::{self, HeaderValue};
    ///
    /// let loader = PageLoaderBuilder::new()
    ///     .header(header::USER_AGENT, HeaderValue::from_static("curl/7.87"))
    ///     .build();
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`PageLoader`] with the specified options.
    pub fn build(self) -> PageLoader {
        PageLoader::new(self.config)
    }
}

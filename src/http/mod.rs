//! HTTP module containing the resource fetcher.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`fetch`] - the [`Fetcher`] used for the page and for every asset
//! - [`charset`] - decoding page bodies to text
//!
//! # Examples
//!
//! ```rust,no_run
//! use page_loader::http::{Fetcher, HttpClientConfig};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::from_config(HttpClientConfig::default())?;
//! let page = fetcher.fetch(&Url::parse("https://ru.hexlet.io/courses")?).await?;
//! println!("{} bytes of {:?}", page.body.len(), page.content_type);
//! # Ok(())
//! # }
//! ```

pub mod charset;
pub mod client;
pub mod fetch;

pub use charset::decode_text;
pub use client::{create_http_client, HttpClientConfig};
pub use fetch::{Fetcher, Resource};

//! Page-loader is a crate aiming at providing a simple way to save a web page
//! for offline viewing.
//!
//! It fetches the page over HTTP(S), downloads the images, stylesheets and
//! scripts served by the page's own host, rewrites their references to point
//! at the local copies and saves the result next to them.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use page_loader::{loader::PageLoaderBuilder, DownloadError};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), DownloadError> {
//! let loader = PageLoaderBuilder::new().build();
//! let result = loader.download("https://ru.hexlet.io/courses", "/var/tmp").await?;
//! // /var/tmp/ru-hexlet-io-courses.html
//! // /var/tmp/ru-hexlet-io-courses_files/ru-hexlet-io-assets-professions-nodejs.png
//! println!("{}", result.page_file().display());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`asset`] - Asset references and per-asset summaries
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client functionality and the resource fetcher
//! - [`loader`] - The main `PageLoader` and `PageLoaderBuilder`
//! - [`naming`] - Deterministic file names derived from URLs
//! - [`progress`] - Progress bar styling and display management
//! - [`rewrite`] - Markup scanning and reference rewriting
//! - [`scope`] - Which resources count as local

pub mod asset;
pub mod error;
pub mod http;
pub mod loader;
pub mod naming;
pub mod progress;
pub mod rewrite;
pub mod scope;

pub use asset::{AssetSummary, ResourceKind, Status};
pub use error::{error_chain, DownloadError, Error, Result};
pub use http::{create_http_client, Fetcher, HttpClientConfig};
pub use loader::{DownloadResult, PageLoader, PageLoaderBuilder, PageRequest, Stage};
pub use naming::{page_filename, page_slug, resource_filename, slugify};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use scope::is_local;

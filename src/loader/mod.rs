//! Page loader module.
//!
//! - `builder` - [`PageLoaderBuilder`] for configuring a loader
//! - `config` - [`LoaderConfig`] and its defaults
//! - `loader` - [`PageLoader`], the download pipeline
//! - `request` - [`PageRequest`] input and [`DownloadResult`] output
//! - `stage` - the [`Stage`]s a download moves through

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod loader;
pub mod request;
pub mod stage;

pub use builder::PageLoaderBuilder;
pub use config::{AssetCallback, LoaderConfig, DEFAULT_USER_AGENT};
pub use loader::PageLoader;
pub use request::{DownloadResult, PageRequest};
pub use stage::Stage;

//! Page download orchestration.
//!
//! [`PageLoader::download`] drives one page through the [`Stage`]s:
//! fetch the markup, localize its assets, then write `<slug>.html` into the
//! output directory.
//!
//! # Examples
//!
//! ```rust,no_run
//! use page_loader::loader::PageLoaderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = PageLoaderBuilder::new().concurrent_downloads(4).build();
//! let result = loader.download("https://ru.hexlet.io/courses", "/var/tmp").await?;
//!
//! println!("Page saved to {}", result.page_file().display());
//! for asset in result.assets() {
//!     println!("{} - {:?}", asset.url(), asset.status());
//! }
//! # Ok(())
//! # }
//! ```

use super::config::LoaderConfig;
use super::request::{DownloadResult, PageRequest};
use super::stage::Stage;
use crate::error::{DownloadError, Error, Result};
use crate::http::Fetcher;
use crate::naming::page_filename;
use crate::progress::StyleOptions;
use crate::rewrite::Rewriter;

use reqwest::header::HeaderMap;
use std::fmt;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

/// Represents the page download controller.
///
/// A loader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use page_loader::loader::PageLoaderBuilder;
///
/// let loader = PageLoaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct PageLoader {
    config: LoaderConfig,
}

impl Debug for PageLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageLoader")
            .field("config", &self.config)
            .finish()
    }
}

impl PageLoader {
    /// Creates a new PageLoader with the given configuration.
    pub(crate) fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Gets the number of retries per resource.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout
    }

    /// Gets the number of concurrent asset fetches.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Gets the progress bar style options.
    pub fn style_options(&self) -> &StyleOptions {
        &self.config.style_options
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Downloads the page at `page_url` with its local assets into `output_dir`.
    ///
    /// On success the page is saved as `<output_dir>/<slug>.html` and its
    /// assets under `<output_dir>/<slug>_files/`. Assets that cannot be
    /// fetched or saved do not fail the download; they keep their original
    /// reference and are reported in [`DownloadResult::assets`].
    pub async fn download(
        &self,
        page_url: &str,
        output_dir: impl AsRef<Path>,
    ) -> std::result::Result<DownloadResult, DownloadError> {
        let request = PageRequest::new(page_url, output_dir.as_ref())
            .map_err(at(page_url, Stage::Idle))?;
        self.download_request(&request).await
    }

    /// Downloads an already validated [`PageRequest`].
    pub async fn download_request(
        &self,
        request: &PageRequest,
    ) -> std::result::Result<DownloadResult, DownloadError> {
        let url = request.url();
        let output_dir = request.output_dir();

        let fetcher = Fetcher::from_config(self.config.http_client_config())
            .map_err(at(url, Stage::Idle))?;

        let mut stage = Stage::FetchingPage;
        info!("Fetching {}", url);
        let page = fetcher.fetch(url).await.map_err(at(url, stage))?;
        debug!(
            "Fetched {} ({} bytes, {:?})",
            url,
            page.body.len(),
            page.content_type
        );

        stage = advance(stage);
        let rewriter = Rewriter::new(fetcher)
            .concurrent_downloads(self.config.concurrent_downloads)
            .style_options(self.config.style_options.clone())
            .on_asset(self.config.on_asset.clone());
        let rewritten = rewriter
            .rewrite(&page.text(), url, output_dir)
            .await
            .map_err(at(url, stage))?;

        stage = advance(stage);
        let file_name = page_filename(url);
        let page_file = persist(output_dir, &file_name, rewritten.markup.as_bytes())
            .await
            .map_err(at(url, stage))?;

        let stage = advance(stage);
        info!("Page saved to {} ({})", page_file.display(), stage);

        Ok(DownloadResult::new(page_file, rewritten.assets))
    }
}

/// Moves to the next stage, logging the transition.
fn advance(stage: Stage) -> Stage {
    let next = stage.next().unwrap_or(Stage::Done);
    debug!("Stage: {} -> {}", stage, next);
    next
}

/// Wraps a failure of `stage` into a [`DownloadError`] for `url`.
fn at(url: impl fmt::Display, stage: Stage) -> impl FnOnce(Error) -> DownloadError {
    let url = url.to_string();
    move |source| DownloadError::new(url, stage, source)
}

/// Writes the page to `<output_dir>/<file_name>` and returns its absolute path.
///
/// The markup is written to a hidden temporary file in the same directory
/// first and renamed into place, so a failed write never leaves a truncated
/// page behind.
async fn persist(output_dir: &Path, file_name: &str, markup: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .await
        .map_err(|e| Error::storage(output_dir, e))?;

    let output_dir = std::path::absolute(output_dir).map_err(|e| Error::storage(output_dir, e))?;
    let target = output_dir.join(file_name);
    let temp = output_dir.join(format!(".{}.part", file_name));

    debug!("Writing {:?}", &temp);
    if let Err(e) = fs::write(&temp, markup).await {
        let _ = fs::remove_file(&temp).await;
        return Err(Error::storage(&temp, e));
    }

    if let Err(e) = fs::rename(&temp, &target).await {
        let _ = fs::remove_file(&temp).await;
        return Err(Error::storage(&target, e));
    }

    Ok(target)
}

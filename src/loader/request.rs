//! Input and output of a page download.

use crate::asset::AssetSummary;
use crate::error::{Error, Result};
use reqwest::Url;
use std::convert::TryFrom;
use std::env::current_dir;
use std::path::{Path, PathBuf};

/// A page to download and the directory to save it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    url: Url,
    output_dir: PathBuf,
}

impl PageRequest {
    /// Creates a request for `url`, saved under `output_dir`.
    ///
    /// Fails with [`Error::InvalidUrl`] unless `url` is an absolute http(s)
    /// URL with a host.
    pub fn new(url: &str, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| {
            Error::InvalidUrl(format!("the url \"{}\" cannot be parsed: {}", url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(Error::InvalidUrl(format!(
                "the url \"{}\" is not an http(s) page url",
                url
            )));
        }

        Ok(Self {
            url: parsed,
            output_dir: output_dir.into(),
        })
    }

    /// The page URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// A request saving into the current directory.
impl TryFrom<&str> for PageRequest {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        PageRequest::new(value, current_dir().unwrap_or_default())
    }
}

/// Outcome of a successful page download.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    page_file: PathBuf,
    assets: Vec<AssetSummary>,
}

impl DownloadResult {
    pub(crate) fn new(page_file: PathBuf, assets: Vec<AssetSummary>) -> Self {
        Self { page_file, assets }
    }

    /// Absolute path of the saved page.
    pub fn page_file(&self) -> &Path {
        &self.page_file
    }

    /// One summary per distinct local asset, in document order.
    pub fn assets(&self) -> &[AssetSummary] {
        &self.assets
    }

    /// Consumes the result and returns the page path.
    pub fn into_page_file(self) -> PathBuf {
        self.page_file
    }
}

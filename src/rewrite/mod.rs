//! Markup rewriting.
//!
//! The [`Rewriter`] localizes the assets of one page:
//!
//! 1. scan the markup for `img`, `link` and `script` references
//! 2. name every local one through a [`NameRegistry`]
//! 3. fetch each distinct URL once and save it under `<slug>_files/`
//! 4. rewrite the saved references on a fresh tree, declare the UTF-8
//!    output encoding and serialize it
//!
//! Fetches may overlap (see [`Rewriter::concurrent_downloads`]); the tree is
//! only touched before and after all of them have completed.
//!
//! - [`document`] - the parsed HTML tree

pub mod document;

pub use document::Document;

use crate::asset::{AssetReference, AssetSummary, ResourceKind, Status};
use crate::error::{error_chain, Error, Result};
use crate::http::Fetcher;
use crate::loader::AssetCallback;
use crate::naming::{assets_dirname, NameRegistry};
use crate::progress::{ProgressDisplay, StyleOptions};

use futures::stream::{self, StreamExt};
use reqwest::Url;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// Result of rewriting a page.
#[derive(Debug, Clone)]
pub struct Rewritten {
    /// Serialized markup with local references rewritten.
    pub markup: String,
    /// One summary per distinct local asset, in document order.
    pub assets: Vec<AssetSummary>,
}

/// A local asset to fetch, with the name it is saved under.
#[derive(Debug, Clone)]
struct AssetJob {
    url: Url,
    kind: ResourceKind,
    file_name: String,
}

/// Localizes the assets referenced by a page.
#[derive(Clone)]
pub struct Rewriter {
    fetcher: Fetcher,
    concurrent_downloads: usize,
    style_options: StyleOptions,
    on_asset: Option<Arc<AssetCallback>>,
}

impl std::fmt::Debug for Rewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rewriter")
            .field("fetcher", &self.fetcher)
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("style_options", &self.style_options)
            .field("on_asset", &self.on_asset.is_some())
            .finish()
    }
}

impl Rewriter {
    /// Creates a rewriter fetching one asset at a time, without progress bars.
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            concurrent_downloads: 1,
            style_options: StyleOptions::hidden(),
            on_asset: None,
        }
    }

    /// Sets the maximum number of assets fetched at once (at least one).
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.concurrent_downloads = concurrent_downloads.max(1);
        self
    }

    /// Sets the progress bar style.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.style_options = style_options;
        self
    }

    /// Sets the callback invoked once per asset, as soon as it is settled.
    pub fn on_asset(mut self, callback: Option<Arc<AssetCallback>>) -> Self {
        self.on_asset = callback;
        self
    }

    /// Rewrites `markup` of the page at `page_url`, saving its local assets
    /// under `output_dir`.
    ///
    /// Only a markup parse failure is an error; failed assets are reported in
    /// [`Rewritten::assets`] and keep their original reference.
    pub async fn rewrite(&self, markup: &str, page_url: &Url, output_dir: &Path) -> Result<Rewritten> {
        let references = Document::parse(markup)?.references(page_url);
        let jobs = plan(&references);
        debug!(
            "Found {} references, {} local assets to fetch",
            references.len(),
            jobs.len()
        );

        let dirname = assets_dirname(page_url);
        let assets_dir = output_dir.join(&dirname);

        let progress_display = ProgressDisplay::new(self.style_options.clone(), jobs.len());
        let assets = stream::iter(&jobs)
            .map(|job| self.localize(job, &assets_dir, &progress_display))
            .buffered(self.concurrent_downloads)
            .collect::<Vec<_>>()
            .await;
        progress_display.finish();

        let saved: HashMap<&Url, String> = assets
            .iter()
            .filter(|summary| summary.is_success())
            .map(|summary| (summary.url(), format!("{}/{}", dirname, summary.file_name())))
            .collect();

        let mut updates = Vec::with_capacity(references.len());
        for reference in &references {
            match saved.get(&reference.url) {
                Some(path) => updates.push((reference.element, path.as_str())),
                None if !reference.is_local => {
                    debug!("Leaving non-local {} {}", reference.kind, reference.url);
                }
                None => {}
            }
        }

        let document = Document::parse(markup)?;
        let rewritten = document.set_references(updates);
        debug!("Rewrote {} references", rewritten);
        document.declare_utf8();

        Ok(Rewritten {
            markup: document.serialize()?,
            assets,
        })
    }

    /// Fetches and saves one asset.
    async fn localize(
        &self,
        job: &AssetJob,
        assets_dir: &Path,
        progress_display: &ProgressDisplay,
    ) -> AssetSummary {
        let summary = AssetSummary::new(job.url.clone(), job.kind, &job.file_name);
        let pb = progress_display.create_child_progress(0);

        let outcome = match self.fetcher.fetch_with_progress(&job.url, &pb).await {
            Ok(resource) => save(assets_dir, &job.file_name, &resource.body)
                .await
                .map(|path| (path, resource.body.len() as u64)),
            Err(e) => Err(e),
        };

        progress_display.finish_child(pb);
        progress_display.increment_main();

        let summary = match outcome {
            Ok((path, size)) => {
                info!("Saved {} to {}", job.url, path.display());
                summary.with_size(size).with_status(Status::Success)
            }
            Err(e) => {
                let reason = error_chain(&e);
                warn!("Failed to download {}: {}", job.url, reason);
                summary.fail(reason)
            }
        };

        if let Some(ref callback) = self.on_asset {
            callback(&summary);
        }

        summary
    }
}

/// Assigns names to the local references, one job per distinct URL.
fn plan(references: &[AssetReference]) -> Vec<AssetJob> {
    let mut registry = NameRegistry::new();
    let mut jobs = Vec::new();

    for reference in references.iter().filter(|r| r.is_local) {
        let known = registry.len();
        let file_name = registry.assign(&reference.url, reference.kind);
        if registry.len() > known {
            jobs.push(AssetJob {
                url: reference.url.clone(),
                kind: reference.kind,
                file_name,
            });
        }
    }

    jobs
}

/// Writes `body` to `<assets_dir>/<file_name>`, creating the directory if needed.
async fn save(assets_dir: &Path, file_name: &str, body: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(assets_dir)
        .await
        .map_err(|e| Error::storage(assets_dir, e))?;

    let path = assets_dir.join(file_name);
    fs::write(&path, body)
        .await
        .map_err(|e| Error::storage(&path, e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(url: &str, element: usize, kind: ResourceKind, is_local: bool) -> AssetReference {
        AssetReference {
            url: Url::parse(url).unwrap(),
            element,
            kind,
            is_local,
        }
    }

    #[test]
    fn test_plan_skips_non_local_and_duplicates() {
        let references = vec![
            reference("https://site.com/a.png", 0, ResourceKind::Image, true),
            reference("https://cdn.com/b.png", 1, ResourceKind::Image, false),
            reference("https://site.com/a.png", 2, ResourceKind::Image, true),
            reference("https://site.com/app.js", 3, ResourceKind::Script, true),
        ];

        let jobs = plan(&references);
        let names: Vec<_> = jobs.iter().map(|j| j.file_name.as_str()).collect();
        assert_eq!(names, ["site-com-a.png", "site-com-app.js"]);
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let assets_dir = dir.path().join("page_files");

        let path = save(&assets_dir, "a.png", b"png").await.unwrap();
        assert_eq!(path, assets_dir.join("a.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png");

        // A second write into the existing directory succeeds too.
        save(&assets_dir, "b.png", b"png").await.unwrap();
    }

    #[tokio::test]
    async fn test_save_reports_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        let err = save(&blocker.join("page_files"), "a.png", b"png")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }
}

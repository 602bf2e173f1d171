//! Asset summary functionality.
//!
//! This module contains the [`AssetSummary`] struct and [`Status`] enum that
//! report what happened to every local resource of a page.
//!
//! # Examples
//!
//! ```rust
//! use page_loader::asset::{AssetSummary, ResourceKind, Status};
//! use reqwest::Url;
//!
//! let url = Url::parse("https://site.com/logo.png").unwrap();
//! let summary = AssetSummary::new(url, ResourceKind::Image, "site-com-logo.png")
//!     .fail("HTTP error 404 Not Found");
//!
//! match summary.status() {
//!     Status::Success => println!("saved {}", summary.file_name()),
//!     Status::Fail(msg) => println!("kept remote {}: {}", summary.url(), msg),
//!     Status::NotStarted => {}
//! }
//! ```

use super::ResourceKind;
use reqwest::Url;

/// Asset status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Fetch or write failed, the reference keeps its remote URL
    Fail(String),
    /// Not processed yet
    NotStarted,
    /// Saved and rewritten
    Success,
}

/// Represents the outcome for one local asset.
#[derive(Debug, Clone)]
pub struct AssetSummary {
    /// Resolved asset URL.
    url: Url,
    /// Kind of the first element referencing the asset.
    kind: ResourceKind,
    /// File name under the asset directory.
    file_name: String,
    /// Size in bytes.
    size: u64,
    /// Status.
    status: Status,
}

impl AssetSummary {
    /// Create a new [`AssetSummary`].
    pub fn new(url: Url, kind: ResourceKind, file_name: impl Into<String>) -> Self {
        Self {
            url,
            kind,
            file_name: file_name.into(),
            size: 0,
            status: Status::NotStarted,
        }
    }

    /// Attach a status.
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Record the number of bytes saved.
    pub fn with_size(self, size: u64) -> Self {
        Self { size, ..self }
    }

    /// Get the asset URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the asset kind.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Get the file name under the asset directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the saved size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the asset was saved.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_summary() -> AssetSummary {
        let url = Url::parse("http://example.com/test.css").unwrap();
        AssetSummary::new(url, ResourceKind::Link, "example-com-test.css")
    }

    #[test]
    fn test_summary_creation() {
        let summary = create_test_summary();

        assert_eq!(summary.url().as_str(), "http://example.com/test.css");
        assert_eq!(summary.kind(), ResourceKind::Link);
        assert_eq!(summary.file_name(), "example-com-test.css");
        assert_eq!(summary.size(), 0);
        assert_eq!(summary.status(), &Status::NotStarted);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_summary_with_status_and_size() {
        let summary = create_test_summary()
            .with_size(1024)
            .with_status(Status::Success);

        assert_eq!(summary.size(), 1024);
        assert!(summary.is_success());
    }

    #[test]
    fn test_summary_fail() {
        let summary = create_test_summary().fail("Network error");

        match summary.status() {
            Status::Fail(msg) => assert_eq!(msg, "Network error"),
            _ => panic!("Expected Fail status"),
        }
    }
}

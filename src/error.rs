//! Error handling for the page loader.
//!
//! [`Error`] classifies every failure the pipeline can hit while fetching,
//! parsing or storing. Whether an error is fatal depends on the role of the
//! resource: anything that goes wrong for the page itself aborts the run and
//! is surfaced as a [`DownloadError`], while the same error for an individual
//! asset is only logged and recorded in that asset's summary.

use crate::loader::Stage;
use reqwest::{StatusCode, Url};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen while loading a page.
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a client or server error status.
    #[error("HTTP error {status} for {url}")]
    Http {
        /// URL that was requested.
        url: Url,
        /// Status code of the response.
        status: StatusCode,
    },

    /// The request could not be completed (connection refused, DNS failure,
    /// timeout, body interrupted).
    #[error("network error for {url}")]
    Network {
        /// URL that was requested.
        url: Url,
        #[source]
        source: reqwest_middleware::Error,
    },

    /// A directory or file could not be created or written.
    ///
    /// The wrapped [`io::Error`] keeps its [`io::ErrorKind`], so callers can
    /// still tell "permission denied" from "not found" or "already exists".
    #[error("storage error at {}", path.display())]
    Storage {
        /// Path that was being created or written.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The markup could not be parsed.
    #[error("failed to parse markup: {0}")]
    Parse(String),

    /// The page URL cannot be parsed or is not an http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client {
        #[from]
        source: reqwest::Error,
    },
}

impl Error {
    /// Status code for [`Error::Http`], `None` for every other variant.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Wraps an I/O failure on `path`.
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }
}

/// The single top-level error returned by [`PageLoader::download`].
///
/// It names the page, the [`Stage`] the pipeline was in when it failed and
/// wraps the root cause.
///
/// [`PageLoader::download`]: crate::loader::PageLoader::download
#[derive(Error, Debug)]
#[error("failed to download {url} while {stage}")]
pub struct DownloadError {
    url: String,
    stage: Stage,
    #[source]
    source: Error,
}

impl DownloadError {
    pub(crate) fn new(url: impl Into<String>, stage: Stage, source: Error) -> Self {
        Self {
            url: url.into(),
            stage,
            source,
        }
    }

    /// The page URL as given by the caller.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The root cause.
    pub fn cause(&self) -> &Error {
        &self.source
    }

    /// Consumes the error and returns the root cause.
    pub fn into_cause(self) -> Error {
        self.source
    }
}

/// Result type alias for operations that can fail with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Formats `err` followed by its chain of sources, `: `-separated.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

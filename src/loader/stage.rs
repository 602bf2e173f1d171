//! Pipeline stages.

use std::fmt;

/// Stage of a page download.
///
/// A run moves forward through `Idle → FetchingPage → RewritingAssets →
/// PersistingPage → Done` and never revisits a stage. A failure leaves the
/// run in the stage it happened in, as reported by
/// [`DownloadError::stage`](crate::DownloadError::stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Validating the request and preparing the HTTP client.
    Idle,
    /// Fetching the page markup.
    FetchingPage,
    /// Fetching assets and rewriting their references.
    RewritingAssets,
    /// Writing the page file.
    PersistingPage,
    /// Finished.
    Done,
}

impl Stage {
    /// The stage that follows this one, `None` once done.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::FetchingPage),
            Stage::FetchingPage => Some(Stage::RewritingAssets),
            Stage::RewritingAssets => Some(Stage::PersistingPage),
            Stage::PersistingPage => Some(Stage::Done),
            Stage::Done => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "preparing",
            Stage::FetchingPage => "fetching page",
            Stage::RewritingAssets => "rewriting assets",
            Stage::PersistingPage => "persisting page",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

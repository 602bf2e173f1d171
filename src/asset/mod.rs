//! Page assets.
//!
//! - [`reference`] - references discovered while scanning markup
//! - [`summary`] - per-asset outcome reporting

pub mod reference;
pub mod summary;

pub use reference::{AssetReference, ResourceKind};
pub use summary::{AssetSummary, Status};

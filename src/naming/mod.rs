//! Filename codec.
//!
//! Maps URLs to deterministic, filesystem-safe names:
//!
//! - [`slug`] - the pure URL to name functions
//! - [`registry`] - per-page name assignment with collision handling

pub mod registry;
pub mod slug;

pub use registry::NameRegistry;
pub use slug::{assets_dirname, page_filename, page_slug, resource_filename, slugify, PAGE_EXTENSION};

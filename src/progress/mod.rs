//! Progress module containing progress bar functionality.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Progress bar display management and coordination
//!
//! ```rust
//! use page_loader::loader::PageLoaderBuilder;
//! use page_loader::progress::StyleOptions;
//!
//! let loader = PageLoaderBuilder::new()
//!     .style_options(StyleOptions::default())
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};

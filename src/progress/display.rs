//! Progress bar display management and coordination.
//!
//! [`ProgressDisplay`] owns the main bar (settled assets of a page) and hands
//! out one child bar per asset fetch.
//!
//! ```rust
//! use page_loader::progress::{ProgressDisplay, StyleOptions};
//!
//! let progress_display = ProgressDisplay::new(StyleOptions::hidden(), 3);
//!
//! let file_progress = progress_display.create_child_progress(1024);
//! file_progress.inc(512);
//! progress_display.finish_child(file_progress);
//! progress_display.increment_main();
//! progress_display.finish();
//! ```

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::Arc;

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: Arc<MultiProgress>,
    /// The main progress bar for overall progress.
    main: Arc<ProgressBar>,
    /// Style options for progress bars.
    style_options: StyleOptions,
    /// Whether the main progress bar is shown.
    show_main_progress: bool,
}

impl ProgressDisplay {
    /// Create a new progress display manager for `total_assets` fetches.
    ///
    /// The main bar is not shown for a page without assets.
    pub fn new(style_options: StyleOptions, total_assets: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => Arc::new(MultiProgress::new()),
            false => Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden())),
        };

        let show_main_progress = total_assets > 0;

        let main = if show_main_progress {
            Arc::new(
                multi.add(
                    style_options
                        .main()
                        .clone()
                        .to_progress_bar(total_assets as u64),
                ),
            )
        } else {
            Arc::new(ProgressBar::hidden())
        };

        if show_main_progress {
            main.tick();
        }

        Self {
            multi,
            main,
            style_options,
            show_main_progress,
        }
    }

    /// Create a child progress bar for one asset.
    ///
    /// `size` may be zero when unknown; the fetcher sets the length once the
    /// response headers arrive.
    pub fn create_child_progress(&self, size: u64) -> ProgressBar {
        self.multi
            .add(self.style_options.child().clone().to_progress_bar(size))
    }

    /// Increment the main progress bar by one.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Position of the main progress bar.
    pub fn settled(&self) -> u64 {
        self.main.position()
    }

    /// Finish the progress display, clearing or keeping bars based on configuration.
    pub fn finish(self) {
        if self.show_main_progress {
            if self.style_options.main().clear {
                self.main.finish_and_clear();
            } else {
                self.main.finish();
            }
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }
}

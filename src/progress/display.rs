//! Terminal rendering of a job's progress.
//!
//! [`ProgressDisplay`] follows a [`ProgressWatcher`] and mirrors every value
//! it observes onto an indicatif bar, until the job ends.
//!
//! ```rust,no_run
//! use chunkdl::downloader::DownloaderBuilder;
//! use chunkdl::progress::{ProgressBarOpts, ProgressDisplay};
//! use chunkdl::Download;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new().chunks(8).build();
//! let handle = downloader.spawn(Download::try_from("https://example.com/file.iso")?);
//! let display = ProgressDisplay::new(ProgressBarOpts::with_pip_style());
//! let follow = tokio::spawn(display.follow(handle.progress()));
//! let summary = handle.wait().await?;
//! follow.await?;
//! # Ok(())
//! # }
//! ```

use super::aggregator::{Progress, ProgressWatcher};
use super::style::ProgressBarOpts;
use indicatif::ProgressBar;

/// A single byte-progress bar driven by a [`ProgressWatcher`].
pub struct ProgressDisplay {
    bar: ProgressBar,
    clear: bool,
}

impl ProgressDisplay {
    /// Create a display with the given bar options.
    pub fn new(opts: ProgressBarOpts) -> Self {
        let clear = opts.clear;
        Self {
            bar: opts.to_progress_bar(0),
            clear,
        }
    }

    /// The underlying progress bar.
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Render values from `watcher` until the job ends, then finish the bar.
    ///
    /// Returns the last observed progress.
    pub async fn follow(self, mut watcher: ProgressWatcher) -> Progress {
        self.render(watcher.current());
        while let Some(progress) = watcher.changed().await {
            self.render(progress);
        }

        let last = watcher.current();
        self.render(last);
        if self.clear {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
        last
    }

    fn render(&self, progress: Progress) {
        if let Some(total) = progress.total {
            if self.bar.length() != Some(total) {
                self.bar.set_length(total);
            }
        }
        // Rollbacks move the bar backwards on purpose.
        self.bar.set_position(progress.transferred);
    }
}

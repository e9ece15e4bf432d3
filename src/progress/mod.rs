//! Progress reporting for download jobs.
//!
//! - `aggregator` - Combines worker deliveries and rollbacks into one running total
//! - `display` - Renders that total as an indicatif progress bar
//! - `style` - Progress bar styling options

pub(crate) mod aggregator;
pub(crate) mod display;
pub(crate) mod style;

pub use aggregator::{Progress, ProgressAggregator, ProgressWatcher};
pub use display::ProgressDisplay;
pub use style::ProgressBarOpts;

//! Layout and drawing engine for the status bar.
//!
//! Turns a [`SegmentStore`](powerbar_core::SegmentStore) snapshot into one
//! line of exactly the requested width:
//! - [`width`]: column measurement and ellipsis truncation
//! - [`progress`]: block-glyph progress bars
//! - [`segment`]: per-segment composition
//! - [`layout`]: side joining and width fitting
//!
//! Everything here is a pure function of its inputs.

pub mod layout;
pub mod progress;
pub mod segment;
pub mod width;

pub use layout::{render_bar, RenderedSegment};
pub use progress::render_progress_bar;
pub use segment::render_segment;

use powerbar_config::Settings;

/// Which segments appear on each side of the bar, and how they are drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarLayout {
    pub left:      Vec<String>,
    pub right:     Vec<String>,
    pub separator: String,
    /// Progress-bar width in columns.
    pub bar_width: usize,
}

impl BarLayout {
    /// Build a [`BarLayout`] from the loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            left:      settings.left.clone(),
            right:     settings.right.clone(),
            separator: settings.separator.clone(),
            bar_width: settings.bar_width,
        }
    }
}

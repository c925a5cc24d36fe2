//! UI Widgets for Scrub

mod scrollbar;
mod slider;
pub mod status_bar;

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders};

pub use scrollbar::{DoubleScrollBarWidget, ScrollBarWidget};
pub use slider::SliderWidget;
pub use status_bar::{HelpWidget, StatusBarWidget};

/// Area left inside the bordered block every widget draws around itself.
///
/// Hosts size the widgets and their mouse mapping from this.
pub fn bordered_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

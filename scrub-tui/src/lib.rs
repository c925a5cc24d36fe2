//! Terminal UI for Scrub - canvas surface, themes and widgets
//!
//! Renders the toolkit-agnostic scrollbars onto a braille canvas.

mod app;
mod surface;
mod theme;
pub mod widgets;

pub use app::{MessageType, PlayerState};
pub use surface::{parse_color, CanvasSurface};
pub use theme::{Theme, CRT_AMBER, CRT_GREEN, CYBERPUNK, THEMES};
pub use widgets::status_bar::HelpWidget;
pub use widgets::{bordered_inner, DoubleScrollBarWidget, ScrollBarWidget, SliderWidget, StatusBarWidget};

//! Scrollbar and slider widgets for scrubbing through frames
//!
//! The widgets are toolkit-agnostic: a host feeds them [`PointerEvent`]s and
//! sizes, and they draw themselves onto any [`Surface`]. Values leave the
//! widgets through plain `FnMut` callbacks and through the [`ScrollUpdate`]s
//! their methods return.

mod axis;
mod double;
mod drag;
mod error;
mod palette;
mod pointer;
mod scrollbar;
mod slider;
mod squeeze;
mod surface;
mod ticks;

pub use axis::{Orientation, ValueAxis};
pub use double::{DoubleScrollBar, DoubleScrollBarConfig, Part};
pub use drag::{DragCandidate, DragRegion, DragState, Grip, Placement, Shape};
pub use error::WidgetError;
pub use palette::Palette;
pub use pointer::{Interaction, PointerEvent};
pub use scrollbar::{FrameCallback, RegionCallback, ScrollBar, ScrollBarConfig, ScrollUpdate};
pub use slider::{Slider, SliderConfig, ValueCallback};
pub use squeeze::{centered_region, settle, squeeze, FrameRange, Region, MIN_REGION_WIDTH};
pub use surface::{Anchor, Offset, Point, Surface};
pub use ticks::{layout_ticks, seconds_text, tick_increment, Tick, TICK_DIVISIONS};

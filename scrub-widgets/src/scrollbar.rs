//! Plot scrollbar - a frame cursor over a time axis
//!
//! The bar shows a draggable vertical line at the current frame, a time axis
//! with tick labels underneath, and optionally a filled active region that
//! always surrounds the current frame.

use tracing::{debug, warn};

use crate::axis::ValueAxis;
use crate::drag::{DragCandidate, DragRegion, DragState, Placement, Shape};
use crate::error::WidgetError;
use crate::palette::Palette;
use crate::pointer::{Interaction, PointerEvent};
use crate::squeeze::{centered_region, settle, FrameRange, Region, MIN_REGION_WIDTH};
use crate::surface::{Anchor, Point, Surface};
use crate::ticks::{layout_ticks, Tick};

/// Called with the new frame after every committed frame change
pub type FrameCallback = Box<dyn FnMut(i64)>;
/// Called with the new region after every committed active region change
pub type RegionCallback = Box<dyn FnMut(Region)>;

/// Absorbs float error when converting a pixel back to a whole frame
const FRAME_EPSILON: f64 = 1e-6;

/// Width of the default active region as a fraction of the range
const DEFAULT_REGION_FRACTION: f64 = 0.2;

/// What changed during one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollUpdate {
    pub frame: Option<i64>,
    pub region: Option<Region>,
}

impl ScrollUpdate {
    pub fn is_empty(&self) -> bool {
        self.frame.is_none() && self.region.is_none()
    }

    /// Fold a later update into this one; later values win
    pub fn merge(&mut self, later: ScrollUpdate) {
        if later.frame.is_some() {
            self.frame = later.frame;
        }
        if later.region.is_some() {
            self.region = later.region;
        }
    }
}

/// Scrollbar configuration
#[derive(Debug, Clone)]
pub struct ScrollBarConfig {
    /// Axis label drawn under the ticks
    pub label: Option<String>,
    pub frame_rate: f64,
    /// Horizontal padding on each side, as a fraction of the width
    pub padx: f64,
    /// Show the active region fill
    pub show_fill: bool,
    /// Let the user drag the fill and its edges
    pub active_fill: bool,
    /// Keep the line strictly inside the active region
    pub confine_to_active_region: bool,
    /// Initial active region; centred on the start frame when absent
    pub active_region: Option<Region>,
    pub fill_text: String,
    /// Frames moved per wheel notch
    pub wheel_steps: i64,
    pub max_ticks: usize,
    /// Slack, as a fraction of the axis width, for ticks just outside the ends
    pub tick_x_buffer: f64,
    pub line_width: f64,
    /// Half-width of the grabbable band around the line and fill edges
    pub grab_margin: f64,
    pub label_font_size: u16,
    pub tick_font_size: u16,
    pub palette: Palette,
    pub enabled: bool,
}

impl Default for ScrollBarConfig {
    fn default() -> Self {
        Self {
            label: None,
            frame_rate: 29.97,
            padx: 0.04,
            show_fill: false,
            active_fill: false,
            confine_to_active_region: false,
            active_region: None,
            fill_text: String::new(),
            wheel_steps: 1,
            max_ticks: 15,
            tick_x_buffer: 0.01,
            line_width: 6.0,
            grab_margin: 4.0,
            label_font_size: 10,
            tick_font_size: 9,
            palette: Palette::default(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: f64,
    height: f64,
    /// Baseline of the axis; the line and fill hang above it
    axis_y: f64,
    /// Bottom of the tick marks, top of the tick labels
    tick_y: f64,
}

/// Frame state and the rules that govern it, kept apart from the drag
/// regions so constraint closures can borrow it alongside them.
#[derive(Debug, Clone)]
struct FrameCursor {
    range: FrameRange,
    current: i64,
    region: Option<Region>,
    confine: bool,
    axis: ValueAxis,
}

impl FrameCursor {
    fn frame_x(&self, frame: i64) -> f64 {
        self.axis.to_pixel(frame as f64)
    }

    fn x_to_value(&self, x: f64) -> i64 {
        (self.axis.to_value(x) + FRAME_EPSILON) as i64
    }

    /// Frame under `x`, limited to the selectable frames
    fn x_to_frame(&self, x: f64) -> i64 {
        self.range.clamp_position(self.x_to_value(x))
    }

    fn confined(&self, frame: i64) -> i64 {
        match self.region {
            Some(region) if self.confine => frame.max(region.start + 1).min(region.end - 1),
            _ => frame,
        }
    }

    /// Squeeze the region back around the current frame if it no longer fits
    fn update_region(&mut self) -> Option<Region> {
        let region = self.region?;
        let squeezed = settle(self.range, self.current, region);
        if squeezed == region {
            return None;
        }
        self.region = Some(squeezed);
        Some(squeezed)
    }

    /// Move to an already-clamped frame; the region follows
    fn seek(&mut self, frame: i64) -> ScrollUpdate {
        if frame == self.current {
            return ScrollUpdate::default();
        }
        self.current = frame;
        ScrollUpdate {
            frame: Some(frame),
            region: self.update_region(),
        }
    }

    fn drag_line(&mut self, cursor_x: f64, update: &mut ScrollUpdate) -> Placement {
        let frame = self.confined(self.x_to_frame(cursor_x));
        update.merge(self.seek(frame));
        Placement::Line(self.frame_x(self.current))
    }

    fn drag_region(&mut self, candidate: DragCandidate, update: &mut ScrollUpdate) -> Option<Placement> {
        let region = self.region?;
        let (min, max) = (self.range.min(), self.range.max());
        let next = match candidate {
            DragCandidate::LeftEdge { cursor, .. } => {
                let start = self.x_to_value(cursor).max(min).min(self.current - 1);
                Region::new(start, region.end)
            }
            DragCandidate::RightEdge { cursor, .. } => {
                let end = self.x_to_value(cursor).max(self.current + 1).min(max);
                Region::new(region.start, end)
            }
            DragCandidate::Body { new_start, .. } => {
                let shift = self.x_to_value(new_start).clamp(min, max) - region.start;
                let moved = settle(
                    self.range,
                    self.current,
                    Region::new(region.start + shift, region.end + shift),
                );
                // a body drag only commits when both edges moved; a region
                // flush against a range end settles back to itself
                if moved.start != region.start && moved.end != region.end {
                    moved
                } else {
                    region
                }
            }
            DragCandidate::Line { .. } => return None,
        };
        if next != region {
            self.region = Some(next);
            update.region = Some(next);
        }
        Some(Placement::Fill {
            start: self.frame_x(next.start),
            end: self.frame_x(next.end),
        })
    }
}

/// Interactive frame scrollbar
pub struct ScrollBar {
    config: ScrollBarConfig,
    cursor: FrameCursor,
    frame_rate: f64,
    geometry: Option<Geometry>,
    line: DragRegion,
    fill: Option<DragRegion>,
    interaction: Interaction,
    ticks: Vec<Tick>,
    on_frame: Option<FrameCallback>,
    on_region: Option<RegionCallback>,
}

impl std::fmt::Debug for ScrollBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollBar")
            .field("range", &self.cursor.range)
            .field("current", &self.cursor.current)
            .field("region", &self.cursor.region)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

impl ScrollBar {
    /// Create a scrollbar over `range` positioned at `start` (clamped).
    pub fn new(range: FrameRange, start: i64, config: ScrollBarConfig) -> Result<Self, WidgetError> {
        validate_frame_rate(config.frame_rate)?;
        if config.show_fill && range.width() < MIN_REGION_WIDTH {
            return Err(WidgetError::RangeTooNarrow {
                min: range.min(),
                max: range.max(),
            });
        }
        if let Some(region) = config.active_region {
            if region.end <= region.start {
                return Err(WidgetError::EmptyRegion {
                    start: region.start,
                    end: region.end,
                });
            }
            if region.start < range.min() || region.end > range.max() {
                return Err(WidgetError::RegionOutOfBounds {
                    start: region.start,
                    end: region.end,
                    min: range.min(),
                    max: range.max(),
                });
            }
        }

        let current = range.clamp_position(start);
        let region = config.show_fill.then(|| {
            let requested = config
                .active_region
                .unwrap_or_else(|| centered_region(range, current, DEFAULT_REGION_FRACTION));
            settle(range, current, requested)
        });

        let mut line = DragRegion::line(0.0, 0.0, 0.0, config.grab_margin);
        line.set_enabled(config.enabled);
        let fill = config.show_fill.then(|| {
            let mut fill = DragRegion::fill(0.0, 0.0, 0.0, 0.0, config.grab_margin);
            fill.set_enabled(config.enabled && config.active_fill);
            fill
        });

        Ok(Self {
            frame_rate: config.frame_rate,
            cursor: FrameCursor {
                range,
                current,
                region,
                confine: config.confine_to_active_region,
                axis: ValueAxis::new(range.min() as f64, range.max() as f64, 0.0, 0.0),
            },
            config,
            geometry: None,
            line,
            fill,
            interaction: Interaction::Idle,
            ticks: Vec::new(),
            on_frame: None,
            on_region: None,
        })
    }

    /// Register the frame callback
    pub fn on_frame(mut self, callback: impl FnMut(i64) + 'static) -> Self {
        self.on_frame = Some(Box::new(callback));
        self
    }

    /// Register the active region callback
    pub fn on_region(mut self, callback: impl FnMut(Region) + 'static) -> Self {
        self.on_region = Some(Box::new(callback));
        self
    }

    pub fn position(&self) -> i64 {
        self.cursor.current
    }

    pub fn range(&self) -> FrameRange {
        self.cursor.range
    }

    /// `(position, min, max)`
    pub fn status(&self) -> (i64, i64, i64) {
        (self.cursor.current, self.cursor.range.min(), self.cursor.range.max())
    }

    pub fn active_region(&self) -> Option<Region> {
        self.cursor.region
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn line_state(&self) -> DragState {
        self.line.state()
    }

    pub fn fill_state(&self) -> Option<DragState> {
        self.fill.as_ref().map(DragRegion::state)
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn config(&self) -> &ScrollBarConfig {
        &self.config
    }

    /// Size given by the last resize
    pub fn size(&self) -> Option<(f64, f64)> {
        self.geometry.map(|g| (g.width, g.height))
    }

    /// Pixel of a frame along the axis; `None` before the first layout
    pub fn frame_x(&self, frame: i64) -> Option<f64> {
        self.geometry.map(|_| self.cursor.frame_x(frame))
    }

    /// Seconds at the current frame
    pub fn seconds(&self) -> f64 {
        self.cursor.current as f64 / self.frame_rate
    }

    /// Lay the bar out for a new size and recompute the ticks
    pub fn resize(&mut self, width: f64, height: f64) {
        let (axis_fraction, tick_fraction) = if self.config.label.is_some() {
            (0.5, 0.59)
        } else {
            (0.65, 0.76)
        };
        let geometry = Geometry {
            width,
            height,
            axis_y: height * axis_fraction,
            tick_y: height * tick_fraction,
        };
        self.geometry = Some(geometry);
        self.cursor
            .axis
            .set_span(width * self.config.padx, width * (1.0 - self.config.padx));
        self.line.set_extent(0.0, geometry.axis_y);
        if let Some(fill) = self.fill.as_mut() {
            fill.set_extent(0.0, geometry.axis_y);
        }
        self.relayout();
    }

    /// Change the frame range. Fires the region callback if the region moves;
    /// never fires the frame callback.
    pub fn set_range(&mut self, min: i64, max: i64) -> Result<ScrollUpdate, WidgetError> {
        let range = FrameRange::new(min, max)?;
        if self.fill.is_some() && range.width() < MIN_REGION_WIDTH {
            return Err(WidgetError::RangeTooNarrow { min, max });
        }
        self.cursor.range = range;
        self.cursor.axis.set_range(min as f64, max as f64);

        let mut update = ScrollUpdate::default();
        let clamped = range.clamp_position(self.cursor.current);
        if clamped != self.cursor.current {
            self.cursor.current = clamped;
            update.frame = Some(clamped);
        }
        update.region = self.cursor.update_region();

        self.relayout();
        self.emit(update, false);
        Ok(update)
    }

    pub fn set_frame_rate(&mut self, frame_rate: f64) -> Result<(), WidgetError> {
        validate_frame_rate(frame_rate)?;
        self.frame_rate = frame_rate;
        self.relayout();
        Ok(())
    }

    /// Move to `frame` (clamped into the selectable frames).
    ///
    /// Setting the current frame again is a no-op and fires nothing.
    pub fn set_position(&mut self, frame: i64, fire_callback: bool) -> ScrollUpdate {
        let frame = self.cursor.range.clamp_position(frame);
        let update = self.cursor.seek(frame);
        if !update.is_empty() {
            self.place_elements();
            self.emit(update, fire_callback);
        }
        update
    }

    /// Replace the active region. It is squeezed if it would exclude the
    /// current frame.
    pub fn set_active_region(&mut self, start: i64, end: i64) -> Result<ScrollUpdate, WidgetError> {
        if self.fill.is_none() {
            return Err(WidgetError::NoActiveRegion);
        }
        if end <= start {
            return Err(WidgetError::EmptyRegion { start, end });
        }
        let range = self.cursor.range;
        if start < range.min() || end > range.max() {
            return Err(WidgetError::RegionOutOfBounds {
                start,
                end,
                min: range.min(),
                max: range.max(),
            });
        }

        let region = settle(range, self.cursor.current, Region::new(start, end));
        if self.cursor.region == Some(region) {
            return Ok(ScrollUpdate::default());
        }
        self.cursor.region = Some(region);
        let update = ScrollUpdate {
            frame: None,
            region: Some(region),
        };
        self.place_elements();
        self.emit(update, false);
        Ok(update)
    }

    /// Enable or disable user interaction
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        self.line.set_enabled(enabled);
        if let Some(fill) = self.fill.as_mut() {
            fill.set_enabled(enabled && self.config.active_fill);
        }
        if !enabled {
            self.interaction = Interaction::Idle;
        }
    }

    /// Step by `increment` frames.
    ///
    /// With `looped`, stepping back from the first frame wraps to `max - 1`
    /// and stepping forward from the last frame wraps to `min + 1`. Without
    /// it, stepping forward from the last frame returns false.
    pub fn increment_frame(&mut self, increment: i64, looped: bool, fire_callback: bool) -> bool {
        let (current, min, max) = self.status();
        let target = if looped && current == min + 1 && increment == -1 {
            max - 1
        } else if current == max && increment >= 0 {
            if !looped {
                return false;
            }
            min + 1
        } else {
            current + increment
        };
        self.set_position(target, fire_callback);
        true
    }

    /// Scroll by wheel notches
    pub fn scroll_wheel(&mut self, steps: f64) -> ScrollUpdate {
        let target = (self.cursor.current as f64 + steps * self.config.wheel_steps as f64) as i64;
        let frame = self.cursor.confined(self.cursor.range.clamp_position(target));
        self.set_position(frame, true)
    }

    /// Feed a pointer event. Callbacks fire for anything the event commits.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ScrollUpdate {
        if !self.config.enabled {
            debug!(?event, "pointer event on disabled scrollbar");
            return ScrollUpdate::default();
        }
        let Some(geometry) = self.geometry else {
            warn!(?event, "pointer event before scrollbar layout");
            return ScrollUpdate::default();
        };

        match event {
            PointerEvent::Enter => {
                if self.interaction == Interaction::Idle {
                    self.interaction = Interaction::Hovering;
                }
                ScrollUpdate::default()
            }
            PointerEvent::Leave => {
                if self.interaction != Interaction::Dragging {
                    self.interaction = Interaction::Idle;
                    self.clear_hover();
                }
                ScrollUpdate::default()
            }
            PointerEvent::Down { x, y } => {
                self.pointer_down(x, y);
                ScrollUpdate::default()
            }
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Up { x, y } => {
                self.pointer_up(x, y, geometry);
                ScrollUpdate::default()
            }
            PointerEvent::Wheel { steps } => self.scroll_wheel(steps),
        }
    }

    fn pointer_down(&mut self, x: f64, y: f64) {
        let grabbed = self.line.pointer_down(x, y).is_some()
            || self
                .fill
                .as_mut()
                .is_some_and(|fill| fill.pointer_down(x, y).is_some());
        self.interaction = if grabbed {
            Interaction::Dragging
        } else {
            Interaction::Hovering
        };
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> ScrollUpdate {
        if self.interaction != Interaction::Dragging {
            self.interaction = Interaction::Hovering;
            self.update_hover(x, y);
            return ScrollUpdate::default();
        }

        let mut update = ScrollUpdate::default();
        let cursor = &mut self.cursor;
        if self.line.is_dragging() {
            self.line.pointer_move(x, |candidate| match candidate {
                DragCandidate::Line { cursor: cursor_x, .. } => Some(cursor.drag_line(cursor_x, &mut update)),
                _ => None,
            });
        } else if let Some(fill) = self.fill.as_mut().filter(|fill| fill.is_dragging()) {
            fill.pointer_move(x, |candidate| cursor.drag_region(candidate, &mut update));
        }

        if update.region.is_some() {
            self.place_elements();
        }
        self.emit(update, true);
        update
    }

    fn pointer_up(&mut self, x: f64, y: f64, geometry: Geometry) {
        self.line.pointer_up(x, y);
        if let Some(fill) = self.fill.as_mut() {
            fill.pointer_up(x, y);
        }
        let inside = (0.0..=geometry.width).contains(&x) && (0.0..=geometry.height).contains(&y);
        if inside {
            self.interaction = Interaction::Hovering;
            self.update_hover(x, y);
        } else {
            self.interaction = Interaction::Idle;
            self.clear_hover();
        }
    }

    /// The line sits above the fill, so it takes the hover when both are hit
    fn update_hover(&mut self, x: f64, y: f64) {
        self.line.hover(x, y);
        let over_line = self.line.state().hovering;
        if let Some(fill) = self.fill.as_mut() {
            let over_fill = !over_line && fill.hit(x, y).is_some();
            fill.set_hovering(over_fill);
        }
    }

    fn clear_hover(&mut self) {
        self.line.set_hovering(false);
        if let Some(fill) = self.fill.as_mut() {
            fill.set_hovering(false);
        }
    }

    /// Move the line and fill to the current frame and region
    fn place_elements(&mut self) {
        if self.geometry.is_none() {
            return;
        }
        self.line
            .place(Placement::Line(self.cursor.frame_x(self.cursor.current)));
        if let (Some(fill), Some(region)) = (self.fill.as_mut(), self.cursor.region) {
            fill.place(Placement::Fill {
                start: self.cursor.frame_x(region.start),
                end: self.cursor.frame_x(region.end),
            });
        }
    }

    fn relayout(&mut self) {
        if self.geometry.is_none() {
            debug!("scrollbar not laid out yet, skipping relayout");
            return;
        }
        self.place_elements();
        let range = self.cursor.range;
        self.ticks = layout_ticks(
            range.min() as f64 / self.frame_rate,
            range.max() as f64 / self.frame_rate,
            self.cursor.axis.start(),
            self.cursor.axis.end(),
            self.config.max_ticks,
            self.config.tick_x_buffer,
        );
    }

    /// Region callback first, then the frame callback
    fn emit(&mut self, update: ScrollUpdate, fire_frame: bool) {
        if let (Some(region), Some(callback)) = (update.region, self.on_region.as_mut()) {
            callback(region);
        }
        if !fire_frame {
            return;
        }
        if let (Some(frame), Some(callback)) = (update.frame, self.on_frame.as_mut()) {
            callback(frame);
        }
    }

    /// Draw the bar. Does nothing before the first layout.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(g) = self.geometry else {
            warn!("draw called before scrollbar layout");
            return;
        };
        let palette = &self.config.palette;

        if let Some(fill) = &self.fill {
            if let Shape::Fill { start, end } = fill.shape() {
                surface.rect(Point::new(start, 0.0), Point::new(end, g.axis_y), &palette.fill);
                let edge = if fill.state().highlighted() {
                    &palette.fill_edge
                } else {
                    &palette.fill
                };
                for x in [start, end] {
                    surface.line(Point::new(x, 0.0), Point::new(x, g.axis_y), 2.0, edge);
                }
                if !self.config.fill_text.is_empty() {
                    surface.text(
                        Point::new((start + end) / 2.0, g.axis_y / 2.0),
                        &self.config.fill_text,
                        Anchor::Center,
                        self.config.tick_font_size,
                        &palette.text,
                    );
                }
            }
        }

        let axis = &self.cursor.axis;
        surface.line(
            Point::new(axis.start(), g.axis_y),
            Point::new(axis.end(), g.axis_y),
            1.0,
            &palette.axis,
        );
        if let Some(label) = &self.config.label {
            surface.text(
                Point::new(g.width / 2.0, g.height),
                label,
                Anchor::South,
                self.config.label_font_size,
                &palette.text,
            );
        }
        for tick in &self.ticks {
            surface.line(
                Point::new(tick.x, g.axis_y),
                Point::new(tick.x, g.tick_y),
                1.0,
                &palette.axis,
            );
            surface.text(
                Point::new(tick.x, g.tick_y),
                &tick.label,
                Anchor::North,
                self.config.tick_font_size,
                &palette.text,
            );
        }

        if let Shape::Line { at } = self.line.shape() {
            let state = self.line.state();
            let color = if !self.config.enabled {
                &palette.disabled
            } else if state.dragging {
                &palette.line_drag
            } else if state.hovering {
                &palette.line_hover
            } else {
                &palette.line
            };
            surface.line(
                Point::new(at, 0.0),
                Point::new(at, g.axis_y),
                self.config.line_width,
                color,
            );
        }
    }
}

fn validate_frame_rate(frame_rate: f64) -> Result<(), WidgetError> {
    if frame_rate > 0.0 && frame_rate.is_finite() {
        Ok(())
    } else {
        Err(WidgetError::InvalidFrameRate(frame_rate))
    }
}

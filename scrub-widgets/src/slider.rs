//! Stepped value slider

use tracing::debug;

use crate::axis::{Orientation, ValueAxis};
use crate::drag::{DragRegion, DragState, Placement};
use crate::error::WidgetError;
use crate::palette::Palette;
use crate::pointer::{Interaction, PointerEvent};
use crate::surface::{Point, Surface};

/// Called with the new value after every committed change
pub type ValueCallback = Box<dyn FnMut(f64)>;

#[derive(Debug, Clone)]
pub struct SliderConfig {
    pub orientation: Orientation,
    /// Extent along the travel direction, in pixels
    pub length: f64,
    /// Extent across the travel direction
    pub thickness: f64,
    /// Thumb extent along the travel direction
    pub thumb_size: f64,
    pub track_width: f64,
    pub palette: Palette,
    pub enabled: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            length: 250.0,
            thickness: 35.0,
            thumb_size: 20.0,
            track_width: 10.0,
            palette: Palette::default(),
            enabled: true,
        }
    }
}

/// Number of decimals in the shortest text form of `step`
fn step_decimals(step: f64) -> usize {
    if step.fract() == 0.0 {
        return 0;
    }
    format!("{}", step).split('.').nth(1).map_or(0, str::len)
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// A slider that snaps to `min, min + step, ...`
pub struct Slider {
    min: f64,
    max: f64,
    step: f64,
    decimals: usize,
    /// Index of the last step that does not pass `max`
    last_step: f64,
    current: f64,
    config: SliderConfig,
    axis: ValueAxis,
    thumb: DragRegion,
    interaction: Interaction,
    on_change: Option<ValueCallback>,
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("current", &self.current)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

impl Slider {
    pub fn new(min: f64, max: f64, step: f64, start: f64, config: SliderConfig) -> Result<Self, WidgetError> {
        if !(min < max) || !min.is_finite() || !max.is_finite() {
            return Err(WidgetError::InvalidRange { min, max });
        }
        if !(step > 0.0) || !step.is_finite() {
            return Err(WidgetError::InvalidStep(step));
        }

        let decimals = step_decimals(step);
        // a max that sits on a step counts despite float error in the ratio
        let ratio = (max - min) / step;
        let nearest = ratio.round();
        let last_step = if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
            nearest
        } else {
            ratio.floor()
        };

        let mut thumb = DragRegion::fill(0.0, 0.0, 0.0, config.thickness, 0.0);
        thumb.set_enabled(config.enabled);
        let mut slider = Self {
            min,
            max,
            step,
            decimals,
            last_step,
            current: min,
            axis: ValueAxis::new(min, max, 0.0, 0.0),
            config,
            thumb,
            interaction: Interaction::Idle,
            on_change: None,
        };
        slider.current = slider.round_value(start);
        let (length, thickness) = (slider.config.length, slider.config.thickness);
        slider.resize(length, thickness);
        Ok(slider)
    }

    pub fn on_change(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn thumb_state(&self) -> DragState {
        self.thumb.state()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Nearest step in `[min, max]`; ties go to the lower one
    pub fn round_value(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let steps = ((value - self.min) / self.step).clamp(0.0, self.last_step);
        let lower = steps.floor();
        let index = if steps - lower > 0.5 { lower + 1.0 } else { lower };
        round_to(self.min + index * self.step, self.decimals).clamp(self.min, self.max)
    }

    /// Largest value the slider can take; `max` itself when it lies on a step
    pub fn last_value(&self) -> f64 {
        self.round_value(self.max)
    }

    /// Current value with as many decimals as the step
    pub fn value_text(&self) -> String {
        if self.decimals == 0 {
            format!("{}", self.current.trunc() as i64)
        } else {
            format!("{:.*}", self.decimals, self.current)
        }
    }

    /// Pixel size as `(width, height)`
    pub fn size(&self) -> (f64, f64) {
        self.config
            .orientation
            .join(self.config.length, self.config.thickness)
    }

    /// Relayout for a new size. The thumb keeps its value.
    pub fn resize(&mut self, length: f64, thickness: f64) {
        self.config.length = length;
        self.config.thickness = thickness;
        let half = self.config.thumb_size / 2.0;
        match self.config.orientation {
            Orientation::Horizontal => self.axis.set_span(half, length - half),
            // min at the bottom
            Orientation::Vertical => self.axis.set_span(length - half, half),
        }
        self.thumb.set_extent(0.0, thickness);
        self.place_thumb();
    }

    /// Pixel of the thumb centre along the travel direction for `value`
    pub fn to_pixel(&self, value: f64) -> f64 {
        self.axis.to_pixel(value)
    }

    /// Allowed value under a point
    pub fn cursor_value(&self, x: f64, y: f64) -> f64 {
        let (along, _) = self.config.orientation.split(x, y);
        self.round_value(self.axis.to_value(along))
    }

    /// Thumb rectangle as `(top_left, bottom_right)`
    pub fn thumb_rect(&self) -> (Point, Point) {
        let center = self.to_pixel(self.current);
        let half = self.config.thumb_size / 2.0;
        let orientation = self.config.orientation;
        let (x0, y0) = orientation.join(center - half, 0.0);
        let (x1, y1) = orientation.join(center + half, self.config.thickness);
        (Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Set the value (snapped to the nearest step). Returns false when the
    /// value did not change, in which case nothing fires.
    pub fn set_value(&mut self, value: f64, fire_callback: bool) -> bool {
        if value.is_nan() {
            debug!("ignoring NaN slider value");
            return false;
        }
        let value = self.round_value(value);
        if value == self.current {
            return false;
        }
        self.current = value;
        self.place_thumb();
        if fire_callback {
            if let Some(callback) = self.on_change.as_mut() {
                callback(value);
            }
        }
        true
    }

    /// Accept text from an edit box; out-of-range or unparsable text is rejected.
    pub fn set_value_text(&mut self, text: &str) -> Result<f64, WidgetError> {
        let invalid = || WidgetError::InvalidValueText(text.to_string());
        let value: f64 = text.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(invalid());
        }
        self.set_value(value, true);
        Ok(self.current)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        self.thumb.set_enabled(enabled);
        if !enabled {
            self.interaction = Interaction::Idle;
        }
    }

    /// Feed a pointer event; returns the new value if it changed
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<f64> {
        if !self.config.enabled {
            debug!(?event, "pointer event on disabled slider");
            return None;
        }
        let before = self.current;
        match event {
            PointerEvent::Enter => {
                if self.interaction == Interaction::Idle {
                    self.interaction = Interaction::Hovering;
                }
            }
            PointerEvent::Leave => {
                if self.interaction != Interaction::Dragging {
                    self.interaction = Interaction::Idle;
                    self.thumb.set_hovering(false);
                }
            }
            PointerEvent::Down { x, y } => {
                self.interaction = Interaction::Dragging;
                let value = self.cursor_value(x, y);
                self.set_value(value, true);
                self.hover_thumb(x, y);
            }
            PointerEvent::Move { x, y } => {
                if self.interaction == Interaction::Dragging {
                    let value = self.cursor_value(x, y);
                    self.set_value(value, true);
                } else {
                    self.interaction = Interaction::Hovering;
                }
                self.hover_thumb(x, y);
            }
            PointerEvent::Up { x, y } => {
                let (length, thickness) = (self.config.length, self.config.thickness);
                let (along, across) = self.config.orientation.split(x, y);
                let inside = (0.0..=length).contains(&along) && (0.0..=thickness).contains(&across);
                self.interaction = if inside {
                    Interaction::Hovering
                } else {
                    Interaction::Idle
                };
                self.hover_thumb(x, y);
            }
            PointerEvent::Wheel { .. } => debug!("slider ignores wheel input"),
        }
        (self.current != before).then_some(self.current)
    }

    fn hover_thumb(&mut self, x: f64, y: f64) {
        let (along, across) = self.config.orientation.split(x, y);
        self.thumb.hover(along, across);
    }

    fn place_thumb(&mut self) {
        let center = self.to_pixel(self.current);
        let half = self.config.thumb_size / 2.0;
        self.thumb.place(Placement::Fill {
            start: center - half,
            end: center + half,
        });
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let palette = &self.config.palette;
        let enabled = self.config.enabled;
        let dragging = self.interaction == Interaction::Dragging;
        let orientation = self.config.orientation;
        let middle = self.config.thickness / 2.0;

        let track = if !enabled {
            &palette.disabled
        } else if self.interaction != Interaction::Idle {
            &palette.track_hover
        } else {
            &palette.track
        };
        let (x0, y0) = orientation.join(self.axis.start(), middle);
        let (x1, y1) = orientation.join(self.axis.end(), middle);
        surface.line(Point::new(x0, y0), Point::new(x1, y1), self.config.track_width, track);

        let thumb = if !enabled {
            &palette.disabled
        } else if dragging || self.thumb.state().hovering {
            &palette.thumb_active
        } else {
            &palette.thumb
        };
        let (top_left, bottom_right) = self.thumb_rect();
        surface.rect(top_left, bottom_right, thumb);
    }
}

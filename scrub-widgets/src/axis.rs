//! Value axis - maps a bounded numeric range onto a pixel span

/// Widget orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Split a point into (along, across) coordinates for this orientation
    pub fn split(self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Orientation::Horizontal => (x, y),
            Orientation::Vertical => (y, x),
        }
    }

    /// Inverse of [`Orientation::split`]
    pub fn join(self, along: f64, across: f64) -> (f64, f64) {
        match self {
            Orientation::Horizontal => (along, across),
            Orientation::Vertical => (across, along),
        }
    }
}

/// Linear mapping between values in `[min, max]` and pixels in `[start, end]`.
///
/// `start` is the pixel of `min`. A vertical axis whose values grow upward
/// simply has `start > end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    min: f64,
    max: f64,
    start: f64,
    end: f64,
}

impl ValueAxis {
    pub fn new(min: f64, max: f64, start: f64, end: f64) -> Self {
        Self {
            min,
            max,
            start,
            end,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Pixel of `min`
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Pixel of `max`
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_span(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
    }

    /// Fraction of the range covered by `value` (not clamped)
    pub fn percent(&self, value: f64) -> f64 {
        let distance = self.max - self.min;
        if distance == 0.0 {
            return 0.0;
        }
        (value - self.min) / distance
    }

    /// Pixel coordinate of `value`. A collapsed range maps everything to `start`.
    pub fn to_pixel(&self, value: f64) -> f64 {
        self.start + (self.end - self.start) * self.percent(value)
    }

    /// Value under pixel `px`, clamped into `[min, max]`
    pub fn to_value(&self, px: f64) -> f64 {
        let span = self.end - self.start;
        if span == 0.0 {
            return self.min;
        }
        let percent = (px - self.start) / span;
        let value = self.min + (self.max - self.min) * percent;
        value.clamp(self.min.min(self.max), self.max.max(self.min))
    }
}

//! Drawing interface supplied by the host toolkit

/// A point in widget pixel space (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which side of the text box sits on the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    /// Top edge centred on the point
    North,
    /// Bottom edge centred on the point
    South,
    /// Right edge centred on the point
    East,
    /// Left edge centred on the point
    West,
}

/// Primitive drawing operations a host must provide.
///
/// Colours are hex strings (`#rrggbb`) passed through from the [`Palette`];
/// the widgets never interpret them.
///
/// [`Palette`]: crate::Palette
pub trait Surface {
    fn line(&mut self, from: Point, to: Point, width: f64, color: &str);

    fn rect(&mut self, top_left: Point, bottom_right: Point, fill: &str);

    fn text(&mut self, at: Point, text: &str, anchor: Anchor, size: u16, color: &str);
}

/// Draws onto another surface shifted by a fixed offset
pub struct Offset<'a, S: Surface + ?Sized> {
    inner: &'a mut S,
    dx: f64,
    dy: f64,
}

impl<'a, S: Surface + ?Sized> Offset<'a, S> {
    pub fn new(inner: &'a mut S, dx: f64, dy: f64) -> Self {
        Self { inner, dx, dy }
    }

    fn shift(&self, p: Point) -> Point {
        Point::new(p.x + self.dx, p.y + self.dy)
    }
}

impl<S: Surface + ?Sized> Surface for Offset<'_, S> {
    fn line(&mut self, from: Point, to: Point, width: f64, color: &str) {
        let (from, to) = (self.shift(from), self.shift(to));
        self.inner.line(from, to, width, color);
    }

    fn rect(&mut self, top_left: Point, bottom_right: Point, fill: &str) {
        let (top_left, bottom_right) = (self.shift(top_left), self.shift(bottom_right));
        self.inner.rect(top_left, bottom_right, fill);
    }

    fn text(&mut self, at: Point, text: &str, anchor: Anchor, size: u16, color: &str) {
        let at = self.shift(at);
        self.inner.text(at, text, anchor, size, color);
    }
}

/// Records drawing calls; used by tests across the crate
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub ops: Vec<Op>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Line(Point, Point, String),
    Rect(Point, Point, String),
    Text(Point, String, Anchor),
}

#[cfg(test)]
impl Recorder {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, t, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn lines_colored(&self, color: &str) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Line(_, _, c) if c == color))
            .count()
    }
}

#[cfg(test)]
impl Surface for Recorder {
    fn line(&mut self, from: Point, to: Point, _width: f64, color: &str) {
        self.ops.push(Op::Line(from, to, color.to_string()));
    }

    fn rect(&mut self, top_left: Point, bottom_right: Point, fill: &str) {
        self.ops.push(Op::Rect(top_left, bottom_right, fill.to_string()));
    }

    fn text(&mut self, at: Point, text: &str, anchor: Anchor, _size: u16, _color: &str) {
        self.ops.push(Op::Text(at, text.to_string(), anchor));
    }
}

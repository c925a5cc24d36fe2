//! Widget drawing onto a ratatui canvas
//!
//! Widgets draw in pixels with y growing downward. The canvas uses
//! braille dots with y growing upward, so every shape is flipped on render.

use std::str::FromStr;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Context, Line},
        Widget,
    },
};
use scrub_widgets::{Anchor, Point, Surface};
use tracing::debug;

/// Braille dots per terminal cell
const DOTS_X: f64 = 2.0;
const DOTS_Y: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
enum CanvasShape {
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Rect {
        top_left: Point,
        bottom_right: Point,
        color: Color,
    },
    Text {
        at: Point,
        text: String,
        anchor: Anchor,
        color: Color,
    },
}

/// Parse `#rrggbb`; anything else draws in the terminal's default colour
pub fn parse_color(hex: &str) -> Color {
    Color::from_str(hex).unwrap_or(Color::Reset)
}

/// Records widget drawing calls, then renders them into a buffer area
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    width: f64,
    height: f64,
    shapes: Vec<CanvasShape>,
}

impl CanvasSurface {
    /// Surface covering `width` x `height` widget pixels
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Render the recorded shapes into `area`, scaled to fit
    pub fn render(&self, area: Rect, buf: &mut Buffer, background: Color) {
        if area.width == 0 || area.height == 0 || self.width <= 0.0 || self.height <= 0.0 {
            debug!(?area, width = self.width, height = self.height, "nothing to render");
            return;
        }
        // pixel size of one braille dot, used to rasterise filled rectangles
        let dot_width = self.width / (f64::from(area.width) * DOTS_X);
        let cell = (
            self.width / f64::from(area.width),
            self.height / f64::from(area.height),
        );

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(background)
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| {
                for shape in &self.shapes {
                    self.paint_shape(ctx, shape, dot_width, cell);
                }
            })
            .render(area, buf);
    }

    fn flip(&self, p: Point) -> (f64, f64) {
        (
            p.x.clamp(0.0, self.width),
            (self.height - p.y).clamp(0.0, self.height),
        )
    }

    fn paint_shape(&self, ctx: &mut Context<'_>, shape: &CanvasShape, dot_width: f64, cell: (f64, f64)) {
        match shape {
            CanvasShape::Line { from, to, color } => {
                let (x1, y1) = self.flip(*from);
                let (x2, y2) = self.flip(*to);
                ctx.draw(&Line::new(x1, y1, x2, y2, *color));
            }
            CanvasShape::Rect {
                top_left,
                bottom_right,
                color,
            } => {
                let (x0, top) = self.flip(*top_left);
                let (x1, bottom) = self.flip(*bottom_right);
                let mut x = x0.min(x1);
                while x <= x0.max(x1) {
                    ctx.draw(&Line::new(x, bottom, x, top, *color));
                    x += dot_width;
                }
            }
            CanvasShape::Text {
                at,
                text,
                anchor,
                color,
            } => {
                let (cell_w, cell_h) = cell;
                let text_width = text.chars().count() as f64 * cell_w;
                let (dx, dy) = match anchor {
                    Anchor::Center => (-text_width / 2.0, 0.0),
                    Anchor::North => (-text_width / 2.0, cell_h / 2.0),
                    Anchor::South => (-text_width / 2.0, -cell_h / 2.0),
                    Anchor::East => (-text_width, 0.0),
                    Anchor::West => (0.0, 0.0),
                };
                let (x, y) = self.flip(Point::new(at.x + dx, at.y + dy));
                // keep labels on the canvas; the canvas drops anything outside
                let x = x.min(self.width - text_width).max(0.0);
                ctx.print(
                    x,
                    y,
                    TextLine::styled(text.clone(), Style::default().fg(*color)),
                );
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn line(&mut self, from: Point, to: Point, _width: f64, color: &str) {
        self.shapes.push(CanvasShape::Line {
            from,
            to,
            color: parse_color(color),
        });
    }

    fn rect(&mut self, top_left: Point, bottom_right: Point, fill: &str) {
        self.shapes.push(CanvasShape::Rect {
            top_left,
            bottom_right,
            color: parse_color(fill),
        });
    }

    fn text(&mut self, at: Point, text: &str, anchor: Anchor, _size: u16, color: &str) {
        self.shapes.push(CanvasShape::Text {
            at,
            text: text.to_string(),
            anchor,
            color: parse_color(color),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#33ff33"), Color::Rgb(51, 255, 51));
        assert_eq!(parse_color("not a colour"), Color::Reset);
    }

    #[test]
    fn test_records_shapes() {
        let mut surface = CanvasSurface::new(100.0, 40.0);
        assert!(surface.is_empty());
        surface.line(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1.0, "#ffffff");
        surface.rect(Point::new(10.0, 0.0), Point::new(20.0, 20.0), "#004000");
        surface.text(Point::new(50.0, 20.0), "0:05", Anchor::North, 9, "#ffffff");
        assert_eq!(surface.len(), 3);
    }

    #[test]
    fn test_render_prints_text() {
        let mut surface = CanvasSurface::new(200.0, 64.0);
        surface.text(Point::new(100.0, 32.0), "mark", Anchor::Center, 9, "#ffffff");
        let area = Rect::new(0, 0, 25, 4);
        let mut buf = Buffer::empty(area);
        surface.render(area, &mut buf, Color::Black);
        assert!(buffer_text(&buf).contains("mark"));
    }

    #[test]
    fn test_render_draws_lines() {
        let mut surface = CanvasSurface::new(200.0, 64.0);
        surface.line(Point::new(0.0, 32.0), Point::new(200.0, 32.0), 1.0, "#ffffff");
        let area = Rect::new(0, 0, 25, 4);
        let mut buf = Buffer::empty(area);
        surface.render(area, &mut buf, Color::Black);
        let text = buffer_text(&buf);
        assert!(text.chars().any(|c| ('\u{2801}'..='\u{28ff}').contains(&c)));
    }

    #[test]
    fn test_render_into_empty_area_is_noop() {
        let mut surface = CanvasSurface::new(200.0, 64.0);
        surface.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 1.0, "#ffffff");
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
        surface.render(Rect::new(0, 0, 0, 0), &mut buf, Color::Black);
        assert!(buffer_text(&buf).trim().is_empty());
    }
}

//! Slider widget - labelled stepped slider with its value

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use scrub_widgets::{Interaction, Slider};

use crate::surface::CanvasSurface;
use crate::theme::Theme;

/// Columns reserved for the value text
const VALUE_WIDTH: u16 = 8;

/// Widget for displaying a horizontal slider
pub struct SliderWidget<'a> {
    slider: &'a Slider,
    theme: &'a Theme,
    label: &'a str,
    unit: &'a str,
}

impl<'a> SliderWidget<'a> {
    pub fn new(slider: &'a Slider, label: &'a str, theme: &'a Theme) -> Self {
        Self {
            slider,
            theme,
            label,
            unit: "",
        }
    }

    /// Suffix shown after the value, e.g. "x"
    pub fn unit(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    /// Cells the slider track occupies inside `area`
    pub fn track_area(area: Rect) -> Rect {
        let inner = crate::widgets::bordered_inner(area);
        Layout::horizontal([Constraint::Min(1), Constraint::Length(VALUE_WIDTH)]).split(inner)[0]
    }
}

impl Widget for SliderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.slider.interaction() == Interaction::Idle {
            self.theme.border()
        } else {
            self.theme.border_active()
        };
        let title = format!(" {} ", self.label.to_uppercase());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title, self.theme.title()));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Min(1), Constraint::Length(VALUE_WIDTH)]).split(inner);

        let (width, height) = self.slider.size();
        let mut surface = CanvasSurface::new(width, height);
        self.slider.draw(&mut surface);
        surface.render(chunks[0], buf, self.theme.bg);

        let style = if self.slider.is_enabled() {
            self.theme.normal()
        } else {
            self.theme.dim()
        };
        let value = format!(" {}{}", self.slider.value_text(), self.unit);
        Paragraph::new(Line::from(Span::styled(value, style))).render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::CRT_AMBER;
    use scrub_widgets::SliderConfig;

    #[test]
    fn test_renders_label_and_value() {
        let slider = Slider::new(0.25, 4.0, 0.25, 1.0, SliderConfig::default()).unwrap();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        SliderWidget::new(&slider, "speed", &CRT_AMBER)
            .unit("x")
            .render(area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("SPEED"));
        assert!(text.contains("1.00x"));
    }

    #[test]
    fn test_track_area_leaves_room_for_value() {
        let track = SliderWidget::track_area(Rect::new(0, 0, 40, 3));
        assert_eq!(track, Rect::new(1, 1, 30, 1));
    }
}

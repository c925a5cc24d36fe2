//! Scrollbar widgets - single and double frame scrollbars

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget},
};
use scrub_widgets::{DoubleScrollBar, Interaction, ScrollBar};

use crate::surface::CanvasSurface;
use crate::theme::Theme;

fn frame_block<'a>(title: &'a str, active: bool, theme: &Theme) -> Block<'a> {
    let border = if active {
        theme.border_active()
    } else {
        theme.border()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, theme.title()))
}

fn render_waiting(area: Rect, buf: &mut Buffer, theme: &Theme) {
    Paragraph::new(Span::styled("waiting for layout", theme.dim())).render(area, buf);
}

/// Widget for a single frame scrollbar
pub struct ScrollBarWidget<'a> {
    bar: &'a ScrollBar,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> ScrollBarWidget<'a> {
    pub fn new(bar: &'a ScrollBar, theme: &'a Theme) -> Self {
        Self {
            bar,
            theme,
            title: " FRAME ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for ScrollBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = self.bar.interaction() != Interaction::Idle;
        let block = frame_block(self.title, active, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some((width, height)) = self.bar.size() else {
            render_waiting(inner, buf, self.theme);
            return;
        };
        let mut surface = CanvasSurface::new(width, height);
        self.bar.draw(&mut surface);
        surface.render(inner, buf, self.theme.bg);
    }
}

/// Widget for a main scrollbar stacked over its zoomed secondary
pub struct DoubleScrollBarWidget<'a> {
    bar: &'a DoubleScrollBar,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> DoubleScrollBarWidget<'a> {
    pub fn new(bar: &'a DoubleScrollBar, theme: &'a Theme) -> Self {
        Self {
            bar,
            theme,
            title: " TIMELINE ",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for DoubleScrollBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = [self.bar.main(), self.bar.secondary()]
            .iter()
            .any(|b| b.interaction() != Interaction::Idle);
        let block = frame_block(self.title, active, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let (Some((width, main_height)), Some((_, secondary_height))) =
            (self.bar.main().size(), self.bar.secondary().size())
        else {
            render_waiting(inner, buf, self.theme);
            return;
        };
        let mut surface = CanvasSurface::new(width, main_height + secondary_height);
        self.bar.draw(&mut surface);
        surface.render(inner, buf, self.theme.bg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::CRT_GREEN;
    use scrub_widgets::{DoubleScrollBarConfig, FrameRange, ScrollBarConfig};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_unlaid_bar_renders_placeholder() {
        let bar = ScrollBar::new(FrameRange::new(0, 100).unwrap(), 1, ScrollBarConfig::default()).unwrap();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        ScrollBarWidget::new(&bar, &CRT_GREEN).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("waiting for layout"));
    }

    #[test]
    fn test_double_bar_renders_title_and_ticks() {
        let config = DoubleScrollBarConfig {
            frame_rate: 10.0,
            ..Default::default()
        };
        let mut bar = DoubleScrollBar::new(FrameRange::new(0, 100).unwrap(), 50, config).unwrap();
        let area = Rect::new(0, 0, 60, 10);
        let inner = crate::widgets::bordered_inner(area);
        bar.resize(f64::from(inner.width) * 8.0, f64::from(inner.height) * 16.0);

        let mut buf = Buffer::empty(area);
        DoubleScrollBarWidget::new(&bar, &CRT_GREEN).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("TIMELINE"));
        assert!(text.contains("0:05"));
    }
}

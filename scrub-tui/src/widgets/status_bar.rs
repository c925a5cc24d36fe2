//! Status bar widget - position, playback indicators and messages

use crate::app::{MessageType, PlayerState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use scrub_widgets::seconds_text;

/// Widget for displaying the status bar below the timeline
pub struct StatusBarWidget<'a> {
    state: &'a PlayerState,
    position: i64,
    frame_rate: f64,
    region: Option<(i64, i64)>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a PlayerState, position: i64, frame_rate: f64) -> Self {
        Self {
            state,
            position,
            frame_rate,
            region: None,
        }
    }

    pub fn region(mut self, region: Option<(i64, i64)>) -> Self {
        self.region = region;
        self
    }

    fn theme(&self) -> &Theme {
        &self.state.theme
    }

    fn message_style(&self) -> Style {
        let theme = self.theme();
        match self.state.message_type {
            MessageType::Info => theme.dim(),
            MessageType::Success => Style::from(theme.accent),
            MessageType::Warning => Style::default().fg(theme.warning),
            MessageType::Error => Style::default().fg(theme.danger),
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        let theme = self.theme();

        let chunks = Layout::horizontal([
            Constraint::Length(24), // Frame and time
            Constraint::Length(14), // Play/loop indicators
            Constraint::Min(20),    // Message or region
            Constraint::Length(20), // Help hint
        ])
        .split(area);

        let seconds = if self.frame_rate > 0.0 {
            self.position as f64 / self.frame_rate
        } else {
            0.0
        };
        let position = Line::from(vec![
            Span::styled(format!("{:>6}", self.position), theme.highlight()),
            Span::styled(" @ ", theme.dim()),
            Span::styled(seconds_text(seconds), theme.normal()),
        ]);
        Paragraph::new(position).render(chunks[0], buf);

        let indicators = Line::from(vec![
            Span::styled(if self.state.playing { "▶" } else { "■" }, theme.indicator(self.state.playing)),
            Span::raw(" "),
            Span::styled("LOOP", theme.indicator(self.state.looped)),
            Span::styled(format!(" {:.2}x", self.state.speed), theme.dim()),
        ]);
        Paragraph::new(indicators).render(chunks[1], buf);

        let content = if let Some(msg) = self.state.message.as_deref() {
            Line::from(Span::styled(msg, self.message_style()))
        } else if let Some((start, end)) = self.region {
            Line::from(vec![
                Span::styled("region ", theme.dim()),
                Span::styled(format!("[{start}, {end}]"), theme.normal()),
            ])
        } else {
            Line::default()
        };
        Paragraph::new(content).render(chunks[2], buf);

        let hint = Line::from(Span::styled("space:play q:quit", theme.dim()));
        Paragraph::new(hint).render(chunks[3], buf);
    }
}

/// Key reference drawn over the main view
pub struct HelpWidget<'a> {
    theme: &'a Theme,
}

impl<'a> HelpWidget<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn help_lines() -> [&'static str; 14] {
        [
            "╔══════════════════════════════════════╗",
            "║ SCRUB - frame scrubber               ║",
            "╠══════════════════════════════════════╣",
            "║   h / l  ← / →     Step one frame    ║",
            "║   H / L  PgDn/PgUp Jump              ║",
            "║   Shift+← / →      Jump              ║",
            "║   g / G  Home/End  First / last      ║",
            "║   Space            Play / pause      ║",
            "║   r                Loop on / off     ║",
            "║   + / -  ↑ / ↓     Speed             ║",
            "║   mouse            Drag, wheel       ║",
            "║   ?                This help         ║",
            "║   q  Esc           Quit              ║",
            "╚══════════════════════════════════════╝",
        ]
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_char(' ').set_style(self.theme.normal());
            }
        }

        let lines = Self::help_lines();
        let width = lines[0].chars().count() as u16;
        let start_x = area.x + area.width.saturating_sub(width) / 2;
        let start_y = area.y + area.height.saturating_sub(lines.len() as u16) / 2;

        for (i, line) in lines.iter().enumerate() {
            let y = start_y + i as u16;
            if y >= area.y + area.height {
                break;
            }
            for (j, ch) in line.chars().enumerate() {
                let x = start_x + j as u16;
                if x >= area.x + area.width {
                    break;
                }
                let style = if "║╔╗╚╝═╠╣".contains(ch) {
                    self.theme.border()
                } else {
                    self.theme.normal()
                };
                buf[(x, y)].set_char(ch).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(widget: StatusBarWidget<'_>) -> String {
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_shows_position_and_time() {
        let state = PlayerState::default();
        let text = render(StatusBarWidget::new(&state, 150, 30.0));
        assert!(text.contains("150"));
        assert!(text.contains("0:05"));
        assert!(text.contains("LOOP"));
        assert!(text.contains("1.00x"));
    }

    #[test]
    fn test_message_replaces_region() {
        let mut state = PlayerState::default();
        let text = render(StatusBarWidget::new(&state, 0, 30.0).region(Some((40, 60))));
        assert!(text.contains("[40, 60]"));

        state.set_error("bad frame");
        let text = render(StatusBarWidget::new(&state, 0, 30.0).region(Some((40, 60))));
        assert!(text.contains("bad frame"));
        assert!(!text.contains("[40, 60]"));
    }

    #[test]
    fn test_help_is_centred() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        HelpWidget::new(&theme).render(area, &mut buf);
        assert_eq!(buf[(10, 3)].symbol(), "╔");
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Play / pause"));
    }

    #[test]
    fn test_zero_height_is_noop() {
        let state = PlayerState::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        StatusBarWidget::new(&state, 1, 30.0).render(Rect::new(0, 0, 10, 0), &mut buf);
        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
    }
}

//! CRT-style themes for Scrub

use ratatui::style::{Color, Modifier, Style};
use scrub_widgets::Palette;

/// Theme configuration for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Primary foreground color (text, borders)
    pub fg: Color,
    /// Dimmed foreground (secondary text, idle lines)
    pub fg_dim: Color,
    pub bg: Color,
    /// Dragged elements and selected items
    pub highlight: Color,
    /// Active region edges, playing indicator
    pub accent: Color,
    /// Active region fill
    pub fill: Color,
    pub warning: Color,
    pub danger: Color,
    /// Disabled widgets
    pub disabled: Color,
}

/// Themes selectable by name
pub const THEMES: [Theme; 3] = [CRT_GREEN, CRT_AMBER, CYBERPUNK];

/// `#rrggbb` for RGB colours; named colours fall back to white
fn hex(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        _ => "#ffffff".to_string(),
    }
}

impl Theme {
    /// Look a theme up by its name
    pub fn by_name(name: &str) -> Option<Theme> {
        THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name)).cloned()
    }

    /// Widget colours for this theme
    pub fn palette(&self) -> Palette {
        Palette {
            line: hex(self.fg_dim),
            line_hover: hex(self.fg),
            line_drag: hex(self.highlight),
            fill: hex(self.fill),
            fill_edge: hex(self.accent),
            axis: hex(self.fg_dim),
            text: hex(self.fg),
            track: hex(self.fg_dim),
            track_hover: hex(self.fg),
            thumb: hex(self.fg),
            thumb_active: hex(self.highlight),
            disabled: hex(self.disabled),
        }
    }

    /// Get style for normal text
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for dimmed text
    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Get style for the border of the widget under the pointer
    pub fn border_active(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for an on/off indicator
    pub fn indicator(&self, on: bool) -> Style {
        if on {
            Style::default()
                .fg(self.bg)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg_dim)
        }
    }
}

/// Classic phosphor green CRT theme
pub const CRT_GREEN: Theme = Theme {
    name: "phosphor-green",
    fg: Color::Rgb(51, 255, 51),          // #33ff33 - phosphor green
    fg_dim: Color::Rgb(25, 128, 25),      // dimmed green
    bg: Color::Rgb(0, 10, 0),             // near black with green tint
    highlight: Color::Rgb(180, 255, 180), // bright green
    accent: Color::Rgb(100, 255, 100),    // medium green
    fill: Color::Rgb(0, 64, 0),           // dark green
    warning: Color::Rgb(255, 255, 100),   // yellow-green
    danger: Color::Rgb(255, 100, 100),    // red warning
    disabled: Color::Rgb(40, 60, 40),
};

/// Amber CRT theme (1980s monochrome)
pub const CRT_AMBER: Theme = Theme {
    name: "amber",
    fg: Color::Rgb(255, 176, 0),          // #ffb000 - amber
    fg_dim: Color::Rgb(128, 88, 0),       // dimmed amber
    bg: Color::Rgb(10, 5, 0),             // near black with amber tint
    highlight: Color::Rgb(255, 220, 128), // bright amber
    accent: Color::Rgb(255, 200, 64),     // medium amber
    fill: Color::Rgb(64, 40, 0),          // dark amber
    warning: Color::Rgb(255, 255, 100),   // yellow
    danger: Color::Rgb(255, 100, 100),    // red warning
    disabled: Color::Rgb(70, 55, 30),
};

/// Cyberpunk neon theme
pub const CYBERPUNK: Theme = Theme {
    name: "cyberpunk",
    fg: Color::Rgb(0, 255, 255),        // cyan
    fg_dim: Color::Rgb(0, 128, 128),    // dim cyan
    bg: Color::Rgb(5, 0, 10),           // dark purple-black
    highlight: Color::Rgb(255, 0, 255), // magenta
    accent: Color::Rgb(0, 255, 128),    // neon green
    fill: Color::Rgb(40, 0, 60),        // deep purple
    warning: Color::Rgb(255, 255, 0),   // yellow
    danger: Color::Rgb(255, 50, 50),    // red
    disabled: Color::Rgb(50, 50, 70),
};

impl Default for Theme {
    fn default() -> Self {
        CRT_GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("amber").map(|t| t.name), Some("amber"));
        assert_eq!(Theme::by_name("CYBERPUNK").map(|t| t.name), Some("cyberpunk"));
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn test_palette_uses_hex() {
        let palette = CRT_GREEN.palette();
        assert_eq!(palette.line_hover, "#33ff33");
        assert_eq!(palette.fill, "#004000");
        assert_eq!(hex(Color::Red), "#ffffff");
    }
}

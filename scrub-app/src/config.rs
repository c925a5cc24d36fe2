//! Simple configuration for Scrub
//!
//! Read-only `key=value` file; anything missing or malformed keeps its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Frames on the timeline; positions run from 1 to this
    pub frame_count: i64,
    pub frame_rate: f64,
    /// Active region width as a fraction of the timeline
    pub secondary_width_fraction: f64,
    /// Frames per wheel notch
    pub wheel_steps: i64,
    /// Frames per jump key
    pub jump_step: i64,
    pub looped: bool,
    pub theme: String,
    /// Terminal cell size in pixels, for mapping the mouse onto widgets
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_count: 3000,
            frame_rate: 29.97,
            secondary_width_fraction: 0.2,
            wheel_steps: 1,
            jump_step: 10,
            looped: false,
            theme: "phosphor-green".to_string(),
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl Config {
    /// Load config from the default location
    ///
    /// Returns default config if file doesn't exist or can't be read.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scrub")
            .join("config.txt")
    }

    /// Parse config from simple key=value format
    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!(line, "config line without '='");
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let applied = match key {
                "frame_count" => set_if(&mut config.frame_count, value.parse().ok(), |&n| n >= 2),
                "frame_rate" => set_if(&mut config.frame_rate, value.parse().ok(), |&r: &f64| {
                    r.is_finite() && r > 0.0
                }),
                "secondary_width_fraction" => set_if(
                    &mut config.secondary_width_fraction,
                    value.parse().ok(),
                    |&f: &f64| f > 0.0 && f <= 1.0,
                ),
                "wheel_steps" => set_if(&mut config.wheel_steps, value.parse().ok(), |&n| n > 0),
                "jump_step" => set_if(&mut config.jump_step, value.parse().ok(), |&n| n > 0),
                "loop" => set_if(&mut config.looped, parse_bool(value), |_| true),
                "theme" => set_if(&mut config.theme, Some(value.to_string()), |name| !name.is_empty()),
                "cell_width" => set_if(&mut config.cell_width, value.parse().ok(), |&w: &f64| w > 0.0),
                "cell_height" => set_if(&mut config.cell_height, value.parse().ok(), |&h: &f64| h > 0.0),
                _ => true, // Ignore unknown keys
            };
            if !applied {
                warn!(key, value, "invalid config value, keeping default");
            }
        }

        config
    }
}

/// Store `value` when it parsed and passes `valid`
fn set_if<T>(slot: &mut T, value: Option<T>, valid: impl Fn(&T) -> bool) -> bool {
    match value {
        Some(v) if valid(&v) => {
            *slot = v;
            true
        }
        _ => false,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse(""), Config::default());
    }

    #[test]
    fn test_parse_values() {
        let content = "frame_count=600\nframe_rate = 25\nloop=yes\ntheme=amber\ncell_width=10\n";
        let config = Config::parse(content);
        assert_eq!(config.frame_count, 600);
        assert_eq!(config.frame_rate, 25.0);
        assert!(config.looped);
        assert_eq!(config.theme, "amber");
        assert_eq!(config.cell_width, 10.0);
        assert_eq!(config.cell_height, 16.0);
    }

    #[test]
    fn test_parse_with_comments() {
        let content = "# Comment\njump_step=30\n# Another comment\nunknown=1";
        let config = Config::parse(content);
        assert_eq!(config.jump_step, 30);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let content = "frame_count=many\nframe_rate=-5\nsecondary_width_fraction=1.5\nwheel_steps=0\nloop=maybe\nno equals sign";
        assert_eq!(Config::parse(content), Config::default());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("scrub-config-that-does-not-exist.txt");
        assert!(Config::load_from(&path).is_err());
    }
}

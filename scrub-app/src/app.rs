//! Player state and event handling for the `scrub` binary

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Clear,
    Frame,
};
use tracing::{debug, info};

use scrub_input::{CellMapper, CellRect, Command, KeyBindings};
use scrub_tui::{
    bordered_inner, DoubleScrollBarWidget, HelpWidget, PlayerState, SliderWidget, StatusBarWidget, Theme,
};
use scrub_widgets::{DoubleScrollBar, DoubleScrollBarConfig, FrameRange, Slider, SliderConfig};

use crate::config::Config;

const SPEED_MIN: f64 = 0.25;
const SPEED_MAX: f64 = 4.0;
const SPEED_STEP: f64 = 0.25;

/// Values reported by widget callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Frame(i64),
    Speed(f64),
}

fn cell_rect(area: Rect) -> CellRect {
    CellRect::new(area.x, area.y, area.width, area.height)
}

/// Main application
pub struct App {
    pub state: PlayerState,
    pub should_quit: bool,
    pub show_help: bool,
    timeline: DoubleScrollBar,
    speed: Slider,
    keys: KeyBindings,
    timeline_mouse: CellMapper,
    speed_mouse: CellMapper,
    events: Receiver<UiEvent>,
    /// Fractional frames carried between ticks while playing
    pending_frames: f64,
    /// Last frame reported by the timeline callback, shown in the status bar
    shown_frame: i64,
}

impl App {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();

        let theme = match Theme::by_name(&config.theme) {
            Some(theme) => theme,
            None => {
                info!(theme = %config.theme, "unknown theme, using default");
                Theme::default()
            }
        };
        let palette = theme.palette();

        let frame_tx: Sender<UiEvent> = tx.clone();
        let timeline = DoubleScrollBar::new(
            FrameRange::new(0, config.frame_count)?,
            1,
            DoubleScrollBarConfig {
                label: Some("time".to_string()),
                frame_rate: config.frame_rate,
                secondary_width_fraction: config.secondary_width_fraction,
                wheel_steps: config.wheel_steps,
                palette: palette.clone(),
                ..Default::default()
            },
        )?
        .on_frame(move |frame| {
            let _ = frame_tx.send(UiEvent::Frame(frame));
        });

        let speed = Slider::new(
            SPEED_MIN,
            SPEED_MAX,
            SPEED_STEP,
            1.0,
            SliderConfig {
                palette,
                ..Default::default()
            },
        )?
        .on_change(move |value| {
            let _ = tx.send(UiEvent::Speed(value));
        });

        let shown_frame = timeline.position();
        let mut state = PlayerState::new(theme, config.looped);
        state.set_message("Scrub | Press ? for help, q to quit");

        Ok(Self {
            state,
            should_quit: false,
            show_help: false,
            timeline,
            speed,
            keys: KeyBindings::new(config.jump_step)?,
            timeline_mouse: CellMapper::new(config.cell_width, config.cell_height)?,
            speed_mouse: CellMapper::new(config.cell_width, config.cell_height)?,
            events: rx,
            pending_frames: 0.0,
            shown_frame,
        })
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(cmd) = self.keys.handle_key(key) {
            self.apply(cmd);
        }
    }

    pub fn apply(&mut self, cmd: Command) {
        if self.show_help && cmd != Command::Quit {
            self.show_help = false;
            if cmd == Command::ToggleHelp {
                return;
            }
        }
        let (_, min, max) = self.timeline.status();
        match cmd {
            Command::Step(delta) | Command::Jump(delta) => {
                self.timeline.increment_frame(delta, self.state.looped, true);
            }
            Command::Home => {
                self.timeline.set_position(min + 1, true);
            }
            Command::End => {
                self.timeline.set_position(max, true);
            }
            Command::TogglePlay => {
                if self.state.toggle_play() {
                    if self.timeline.position() == max && !self.state.looped {
                        self.timeline.set_position(min + 1, true);
                    }
                    self.pending_frames = 0.0;
                    self.state.set_success("Playing");
                } else {
                    self.state.set_message("Paused");
                }
            }
            Command::ToggleLoop => {
                let looped = self.state.toggle_loop();
                self.state.set_message(if looped { "Loop on" } else { "Loop off" });
            }
            Command::SpeedUp => {
                self.speed.set_value(self.speed.value() + SPEED_STEP, true);
            }
            Command::SpeedDown => {
                self.speed.set_value(self.speed.value() - SPEED_STEP, true);
            }
            Command::ToggleHelp => self.show_help = true,
            Command::Quit => self.should_quit = true,
        }
    }

    /// Route a mouse event to both widgets; each mapper ignores what is not its own
    pub fn handle_mouse(&mut self, event: &MouseEvent) {
        for pointer in self.timeline_mouse.translate(event) {
            self.timeline.handle_pointer(pointer);
        }
        for pointer in self.speed_mouse.translate(event) {
            self.speed.handle_pointer(pointer);
        }
    }

    /// Advance playback by the time since the last tick
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.state.playing {
            return;
        }
        self.pending_frames += elapsed.as_secs_f64() * self.timeline.frame_rate() * self.state.speed;
        let whole = self.pending_frames.floor();
        if whole < 1.0 {
            return;
        }
        self.pending_frames -= whole;
        if !self.timeline.increment_frame(whole as i64, self.state.looped, true) {
            self.state.playing = false;
            self.state.set_warning("End of timeline");
        }
    }

    /// Apply the values widget callbacks reported since the last call
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                UiEvent::Frame(frame) => {
                    debug!(frame, "frame changed");
                    self.shown_frame = frame;
                }
                UiEvent::Speed(speed) => {
                    self.state.speed = speed;
                    self.state.set_message(format!("Speed {}x", self.speed.value_text()));
                }
            }
        }
    }

    /// Lay out the widgets for `area`. Widgets are resized only when their cells change.
    fn layout(&mut self, area: Rect) -> (Rect, Rect, Rect) {
        let chunks = Layout::vertical([
            Constraint::Min(6),    // Timeline
            Constraint::Length(3), // Speed slider
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let timeline_cells = cell_rect(bordered_inner(chunks[0]));
        if timeline_cells != self.timeline_mouse.area() || self.timeline.main().size().is_none() {
            self.timeline_mouse.set_area(timeline_cells);
            let (width, height) = self.timeline_mouse.pixel_size();
            self.timeline.resize(width, height);
        }

        let speed_cells = cell_rect(SliderWidget::track_area(chunks[1]));
        if speed_cells != self.speed_mouse.area() {
            self.speed_mouse.set_area(speed_cells);
            let (length, thickness) = self.speed_mouse.pixel_size();
            self.speed.resize(length, thickness);
        }

        (chunks[0], chunks[1], chunks[2])
    }

    /// Draw the whole UI
    pub fn render(&mut self, frame: &mut Frame) {
        let (timeline_area, speed_area, status_area) = self.layout(frame.area());
        let theme = &self.state.theme;

        frame.render_widget(DoubleScrollBarWidget::new(&self.timeline, theme), timeline_area);
        frame.render_widget(SliderWidget::new(&self.speed, "speed", theme).unit("x"), speed_area);
        let region = self.timeline.active_region().map(|r| (r.start, r.end));
        frame.render_widget(
            StatusBarWidget::new(&self.state, self.shown_frame, self.timeline.frame_rate()).region(region),
            status_area,
        );

        if self.show_help {
            let area = frame.area();
            frame.render_widget(Clear, area);
            frame.render_widget(HelpWidget::new(theme), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};

    fn app() -> App {
        let config = Config {
            frame_count: 100,
            frame_rate: 10.0,
            ..Default::default()
        };
        App::new(&config).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_keys_move_timeline() {
        let mut app = app();
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.timeline.position(), 2);
        app.handle_key(key(KeyCode::Char('L')));
        assert_eq!(app.timeline.position(), 12);
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.timeline.position(), 100);
        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.timeline.position(), 1);
    }

    #[test]
    fn test_playback_advances_and_stops_at_end() {
        let mut app = app();
        app.apply(Command::TogglePlay);
        assert!(app.state.playing);
        app.tick(Duration::from_millis(500));
        assert_eq!(app.timeline.position(), 6);

        app.apply(Command::End);
        app.tick(Duration::from_millis(200));
        assert!(!app.state.playing);
        assert_eq!(app.timeline.position(), 100);
    }

    #[test]
    fn test_playback_loops() {
        let mut app = app();
        app.apply(Command::ToggleLoop);
        app.apply(Command::End);
        app.apply(Command::TogglePlay);
        app.tick(Duration::from_millis(100));
        assert!(app.state.playing);
        assert_eq!(app.timeline.position(), 1);
    }

    #[test]
    fn test_speed_keys_report_through_channel() {
        let mut app = app();
        app.apply(Command::SpeedUp);
        app.apply(Command::SpeedUp);
        app.drain_events();
        assert_eq!(app.state.speed, 1.5);
        assert_eq!(app.state.message.as_deref(), Some("Speed 1.50x"));

        app.apply(Command::TogglePlay);
        app.tick(Duration::from_millis(1000));
        assert_eq!(app.timeline.position(), 16);
    }

    #[test]
    fn test_status_frame_follows_channel() {
        let mut app = app();
        assert_eq!(app.shown_frame, 1);
        app.apply(Command::Jump(10));
        assert_eq!(app.shown_frame, 1);
        app.drain_events();
        assert_eq!(app.shown_frame, 11);

        let area = Rect::new(0, 0, 100, 1);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        ratatui::widgets::Widget::render(
            StatusBarWidget::new(&app.state, app.shown_frame, app.timeline.frame_rate()),
            area,
            &mut buf,
        );
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("11"));
    }

    #[test]
    fn test_help_closes_on_next_command() {
        let mut app = app();
        app.apply(Command::ToggleHelp);
        assert!(app.show_help);
        app.apply(Command::Step(1));
        assert!(!app.show_help);
        assert_eq!(app.timeline.position(), 2);
        app.apply(Command::ToggleHelp);
        app.apply(Command::ToggleHelp);
        assert!(!app.show_help);
    }

    #[test]
    fn test_mouse_drags_timeline_line() {
        let mut app = app();
        app.layout(Rect::new(0, 0, 60, 20));
        // 58 x 14 cells of 8 x 16 px; frame 25 sits at x = 125.28, the centre of cell 15 is 124
        app.timeline.set_position(25, false);
        let area = app.timeline_mouse.area();
        let row = area.top + 1;
        app.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), area.left + 15, row));
        app.handle_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), area.left + 29, row));
        app.handle_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), area.left + 29, row));
        assert_eq!(app.timeline.position(), 50);
        assert_eq!(app.timeline.secondary().position(), 50);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = Config {
            theme: "nope".to_string(),
            ..Default::default()
        };
        let app = App::new(&config).unwrap();
        assert_eq!(app.state.theme.name, Theme::default().name);
    }
}

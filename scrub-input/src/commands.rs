//! Command definitions for Scrub

/// Commands that can be dispatched from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move by a number of frames
    Step(i64),
    /// Move by a number of frames, in jump-sized units
    Jump(i64),
    /// First selectable frame
    Home,
    /// Last frame
    End,
    TogglePlay,
    ToggleLoop,
    /// Playback speed slider one step up or down
    SpeedUp,
    SpeedDown,
    ToggleHelp,
    Quit,
}

impl Command {
    /// Frame offset for movement commands
    pub fn frame_delta(&self) -> Option<i64> {
        match *self {
            Command::Step(delta) | Command::Jump(delta) => Some(delta),
            _ => None,
        }
    }
}

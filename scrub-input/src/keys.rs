//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::commands::Command;
use crate::error::InputError;

/// Maps key presses to commands
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Frames moved by a jump
    jump_step: i64,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self { jump_step: 10 }
    }
}

impl KeyBindings {
    pub fn new(jump_step: i64) -> Result<Self, InputError> {
        if jump_step <= 0 {
            return Err(InputError::InvalidJumpStep(jump_step));
        }
        Ok(Self { jump_step })
    }

    pub fn jump_step(&self) -> i64 {
        self.jump_step
    }

    /// Handle a key event and return a command if one is bound
    pub fn handle_key(&self, key: KeyEvent) -> Option<Command> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

            // Frame stepping
            KeyCode::Left if shift => Some(Command::Jump(-self.jump_step)),
            KeyCode::Right if shift => Some(Command::Jump(self.jump_step)),
            KeyCode::Char('h') | KeyCode::Left => Some(Command::Step(-1)),
            KeyCode::Char('l') | KeyCode::Right => Some(Command::Step(1)),
            KeyCode::Char('H') | KeyCode::PageDown => Some(Command::Jump(-self.jump_step)),
            KeyCode::Char('L') | KeyCode::PageUp => Some(Command::Jump(self.jump_step)),
            KeyCode::Home | KeyCode::Char('0') | KeyCode::Char('g') => Some(Command::Home),
            KeyCode::End | KeyCode::Char('$') | KeyCode::Char('G') => Some(Command::End),

            // Playback
            KeyCode::Char(' ') => Some(Command::TogglePlay),
            KeyCode::Char('r') => Some(Command::ToggleLoop),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Some(Command::SpeedUp),
            KeyCode::Char('-') | KeyCode::Down => Some(Command::SpeedDown),

            KeyCode::Char('?') => Some(Command::ToggleHelp),

            _ => None,
        }
    }
}

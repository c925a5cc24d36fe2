//! Terminal input for Scrub
//!
//! Translates crossterm mouse events into widget [`PointerEvent`]s and maps
//! keys to player commands.
//!
//! [`PointerEvent`]: scrub_widgets::PointerEvent

mod commands;
mod error;
mod keys;
mod mouse;

pub use commands::Command;
pub use error::InputError;
pub use keys::KeyBindings;
pub use mouse::{CellMapper, CellRect};

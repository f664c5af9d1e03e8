//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]) -- keyboard, resize and paste
//!   events from the terminal.
//! - **Timers** ([`Every`]) -- repeating ticks, used for loading animations.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;

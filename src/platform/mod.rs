//! Platform abstraction layer
//!
//! Handles the outside world the game loop talks to:
//! - Time/ticks (`time`)
//! - Input events (`input`)

pub mod input;
pub mod time;

pub use input::{EventSource, InputEvent, Key, TerminalEvents};
pub use time::{FpsCounter, FrameClock, SystemClock};

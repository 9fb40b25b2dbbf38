//! Platform abstraction layer
//!
//! Handles the device-facing edges of the game:
//! - Input events (keyboard, on-screen buttons, taps)
//! - Asset readiness before the timers start

pub mod assets;
pub mod input;

pub use assets::AssetGate;
pub use input::{Direction, InputCommand, InputEvent, InputState, Key};

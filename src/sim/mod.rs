//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame-based motion only (no wall-clock time)
//! - Caller-supplied RNG only
//! - No rendering or platform dependencies
//!
//! Callers that drive [`spawn_rock`] and [`tick`] directly own the event
//! queue: drain it with [`GameState::drain_events`] once per frame.

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Rect, first_hit, padded_overlap};
pub use spawn::{Placement, bounded_retry, spawn_rock};
pub use state::{Entity, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};

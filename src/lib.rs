//! Rock Raft - steer a raft down a river and dodge falling rocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `driver`: Frame driver tying timers, input and audio to the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input mapping and asset readiness
//! - `audio`: Background music gated on the first user gesture
//! - `tuning`: Data-driven game balance
//! - `ui`: Game-over overlay layout

pub mod audio;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use driver::Driver;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

//! Game state and core simulation types
//!
//! A single [`GameState`] is created at startup and reset in place on every
//! restart. It owns the Playing/GameOver lifecycle; the transitions live here
//! so that nothing else can flip the phase without clearing the right fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Undrained events kept before the oldest are discarded
pub const MAX_PENDING_EVENTS: usize = 256;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Rocks fall, raft moves, spawner runs
    Playing,
    /// Everything frozen until a restart is requested
    GameOver,
}

/// A moving rectangle: the raft (horizontal speed) or a rock (vertical speed)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame along the entity's axis of motion
    pub speed: f32,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self { pos, size, speed }
    }

    /// Unpadded bounding rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Things that happened during a spawn, tick or restart.
///
/// Drained by the frame driver each frame and forwarded to audio and logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A rock entered at the top edge
    RockSpawned { x: f32 },
    /// Rocks left the bottom of the field this tick
    RocksPassed { count: u32, score: u32 },
    /// The raft hit a rock
    GameOver { score: u32 },
    /// A new run started
    Restarted,
}

/// Complete game state
///
/// Spawning, ticking and restarting record [`GameEvent`]s here. Whoever runs
/// the simulation is expected to call [`GameState::drain_events`] every
/// frame; if nobody does, only the newest [`MAX_PENDING_EVENTS`] are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Rocks that made it past the raft this run
    pub score: u32,
    pub raft: Entity,
    /// Active rocks, in spawn order
    pub rocks: Vec<Entity>,
    /// Playing ticks elapsed this run
    pub time_ticks: u64,
    /// Events not yet picked up by the driver
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state: empty river, score 0, raft centred
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Playing,
            score: 0,
            raft: Entity::new(tuning.raft_start(), tuning.raft_size(), tuning.raft_speed),
            rocks: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Record an event for the driver
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Playing -> GameOver. Score and raft stay as they are.
    pub(crate) fn end_run(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.push_event(GameEvent::GameOver { score: self.score });
        log::info!(
            "Game over after {} ticks with score {}",
            self.time_ticks,
            self.score
        );
    }

    /// GameOver -> Playing.
    ///
    /// Clears the rocks, zeroes the score and re-centres the raft. Returns
    /// `false` (and changes nothing) unless the run had ended.
    pub fn restart(&mut self, tuning: &Tuning) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.rocks.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.raft.pos = tuning.raft_start();
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::Restarted);
        log::info!("Restarted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_playing_and_empty() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.rocks.is_empty());
        assert_eq!(state.raft.pos, Vec2::new(120.0, 370.0));
        assert_eq!(state.raft.size, Vec2::new(80.0, 80.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_while_playing_is_noop() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.score = 7;
        state.raft.pos.x = 10.0;
        state
            .rocks
            .push(Entity::new(Vec2::new(50.0, 100.0), tuning.rock_size(), 3.0));
        let before = state.clone();

        assert!(!state.restart(&tuning));
        assert_eq!(state, before);
    }

    #[test]
    fn test_restart_from_game_over_resets_in_place() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.score = 42;
        state.raft.pos.x = 3.0;
        state
            .rocks
            .push(Entity::new(Vec2::new(50.0, 100.0), tuning.rock_size(), 3.0));
        state.end_run();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 42);

        assert!(state.restart(&tuning));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.rocks.is_empty());
        assert_eq!(state.raft.pos.x, 120.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { score: 42 }, GameEvent::Restarted]
        );
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        for i in 0..(MAX_PENDING_EVENTS as u32 + 10) {
            state.push_event(GameEvent::RockSpawned { x: i as f32 });
        }
        let events = state.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events[0], GameEvent::RockSpawned { x: 10.0 });
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_end_run_only_fires_once() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.end_run();
        state.end_run();
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.is_game_over());
    }
}

//! Per-frame simulation tick
//!
//! Motion is frame-based: every tick moves entities by their speed in pixels,
//! with no delta time. The steps run in a fixed order (raft, rocks, exits,
//! collision) so that a rock removed for leaving the field is never also
//! tested against the raft in the same tick.

use super::collision::first_hit;
use super::state::{Entity, GameEvent, GameState};
use crate::tuning::Tuning;

/// Movement intent for a single tick.
///
/// Both flags may be set at once; they cancel out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Net horizontal direction: -1, 0 or 1
    #[inline]
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }
}

/// Advance the game by one frame. Does nothing unless the phase is Playing.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    if !state.is_playing() {
        return;
    }

    state.time_ticks += 1;

    // Raft
    let raft = &mut state.raft;
    raft.pos.x = (raft.pos.x + input.axis() * raft.speed).clamp(0.0, tuning.max_raft_x());

    // Rocks
    for rock in &mut state.rocks {
        rock.pos.y += rock.speed;
    }

    // Rocks past the bottom edge score a point each
    let before = state.rocks.len();
    state.rocks.retain(|rock| rock.pos.y <= tuning.field_height);
    let passed = (before - state.rocks.len()) as u32;
    if passed > 0 {
        state.score += passed;
        state.push_event(GameEvent::RocksPassed {
            count: passed,
            score: state.score,
        });
    }

    // Collision (first hit ends the run)
    let hit = first_hit(
        &state.raft.rect(),
        state.rocks.iter().map(Entity::rect),
        tuning.collision_padding,
    );
    if hit.is_some() {
        state.end_run();
    }
}

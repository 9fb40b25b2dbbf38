//! Idle/demo mode: steers the raft away from the most urgent rock

use super::collision::Rect;
use super::state::GameState;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Extra clearance (in raft steps) the autopilot keeps from a threat
const CLEARANCE_STEPS: f32 = 2.0;

/// Pick this frame's movement for the demo raft
pub fn autopilot(state: &GameState, tuning: &Tuning) -> TickInput {
    let pad = tuning.collision_padding;
    let raft = state.raft.rect().inset(pad);
    let margin = state.raft.speed * CLEARANCE_STEPS;

    // Lowest rock that is still above the raft's bottom and in (or near) its column
    let threat = state
        .rocks
        .iter()
        .map(|rock| rock.rect().inset(pad))
        .filter(|rock| {
            rock.pos.y < raft.bottom()
                && rock.right() > raft.pos.x - margin
                && rock.pos.x < raft.right() + margin
        })
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));

    let Some(threat) = threat else {
        return TickInput::default();
    };

    let left = dodge_left(&raft, &threat, tuning.field_width, margin);
    TickInput {
        left,
        right: !left,
    }
}

/// Dodge toward the side with room for the raft, preferring the nearer side
fn dodge_left(raft: &Rect, threat: &Rect, field_width: f32, margin: f32) -> bool {
    let fits_left = threat.pos.x - margin >= raft.size.x;
    let fits_right = field_width - threat.right() - margin >= raft.size.x;
    let prefer_left = raft.center().x < threat.center().x;

    match (fits_left, fits_right) {
        (true, false) => true,
        (false, true) => false,
        _ => prefer_left,
    }
}

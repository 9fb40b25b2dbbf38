//! Scene assembly: turns a [`GameState`] into one triangle list
//!
//! Draw order is back to front: river, raft, rocks, then the game-over
//! overlay. Text (score, "GAME OVER", button label) is drawn by the HUD layer.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Entity, GameState, Rect};
use crate::tuning::Tuning;
use crate::ui::{GameOverLayout, PANEL_CORNER_RADIUS, RESTART_BUTTON_CORNER_RADIUS};

/// Segments per full circle for rocks
const ROCK_SEGMENTS: u32 = 20;
/// Segments per rounded corner
const CORNER_SEGMENTS: u32 = 8;
/// Gaps drawn between raft planks
const RAFT_PLANK_GAPS: u32 = 3;

/// Build every vertex for the current frame
pub fn build(state: &GameState, tuning: &Tuning) -> Vec<Vertex> {
    let field = Rect {
        pos: Vec2::ZERO,
        size: tuning.field_size(),
    };

    let mut vertices = Vec::with_capacity(64 + state.rocks.len() * ROCK_SEGMENTS as usize * 6);

    vertices.extend(shapes::gradient_rect(
        &field,
        colors::RIVER_TOP,
        colors::RIVER_BOTTOM,
    ));

    push_raft(&mut vertices, &state.raft);
    for rock in &state.rocks {
        push_rock(&mut vertices, rock);
    }

    if state.is_game_over() {
        push_game_over(&mut vertices, &field, &GameOverLayout::for_field(field.size));
    }

    vertices
}

fn push_raft(vertices: &mut Vec<Vertex>, raft: &Entity) {
    let body = raft.rect();
    vertices.extend(shapes::rect(&body, colors::RAFT));

    let plank_width = body.size.x / (RAFT_PLANK_GAPS + 1) as f32;
    let gap_width = (body.size.x * 0.03).max(1.0);
    for i in 1..=RAFT_PLANK_GAPS {
        let x = body.pos.x + plank_width * i as f32 - gap_width / 2.0;
        vertices.extend(shapes::rect(
            &Rect::new(x, body.pos.y, gap_width, body.size.y),
            colors::RAFT_PLANK_GAP,
        ));
    }
}

fn push_rock(vertices: &mut Vec<Vertex>, rock: &Entity) {
    let body = rock.rect();
    let radius = body.size.x.min(body.size.y) / 2.0;
    let center = body.center();
    vertices.extend(shapes::circle(center, radius, colors::ROCK, ROCK_SEGMENTS));
    vertices.extend(shapes::circle(
        center - Vec2::splat(radius * 0.3),
        radius * 0.35,
        colors::ROCK_HIGHLIGHT,
        ROCK_SEGMENTS / 2,
    ));
}

fn push_game_over(vertices: &mut Vec<Vertex>, field: &Rect, layout: &GameOverLayout) {
    vertices.extend(shapes::rect(field, colors::OVERLAY));
    vertices.extend(shapes::rounded_rect(
        &layout.panel,
        PANEL_CORNER_RADIUS,
        colors::PANEL,
        CORNER_SEGMENTS,
    ));
    vertices.extend(shapes::rounded_rect(
        &layout.restart_button,
        RESTART_BUTTON_CORNER_RADIUS,
        colors::BUTTON,
        CORNER_SEGMENTS,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_playing_scene_has_no_overlay() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        let vertices = build(&state, &tuning);
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
        assert!(has_color(&vertices, colors::RAFT));
        assert!(!has_color(&vertices, colors::ROCK));
        assert!(!has_color(&vertices, colors::OVERLAY));
    }

    #[test]
    fn test_rocks_and_overlay_drawn() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.rocks.push(Entity::new(
            Vec2::new(50.0, 40.0),
            tuning.rock_size(),
            tuning.rock_speed,
        ));
        let playing = build(&state, &tuning);
        assert!(has_color(&playing, colors::ROCK));

        state.phase = GamePhase::GameOver;
        let over = build(&state, &tuning);
        assert!(over.len() > playing.len());
        assert!(has_color(&over, colors::OVERLAY));
        assert!(has_color(&over, colors::BUTTON));
    }
}

//! Rock spawning policy
//!
//! A new rock enters just above the top edge at a random column. Columns
//! crowded by a rock that has not yet cleared the top band are rejected, but
//! only a bounded number of times: the spawner never stalls, and an
//! overlapping entry is tolerated once the attempts run out.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, GameEvent, GameState};
use crate::tuning::Tuning;

/// Result of a bounded search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<T> {
    /// Chosen candidate
    pub value: T,
    /// Candidates drawn, including the chosen one
    pub attempts: u32,
    /// `false` when the search ran out and fell back to the last candidate
    pub clear: bool,
}

/// Draw up to `max_attempts` candidates and return the first one `accept`
/// approves, or the last one drawn if none is approved.
///
/// At least one candidate is always drawn.
pub fn bounded_retry<T, D, A>(max_attempts: u32, mut draw: D, mut accept: A) -> Placement<T>
where
    D: FnMut() -> T,
    A: FnMut(&T) -> bool,
{
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;
    loop {
        let candidate = draw();
        attempts += 1;
        if accept(&candidate) {
            return Placement {
                value: candidate,
                attempts,
                clear: true,
            };
        }
        if attempts >= max_attempts {
            return Placement {
                value: candidate,
                attempts,
                clear: false,
            };
        }
    }
}

/// True when no rock still in the top band sits within one rock width of `x`
pub fn column_is_clear(rocks: &[Entity], x: f32, tuning: &Tuning) -> bool {
    !rocks
        .iter()
        .any(|rock| rock.pos.y < tuning.rock_height && (rock.pos.x - x).abs() < tuning.rock_width)
}

/// Pick a spawn column uniformly in `[0, field_width - rock_width]`
pub fn choose_column<R: Rng + ?Sized>(
    rocks: &[Entity],
    tuning: &Tuning,
    rng: &mut R,
) -> Placement<f32> {
    let max_x = tuning.max_rock_x();
    bounded_retry(
        tuning.spawn_attempts,
        || {
            if max_x > 0.0 {
                rng.random_range(0.0..=max_x)
            } else {
                0.0
            }
        },
        |&x| column_is_clear(rocks, x, tuning),
    )
}

/// Spawner tick: append one rock at the top edge.
///
/// Does nothing once the run has ended. Returns whether a rock was added.
pub fn spawn_rock<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> bool {
    if !state.is_playing() {
        return false;
    }

    let placement = choose_column(&state.rocks, tuning, rng);
    if !placement.clear {
        log::debug!(
            "No clear column after {} attempts, spawning at x={:.1} anyway",
            placement.attempts,
            placement.value
        );
    }

    let x = placement.value;
    state.rocks.push(Entity::new(
        Vec2::new(x, -tuning.rock_height),
        tuning.rock_size(),
        tuning.rock_speed,
    ));
    state.push_event(GameEvent::RockSpawned { x });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock_at(x: f32, y: f32, tuning: &Tuning) -> Entity {
        Entity::new(Vec2::new(x, y), tuning.rock_size(), tuning.rock_speed)
    }

    #[test]
    fn test_bounded_retry_takes_first_accepted() {
        let mut next = 0;
        let placement = bounded_retry(
            10,
            || {
                next += 1;
                next
            },
            |&n| n == 3,
        );
        assert_eq!(
            placement,
            Placement {
                value: 3,
                attempts: 3,
                clear: true
            }
        );
    }

    #[test]
    fn test_bounded_retry_falls_back_to_last_candidate() {
        let mut next = 0;
        let placement = bounded_retry(
            10,
            || {
                next += 1;
                next
            },
            |_| false,
        );
        assert_eq!(placement.value, 10);
        assert_eq!(placement.attempts, 10);
        assert!(!placement.clear);
    }

    #[test]
    fn test_bounded_retry_always_draws_once() {
        let placement = bounded_retry(0, || 5, |_| false);
        assert_eq!(placement.attempts, 1);
        assert_eq!(placement.value, 5);
    }

    #[test]
    fn test_column_clear_ignores_rocks_below_top_band() {
        let tuning = Tuning::default();
        // Same column but already 70px down: no longer blocks
        let rocks = [rock_at(100.0, 70.0, &tuning)];
        assert!(column_is_clear(&rocks, 100.0, &tuning));

        let rocks = [rock_at(100.0, 69.0, &tuning)];
        assert!(!column_is_clear(&rocks, 100.0, &tuning));
        assert!(!column_is_clear(&rocks, 169.0, &tuning));
        assert!(column_is_clear(&rocks, 170.0, &tuning));
    }

    #[test]
    fn test_spawn_appends_rock_above_field() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(7);

        assert!(spawn_rock(&mut state, &tuning, &mut rng));
        assert_eq!(state.rocks.len(), 1);
        let rock = state.rocks[0];
        assert_eq!(rock.pos.y, -70.0);
        assert_eq!(rock.size, Vec2::new(70.0, 70.0));
        assert_eq!(rock.speed, 3.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::RockSpawned { x: rock.pos.x }]
        );
    }

    #[test]
    fn test_spawn_avoids_crowded_column_when_possible() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(99);
        // One rock at the left edge leaves x in [70, 250] free
        let rocks = vec![rock_at(0.0, -70.0, &tuning)];
        for _ in 0..50 {
            let placement = choose_column(&rocks, &tuning, &mut rng);
            if placement.clear {
                assert!(placement.value >= 70.0);
            }
        }
    }

    #[test]
    fn test_spawn_accepts_overlap_when_field_is_full() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        // Columns covering the whole field, all still in the top band
        for x in [0.0, 60.0, 120.0, 180.0, 240.0] {
            state.rocks.push(rock_at(x, 0.0, &tuning));
        }
        let mut rng = Pcg32::seed_from_u64(3);

        assert!(spawn_rock(&mut state, &tuning, &mut rng));
        assert_eq!(state.rocks.len(), 6);
    }

    #[test]
    fn test_spawn_is_noop_after_game_over() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.phase = GamePhase::GameOver;
        let before = state.clone();
        let mut rng = Pcg32::seed_from_u64(1);

        assert!(!spawn_rock(&mut state, &tuning, &mut rng));
        assert_eq!(state, before);
    }

    #[test]
    fn test_spawn_in_field_exactly_one_rock_wide() {
        let tuning = Tuning {
            field_width: 70.0,
            raft_width: 60.0,
            ..Default::default()
        };
        let mut state = GameState::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(spawn_rock(&mut state, &tuning, &mut rng));
        assert_eq!(state.rocks[0].pos.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_spawn_column_within_field(seed in any::<u64>(), existing in 0usize..8) {
            let tuning = Tuning::default();
            let mut state = GameState::new(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..existing {
                spawn_rock(&mut state, &tuning, &mut rng);
            }
            spawn_rock(&mut state, &tuning, &mut rng);
            for rock in &state.rocks {
                prop_assert!(rock.pos.x >= 0.0);
                prop_assert!(rock.pos.x <= tuning.max_rock_x());
                prop_assert_eq!(rock.pos.y, -tuning.rock_height);
            }
        }
    }
}

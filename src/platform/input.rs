//! Input events and the held-direction flags they drive
//!
//! Browser listeners translate DOM events into [`InputEvent`]s; the driver
//! feeds them through [`InputState::apply`], which updates the persistent
//! left/right flags and reports a restart request when one is accepted.

use glam::Vec2;

use crate::sim::{GamePhase, TickInput};
use crate::ui::GameOverLayout;

/// Horizontal direction of an on-screen button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Keyboard keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Any other key (still counts for restart while game over)
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" | "KeyA" => Key::Left,
            "ArrowRight" | "KeyD" => Key::Right,
            _ => Key::Other,
        }
    }

    fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Other => None,
        }
    }
}

/// A device-independent input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// On-screen arrow pressed (touchstart / mousedown)
    ButtonDown(Direction),
    /// On-screen arrow released (touchend / mouseup / mouseleave)
    ButtonUp(Direction),
    /// Click or touch on the play field, in field coordinates
    FieldTap(Vec2),
}

impl InputEvent {
    /// Whether the browser would treat this as a user gesture (audio unlock)
    pub fn is_user_gesture(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyDown(_) | InputEvent::ButtonDown(_) | InputEvent::FieldTap(_)
        )
    }
}

/// Discrete requests produced by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Restart,
}

/// Held-direction flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flags as tick input. Both may be set.
    #[inline]
    pub fn intent(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }

    /// Overwrite both flags (scripted input, demo autopilot)
    pub fn set_intent(&mut self, intent: TickInput) {
        self.left = intent.left;
        self.right = intent.right;
    }

    fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Apply one event.
    ///
    /// While the game is over any key press or a tap on the restart button
    /// requests a restart and leaves the flags alone; releases always clear
    /// their flag so nothing stays stuck across a restart.
    pub fn apply(
        &mut self,
        event: InputEvent,
        phase: GamePhase,
        layout: &GameOverLayout,
    ) -> Option<InputCommand> {
        let game_over = phase == GamePhase::GameOver;
        match event {
            InputEvent::KeyDown(_) if game_over => return Some(InputCommand::Restart),
            InputEvent::KeyDown(key) => {
                if let Some(direction) = key.direction() {
                    self.set(direction, true);
                }
            }
            InputEvent::KeyUp(key) => {
                if let Some(direction) = key.direction() {
                    self.set(direction, false);
                }
            }
            InputEvent::ButtonDown(direction) => {
                if !game_over {
                    self.set(direction, true);
                }
            }
            InputEvent::ButtonUp(direction) => self.set(direction, false),
            InputEvent::FieldTap(point) => {
                if game_over && layout.hits_restart(point) {
                    return Some(InputCommand::Restart);
                }
            }
        }
        None
    }
}

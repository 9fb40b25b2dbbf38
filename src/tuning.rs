//! Data-driven game balance
//!
//! Every number the simulation depends on lives in [`Tuning`]. The defaults
//! reproduce the classic 320x480 river; a JSON override can replace any subset
//! of fields (missing fields fall back to the defaults).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Play field size in pixels
pub const FIELD_WIDTH: f32 = 320.0;
pub const FIELD_HEIGHT: f32 = 480.0;

/// Raft defaults
pub const RAFT_WIDTH: f32 = 80.0;
pub const RAFT_HEIGHT: f32 = 80.0;
/// Distance from the raft's top edge to the bottom of the field
pub const RAFT_BOTTOM_OFFSET: f32 = 110.0;
/// Horizontal pixels per frame
pub const RAFT_SPEED: f32 = 5.0;

/// Rock defaults
pub const ROCK_WIDTH: f32 = 70.0;
pub const ROCK_HEIGHT: f32 = 70.0;
/// Vertical pixels per frame
pub const ROCK_SPEED: f32 = 3.0;

/// Milliseconds between spawner ticks
pub const SPAWN_INTERVAL_MS: u32 = 1400;
/// Placement candidates drawn before accepting an overlapping one
pub const SPAWN_ATTEMPTS: u32 = 10;

/// Hitbox inset applied to every side of raft and rock
pub const COLLISION_PADDING: f32 = 12.0;

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a positive finite number (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{entity} width {width} does not fit in field width {field_width}")]
    WiderThanField {
        entity: &'static str,
        width: f32,
        field_width: f32,
    },
    #[error("spawn_attempts must be at least 1")]
    NoSpawnAttempts,
    #[error("spawn_interval_ms must be at least 1")]
    ZeroSpawnInterval,
    #[error("collision padding {padding} leaves no hitbox for a {width}x{height} entity")]
    PaddingTooLarge { padding: f32, width: f32, height: f32 },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub raft_width: f32,
    pub raft_height: f32,
    pub raft_bottom_offset: f32,
    pub raft_speed: f32,

    pub rock_width: f32,
    pub rock_height: f32,
    pub rock_speed: f32,

    pub spawn_interval_ms: u32,
    pub spawn_attempts: u32,

    pub collision_padding: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            raft_width: RAFT_WIDTH,
            raft_height: RAFT_HEIGHT,
            raft_bottom_offset: RAFT_BOTTOM_OFFSET,
            raft_speed: RAFT_SPEED,
            rock_width: ROCK_WIDTH,
            rock_height: ROCK_HEIGHT,
            rock_speed: ROCK_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_attempts: SPAWN_ATTEMPTS,
            collision_padding: COLLISION_PADDING,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value keeps the simulation total
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("raft_width", self.raft_width),
            ("raft_height", self.raft_height),
            ("raft_speed", self.raft_speed),
            ("rock_width", self.rock_width),
            ("rock_height", self.rock_height),
            ("rock_speed", self.rock_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if !self.raft_bottom_offset.is_finite() {
            return Err(TuningError::NotFinite {
                field: "raft_bottom_offset",
                value: self.raft_bottom_offset,
            });
        }

        for (entity, width) in [("raft", self.raft_width), ("rock", self.rock_width)] {
            if width > self.field_width {
                return Err(TuningError::WiderThanField {
                    entity,
                    width,
                    field_width: self.field_width,
                });
            }
        }

        if self.spawn_attempts == 0 {
            return Err(TuningError::NoSpawnAttempts);
        }
        if self.spawn_interval_ms == 0 {
            return Err(TuningError::ZeroSpawnInterval);
        }

        let padding = self.collision_padding;
        if !padding.is_finite() {
            return Err(TuningError::NotFinite {
                field: "collision_padding",
                value: padding,
            });
        }
        if padding < 0.0 {
            return Err(TuningError::Negative {
                field: "collision_padding",
                value: padding,
            });
        }
        for (width, height) in [
            (self.raft_width, self.raft_height),
            (self.rock_width, self.rock_height),
        ] {
            if padding * 2.0 >= width.min(height) {
                return Err(TuningError::PaddingTooLarge {
                    padding,
                    width,
                    height,
                });
            }
        }

        Ok(())
    }

    #[inline]
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    #[inline]
    pub fn raft_size(&self) -> Vec2 {
        Vec2::new(self.raft_width, self.raft_height)
    }

    #[inline]
    pub fn rock_size(&self) -> Vec2 {
        Vec2::new(self.rock_width, self.rock_height)
    }

    /// Raft position at startup and after every restart (horizontally centred)
    pub fn raft_start(&self) -> Vec2 {
        Vec2::new(
            self.field_width / 2.0 - self.raft_width / 2.0,
            self.field_height - self.raft_bottom_offset,
        )
    }

    /// Right-most x the raft may occupy
    #[inline]
    pub fn max_raft_x(&self) -> f32 {
        (self.field_width - self.raft_width).max(0.0)
    }

    /// Right-most x a rock may spawn at
    #[inline]
    pub fn max_rock_x(&self) -> f32 {
        (self.field_width - self.rock_width).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.raft_start(), Vec2::new(120.0, 370.0));
        assert_eq!(tuning.max_raft_x(), 240.0);
        assert_eq!(tuning.max_rock_x(), 250.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "rock_speed": 4.5, "spawn_interval_ms": 900 }"#)
            .expect("valid override");
        assert_eq!(tuning.rock_speed, 4.5);
        assert_eq!(tuning.spawn_interval_ms, 900);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
        assert_eq!(tuning.collision_padding, COLLISION_PADDING);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = Tuning::from_json("{ rock_speed: ");
        assert!(matches!(result, Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let result = Tuning::from_json(r#"{ "raft_speed": 0 }"#);
        assert!(matches!(
            result,
            Err(TuningError::NotPositive {
                field: "raft_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_rock_wider_than_field() {
        let tuning = Tuning {
            rock_width: 400.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::WiderThanField { entity: "rock", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_spawn_settings() {
        let tuning = Tuning {
            spawn_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::NoSpawnAttempts)));

        let tuning = Tuning {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::ZeroSpawnInterval)
        ));
    }

    #[test]
    fn test_negative_padding_reported_as_negative() {
        let tuning = Tuning {
            collision_padding: -1.0,
            ..Default::default()
        };
        let err = tuning.validate().unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative {
                field: "collision_padding",
                ..
            }
        ));
        assert_eq!(err.to_string(), "collision_padding must not be negative (got -1)");

        let tuning = Tuning {
            collision_padding: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_rejects_padding_that_swallows_hitbox() {
        let tuning = Tuning {
            collision_padding: 35.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::PaddingTooLarge { .. })
        ));
    }
}

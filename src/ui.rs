//! Game-over overlay layout and on-screen text placement
//!
//! Shared by the renderer (to draw the panel and button), by input handling
//! (to hit-test taps against the restart button) and by the page HUD (to put
//! the score, title and button label on top of the canvas), so all three
//! agree on where things are.

use glam::Vec2;

use crate::sim::Rect;

/// Panel width never exceeds this
pub const PANEL_MAX_WIDTH: f32 = 340.0;
/// Horizontal margin kept around the panel on narrow fields
pub const PANEL_MARGIN: f32 = 40.0;
pub const PANEL_HEIGHT: f32 = 180.0;
pub const PANEL_CORNER_RADIUS: f32 = 12.0;

pub const RESTART_BUTTON_WIDTH: f32 = 160.0;
pub const RESTART_BUTTON_HEIGHT: f32 = 48.0;
pub const RESTART_BUTTON_CORNER_RADIUS: f32 = 8.0;
/// Distance from the panel's bottom edge up to the button's top edge
pub const RESTART_BUTTON_BOTTOM_OFFSET: f32 = 70.0;

/// Running score, top-left of the field (baseline)
pub const SCORE_LABEL_BASELINE: Vec2 = Vec2::new(10.0, 26.0);
pub const SCORE_FONT_PX: f32 = 20.0;
/// Baselines below the panel's top edge
pub const TITLE_BASELINE_OFFSET: f32 = 55.0;
pub const TITLE_FONT_PX: f32 = 34.0;
pub const FINAL_SCORE_BASELINE_OFFSET: f32 = 90.0;
pub const FINAL_SCORE_FONT_PX: f32 = 18.0;
/// Baseline below the restart button's top edge
pub const RESTART_LABEL_BASELINE_OFFSET: f32 = 32.0;
pub const RESTART_LABEL_FONT_PX: f32 = 20.0;

/// Horizontal anchoring of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Baseline point is the left edge
    Left,
    /// Baseline point is the horizontal centre
    Center,
}

/// A line of page text overlaid on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    /// DOM id of the element holding the text
    pub element_id: &'static str,
    /// Baseline anchor in field coordinates
    pub baseline: Vec2,
    pub font_px: f32,
    pub align: Align,
}

impl Label {
    /// Score shown while playing
    pub fn score() -> Self {
        Self {
            element_id: "hud-score",
            baseline: SCORE_LABEL_BASELINE,
            font_px: SCORE_FONT_PX,
            align: Align::Left,
        }
    }

    /// Inline style placing the label over a canvas showing `field`.
    ///
    /// Positions are percentages of the field and the font scales with the
    /// container height (`cqh`), so the text tracks the canvas at any CSS size.
    /// Assumes `line-height: 1`, so the box top sits one font size above the
    /// baseline.
    pub fn css(&self, field: Vec2) -> String {
        let left = self.baseline.x / field.x * 100.0;
        let top = (self.baseline.y - self.font_px) / field.y * 100.0;
        let font = self.font_px / field.y * 100.0;
        let shift = match self.align {
            Align::Left => "",
            Align::Center => "transform:translateX(-50%);",
        };
        format!(
            "position:absolute;left:{:.3}%;top:{:.3}%;font-size:{:.3}cqh;line-height:1;{}",
            left, top, font, shift
        )
    }
}

/// Where the game-over panel and its restart button sit on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverLayout {
    pub panel: Rect,
    pub restart_button: Rect,
}

impl GameOverLayout {
    /// Centre the panel in a field of the given size
    pub fn for_field(field: Vec2) -> Self {
        let panel_w = PANEL_MAX_WIDTH.min(field.x - PANEL_MARGIN);
        let panel_x = (field.x - panel_w) / 2.0;
        let panel_y = (field.y - PANEL_HEIGHT) / 2.0;
        let panel = Rect::new(panel_x, panel_y, panel_w, PANEL_HEIGHT);

        let restart_button = Rect::new(
            field.x / 2.0 - RESTART_BUTTON_WIDTH / 2.0,
            panel_y + PANEL_HEIGHT - RESTART_BUTTON_BOTTOM_OFFSET,
            RESTART_BUTTON_WIDTH,
            RESTART_BUTTON_HEIGHT,
        );

        Self {
            panel,
            restart_button,
        }
    }

    /// Title, final score and button caption, in that order
    pub fn labels(&self) -> [Label; 3] {
        let center_x = self.panel.center().x;
        [
            Label {
                element_id: "game-over-title",
                baseline: Vec2::new(center_x, self.panel.pos.y + TITLE_BASELINE_OFFSET),
                font_px: TITLE_FONT_PX,
                align: Align::Center,
            },
            Label {
                element_id: "final-score-line",
                baseline: Vec2::new(center_x, self.panel.pos.y + FINAL_SCORE_BASELINE_OFFSET),
                font_px: FINAL_SCORE_FONT_PX,
                align: Align::Center,
            },
            Label {
                element_id: "restart-label",
                baseline: Vec2::new(
                    self.restart_button.center().x,
                    self.restart_button.pos.y + RESTART_LABEL_BASELINE_OFFSET,
                ),
                font_px: RESTART_LABEL_FONT_PX,
                align: Align::Center,
            },
        ]
    }

    /// Whether a field-space point lands on the restart button (edges included)
    pub fn hits_restart(&self, point: Vec2) -> bool {
        self.restart_button.contains_point(point)
    }
}

// Health bar layout

use crate::core::Rect;

use super::characters::Health;
use super::config::ArenaConfig;

pub const BAR_WIDTH: i32 = 200;
pub const BAR_HEIGHT: i32 = 20;
pub const BAR_MARGIN: i32 = 10;

/// Bar background, shown where health is missing
pub const BAR_BACKGROUND: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const BAR_FILL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// A health bar ready to draw: background and fill rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthBar {
    pub background: Rect,
    pub fill: Rect,
}

impl HealthBar {
    /// Lay out a bar at `(x, y)`, filled in proportion to `health`
    pub fn new(x: i32, y: i32, health: &Health) -> Self {
        let background = Rect::new(x, y, BAR_WIDTH, BAR_HEIGHT);
        let fill_width = (BAR_WIDTH as f32 * health.ratio()).round() as i32;
        Self {
            background,
            fill: Rect::new(x, y, fill_width, BAR_HEIGHT),
        }
    }

    /// Top-left bar for the Adventurer
    pub fn adventurer(health: &Health) -> Self {
        Self::new(BAR_MARGIN, BAR_MARGIN, health)
    }

    /// Top-right bar for the Demon
    pub fn demon(health: &Health, arena: &ArenaConfig) -> Self {
        Self::new(arena.width - BAR_WIDTH - BAR_MARGIN, BAR_MARGIN, health)
    }
}

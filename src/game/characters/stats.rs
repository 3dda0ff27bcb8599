// Character stats - fixed per variant

use super::state::Facing;

/// Fixed tuning values for one character variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterStats {
    /// Display name, also used in log lines
    pub name: &'static str,
    /// Asset directory under the asset root
    pub asset_dir: &'static str,
    /// Starting health
    pub max_health: i32,
    /// Horizontal pixels moved per tick
    pub speed: i32,
    /// Sprite scale applied to the source frames
    pub scale: u32,
    /// Horizontal center of the spawn position
    pub spawn_center_x: i32,
    /// Facing at spawn
    pub spawn_facing: Facing,
    /// Direction the source art faces when drawn unflipped
    pub art_facing: Facing,
    /// Body size used when no frame texture is available to measure
    pub default_body: (i32, i32),
}

impl CharacterStats {
    /// Whether a sprite facing `facing` must be mirrored when drawn
    pub fn flip_for(&self, facing: Facing) -> bool {
        facing != self.art_facing
    }
}

/// The player-controlled Adventurer
pub const ADVENTURER_STATS: CharacterStats = CharacterStats {
    name: "Adventurer",
    asset_dir: "Player",
    max_health: 8,
    speed: 5,
    scale: 2,
    spawn_center_x: 100,
    spawn_facing: Facing::Right,
    art_facing: Facing::Right,
    // 50x37 source frames at scale 2
    default_body: (100, 74),
};

/// The AI-controlled Demon
pub const DEMON_STATS: CharacterStats = CharacterStats {
    name: "Demon",
    asset_dir: "Enemy",
    max_health: 25,
    speed: 3,
    scale: 2,
    spawn_center_x: 800,
    spawn_facing: Facing::Left,
    art_facing: Facing::Left,
    default_body: (200, 180),
};

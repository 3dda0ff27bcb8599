// Game configuration: arena geometry, timing constants and runtime settings

use std::path::PathBuf;

/// Ticks per second of the gameplay loop
pub const TICK_RATE: u32 = 60;

/// Wall-clock interval between animation frame advances
pub const ANIMATION_CADENCE_MS: u64 = 100;

/// Upper bound on how long the Adventurer stays in the attacking state
pub const ATTACK_WINDOW_MS: u64 = 500;

/// How long the defeat message is held before restart/quit input is accepted
pub const GAME_OVER_HOLD_MS: u64 = 1000;

/// Center distance at or below which the Demon stops approaching and swings
pub const AGGRO_DISTANCE: i32 = 100;

/// Frame of the Demon's attack on which its strike lands
pub const ENEMY_STRIKE_FRAME: usize = 10;

/// Vertical velocity applied on jump (negative is up)
pub const JUMP_IMPULSE: i32 = -15;

/// Vertical velocity gained per tick
pub const GRAVITY: i32 = 1;

/// Terminal downward velocity
pub const MAX_FALL_SPEED: i32 = 10;

/// Environment variable overriding the asset root
pub const ASSETS_ENV_VAR: &str = "DEMON_SLAYER_ASSETS";

/// Screen and play-field geometry, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
    /// Line the characters stand on
    pub floor_y: i32,
    /// Horizontal bounds of the play field
    pub min_x: i32,
    pub max_x: i32,
}

pub const ARENA: ArenaConfig = ArenaConfig {
    width: 1200,
    height: 700,
    floor_y: 690,
    min_x: 0,
    max_x: 1200,
};

impl Default for ArenaConfig {
    fn default() -> Self {
        ARENA
    }
}

/// Runtime settings for the windowed game
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub window_title: String,
    pub asset_root: PathBuf,
    pub arena: ArenaConfig,
    /// Draw body and attack hitbox outlines
    pub show_hitboxes: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Adventurer vs Demon".to_string(),
            asset_root: PathBuf::from("assets"),
            arena: ARENA,
            show_hitboxes: true,
        }
    }
}

impl GameConfig {
    /// Defaults, with the asset root taken from the environment when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(root) = std::env::var(ASSETS_ENV_VAR)
            .ok()
            .filter(|s| !s.is_empty())
        {
            config.asset_root = PathBuf::from(root);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_defaults() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.width, 1200);
        assert_eq!(arena.height, 700);
        assert!(arena.floor_y < arena.height);
        assert!(arena.min_x < arena.max_x);
    }

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.window_title, "Adventurer vs Demon");
        assert_eq!(config.asset_root, PathBuf::from("assets"));
        assert!(config.show_hitboxes);
    }

    #[test]
    fn test_jump_peaks_below_screen_top() {
        // Sum of upward velocities until gravity cancels the impulse
        let rise: i32 = (1..=(-JUMP_IMPULSE)).sum();
        assert!(rise < ARENA.floor_y);
    }
}

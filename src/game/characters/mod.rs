// Character system
//
// This module contains the two fighters and what they share:
// - Action sets and facing
// - Animation tables and the frame cadence clock
// - Health and the combatant interface
// - The Adventurer (player) and the Demon (AI)

pub mod adventurer;
pub mod animation;
pub mod character;
pub mod demon;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use adventurer::{Adventurer, MoveInput};
pub use animation::{AnimationError, AnimationTable, FrameCounts, SpriteFrame};
pub use character::{Combatant, Health, HitOutcome};
pub use demon::Demon;
pub use state::{ActionSet, EnemyAction, PlayerAction};
pub use stats::{CharacterStats, ADVENTURER_STATS, DEMON_STATS};

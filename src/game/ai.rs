// Demon AI - proximity state machine

use crate::core::Rect;

use super::characters::{Combatant, Demon, EnemyAction};
use super::config::{ArenaConfig, AGGRO_DISTANCE};

/// What the Demon decided to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    /// Walking toward the target
    Approach,
    /// Swinging, or just started a swing
    Attack,
    /// Nothing to do: the target or the Demon is dead
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemonAi {
    /// Center distance at or below which the Demon swings
    pub aggro_distance: i32,
}

impl Default for DemonAi {
    fn default() -> Self {
        Self {
            aggro_distance: AGGRO_DISTANCE,
        }
    }
}

impl DemonAi {
    pub fn new(aggro_distance: i32) -> Self {
        Self { aggro_distance }
    }

    /// Decide and apply the Demon's behavior for one tick.
    ///
    /// A swing in progress is never interrupted. Otherwise the Demon faces the
    /// target, then either closes in or starts a new swing from frame 0.
    pub fn update(
        &self,
        demon: &mut Demon,
        target: Rect,
        target_alive: bool,
        arena: &ArenaConfig,
        now_ms: u64,
    ) -> AiState {
        if !demon.is_alive() {
            return AiState::Idle;
        }
        if demon.is_attacking() {
            return AiState::Attack;
        }
        if !target_alive {
            demon.set_action(EnemyAction::Idle, now_ms);
            return AiState::Idle;
        }

        let target_x = target.center_x();
        demon.face_toward(target_x);

        let distance = (target_x - demon.bounds().center_x()).abs();
        if distance > self.aggro_distance {
            demon.step_toward(target_x, arena);
            demon.set_action(EnemyAction::Move, now_ms);
            AiState::Approach
        } else {
            demon.start_attack(now_ms);
            AiState::Attack
        }
    }
}

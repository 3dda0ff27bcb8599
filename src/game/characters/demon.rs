// The AI-controlled Demon

use crate::core::Rect;
use crate::game::config::{ArenaConfig, ANIMATION_CADENCE_MS, ENEMY_STRIKE_FRAME};

use super::animation::{AnimationClock, FrameCounts, SpriteFrame};
use super::character::{Combatant, Health};
use super::state::{EnemyAction, Facing};
use super::stats::CharacterStats;

#[derive(Debug, Clone, PartialEq)]
pub struct Demon {
    stats: CharacterStats,
    frames: FrameCounts<EnemyAction>,
    spawn: Rect,

    rect: Rect,
    facing: Facing,
    action: EnemyAction,
    frame_index: usize,
    clock: AnimationClock,
    /// The frame index moved during the last animation step
    frame_entered: bool,

    alive: bool,
    death_animation_complete: bool,
    health: Health,
}

impl Demon {
    /// Create the Demon standing on the floor at its spawn point
    pub fn new(
        stats: CharacterStats,
        frames: FrameCounts<EnemyAction>,
        body: (i32, i32),
        arena: &ArenaConfig,
        now_ms: u64,
    ) -> Self {
        let mut spawn = Rect::new(0, 0, body.0, body.1);
        spawn.set_center_x(stats.spawn_center_x);
        spawn.set_bottom(arena.floor_y);

        Self {
            stats,
            frames,
            spawn,
            rect: spawn,
            facing: stats.spawn_facing,
            action: EnemyAction::Idle,
            frame_index: 0,
            clock: AnimationClock::new(ANIMATION_CADENCE_MS, now_ms),
            frame_entered: false,
            alive: true,
            death_animation_complete: false,
            health: Health::new(stats.max_health),
        }
    }

    pub fn action(&self) -> EnemyAction {
        self.action
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_count(&self) -> usize {
        self.frames.get(self.action)
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_attacking(&self) -> bool {
        self.action == EnemyAction::Attack
    }

    /// Teleport, keeping size
    #[cfg(test)]
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    /// Switch action; switching to a different action restarts its animation
    pub fn set_action(&mut self, action: EnemyAction, now_ms: u64) {
        if self.action != action {
            self.action = action;
            self.frame_index = 0;
            self.clock.restart(now_ms);
        }
    }

    /// Start a swing from its first frame
    pub fn start_attack(&mut self, now_ms: u64) {
        self.action = EnemyAction::Attack;
        self.frame_index = 0;
        self.clock.restart(now_ms);
    }

    /// Turn toward a horizontal position
    pub fn face_toward(&mut self, target_x: i32) {
        if let Some(facing) = Facing::toward(self.rect.center_x(), target_x) {
            self.facing = facing;
        }
    }

    /// Take one step toward a horizontal position, staying inside the field
    pub fn step_toward(&mut self, target_x: i32, arena: &ArenaConfig) {
        self.face_toward(target_x);
        self.rect.x += self.stats.speed * self.facing.sign();
        self.rect.clamp_horizontal(arena.min_x, arena.max_x);
    }

    /// Body hitbox: the lower 80% of the sprite, half its width, centered
    pub fn body_hitbox(&self) -> Rect {
        let width = self.rect.width / 2;
        let height = self.rect.height * 4 / 5;
        Rect::new(
            self.rect.center_x() - width / 2,
            self.rect.bottom() - height,
            width,
            height,
        )
    }

    /// Area covered by the swing: half a body hitbox wide, beside the body on
    /// the side the Demon faces
    pub fn strike_box(&self) -> Rect {
        let body = self.body_hitbox();
        let mut strike = Rect::new(body.x, body.y, body.width / 2, body.height);
        match self.facing {
            Facing::Right => strike.set_left(body.right()),
            Facing::Left => strike.set_right(body.left()),
        }
        strike
    }

    /// True only on the tick the swing reaches its active frame
    pub fn is_striking(&self) -> bool {
        self.alive
            && self.action == EnemyAction::Attack
            && self.frame_index == ENEMY_STRIKE_FRAME
            && self.frame_entered
    }
}

impl Combatant for Demon {
    type Action = EnemyAction;

    fn advance_animation(&mut self, now_ms: u64) -> bool {
        self.frame_entered = false;
        if !self.clock.tick(now_ms) {
            return false;
        }

        self.frame_index += 1;
        let count = self.frames.get(self.action);
        if self.frame_index >= count {
            match self.action {
                EnemyAction::Death => {
                    self.death_animation_complete = true;
                    self.frame_index = count - 1;
                }
                EnemyAction::Attack => {
                    self.action = EnemyAction::Idle;
                    self.frame_index = 0;
                }
                _ => self.frame_index = 0,
            }
        }
        self.frame_entered = true;
        true
    }

    fn sprite_frame(&self) -> SpriteFrame<EnemyAction> {
        SpriteFrame {
            action: self.action,
            frame_index: self.frame_index.min(self.frames.last_index(self.action)),
            flip_horizontal: self.stats.flip_for(self.facing),
            bounds: self.rect,
        }
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn name(&self) -> &'static str {
        self.stats.name
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn death_animation_complete(&self) -> bool {
        self.death_animation_complete
    }

    fn die(&mut self, now_ms: u64) {
        self.alive = false;
        self.action = EnemyAction::Death;
        self.frame_index = 0;
        self.frame_entered = false;
        self.clock.restart(now_ms);
    }

    fn reset(&mut self, now_ms: u64) {
        self.rect = self.spawn;
        self.facing = self.stats.spawn_facing;
        self.action = EnemyAction::Idle;
        self.frame_index = 0;
        self.clock.restart(now_ms);
        self.frame_entered = false;
        self.alive = true;
        self.death_animation_complete = false;
        self.health.restore();
    }
}

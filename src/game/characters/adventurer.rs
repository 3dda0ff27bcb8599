// The player-controlled Adventurer: movement, jumping, combo attacks

use crate::core::Rect;
use crate::game::config::{
    ArenaConfig, ANIMATION_CADENCE_MS, ATTACK_WINDOW_MS, GRAVITY, JUMP_IMPULSE, MAX_FALL_SPEED,
};

use super::animation::{AnimationClock, FrameCounts, SpriteFrame};
use super::character::{Combatant, Health};
use super::state::{Facing, PlayerAction};
use super::stats::CharacterStats;

/// Horizontal movement input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Adventurer {
    stats: CharacterStats,
    frames: FrameCounts<PlayerAction>,
    spawn: Rect,

    rect: Rect,
    facing: Facing,
    action: PlayerAction,
    /// Action resolved on the previous movement step
    previous_action: PlayerAction,
    frame_index: usize,
    clock: AnimationClock,

    alive: bool,
    death_animation_complete: bool,
    health: Health,

    // Physics
    vel_y: i32,
    in_air: bool,
    jump_requested: bool,

    // Combat
    attacking: bool,
    attack_combo_stage: u8,
    attack_started_ms: u64,
    hit_registered: bool,
}

impl Adventurer {
    /// Create the Adventurer standing on the floor at its spawn point
    pub fn new(
        stats: CharacterStats,
        frames: FrameCounts<PlayerAction>,
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
            action: PlayerAction::Idle,
            previous_action: PlayerAction::Idle,
            frame_index: 0,
            clock: AnimationClock::new(ANIMATION_CADENCE_MS, now_ms),
            alive: true,
            death_animation_complete: false,
            health: Health::new(stats.max_health),
            vel_y: 0,
            in_air: false,
            jump_requested: false,
            attacking: false,
            attack_combo_stage: 0,
            attack_started_ms: now_ms,
            hit_registered: false,
        }
    }

    pub fn action(&self) -> PlayerAction {
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

    pub fn in_air(&self) -> bool {
        self.in_air
    }

    #[cfg(test)]
    pub fn vertical_velocity(&self) -> i32 {
        self.vel_y
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn attack_combo_stage(&self) -> u8 {
        self.attack_combo_stage
    }

    pub fn hit_registered(&self) -> bool {
        self.hit_registered
    }

    /// Teleport, keeping size
    #[cfg(test)]
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    /// Queue a jump for the next movement step; ignored while airborne
    pub fn request_jump(&mut self) {
        if !self.in_air {
            self.jump_requested = true;
        }
    }

    /// Apply one tick of horizontal movement and gravity, then resolve the
    /// non-attack action from the physical state.
    pub fn update_movement(&mut self, input: MoveInput, arena: &ArenaConfig, now_ms: u64) {
        let mut dx = 0;
        if input.left {
            dx = -self.stats.speed;
            self.facing = Facing::Left;
        }
        if input.right {
            dx = self.stats.speed;
            self.facing = Facing::Right;
        }

        self.rect.x += dx;
        self.rect.clamp_horizontal(arena.min_x, arena.max_x);

        if self.jump_requested {
            self.vel_y = JUMP_IMPULSE;
            self.jump_requested = false;
            self.in_air = true;
        }

        self.vel_y = (self.vel_y + GRAVITY).min(MAX_FALL_SPEED);
        let mut dy = self.vel_y;

        // Land exactly on the floor instead of stepping through it
        if self.rect.bottom() + dy > arena.floor_y {
            dy = arena.floor_y - self.rect.bottom();
            self.in_air = false;
            self.vel_y = 0;
        }
        self.rect.y += dy;

        if !self.attacking {
            self.action = if self.in_air && self.vel_y < 0 {
                PlayerAction::Jump
            } else if self.in_air {
                PlayerAction::Fall
            } else if dx != 0 {
                PlayerAction::Move
            } else {
                PlayerAction::Idle
            };
        }

        if self.action != self.previous_action {
            self.frame_index = 0;
            self.clock.restart(now_ms);
            self.previous_action = self.action;
        }
    }

    /// Begin an attack unless one is already running.
    ///
    /// Returns true when a new swing started.
    pub fn start_attack(&mut self, now_ms: u64) -> bool {
        if self.attacking {
            return false;
        }

        self.attacking = true;
        self.attack_started_ms = now_ms;
        self.hit_registered = false;
        self.action = if self.in_air {
            PlayerAction::AirAttack
        } else {
            PlayerAction::grounded_attack(self.attack_combo_stage)
        };
        self.frame_index = 0;
        self.clock.restart(now_ms);
        true
    }

    /// Force-clear an attack that has run past the attack window.
    ///
    /// Returns true when the attack was cut short.
    pub fn expire_attack(&mut self, now_ms: u64) -> bool {
        if self.attacking && now_ms.saturating_sub(self.attack_started_ms) > ATTACK_WINDOW_MS {
            self.attacking = false;
            self.hit_registered = false;
            return true;
        }
        false
    }

    /// Damage dealt by the current swing
    pub fn attack_damage(&self) -> i32 {
        if self.action == PlayerAction::Attack3 {
            3
        } else {
            1
        }
    }

    /// Mark the current swing as having landed
    pub fn register_hit(&mut self) {
        self.hit_registered = true;
    }

    /// Reach of the current swing: the body box pushed half a width forward
    pub fn attack_hitbox(&self) -> Rect {
        let mut reach = self.rect;
        match self.facing {
            Facing::Left => reach.set_left(self.rect.left() - self.rect.width / 2),
            Facing::Right => reach.set_right(self.rect.right() + self.rect.width / 2),
        }
        reach
    }

    fn finish_attack(&mut self) {
        self.attacking = false;
        self.hit_registered = false;
        if !self.in_air {
            self.attack_combo_stage = (self.attack_combo_stage + 1) % 3;
        }
        self.action = PlayerAction::Idle;
        self.frame_index = 0;
    }
}

impl Combatant for Adventurer {
    type Action = PlayerAction;

    fn advance_animation(&mut self, now_ms: u64) -> bool {
        if !self.clock.tick(now_ms) {
            return false;
        }

        self.frame_index += 1;
        let count = self.frames.get(self.action);
        if self.frame_index >= count {
            if self.action == PlayerAction::Death {
                self.death_animation_complete = true;
                self.frame_index = count - 1;
            } else if self.attacking {
                self.finish_attack();
            } else {
                self.frame_index = 0;
            }
        }
        true
    }

    fn sprite_frame(&self) -> SpriteFrame<PlayerAction> {
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
        self.action = PlayerAction::Death;
        self.frame_index = 0;
        self.clock.restart(now_ms);
    }

    fn reset(&mut self, now_ms: u64) {
        self.rect = self.spawn;
        self.facing = self.stats.spawn_facing;
        self.action = PlayerAction::Idle;
        self.previous_action = PlayerAction::Idle;
        self.frame_index = 0;
        self.clock.restart(now_ms);
        self.alive = true;
        self.death_animation_complete = false;
        self.health.restore();
        self.vel_y = 0;
        self.in_air = false;
        self.jump_requested = false;
        self.attacking = false;
        self.attack_combo_stage = 0;
        self.attack_started_ms = now_ms;
        self.hit_registered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::stats::ADVENTURER_STATS;
    use crate::game::config::ARENA;

    fn adventurer() -> Adventurer {
        Adventurer::new(
            ADVENTURER_STATS,
            FrameCounts::standard(),
            ADVENTURER_STATS.default_body,
            &ARENA,
            0,
        )
    }

    /// Run animation steps exactly on the cadence until the action changes
    fn play_out(adventurer: &mut Adventurer, mut now: u64) -> u64 {
        let action = adventurer.action();
        while adventurer.action() == action {
            now += ANIMATION_CADENCE_MS;
            adventurer.advance_animation(now);
        }
        now
    }

    #[test]
    fn test_spawns_on_floor() {
        let a = adventurer();
        assert_eq!(a.bounds().bottom(), ARENA.floor_y);
        assert_eq!(a.bounds().center_x(), ADVENTURER_STATS.spawn_center_x);
        assert_eq!(a.action(), PlayerAction::Idle);
        assert_eq!(a.health().current(), 8);
        assert!(a.is_alive());
    }

    #[test]
    fn test_standing_still_stays_grounded() {
        let mut a = adventurer();
        for t in 0..10 {
            a.update_movement(MoveInput::default(), &ARENA, t * 16);
        }
        assert!(!a.in_air());
        assert_eq!(a.bounds().bottom(), ARENA.floor_y);
        assert_eq!(a.action(), PlayerAction::Idle);
    }

    #[test]
    fn test_horizontal_movement_and_facing() {
        let mut a = adventurer();
        let start = a.bounds().x;

        a.update_movement(MoveInput { left: false, right: true }, &ARENA, 16);
        assert_eq!(a.bounds().x, start + ADVENTURER_STATS.speed);
        assert_eq!(a.facing(), Facing::Right);
        assert_eq!(a.action(), PlayerAction::Move);

        a.update_movement(MoveInput { left: true, right: false }, &ARENA, 32);
        assert_eq!(a.bounds().x, start);
        assert_eq!(a.facing(), Facing::Left);
        assert!(a.sprite_frame().flip_horizontal);
    }

    #[test]
    fn test_movement_clamped_to_field() {
        let mut a = adventurer();
        for t in 0..100 {
            a.update_movement(MoveInput { left: true, right: false }, &ARENA, t * 16);
        }
        assert_eq!(a.bounds().left(), ARENA.min_x);

        a.set_position(ARENA.max_x - 10, a.bounds().y);
        a.update_movement(MoveInput { left: false, right: true }, &ARENA, 2000);
        assert_eq!(a.bounds().right(), ARENA.max_x);
    }

    #[test]
    fn test_jump_arc_lands_on_floor() {
        let mut a = adventurer();
        a.request_jump();
        a.update_movement(MoveInput::default(), &ARENA, 16);
        assert!(a.in_air());
        assert_eq!(a.vertical_velocity(), JUMP_IMPULSE + GRAVITY);
        assert_eq!(a.action(), PlayerAction::Jump);

        let mut saw_fall = false;
        for t in 2..200 {
            a.update_movement(MoveInput::default(), &ARENA, t * 16);
            assert!(a.bounds().bottom() <= ARENA.floor_y);
            saw_fall |= a.action() == PlayerAction::Fall;
            if !a.in_air() {
                break;
            }
        }

        assert!(saw_fall);
        assert!(!a.in_air());
        assert_eq!(a.bounds().bottom(), ARENA.floor_y);
        assert_eq!(a.vertical_velocity(), 0);
    }

    #[test]
    fn test_jump_ignored_in_air() {
        let mut a = adventurer();
        a.request_jump();
        a.update_movement(MoveInput::default(), &ARENA, 16);
        a.request_jump();
        a.update_movement(MoveInput::default(), &ARENA, 32);
        // Velocity keeps integrating rather than getting a second impulse
        assert_eq!(a.vertical_velocity(), JUMP_IMPULSE + 2 * GRAVITY);
    }

    #[test]
    fn test_fall_speed_capped() {
        let mut a = adventurer();
        a.set_position(a.bounds().x, -400);
        let mut max_seen = 0;
        for t in 0..60 {
            a.update_movement(MoveInput::default(), &ARENA, t * 16);
            max_seen = max_seen.max(a.vertical_velocity());
        }
        assert_eq!(max_seen, MAX_FALL_SPEED);
    }

    #[test]
    fn test_action_change_resets_frame_index() {
        let mut a = adventurer();
        a.advance_animation(100);
        a.advance_animation(200);
        assert_eq!(a.frame_index(), 2);

        a.update_movement(MoveInput { left: false, right: true }, &ARENA, 210);
        assert_eq!(a.action(), PlayerAction::Move);
        assert_eq!(a.frame_index(), 0);

        // The new action holds its first frame for a full cadence
        assert!(!a.advance_animation(250));
        assert!(a.advance_animation(310));
        assert_eq!(a.frame_index(), 1);
    }

    #[test]
    fn test_looping_action_wraps() {
        let mut a = adventurer();
        for step in 1..=4 {
            a.advance_animation(step * ANIMATION_CADENCE_MS);
        }
        assert_eq!(a.action(), PlayerAction::Idle);
        assert_eq!(a.frame_index(), 0);
    }

    #[test]
    fn test_grounded_attack_selects_combo_stage() {
        let mut a = adventurer();
        assert!(a.start_attack(0));
        assert_eq!(a.action(), PlayerAction::Attack1);
        assert!(a.is_attacking());
        assert!(!a.start_attack(10));
    }

    #[test]
    fn test_combo_cycles_on_grounded_completions() {
        let mut a = adventurer();
        let mut now = 0;
        let expected = [
            (PlayerAction::Attack1, 1),
            (PlayerAction::Attack2, 2),
            (PlayerAction::Attack3, 0),
            (PlayerAction::Attack1, 1),
        ];

        for (action, next_stage) in expected {
            a.start_attack(now);
            assert_eq!(a.action(), action);
            now = play_out(&mut a, now);
            assert!(!a.is_attacking());
            assert_eq!(a.action(), PlayerAction::Idle);
            assert_eq!(a.attack_combo_stage(), next_stage);
        }
    }

    #[test]
    fn test_air_attack_does_not_advance_combo() {
        let mut a = adventurer();
        a.request_jump();
        a.update_movement(MoveInput::default(), &ARENA, 0);
        assert!(a.in_air());

        a.start_attack(0);
        assert_eq!(a.action(), PlayerAction::AirAttack);
        play_out(&mut a, 0);

        assert!(!a.is_attacking());
        assert_eq!(a.attack_combo_stage(), 0);
    }

    #[test]
    fn test_third_attack_hits_harder() {
        let mut a = adventurer();
        let mut now = 0;
        for _ in 0..2 {
            a.start_attack(now);
            assert_eq!(a.attack_damage(), 1);
            now = play_out(&mut a, now);
        }
        a.start_attack(now);
        assert_eq!(a.action(), PlayerAction::Attack3);
        assert_eq!(a.attack_damage(), 3);
    }

    #[test]
    fn test_attack_window_expires() {
        let mut a = adventurer();
        a.start_attack(1000);
        a.register_hit();

        assert!(!a.expire_attack(1500));
        assert!(a.is_attacking());

        assert!(a.expire_attack(1501));
        assert!(!a.is_attacking());
        assert!(!a.hit_registered());
        assert_eq!(a.attack_combo_stage(), 0);
    }

    #[test]
    fn test_new_attack_clears_hit_registration() {
        let mut a = adventurer();
        a.start_attack(0);
        a.register_hit();
        let now = play_out(&mut a, 0);
        assert!(!a.hit_registered());

        a.start_attack(now);
        assert!(!a.hit_registered());
    }

    #[test]
    fn test_attack_hitbox_extends_forward() {
        let mut a = adventurer();
        let body = a.bounds();

        let reach = a.attack_hitbox();
        assert_eq!(reach.width, body.width);
        assert_eq!(reach.right(), body.right() + body.width / 2);

        a.update_movement(MoveInput { left: true, right: false }, &ARENA, 16);
        let body = a.bounds();
        let reach = a.attack_hitbox();
        assert_eq!(reach.left(), body.left() - body.width / 2);
    }

    #[test]
    fn test_death_freezes_on_last_frame() {
        let mut a = adventurer();
        let outcome = a.take_hit(8, 0);
        assert!(outcome.killed);
        assert!(!a.is_alive());
        assert_eq!(a.action(), PlayerAction::Death);
        assert_eq!(a.frame_index(), 0);

        let last = FrameCounts::<PlayerAction>::standard().last_index(PlayerAction::Death);
        let mut now = 0;
        for _ in 0..last {
            now += ANIMATION_CADENCE_MS;
            a.advance_animation(now);
        }
        assert_eq!(a.frame_index(), last);
        assert!(!a.death_animation_complete());

        now += ANIMATION_CADENCE_MS;
        a.advance_animation(now);
        assert!(a.death_animation_complete());
        assert_eq!(a.frame_index(), last);

        now += 10 * ANIMATION_CADENCE_MS;
        a.advance_animation(now);
        assert_eq!(a.frame_index(), last);
    }

    #[test]
    fn test_hit_on_dead_character_does_not_restart_death() {
        let mut a = adventurer();
        a.take_hit(8, 0);
        a.advance_animation(100);
        let outcome = a.take_hit(1, 150);
        assert!(!outcome.killed);
        assert_eq!(a.frame_index(), 1);
    }

    #[test]
    fn test_reset_matches_construction() {
        let mut a = adventurer();
        a.update_movement(MoveInput { left: false, right: true }, &ARENA, 16);
        a.request_jump();
        a.update_movement(MoveInput::default(), &ARENA, 32);
        a.start_attack(32);
        a.take_hit(20, 40);
        a.advance_animation(500);

        a.reset(0);
        assert_eq!(a, adventurer());
    }
}

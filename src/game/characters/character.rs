// Shared character capabilities: health, hits and the combatant interface

use crate::core::math::clamped_ratio;
use crate::core::Rect;

use super::animation::SpriteFrame;
use super::state::ActionSet;

/// Health counter.
///
/// The counter itself is not clamped; a heavy hit can drive it below zero.
/// Display code must go through [`Health::ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    /// Subtract damage and return the remaining health
    pub fn apply_damage(&mut self, damage: i32) -> i32 {
        self.current -= damage;
        self.current
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Remaining fraction in `[0, 1]`
    pub fn ratio(&self) -> f32 {
        clamped_ratio(self.current, self.max)
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// Result of a landed hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub damage: i32,
    pub remaining: i32,
    /// The hit took the defender from alive to dead
    pub killed: bool,
}

/// What the match controller needs from either fighter
pub trait Combatant {
    type Action: ActionSet;

    /// Advance the animation if the cadence allows; returns true when the
    /// frame index moved this tick
    fn advance_animation(&mut self, now_ms: u64) -> bool;

    /// Current frame and orientation for drawing
    fn sprite_frame(&self) -> SpriteFrame<Self::Action>;

    /// Bounding rectangle used for overlap tests
    fn bounds(&self) -> Rect;

    fn name(&self) -> &'static str;

    fn health(&self) -> &Health;

    fn health_mut(&mut self) -> &mut Health;

    fn is_alive(&self) -> bool;

    fn death_animation_complete(&self) -> bool;

    /// Enter the death action; called once when health runs out
    fn die(&mut self, now_ms: u64);

    /// Put the character back in its starting state
    fn reset(&mut self, now_ms: u64);

    /// Apply damage, killing the character when its health runs out
    fn take_hit(&mut self, damage: i32, now_ms: u64) -> HitOutcome {
        let remaining = self.health_mut().apply_damage(damage);
        let killed = self.is_alive() && self.health().is_depleted();
        if killed {
            self.die(now_ms);
        }
        HitOutcome {
            damage,
            remaining,
            killed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(8);
        assert_eq!(health.apply_damage(3), 5);
        assert!(!health.is_depleted());
        assert_eq!(health.apply_damage(5), 0);
        assert!(health.is_depleted());
    }

    #[test]
    fn test_health_ratio_never_negative() {
        let mut health = Health::new(25);
        health.apply_damage(24);
        assert_eq!(health.current(), 1);

        health.apply_damage(3);
        assert_eq!(health.current(), -2);
        assert_relative_eq!(health.ratio(), 0.0);
    }

    #[test]
    fn test_health_restore() {
        let mut health = Health::new(8);
        health.apply_damage(10);
        health.restore();
        assert_eq!(health.current(), 8);
        assert_relative_eq!(health.ratio(), 1.0);
    }
}

// Combat resolution between the two fighters

use log::debug;

use super::characters::{Adventurer, Combatant, Demon, HitOutcome};

/// Damage dealt by one Demon strike
pub const DEMON_STRIKE_DAMAGE: i32 = 1;

/// Land the Adventurer's current swing on the Demon, at most once per swing.
///
/// The swing connects on the first tick the two bodies overlap while the
/// attack is running and no hit has been registered for it yet.
pub fn resolve_adventurer_attack(
    adventurer: &mut Adventurer,
    demon: &mut Demon,
    now_ms: u64,
) -> Option<HitOutcome> {
    if !adventurer.is_attacking() || adventurer.hit_registered() || !demon.is_alive() {
        return None;
    }
    if !adventurer.bounds().overlaps(&demon.bounds()) {
        return None;
    }

    adventurer.register_hit();
    let outcome = demon.take_hit(adventurer.attack_damage(), now_ms);
    debug!(
        "{} hits {} with {:?} for {} ({} left)",
        adventurer.name(),
        demon.name(),
        adventurer.action(),
        outcome.damage,
        outcome.remaining
    );
    Some(outcome)
}

/// Land the Demon's strike on the Adventurer if the strike frame was just
/// entered and the strike box reaches the Adventurer's body.
pub fn resolve_demon_strike(
    demon: &Demon,
    adventurer: &mut Adventurer,
    now_ms: u64,
) -> Option<HitOutcome> {
    if !demon.is_striking() || !adventurer.is_alive() {
        return None;
    }
    if !demon.strike_box().overlaps(&adventurer.bounds()) {
        return None;
    }

    let outcome = adventurer.take_hit(DEMON_STRIKE_DAMAGE, now_ms);
    debug!(
        "{} strikes {} for {} ({} left)",
        demon.name(),
        adventurer.name(),
        outcome.damage,
        outcome.remaining
    );
    Some(outcome)
}

// Round controller: owns both fighters and runs one gameplay tick at a time

use log::info;

use crate::core::Rect;

use super::ai::DemonAi;
use super::audio::{AudioCue, CueLatches};
use super::characters::{
    Adventurer, Combatant, Demon, EnemyAction, FrameCounts, MoveInput, ADVENTURER_STATS,
    DEMON_STATS,
};
use super::combat::{resolve_adventurer_attack, resolve_demon_strike};
use super::config::{ArenaConfig, GAME_OVER_HOLD_MS};
use super::hud::HealthBar;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AdventurerDied,
    DemonDefeated,
}

impl Outcome {
    /// Text shown while waiting for the restart choice
    pub fn message(self) -> &'static str {
        match self {
            Outcome::AdventurerDied => "Adventurer Died! Press 1 to Restart or 2 to Quit.",
            Outcome::DemonDefeated => "Demon Defeated! Press 1 to Restart or 2 to Quit.",
        }
    }

    fn cue(self) -> AudioCue {
        match self {
            Outcome::AdventurerDied => AudioCue::PlayerDefeat,
            Outcome::DemonDefeated => AudioCue::Victory,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Both fighters alive
    Playing,
    /// The Adventurer is dead and its death animation is still playing
    AdventurerDefeated,
    /// The Demon is dead and its death animation is still playing
    DemonDefeated,
    /// Gameplay frozen, message shown, waiting for restart or quit
    AwaitingRestartChoice(Outcome),
}

/// Controls sampled for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
    pub restart: bool,
    pub quit: bool,
}

/// What happened during a tick that the host has to act on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub cues: Vec<AudioCue>,
    pub restarted: bool,
    pub quit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    adventurer: Adventurer,
    demon: Demon,
    ai: DemonAi,
    arena: ArenaConfig,
    phase: Phase,
    game_over_since_ms: u64,
    latches: CueLatches,
}

impl MatchState {
    pub fn new(adventurer: Adventurer, demon: Demon, arena: ArenaConfig) -> Self {
        Self {
            adventurer,
            demon,
            ai: DemonAi::default(),
            arena,
            phase: Phase::Playing,
            game_over_since_ms: 0,
            latches: CueLatches::default(),
        }
    }

    /// A match with the shipped frame counts and body sizes, no textures needed
    pub fn standard(arena: ArenaConfig, now_ms: u64) -> Self {
        let adventurer = Adventurer::new(
            ADVENTURER_STATS,
            FrameCounts::standard(),
            ADVENTURER_STATS.default_body,
            &arena,
            now_ms,
        );
        let demon = Demon::new(
            DEMON_STATS,
            FrameCounts::standard(),
            DEMON_STATS.default_body,
            &arena,
            now_ms,
        );
        Self::new(adventurer, demon, arena)
    }

    pub fn adventurer(&self) -> &Adventurer {
        &self.adventurer
    }

    pub fn demon(&self) -> &Demon {
        &self.demon
    }

    pub fn arena(&self) -> &ArenaConfig {
        &self.arena
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The round result once the game-over message is up
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::AwaitingRestartChoice(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Whether restart/quit input is taken at `now_ms`
    pub fn accepts_choice(&self, now_ms: u64) -> bool {
        self.outcome().is_some()
            && now_ms.saturating_sub(self.game_over_since_ms) >= GAME_OVER_HOLD_MS
    }

    /// Adventurer and Demon health bars
    pub fn health_bars(&self) -> (HealthBar, HealthBar) {
        (
            HealthBar::adventurer(self.adventurer.health()),
            HealthBar::demon(self.demon.health(), &self.arena),
        )
    }

    /// Boxes drawn by the hitbox overlay
    pub fn debug_hitboxes(&self) -> Vec<Rect> {
        let mut boxes = vec![self.adventurer.bounds(), self.demon.body_hitbox()];
        if self.adventurer.is_attacking() {
            boxes.push(self.adventurer.attack_hitbox());
        }
        if self.demon.action() == EnemyAction::Attack {
            boxes.push(self.demon.strike_box());
        }
        boxes
    }

    /// Run one gameplay tick.
    ///
    /// Order: input, Adventurer physics and animation, attack timeout, Demon AI
    /// and animation, combat, game-over check. Once the round is over only
    /// the restart/quit choice is polled.
    pub fn tick(&mut self, input: &TickInput, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        self.emit(&mut report, AudioCue::BackgroundMusic);

        if self.outcome().is_some() {
            if self.accepts_choice(now_ms) {
                if input.restart {
                    self.restart(now_ms);
                    report.restarted = true;
                } else if input.quit {
                    info!("Quit chosen after the round");
                    report.quit = true;
                }
            }
            return report;
        }

        if self.adventurer.is_alive() {
            if input.jump {
                self.adventurer.request_jump();
            }
            if input.attack && self.adventurer.start_attack(now_ms) {
                self.emit(&mut report, AudioCue::PlayerAttack);
            }
            let movement = MoveInput {
                left: input.move_left,
                right: input.move_right,
            };
            self.adventurer.update_movement(movement, &self.arena, now_ms);
        }
        self.adventurer.advance_animation(now_ms);
        self.adventurer.expire_attack(now_ms);

        self.ai.update(
            &mut self.demon,
            self.adventurer.bounds(),
            self.adventurer.is_alive(),
            &self.arena,
            now_ms,
        );
        self.demon.advance_animation(now_ms);
        if self.demon.is_striking() {
            self.emit(&mut report, AudioCue::EnemyAttack);
        }

        // The Demon's strike lands first; a slain Adventurer does not swing back
        if let Some(hit) = resolve_demon_strike(&self.demon, &mut self.adventurer, now_ms) {
            if hit.killed {
                info!("{} slain", self.adventurer.name());
            }
        }
        if self.adventurer.is_alive() {
            if let Some(hit) = resolve_adventurer_attack(&mut self.adventurer, &mut self.demon, now_ms)
            {
                if hit.killed {
                    info!("{} slain", self.demon.name());
                    self.emit(&mut report, AudioCue::EnemyDeath);
                }
            }
        }

        self.check_game_over(now_ms, &mut report);
        report
    }

    fn check_game_over(&mut self, now_ms: u64, report: &mut TickReport) {
        if self.phase == Phase::Playing {
            if !self.adventurer.is_alive() {
                self.phase = Phase::AdventurerDefeated;
            } else if !self.demon.is_alive() {
                self.phase = Phase::DemonDefeated;
            }
        }

        let outcome = match self.phase {
            Phase::AdventurerDefeated if self.adventurer.death_animation_complete() => {
                Outcome::AdventurerDied
            }
            Phase::DemonDefeated if self.demon.death_animation_complete() => Outcome::DemonDefeated,
            _ => return,
        };

        info!("Round over: {}", outcome.message());
        self.phase = Phase::AwaitingRestartChoice(outcome);
        self.game_over_since_ms = now_ms;
        self.emit(report, outcome.cue());
    }

    /// Put both fighters back at their starting state and resume play
    pub fn restart(&mut self, now_ms: u64) {
        self.adventurer.reset(now_ms);
        self.demon.reset(now_ms);
        self.phase = Phase::Playing;
        self.game_over_since_ms = 0;
        self.latches.reset_round();
        info!("Round restarted");
    }

    fn emit(&mut self, report: &mut TickReport, cue: AudioCue) {
        if let Some(cue) = self.latches.fire(cue) {
            report.cues.push(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::PlayerAction;
    use crate::game::config::{ANIMATION_CADENCE_MS, ARENA, ENEMY_STRIKE_FRAME, TICK_RATE};

    fn tick_ms(tick: u64) -> u64 {
        tick * 1000 / TICK_RATE as u64
    }

    /// Run idle ticks from `start` until `done` holds, returning the next tick
    fn run_until(
        state: &mut MatchState,
        start: u64,
        input: TickInput,
        cues: &mut Vec<AudioCue>,
        done: impl Fn(&MatchState) -> bool,
    ) -> u64 {
        let mut tick = start;
        while !done(state) {
            assert!(tick < start + 5000, "condition never reached");
            let report = state.tick(&input, tick_ms(tick));
            cues.extend(report.cues);
            tick += 1;
        }
        tick
    }

    /// Deterministic pseudo-random inputs
    struct Lcg(u64);

    impl Lcg {
        fn next_input(&mut self) -> TickInput {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let bits = self.0 >> 33;
            TickInput {
                move_left: bits & 1 != 0,
                move_right: bits & 2 != 0,
                jump: bits & 0x1c == 0,
                attack: bits & 8 != 0,
                restart: bits & 0x60 == 0x60,
                quit: false,
            }
        }
    }

    #[test]
    fn test_starts_playing_with_music() {
        let mut state = MatchState::standard(ARENA, 0);
        assert_eq!(state.phase(), Phase::Playing);

        let first = state.tick(&TickInput::default(), tick_ms(1));
        assert_eq!(first.cues, vec![AudioCue::BackgroundMusic]);
        let second = state.tick(&TickInput::default(), tick_ms(2));
        assert!(second.cues.is_empty());
    }

    #[test]
    fn test_frame_index_always_in_bounds() {
        let mut state = MatchState::standard(ARENA, 0);
        let mut rng = Lcg(7);
        let mut restarts = 0;

        for tick in 1..20_000 {
            let report = state.tick(&rng.next_input(), tick_ms(tick));
            restarts += report.restarted as u32;

            let a = state.adventurer();
            let d = state.demon();
            assert!(a.frame_index() < a.frame_count(), "{:?} at tick {}", a.action(), tick);
            assert!(d.frame_index() < d.frame_count(), "{:?} at tick {}", d.action(), tick);
            assert!(a.bounds().bottom() <= ARENA.floor_y);
            assert!(a.bounds().left() >= ARENA.min_x && a.bounds().right() <= ARENA.max_x);
        }
        assert!(restarts > 0);
    }

    #[test]
    fn test_idle_adventurer_is_defeated() {
        let mut state = MatchState::standard(ARENA, 0);
        let mut cues = Vec::new();

        let tick = run_until(&mut state, 1, TickInput::default(), &mut cues, |s| {
            s.phase() != Phase::Playing
        });
        assert_eq!(state.phase(), Phase::AdventurerDefeated);
        assert!(state.adventurer().health().current() <= 0);
        assert_eq!(
            cues.iter().filter(|&&c| c == AudioCue::EnemyAttack).count(),
            ADVENTURER_STATS.max_health as usize
        );

        run_until(&mut state, tick, TickInput::default(), &mut cues, |s| {
            s.outcome().is_some()
        });
        assert_eq!(state.outcome(), Some(Outcome::AdventurerDied));
        assert_eq!(state.adventurer().action(), PlayerAction::Death);
        assert_eq!(cues.iter().filter(|&&c| c == AudioCue::PlayerDefeat).count(), 1);
    }

    #[test]
    fn test_demon_defeated_by_finishing_blow() {
        let mut state = MatchState::standard(ARENA, 0);
        state.demon.take_hit(24, 0);
        let x = state.demon.bounds().left() - 50;
        state.adventurer.set_position(x, state.adventurer.bounds().y);

        let attack = TickInput {
            attack: true,
            ..TickInput::default()
        };
        let report = state.tick(&attack, tick_ms(1));
        assert!(report.cues.contains(&AudioCue::PlayerAttack));
        assert!(report.cues.contains(&AudioCue::EnemyDeath));
        assert_eq!(state.phase(), Phase::DemonDefeated);
        assert_eq!(state.demon().action(), EnemyAction::Death);

        let mut cues = Vec::new();
        run_until(&mut state, 2, TickInput::default(), &mut cues, |s| {
            s.outcome().is_some()
        });
        assert_eq!(state.outcome(), Some(Outcome::DemonDefeated));
        assert_eq!(state.demon().frame_index(), state.demon().frame_count() - 1);
        assert!(cues.contains(&AudioCue::Victory));
        assert!(!cues.contains(&AudioCue::EnemyDeath));
    }

    #[test]
    fn test_simultaneous_kill_goes_to_demon() {
        let mut state = MatchState::standard(ARENA, 0);
        state.adventurer.take_hit(ADVENTURER_STATS.max_health - 1, 0);
        state.demon.take_hit(DEMON_STATS.max_health - 1, 0);

        // Demon one frame before its strike, Adventurer inside the strike box
        state.demon.start_attack(0);
        for step in 1..ENEMY_STRIKE_FRAME as u64 {
            state.demon.advance_animation(step * ANIMATION_CADENCE_MS);
        }
        assert_eq!(state.demon().frame_index(), ENEMY_STRIKE_FRAME - 1);
        let y = state.adventurer.bounds().y;
        state.adventurer.set_position(660, y);
        assert!(state.demon().strike_box().overlaps(&state.adventurer().bounds()));
        assert!(state.demon().bounds().overlaps(&state.adventurer().bounds()));

        let attack = TickInput {
            attack: true,
            ..TickInput::default()
        };
        let report = state.tick(&attack, ENEMY_STRIKE_FRAME as u64 * ANIMATION_CADENCE_MS);

        assert!(!state.adventurer().is_alive());
        assert!(state.demon().is_alive());
        assert_eq!(state.demon().health().current(), 1);
        assert_eq!(state.phase(), Phase::AdventurerDefeated);
        assert!(report.cues.contains(&AudioCue::EnemyAttack));
        assert!(!report.cues.contains(&AudioCue::EnemyDeath));
    }

    fn finished_round() -> (MatchState, u64) {
        let mut state = MatchState::standard(ARENA, 0);
        let mut cues = Vec::new();
        let tick = run_until(&mut state, 1, TickInput::default(), &mut cues, |s| {
            s.outcome().is_some()
        });
        (state, tick)
    }

    #[test]
    fn test_choice_held_back_one_second() {
        let (mut state, tick) = finished_round();
        let shown_at = tick_ms(tick - 1);
        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };

        let report = state.tick(&restart, shown_at + GAME_OVER_HOLD_MS - 1);
        assert!(!report.restarted);
        assert!(state.outcome().is_some());

        let report = state.tick(&restart, shown_at + GAME_OVER_HOLD_MS);
        assert!(report.restarted);
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_frozen_while_awaiting_choice() {
        let (mut state, tick) = finished_round();
        let before = state.clone();
        let input = TickInput {
            move_right: true,
            attack: true,
            jump: true,
            ..TickInput::default()
        };

        for t in tick..tick + 300 {
            let report = state.tick(&input, tick_ms(t));
            assert!(report.cues.is_empty());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_quit_after_round() {
        let (mut state, tick) = finished_round();
        let later = tick_ms(tick) + GAME_OVER_HOLD_MS;

        let both = TickInput {
            restart: true,
            quit: true,
            ..TickInput::default()
        };
        let report = state.tick(&both, later);
        assert!(report.restarted);
        assert!(!report.quit);

        let (mut state, tick) = finished_round();
        let quit = TickInput {
            quit: true,
            ..TickInput::default()
        };
        let report = state.tick(&quit, tick_ms(tick) + GAME_OVER_HOLD_MS);
        assert!(report.quit);
        assert!(state.outcome().is_some());
    }

    #[test]
    fn test_quit_ignored_while_playing() {
        let mut state = MatchState::standard(ARENA, 0);
        let quit = TickInput {
            quit: true,
            ..TickInput::default()
        };
        assert!(!state.tick(&quit, tick_ms(1)).quit);
    }

    #[test]
    fn test_restart_matches_construction() {
        let (mut state, tick) = finished_round();
        let now = tick_ms(tick) + GAME_OVER_HOLD_MS;
        state.restart(now);

        let fresh = MatchState::standard(ARENA, now);
        assert_eq!(state.adventurer(), fresh.adventurer());
        assert_eq!(state.demon(), fresh.demon());
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.adventurer().health().current(), 8);
        assert_eq!(state.demon().health().current(), 25);
    }

    #[test]
    fn test_round_cues_replay_after_restart() {
        let (mut state, tick) = finished_round();
        state.restart(tick_ms(tick));

        let mut cues = Vec::new();
        run_until(&mut state, tick + 1, TickInput::default(), &mut cues, |s| {
            s.outcome().is_some()
        });
        assert_eq!(cues.iter().filter(|&&c| c == AudioCue::PlayerDefeat).count(), 1);
        assert!(!cues.contains(&AudioCue::BackgroundMusic));
    }

    #[test]
    fn test_health_bars_follow_damage() {
        let mut state = MatchState::standard(ARENA, 0);
        state.demon.take_hit(30, 0);
        let (left, right) = state.health_bars();
        assert_eq!(left.fill.width, left.background.width);
        assert_eq!(right.fill.width, 0);
    }

    #[test]
    fn test_debug_hitboxes_include_swings() {
        let mut state = MatchState::standard(ARENA, 0);
        assert_eq!(state.debug_hitboxes().len(), 2);

        state.adventurer.start_attack(0);
        state.demon.start_attack(0);
        assert_eq!(state.debug_hitboxes().len(), 4);
    }
}

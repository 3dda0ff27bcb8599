// Character animation system

use std::fmt;
use std::marker::PhantomData;

use log::warn;

use super::state::ActionSet;
use crate::core::Rect;

/// Animation configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnimationError {
    #[error("{character} has no frames for action {action}")]
    EmptyAction {
        character: &'static str,
        action: &'static str,
    },
}

/// Fixed wall-clock cadence for frame advances.
///
/// Steps are scheduled on a fixed grid so that frame timing does not drift
/// with the tick rate; after a long stall the grid is re-anchored instead of
/// replaying every missed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    cadence_ms: u64,
    last_step_ms: u64,
}

impl AnimationClock {
    pub fn new(cadence_ms: u64, now_ms: u64) -> Self {
        Self {
            cadence_ms: cadence_ms.max(1),
            last_step_ms: now_ms,
        }
    }

    /// Start a fresh cadence window at `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        self.last_step_ms = now_ms;
    }

    /// Returns true when a frame step is due at `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_step_ms) < self.cadence_ms {
            return false;
        }

        self.last_step_ms += self.cadence_ms;
        if now_ms - self.last_step_ms >= self.cadence_ms {
            self.last_step_ms = now_ms;
        }
        true
    }
}

/// Per-character table of frames, indexed by action.
///
/// `F` is whatever the frame resolves to: a texture handle for drawing, or
/// `()` when only the frame counts matter.
#[derive(Debug, Clone)]
pub struct AnimationTable<A: ActionSet, F> {
    frames: Vec<Vec<F>>,
    _actions: PhantomData<A>,
}

impl<A: ActionSet, F> AnimationTable<A, F> {
    /// Load every frame of every action through `load_frame`.
    ///
    /// Frames that fail to load are logged and skipped. An action left with no
    /// frames at all is a configuration error.
    pub fn load<E, L>(character: &'static str, mut load_frame: L) -> Result<Self, AnimationError>
    where
        E: fmt::Display,
        L: FnMut(A, usize) -> Result<F, E>,
    {
        let mut frames = Vec::with_capacity(A::ALL.len());

        for &action in A::ALL {
            let mut sequence = Vec::with_capacity(action.frame_count());
            for index in 0..action.frame_count() {
                match load_frame(action, index) {
                    Ok(frame) => sequence.push(frame),
                    Err(e) => warn!(
                        "{}: frame {} of {} unavailable: {}",
                        character,
                        index,
                        action.asset_dir(),
                        e
                    ),
                }
            }

            if sequence.is_empty() {
                return Err(AnimationError::EmptyAction {
                    character,
                    action: action.asset_dir(),
                });
            }
            frames.push(sequence);
        }

        Ok(Self {
            frames,
            _actions: PhantomData,
        })
    }

    /// All frames of an action
    pub fn frames(&self, action: A) -> &[F] {
        &self.frames[action.index()]
    }

    /// A single frame, clamped to the last frame of the action
    pub fn frame(&self, action: A, frame_index: usize) -> &F {
        let frames = self.frames(action);
        // Loading guarantees at least one frame per action
        &frames[frame_index.min(frames.len() - 1)]
    }

    /// Frame counts for the state machine
    pub fn frame_counts(&self) -> FrameCounts<A> {
        FrameCounts {
            counts: self.frames.iter().map(Vec::len).collect(),
            _actions: PhantomData,
        }
    }
}

/// Number of frames available per action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCounts<A: ActionSet> {
    counts: Vec<usize>,
    _actions: PhantomData<A>,
}

impl<A: ActionSet> FrameCounts<A> {
    /// Counts matching the frames shipped with the game
    pub fn standard() -> Self {
        Self {
            counts: A::ALL.iter().map(|action| action.frame_count()).collect(),
            _actions: PhantomData,
        }
    }

    pub fn get(&self, action: A) -> usize {
        self.counts[action.index()]
    }

    /// Index of the final frame of an action
    pub fn last_index(&self, action: A) -> usize {
        self.get(action).saturating_sub(1)
    }
}

/// Data needed to render the current animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame<A> {
    pub action: A,
    pub frame_index: usize,
    pub flip_horizontal: bool,
    pub bounds: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::state::{EnemyAction, PlayerAction};

    #[test]
    fn test_clock_waits_for_cadence() {
        let mut clock = AnimationClock::new(100, 0);
        assert!(!clock.tick(50));
        assert!(!clock.tick(99));
        assert!(clock.tick(100));
        assert!(!clock.tick(150));
        assert!(clock.tick(200));
    }

    #[test]
    fn test_clock_does_not_drift_with_tick_rate() {
        let mut clock = AnimationClock::new(100, 0);
        let steps = (0..=1000u64)
            .step_by(16)
            .filter(|&now| clock.tick(now))
            .count();
        // 1000 / 16 ticks over ~992ms of wall time
        assert_eq!(steps, 9);
    }

    #[test]
    fn test_clock_reanchors_after_stall() {
        let mut clock = AnimationClock::new(100, 0);
        assert!(clock.tick(1000));
        // Only one step per tick, and the grid restarts at the stall
        assert!(!clock.tick(1050));
        assert!(clock.tick(1100));
    }

    #[test]
    fn test_clock_restart() {
        let mut clock = AnimationClock::new(100, 0);
        clock.restart(90);
        assert!(!clock.tick(100));
        assert!(clock.tick(190));
    }

    #[test]
    fn test_table_load_all_frames() {
        let table: AnimationTable<EnemyAction, (EnemyAction, usize)> =
            AnimationTable::load("Enemy", |action, i| Ok::<_, String>((action, i))).unwrap();

        assert_eq!(table.frames(EnemyAction::Attack).len(), 15);
        assert_eq!(*table.frame(EnemyAction::Move, 3), (EnemyAction::Move, 3));
        assert_eq!(table.frame_counts(), FrameCounts::standard());
    }

    #[test]
    fn test_table_skips_missing_frames() {
        let table: AnimationTable<PlayerAction, usize> =
            AnimationTable::load("Player", |action, i| {
                if action == PlayerAction::Death && i >= 3 {
                    Err("missing")
                } else {
                    Ok(i)
                }
            })
            .unwrap();

        assert_eq!(table.frame_counts().get(PlayerAction::Death), 3);
        assert_eq!(table.frame_counts().get(PlayerAction::Idle), 4);
    }

    #[test]
    fn test_table_rejects_empty_action() {
        let result: Result<AnimationTable<PlayerAction, ()>, _> =
            AnimationTable::load("Player", |action, _| {
                if action == PlayerAction::Hurt {
                    Err("missing")
                } else {
                    Ok(())
                }
            });

        assert_eq!(
            result.unwrap_err(),
            AnimationError::EmptyAction {
                character: "Player",
                action: "hurt",
            }
        );
    }

    #[test]
    fn test_frame_lookup_clamps() {
        let table: AnimationTable<PlayerAction, usize> =
            AnimationTable::load("Player", |_, i| Ok::<_, String>(i)).unwrap();
        assert_eq!(*table.frame(PlayerAction::Fall, 9), 1);
    }

    #[test]
    fn test_frame_counts_last_index() {
        let counts = FrameCounts::<EnemyAction>::standard();
        assert_eq!(counts.get(EnemyAction::Death), 22);
        assert_eq!(counts.last_index(EnemyAction::Death), 21);
    }

    #[test]
    fn test_error_display() {
        let err = AnimationError::EmptyAction {
            character: "Enemy",
            action: "attack",
        };
        assert_eq!(err.to_string(), "Enemy has no frames for action attack");
    }
}

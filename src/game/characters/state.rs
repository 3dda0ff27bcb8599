// Character actions: the closed set of animation/behaviour states per variant

use std::fmt;

/// Direction a character is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Horizontal sign of the facing direction (-1 or 1)
    pub fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// Facing that points from `from_x` toward `to_x`, or `None` when they coincide
    pub fn toward(from_x: i32, to_x: i32) -> Option<Self> {
        match to_x.cmp(&from_x) {
            std::cmp::Ordering::Greater => Some(Self::Right),
            std::cmp::Ordering::Less => Some(Self::Left),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A closed set of actions that indexes an animation table.
///
/// `ALL` must list every variant in `index()` order so tables can be stored as
/// plain vectors and still be exhaustive over the enum.
pub trait ActionSet: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Dense index of this action in `0..ALL.len()`
    fn index(self) -> usize;

    /// Directory holding this action's numbered frames
    fn asset_dir(self) -> &'static str;

    /// Number of frames shipped for this action
    fn frame_count(self) -> usize;
}

/// Actions available to the player-controlled Adventurer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerAction {
    #[default]
    Idle,
    Move,
    Jump,
    Fall,
    AirAttack,
    Attack1,
    Attack2,
    Attack3,
    Hurt,
    Death,
}

impl PlayerAction {
    /// Grounded attack for a combo stage (0, 1, 2; wraps)
    pub fn grounded_attack(combo_stage: u8) -> Self {
        match combo_stage % 3 {
            0 => Self::Attack1,
            1 => Self::Attack2,
            _ => Self::Attack3,
        }
    }
}

impl ActionSet for PlayerAction {
    const ALL: &'static [Self] = &[
        Self::Idle,
        Self::Move,
        Self::Jump,
        Self::Fall,
        Self::AirAttack,
        Self::Attack1,
        Self::Attack2,
        Self::Attack3,
        Self::Hurt,
        Self::Death,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn asset_dir(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Move => "move",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::AirAttack => "air-attack",
            Self::Attack1 => "attack1",
            Self::Attack2 => "attack2",
            Self::Attack3 => "attack3",
            Self::Hurt => "hurt",
            Self::Death => "death",
        }
    }

    fn frame_count(self) -> usize {
        match self {
            Self::Idle => 4,
            Self::Move => 6,
            Self::Jump => 4,
            Self::Fall => 2,
            Self::AirAttack => 4,
            Self::Attack1 => 5,
            Self::Attack2 => 6,
            Self::Attack3 => 6,
            Self::Hurt => 3,
            Self::Death => 7,
        }
    }
}

/// Actions available to the AI-controlled Demon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyAction {
    #[default]
    Idle,
    Move,
    Attack,
    Hurt,
    Death,
}

impl ActionSet for EnemyAction {
    const ALL: &'static [Self] = &[
        Self::Idle,
        Self::Move,
        Self::Attack,
        Self::Hurt,
        Self::Death,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn asset_dir(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Move => "move",
            Self::Attack => "attack",
            Self::Hurt => "hurt",
            Self::Death => "death",
        }
    }

    fn frame_count(self) -> usize {
        match self {
            Self::Idle => 6,
            Self::Move => 11,
            Self::Attack => 15,
            Self::Hurt => 5,
            Self::Death => 22,
        }
    }
}

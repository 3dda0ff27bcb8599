// Game layer: fighters, AI, combat and the round controller

pub mod ai;
pub mod audio;
pub mod characters;
pub mod combat;
pub mod config;
pub mod hud;
pub mod match_state;
pub mod sprites;

pub use audio::{AudioSink, LogAudioSink};
pub use config::GameConfig;
pub use match_state::{MatchState, Outcome, TickInput};
pub use sprites::CharacterSprites;

// Audio cues emitted by the match and the sinks that consume them

use log::debug;

/// A sound the match wants played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Looping track, started once
    BackgroundMusic,
    PlayerAttack,
    /// The Demon's swing reached its active frame
    EnemyAttack,
    EnemyDeath,
    PlayerDefeat,
    Victory,
}

impl AudioCue {
    /// Sound file under the asset root
    pub fn asset_path(self) -> &'static str {
        match self {
            AudioCue::BackgroundMusic => "Audio/music.ogg",
            AudioCue::PlayerAttack => "Audio/player_attack.wav",
            AudioCue::EnemyAttack => "Audio/enemy_attack.wav",
            AudioCue::EnemyDeath => "Audio/enemy_death.wav",
            AudioCue::PlayerDefeat => "Audio/defeat.wav",
            AudioCue::Victory => "Audio/victory.wav",
        }
    }

    pub fn is_looping(self) -> bool {
        self == AudioCue::BackgroundMusic
    }
}

/// Latches for cues that must play once per triggering event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueLatches {
    music_started: bool,
    enemy_death: bool,
    round_result: bool,
}

impl CueLatches {
    /// Emit `cue` unless its latch is already set, then set it.
    ///
    /// Cues without a latch always pass.
    pub fn fire(&mut self, cue: AudioCue) -> Option<AudioCue> {
        let latch = match cue {
            AudioCue::BackgroundMusic => &mut self.music_started,
            AudioCue::EnemyDeath => &mut self.enemy_death,
            AudioCue::PlayerDefeat | AudioCue::Victory => &mut self.round_result,
            AudioCue::PlayerAttack | AudioCue::EnemyAttack => return Some(cue),
        };
        if *latch {
            return None;
        }
        *latch = true;
        Some(cue)
    }

    /// Clear the per-round latches; the music keeps playing across rounds
    pub fn reset_round(&mut self) {
        self.enemy_death = false;
        self.round_result = false;
    }
}

/// Something that can play cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);

    fn play_all(&mut self, cues: &[AudioCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }
}

/// Sink that records cues in the log instead of playing them
#[derive(Debug, Default)]
pub struct LogAudioSink {
    played: usize,
}

impl LogAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cues received so far
    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioSink for LogAudioSink {
    fn play(&mut self, cue: AudioCue) {
        self.played += 1;
        debug!(
            "audio cue {:?} ({}{})",
            cue,
            cue.asset_path(),
            if cue.is_looping() { ", looping" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latched_cues_fire_once() {
        let mut latches = CueLatches::default();
        assert_eq!(latches.fire(AudioCue::EnemyDeath), Some(AudioCue::EnemyDeath));
        assert_eq!(latches.fire(AudioCue::EnemyDeath), None);

        assert_eq!(latches.fire(AudioCue::Victory), Some(AudioCue::Victory));
        assert_eq!(latches.fire(AudioCue::PlayerDefeat), None);
    }

    #[test]
    fn test_attack_cues_unlatched() {
        let mut latches = CueLatches::default();
        for _ in 0..3 {
            assert_eq!(latches.fire(AudioCue::PlayerAttack), Some(AudioCue::PlayerAttack));
        }
    }

    #[test]
    fn test_round_reset_keeps_music_latch() {
        let mut latches = CueLatches::default();
        latches.fire(AudioCue::BackgroundMusic);
        latches.fire(AudioCue::EnemyDeath);
        latches.reset_round();

        assert_eq!(latches.fire(AudioCue::BackgroundMusic), None);
        assert_eq!(latches.fire(AudioCue::EnemyDeath), Some(AudioCue::EnemyDeath));
    }

    #[test]
    fn test_log_sink_counts() {
        let mut sink = LogAudioSink::new();
        sink.play_all(&[AudioCue::PlayerAttack, AudioCue::EnemyAttack]);
        assert_eq!(sink.played(), 2);
    }

    #[test]
    fn test_only_music_loops() {
        assert!(AudioCue::BackgroundMusic.is_looping());
        assert!(!AudioCue::Victory.is_looping());
    }
}

//! Sound cue plumbing
//!
//! The simulation never waits on audio. Cues are derived from the tick's
//! events and handed to whatever sink the host provides; with no sink, or while
//! muted, they are simply dropped.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player fired
    PlayerShot,
    /// Player ship destroyed
    PlayerExplosion,
    /// A formation unit was hit
    AlienExplosion,
}

impl SoundCue {
    /// The cue a simulation event triggers, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerShot => Some(SoundCue::PlayerShot),
            GameEvent::PlayerExploded => Some(SoundCue::PlayerExplosion),
            GameEvent::AlienKilled { .. } => Some(SoundCue::AlienExplosion),
            GameEvent::GameStarted { .. }
            | GameEvent::PlayerHit { .. }
            | GameEvent::AliensHidden { .. } => None,
        }
    }
}

/// Playback backend. Implementations must not block.
pub trait CueSink {
    fn trigger(&mut self, cue: SoundCue, volume: f32);
}

/// Sink that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn trigger(&mut self, cue: SoundCue, volume: f32) {
        log::trace!("cue {:?} at volume {:.2}", cue, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn CueSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Cues that reached the sink
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(sink: Option<Box<dyn CueSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio sink available - audio disabled");
        }
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    /// Number of cues handed to the sink so far
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Fire a cue; dropped when muted or when there is no sink
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else { return };
        sink.trigger(cue, vol);
        self.played += 1;
    }

    /// Fire the cues for a tick's events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<(SoundCue, f32)>>>);

    impl CueSink for Recorder {
        fn trigger(&mut self, cue: SoundCue, volume: f32) {
            self.0.borrow_mut().push((cue, volume));
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Some(Box::new(Recorder(log.clone()))));
        audio.set_master_volume(1.0);
        audio.play_events(&[
            GameEvent::GameStarted { game: 1 },
            GameEvent::PlayerShot,
            GameEvent::AlienKilled {
                row: 0,
                col: 0,
                points: 40,
            },
            GameEvent::PlayerHit { lives: 2 },
            GameEvent::PlayerExploded,
        ]);
        let cues: Vec<_> = log.borrow().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            cues,
            vec![
                SoundCue::PlayerShot,
                SoundCue::AlienExplosion,
                SoundCue::PlayerExplosion
            ]
        );
        assert_eq!(audio.played(), 3);
    }

    #[test]
    fn test_muted_and_missing_sink_drop_cues() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Some(Box::new(Recorder(log.clone()))));
        audio.set_muted(true);
        audio.play(SoundCue::PlayerShot);
        assert!(log.borrow().is_empty());

        audio.set_muted(false);
        audio.set_sfx_volume(0.5);
        audio.play(SoundCue::PlayerShot);
        assert_eq!(log.borrow().len(), 1);
        assert!((log.borrow()[0].1 - 0.4).abs() < 1e-6);
        // Muted cues are not counted
        assert_eq!(audio.played(), 1);

        let mut silent = AudioManager::default();
        assert!(!silent.is_available());
        silent.play(SoundCue::AlienExplosion);
        assert_eq!(silent.played(), 0);
    }
}

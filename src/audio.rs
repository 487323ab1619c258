//! Sound cues
//!
//! The simulation only names cues; actual playback belongs to whatever
//! sits behind a [`CueSink`]. Sinks must be fire-and-forget: a tick never
//! waits on audio, and a sink that cannot play simply drops the cue.

use serde::{Deserialize, Serialize};

use crate::settings::AudioSettings;

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Projectile fired
    Fired,
    /// Enemy hit but still alive
    Hit,
    /// Enemy defeated
    Defeated,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Fired => "fired",
            SoundCue::Hit => "hit",
            SoundCue::Defeated => "defeated",
        }
    }

    /// Conventional asset name for a playback backend
    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::Fired => "missileSound.wav",
            SoundCue::Hit => "enemyHit.wav",
            SoundCue::Defeated => "enemyKilled.wav",
        }
    }
}

/// Non-blocking destination for sound cues
pub trait CueSink {
    fn play(&self, cue: SoundCue);
}

impl<F: Fn(SoundCue)> CueSink for F {
    fn play(&self, cue: SoundCue) {
        self(cue)
    }
}

/// Sink that discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CueSink for NullSink {
    fn play(&self, _cue: SoundCue) {}
}

/// Audio manager for the game
///
/// Applies mute and volume settings, then hands the cue to the log under
/// the `audio` target where a playback backend (or a human) can pick it up.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&AudioSettings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &AudioSettings) -> Self {
        let manager = Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        };
        if manager.effective_volume() <= 0.0 {
            log::warn!("Audio is silent (muted or zero volume) - cues will be dropped");
        }
        manager
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
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl CueSink for AudioManager {
    fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!(target: "audio", "play {} ({}) at {:.2}", cue.as_str(), cue.asset(), vol);
    }
}

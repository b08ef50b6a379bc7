//! The audio session: one per run, locked until the user opts in.
//!
//! Until [`AudioSession::unlock`] succeeds, nothing reaches the device: tone
//! requests are dropped rather than queued, and music stays paused.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use derive_more::Display;
use tracing::instrument;

use crate::effects::Effect;
use crate::error::Result;
use crate::output::{AudioDevice, MusicTrack, OutputGraph};
use crate::tone::Tone;
use crate::volume::Volume;

/// The user-facing switches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub sfx: bool,
    pub music: bool,
    /// Background visuals. The session only keeps the flag.
    pub visuals: bool,
    pub volume: Volume,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            sfx: true,
            music: true,
            visuals: true,
            volume: Volume::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    #[display("locked")]
    Locked,
    #[display("unlocked")]
    Unlocked,
}

pub struct AudioSession<D> {
    device: D,
    music_source: Option<PathBuf>,
    controls: Mutex<Controls>,
    /// `None` while locked. Held across opening so only one graph is ever made.
    graph: Mutex<Option<Box<dyn OutputGraph>>>,
    music: Mutex<Option<Box<dyn MusicTrack>>>,
}

impl<D: AudioDevice> AudioSession<D> {
    pub fn new(device: D, controls: Controls) -> Self {
        Self {
            device,
            music_source: None,
            controls: Mutex::new(controls),
            graph: Mutex::new(None),
            music: Mutex::new(None),
        }
    }

    /// Loop this file as background music.
    pub fn with_music(mut self, source: impl Into<PathBuf>) -> Self {
        self.music_source = Some(source.into());
        self
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn state(&self) -> SessionState {
        match lock(&self.graph).is_some() {
            true => SessionState::Unlocked,
            false => SessionState::Locked,
        }
    }

    pub fn controls(&self) -> Controls {
        *lock(&self.controls)
    }

    /// Opens the output graph, then brings music in line with the controls.
    ///
    /// Only the first successful call opens anything; later and concurrent
    /// calls return `Ok` without touching the device. On failure the session
    /// stays locked and unlocking may be tried again.
    #[instrument(skip(self))]
    pub fn unlock(&self) -> Result<()> {
        {
            let mut slot = lock(&self.graph);
            if slot.is_some() {
                return Ok(());
            }
            let mut graph = self.device.open_graph()?;
            graph.set_master_gain(self.controls().volume.get());
            *slot = Some(graph);
        }
        tracing::info!("Audio unlocked");
        self.sync();
        Ok(())
    }

    /// Unlock and acknowledge with a click; the hub's "enter" action.
    pub fn enter(&self) -> Result<()> {
        self.unlock()?;
        self.play(Effect::Click);
        Ok(())
    }

    /// Pushes the controls to the outputs: master gain, music volume, and
    /// (once unlocked) music playing or stopped at its start.
    pub fn sync(&self) {
        let controls = self.controls();
        let level = controls.volume.get();
        let unlocked = {
            let mut slot = lock(&self.graph);
            if let Some(graph) = slot.as_mut() {
                graph.set_master_gain(level);
            }
            slot.is_some()
        };
        let Some(source) = &self.music_source else {
            return;
        };
        let mut slot = lock(&self.music);
        if slot.is_none() {
            match self.device.open_music(source) {
                Ok(track) => *slot = Some(track),
                Err(err) => {
                    let reason = (*err).to_string();
                    tracing::warn!(%reason, "Background music unavailable");
                    return;
                },
            }
        }
        let Some(track) = slot.as_mut() else {
            return;
        };
        track.set_volume(level);
        if !unlocked {
            return;
        }
        if !controls.music {
            track.stop();
        } else if let Err(err) = track.play() {
            let reason = (*err).to_string();
            tracing::warn!(%reason, "Background music failed to play");
        }
    }

    /// Play a single tone now.
    pub fn beep(&self, tone: &Tone) {
        self.schedule(Duration::ZERO, tone);
    }

    pub fn play(&self, effect: Effect) {
        tracing::trace!(%effect, "Effect");
        for (delay, tone) in effect.tones() {
            self.schedule(delay, &tone);
        }
    }

    /// Returns the new setting. Switching off is acknowledged with a
    /// descending blip; switching on would click, but SFX is still off then.
    pub fn toggle_sfx(&self) -> bool {
        let was_on = self.controls().sfx;
        self.play(if was_on { Effect::ToggleOff } else { Effect::Click });
        self.update(|controls| controls.sfx = !was_on);
        !was_on
    }

    pub fn toggle_music(&self) -> bool {
        self.play(Effect::Click);
        let on = self.update(|controls| {
            controls.music = !controls.music;
            controls.music
        });
        self.sync();
        on
    }

    pub fn toggle_visuals(&self) -> bool {
        self.play(Effect::Click);
        self.update(|controls| {
            controls.visuals = !controls.visuals;
            controls.visuals
        })
    }

    pub fn set_volume(&self, volume: Volume) {
        self.update(|controls| controls.volume = volume);
        self.sync();
    }

    fn schedule(&self, delay: Duration, tone: &Tone) {
        if !self.controls().sfx {
            tracing::trace!("SFX off, tone skipped");
            return;
        }
        let mut slot = lock(&self.graph);
        let Some(graph) = slot.as_mut() else {
            tracing::trace!("Audio locked, tone skipped");
            return;
        };
        if let Err(err) = graph.schedule(tone, delay) {
            let reason = (*err).to_string();
            tracing::debug!(%reason, "Tone dropped");
        }
    }

    fn update<T>(&self, change: impl FnOnce(&mut Controls) -> T) -> T {
        change(&mut lock(&self.controls))
    }
}

/// Nothing is left half-updated under these locks, so a poisoned one is
/// still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

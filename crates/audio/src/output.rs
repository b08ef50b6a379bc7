//! Where sound goes.
//!
//! An [`AudioDevice`] opens two kinds of output: the [`OutputGraph`] that
//! plays synthesized tones through a shared master gain, and a
//! [`MusicTrack`] for looping background music.

use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::tone::Tone;

pub trait AudioDevice: Send + Sync {
    /// Open the tone graph. Fails when there is no usable output.
    fn open_graph(&self) -> Result<Box<dyn OutputGraph>>;

    /// Load a looping music track, paused at its start.
    fn open_music(&self, source: &Path) -> Result<Box<dyn MusicTrack>>;
}

pub trait OutputGraph: Send {
    fn set_master_gain(&mut self, gain: f32);

    /// Play `tone` once, `delay` from now. Returns immediately.
    fn schedule(&mut self, tone: &Tone, delay: Duration) -> Result<()>;
}

pub trait MusicTrack: Send {
    fn set_volume(&mut self, volume: f32);

    fn play(&mut self) -> Result<()>;

    /// Pause and rewind to the start.
    fn stop(&mut self);
}

#[cfg(any(test, feature = "mock"))]
pub use self::recording::{Call, RecordingDevice};

#[cfg(any(test, feature = "mock"))]
mod recording {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    use super::{AudioDevice, MusicTrack, OutputGraph};
    use crate::error::{ErrorKind, Result};
    use crate::tone::Tone;

    /// Something a [`RecordingDevice`] was asked to do.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        OpenGraph,
        MasterGain(f32),
        Schedule { delay: Duration, tone: Tone },
        OpenMusic(PathBuf),
        MusicVolume(f32),
        Play,
        Stop,
    }

    /// Device for tests: makes no sound, remembers everything.
    ///
    /// Clones share one call log, so a test can keep a clone while the
    /// session owns the original.
    #[derive(Debug, Clone)]
    pub struct RecordingDevice {
        calls: Arc<Mutex<Vec<Call>>>,
        available: Arc<AtomicBool>,
        music_available: Arc<AtomicBool>,
    }

    impl Default for RecordingDevice {
        fn default() -> Self {
            Self {
                calls: Arc::default(),
                available: Arc::new(AtomicBool::new(true)),
                music_available: Arc::new(AtomicBool::new(true)),
            }
        }
    }

    impl RecordingDevice {
        pub fn new() -> Self {
            Self::default()
        }

        /// Whether opening the graph succeeds. Shared between clones.
        pub fn set_available(&self, available: bool) {
            self.available.store(available, Ordering::SeqCst);
        }

        /// Whether loading music succeeds. Shared between clones.
        pub fn set_music_available(&self, available: bool) {
            self.music_available.store(available, Ordering::SeqCst);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        /// Tones scheduled so far, in order.
        pub fn scheduled(&self) -> Vec<(Duration, Tone)> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Schedule { delay, tone } => Some((delay, tone)),
                    _ => None,
                })
                .collect()
        }

        /// The most recent music command, if any.
        pub fn last_music_command(&self) -> Option<Call> {
            self.calls().into_iter().rev().find(|call| matches!(call, Call::Play | Call::Stop))
        }

        pub fn clear(&self) {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        }
    }

    impl AudioDevice for RecordingDevice {
        fn open_graph(&self) -> Result<Box<dyn OutputGraph>> {
            if !self.available.load(Ordering::SeqCst) {
                exn::bail!(ErrorKind::Unavailable("no output device".to_string()));
            }
            self.record(Call::OpenGraph);
            Ok(Box::new(Recorder(self.clone())))
        }

        fn open_music(&self, source: &Path) -> Result<Box<dyn MusicTrack>> {
            if !self.music_available.load(Ordering::SeqCst) {
                exn::bail!(ErrorKind::Music(format!("cannot decode {}", source.display())));
            }
            self.record(Call::OpenMusic(source.to_path_buf()));
            Ok(Box::new(Recorder(self.clone())))
        }
    }

    struct Recorder(RecordingDevice);

    impl OutputGraph for Recorder {
        fn set_master_gain(&mut self, gain: f32) {
            self.0.record(Call::MasterGain(gain));
        }

        fn schedule(&mut self, tone: &Tone, delay: Duration) -> Result<()> {
            tone.validate()?;
            self.0.record(Call::Schedule { delay, tone: *tone });
            Ok(())
        }
    }

    impl MusicTrack for Recorder {
        fn set_volume(&mut self, volume: f32) {
            self.0.record(Call::MusicVolume(volume));
        }

        fn play(&mut self) -> Result<()> {
            self.0.record(Call::Play);
            Ok(())
        }

        fn stop(&mut self) {
            self.0.record(Call::Stop);
        }
    }
}

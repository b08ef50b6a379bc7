//! Playback through the default output device with `rodio`.
//!
//! The output stream must stay on the thread that opened it, so it lives on
//! a dedicated engine thread for as long as any graph or track needs it.
//! Everything else talks to it through a cloneable handle.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, mpsc};
use std::thread;
use std::time::Duration;

use exn::Exn;
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::{ErrorKind, Result};
use crate::output::{AudioDevice, MusicTrack, OutputGraph};
use crate::tone::Tone;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// The system's default output device. Nothing is opened until the first
/// graph or track is.
pub struct RodioDevice {
    sample_rate: u32,
    engine: Mutex<Option<Arc<Engine>>>,
}

impl RodioDevice {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            engine: Mutex::new(None),
        }
    }

    fn engine(&self) -> Result<Arc<Engine>> {
        let mut slot = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(engine) = slot.as_ref() {
            return Ok(engine.clone());
        }
        let engine = Arc::new(Engine::start()?);
        *slot = Some(engine.clone());
        Ok(engine)
    }
}

impl Default for RodioDevice {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl AudioDevice for RodioDevice {
    fn open_graph(&self) -> Result<Box<dyn OutputGraph>> {
        Ok(Box::new(RodioGraph {
            engine: self.engine()?,
            sample_rate: self.sample_rate,
            master: 1.0,
        }))
    }

    fn open_music(&self, source: &Path) -> Result<Box<dyn MusicTrack>> {
        // Decode once up front so a missing or corrupt file is reported now.
        decode(source)?;
        Ok(Box::new(RodioMusic {
            engine: self.engine()?,
            source: source.to_path_buf(),
            volume: 1.0,
            sink: None,
        }))
    }
}

struct Engine {
    handle: OutputStreamHandle,
    /// Dropping the last engine reference ends the engine thread.
    _shutdown: mpsc::Sender<()>,
}

impl Engine {
    fn start() -> Result<Self> {
        let (ready_tx, ready_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        thread::Builder::new()
            .name("hub-audio".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((_stream, handle)) => {
                    if ready_tx.send(Ok(handle)).is_ok() {
                        let _ = shutdown_rx.recv();
                    }
                },
                Err(err) => {
                    let _ = ready_tx.send(Err(err.to_string()));
                },
            })
            .map_err(|err| unavailable(err.to_string()))?;
        let handle = ready_rx
            .recv()
            .map_err(|_| unavailable("audio engine exited during startup"))?
            .map_err(unavailable)?;
        tracing::debug!("Audio engine started");
        Ok(Self {
            handle,
            _shutdown: shutdown_tx,
        })
    }
}

struct RodioGraph {
    engine: Arc<Engine>,
    sample_rate: u32,
    master: f32,
}

impl OutputGraph for RodioGraph {
    fn set_master_gain(&mut self, gain: f32) {
        self.master = gain;
    }

    fn schedule(&mut self, tone: &Tone, delay: Duration) -> Result<()> {
        tone.validate()?;
        let samples = SamplesBuffer::new(1, self.sample_rate, tone.render(self.sample_rate));
        self.engine
            .handle
            .play_raw(samples.amplify(self.master).delay(delay))
            .map_err(|err| unavailable(err.to_string()))
    }
}

/// A looping track. Stopping drops the sink; playing again starts a fresh
/// one from the top of the file.
struct RodioMusic {
    engine: Arc<Engine>,
    source: PathBuf,
    volume: f32,
    sink: Option<Sink>,
}

impl MusicTrack for RodioMusic {
    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn play(&mut self) -> Result<()> {
        if let Some(sink) = &self.sink {
            sink.play();
            return Ok(());
        }
        let sink = Sink::try_new(&self.engine.handle).map_err(|err| music(err.to_string()))?;
        sink.set_volume(self.volume);
        sink.append(decode(&self.source)?.repeat_infinite());
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|err| music(format!("{}: {err}", path.display())))?;
    Decoder::new(BufReader::new(file)).map_err(|err| music(format!("{}: {err}", path.display())))
}

fn unavailable(reason: impl Into<String>) -> Exn<ErrorKind> {
    Exn::from(ErrorKind::Unavailable(reason.into()))
}

fn music(reason: String) -> Exn<ErrorKind> {
    Exn::from(ErrorKind::Music(reason))
}

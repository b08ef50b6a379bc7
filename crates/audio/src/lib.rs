//! Sound for the hub: synthesized interface blips and looping background
//! music, behind a session that stays silent until the user unlocks it.
//!
//! ```
//! use std::time::Duration;
//! use hub_audio::{Effect, Tone};
//!
//! let click = Effect::Click.tones();
//! assert_eq!(click[1].0, Duration::from_millis(55));
//! assert_eq!(Tone::default().render(8_000).len(), 440);
//! ```

pub mod effects;
pub mod error;
pub mod output;
#[cfg(feature = "rodio")]
mod playback;
mod session;
pub mod tone;
mod volume;

pub use crate::effects::Effect;
#[cfg(feature = "rodio")]
pub use crate::playback::{DEFAULT_SAMPLE_RATE, RodioDevice};
pub use crate::session::{AudioSession, Controls, SessionState};
pub use crate::tone::{Tone, Waveform};
pub use crate::volume::Volume;

//! The hub's three interface sounds.

use std::time::Duration;

use derive_more::Display;

use crate::tone::Tone;

/// Delay before the second half of a click.
pub const CLICK_ECHO: Duration = Duration::from_millis(55);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Effect {
    /// Pointer over an interactive element: a quick falling blip.
    #[display("hover")]
    Hover,
    /// Activation: up, then back down.
    #[display("click")]
    Click,
    /// Something switched off: a low falling blip.
    #[display("toggle-off")]
    ToggleOff,
}

impl Effect {
    /// Tones making up the effect, each with its delay from the trigger.
    pub fn tones(self) -> Vec<(Duration, Tone)> {
        match self {
            Self::Hover => vec![(Duration::ZERO, blip(880.0, 30, 0.08, 660.0))],
            Self::Click => vec![
                (Duration::ZERO, blip(660.0, 60, 0.11, 990.0)),
                (CLICK_ECHO, blip(990.0, 40, 0.08, 660.0)),
            ],
            Self::ToggleOff => vec![(Duration::ZERO, blip(220.0, 70, 0.10, 140.0))],
        }
    }
}

fn blip(from: f32, millis: u64, gain: f32, to: f32) -> Tone {
    Tone::new(from)
        .with_duration(Duration::from_millis(millis))
        .with_gain(gain)
        .with_slide(to)
}

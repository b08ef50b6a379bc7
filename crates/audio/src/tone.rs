//! Single-oscillator chiptune tones.
//!
//! A tone starts almost silent, swells to its gain within [`ATTACK`], decays
//! back to [`FLOOR`] by the end of its duration and rings at the floor for
//! [`TAIL`] before stopping. Both the swell and the decay (and any pitch
//! slide) are exponential, which is what keeps short blips free of clicks.

use std::f32::consts::TAU;
use std::time::Duration;

use derive_more::Display;

use crate::error::{ErrorKind, Result};

/// Lowest envelope level. Exponential ramps can't reach zero.
pub const FLOOR: f32 = 0.0001;
/// Time to swell from [`FLOOR`] to the tone's gain.
pub const ATTACK: Duration = Duration::from_millis(5);
/// How long the oscillator keeps running after the decay.
pub const TAIL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Waveform {
    #[display("sine")]
    Sine,
    #[default]
    #[display("square")]
    Square,
    #[display("sawtooth")]
    Sawtooth,
    #[display("triangle")]
    Triangle,
}

impl Waveform {
    /// Oscillator output at `phase`, a fraction of one cycle in `[0, 1)`.
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Self::Sine => (TAU * phase).sin(),
            Self::Square if phase < 0.5 => 1.0,
            Self::Square => -1.0,
            Self::Sawtooth => 2.0 * phase - 1.0,
            Self::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// One blip of sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Starting pitch in Hz.
    pub frequency: f32,
    /// Time from start until the decay reaches [`FLOOR`].
    pub duration: Duration,
    pub waveform: Waveform,
    /// Peak level, within `[FLOOR, 1]`.
    pub gain: f32,
    /// Pitch reached at the end of `duration`, if the tone slides.
    pub slide_to: Option<f32>,
}

impl Default for Tone {
    fn default() -> Self {
        Self {
            frequency: 740.0,
            duration: Duration::from_millis(45),
            waveform: Waveform::Square,
            gain: 0.12,
            slide_to: None,
        }
    }
}

impl Tone {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Sets the peak level, clamped to `[FLOOR, 1]`.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = if gain.is_nan() { FLOOR } else { gain.clamp(FLOOR, 1.0) };
        self
    }

    pub fn with_slide(mut self, target: f32) -> Self {
        self.slide_to = Some(target);
        self
    }

    /// Rejects tones an oscillator can't play.
    pub fn validate(&self) -> Result<()> {
        let pitches = std::iter::once(("frequency", self.frequency)).chain(self.slide_to.map(|to| ("slide", to)));
        for (what, hz) in pitches {
            if !hz.is_finite() || hz <= 0.0 {
                exn::bail!(ErrorKind::InvalidTone(format!("{what} must be a positive number of Hz, got {hz}")));
            }
        }
        if self.duration.is_zero() {
            exn::bail!(ErrorKind::InvalidTone("duration must not be zero".to_string()));
        }
        Ok(())
    }

    /// Total running time, including the tail.
    pub fn length(&self) -> Duration {
        self.duration + TAIL
    }

    /// Envelope level `t` seconds after the start; zero once stopped.
    pub fn envelope(&self, t: f32) -> f32 {
        let duration = self.duration.as_secs_f32();
        let attack = ATTACK.as_secs_f32().min(duration);
        if t < 0.0 || t >= self.length().as_secs_f32() {
            0.0
        } else if t < attack {
            ramp(FLOOR, self.gain, t / attack)
        } else if t < duration {
            ramp(self.gain, FLOOR, (t - attack) / (duration - attack))
        } else {
            FLOOR
        }
    }

    /// Pitch `t` seconds after the start.
    pub fn frequency_at(&self, t: f32) -> f32 {
        let duration = self.duration.as_secs_f32();
        match self.slide_to {
            Some(target) if duration > 0.0 => ramp(self.frequency, target, (t / duration).clamp(0.0, 1.0)),
            _ => self.frequency,
        }
    }

    /// Mono PCM samples for the whole tone, tail included.
    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        if sample_rate == 0 {
            return Vec::new();
        }
        let count = (self.length().as_nanos() * u128::from(sample_rate)).div_ceil(1_000_000_000);
        let rate = sample_rate as f32;
        let mut phase = 0.0_f32;
        (0..count)
            .map(|n| {
                let t = n as f32 / rate;
                let sample = self.waveform.sample(phase) * self.envelope(t);
                phase = (phase + self.frequency_at(t) / rate).fract();
                sample
            })
            .collect()
    }
}

/// Exponential interpolation from `from` to `to`, `progress` in `[0, 1]`.
fn ramp(from: f32, to: f32, progress: f32) -> f32 {
    from * (to / from).powf(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= b.abs() * 1e-3 + 1e-6
    }

    #[test]
    fn default_blip() {
        let tone = Tone::default();
        assert_eq!(tone.frequency, 740.0);
        assert_eq!(tone.duration, Duration::from_millis(45));
        assert_eq!(tone.waveform, Waveform::Square);
        assert_eq!(tone.gain, 0.12);
        assert_eq!(tone.slide_to, None);
        assert_eq!(tone.length(), Duration::from_millis(55));
    }

    #[test]
    fn envelope_shape() {
        let tone = Tone::new(440.0).with_duration(Duration::from_millis(60)).with_gain(0.1);
        assert!(close(tone.envelope(0.0), FLOOR));
        assert!(close(tone.envelope(0.005), 0.1));
        assert!(close(tone.envelope(0.060), FLOOR));
        assert!(close(tone.envelope(0.065), FLOOR));
        assert_eq!(tone.envelope(0.071), 0.0);
        assert_eq!(tone.envelope(-0.001), 0.0);
        // Swell then decay, never above the peak.
        let levels: Vec<f32> = (0..70).map(|ms| tone.envelope(ms as f32 / 1000.0)).collect();
        assert!(levels[..5].windows(2).all(|w| w[0] < w[1]));
        assert!(levels[5..60].windows(2).all(|w| w[0] > w[1]));
        assert!(levels.iter().all(|level| *level <= 0.1 + 1e-6));
    }

    #[test]
    fn decay_is_exponential() {
        let tone = Tone::new(440.0).with_duration(Duration::from_millis(45)).with_gain(0.1);
        // Halfway through the decay is the geometric mean of peak and floor.
        let midpoint = 0.005 + (0.045 - 0.005) / 2.0;
        assert!(close(tone.envelope(midpoint), (0.1_f32 * FLOOR).sqrt()));
    }

    #[test]
    fn pitch_slides_exponentially() {
        let tone = Tone::new(660.0).with_duration(Duration::from_millis(60)).with_slide(990.0);
        assert!(close(tone.frequency_at(0.0), 660.0));
        assert!(close(tone.frequency_at(0.030), (660.0_f32 * 990.0).sqrt()));
        assert!(close(tone.frequency_at(0.060), 990.0));
        assert!(close(tone.frequency_at(0.065), 990.0));
        assert!(close(Tone::new(440.0).frequency_at(0.02), 440.0));
    }

    #[rstest]
    #[case(2.0, 1.0)]
    #[case(-1.0, FLOOR)]
    #[case(0.0, FLOOR)]
    #[case(f32::NAN, FLOOR)]
    #[case(0.5, 0.5)]
    fn gain_is_clamped(#[case] gain: f32, #[case] expected: f32) {
        assert_eq!(Tone::default().with_gain(gain).gain, expected);
    }

    #[rstest]
    #[case(Tone::new(0.0))]
    #[case(Tone::new(-440.0))]
    #[case(Tone::new(f32::NAN))]
    #[case(Tone::new(f32::INFINITY))]
    #[case(Tone::new(440.0).with_slide(0.0))]
    #[case(Tone::new(440.0).with_duration(Duration::ZERO))]
    fn unplayable_tones_are_rejected(#[case] tone: Tone) {
        let err = tone.validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidTone(_)));
    }

    #[test]
    fn render_covers_the_tail() {
        let tone = Tone::default();
        let samples = tone.render(48_000);
        assert_eq!(samples.len(), 2_640);
        assert!(samples.iter().all(|s| s.abs() <= tone.gain + 1e-6));
        assert!(samples[2_200..].iter().all(|s| s.abs() <= FLOOR + 1e-6));
        assert!(Tone::default().render(0).is_empty());
    }

    #[rstest]
    #[case(Waveform::Sine, 0.25, 1.0)]
    #[case(Waveform::Square, 0.75, -1.0)]
    #[case(Waveform::Sawtooth, 0.0, -1.0)]
    #[case(Waveform::Triangle, 0.5, 1.0)]
    fn waveforms(#[case] waveform: Waveform, #[case] phase: f32, #[case] expected: f32) {
        assert!(close(waveform.sample(phase), expected));
    }
}

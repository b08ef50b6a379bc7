use std::fmt::{Display, Formatter, Result as FmtResult};

/// Master volume, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f32);

impl Volume {
    pub const MUTE: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    /// Clamps `level` into range. NaN is treated as silence.
    pub fn new(level: f32) -> Self {
        Self(if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) })
    }

    /// From a 0-100 slider position.
    pub fn from_percent(percent: f32) -> Self {
        Self::new(percent / 100.0)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Rounded slider position.
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(0.5)
    }
}

impl Display for Volume {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(50.0, 0.5, "50%")]
    #[case(0.0, 0.0, "0%")]
    #[case(100.0, 1.0, "100%")]
    #[case(150.0, 1.0, "100%")]
    #[case(-20.0, 0.0, "0%")]
    #[case(33.3, 0.333, "33%")]
    #[case(f32::NAN, 0.0, "0%")]
    fn from_slider(#[case] percent: f32, #[case] level: f32, #[case] label: &str) {
        let volume = Volume::from_percent(percent);
        assert!((volume.get() - level).abs() < 1e-6);
        assert_eq!(volume.to_string(), label);
    }

    #[test]
    fn defaults_to_half() {
        assert_eq!(Volume::default().percent(), 50);
        assert!(Volume::MUTE < Volume::default() && Volume::default() < Volume::FULL);
    }
}

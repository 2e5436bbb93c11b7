//! Cross-section calculation settings.

use crate::constants::NOMINAL_FREQUENCY_HZ;
use crate::math::Scalar;

/// Ground model and section length used when assembling a cross-section.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionConfig {
    /// Section length in kilometres. Results are scaled by this value.
    pub length: Scalar,
    /// Ground-return resistance `Rz` in Ω/km.
    pub ground_resistance: Scalar,
    /// Equivalent ground-return depth `Dz` in metres.
    pub ground_depth: Scalar,
    /// System frequency in hertz.
    pub frequency_hz: Scalar,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            length: 1.0,
            ground_resistance: 0.05,
            ground_depth: 1000.0,
            frequency_hz: NOMINAL_FREQUENCY_HZ,
        }
    }
}

impl SectionConfig {
    /// Sets the section length (km).
    #[must_use]
    pub fn with_length(mut self, length: Scalar) -> Self {
        self.length = length;
        self
    }

    /// Sets the ground-return resistance `Rz` (Ω/km).
    #[must_use]
    pub fn with_ground_resistance(mut self, rz: Scalar) -> Self {
        self.ground_resistance = rz;
        self
    }

    /// Sets the equivalent ground-return depth `Dz` (m).
    #[must_use]
    pub fn with_ground_depth(mut self, dz: Scalar) -> Self {
        self.ground_depth = dz;
        self
    }

    /// Sets the system frequency (Hz).
    #[must_use]
    pub fn with_frequency(mut self, hz: Scalar) -> Self {
        self.frequency_hz = hz;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_standard() {
        let cfg = SectionConfig::default();
        assert_eq!(cfg.ground_resistance, 0.05);
        assert_eq!(cfg.ground_depth, 1000.0);
        assert_eq!(cfg.frequency_hz, 50.0);
        assert_eq!(cfg.with_length(12.5).length, 12.5);
    }
}

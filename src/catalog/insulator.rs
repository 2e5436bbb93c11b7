//! Insulator units and suspension strings.

use crate::errors::{LineParamsError, Result};
use crate::math::Scalar;

use super::{require_positive, Derivation};

/// Insulator unit or string of units.
///
/// The string length is the vertical drop of the conductor below the tower arm:
/// `unit_length · (units + 1.5)`, where the extra 1.5 unit lengths account for
/// the suspension hardware.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct InsulatorString {
    name: String,
    unit_length: Scalar,
    units: u32,
    string_length: Scalar,
    derivation: Derivation,
}

impl InsulatorString {
    /// Single insulator unit of length `unit_length` metres.
    pub fn unit(name: impl Into<String>, unit_length: Scalar) -> Result<Self> {
        require_positive(unit_length, "insulator unit length")?;
        Ok(Self {
            name: name.into(),
            unit_length,
            units: 1,
            string_length: string_length(unit_length, 1),
            derivation: Derivation::Base,
        })
    }

    /// Derives a string of `units` insulators named `"{units}x{unit}"`.
    pub fn string(&self, units: u32) -> Result<Self> {
        let derivation = self.derivation.derive_from("insulator", &self.name)?;
        if units == 0 {
            return Err(LineParamsError::InvalidParameter(
                "insulator string needs at least one unit".into(),
            ));
        }
        Ok(Self {
            name: format!("{units}x{}", self.name),
            unit_length: self.unit_length,
            units,
            string_length: string_length(self.unit_length, units),
            derivation,
        })
    }

    /// Name of the unit or string.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length of one unit (m).
    #[must_use]
    pub fn unit_length(&self) -> Scalar {
        self.unit_length
    }

    /// Number of units in the string.
    #[must_use]
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Vertical drop of the conductor attachment below the tower arm (m).
    #[must_use]
    pub fn string_length(&self) -> Scalar {
        self.string_length
    }

    /// Derivation state.
    #[must_use]
    pub fn derivation(&self) -> &Derivation {
        &self.derivation
    }
}

fn string_length(unit_length: Scalar, units: u32) -> Scalar {
    unit_length * (Scalar::from(units) + 1.5)
}

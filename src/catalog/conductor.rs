//! Phase conductor and shield-wire types.

use std::f64::consts::SQRT_2;

use crate::constants::{DEFAULT_EFFECTIVE_RADIUS_COEFFICIENT, STEEL_REACTANCE_PER_DECADE};
use crate::errors::{LineParamsError, Result};
use crate::math::Scalar;

use super::{require_positive, Derivation};

/// Electrical and geometric description of a conductor or shield wire.
///
/// Two equivalent radii are carried: `radius_c` (geometric, used for potential
/// coefficients) and `radius_z = Ke·radius_c` (effective, used for the series
/// impedance). Bundles replace both with their geometric-mean equivalents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConductorType {
    name: String,
    resistance: Scalar,
    reactance: Option<Scalar>,
    diameter_mm: Scalar,
    ke: Scalar,
    radius_z: Scalar,
    radius_c: Scalar,
    bundle_count: usize,
    bundle_spacing: Scalar,
    derivation: Derivation,
}

impl ConductorType {
    /// Conductor with resistance `resistance` (Ω/km), diameter `diameter_mm` and the
    /// default effective-radius coefficient `Ke = 0.95`.
    pub fn new(name: impl Into<String>, resistance: Scalar, diameter_mm: Scalar) -> Result<Self> {
        Self::with_effective_radius(name, resistance, diameter_mm, DEFAULT_EFFECTIVE_RADIUS_COEFFICIENT)
    }

    /// Conductor with an explicit effective-radius coefficient `ke` in (0, 1].
    pub fn with_effective_radius(
        name: impl Into<String>,
        resistance: Scalar,
        diameter_mm: Scalar,
        ke: Scalar,
    ) -> Result<Self> {
        require_positive(diameter_mm, "conductor diameter")?;
        if !resistance.is_finite() || resistance < 0.0 {
            return Err(LineParamsError::InvalidParameter(format!(
                "conductor resistance must be non-negative, got {resistance}"
            )));
        }
        if !(ke > 0.0 && ke <= 1.0) {
            return Err(LineParamsError::InvalidParameter(format!(
                "effective-radius coefficient must lie in (0, 1], got {ke}"
            )));
        }
        let radius_c = diameter_mm * 0.001 / 2.0;
        Ok(Self {
            name: name.into(),
            resistance,
            reactance: None,
            diameter_mm,
            ke,
            radius_z: ke * radius_c,
            radius_c,
            bundle_count: 1,
            bundle_spacing: 0.0,
            derivation: Derivation::Base,
        })
    }

    /// Steel shield wire whose `Ke` follows from its catalog internal reactance
    /// `reactance` (Ω/km): `Ke = 10^(−x/0.145)`.
    pub fn steel_wire(
        name: impl Into<String>,
        resistance: Scalar,
        reactance: Scalar,
        diameter_mm: Scalar,
    ) -> Result<Self> {
        let ke = 10_f64.powf(-reactance / STEEL_REACTANCE_PER_DECADE);
        let mut wire = Self::with_effective_radius(name, resistance, diameter_mm, ke)?;
        wire.reactance = Some(reactance);
        Ok(wire)
    }

    /// Derives a bundle of `count` sub-conductors spaced `spacing` metres apart.
    ///
    /// Only 2, 3 and 4 sub-conductor bundles are supported. Resistance is divided by
    /// the count, `Ke` becomes `Ke^(1/n)` and the nominal diameter is re-derived from
    /// the equivalent geometric radius.
    pub fn bundle(&self, name: impl Into<String>, count: usize, spacing: Scalar) -> Result<Self> {
        let derivation = self.derivation.derive_from("conductor", &self.name)?;
        require_positive(spacing, "bundle spacing")?;
        let equivalent = |r: Scalar| match count {
            2 => Ok((r * spacing).sqrt()),
            3 => Ok((r * spacing.powi(2)).cbrt()),
            4 => Ok((SQRT_2 * r * spacing.powi(3)).powf(0.25)),
            other => Err(LineParamsError::UnsupportedBundle(other)),
        };
        let radius_z = equivalent(self.radius_z)?;
        let radius_c = equivalent(self.radius_c)?;
        let n = count as Scalar;
        Ok(Self {
            name: name.into(),
            resistance: self.resistance / n,
            reactance: self.reactance.map(|x| x / n),
            diameter_mm: 2000.0 * radius_c,
            ke: self.ke.powf(1.0 / n),
            radius_z,
            radius_c,
            bundle_count: count,
            bundle_spacing: spacing,
            derivation,
        })
    }

    /// Catalog name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-length resistance (Ω/km).
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance
    }

    /// Catalog internal reactance used to derive `Ke`, for steel wires.
    #[must_use]
    pub fn reactance(&self) -> Option<Scalar> {
        self.reactance
    }

    /// Nominal diameter (mm); equivalent diameter for bundles.
    #[must_use]
    pub fn diameter_mm(&self) -> Scalar {
        self.diameter_mm
    }

    /// Effective-radius coefficient `Ke`.
    #[must_use]
    pub fn effective_radius_coefficient(&self) -> Scalar {
        self.ke
    }

    /// Equivalent radius for impedance calculations (m).
    #[must_use]
    pub fn impedance_radius(&self) -> Scalar {
        self.radius_z
    }

    /// Equivalent radius for potential coefficient calculations (m).
    #[must_use]
    pub fn admittance_radius(&self) -> Scalar {
        self.radius_c
    }

    /// Number of sub-conductors (1 for a plain conductor).
    #[must_use]
    pub fn bundle_count(&self) -> usize {
        self.bundle_count
    }

    /// Sub-conductor spacing (m); zero for a plain conductor.
    #[must_use]
    pub fn bundle_spacing(&self) -> Scalar {
        self.bundle_spacing
    }

    /// Derivation state.
    #[must_use]
    pub fn derivation(&self) -> &Derivation {
        &self.derivation
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn ac300() -> ConductorType {
        ConductorType::new("AC-300/39", 0.098, 24.0).unwrap()
    }

    #[test]
    fn radii_follow_diameter_and_ke() {
        let c = ac300();
        assert_relative_eq!(c.admittance_radius(), 0.012);
        assert_relative_eq!(c.impedance_radius(), 0.95 * 0.012);
        assert_eq!(c.bundle_count(), 1);
    }

    #[test]
    fn steel_wire_ke_from_reactance() {
        let wire = ConductorType::steel_wire("S-70", 2.5, 0.29, 11.0).unwrap();
        assert_relative_eq!(wire.effective_radius_coefficient(), 0.01, max_relative = 1.0e-12);
        assert_eq!(wire.reactance(), Some(0.29));
    }

    #[test]
    fn bundle_radii_grow_with_spacing() {
        let single = ac300();
        for count in 2..=4 {
            let b = single.bundle(format!("{count}xAC-300"), count, 0.4).unwrap();
            assert!(b.impedance_radius() > single.impedance_radius());
            assert!(b.admittance_radius() > single.admittance_radius());
            assert_relative_eq!(b.resistance(), 0.098 / count as f64);
            assert_eq!(b.derivation().parent(), Some("AC-300/39"));
        }
        let two = single.bundle("2x", 2, 0.4).unwrap();
        let three = single.bundle("3x", 3, 0.4).unwrap();
        let four = single.bundle("4x", 4, 0.4).unwrap();
        assert!(two.impedance_radius() < three.impedance_radius());
        assert!(three.impedance_radius() < four.impedance_radius());
        assert_relative_eq!(two.admittance_radius(), (0.012_f64 * 0.4).sqrt());
        assert_relative_eq!(two.diameter_mm(), 2000.0 * two.admittance_radius());
    }

    #[test]
    fn bundle_cannot_be_rebundled() {
        let b = ac300().bundle("2xAC-300", 2, 0.4).unwrap();
        assert!(matches!(
            b.bundle("4x2x", 2, 0.4),
            Err(LineParamsError::AlreadyDerived { kind: "conductor", .. })
        ));
    }

    #[test]
    fn unsupported_bundle_sizes_are_rejected() {
        assert!(matches!(ac300().bundle("5x", 5, 0.4), Err(LineParamsError::UnsupportedBundle(5))));
        assert!(matches!(ac300().bundle("1x", 1, 0.4), Err(LineParamsError::UnsupportedBundle(1))));
    }

    #[test]
    fn invalid_ke_is_rejected() {
        assert!(ConductorType::with_effective_radius("x", 0.1, 10.0, 1.5).is_err());
        assert!(ConductorType::steel_wire("x", 0.1, -0.2, 10.0).is_err());
        assert!(ConductorType::new("x", 0.1, 0.0).is_err());
    }
}

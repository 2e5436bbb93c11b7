//! Physical constants and frequency-dependent line coefficients.
//!
//! ## Units
//!
//! Line parameters are expressed per kilometre: series terms in Ω/km, potential
//! coefficients in km/F and susceptances in S/km. Geometry is in metres.
//!
//! ## References
//!
//! Physical constants are based on CODATA 2018 recommended values
//! (<https://physics.nist.gov/cuu/Constants/>).

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;
/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
pub const VACUUM_PERMEABILITY: Scalar = 1.256_637_062_12e-6;

/// Nominal system frequency used by the short-circuit standard (Hz).
pub const NOMINAL_FREQUENCY_HZ: Scalar = 50.0;

/// Metres per kilometre.
pub const METRES_PER_KM: Scalar = 1000.0;

/// Potential coefficient factor `1 / (2π·ε₀)` in km/F.
///
/// Multiplies `ln(S/D)` to give a Maxwell potential coefficient per kilometre.
pub const POTENTIAL_COEFFICIENT: Scalar = 1.0 / (2.0 * PI * VACUUM_PERMITTIVITY * METRES_PER_KM);

/// Default effective-radius coefficient `Ke` of a stranded aluminium conductor.
pub const DEFAULT_EFFECTIVE_RADIUS_COEFFICIENT: Scalar = 0.95;

/// Internal reactance (Ω/km) per decade of effective-radius reduction for steel wires.
///
/// `Ke = 10^(−x / 0.145)` where `x` is the catalog internal reactance.
pub const STEEL_REACTANCE_PER_DECADE: Scalar = 0.145;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}

/// Returns the reactance coefficient `K = ω·μ₀/(2π)` in Ω/km.
///
/// Multiplies `ln(Dz/D)` in the Carson-type series impedance formulas. At 50 Hz
/// this is `2π/100 ≈ 0.0628 Ω/km`.
#[inline]
#[must_use]
pub fn reactance_coefficient(hz: Scalar) -> Scalar {
    angular_frequency(hz) * VACUUM_PERMEABILITY / (2.0 * PI) * METRES_PER_KM
}

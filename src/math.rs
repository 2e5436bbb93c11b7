//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{ComplexField, DMatrix, DVector};

use crate::errors::{LineParamsError, Result};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances and susceptances.
pub type CScalar = num_complex::Complex<Scalar>;
/// Dense complex matrix (impedance and susceptance matrices).
pub type CMatrix = DMatrix<CScalar>;
/// Dense real matrix (potential coefficient matrices).
pub type RMatrix = DMatrix<Scalar>;
/// Dense complex column vector.
pub type CVector = DVector<CScalar>;
/// Dense real column vector.
pub type RVector = DVector<Scalar>;

/// The imaginary unit `j`.
pub const J: CScalar = CScalar::new(0.0, 1.0);

/// Geometric mean of `values`: the n-th root of their product.
///
/// Returns `0.0` for an empty iterator.
#[must_use]
pub fn geometric_mean<I>(values: I) -> Scalar
where
    I: IntoIterator<Item = Scalar>,
{
    let (product, count) = values
        .into_iter()
        .fold((1.0, 0_u32), |(p, n), v| (p * v, n + 1));
    if count == 0 {
        return 0.0;
    }
    product.powf(1.0 / Scalar::from(count))
}

/// Computes `ln(numerator / denominator)`, rejecting non-positive or non-finite arguments.
///
/// `quantity` names the ratio in the resulting [`LineParamsError::Domain`].
pub fn ln_ratio(numerator: Scalar, denominator: Scalar, quantity: &'static str) -> Result<Scalar> {
    for value in [numerator, denominator] {
        if !(value.is_finite() && value > 0.0) {
            return Err(LineParamsError::Domain { quantity, value });
        }
    }
    Ok((numerator / denominator).ln())
}

/// Kron reduction `main − coupling_pt · eliminated⁻¹ · coupling_tp`.
///
/// Eliminates the degrees of freedom represented by `eliminated` (size `t×t`) from
/// `main` (size `p×p`). The inverse is never formed; `eliminated⁻¹ · coupling_tp` is
/// obtained from an LU solve. Returns `None` when `eliminated` is singular.
#[must_use]
pub fn kron_reduce<T>(
    main: &DMatrix<T>,
    coupling_pt: &DMatrix<T>,
    eliminated: &DMatrix<T>,
    coupling_tp: &DMatrix<T>,
) -> Option<DMatrix<T>>
where
    T: ComplexField,
{
    let folded = eliminated.clone().lu().solve(coupling_tp)?;
    Some(main - coupling_pt * folded)
}

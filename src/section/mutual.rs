//! Zero-sequence mutual terms between two branches.
//!
//! Mutual distances are geometric means over every conductor pair of the two
//! branches: 9 pairs for two circuits, 3 for a circuit and a shield wire, 1 for two
//! shield wires. Image distances use the mirrored (conjugated) second branch.

use crate::constants::POTENTIAL_COEFFICIENT;
use crate::errors::Result;
use crate::math::{geometric_mean, ln_ratio, CScalar, Scalar};

use super::branch::{Branch, BranchKind, GroundReturn};

/// Mean direct distance `Dpp` and mean image distance `Spp` between two branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutualDistances {
    /// Geometric mean of conductor-to-conductor distances.
    pub direct: Scalar,
    /// Geometric mean of conductor-to-image distances.
    pub image: Scalar,
}

impl MutualDistances {
    /// Distances between the conductors of `a` and `b`.
    #[must_use]
    pub fn between(a: &Branch, b: &Branch) -> Self {
        Self {
            direct: geometric_mean(conductor_pairs(a, b).map(|(x, y)| (x - y).norm())),
            image: geometric_mean(conductor_pairs(a, b).map(|(x, y)| (x - y.conj()).norm())),
        }
    }
}

fn conductor_pairs<'a>(a: &'a Branch, b: &'a Branch) -> impl Iterator<Item = (CScalar, CScalar)> + 'a {
    a.coords()
        .iter()
        .flat_map(move |x| b.coords().iter().map(move |y| (*x, *y)))
}

/// Zero-sequence mutual impedance `3·(Rz + j·K·ln(Dz/Dpp))` in Ω/km.
pub(crate) fn mutual_impedance(a: &Branch, b: &Branch, ground: &GroundReturn) -> Result<CScalar> {
    let distances = MutualDistances::between(a, b);
    Ok(3.0 * ground.loop_impedance(distances.direct, "mutual distance Dpp")?)
}

/// Zero-sequence mutual potential coefficient `C·ln(Spp/Dpp)` in km/F.
///
/// Between two three-phase circuits the coefficient is tripled.
pub(crate) fn mutual_potential(a: &Branch, b: &Branch) -> Result<Scalar> {
    let distances = MutualDistances::between(a, b);
    let log = ln_ratio(distances.image, distances.direct, "mutual distance Dpp")?;
    let factor = match (a.kind(), b.kind()) {
        (BranchKind::ThreePhase, BranchKind::ThreePhase) => 3.0,
        _ => 1.0,
    };
    Ok(factor * POTENTIAL_COEFFICIENT * log)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::{AttachmentPoints, ConductorType};
    use crate::config::SectionConfig;
    use crate::section::branch::BranchSpec;

    fn ground() -> GroundReturn {
        GroundReturn::new(&SectionConfig::default())
    }

    fn circuit(x: Scalar) -> Branch {
        let conductor = ConductorType::new("AC-240/32", 0.118, 21.6).unwrap();
        let points = AttachmentPoints::Phases([
            CScalar::new(x - 4.0, 20.0),
            CScalar::new(x, 20.0),
            CScalar::new(x + 4.0, 20.0),
        ]);
        Branch::new(BranchSpec::new("L", points, &conductor), &ground()).unwrap()
    }

    fn shield(x: Scalar, y: Scalar) -> Branch {
        let wire = ConductorType::steel_wire("S-70", 2.5, 0.29, 11.0).unwrap();
        let point = AttachmentPoints::Shield(CScalar::new(x, y));
        Branch::new(BranchSpec::new("T", point, &wire), &ground()).unwrap()
    }

    #[test]
    fn shield_pair_distances_are_single_pair() {
        let d = MutualDistances::between(&shield(-3.0, 25.0), &shield(3.0, 25.0));
        assert_relative_eq!(d.direct, 6.0, epsilon = 1.0e-12);
        assert_relative_eq!(d.image, (36.0_f64 + 2500.0).sqrt(), epsilon = 1.0e-12);
    }

    #[test]
    fn mutual_terms_are_symmetric() {
        let (a, b, t) = (circuit(0.0), circuit(15.0), shield(0.0, 26.0));
        let g = ground();
        for (x, y) in [(&a, &b), (&a, &t), (&t, &b)] {
            assert_relative_eq!(
                mutual_impedance(x, y, &g).unwrap().im,
                mutual_impedance(y, x, &g).unwrap().im,
                epsilon = 1.0e-12
            );
            assert_relative_eq!(
                mutual_potential(x, y).unwrap(),
                mutual_potential(y, x).unwrap(),
                max_relative = 1.0e-12
            );
        }
    }

    #[test]
    fn potential_triples_only_between_circuits() {
        let (a, b) = (circuit(0.0), circuit(15.0));
        let d = MutualDistances::between(&a, &b);
        let expected = 3.0 * POTENTIAL_COEFFICIENT * (d.image / d.direct).ln();
        assert_relative_eq!(mutual_potential(&a, &b).unwrap(), expected, max_relative = 1.0e-12);

        let t = shield(0.0, 26.0);
        let d = MutualDistances::between(&a, &t);
        let expected = POTENTIAL_COEFFICIENT * (d.image / d.direct).ln();
        assert_relative_eq!(mutual_potential(&a, &t).unwrap(), expected, max_relative = 1.0e-12);
    }

    #[test]
    fn mutual_impedance_is_tripled_ground_loop() {
        let (a, b) = (shield(-3.0, 25.0), shield(3.0, 25.0));
        let z = mutual_impedance(&a, &b, &ground()).unwrap();
        assert_relative_eq!(z.re, 0.15, epsilon = 1.0e-12);
        assert_relative_eq!(z.im, 3.0 * 0.062_831_853_071_796 * (1000.0_f64 / 6.0).ln(), max_relative = 1.0e-9);
    }

    #[test]
    fn coincident_branches_fail() {
        let (a, b) = (shield(0.0, 25.0), shield(0.0, 25.0));
        assert!(mutual_impedance(&a, &b, &ground()).is_err());
        assert!(mutual_potential(&a, &b).is_err());
    }
}

//! Tower attachment-point geometry.
//!
//! Coordinates are complex numbers `x + j·y` in metres: horizontal position from
//! the tower axis and height of the attachment point above ground.

use crate::errors::{LineParamsError, Result};
use crate::math::{CScalar, Scalar, J};

use super::Derivation;

/// Attachment points of one tower slot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttachmentPoints {
    /// Three phase conductors of one circuit.
    Phases([CScalar; 3]),
    /// Single shield wire.
    Shield(CScalar),
}

impl AttachmentPoints {
    /// Attachment points as a slice (3 entries for phases, 1 for a shield).
    #[must_use]
    pub fn points(&self) -> &[CScalar] {
        match self {
            Self::Phases(p) => p,
            Self::Shield(s) => std::slice::from_ref(s),
        }
    }

    /// Number of conductors (3 or 1).
    #[must_use]
    pub fn conductor_count(&self) -> usize {
        self.points().len()
    }
}

/// Slot of a tower geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TowerSlot {
    /// First three-phase circuit.
    Circuit1,
    /// Second three-phase circuit.
    Circuit2,
    /// First shield wire.
    Shield1,
    /// Second shield wire.
    Shield2,
}

impl TowerSlot {
    fn describe(self) -> &'static str {
        match self {
            Self::Circuit1 => "circuit 1",
            Self::Circuit2 => "circuit 2",
            Self::Shield1 => "shield wire 1",
            Self::Shield2 => "shield wire 2",
        }
    }
}

/// Tower with up to two three-phase circuits and two shield wires.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TowerGeometry {
    name: String,
    circuit1: [CScalar; 3],
    circuit2: Option<[CScalar; 3]>,
    shield1: Option<CScalar>,
    shield2: Option<CScalar>,
    derivation: Derivation,
}

impl TowerGeometry {
    /// Single-circuit tower without shield wires.
    #[must_use]
    pub fn new(name: impl Into<String>, circuit1: [CScalar; 3]) -> Self {
        Self {
            name: name.into(),
            circuit1,
            circuit2: None,
            shield1: None,
            shield2: None,
            derivation: Derivation::Base,
        }
    }

    /// Adds a second circuit.
    #[must_use]
    pub fn with_circuit2(mut self, phases: [CScalar; 3]) -> Self {
        self.circuit2 = Some(phases);
        self
    }

    /// Adds the first shield wire.
    #[must_use]
    pub fn with_shield1(mut self, point: CScalar) -> Self {
        self.shield1 = Some(point);
        self
    }

    /// Adds the second shield wire.
    #[must_use]
    pub fn with_shield2(mut self, point: CScalar) -> Self {
        self.shield2 = Some(point);
        self
    }

    /// Derives a tower with every populated attachment point raised by `dy` metres.
    pub fn raised(&self, name: impl Into<String>, dy: Scalar) -> Result<Self> {
        let derivation = self.derivation.derive_from("tower", &self.name)?;
        if !dy.is_finite() {
            return Err(LineParamsError::InvalidParameter(format!(
                "tower height offset must be finite, got {dy}"
            )));
        }
        let up = J * dy;
        Ok(Self {
            name: name.into(),
            circuit1: self.circuit1.map(|x| x + up),
            circuit2: self.circuit2.map(|c| c.map(|x| x + up)),
            shield1: self.shield1.map(|x| x + up),
            shield2: self.shield2.map(|x| x + up),
            derivation,
        })
    }

    /// Attachment points of `slot`, failing when the tower doesn't populate it.
    pub fn slot(&self, slot: TowerSlot) -> Result<AttachmentPoints> {
        let points = match slot {
            TowerSlot::Circuit1 => Some(AttachmentPoints::Phases(self.circuit1)),
            TowerSlot::Circuit2 => self.circuit2.map(AttachmentPoints::Phases),
            TowerSlot::Shield1 => self.shield1.map(AttachmentPoints::Shield),
            TowerSlot::Shield2 => self.shield2.map(AttachmentPoints::Shield),
        };
        points.ok_or_else(|| LineParamsError::UnusedTowerSlot {
            tower: self.name.clone(),
            slot: slot.describe(),
        })
    }

    /// Tower name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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

    fn p110() -> TowerGeometry {
        TowerGeometry::new(
            "P110-1",
            [CScalar::new(-2.0, 16.5), CScalar::new(3.5, 19.0), CScalar::new(2.0, 22.5)],
        )
        .with_shield1(CScalar::new(0.0, 26.5))
    }

    #[test]
    fn raised_tower_shifts_populated_slots() {
        let base = p110();
        let tall = base.raised("P110-1+5", 5.0).unwrap();
        let AttachmentPoints::Phases(p) = tall.slot(TowerSlot::Circuit1).unwrap() else {
            panic!("expected phases");
        };
        assert_relative_eq!(p[0].im, 21.5);
        assert_relative_eq!(p[0].re, -2.0);
        assert_eq!(
            tall.slot(TowerSlot::Shield1).unwrap(),
            AttachmentPoints::Shield(CScalar::new(0.0, 31.5))
        );
        assert!(tall.slot(TowerSlot::Circuit2).is_err());
        assert_eq!(tall.derivation().parent(), Some("P110-1"));
    }

    #[test]
    fn raised_tower_cannot_be_raised_again() {
        let tall = p110().raised("P110-1+5", 5.0).unwrap();
        assert!(matches!(
            tall.raised("P110-1+10", 5.0),
            Err(LineParamsError::AlreadyDerived { kind: "tower", .. })
        ));
    }

    #[test]
    fn unused_slot_is_an_error() {
        let err = p110().slot(TowerSlot::Shield2).unwrap_err();
        assert!(err.to_string().contains("shield wire 2"));
    }

    #[test]
    fn attachment_points_expose_conductor_count() {
        let tower = p110();
        assert_eq!(tower.slot(TowerSlot::Circuit1).unwrap().conductor_count(), 3);
        assert_eq!(tower.slot(TowerSlot::Shield1).unwrap().conductor_count(), 1);
    }
}

//! Immutable catalog objects: conductors, insulator strings and tower geometries.
//!
//! Each catalog type is built once from datasheet values and may be derived exactly
//! once into a variant (bundle, multi-unit string, raised tower). Deriving from an
//! already derived object fails with [`LineParamsError::AlreadyDerived`].

/// Conductor and shield-wire electrical description.
pub mod conductor;
/// Insulator units and strings.
pub mod insulator;
/// Tower attachment-point geometry.
pub mod tower;

pub use conductor::ConductorType;
pub use insulator::InsulatorString;
pub use tower::{AttachmentPoints, TowerGeometry, TowerSlot};

use crate::errors::{LineParamsError, Result};

/// Records whether a catalog object was built from datasheet values or derived from one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Derivation {
    /// Built directly from catalog values; may be derived once.
    #[default]
    Base,
    /// Derived from the named parent; cannot be derived again.
    Derived {
        /// Name of the parent object.
        parent: String,
    },
}

impl Derivation {
    /// True when the object was derived from another catalog object.
    #[must_use]
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived { .. })
    }

    /// Name of the parent object, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Base => None,
            Self::Derived { parent } => Some(parent),
        }
    }

    /// Fails unless this is a base object. Returns the derivation state for a child.
    pub(crate) fn derive_from(&self, kind: &'static str, name: &str) -> Result<Self> {
        if self.is_derived() {
            return Err(LineParamsError::AlreadyDerived {
                kind,
                name: name.to_owned(),
            });
        }
        Ok(Self::Derived {
            parent: name.to_owned(),
        })
    }
}

/// Rejects non-finite or non-positive catalog values.
pub(crate) fn require_positive(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LineParamsError::InvalidParameter(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_one_shot() {
        let base = Derivation::Base;
        let child = base.derive_from("tower", "P110").unwrap();
        assert_eq!(child.parent(), Some("P110"));
        assert!(matches!(
            child.derive_from("tower", "P110+5"),
            Err(LineParamsError::AlreadyDerived { kind: "tower", .. })
        ));
    }
}

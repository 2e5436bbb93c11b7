//! Convenience re-exports for building cross-section studies.

pub use crate::catalog::{AttachmentPoints, ConductorType, Derivation, InsulatorString, TowerGeometry, TowerSlot};
pub use crate::config::SectionConfig;
pub use crate::constants::{angular_frequency, reactance_coefficient, NOMINAL_FREQUENCY_HZ, POTENTIAL_COEFFICIENT};
pub use crate::errors::{LineParamsError, Result};
pub use crate::math::{CMatrix, CScalar, Scalar};
pub use crate::report::write_report;
pub use crate::section::{
    Branch, BranchId, BranchKind, BranchSpec, CrossSection, SectionResults, SelfTerms, ShieldGrounding, Suspension,
};

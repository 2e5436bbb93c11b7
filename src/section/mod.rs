//! Branches, mutual coupling and cross-section reduction.

/// Three-phase circuits and shield wires with their self terms.
pub mod branch;
/// Cross-section assembly, Kron reduction and result accessors.
pub mod cross_section;
/// Mutual impedance and potential coefficients between branches.
pub mod mutual;

pub use branch::{conductor_positions, Branch, BranchKind, BranchSpec, SelfTerms, ShieldGrounding, Suspension};
pub use cross_section::{BranchId, CrossSection, SectionResults};
pub use mutual::MutualDistances;

//! Error types shared across the catalog, section and report modules.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum LineParamsError {
    /// A bundle, insulator string or raised tower was derived from an object that is
    /// itself already derived.
    #[error("{kind} '{name}' is already derived and cannot be derived again")]
    AlreadyDerived {
        /// Catalog object kind (conductor, insulator, tower).
        kind: &'static str,
        /// Name of the offending object.
        name: String,
    },
    /// Bundle conductor with a sub-conductor count outside 2..=4.
    #[error("unsupported bundle size {0}: only 2, 3 or 4 sub-conductors have closed forms")]
    UnsupportedBundle(usize),
    /// A catalog value lies outside its admissible range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The requested tower slot is not populated on that tower.
    #[error("tower '{tower}' has no {slot} attachment")]
    UnusedTowerSlot {
        /// Tower name.
        tower: String,
        /// Slot description.
        slot: &'static str,
    },
    /// A logarithm or root received a non-positive or non-finite argument, usually
    /// because of coincident conductors or zero heights.
    #[error("numeric domain error: {quantity} = {value} must be positive and finite")]
    Domain {
        /// Geometric quantity being evaluated.
        quantity: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A reduction or inversion matrix is not invertible.
    #[error("singular matrix: {0}")]
    SingularMatrix(&'static str),
    /// Results were read before `calc()` completed or after the section changed.
    #[error("section '{0}' has no current results; call calc() after attaching all branches")]
    NotCalculated(String),
    /// Results were requested for a grounded shield wire eliminated by the reduction.
    #[error("branch '{0}' is a grounded shield wire and is not part of the reduced system")]
    NotInReducedSystem(String),
    /// The branch handle does not belong to this cross-section.
    #[error("unknown branch handle {0}")]
    UnknownBranch(usize),
    /// Failure writing a report.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, LineParamsError>;

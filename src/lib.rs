#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and frequency-dependent line coefficients.
pub mod constants;
/// Shared numerical utilities (aliases, geometric means, Kron reduction).
pub mod math;
/// Cross-section calculation settings.
pub mod config;
/// Conductor, insulator and tower catalog types.
pub mod catalog;
/// Branches, mutual coupling and cross-section reduction.
pub mod section;
/// Result tables.
pub mod report;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

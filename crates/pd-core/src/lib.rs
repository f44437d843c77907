//! # pd-core
//!
//! Core types, numerical settings, and error definitions for probdist.
//!
//! Every other crate in the workspace builds on the type aliases, the
//! [`Error`] taxonomy and the process-wide [`Settings`] defined here.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Process-wide numerical settings (solver tolerances, iteration caps).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// Signed integer used for the support of discrete distributions.
pub type Integer = i64;

/// A probability in `[0, 1]`.
pub type Probability = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::Settings;

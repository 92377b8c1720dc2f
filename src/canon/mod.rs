//! Canonicalization transforms model constraints into standard form.
//!
//! Every bounded constraint becomes one or two `CanonicalConstraint`s of
//! the form `coefs . vars + residual >= lower`, with the constant offset
//! folded into the bound.

pub mod canonicalizer;
pub mod constraint;

pub use canonicalizer::{canonicalize, check_nonlinear_targets, synthesize_bound_constraints};
pub use constraint::CanonicalConstraint;

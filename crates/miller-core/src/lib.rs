//! Miller flux-surface geometry.
//!
//! Maps the four shaping scalars (A, κ, δ, R0) onto boundary coordinates
//! (R, Z) and derives simple shape diagnostics from the sampled curve.

pub mod geometry;

//! Tolerance defaults for shadow geometry.
//!
//! Policy
//! - Defaults are fixed, absolute constants. They assume occluders measured in
//!   roughly unit-to-thousands scale; very large or very small inputs may need
//!   rescaling by the caller.

/// Turn, parallelism and segment-extent tolerance.
///
/// Near-collinear triples (|cross| below this) count as non-turning.
pub const EPSILON: f64 = 1e-7;

/// Squared distance under which consecutive clip vertices are merged.
pub(crate) const MERGE_EPS: f64 = 1e-7;

/// Size of the stand-in umbra relative to the centered projection, used when
/// the true umbra is empty (light larger than the occluder).
pub const FAKE_UMBRA_SCALE: f64 = 0.05;

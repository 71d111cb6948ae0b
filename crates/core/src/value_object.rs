//! Value object trait: equality by value, not identity.
//!
//! Offers, decisions and per-day figures are value objects: they carry no
//! identity and two with the same fields are interchangeable.

/// Marker trait for value objects.
///
/// Requires `Clone + PartialEq + Debug`. Value objects are immutable; to
/// "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Clamp `value` into `[lo, hi]`, mapping non-finite input to `fallback`.
///
/// `f64::clamp` propagates NaN, which would poison every figure derived from
/// it, so boundary inputs go through here instead.
pub fn clamp_finite(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        return fallback;
    }
    value.clamp(lo, hi)
}

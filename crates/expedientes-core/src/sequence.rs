//! Seeded integer sequence shared with the client portal.
//!
//! The portal renders the same follow-ups from the same seeds, so the formula
//! must stay bit-for-bit identical: `frac(sin(seed + offset) * 10000)` scaled
//! into the inclusive range. Not a source of randomness.

/// Deterministic integer in `[min, max]` for a given `(seed, offset)`.
pub fn seeded_int(seed: i64, min: i64, max: i64, offset: i64) -> i64 {
    let x = ((seed + offset) as f64).sin() * 10000.0;
    let frac = x - x.floor();
    (frac * (max - min + 1) as f64).floor() as i64 + min
}

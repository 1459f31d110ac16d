//! Rounding helpers for derived metrics.

/// Round half up via `floor(f + 0.5)`.
pub fn round(f: f64) -> f64 {
    (f + 0.5).floor()
}

/// Round to `places` decimal places using [`round`].
///
/// For non-negative magnitudes this is round-half-away-from-zero, which is
/// what the app shows on screen (not banker's rounding).
pub fn round_plus(f: f64, places: i32) -> f64 {
    let shift = 10f64.powi(places);
    round(f * shift) / shift
}

//! # Riser Geometry
//!
//! Converts a zone's top floor into a vertical riser run using the
//! building-wide floor heights.
//!
//! ```text
//! to <= 0   ->  0
//! to == 1   ->  h1
//! to >= 2   ->  h1 + (to - 1) * hn
//! ```

/// Cumulative vertical riser length (m) from the base up to floor `to`.
///
/// # Example
///
/// ```rust
/// use riser_core::calculations::geometry::zone_height;
///
/// assert_eq!(zone_height(4.2, 3.0, 0), 0.0);
/// assert_eq!(zone_height(4.2, 3.0, 1), 4.2);
/// assert!((zone_height(4.2, 3.0, 10) - 31.2).abs() < 1e-9);
/// ```
pub fn zone_height(h1: f64, hn: f64, to: i64) -> f64 {
    match to {
        t if t <= 0 => 0.0,
        1 => h1,
        t => h1 + (t - 1) as f64 * hn,
    }
}

//! # Zone Resolver
//!
//! Finds the zone that owns a floor. Every zone covers `1..=to`, so several
//! zones usually cover the same floor; the owner is the narrowest one
//! (smallest `to`). Ties keep input order.

use crate::building::{Section, Zone};

/// Resolve the zone covering `floor` in `section`.
///
/// Returns `None` for floor 0 and for floors above every zone.
///
/// # Example
///
/// ```rust
/// use riser_core::building::{Section, Zone};
/// use riser_core::calculations::zone_resolver::resolve_zone;
///
/// let section = Section::new(20)
///     .with_zone(Zone::new(1, "Upper", 20, 2))
///     .with_zone(Zone::new(2, "Lower", 10, 2));
///
/// assert_eq!(resolve_zone(&section, 7).map(|z| z.id), Some(2));
/// assert_eq!(resolve_zone(&section, 15).map(|z| z.id), Some(1));
/// assert!(resolve_zone(&section, 21).is_none());
/// ```
pub fn resolve_zone(section: &Section, floor: u32) -> Option<&Zone> {
    if floor < 1 {
        return None;
    }
    // min_by_key keeps the first of equal minima
    section
        .zones
        .iter()
        .filter(|zone| zone.to >= floor)
        .min_by_key(|zone| zone.to)
}

/// Whether any zone of `section` covers `floor`
pub fn is_covered(section: &Section, floor: u32) -> bool {
    resolve_zone(section, floor).is_some()
}

//! # Collector Outlet Sizing
//!
//! Auto-sizes the collector model of a zone: the largest number of
//! apartments a single riser has to serve on any residential floor of the
//! zone.

use crate::building::{Section, Zone};

/// Number of collector outlets needed for `zone` (always >= 1).
///
/// For each floor `f` in `2..=min(zone.to, section.floors)` the per-floor
/// need is `ceil(apartments(f) / max(1, risers))`; the result is the
/// maximum, with a floor of 1.
///
/// # Example
///
/// ```rust
/// use riser_core::building::{Section, Zone};
/// use riser_core::calculations::outlets::auto_outlet_count;
///
/// let section = Section::new(6)
///     .with_apartments_range(2..=6, 5)
///     .with_apartments(4, 7);
/// let zone = Zone::new(1, "Z", 6, 2);
///
/// assert_eq!(auto_outlet_count(&section, &zone), 4);
/// ```
pub fn auto_outlet_count(section: &Section, zone: &Zone) -> u32 {
    let top = zone.effective_top(section);
    let risers = zone.effective_risers();

    (2..=top)
        .map(|floor| section.apartments_on(floor).div_ceil(risers))
        .fold(1, u32::max)
}

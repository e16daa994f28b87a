//! # Floor Distribution
//!
//! Splits the units of one floor across the risers of its zone. Each riser
//! feeds one floor collector whose outlet count equals the units it serves.
//!
//! ```text
//! base = units / risers, rem = units % risers
//! risers 0..rem get base + 1, the rest get base
//! ```
//!
//! Risers that end up with zero units carry no collector and are dropped.
//! Two consumers then apply different minimums:
//!
//! - [`OutletPolicy::Summary`]: the descriptive floor table shows the raw
//!   count, so a single apartment reads "1×1 вых."
//! - [`OutletPolicy::Collector`]: procurement clamps every collector to at
//!   least 2 outlets, the smallest catalog part.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::zone_resolver::resolve_zone;
use crate::building::Section;

/// Smallest floor collector in the catalog
pub const MIN_COLLECTOR_OUTLETS: u32 = 2;

/// Split `units` across `risers`; the result has exactly `risers` entries.
///
/// # Example
///
/// ```rust
/// use riser_core::calculations::distribution::distribute;
///
/// assert_eq!(distribute(7, 2), vec![4, 3]);
/// assert_eq!(distribute(1, 3), vec![1, 0, 0]);
/// ```
pub fn distribute(units: u32, risers: u32) -> Vec<u32> {
    if risers == 0 {
        return Vec::new();
    }
    let base = units / risers;
    let rem = units % risers;
    (0..risers).map(|i| if i < rem { base + 1 } else { base }).collect()
}

/// Minimum-outlet policy applied after zero risers are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutletPolicy {
    /// Descriptive summary: counts as distributed
    Summary,
    /// Physical collectors: at least [`MIN_COLLECTOR_OUTLETS`]
    Collector,
}

impl OutletPolicy {
    fn apply(self, outlets: u32) -> u32 {
        match self {
            OutletPolicy::Summary => outlets,
            OutletPolicy::Collector => outlets.max(MIN_COLLECTOR_OUTLETS),
        }
    }
}

/// Per-riser outlet counts with zero risers dropped and `policy` applied.
///
/// # Example
///
/// ```rust
/// use riser_core::calculations::distribution::{riser_outlets, OutletPolicy};
///
/// assert_eq!(riser_outlets(1, 3, OutletPolicy::Summary), vec![1]);
/// assert_eq!(riser_outlets(1, 3, OutletPolicy::Collector), vec![2]);
/// ```
pub fn riser_outlets(units: u32, risers: u32, policy: OutletPolicy) -> Vec<u32> {
    distribute(units, risers)
        .into_iter()
        .filter(|&outlets| outlets > 0)
        .map(|outlets| policy.apply(outlets))
        .collect()
}

/// Compact collector summary for the floor table, e.g. `"2×3 вых. + 1×2 вых."`.
///
/// Groups are ordered by outlet count, largest first. Returns `"—"` when no
/// riser carries any unit.
pub fn format_collectors(units: u32, risers: u32) -> String {
    let mut groups: BTreeMap<u32, u32> = BTreeMap::new();
    for outlets in riser_outlets(units, risers, OutletPolicy::Summary) {
        *groups.entry(outlets).or_default() += 1;
    }
    if groups.is_empty() {
        return "—".to_string();
    }
    groups
        .iter()
        .rev()
        .map(|(outlets, count)| format!("{count}×{outlets} вых."))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Outlet count -> number of collectors, ordered by outlet count.
pub type CollectorTally = BTreeMap<u32, u64>;

/// Physical floor collectors of one section.
///
/// Walks floors `2..=max(floors, highest occupied floor)`; floors without
/// apartments or without a covering zone contribute nothing.
pub fn section_collectors(section: &Section) -> CollectorTally {
    let mut tally = CollectorTally::new();
    let top = section.floors.max(section.highest_occupied_floor());

    for floor in 2..=top {
        let apartments = section.apartments_on(floor);
        if apartments == 0 {
            continue;
        }
        let Some(zone) = resolve_zone(section, floor) else {
            continue;
        };
        for outlets in riser_outlets(apartments, zone.effective_risers(), OutletPolicy::Collector) {
            *tally.entry(outlets).or_default() += 1;
        }
    }
    tally
}

/// Collector tallies per section and for the whole building.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectorSummary {
    /// One tally per section, in section order (possibly empty)
    pub per_section: Vec<CollectorTally>,
    /// Building-wide tally
    pub overall: CollectorTally,
}

impl CollectorSummary {
    /// Total number of collectors in the building
    pub fn total(&self) -> u64 {
        self.overall.values().sum()
    }
}

/// Tally floor collectors over all sections.
pub fn collector_summary(sections: &[Section]) -> CollectorSummary {
    let per_section: Vec<CollectorTally> = sections.iter().map(section_collectors).collect();
    let mut overall = CollectorTally::new();
    for tally in &per_section {
        for (&outlets, &count) in tally {
            *overall.entry(outlets).or_default() += count;
        }
    }
    CollectorSummary { per_section, overall }
}

/// Catalog name of a collector, with Russian plural agreement on "выход".
///
/// # Example
///
/// ```rust
/// use riser_core::calculations::distribution::collector_name;
///
/// assert_eq!(collector_name(2), "Коллектор на 2 выхода");
/// assert_eq!(collector_name(5), "Коллектор на 5 выходов");
/// assert_eq!(collector_name(21), "Коллектор на 21 выход");
/// ```
pub fn collector_name(outlets: u32) -> String {
    format!("Коллектор на {outlets} выход{}", outlets_suffix(outlets))
}

fn outlets_suffix(n: u32) -> &'static str {
    let abs = n % 100;
    let last = abs % 10;
    if (11..20).contains(&abs) {
        "ов"
    } else if last == 1 {
        ""
    } else if (2..=4).contains(&last) {
        "а"
    } else {
        "ов"
    }
}

//! # Riser Aggregation
//!
//! Aggregates riser lengths and counts per section × system × diameter and
//! building-wide per system × diameter.
//!
//! For every (section, zone):
//!
//! ```text
//! to            = min(zone.to, section.floors)
//! len_one_riser = zone_height(h1, hn, to)
//! len_all       = len_one_riser * max(1, zone.risers)
//! ```
//!
//! `len_all` and the riser count are added to every system whose fixed
//! diameter is set. The grand total adds `len_all` once per zone whether or
//! not any diameter is set.
//!
//! Rows are ordered by section, then `V1 < T3 < T4`, then diameter; this
//! falls out of the `BTreeMap` key order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::zone_height;
use crate::building::{Section, Zone};
use crate::catalog::System;

/// Vertical run of one zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRun {
    /// Top floor clipped to the section height
    pub to: u32,
    /// Risers per section (>= 1)
    pub risers: u32,
    /// Length of a single riser (m)
    pub one_riser_m: f64,
    /// Length of all risers of the zone (m)
    pub all_risers_m: f64,
}

impl ZoneRun {
    /// Compute the run of `zone` inside `section`.
    pub fn of(section: &Section, zone: &Zone, h1: f64, hn: f64) -> Self {
        let to = zone.effective_top(section);
        let risers = zone.effective_risers();
        let one_riser_m = zone_height(h1, hn, i64::from(to));
        ZoneRun {
            to,
            risers,
            one_riser_m,
            all_risers_m: one_riser_m * f64::from(risers),
        }
    }
}

/// Running length and riser count for one grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiserTally {
    /// Total pipe length (m)
    pub length_m: f64,
    /// Number of risers
    pub riser_count: u64,
}

impl RiserTally {
    fn add(&mut self, run: &ZoneRun) {
        self.length_m += run.all_risers_m;
        self.riser_count += u64::from(run.risers);
    }
}

/// One row of the per-section table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRiserRow {
    pub section_index: usize,
    pub system: System,
    /// Diameter (mm)
    pub diameter: u32,
    /// Riser count
    pub count: u64,
    /// Total length (m)
    pub length_m: f64,
}

/// One row of the building-wide table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRiserRow {
    pub system: System,
    /// Diameter (mm)
    pub diameter: u32,
    /// Riser count
    pub count: u64,
    /// Total length (m)
    pub length_m: f64,
}

/// Both accumulation levels plus the grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiserAggregate {
    /// Sorted by section, system, diameter
    pub by_section: Vec<SectionRiserRow>,
    /// Sorted by system, diameter
    pub overall: Vec<OverallRiserRow>,
    /// Sum of all-riser lengths over every (section, zone) (m)
    pub grand_total_length_m: f64,
}

impl RiserAggregate {
    /// Total riser count of one system over the whole building
    pub fn risers_of(&self, system: System) -> u64 {
        self.overall
            .iter()
            .filter(|row| row.system == system)
            .map(|row| row.count)
            .sum()
    }
}

/// Aggregate riser lengths and counts over all sections.
///
/// # Example
///
/// ```rust
/// use riser_core::building::{Section, Zone};
/// use riser_core::calculations::risers::aggregate_risers;
/// use riser_core::catalog::System;
///
/// let sections = vec![
///     Section::new(5).with_zone(Zone::new(1, "Z1", 5, 2).with_diameters(32, 25, 0)),
/// ];
/// let agg = aggregate_risers(&sections, 4.0, 3.0);
///
/// // (4 + 4 * 3) * 2 risers
/// assert_eq!(agg.grand_total_length_m, 32.0);
/// assert_eq!(agg.by_section.len(), 2);
/// assert_eq!(agg.by_section[0].system, System::V1);
/// ```
pub fn aggregate_risers(sections: &[Section], h1: f64, hn: f64) -> RiserAggregate {
    let mut by_section: BTreeMap<(usize, System, u32), RiserTally> = BTreeMap::new();
    let mut overall: BTreeMap<(System, u32), RiserTally> = BTreeMap::new();
    let mut grand_total_length_m = 0.0;

    for (si, section) in sections.iter().enumerate() {
        for zone in &section.zones {
            let run = ZoneRun::of(section, zone, h1, hn);
            grand_total_length_m += run.all_risers_m;

            for (system, dia) in zone.fixed_d.iter_set() {
                by_section.entry((si, system, dia)).or_default().add(&run);
                overall.entry((system, dia)).or_default().add(&run);
            }
        }
    }

    tracing::debug!(
        groups = by_section.len(),
        grand_total_length_m,
        "aggregated risers"
    );

    RiserAggregate {
        by_section: by_section
            .into_iter()
            .map(|((section_index, system, diameter), tally)| SectionRiserRow {
                section_index,
                system,
                diameter,
                count: tally.riser_count,
                length_m: tally.length_m,
            })
            .collect(),
        overall: overall
            .into_iter()
            .map(|((system, diameter), tally)| OverallRiserRow {
                system,
                diameter,
                count: tally.riser_count,
                length_m: tally.length_m,
            })
            .collect(),
        grand_total_length_m,
    }
}

/// Re-derive the building-wide table from per-section rows.
pub fn overall_from_sections(rows: &[SectionRiserRow]) -> Vec<OverallRiserRow> {
    let mut overall: BTreeMap<(System, u32), RiserTally> = BTreeMap::new();
    for row in rows {
        let tally = overall.entry((row.system, row.diameter)).or_default();
        tally.length_m += row.length_m;
        tally.riser_count += row.count;
    }
    overall
        .into_iter()
        .map(|((system, diameter), tally)| OverallRiserRow {
            system,
            diameter,
            count: tally.riser_count,
            length_m: tally.length_m,
        })
        .collect()
}

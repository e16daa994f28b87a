//! # Zone Summary
//!
//! One row per (section, zone): floor range, apartments and rent inside the
//! zone, riser run, diameters, album and the materialized KUU BOM.
//!
//! Every zone starts at floor 1, so overlapping zones each count the
//! apartments of the shared floors.

use serde::{Deserialize, Serialize};

use super::bom::{materialize_bom, BomLine, BomParams};
use super::outlets::auto_outlet_count;
use super::risers::ZoneRun;
use crate::building::{CalcSettings, FixedDiameters, Section, Zone};
use crate::catalog::AlbumType;

/// Per-zone summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRow {
    pub section_index: usize,
    pub zone_id: u64,
    pub zone_name: String,
    /// First floor of the zone (always 1)
    pub from: u32,
    /// Top floor clipped to the section height
    pub to: u32,
    /// Apartments on floors `2..=to`
    pub apts_in_zone: u64,
    /// Rent units on floor 1 (when enabled and `to >= 1`)
    pub rent_in_zone: u64,
    pub risers_per_section: u32,
    pub diameters: FixedDiameters,
    /// Single riser length (m)
    pub zone_height_m: f64,
    /// All risers of the zone (m)
    pub all_risers_length_m: f64,
    pub album_type: AlbumType,
    pub album_name: String,
    /// Auto-sized collector outlet count
    pub n_auto: u32,
    pub bom: Vec<BomLine>,
}

/// Build the zone summary for every (section, zone) in input order.
pub fn compute_zones(sections: &[Section], settings: &CalcSettings) -> Vec<ZoneRow> {
    sections
        .iter()
        .enumerate()
        .flat_map(|(si, section)| {
            section
                .zones
                .iter()
                .map(move |zone| zone_row(si, section, zone, settings))
        })
        .collect()
}

fn zone_row(section_index: usize, section: &Section, zone: &Zone, settings: &CalcSettings) -> ZoneRow {
    let run = ZoneRun::of(section, zone, settings.h1, settings.hn);

    let apts_in_zone: u64 = (2..=run.to).map(|f| u64::from(section.apartments_on(f))).sum();
    let rent_in_zone = if run.to >= 1 {
        u64::from(section.rent_units())
    } else {
        0
    };

    let n_auto = auto_outlet_count(section, zone);
    let bom = materialize_bom(
        zone.album_type,
        apts_in_zone,
        BomParams {
            n: n_auto,
            ivpt_enabled: settings.ivpt_enabled,
        },
    );

    ZoneRow {
        section_index,
        zone_id: zone.id,
        zone_name: zone.name.clone(),
        from: 1,
        to: run.to,
        apts_in_zone,
        rent_in_zone,
        risers_per_section: run.risers,
        diameters: zone.fixed_d,
        zone_height_m: run.one_riser_m,
        all_risers_length_m: run.all_risers_m,
        album_type: zone.album_type,
        album_name: zone.album_type.display_name().to_string(),
        n_auto,
        bom,
    }
}

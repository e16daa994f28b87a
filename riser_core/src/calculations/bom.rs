//! # KUU Bill of Materials
//!
//! Expands an album template into concrete line items for one zone and
//! rolls the zone BOMs up into specifications per section and per building.
//!
//! ## Rules
//!
//! - `{n}` in an item name becomes `max(1, n)`
//! - `qty = qty_per_apartment * apartments_in_zone`
//! - with fire suppression enabled and apartments > 0, two fixed items are
//!   appended after the template rows: the fire-suppression device, then a
//!   DN15 ball valve, each with `qty = apartments_in_zone`
//! - an empty template yields an empty BOM (not an error)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::zones::ZoneRow;
use crate::catalog::albums::OUTLETS_PLACEHOLDER;
use crate::catalog::AlbumType;

/// Fire-suppression device appended when ВКП is enabled
pub const IVPT_DEVICE: &str = "устройство внутриквартирного пожаротушения";

/// Ball valve for the fire-suppression device
pub const IVPT_VALVE: &str = "кран шаровый Ду 15";

/// Placeholder row name for zones without BOM items
pub const EMPTY_BOM_PLACEHOLDER: &str = "(состав не задан)";

/// Materialization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomParams {
    /// Collector outlet count substituted into `{n}`
    pub n: u32,
    /// In-apartment fire suppression enabled
    pub ivpt_enabled: bool,
}

/// One concrete BOM line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub name: String,
    pub unit: String,
    pub qty: u64,
}

/// Expand the template of `album` for a zone with `apartments` apartments.
///
/// # Example
///
/// ```rust
/// use riser_core::calculations::bom::{materialize_bom, BomParams};
/// use riser_core::catalog::AlbumType;
///
/// let params = BomParams { n: 4, ivpt_enabled: true };
/// let bom = materialize_bom(AlbumType::Collector, 10, params);
///
/// assert_eq!(bom.len(), 9);
/// assert!(bom.iter().any(|l| l.name == "Коллектор на 4 подключений"));
/// assert_eq!(bom[7].qty, 10);
/// assert_eq!(bom[8].qty, 10);
/// ```
pub fn materialize_bom(album: AlbumType, apartments: u64, params: BomParams) -> Vec<BomLine> {
    let n = params.n.max(1).to_string();

    let mut bom: Vec<BomLine> = album
        .template()
        .iter()
        .map(|entry| BomLine {
            name: entry.name_template.replacen(OUTLETS_PLACEHOLDER, &n, 1),
            unit: entry.unit.clone(),
            qty: entry.qty_per_apartment * apartments,
        })
        .collect();

    if params.ivpt_enabled && apartments > 0 {
        bom.push(pieces(IVPT_DEVICE, apartments));
        bom.push(pieces(IVPT_VALVE, apartments));
    }
    bom
}

fn pieces(name: &str, qty: u64) -> BomLine {
    BomLine {
        name: name.to_string(),
        unit: "шт".to_string(),
        qty,
    }
}

/// One row of a section specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpecRow {
    pub section_index: usize,
    pub name: String,
    pub unit: String,
    pub qty: u64,
}

/// Specifications summed per section and building-wide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecAggregates {
    /// Ordered by section, then name, then unit
    pub per_section: Vec<SectionSpecRow>,
    /// Ordered by name, then unit
    pub overall: Vec<BomLine>,
}

/// Sum zone BOMs by `(name, unit)` per section and for the whole building.
pub fn aggregate_specs(zones: &[ZoneRow], section_count: usize) -> SpecAggregates {
    let mut per_section: Vec<BTreeMap<(String, String), u64>> = vec![BTreeMap::new(); section_count];
    let mut overall: BTreeMap<(String, String), u64> = BTreeMap::new();

    for zone in zones {
        for line in &zone.bom {
            let key = (line.name.clone(), line.unit.clone());
            if let Some(section) = per_section.get_mut(zone.section_index) {
                *section.entry(key.clone()).or_default() += line.qty;
            }
            *overall.entry(key).or_default() += line.qty;
        }
    }

    SpecAggregates {
        per_section: per_section
            .into_iter()
            .enumerate()
            .flat_map(|(section_index, lines)| {
                lines.into_iter().map(move |((name, unit), qty)| SectionSpecRow {
                    section_index,
                    name,
                    unit,
                    qty,
                })
            })
            .collect(),
        overall: overall
            .into_iter()
            .map(|((name, unit), qty)| BomLine { name, unit, qty })
            .collect(),
    }
}

/// Flat BOM row for spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomExportRow {
    pub section_index: usize,
    pub zone_name: String,
    pub album_name: String,
    pub n_auto: u32,
    pub name: String,
    pub unit: String,
    /// `None` for the placeholder row of an empty BOM
    pub qty: Option<u64>,
}

/// One row per BOM line per zone; empty BOMs get a single placeholder row.
pub fn bom_export_rows(zones: &[ZoneRow]) -> Vec<BomExportRow> {
    let mut rows = Vec::new();
    for zone in zones {
        let row = |name: &str, unit: &str, qty: Option<u64>| BomExportRow {
            section_index: zone.section_index,
            zone_name: zone.zone_name.clone(),
            album_name: zone.album_name.clone(),
            n_auto: zone.n_auto,
            name: name.to_string(),
            unit: unit.to_string(),
            qty,
        };

        if zone.bom.is_empty() {
            rows.push(row(EMPTY_BOM_PLACEHOLDER, "", None));
        } else {
            rows.extend(zone.bom.iter().map(|line| row(&line.name, &line.unit, Some(line.qty))));
        }
    }
    rows
}

/// Apartments per album type; every album is present, possibly with 0.
pub fn apartments_by_album(zones: &[ZoneRow]) -> BTreeMap<AlbumType, u64> {
    let mut totals: BTreeMap<AlbumType, u64> = AlbumType::ALL.iter().map(|&a| (a, 0)).collect();
    for zone in zones {
        *totals.entry(zone.album_type).or_default() += zone.apts_in_zone;
    }
    totals
}

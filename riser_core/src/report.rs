//! # Building Report
//!
//! Runs every calculator over one building snapshot and collects the
//! output records in a single serializable [`BuildingReport`].
//!
//! The report depends only on the snapshot and the constants, so running
//! [`calculate`] twice on the same input yields equal reports.
//!
//! ## Example
//!
//! ```rust
//! use riser_core::building::{Building, Section, Zone};
//! use riser_core::catalog::EngineConstants;
//! use riser_core::report::calculate;
//!
//! let mut building = Building::new("Block A");
//! building.sections.push(
//!     Section::new(9)
//!         .with_apartments_range(2..=9, 6)
//!         .with_zone(Zone::new(1, "Zone 1", 9, 2).with_diameters(32, 32, 25)),
//! );
//!
//! let report = calculate(&building, &EngineConstants::default())?;
//! assert_eq!(report.total_apartments, 48);
//! assert_eq!(report.floors.len(), 9);
//! assert!(report.warnings.is_empty());
//! # Ok::<(), riser_core::errors::CalcError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::building::{Building, CalcSettings};
use crate::calculations::bom::{aggregate_specs, apartments_by_album, bom_export_rows, BomExportRow, SpecAggregates};
use crate::calculations::corridor::{corridor_pex_length, corridor_totals, CorridorPex, CorridorTotals};
use crate::calculations::distribution::{collector_summary, CollectorSummary};
use crate::calculations::fittings::{compute_fittings, FittingInputs, FittingsReport};
use crate::calculations::floors::{compute_floors, FloorRow};
use crate::calculations::risers::{aggregate_risers, RiserAggregate};
use crate::calculations::zones::{compute_zones, ZoneRow};
use crate::catalog::{AlbumType, EngineConstants};
use crate::errors::{CalcResult, CalcWarning};

/// All output records of one calculation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingReport {
    /// Building name copied from the snapshot
    pub building_name: String,
    /// Settings the pass ran with
    pub settings: CalcSettings,

    pub floors: Vec<FloorRow>,
    pub warnings: Vec<CalcWarning>,
    pub zones: Vec<ZoneRow>,
    pub risers: RiserAggregate,

    /// Apartments per album type
    pub album_totals: BTreeMap<AlbumType, u64>,
    pub specs: SpecAggregates,
    pub bom_rows: Vec<BomExportRow>,

    pub collectors: CollectorSummary,
    pub fittings: FittingsReport,

    /// One entry per section, in section order
    pub corridor: Vec<CorridorPex>,
    pub corridor_totals: CorridorTotals,

    pub total_apartments: u64,
    pub total_rent_units: u64,
}

/// Validate `building` and run every calculation stage.
///
/// # Errors
///
/// Returns [`CalcError::InvalidInput`](crate::errors::CalcError::InvalidInput)
/// when the snapshot fails structural validation. Nothing past validation
/// can fail.
#[instrument(skip_all, fields(building = %building.meta.name, sections = building.sections.len()))]
pub fn calculate(building: &Building, constants: &EngineConstants) -> CalcResult<BuildingReport> {
    building.validate_with(constants)?;

    let sections = building.sections.as_slice();
    let settings = building.settings;
    let total_apartments = building.total_apartments();
    let total_rent_units = building.total_rent_units();

    let (floors, warnings) = compute_floors(sections);

    let zones = compute_zones(sections, &settings);
    tracing::debug!(zones = zones.len(), "computed zone rows");

    let risers = aggregate_risers(sections, settings.h1, settings.hn);

    let album_totals = apartments_by_album(&zones);
    let specs = aggregate_specs(&zones, sections.len());
    let bom_rows = bom_export_rows(&zones);
    tracing::debug!(spec_lines = specs.overall.len(), bom_rows = bom_rows.len(), "aggregated specifications");

    let collectors = collector_summary(sections);
    let fittings = compute_fittings(FittingInputs {
        zones: &zones,
        collectors: &collectors.overall,
        total_apartments,
        total_rent_units,
        ivpt_enabled: settings.ivpt_enabled,
    });
    tracing::debug!(collectors = collectors.total(), "counted fittings");

    let corridor: Vec<CorridorPex> = sections
        .iter()
        .map(|section| corridor_pex_length(section, &constants.corridor))
        .collect();
    let corridor_totals = corridor_totals(&corridor);
    tracing::debug!(
        total_v1_m = corridor_totals.total_v1_m,
        total_t3_m = corridor_totals.total_t3_m,
        "computed corridor runs"
    );

    Ok(BuildingReport {
        building_name: building.meta.name.clone(),
        settings,
        floors,
        warnings,
        zones,
        risers,
        album_totals,
        specs,
        bom_rows,
        collectors,
        fittings,
        corridor,
        corridor_totals,
        total_apartments,
        total_rent_units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::{Section, Zone};
    use crate::catalog::System;

    fn sample_building() -> Building {
        let mut building = Building::new("Sample");
        building.settings = CalcSettings {
            h1: 4.0,
            hn: 3.0,
            ivpt_enabled: true,
        };
        building.sections.push(
            Section::new(10)
                .with_apartments_range(2..=10, 6)
                .with_rent(4)
                .with_zone(Zone::new(1, "Low", 5, 2).with_diameters(32, 32, 25))
                .with_zone(Zone::new(2, "High", 10, 2).with_diameters(40, 40, 32)),
        );
        building.sections.push(
            Section::new(6)
                .with_apartments_range(2..=6, 4)
                .with_corridor(20.0, 0.0)
                .with_zone(Zone::new(1, "All", 6, 1).with_diameters(32, 25, 20).with_album(AlbumType::PreApt)),
        );
        building
    }

    #[test]
    fn test_full_pass() {
        let report = calculate(&sample_building(), &EngineConstants::default()).unwrap();

        assert_eq!(report.building_name, "Sample");
        assert_eq!(report.total_apartments, 54 + 20);
        assert_eq!(report.total_rent_units, 4);
        assert_eq!(report.floors.len(), 10);
        assert!(report.warnings.is_empty());
        assert_eq!(report.zones.len(), 3);
        assert_eq!(report.corridor.len(), 2);
        assert_eq!(report.collectors.per_section.len(), 2);

        assert_eq!(report.album_totals[&AlbumType::Collector], 24 + 54);
        assert_eq!(report.album_totals[&AlbumType::PreApt], 20);
        assert_eq!(report.risers.risers_of(System::V1), 5);
    }

    #[test]
    fn test_fittings_use_building_totals() {
        let report = calculate(&sample_building(), &EngineConstants::default()).unwrap();
        let meters = &report.fittings.water_meters;
        assert_eq!(meters.len(), 1);
        assert_eq!(meters[0].qty, 2 * (74 + 4));
        assert_eq!(report.fittings.fire_suppression[0].qty, 74);
    }

    #[test]
    fn test_corridor_totals() {
        let report = calculate(&sample_building(), &EngineConstants::default()).unwrap();
        // 54 * (7.5 + 1.8) + 20 * (10 + 1.8)
        assert!((report.corridor_totals.total_v1_m - 738.2).abs() < 1e-9);
        assert_eq!(report.corridor_totals.total_v1_m, report.corridor_totals.total_t3_m);
    }

    #[test]
    fn test_idempotent() {
        let building = sample_building();
        let constants = EngineConstants::default();
        let first = calculate(&building, &constants).unwrap();
        let second = calculate(&building, &constants).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_building_rejected() {
        let mut building = sample_building();
        building.sections[1].floors = 0;
        let err = calculate(&building, &EngineConstants::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_oversized_section_rejected_before_calculation() {
        let mut building = sample_building();
        building.sections.push(Section::new(u32::MAX).with_zone(Zone::new(1, "Z", 5, 1)));
        let err = calculate(&building, &EngineConstants::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_uncovered_floors_reported() {
        let mut building = Building::new("Gaps");
        building
            .sections
            .push(Section::new(4).with_apartments_range(2..=4, 2).with_zone(Zone::new(1, "Z", 2, 1)));
        let report = calculate(&building, &EngineConstants::default()).unwrap();
        assert_eq!(
            report.warnings,
            vec![
                CalcWarning::UncoveredFloor { floor: 3 },
                CalcWarning::UncoveredFloor { floor: 4 },
            ]
        );
    }

    #[test]
    fn test_empty_building() {
        let report = calculate(&Building::new("Empty"), &EngineConstants::default()).unwrap();
        assert!(report.floors.is_empty());
        assert!(report.zones.is_empty());
        assert!(report.fittings.is_empty());
        assert_eq!(report.corridor_totals, CorridorTotals::default());
    }
}

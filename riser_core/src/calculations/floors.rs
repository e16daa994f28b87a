//! # Floor Table
//!
//! One row per floor `1..=max(section.floors)` with a cell per section:
//! owning zone, its fixed diameters and the compact collector summary.
//!
//! Floor 1 counts rent units (when enabled) instead of apartments. A floor
//! that carries apartments or rent while no section has a covering zone
//! yields a [`CalcWarning::UncoveredFloor`].

use serde::{Deserialize, Serialize};

use super::distribution::format_collectors;
use super::zone_resolver::{is_covered, resolve_zone};
use crate::building::{FixedDiameters, Section, Zone};
use crate::errors::CalcWarning;

/// Placeholder for empty cells
pub const EMPTY_CELL: &str = "—";

/// Per-section cell of a floor row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFloorCell {
    /// e.g. `"Zone 1 (1–9)"`
    pub zone_label: String,
    /// e.g. `"В1 32 мм/Т3 32 мм/Т4 —"`
    pub diameters_label: String,
    /// e.g. `"2×3 вых. + 1×2 вых."`
    pub collectors_label: String,
}

impl SectionFloorCell {
    fn uncovered() -> Self {
        SectionFloorCell {
            zone_label: EMPTY_CELL.to_string(),
            diameters_label: EMPTY_CELL.to_string(),
            collectors_label: EMPTY_CELL.to_string(),
        }
    }

    fn covered(zone: &Zone, units: u32) -> Self {
        SectionFloorCell {
            zone_label: zone_label(zone),
            diameters_label: diameters_label(&zone.fixed_d),
            collectors_label: format_collectors(units, zone.effective_risers()),
        }
    }
}

/// One row of the floor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRow {
    pub floor: u32,
    /// One cell per section, in section order
    pub sections_info: Vec<SectionFloorCell>,
    /// Apartments on this floor over all sections (0 on floor 1)
    pub apts_total: u64,
    /// Rent units over all sections (floor 1 only)
    pub rent_total: u64,
    /// Sum of risers of the covering zones
    pub risers_total_at_floor: u64,
}

/// Zone label as shown in the floor table.
pub fn zone_label(zone: &Zone) -> String {
    format!("{} (1–{})", zone.name, zone.to)
}

/// Diameters label, `—` for unset systems.
///
/// # Example
///
/// ```rust
/// use riser_core::building::FixedDiameters;
/// use riser_core::calculations::floors::diameters_label;
///
/// let d = FixedDiameters { v1: 32, t3: 25, t4: 0 };
/// assert_eq!(diameters_label(&d), "В1 32 мм/Т3 25 мм/Т4 —");
/// ```
pub fn diameters_label(d: &FixedDiameters) -> String {
    let fmt = |dia: u32| {
        if dia > 0 {
            format!("{dia} мм")
        } else {
            EMPTY_CELL.to_string()
        }
    };
    format!("В1 {}/Т3 {}/Т4 {}", fmt(d.v1), fmt(d.t3), fmt(d.t4))
}

/// Units fed by collectors on `floor`: rent on floor 1, apartments above.
fn units_on(section: &Section, floor: u32) -> u32 {
    if floor == 1 {
        section.rent_units()
    } else {
        section.apartments_on(floor)
    }
}

/// Build the floor table and collect coverage warnings.
pub fn compute_floors(sections: &[Section]) -> (Vec<FloorRow>, Vec<CalcWarning>) {
    let max_floors = sections.iter().map(|s| s.floors).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(max_floors as usize);
    let mut warnings = Vec::new();

    for floor in 1..=max_floors {
        let mut apts_total = 0u64;
        let mut rent_total = 0u64;
        let mut risers_total_at_floor = 0u64;

        let sections_info = sections
            .iter()
            .map(|section| {
                if floor == 1 {
                    rent_total += u64::from(section.rent_units());
                } else {
                    apts_total += u64::from(section.apartments_on(floor));
                }

                match resolve_zone(section, floor) {
                    Some(zone) => {
                        risers_total_at_floor += u64::from(zone.effective_risers());
                        SectionFloorCell::covered(zone, units_on(section, floor))
                    }
                    None => SectionFloorCell::uncovered(),
                }
            })
            .collect();

        let has_units = apts_total > 0 || rent_total > 0;
        if has_units && !sections.iter().any(|s| is_covered(s, floor)) {
            tracing::warn!(floor, apts_total, rent_total, "floor is not covered by any zone");
            warnings.push(CalcWarning::UncoveredFloor { floor });
        }

        rows.push(FloorRow {
            floor,
            sections_info,
            apts_total,
            rent_total,
            risers_total_at_floor,
        });
    }

    tracing::debug!(floors = rows.len(), warnings = warnings.len(), "computed floor table");
    (rows, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        vec![
            Section::new(4)
                .with_apartments_range(2..=4, 5)
                .with_rent(3)
                .with_zone(Zone::new(1, "Z1", 4, 2).with_diameters(32, 32, 25)),
            Section::new(6)
                .with_apartments_range(2..=6, 1)
                .with_zone(Zone::new(1, "Low", 3, 3).with_diameters(25, 0, 0))
                .with_zone(Zone::new(2, "High", 6, 1)),
        ]
    }

    #[test]
    fn test_row_per_floor() {
        let (rows, warnings) = compute_floors(&sections());
        assert_eq!(rows.len(), 6);
        assert!(warnings.is_empty());
        assert_eq!(rows.iter().map(|r| r.floor).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert!(rows.iter().all(|r| r.sections_info.len() == 2));
    }

    #[test]
    fn test_floor_one_uses_rent() {
        let (rows, _) = compute_floors(&sections());
        let first = &rows[0];
        assert_eq!(first.apts_total, 0);
        assert_eq!(first.rent_total, 3);
        // 3 rent units over 2 risers
        assert_eq!(first.sections_info[0].collectors_label, "1×2 вых. + 1×1 вых.");
        // no rent in section 1
        assert_eq!(first.sections_info[1].collectors_label, "—");
    }

    #[test]
    fn test_cells() {
        let (rows, _) = compute_floors(&sections());
        let second = &rows[1];
        assert_eq!(second.apts_total, 6);
        assert_eq!(second.risers_total_at_floor, 5);

        let a = &second.sections_info[0];
        assert_eq!(a.zone_label, "Z1 (1–4)");
        assert_eq!(a.diameters_label, "В1 32 мм/Т3 32 мм/Т4 25 мм");
        assert_eq!(a.collectors_label, "1×3 вых. + 1×2 вых.");

        let b = &second.sections_info[1];
        assert_eq!(b.zone_label, "Low (1–3)");
        assert_eq!(b.diameters_label, "В1 25 мм/Т3 —/Т4 —");
        // single apartment over 3 risers is shown unclamped
        assert_eq!(b.collectors_label, "1×1 вых.");
    }

    #[test]
    fn test_cells_above_section_height() {
        let (rows, _) = compute_floors(&sections());
        let fifth = &rows[4];
        assert_eq!(fifth.sections_info[0], SectionFloorCell::uncovered());
        assert_eq!(fifth.sections_info[1].zone_label, "High (1–6)");
        assert_eq!(fifth.risers_total_at_floor, 1);
    }

    #[test]
    fn test_uncovered_floor_warning() {
        let section = Section::new(5)
            .with_apartments_range(2..=5, 4)
            .with_zone(Zone::new(1, "Z", 3, 1));
        let (rows, warnings) = compute_floors(&[section]);
        assert_eq!(
            warnings,
            vec![
                CalcWarning::UncoveredFloor { floor: 4 },
                CalcWarning::UncoveredFloor { floor: 5 },
            ]
        );
        assert_eq!(rows[3].risers_total_at_floor, 0);
        assert_eq!(rows[3].sections_info[0].zone_label, "—");
    }

    #[test]
    fn test_empty_uncovered_floor_is_silent() {
        let section = Section::new(5)
            .with_apartments_range(2..=3, 4)
            .with_zone(Zone::new(1, "Z", 3, 1));
        let (_, warnings) = compute_floors(&[section]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_no_sections() {
        let (rows, warnings) = compute_floors(&[]);
        assert!(rows.is_empty());
        assert!(warnings.is_empty());
    }
}

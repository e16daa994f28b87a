//! # Building Model
//!
//! The `Building` struct is the root container of one calculation snapshot.
//! It is produced by the external editor and treated as read-only by every
//! calculator.
//!
//! ## Structure
//!
//! ```text
//! Building
//! ├── meta: BuildingMetadata (schema version, name, timestamps)
//! ├── settings: CalcSettings (floor heights, fire-suppression flag)
//! └── sections: Vec<Section>
//!     ├── floors, apts (floor -> apartments), rent, corridor
//!     └── zones: Vec<Zone> (top floor, risers, fixed diameters, album)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use riser_core::building::{Building, Section, Zone};
//!
//! let mut building = Building::new("Block A");
//! building.sections.push(
//!     Section::new(9)
//!         .with_apartments_range(2..=9, 6)
//!         .with_zone(Zone::new(1, "Zone 1", 9, 2).with_diameters(32, 32, 25)),
//! );
//! assert!(building.validate().is_ok());
//! ```

use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{AlbumType, EngineConstants, System};
use crate::errors::{CalcError, CalcResult};

/// Current schema version for building snapshot files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Highest floor count (and apartment floor key) accepted by validation
pub const MAX_FLOORS: u32 = 1000;

/// Root snapshot container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    /// Snapshot metadata (version, name, timestamps)
    pub meta: BuildingMetadata,

    /// Building-wide calculation settings
    #[serde(default)]
    pub settings: CalcSettings,

    /// Sections in editor order; the index is the section number in reports
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Building {
    /// Create a new building without sections.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Building {
            meta: BuildingMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                created: now,
                modified: now,
            },
            settings: CalcSettings::default(),
            sections: Vec::new(),
        }
    }

    /// Highest floor count over all sections
    pub fn max_floors(&self) -> u32 {
        self.sections.iter().map(|s| s.floors).max().unwrap_or(0)
    }

    /// Residential apartments (floors >= 2) over all sections
    pub fn total_apartments(&self) -> u64 {
        self.sections.iter().map(Section::residential_apartments).sum()
    }

    /// Rental units on floor 1 over all sections with rent enabled
    pub fn total_rent_units(&self) -> u64 {
        self.sections.iter().map(|s| u64::from(s.rent_units())).sum()
    }

    /// Validate structural input before it enters the engine.
    ///
    /// Uses the default catalog; see [`Building::validate_with`].
    pub fn validate(&self) -> CalcResult<()> {
        self.validate_with(&EngineConstants::default())
    }

    /// Validate structural input against the given constants.
    ///
    /// Only structurally impossible snapshots are rejected. Soft problems
    /// (non-catalog diameters) are logged and accepted.
    pub fn validate_with(&self, constants: &EngineConstants) -> CalcResult<()> {
        self.settings.validate()?;

        for (si, section) in self.sections.iter().enumerate() {
            section.validate(si)?;

            for zone in &section.zones {
                for system in System::ALL {
                    let dia = zone.fixed_d.get(system);
                    if dia > 0 && !constants.is_real_diameter(dia) {
                        tracing::warn!(
                            section = si,
                            zone = %zone.name,
                            system = %system,
                            diameter = dia,
                            "fixed diameter is not in the real DN catalog"
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for Building {
    fn default() -> Self {
        Building::new("")
    }
}

/// Snapshot metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Building / project name
    #[serde(default)]
    pub name: String,

    /// When the snapshot was created
    pub created: DateTime<Utc>,

    /// When the snapshot was last modified
    pub modified: DateTime<Utc>,
}

/// Building-wide calculation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalcSettings {
    /// Height of floor 1 (m)
    pub h1: f64,

    /// Typical height of floors 2..N (m)
    pub hn: f64,

    /// In-apartment fire suppression (ВКП) enabled
    #[serde(default)]
    pub ivpt_enabled: bool,
}

impl CalcSettings {
    fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("settings.h1", self.h1), ("settings.hn", self.hn)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Floor height must be a finite non-negative number",
                ));
            }
        }
        Ok(())
    }
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            h1: 4.2,
            hn: 3.0,
            ivpt_enabled: false,
        }
    }
}

/// One section (корпус) of the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Total floor count (>= 1)
    pub floors: u32,

    /// Apartments per floor. Floor 1 entries are ignored by every aggregation.
    #[serde(default)]
    pub apts: BTreeMap<u32, u32>,

    /// Rental / common units on floor 1
    #[serde(default)]
    pub rent: RentSpec,

    /// Vertical zones in editor order
    #[serde(default)]
    pub zones: Vec<Zone>,

    /// Common corridor (МОП) parameters
    #[serde(default)]
    pub corridor: CorridorSpec,

    /// Edit-time guard, no computational effect
    #[serde(default)]
    pub floors_locked: bool,
}

impl Section {
    /// Create an empty section with the given floor count.
    pub fn new(floors: u32) -> Self {
        Section {
            floors,
            apts: BTreeMap::new(),
            rent: RentSpec::default(),
            zones: Vec::new(),
            corridor: CorridorSpec::default(),
            floors_locked: false,
        }
    }

    /// Set the apartment count of one floor (builder pattern)
    pub fn with_apartments(mut self, floor: u32, count: u32) -> Self {
        self.apts.insert(floor, count);
        self
    }

    /// Set the same apartment count on a range of floors (builder pattern)
    pub fn with_apartments_range(mut self, floors: RangeInclusive<u32>, count: u32) -> Self {
        for floor in floors {
            self.apts.insert(floor, count);
        }
        self
    }

    /// Enable rent on floor 1 with the given unit count (builder pattern)
    pub fn with_rent(mut self, qty: u32) -> Self {
        self.rent = RentSpec { enabled: true, qty };
        self
    }

    /// Append a zone (builder pattern)
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    /// Set the corridor parameters (builder pattern)
    pub fn with_corridor(mut self, length_m: f64, position: f64) -> Self {
        self.corridor = CorridorSpec { length_m, position };
        self
    }

    /// Apartments recorded on `floor`; floor 1 is never residential
    pub fn apartments_on(&self, floor: u32) -> u32 {
        if floor < 2 {
            return 0;
        }
        self.apts.get(&floor).copied().unwrap_or(0)
    }

    /// Rental units counted on floor 1 (0 when rent is disabled)
    pub fn rent_units(&self) -> u32 {
        if self.rent.enabled {
            self.rent.qty
        } else {
            0
        }
    }

    /// Sum of apartments over floors >= 2
    pub fn residential_apartments(&self) -> u64 {
        self.apts
            .range(2u32..)
            .map(|(_, &count)| u64::from(count))
            .sum()
    }

    /// Highest floor carrying a non-zero apartment count
    pub fn highest_occupied_floor(&self) -> u32 {
        self.apts
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&floor, _)| floor)
            .max()
            .unwrap_or(0)
    }

    fn validate(&self, index: usize) -> CalcResult<()> {
        if self.floors == 0 {
            return Err(CalcError::invalid_input(
                format!("sections[{index}].floors"),
                self.floors.to_string(),
                "Section must have at least one floor",
            ));
        }
        if self.floors > MAX_FLOORS {
            return Err(CalcError::invalid_input(
                format!("sections[{index}].floors"),
                self.floors.to_string(),
                format!("Section cannot have more than {MAX_FLOORS} floors"),
            ));
        }
        if let Some((&floor, _)) = self.apts.range(MAX_FLOORS + 1..).next() {
            return Err(CalcError::invalid_input(
                format!("sections[{index}].apts"),
                floor.to_string(),
                format!("Apartment floor cannot exceed {MAX_FLOORS}"),
            ));
        }

        let length = self.corridor.length_m;
        if !length.is_finite() || length < 0.0 {
            return Err(CalcError::invalid_input(
                format!("sections[{index}].corridor.length_m"),
                length.to_string(),
                "Corridor length must be a finite non-negative number",
            ));
        }

        let position = self.corridor.position;
        if !(0.0..=1.0).contains(&position) {
            return Err(CalcError::invalid_input(
                format!("sections[{index}].corridor.position"),
                position.to_string(),
                "Collector position must lie within [0, 1]",
            ));
        }

        let mut seen = HashSet::new();
        for zone in &self.zones {
            if !seen.insert(zone.id) {
                return Err(CalcError::invalid_input(
                    format!("sections[{index}].zones"),
                    zone.id.to_string(),
                    "Zone id must be unique within a section",
                ));
            }
        }
        Ok(())
    }
}

/// Rental units on floor 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RentSpec {
    /// Rent is present
    pub enabled: bool,
    /// Number of rental units
    pub qty: u32,
}

/// Common corridor parameters for in-corridor PEX runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorridorSpec {
    /// Corridor length L (m)
    #[serde(default)]
    pub length_m: f64,

    /// Collector position r along the corridor (0 = end, 0.5 = center, 1 = other end)
    #[serde(default = "default_position")]
    pub position: f64,
}

fn default_position() -> f64 {
    0.5
}

impl Default for CorridorSpec {
    fn default() -> Self {
        CorridorSpec {
            length_m: 30.0,
            position: 0.5,
        }
    }
}

/// A vertical zone of one section.
///
/// Coverage is implicitly `1..=to`; zones may overlap or leave gaps, the
/// resolver picks the tightest one per floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique within the section
    pub id: u64,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Top floor covered by the zone (0 = unset)
    #[serde(default)]
    pub to: u32,

    /// Risers per section for this zone (0 is treated as 1)
    #[serde(default)]
    pub risers: u32,

    /// Fixed riser diameters per system
    #[serde(default)]
    pub fixed_d: FixedDiameters,

    /// KUU album template
    #[serde(default)]
    pub album_type: AlbumType,

    /// Edit-time guard, no computational effect
    #[serde(default)]
    pub locked: bool,
}

impl Zone {
    /// Create a zone without diameters using the default album.
    pub fn new(id: u64, name: impl Into<String>, to: u32, risers: u32) -> Self {
        Zone {
            id,
            name: name.into(),
            to,
            risers,
            fixed_d: FixedDiameters::default(),
            album_type: AlbumType::default(),
            locked: false,
        }
    }

    /// Set the fixed diameters (builder pattern)
    pub fn with_diameters(mut self, v1: u32, t3: u32, t4: u32) -> Self {
        self.fixed_d = FixedDiameters { v1, t3, t4 };
        self
    }

    /// Set the album type (builder pattern)
    pub fn with_album(mut self, album_type: AlbumType) -> Self {
        self.album_type = album_type;
        self
    }

    /// Riser count with the floor of 1 applied
    pub fn effective_risers(&self) -> u32 {
        self.risers.max(1)
    }

    /// Top floor clipped to the section height
    pub fn effective_top(&self, section: &Section) -> u32 {
        self.to.min(section.floors)
    }
}

/// Fixed riser diameters in mm, 0 = unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixedDiameters {
    #[serde(rename = "V1", default)]
    pub v1: u32,
    #[serde(rename = "T3", default)]
    pub t3: u32,
    #[serde(rename = "T4", default)]
    pub t4: u32,
}

impl FixedDiameters {
    /// Diameter of one system
    pub fn get(&self, system: System) -> u32 {
        match system {
            System::V1 => self.v1,
            System::T3 => self.t3,
            System::T4 => self.t4,
        }
    }

    /// Systems with a diameter set, in reporting order
    pub fn iter_set(&self) -> impl Iterator<Item = (System, u32)> + '_ {
        System::ALL
            .into_iter()
            .map(|system| (system, self.get(system)))
            .filter(|&(_, dia)| dia > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_section() -> Section {
        Section::new(5)
            .with_apartments(1, 99)
            .with_apartments_range(2..=5, 4)
            .with_rent(3)
            .with_zone(Zone::new(1, "Z1", 5, 2).with_diameters(32, 25, 20))
    }

    #[test]
    fn test_building_creation() {
        let building = Building::new("Block A");
        assert_eq!(building.meta.name, "Block A");
        assert_eq!(building.meta.version, SCHEMA_VERSION);
        assert!(building.sections.is_empty());
    }

    #[test]
    fn test_floor_one_ignored() {
        let section = sample_section();
        assert_eq!(section.apartments_on(1), 0);
        assert_eq!(section.apartments_on(2), 4);
        assert_eq!(section.residential_apartments(), 16);
        assert_eq!(section.rent_units(), 3);
    }

    #[test]
    fn test_rent_disabled() {
        let mut section = sample_section();
        section.rent.enabled = false;
        assert_eq!(section.rent_units(), 0);
    }

    #[test]
    fn test_building_totals() {
        let mut building = Building::new("B");
        building.sections.push(sample_section());
        building.sections.push(Section::new(9).with_apartments(3, 7));
        assert_eq!(building.total_apartments(), 23);
        assert_eq!(building.total_rent_units(), 3);
        assert_eq!(building.max_floors(), 9);
    }

    #[test]
    fn test_highest_occupied_floor() {
        let section = Section::new(5)
            .with_apartments(7, 2)
            .with_apartments(8, 0);
        assert_eq!(section.highest_occupied_floor(), 7);
    }

    #[test]
    fn test_zero_floors_rejected() {
        let mut building = Building::new("B");
        building.sections.push(Section::new(0));
        let err = building.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_floor_count_upper_bound() {
        let mut building = Building::new("B");
        building.sections.push(Section::new(MAX_FLOORS));
        assert!(building.validate().is_ok());

        building.sections.push(Section::new(u32::MAX).with_zone(Zone::new(1, "Z", 5, 1)));
        let err = building.validate().unwrap_err();
        assert_eq!(
            err,
            CalcError::invalid_input(
                "sections[1].floors",
                u32::MAX.to_string(),
                format!("Section cannot have more than {MAX_FLOORS} floors"),
            )
        );
    }

    #[test]
    fn test_apartment_floor_upper_bound() {
        let mut building = Building::new("B");
        building.sections.push(
            Section::new(5)
                .with_apartments(3, 2)
                .with_apartments(u32::MAX, 1),
        );
        let err = building.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("sections[0].apts"));

        building.sections[0].apts.remove(&u32::MAX);
        building.sections[0].apts.insert(MAX_FLOORS, 2);
        assert!(building.validate().is_ok());
    }

    #[test]
    fn test_negative_height_rejected() {
        let mut building = Building::new("B");
        building.settings.hn = -3.0;
        assert!(building.validate().is_err());
    }

    #[test]
    fn test_corridor_position_rejected() {
        let mut building = Building::new("B");
        building.sections.push(Section::new(3).with_corridor(20.0, 1.5));
        assert!(building.validate().is_err());
    }

    #[test]
    fn test_duplicate_zone_ids_rejected() {
        let mut building = Building::new("B");
        building.sections.push(
            Section::new(3)
                .with_zone(Zone::new(7, "A", 2, 1))
                .with_zone(Zone::new(7, "B", 3, 1)),
        );
        assert!(building.validate().is_err());
    }

    #[test]
    fn test_non_catalog_diameter_accepted() {
        let mut building = Building::new("B");
        building.sections.push(
            Section::new(3).with_zone(Zone::new(1, "A", 3, 1).with_diameters(33, 0, 0)),
        );
        assert!(building.validate().is_ok());
    }

    #[test]
    fn test_effective_risers_and_top() {
        let section = Section::new(5);
        let zone = Zone::new(1, "Z", 12, 0);
        assert_eq!(zone.effective_risers(), 1);
        assert_eq!(zone.effective_top(&section), 5);
    }

    #[test]
    fn test_fixed_diameters_iter_set() {
        let d = FixedDiameters { v1: 32, t3: 0, t4: 20 };
        let set: Vec<_> = d.iter_set().collect();
        assert_eq!(set, vec![(System::V1, 32), (System::T4, 20)]);
    }

    #[test]
    fn test_section_deserialization_defaults() {
        let json = r#"{
            "floors": 4,
            "apts": { "2": 3, "3": 3 },
            "zones": [ { "id": 1, "name": "Z1", "to": 4, "risers": 1, "fixed_d": { "V1": 25 } } ]
        }"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.apartments_on(3), 3);
        assert_eq!(section.corridor, CorridorSpec::default());
        assert_eq!(section.zones[0].fixed_d.t3, 0);
        assert_eq!(section.zones[0].album_type, AlbumType::Collector);
        assert!(!section.rent.enabled);
    }

    #[test]
    fn test_building_serialization() {
        let mut building = Building::new("Block C");
        building.sections.push(sample_section());
        let json = serde_json::to_string_pretty(&building).unwrap();
        assert!(json.contains("Block C"));

        let roundtrip: Building = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.sections, building.sections);
        assert_eq!(roundtrip.settings, building.settings);
    }
}

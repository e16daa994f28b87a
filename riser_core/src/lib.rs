//! # riser_core - Water-Supply Riser Calculation Engine
//!
//! `riser_core` computes the engineering quantities of the water-supply
//! riser network of a multi-section residential building: riser lengths
//! per system and diameter, collector sizing, KUU bills of materials,
//! per-floor collector distribution, fitting counts and corridor PEX runs.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over an immutable building snapshot
//! - **JSON-First**: All model and report types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic**: The same snapshot always yields the same report
//!
//! ## Quick Start
//!
//! ```rust
//! use riser_core::{calculate, Building, EngineConstants, Section, Zone};
//!
//! let mut building = Building::new("Block A");
//! building.sections.push(
//!     Section::new(12)
//!         .with_apartments_range(2..=12, 8)
//!         .with_zone(Zone::new(1, "Zone 1", 12, 2).with_diameters(40, 40, 32)),
//! );
//!
//! let report = calculate(&building, &EngineConstants::default()).unwrap();
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`building`] - Building snapshot, sections, zones and settings
//! - [`catalog`] - Systems, DN catalog, album templates, engine constants
//! - [`calculations`] - The individual calculators
//! - [`report`] - One-pass orchestration into a [`BuildingReport`]
//! - [`errors`] - Structured error and warning types
//! - [`file_io`] - Snapshot and report files with atomic saves

pub mod building;
pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use building::{Building, BuildingMetadata, CalcSettings, Section, Zone};
pub use catalog::{AlbumType, EngineConstants, System};
pub use errors::{CalcError, CalcResult, CalcWarning};
pub use file_io::{load_building, save_building, save_report, ReportFile};
pub use report::{calculate, BuildingReport};

//! # Riser Calculations
//!
//! Every calculator is a pure function over an immutable [`Section`] slice
//! (plus settings or constants where needed). They never fail: structural
//! problems are rejected earlier by [`Building::validate`], and soft
//! problems surface as [`CalcWarning`] records.
//!
//! ## Stages
//!
//! Leaf-first:
//!
//! - [`zone_resolver`] - Owning zone of a floor
//! - [`geometry`] - Vertical run of a zone
//! - [`risers`] - Riser lengths per section × system × diameter
//! - [`outlets`] - Auto-sized collector outlet count per zone
//! - [`bom`] - KUU bill of materials and specifications
//! - [`zones`] - Per-zone summary rows
//! - [`distribution`] - Per-floor split of units across risers
//! - [`floors`] - Per-floor table
//! - [`fittings`] - Compensators, supports, end nodes, meters, collectors
//! - [`corridor`] - Corridor PEX runs
//!
//! The [`crate::report`] module chains them into one pass.
//!
//! [`Section`]: crate::building::Section
//! [`Building::validate`]: crate::building::Building::validate
//! [`CalcWarning`]: crate::errors::CalcWarning

pub mod bom;
pub mod corridor;
pub mod distribution;
pub mod fittings;
pub mod floors;
pub mod geometry;
pub mod outlets;
pub mod risers;
pub mod zone_resolver;
pub mod zones;

// Re-export commonly used types
pub use bom::{materialize_bom, BomLine, BomParams};
pub use corridor::{corridor_pex_length, CorridorPex, CorridorTotals};
pub use distribution::{distribute, CollectorSummary, OutletPolicy};
pub use fittings::{compute_fittings, FittingsReport};
pub use floors::{compute_floors, FloorRow};
pub use geometry::zone_height;
pub use outlets::auto_outlet_count;
pub use risers::{aggregate_risers, RiserAggregate};
pub use zone_resolver::resolve_zone;
pub use zones::{compute_zones, ZoneRow};

//! # Catalog
//!
//! Fixed reference data shared by every calculation: the water-supply
//! systems, the real pipe diameter series, corridor routing constants, and
//! the apartment metering unit (KUU) album templates.
//!
//! ## Systems
//!
//! - **V1**: cold water supply (В1)
//! - **T3**: hot water supply (Т3)
//! - **T4**: hot water circulation (Т4)
//!
//! ## Example
//!
//! ```rust
//! use riser_core::catalog::{EngineConstants, System};
//!
//! let constants = EngineConstants::default();
//! assert_eq!(constants.corridor.drop_length_m, 1.8);
//! assert!(constants.is_real_diameter(32));
//! assert_eq!(System::T3.label(), "Т3");
//! ```

pub mod albums;

pub use albums::{AlbumType, BomTemplateEntry};

use serde::{Deserialize, Serialize};

/// Real nominal pipe diameters (DN, mm) offered by the editor.
pub const REAL_DN: [u32; 11] = [15, 20, 25, 32, 40, 50, 65, 80, 100, 125, 150];

/// Water-supply system carried by a riser.
///
/// The derived ordering (`V1 < T3 < T4`) is the reporting order used by
/// every aggregate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum System {
    /// Cold water supply
    V1,
    /// Hot water supply
    T3,
    /// Hot water circulation
    T4,
}

impl System {
    /// All systems in reporting order
    pub const ALL: [System; 3] = [System::V1, System::T3, System::T4];

    /// Cyrillic label used on drawings and in specifications
    pub fn label(&self) -> &'static str {
        match self {
            System::V1 => "В1",
            System::T3 => "Т3",
            System::T4 => "Т4",
        }
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Constants for the cross-linked polyethylene runs in the common corridor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorridorConstants {
    /// Drop plus entry length per apartment pipe (m)
    pub drop_length_m: f64,
    /// Routing coefficient (1.0 = straight corridor)
    pub gamma: f64,
}

impl Default for CorridorConstants {
    fn default() -> Self {
        CorridorConstants {
            drop_length_m: 1.8,
            gamma: 1.0,
        }
    }
}

/// Process-wide read-only configuration.
///
/// Built once at startup and passed by reference into every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConstants {
    /// Corridor routing constants
    pub corridor: CorridorConstants,
    /// Real diameter series (mm)
    pub real_diameters: Vec<u32>,
}

impl EngineConstants {
    /// Whether `dia` is one of the real catalog diameters
    pub fn is_real_diameter(&self, dia: u32) -> bool {
        self.real_diameters.contains(&dia)
    }
}

impl Default for EngineConstants {
    fn default() -> Self {
        EngineConstants {
            corridor: CorridorConstants::default(),
            real_diameters: REAL_DN.to_vec(),
        }
    }
}

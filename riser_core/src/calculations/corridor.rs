//! # Corridor PEX Runs
//!
//! Length of cross-linked polyethylene pipe laid horizontally in the common
//! corridor (МОП) from the floor collector to each apartment.
//!
//! ```text
//! d̄(r)    = L * (0.25 + 0.25 * |2r - 1|)     L/4 at the center, L/2 at an end
//! m_apt   = d̄ * γ + h
//! M_sect  = m_apt * n                          same for V1 and T3
//! ```
//!
//! `n` counts apartments on floors >= 2 only. Section lengths are rounded to
//! 2 decimals; building totals are summed from the rounded section values
//! and rounded again.

use serde::{Deserialize, Serialize};

use crate::building::Section;
use crate::catalog::CorridorConstants;

/// Round to 2 decimal places (cm precision)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average horizontal run (m) from a collector at position `r` along a
/// corridor of length `l`, before the routing coefficient.
pub fn average_run(l: f64, r: f64) -> f64 {
    l * (0.25 + 0.25 * (2.0 * r - 1.0).abs())
}

/// Corridor pipe lengths of one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorridorPex {
    /// Residential apartments (floors >= 2)
    pub apartment_count: u64,
    /// Corridor length L (m)
    pub corridor_length_m: f64,
    /// Collector position r
    pub position: f64,
    /// Average horizontal run d̄ (m)
    pub average_length_m: f64,
    /// Pipe per apartment per system, rounded (m)
    pub per_apartment_length_m: f64,
    /// Cold water PEX (m)
    pub length_v1_m: f64,
    /// Hot water PEX (m)
    pub length_t3_m: f64,
}

/// Compute the corridor PEX lengths of `section`.
///
/// # Example
///
/// ```rust
/// use riser_core::building::Section;
/// use riser_core::calculations::corridor::corridor_pex_length;
/// use riser_core::catalog::CorridorConstants;
///
/// let section = Section::new(6).with_apartments_range(2..=6, 2).with_corridor(30.0, 0.5);
/// let pex = corridor_pex_length(&section, &CorridorConstants::default());
///
/// assert_eq!(pex.apartment_count, 10);
/// assert_eq!(pex.average_length_m, 7.5);
/// assert_eq!(pex.length_v1_m, 93.0);
/// ```
pub fn corridor_pex_length(section: &Section, constants: &CorridorConstants) -> CorridorPex {
    let apartment_count = section.residential_apartments();
    let l = section.corridor.length_m;
    let r = section.corridor.position;

    let mut pex = CorridorPex {
        apartment_count,
        corridor_length_m: l,
        position: r,
        average_length_m: 0.0,
        per_apartment_length_m: 0.0,
        length_v1_m: 0.0,
        length_t3_m: 0.0,
    };
    if apartment_count == 0 || l <= 0.0 {
        return pex;
    }

    let average = average_run(l, r);
    let per_apartment = average * constants.gamma + constants.drop_length_m;
    let per_system = round2(per_apartment * apartment_count as f64);

    pex.average_length_m = average;
    pex.per_apartment_length_m = round2(per_apartment);
    pex.length_v1_m = per_system;
    pex.length_t3_m = per_system;
    pex
}

/// Building-wide corridor PEX totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CorridorTotals {
    pub total_v1_m: f64,
    pub total_t3_m: f64,
}

/// Sum the section results and round the totals.
pub fn corridor_totals(sections: &[CorridorPex]) -> CorridorTotals {
    let (v1, t3) = sections
        .iter()
        .fold((0.0, 0.0), |(v1, t3), pex| (v1 + pex.length_v1_m, t3 + pex.length_t3_m));
    CorridorTotals {
        total_v1_m: round2(v1),
        total_t3_m: round2(t3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const EPS: f64 = 1e-9;

    fn section(l: f64, r: f64, apartments: u32) -> Section {
        Section::new(2).with_apartments(2, apartments).with_corridor(l, r)
    }

    #[test]
    fn test_collector_at_center() {
        let pex = corridor_pex_length(&section(30.0, 0.5, 10), &CorridorConstants::default());
        assert!((pex.average_length_m - 7.5).abs() < EPS);
        assert!((pex.per_apartment_length_m - 9.3).abs() < EPS);
        assert!((pex.length_v1_m - 93.0).abs() < EPS);
        assert_eq!(pex.length_v1_m, pex.length_t3_m);
    }

    #[test_case(0.0 ; "first end")]
    #[test_case(1.0 ; "second end")]
    fn test_collector_at_end(r: f64) {
        let pex = corridor_pex_length(&section(30.0, r, 10), &CorridorConstants::default());
        assert!((pex.average_length_m - 15.0).abs() < EPS);
        assert!((pex.per_apartment_length_m - 16.8).abs() < EPS);
        assert!((pex.length_v1_m - 168.0).abs() < EPS);
        assert!((pex.length_t3_m - 168.0).abs() < EPS);
    }

    #[test]
    fn test_center_minimizes_run() {
        let center = average_run(40.0, 0.5);
        for r in [0.0, 0.1, 0.3, 0.7, 0.9, 1.0] {
            assert!(average_run(40.0, r) >= center);
        }
    }

    #[test]
    fn test_no_apartments() {
        let pex = corridor_pex_length(&section(30.0, 0.5, 0), &CorridorConstants::default());
        assert_eq!(pex.apartment_count, 0);
        assert_eq!(pex.length_v1_m, 0.0);
        assert_eq!(pex.per_apartment_length_m, 0.0);
    }

    #[test]
    fn test_zero_length_corridor() {
        let pex = corridor_pex_length(&section(0.0, 0.5, 12), &CorridorConstants::default());
        assert_eq!(pex.apartment_count, 12);
        assert_eq!(pex.average_length_m, 0.0);
        assert_eq!(pex.length_t3_m, 0.0);
    }

    #[test]
    fn test_floor_one_excluded() {
        let s = Section::new(3)
            .with_apartments(1, 20)
            .with_apartments(2, 3)
            .with_apartments(3, 3)
            .with_rent(5);
        let pex = corridor_pex_length(&s, &CorridorConstants::default());
        assert_eq!(pex.apartment_count, 6);
    }

    #[test]
    fn test_routing_coefficient() {
        let constants = CorridorConstants { drop_length_m: 1.8, gamma: 1.2 };
        let pex = corridor_pex_length(&section(30.0, 0.5, 10), &constants);
        // 7.5 * 1.2 + 1.8
        assert!((pex.per_apartment_length_m - 10.8).abs() < EPS);
        assert!((pex.length_v1_m - 108.0).abs() < EPS);
    }

    #[test]
    fn test_rounding() {
        // 7.3 * 0.25 + 1.8 = 3.625 per apartment, * 3 = 10.875
        let pex = corridor_pex_length(&section(7.3, 0.5, 3), &CorridorConstants::default());
        assert!((pex.length_v1_m - 10.88).abs() < EPS);
    }

    #[test]
    fn test_totals() {
        let constants = CorridorConstants::default();
        let results = vec![
            corridor_pex_length(&section(30.0, 0.5, 10), &constants),
            corridor_pex_length(&section(30.0, 0.0, 10), &constants),
            corridor_pex_length(&section(30.0, 0.5, 0), &constants),
        ];
        let totals = corridor_totals(&results);
        assert!((totals.total_v1_m - 261.0).abs() < EPS);
        assert!((totals.total_t3_m - 261.0).abs() < EPS);
    }
}

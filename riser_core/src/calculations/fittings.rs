//! # Fittings
//!
//! Small counting rules over the zone summary and the collector tallies.
//! None of them walks the building on its own.
//!
//! | Fitting | Rule |
//! |---|---|
//! | Compensator | `floor(riser_length / step(dia)) * risers`, T3 and T4 only |
//! | Fixed support | `2 *` compensators, same key |
//! | End node | per riser of V1 and of T3: one air valve + one DN15 ball valve |
//! | Water meter | `2 * (apartments + rent units)` |
//! | Fire suppression | device + DN15 valve per apartment when enabled |
//! | Floor collector | from the collector tally |
//!
//! Compensator step by diameter: DN <= 25 every 25 m, DN <= 40 every 30 m,
//! larger every 35 m.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::distribution::{collector_name, CollectorTally};
use super::zones::ZoneRow;
use crate::catalog::System;

/// Systems that receive compensators and fixed supports
pub const COMPENSATED_SYSTEMS: [System; 2] = [System::T3, System::T4];

/// Systems that receive end-node fittings
pub const END_NODE_SYSTEMS: [System; 2] = [System::V1, System::T3];

/// Water meters per metered unit (cold + hot)
pub const METERS_PER_UNIT: u64 = 2;

/// Compensator spacing (m) for a riser diameter (mm)
pub fn compensator_step(dia: u32) -> f64 {
    if dia <= 25 {
        25.0
    } else if dia <= 40 {
        30.0
    } else {
        35.0
    }
}

/// Compensators on one riser of `pipe_length_m`.
///
/// # Example
///
/// ```rust
/// use riser_core::calculations::fittings::compensators_per_riser;
///
/// assert_eq!(compensators_per_riser(80.0, 25), 3);
/// assert_eq!(compensators_per_riser(80.0, 50), 2);
/// ```
pub fn compensators_per_riser(pipe_length_m: f64, dia: u32) -> u64 {
    if pipe_length_m <= 0.0 {
        return 0;
    }
    (pipe_length_m / compensator_step(dia)).floor() as u64
}

/// One line of a fitting group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FittingLine {
    pub name: String,
    /// System column, when the group is split by system
    pub system: Option<System>,
    pub unit: String,
    pub qty: u64,
}

impl FittingLine {
    fn pieces(name: impl Into<String>, system: Option<System>, qty: u64) -> Self {
        FittingLine {
            name: name.into(),
            system,
            unit: "шт".to_string(),
            qty,
        }
    }
}

/// Sum of quantities over a fitting group
pub fn group_total(lines: &[FittingLine]) -> u64 {
    lines.iter().map(|line| line.qty).sum()
}

/// All fitting groups of the building.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FittingsReport {
    /// Ordered by system, then diameter
    pub compensators: Vec<FittingLine>,
    /// Same keys as `compensators`, doubled
    pub fixed_supports: Vec<FittingLine>,
    pub fire_suppression: Vec<FittingLine>,
    pub end_nodes: Vec<FittingLine>,
    pub water_meters: Vec<FittingLine>,
    /// Ordered by outlet count
    pub floor_collectors: Vec<FittingLine>,
}

impl FittingsReport {
    /// Whether any group has lines
    pub fn is_empty(&self) -> bool {
        [
            &self.compensators,
            &self.fixed_supports,
            &self.fire_suppression,
            &self.end_nodes,
            &self.water_meters,
            &self.floor_collectors,
        ]
        .iter()
        .all(|group| group.is_empty())
    }
}

/// Inputs shared by the fitting rules.
#[derive(Debug, Clone, Copy)]
pub struct FittingInputs<'a> {
    pub zones: &'a [ZoneRow],
    pub collectors: &'a CollectorTally,
    pub total_apartments: u64,
    pub total_rent_units: u64,
    pub ivpt_enabled: bool,
}

/// Count every fitting group.
pub fn compute_fittings(inputs: FittingInputs<'_>) -> FittingsReport {
    let compensator_counts = compensator_counts(inputs.zones);

    let compensators = compensator_counts
        .iter()
        .map(|(&(system, dia), &qty)| FittingLine::pieces(format!("Компенсатор Ду {dia}"), Some(system), qty))
        .collect();

    let fixed_supports = compensator_counts
        .iter()
        .map(|(&(system, dia), &qty)| {
            FittingLine::pieces(format!("Неподвижная опора Ду {dia}"), Some(system), qty * 2)
        })
        .collect();

    let fire_suppression = if inputs.ivpt_enabled && inputs.total_apartments > 0 {
        vec![
            FittingLine::pieces("Устройство внутриквартирного пожаротушения", None, inputs.total_apartments),
            FittingLine::pieces("Кран шаровый Ду 15 (для ВКП)", None, inputs.total_apartments),
        ]
    } else {
        Vec::new()
    };

    let water_meters = match water_meter_count(inputs.total_apartments, inputs.total_rent_units) {
        0 => Vec::new(),
        qty => vec![FittingLine::pieces("Счетчик воды", None, qty)],
    };

    let floor_collectors = inputs
        .collectors
        .iter()
        .map(|(&outlets, &qty)| FittingLine::pieces(collector_name(outlets), None, qty))
        .collect();

    FittingsReport {
        compensators,
        fixed_supports,
        fire_suppression,
        end_nodes: end_node_fittings(inputs.zones),
        water_meters,
        floor_collectors,
    }
}

/// Compensators keyed by (system, diameter) over T3 and T4 risers.
pub fn compensator_counts(zones: &[ZoneRow]) -> BTreeMap<(System, u32), u64> {
    let mut counts = BTreeMap::new();
    for zone in zones {
        for system in COMPENSATED_SYSTEMS {
            let dia = zone.diameters.get(system);
            if dia == 0 {
                continue;
            }
            let total = compensators_per_riser(zone.zone_height_m, dia) * u64::from(zone.risers_per_section);
            if total > 0 {
                *counts.entry((system, dia)).or_insert(0) += total;
            }
        }
    }
    counts
}

/// Air valve and ball valve per riser of V1 and T3.
pub fn end_node_fittings(zones: &[ZoneRow]) -> Vec<FittingLine> {
    let mut lines = Vec::new();
    for system in END_NODE_SYSTEMS {
        let risers: u64 = zones
            .iter()
            .filter(|zone| zone.diameters.get(system) > 0)
            .map(|zone| u64::from(zone.risers_per_section))
            .sum();
        if risers == 0 {
            continue;
        }
        lines.push(FittingLine::pieces("Автоматический воздухоотводчик Ду 15", Some(system), risers));
        lines.push(FittingLine::pieces("Кран шаровый Ду 15", Some(system), risers));
    }
    lines
}

/// One cold and one hot meter per apartment and rental unit
pub fn water_meter_count(total_apartments: u64, total_rent_units: u64) -> u64 {
    METERS_PER_UNIT * (total_apartments + total_rent_units)
}

//! Game state representation.
//!
//! Holds the engine-native snapshot of a game at one phase: year, season,
//! phase type, supply-center ownership and unit placement, plus any units
//! dislodged during the movement phase and awaiting retreat orders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::province::{Nation, Province};
use super::unit::Unit;

/// The season of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Fall,
}

/// All seasons in turn order.
pub const ALL_SEASONS: [Season; 2] = [Season::Spring, Season::Fall];

/// The phase within a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseType {
    Movement,
    Retreat,
    Adjustment,
}

/// All phase types in turn order.
pub const ALL_PHASE_TYPES: [PhaseType; 3] =
    [PhaseType::Movement, PhaseType::Retreat, PhaseType::Adjustment];

/// Complete board state at a point in time.
///
/// Units are keyed by the province they stand in, including the coast for
/// fleets on split-coast provinces (`stp/sc`). Supply centers are keyed by
/// the parent province. At most one unit occupies a parent province.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub year: u16,
    pub season: Season,
    pub phase_type: PhaseType,
    pub supply_centers: BTreeMap<Province, Nation>,
    pub units: BTreeMap<Province, Unit>,
    /// Units dislodged in the preceding movement phase, keyed by the
    /// province they were dislodged from.
    pub dislodged: BTreeMap<Province, Unit>,
    /// Origin of the attack that dislodged each unit in `dislodged`.
    pub dislodgers: BTreeMap<Province, Province>,
}

impl GameState {
    /// Creates an empty state with no units or ownership.
    pub fn empty(year: u16, season: Season, phase_type: PhaseType) -> Self {
        GameState {
            year,
            season,
            phase_type,
            supply_centers: BTreeMap::new(),
            units: BTreeMap::new(),
            dislodged: BTreeMap::new(),
            dislodgers: BTreeMap::new(),
        }
    }

    /// Returns the key and unit occupying `province` (any coast of it).
    pub fn unit_at(&self, province: &Province) -> Option<(&Province, &Unit)> {
        if let Some(entry) = self.units.get_key_value(province) {
            return Some(entry);
        }
        let parent = province.super_province();
        self.units.iter().find(|(key, _)| key.super_province() == parent)
    }

    /// Returns true if any unit stands in `province` or one of its coasts.
    pub fn is_occupied(&self, province: &Province) -> bool {
        self.unit_at(province).is_some()
    }

    /// Places a unit on the board. Returns false if the parent province is
    /// already occupied.
    pub fn place_unit(&mut self, province: Province, unit: Unit) -> bool {
        if self.is_occupied(&province) {
            return false;
        }
        self.units.insert(province, unit);
        true
    }

    /// Sets or clears supply-center ownership for a parent province.
    pub fn set_sc_owner(&mut self, province: Province, owner: Option<Nation>) {
        let province = province.super_province();
        match owner {
            Some(nation) => {
                self.supply_centers.insert(province, nation);
            }
            None => {
                self.supply_centers.remove(&province);
            }
        }
    }

    /// Records a dislodged unit and the province its attacker came from.
    pub fn set_dislodged(&mut self, province: Province, unit: Unit, attacker_from: Option<Province>) {
        if let Some(from) = attacker_from {
            self.dislodgers.insert(province.clone(), from);
        }
        self.dislodged.insert(province, unit);
    }

    /// Number of supply centers owned by `nation`.
    pub fn supply_center_count(&self, nation: &Nation) -> usize {
        self.supply_centers.values().filter(|owner| *owner == nation).count()
    }

    /// Number of units on the board owned by `nation`.
    pub fn unit_count(&self, nation: &Nation) -> usize {
        self.units.values().filter(|unit| &unit.nation == nation).count()
    }
}

//! The reference engine shared by the bundled variants.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::board::{GameState, Graph, IssuedOrder, PhaseType, Province, Season, Unit};
use crate::error::EngineError;

use super::adjustment::{apply_adjustments, resolve_adjustments};
use super::movement::{apply_movement, resolve_movement};
use super::phase::advance_state;
use super::retreat::{apply_retreats, resolve_retreats};
use super::{Resolution, VariantEngine};

/// Units on the board when a game begins. Every home center starts owned
/// by its nation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartPosition {
    pub year: u16,
    pub units: Vec<(Province, Unit)>,
}

impl StartPosition {
    pub fn new(year: u16) -> Self {
        StartPosition { year, units: Vec::new() }
    }

    /// Adds a starting unit.
    pub fn unit(mut self, province: &str, unit: Unit) -> Self {
        self.units.push((Province::new(province), unit));
        self
    }
}

/// Standoff-only adjudication over a validated [`Graph`].
pub struct StandardEngine {
    graph: Arc<Graph>,
    start: StartPosition,
    map: &'static [u8],
}

impl StandardEngine {
    pub fn new(graph: Arc<Graph>, start: StartPosition, map: &'static [u8]) -> Self {
        StandardEngine { graph, start, map }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl VariantEngine for StandardEngine {
    fn start(&self) -> Result<GameState, EngineError> {
        let mut state = GameState::empty(self.start.year, Season::Spring, PhaseType::Movement);

        for (province, node) in self.graph.provinces() {
            if node.supply_center {
                state.set_sc_owner(province.clone(), node.home.clone());
            }
        }

        for (province, unit) in &self.start.units {
            if !self.graph.can_hold(province, unit.unit_type) {
                return Err(EngineError::InvalidTopology(format!(
                    "starting {} of {} cannot stand in {}",
                    unit.unit_type.name(),
                    unit.nation,
                    province
                )));
            }
            if !state.place_unit(province.clone(), unit.clone()) {
                return Err(EngineError::InvalidTopology(format!(
                    "two starting units in {}",
                    province.super_province()
                )));
            }
        }

        Ok(state)
    }

    fn resolve(&self, mut state: GameState, orders: &[IssuedOrder]) -> Result<Resolution, EngineError> {
        validate_state(&self.graph, &state)?;
        debug!(
            "Resolving {} {:?} {:?} with {} orders",
            state.year,
            state.season,
            state.phase_type,
            orders.len()
        );

        let results = match state.phase_type {
            PhaseType::Movement => {
                let outcome = resolve_movement(&self.graph, &state, orders);
                apply_movement(&mut state, &outcome.moves);
                outcome.results
            }
            PhaseType::Retreat => {
                let outcome = resolve_retreats(&self.graph, &state, orders);
                apply_retreats(&mut state, &outcome.retreats);
                outcome.results
            }
            PhaseType::Adjustment => {
                let outcome = resolve_adjustments(&self.graph, &state, orders);
                apply_adjustments(&mut state, &outcome);
                outcome.results
            }
        };

        // Nothing is dislodged without unit strengths.
        advance_state(&self.graph, &mut state, false)?;

        Ok(Resolution { state, results })
    }

    fn svg_map(&self) -> Result<Cow<'static, [u8]>, EngineError> {
        if self.map.is_empty() {
            return Err(EngineError::MapUnavailable("no map bundled".to_string()));
        }
        Ok(Cow::Borrowed(self.map))
    }
}

/// Rejects states that cannot exist on this map.
fn validate_state(graph: &Graph, state: &GameState) -> Result<(), EngineError> {
    let mut problems = Vec::new();
    let mut occupied = BTreeSet::new();

    for (province, unit) in &state.units {
        if !graph.can_hold(province, unit.unit_type) {
            problems.push(format!("{} cannot stand in {}", unit.unit_type.name(), province));
        }
        if !occupied.insert(province.super_province()) {
            problems.push(format!("more than one unit in {}", province.super_province()));
        }
    }

    for province in state.supply_centers.keys() {
        if province.is_coast() || !graph.is_supply_center(province) {
            problems.push(format!("{} is not a supply center", province));
        }
    }

    for province in state.dislodged.keys().chain(state.dislodgers.values()) {
        if !graph.contains(province) {
            problems.push(format!("unknown province {}", province));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(EngineError::InvalidState(problems.join("; ")))
    }
}

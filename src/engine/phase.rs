//! Phase sequencing logic.
//!
//! Determines the next phase in the game year and advances the board state
//! accordingly.

use std::collections::BTreeSet;

use crate::board::{GameState, Graph, Nation, PhaseType, Season};
use crate::error::EngineError;

/// Computes the next (season, phase type).
///
/// Phase flow:
/// - Spring Movement -> Spring Retreat (if dislodged) OR Fall Movement
/// - Spring Retreat  -> Fall Movement
/// - Fall Movement   -> Fall Retreat (if dislodged) OR Fall Adjustment
/// - Fall Retreat    -> Fall Adjustment
/// - Fall Adjustment -> Spring Movement (next year)
///
/// The adjustment phase is skipped when no nation needs to build or disband.
pub fn next_phase(state: &GameState, has_dislodgements: bool, needs_adjustment: bool) -> (Season, PhaseType) {
    match state.phase_type {
        PhaseType::Movement => {
            if has_dislodgements {
                return (state.season, PhaseType::Retreat);
            }
            after_movement(state.season, needs_adjustment)
        }
        PhaseType::Retreat => after_movement(state.season, needs_adjustment),
        PhaseType::Adjustment => (Season::Spring, PhaseType::Movement),
    }
}

fn after_movement(season: Season, needs_adjustment: bool) -> (Season, PhaseType) {
    match season {
        Season::Spring => (Season::Fall, PhaseType::Movement),
        Season::Fall if needs_adjustment => (Season::Fall, PhaseType::Adjustment),
        Season::Fall => (Season::Spring, PhaseType::Movement),
    }
}

/// Every nation that owns a unit or a supply center.
pub fn active_nations(state: &GameState) -> BTreeSet<Nation> {
    state
        .units
        .values()
        .map(|unit| unit.nation.clone())
        .chain(state.supply_centers.values().cloned())
        .collect()
}

/// Returns true if any nation has a unit/supply-center mismatch.
pub fn needs_adjustment(state: &GameState) -> bool {
    active_nations(state)
        .iter()
        .any(|nation| state.supply_center_count(nation) != state.unit_count(nation))
}

/// Supply centers are captured by the nation whose unit occupies them.
/// Unoccupied centers keep their current owner.
pub fn update_sc_ownership(graph: &Graph, state: &mut GameState) {
    let captures: Vec<_> = state
        .units
        .iter()
        .filter(|(province, _)| graph.is_supply_center(province))
        .map(|(province, unit)| (province.super_province(), unit.nation.clone()))
        .collect();
    for (province, nation) in captures {
        state.supply_centers.insert(province, nation);
    }
}

/// Advances the board state to the next phase.
///
/// This handles:
/// - SC ownership updates after Fall movement/retreat
/// - Year increment when transitioning to Spring
/// - Clearing dislodged units when not entering a retreat phase
///
/// Fails if the year would run past `u16::MAX`.
pub fn advance_state(graph: &Graph, state: &mut GameState, has_dislodgements: bool) -> Result<(), EngineError> {
    if state.season == Season::Fall
        && matches!(state.phase_type, PhaseType::Movement | PhaseType::Retreat)
    {
        update_sc_ownership(graph, state);
    }

    let (next_season, next_phase) = next_phase(state, has_dislodgements, needs_adjustment(state));
    if next_season == Season::Spring && next_phase == PhaseType::Movement {
        state.year = state
            .year
            .checked_add(1)
            .ok_or_else(|| EngineError::InvalidState(format!("year {} cannot advance", state.year)))?;
    }

    state.season = next_season;
    state.phase_type = next_phase;

    if next_phase != PhaseType::Retreat {
        state.dislodged.clear();
        state.dislodgers.clear();
    }
    Ok(())
}

/// Returns the nation owning at least `threshold` supply centers, if any.
/// A zero threshold means the variant has no solo victory.
pub fn solo_winner(state: &GameState, threshold: usize) -> Option<Nation> {
    if threshold == 0 {
        return None;
    }
    active_nations(state)
        .into_iter()
        .find(|nation| state.supply_center_count(nation) >= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Province, ProvinceType, Unit};

    fn graph() -> Graph {
        Graph::builder()
            .province("vie", "Vienna", ProvinceType::Land, true, Some("Austria"))
            .province("bud", "Budapest", ProvinceType::Land, true, Some("Austria"))
            .province("ser", "Serbia", ProvinceType::Land, true, None)
            .province("gal", "Galicia", ProvinceType::Land, false, None)
            .army("vie", "bud")
            .army("bud", "ser")
            .army("vie", "gal")
            .army("bud", "gal")
            .build()
            .unwrap()
    }

    fn balanced(year: u16, season: Season, phase_type: PhaseType) -> GameState {
        let mut state = GameState::empty(year, season, phase_type);
        state.set_sc_owner("vie".into(), Some("Austria".into()));
        state.place_unit("vie".into(), Unit::army("Austria"));
        state
    }

    #[test]
    fn spring_movement_to_fall_movement() {
        let state = GameState::empty(1901, Season::Spring, PhaseType::Movement);
        assert_eq!(next_phase(&state, false, false), (Season::Fall, PhaseType::Movement));
    }

    #[test]
    fn movement_to_retreat_on_dislodge() {
        let state = GameState::empty(1901, Season::Spring, PhaseType::Movement);
        assert_eq!(next_phase(&state, true, false), (Season::Spring, PhaseType::Retreat));
        let state = GameState::empty(1901, Season::Fall, PhaseType::Movement);
        assert_eq!(next_phase(&state, true, true), (Season::Fall, PhaseType::Retreat));
    }

    #[test]
    fn fall_movement_to_adjustment_only_when_needed() {
        let state = GameState::empty(1901, Season::Fall, PhaseType::Movement);
        assert_eq!(next_phase(&state, false, true), (Season::Fall, PhaseType::Adjustment));
        assert_eq!(next_phase(&state, false, false), (Season::Spring, PhaseType::Movement));
    }

    #[test]
    fn adjustment_to_spring_movement() {
        let state = GameState::empty(1901, Season::Fall, PhaseType::Adjustment);
        assert_eq!(next_phase(&state, false, false), (Season::Spring, PhaseType::Movement));
    }

    #[test]
    fn advance_state_increments_year() {
        let mut state = balanced(1901, Season::Fall, PhaseType::Adjustment);
        advance_state(&graph(), &mut state, false).unwrap();
        assert_eq!(state.year, 1902);
        assert_eq!(state.season, Season::Spring);
        assert_eq!(state.phase_type, PhaseType::Movement);
    }

    #[test]
    fn advance_state_does_not_increment_year_within_year() {
        let mut state = balanced(1901, Season::Spring, PhaseType::Movement);
        advance_state(&graph(), &mut state, false).unwrap();
        assert_eq!(state.year, 1901);
        assert_eq!(state.season, Season::Fall);
    }

    #[test]
    fn fall_capture_leads_to_adjustment() {
        let mut state = balanced(1901, Season::Fall, PhaseType::Movement);
        state.units.clear();
        state.place_unit("ser".into(), Unit::army("Austria"));
        advance_state(&graph(), &mut state, false).unwrap();
        assert_eq!(state.supply_centers.get("ser"), Some(&Nation::new("Austria")));
        assert_eq!(state.phase_type, PhaseType::Adjustment);
        assert_eq!(state.year, 1901);
    }

    #[test]
    fn balanced_fall_skips_adjustment() {
        let mut state = balanced(1901, Season::Fall, PhaseType::Movement);
        advance_state(&graph(), &mut state, false).unwrap();
        assert_eq!(state.phase_type, PhaseType::Movement);
        assert_eq!(state.season, Season::Spring);
        assert_eq!(state.year, 1902);
    }

    #[test]
    fn spring_does_not_capture() {
        let mut state = GameState::empty(1901, Season::Spring, PhaseType::Movement);
        state.place_unit("ser".into(), Unit::army("Austria"));
        advance_state(&graph(), &mut state, false).unwrap();
        assert!(state.supply_centers.is_empty());
    }

    #[test]
    fn unoccupied_center_keeps_owner() {
        let mut state = GameState::empty(1901, Season::Fall, PhaseType::Movement);
        state.set_sc_owner("bud".into(), Some("Austria".into()));
        update_sc_ownership(&graph(), &mut state);
        assert_eq!(state.supply_centers.get("bud"), Some(&Nation::new("Austria")));
    }

    #[test]
    fn non_centers_are_never_owned() {
        let mut state = GameState::empty(1901, Season::Fall, PhaseType::Movement);
        state.place_unit("gal".into(), Unit::army("Austria"));
        update_sc_ownership(&graph(), &mut state);
        assert!(state.supply_centers.is_empty());
    }

    #[test]
    fn dislodged_cleared_unless_entering_retreat() {
        let mut state = balanced(1901, Season::Spring, PhaseType::Movement);
        state.set_dislodged("ser".into(), Unit::army("Turkey"), Some(Province::new("bud")));
        let mut kept = state.clone();

        advance_state(&graph(), &mut kept, true).unwrap();
        assert_eq!(kept.phase_type, PhaseType::Retreat);
        assert!(kept.dislodged.contains_key("ser"));

        advance_state(&graph(), &mut state, false).unwrap();
        assert!(state.dislodged.is_empty());
        assert!(state.dislodgers.is_empty());
    }

    #[test]
    fn solo_winner_threshold() {
        let mut state = GameState::empty(1910, Season::Fall, PhaseType::Adjustment);
        for p in ["vie", "bud", "ser"] {
            state.set_sc_owner(p.into(), Some("Austria".into()));
        }
        assert_eq!(solo_winner(&state, 3), Some(Nation::new("Austria")));
        assert_eq!(solo_winner(&state, 4), None);
        assert_eq!(solo_winner(&state, 0), None);
    }

    #[test]
    fn last_year_cannot_advance() {
        let mut state = balanced(u16::MAX, Season::Fall, PhaseType::Adjustment);
        let before = state.clone();
        assert!(matches!(
            advance_state(&graph(), &mut state, false),
            Err(EngineError::InvalidState(_))
        ));
        assert_eq!(state, before);

        let mut spring = balanced(u16::MAX, Season::Spring, PhaseType::Movement);
        advance_state(&graph(), &mut spring, false).unwrap();
        assert_eq!(spring.season, Season::Fall);
    }
}

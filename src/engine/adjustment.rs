//! Adjustment-phase resolution.
//!
//! Validates build and disband orders at the end of a game year. A nation
//! with more supply centers than units may build in its empty, owned home
//! centers; a nation with more units than centers must disband. Missing
//! disbands are filled by civil disorder, removing the units furthest from
//! home first.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::{GameState, Graph, IssuedOrder, Nation, Order, Province, Unit, UnitType};

use super::phase::active_nations;
use super::OrderResult;

/// Per-order results plus the builds and disbands to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustmentOutcome {
    pub results: BTreeMap<Province, OrderResult>,
    pub builds: Vec<(Province, Unit)>,
    /// Unit keys to remove, ordered and civil-disorder disbands alike.
    pub disbands: Vec<Province>,
}

/// Resolves adjustment-phase orders for every nation.
pub fn resolve_adjustments(graph: &Graph, state: &GameState, orders: &[IssuedOrder]) -> AdjustmentOutcome {
    let mut outcome = AdjustmentOutcome::default();

    // Positive for builds, negative for disbands.
    let balance: BTreeMap<Nation, isize> = active_nations(state)
        .into_iter()
        .map(|nation| {
            let delta = state.supply_center_count(&nation) as isize - state.unit_count(&nation) as isize;
            (nation, delta)
        })
        .collect();
    let mut used: BTreeMap<&Nation, isize> = BTreeMap::new();
    let mut claimed: BTreeSet<Province> = BTreeSet::new();

    for issued in orders {
        let delta = balance.get(&issued.nation).copied().unwrap_or(0);
        let spent = used.entry(&issued.nation).or_default();

        let result = match &issued.order {
            Order::Build { unit_type } => {
                if delta <= *spent {
                    OrderResult::ExcessAdjustment
                } else if can_build(graph, state, &issued.nation, &issued.province, *unit_type)
                    && claimed.insert(issued.province.super_province())
                {
                    *spent += 1;
                    outcome
                        .builds
                        .push((issued.province.clone(), Unit::new(*unit_type, issued.nation.clone())));
                    OrderResult::Succeeded
                } else {
                    OrderResult::IllegalBuild
                }
            }
            Order::Disband => match state.unit_at(&issued.province) {
                None => OrderResult::MissingUnit,
                Some((_, unit)) if unit.nation != issued.nation => OrderResult::WrongNation,
                Some(_) if -delta <= *spent => OrderResult::ExcessAdjustment,
                Some((key, _)) => {
                    if claimed.insert(key.super_province()) {
                        *spent += 1;
                        outcome.disbands.push(key.clone());
                        OrderResult::Succeeded
                    } else {
                        OrderResult::IllegalDisband
                    }
                }
            },
            _ => OrderResult::WrongPhase,
        };
        outcome.results.insert(issued.province.clone(), result);
    }

    for (nation, delta) in &balance {
        let missing = -delta - used.get(nation).copied().unwrap_or(0);
        if *delta < 0 && missing > 0 {
            let forced = civil_disorder(graph, state, nation, &outcome.disbands, missing as usize);
            outcome.disbands.extend(forced);
        }
    }

    outcome
}

/// Returns true if `nation` may build a `unit_type` at `province`.
fn can_build(graph: &Graph, state: &GameState, nation: &Nation, province: &Province, unit_type: UnitType) -> bool {
    let parent = province.super_province();
    let is_home = graph
        .node(&parent)
        .is_some_and(|node| node.supply_center && node.home.as_ref() == Some(nation));
    is_home
        && state.supply_centers.get(&parent) == Some(nation)
        && !state.is_occupied(province)
        && graph.can_hold(province, unit_type)
}

/// Picks `count` units of `nation` to disband, furthest from home first.
///
/// Ties are broken by disbanding fleets before armies, then by province.
fn civil_disorder(
    graph: &Graph,
    state: &GameState,
    nation: &Nation,
    already: &[Province],
    count: usize,
) -> Vec<Province> {
    let homes: BTreeSet<Province> = graph.home_centers(nation).cloned().collect();

    let mut candidates: Vec<(usize, bool, &Province)> = state
        .units
        .iter()
        .filter(|(key, unit)| &unit.nation == nation && !already.contains(key))
        .map(|(key, unit)| {
            let dist = graph.distance_to(key, &homes).unwrap_or(usize::MAX);
            (dist, unit.unit_type == UnitType::Fleet, key)
        })
        .collect();

    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(a.2.cmp(b.2)));
    candidates.into_iter().take(count).map(|(_, _, key)| key.clone()).collect()
}

/// Applies builds and disbands to the board.
pub fn apply_adjustments(state: &mut GameState, outcome: &AdjustmentOutcome) {
    for key in &outcome.disbands {
        state.units.remove(key);
    }
    for (province, unit) in &outcome.builds {
        state.place_unit(province.clone(), unit.clone());
    }
}

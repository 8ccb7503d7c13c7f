//! Retreat-phase resolution.
//!
//! Resolves retreat orders: if two dislodged units retreat to the same
//! province, both are disbanded. Unordered dislodged units are disbanded
//! (civil disorder), as are units whose retreat is invalid.

use std::collections::BTreeMap;

use crate::board::{GameState, Graph, IssuedOrder, Order, Province, Unit};

use super::OrderResult;

/// Per-order results plus the retreats that succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetreatOutcome {
    pub results: BTreeMap<Province, OrderResult>,
    /// Successful retreats as (dislodged key, exact destination).
    pub retreats: Vec<(Province, Province)>,
}

/// Returns the key and unit dislodged from `province` (any coast of it).
fn dislodged_at<'a>(state: &'a GameState, province: &Province) -> Option<(&'a Province, &'a Unit)> {
    if let Some(entry) = state.dislodged.get_key_value(province) {
        return Some(entry);
    }
    state
        .dislodged
        .iter()
        .find(|(key, _)| key.same_super(province))
}

/// Resolves retreat-phase orders.
///
/// A retreat must go to an adjacent province that is empty and is not the
/// province the attacker came from.
pub fn resolve_retreats(graph: &Graph, state: &GameState, orders: &[IssuedOrder]) -> RetreatOutcome {
    let mut results = BTreeMap::new();
    let mut valid: Vec<(Province, Province)> = Vec::new();

    for issued in orders {
        let Some((key, unit)) = dislodged_at(state, &issued.province) else {
            results.insert(issued.province.clone(), OrderResult::MissingUnit);
            continue;
        };
        if unit.nation != issued.nation {
            results.insert(key.clone(), OrderResult::WrongNation);
            continue;
        }

        let result = match &issued.order {
            Order::Disband => OrderResult::Succeeded,
            Order::Move { dest } => {
                let attacker = state.dislodgers.get(key);
                match graph.move_destination(key, dest, unit.unit_type) {
                    Some(dest)
                        if !state.is_occupied(&dest)
                            && attacker.map_or(true, |from| !from.same_super(&dest)) =>
                    {
                        valid.push((key.clone(), dest));
                        continue;
                    }
                    _ => OrderResult::IllegalRetreat,
                }
            }
            _ => OrderResult::WrongPhase,
        };
        results.insert(key.clone(), result);
    }

    let mut targets: BTreeMap<Province, usize> = BTreeMap::new();
    for (_, dest) in &valid {
        *targets.entry(dest.super_province()).or_default() += 1;
    }

    let mut retreats = Vec::new();
    for (key, dest) in valid {
        if targets.get(&dest.super_province()).copied().unwrap_or(0) > 1 {
            results.insert(key, OrderResult::Bounced);
        } else {
            results.insert(key.clone(), OrderResult::Succeeded);
            retreats.push((key, dest));
        }
    }

    RetreatOutcome { results, retreats }
}

/// Applies successful retreats. All other dislodged units are removed.
pub fn apply_retreats(state: &mut GameState, retreats: &[(Province, Province)]) {
    for (from, dest) in retreats {
        if let Some(unit) = state.dislodged.remove(from) {
            state.units.insert(dest.clone(), unit);
        }
    }
    state.dislodged.clear();
    state.dislodgers.clear();
}

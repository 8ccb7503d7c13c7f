//! Movement-phase resolution.
//!
//! Every unit has strength one, so a move succeeds exactly when no other
//! unit contests its destination and the destination is empty or being
//! vacated by a successful move. Head-to-head swaps bounce. Circular
//! movement of three or more units succeeds.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::{GameState, Graph, IssuedOrder, Order, Province, ProvinceType, UnitType};

use super::OrderResult;

/// Per-order results plus the moves that succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementOutcome {
    pub results: BTreeMap<Province, OrderResult>,
    /// Successful moves as (unit key, exact destination).
    pub moves: Vec<(Province, Province)>,
}

/// A validated move waiting for conflict resolution.
struct Candidate {
    key: Province,
    dest: Province,
}

/// Resolves movement-phase orders. Unordered units hold.
pub fn resolve_movement(graph: &Graph, state: &GameState, orders: &[IssuedOrder]) -> MovementOutcome {
    let mut results = BTreeMap::new();
    // Keyed by the parent province the moving unit leaves.
    let mut candidates: BTreeMap<Province, Candidate> = BTreeMap::new();

    for issued in orders {
        let Some((key, unit)) = state.unit_at(&issued.province) else {
            results.insert(issued.province.clone(), OrderResult::MissingUnit);
            continue;
        };
        if unit.nation != issued.nation {
            results.insert(key.clone(), OrderResult::WrongNation);
            continue;
        }

        let result = match &issued.order {
            Order::Hold => OrderResult::Succeeded,
            Order::Move { dest } => match graph.move_destination(key, dest, unit.unit_type) {
                Some(dest) => {
                    candidates.insert(key.super_province(), Candidate { key: key.clone(), dest });
                    continue;
                }
                None => OrderResult::IllegalMove,
            },
            // Convoy chains are not adjudicated.
            Order::MoveViaConvoy { .. } => OrderResult::NoConvoyPath,
            Order::Support { supported, dest } => {
                let reaches = match dest {
                    Some(dest) => graph.is_adjacent(key, dest, unit.unit_type)
                        || graph.move_destination(key, dest, unit.unit_type).is_some(),
                    None => graph.is_adjacent(key, supported, unit.unit_type)
                        || graph.move_destination(key, supported, unit.unit_type).is_some(),
                };
                if state.is_occupied(supported) && reaches {
                    OrderResult::Succeeded
                } else {
                    OrderResult::IllegalSupport
                }
            }
            Order::Convoy { .. } => {
                let at_sea = graph
                    .node(key)
                    .is_some_and(|node| node.province_type == ProvinceType::Sea && node.parent.is_none());
                if unit.unit_type == UnitType::Fleet && at_sea {
                    OrderResult::Succeeded
                } else {
                    OrderResult::IllegalConvoy
                }
            }
            Order::Build { .. } | Order::Disband => OrderResult::WrongPhase,
        };
        results.insert(key.clone(), result);
    }

    let failed = bounced_moves(state, &candidates);

    let mut moves = Vec::new();
    for (src, candidate) in candidates {
        if failed.contains(&src) {
            results.insert(candidate.key, OrderResult::Bounced);
        } else {
            results.insert(candidate.key.clone(), OrderResult::Succeeded);
            moves.push((candidate.key, candidate.dest));
        }
    }

    MovementOutcome { results, moves }
}

/// Returns the origins of every move that bounces.
fn bounced_moves(state: &GameState, candidates: &BTreeMap<Province, Candidate>) -> BTreeSet<Province> {
    let mut contested: BTreeMap<Province, usize> = BTreeMap::new();
    for candidate in candidates.values() {
        *contested.entry(candidate.dest.super_province()).or_default() += 1;
    }

    let mut failed: BTreeSet<Province> = candidates
        .iter()
        .filter(|(_, c)| contested.get(&c.dest.super_province()).copied().unwrap_or(0) > 1)
        .map(|(src, _)| src.clone())
        .collect();

    // A failed move leaves its unit in place, which can block further moves.
    loop {
        let mut changed = false;
        for (src, candidate) in candidates {
            if failed.contains(src) {
                continue;
            }
            let target = candidate.dest.super_province();
            let Some((occupant, _)) = state.unit_at(&target) else {
                continue;
            };
            let occupant_src = occupant.super_province();
            let blocked = match candidates.get(&occupant_src) {
                None => true,
                Some(other) => other.dest.same_super(src) || failed.contains(&occupant_src),
            };
            if blocked {
                failed.insert(src.clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    failed
}

/// Applies successful moves to the board.
pub fn apply_movement(state: &mut GameState, moves: &[(Province, Province)]) {
    let moving: Vec<_> = moves
        .iter()
        .filter_map(|(src, dest)| state.units.remove(src).map(|unit| (dest.clone(), unit)))
        .collect();
    for (dest, unit) in moving {
        state.units.insert(dest, unit);
    }
}

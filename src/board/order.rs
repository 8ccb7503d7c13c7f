//! Order types and order-token parsing.
//!
//! Clients submit orders as token lists keyed by nation and province, e.g.
//! `{"England": {"lon": ["Move", "nth"]}}`. The first token is the verb
//! (an [`OrderType`] name), the rest are its parameters. The province key is
//! the ordered unit's location, or the build site for `Build`.
//!
//! | Verb            | Parameters          | Example                       |
//! |-----------------|---------------------|-------------------------------|
//! | `Hold`          | none                | `["Hold"]`                    |
//! | `Move`          | destination         | `["Move", "nth"]`             |
//! | `MoveViaConvoy` | destination         | `["MoveViaConvoy", "bel"]`    |
//! | `Support`       | supported, [dest]   | `["Support", "yor", "nth"]`   |
//! | `Convoy`        | from, to            | `["Convoy", "lon", "bel"]`    |
//! | `Build`         | unit type           | `["Build", "Fleet"]`          |
//! | `Disband`       | none                | `["Disband"]`                 |
//!
//! In a retreat phase, `Move` retreats the dislodged unit.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::province::{Nation, Province};
use super::unit::UnitType;

/// Order tokens as submitted: nation -> province -> tokens.
pub type OrderSubmission = BTreeMap<Nation, BTreeMap<Province, Vec<String>>>;

/// The kinds of order a variant may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Build,
    Move,
    MoveViaConvoy,
    Hold,
    Convoy,
    Support,
    Disband,
}

/// Every order type, in the order variants usually list them.
pub const ALL_ORDER_TYPES: [OrderType; 7] = [
    OrderType::Build,
    OrderType::Move,
    OrderType::MoveViaConvoy,
    OrderType::Hold,
    OrderType::Convoy,
    OrderType::Support,
    OrderType::Disband,
];

impl OrderType {
    /// Returns the verb used in order tokens.
    pub const fn name(self) -> &'static str {
        match self {
            OrderType::Build => "Build",
            OrderType::Move => "Move",
            OrderType::MoveViaConvoy => "MoveViaConvoy",
            OrderType::Hold => "Hold",
            OrderType::Convoy => "Convoy",
            OrderType::Support => "Support",
            OrderType::Disband => "Disband",
        }
    }

    /// Parses a verb, ignoring ASCII case.
    pub fn from_verb(verb: &str) -> Option<OrderType> {
        ALL_ORDER_TYPES
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(verb))
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur when parsing order tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("empty order for {nation} in {province}")]
    Empty { nation: Nation, province: Province },

    #[error("unknown order verb '{verb}' for {nation} in {province}")]
    UnknownVerb {
        nation: Nation,
        province: Province,
        verb: String,
    },

    #[error("{order_type} order for {nation} in {province} has {found} parameters, expected {expected}")]
    WrongArity {
        nation: Nation,
        province: Province,
        order_type: OrderType,
        expected: &'static str,
        found: usize,
    },

    #[error("unknown unit type '{found}' for {nation} in {province}")]
    UnknownUnitType {
        nation: Nation,
        province: Province,
        found: String,
    },

    #[error("{order_type} orders are not supported by this variant ({nation} in {province})")]
    Unsupported {
        nation: Nation,
        province: Province,
        order_type: OrderType,
    },

    #[error("more than one order for {province} ({first} and {second})")]
    DuplicateProvince {
        province: Province,
        first: Nation,
        second: Nation,
    },
}

/// A parsed order, without the ordered unit's location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Order {
    Hold,
    Move {
        dest: Province,
    },
    MoveViaConvoy {
        dest: Province,
    },
    /// Support hold when `dest` is `None`, support move otherwise.
    Support {
        supported: Province,
        dest: Option<Province>,
    },
    Convoy {
        from: Province,
        to: Province,
    },
    Build {
        unit_type: UnitType,
    },
    Disband,
}

impl Order {
    /// Returns the order type of this order.
    pub const fn order_type(&self) -> OrderType {
        match self {
            Order::Hold => OrderType::Hold,
            Order::Move { .. } => OrderType::Move,
            Order::MoveViaConvoy { .. } => OrderType::MoveViaConvoy,
            Order::Support { .. } => OrderType::Support,
            Order::Convoy { .. } => OrderType::Convoy,
            Order::Build { .. } => OrderType::Build,
            Order::Disband => OrderType::Disband,
        }
    }
}

/// An order together with who issued it and where.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssuedOrder {
    pub nation: Nation,
    pub province: Province,
    pub order: Order,
}

/// Parses one province's token list.
pub fn parse_order(nation: &Nation, province: &Province, tokens: &[String]) -> Result<Order, OrderError> {
    let Some((verb, params)) = tokens.split_first() else {
        return Err(OrderError::Empty {
            nation: nation.clone(),
            province: province.clone(),
        });
    };
    let order_type = OrderType::from_verb(verb).ok_or_else(|| OrderError::UnknownVerb {
        nation: nation.clone(),
        province: province.clone(),
        verb: verb.clone(),
    })?;

    let arity = |expected: &'static str| OrderError::WrongArity {
        nation: nation.clone(),
        province: province.clone(),
        order_type,
        expected,
        found: params.len(),
    };
    let prov = |token: &String| Province::new(token.as_str());

    match (order_type, params) {
        (OrderType::Hold, []) => Ok(Order::Hold),
        (OrderType::Hold, _) => Err(arity("0")),

        (OrderType::Move, [dest]) => Ok(Order::Move { dest: prov(dest) }),
        (OrderType::Move, _) => Err(arity("1")),

        (OrderType::MoveViaConvoy, [dest]) => Ok(Order::MoveViaConvoy { dest: prov(dest) }),
        (OrderType::MoveViaConvoy, _) => Err(arity("1")),

        (OrderType::Support, [supported]) => Ok(Order::Support {
            supported: prov(supported),
            dest: None,
        }),
        (OrderType::Support, [supported, dest]) => {
            // Supporting a unit "to" its own province is a support hold.
            let dest = (dest != supported).then(|| prov(dest));
            Ok(Order::Support {
                supported: prov(supported),
                dest,
            })
        }
        (OrderType::Support, _) => Err(arity("1 or 2")),

        (OrderType::Convoy, [from, to]) => Ok(Order::Convoy {
            from: prov(from),
            to: prov(to),
        }),
        (OrderType::Convoy, _) => Err(arity("2")),

        (OrderType::Build, [unit]) => {
            let unit_type = UnitType::from_token(unit).ok_or_else(|| OrderError::UnknownUnitType {
                nation: nation.clone(),
                province: province.clone(),
                found: unit.clone(),
            })?;
            Ok(Order::Build { unit_type })
        }
        (OrderType::Build, _) => Err(arity("1")),

        (OrderType::Disband, []) => Ok(Order::Disband),
        (OrderType::Disband, _) => Err(arity("0")),
    }
}

/// Parses a whole submission, rejecting order types outside `supported` and
/// a second order for a province that already has one.
pub fn parse_submission(submission: &OrderSubmission, supported: &[OrderType]) -> Result<Vec<IssuedOrder>, OrderError> {
    let mut seen: BTreeMap<Province, &Nation> = BTreeMap::new();
    let mut orders = Vec::new();

    for (nation, provinces) in submission {
        for (province, tokens) in provinces {
            let order = parse_order(nation, province, tokens)?;
            if !supported.contains(&order.order_type()) {
                return Err(OrderError::Unsupported {
                    nation: nation.clone(),
                    province: province.clone(),
                    order_type: order.order_type(),
                });
            }
            let key = province.super_province();
            if let Some(first) = seen.insert(key.clone(), nation) {
                return Err(OrderError::DuplicateProvince {
                    province: key,
                    first: first.clone(),
                    second: nation.clone(),
                });
            }
            orders.push(IssuedOrder {
                nation: nation.clone(),
                province: province.clone(),
                order,
            });
        }
    }

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    fn parse(ts: &[&str]) -> Result<Order, OrderError> {
        parse_order(&"England".into(), &"lon".into(), &tokens(ts))
    }

    #[test]
    fn parses_every_verb() {
        assert_eq!(parse(&["Hold"]), Ok(Order::Hold));
        assert_eq!(parse(&["Move", "nth"]), Ok(Order::Move { dest: "nth".into() }));
        assert_eq!(
            parse(&["MoveViaConvoy", "bel"]),
            Ok(Order::MoveViaConvoy { dest: "bel".into() })
        );
        assert_eq!(
            parse(&["Support", "yor", "nth"]),
            Ok(Order::Support {
                supported: "yor".into(),
                dest: Some("nth".into())
            })
        );
        assert_eq!(
            parse(&["Convoy", "yor", "bel"]),
            Ok(Order::Convoy {
                from: "yor".into(),
                to: "bel".into()
            })
        );
        assert_eq!(
            parse(&["Build", "Fleet"]),
            Ok(Order::Build {
                unit_type: UnitType::Fleet
            })
        );
        assert_eq!(parse(&["Disband"]), Ok(Order::Disband));
    }

    #[test]
    fn support_to_own_province_is_support_hold() {
        assert_eq!(
            parse(&["Support", "wal", "wal"]),
            Ok(Order::Support {
                supported: "wal".into(),
                dest: None
            })
        );
        assert_eq!(
            parse(&["Support", "wal"]),
            Ok(Order::Support {
                supported: "wal".into(),
                dest: None
            })
        );
    }

    #[test]
    fn verbs_ignore_case() {
        assert_eq!(parse(&["move", "nth"]), Ok(Order::Move { dest: "nth".into() }));
        assert_eq!(parse(&["HOLD"]), Ok(Order::Hold));
    }

    #[test]
    fn rejects_empty_and_unknown() {
        assert!(matches!(parse(&[]), Err(OrderError::Empty { .. })));
        assert!(matches!(parse(&["Dance"]), Err(OrderError::UnknownVerb { verb, .. }) if verb == "Dance"));
        assert!(matches!(
            parse(&["Build", "Zeppelin"]),
            Err(OrderError::UnknownUnitType { found, .. }) if found == "Zeppelin"
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(matches!(parse(&["Move"]), Err(OrderError::WrongArity { found: 0, .. })));
        assert!(matches!(parse(&["Hold", "nth"]), Err(OrderError::WrongArity { found: 1, .. })));
        assert!(matches!(parse(&["Convoy", "a"]), Err(OrderError::WrongArity { .. })));
    }

    #[test]
    fn submission_rejects_unsupported_type() {
        let mut submission = OrderSubmission::new();
        submission
            .entry("England".into())
            .or_default()
            .insert("lon".into(), tokens(&["Convoy", "yor", "bel"]));
        let err = parse_submission(&submission, &[OrderType::Hold, OrderType::Move]).unwrap_err();
        assert!(matches!(err, OrderError::Unsupported { order_type: OrderType::Convoy, .. }));
    }

    #[test]
    fn submission_rejects_second_order_for_province() {
        let mut submission = OrderSubmission::new();
        submission
            .entry("Russia".into())
            .or_default()
            .insert("stp/sc".into(), tokens(&["Hold"]));
        submission
            .entry("England".into())
            .or_default()
            .insert("stp".into(), tokens(&["Hold"]));
        let err = parse_submission(&submission, &ALL_ORDER_TYPES).unwrap_err();
        assert!(matches!(err, OrderError::DuplicateProvince { province, .. } if province.as_str() == "stp"));
    }

    #[test]
    fn submission_flattens_all_nations() {
        let mut submission = OrderSubmission::new();
        submission
            .entry("England".into())
            .or_default()
            .insert("lon".into(), tokens(&["Move", "nth"]));
        submission
            .entry("France".into())
            .or_default()
            .insert("par".into(), tokens(&["Hold"]));
        let orders = parse_submission(&submission, &ALL_ORDER_TYPES).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].nation.as_str(), "England");
        assert_eq!(orders[1].order, Order::Hold);
    }
}

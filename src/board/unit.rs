//! Unit types and ownership.

use serde::{Deserialize, Serialize};

use super::province::Nation;

/// The type of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Army,
    Fleet,
}

/// All unit types in canonical order.
pub const ALL_UNIT_TYPES: [UnitType; 2] = [UnitType::Army, UnitType::Fleet];

impl UnitType {
    /// Returns the name used in order tokens and on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            UnitType::Army => "Army",
            UnitType::Fleet => "Fleet",
        }
    }

    /// Parses a unit type from an order token. Accepts the full name in any
    /// case as well as the single-letter `A`/`F` shorthand.
    pub fn from_token(token: &str) -> Option<UnitType> {
        if token.eq_ignore_ascii_case("army") || token.eq_ignore_ascii_case("a") {
            Some(UnitType::Army)
        } else if token.eq_ignore_ascii_case("fleet") || token.eq_ignore_ascii_case("f") {
            Some(UnitType::Fleet)
        } else {
            None
        }
    }
}

/// A military unit on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "Type")]
    pub unit_type: UnitType,
    #[serde(rename = "Nation")]
    pub nation: Nation,
}

impl Unit {
    /// Creates a unit of the given type owned by `nation`.
    pub fn new(unit_type: UnitType, nation: impl Into<Nation>) -> Self {
        Unit {
            unit_type,
            nation: nation.into(),
        }
    }

    /// Shorthand for an army.
    pub fn army(nation: impl Into<Nation>) -> Self {
        Unit::new(UnitType::Army, nation)
    }

    /// Shorthand for a fleet.
    pub fn fleet(nation: impl Into<Nation>) -> Self {
        Unit::new(UnitType::Fleet, nation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_type_from_token() {
        assert_eq!(UnitType::from_token("Army"), Some(UnitType::Army));
        assert_eq!(UnitType::from_token("fleet"), Some(UnitType::Fleet));
        assert_eq!(UnitType::from_token("A"), Some(UnitType::Army));
        assert_eq!(UnitType::from_token("F"), Some(UnitType::Fleet));
        assert_eq!(UnitType::from_token("x"), None);
    }

    #[test]
    fn unit_wire_shape() {
        let json = serde_json::to_value(Unit::fleet("England")).unwrap();
        assert_eq!(json, serde_json::json!({"Type": "Fleet", "Nation": "England"}));
    }
}

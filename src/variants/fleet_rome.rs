//! Classical, but Italy starts with a fleet in Rome.

use crate::board::{Unit, UnitType};
use crate::engine::StartPosition;
use crate::error::EngineError;
use crate::variant::Variant;

use super::classical;

pub const NAME: &str = "Fleet Rome";

fn start_position() -> StartPosition {
    let mut start = classical::start_position();
    for (province, unit) in &mut start.units {
        if province.as_str() == "rom" {
            *unit = Unit::new(UnitType::Fleet, unit.nation.clone());
        }
    }
    start
}

pub fn variant() -> Result<Variant, EngineError> {
    let mut info = classical::info(NAME);
    info.created_by = "Richard Sharp".into();
    info.description = "Classical Diplomacy, but Italy starts with a fleet in Rome.".into();
    classical::with_start(info, start_position())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rome_holds_a_fleet() {
        let state = variant().unwrap().start().unwrap();
        assert_eq!(state.units.get("rom"), Some(&Unit::fleet("Italy")));
        assert_eq!(state.units.get("ven"), Some(&Unit::army("Italy")));
        assert_eq!(state.units.len(), 22);
    }

    #[test]
    fn shares_the_classical_map() {
        let fleet_rome = variant().unwrap();
        let classical = classical::variant().unwrap();
        assert_eq!(fleet_rome.svg_version(), classical.svg_version());
        assert_eq!(fleet_rome.graph(), classical.graph());
    }
}

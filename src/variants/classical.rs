//! The standard seven-nation map.
//!
//! 75 provinces, 34 supply centers, 18 needed for a solo victory. Bulgaria,
//! Spain and St Petersburg have split coasts.

use std::sync::Arc;

use crate::board::{Graph, ProvinceType, ProvinceType::*, Unit, UnitType};
use crate::engine::{StandardEngine, StartPosition};
use crate::error::EngineError;
use crate::variant::{Variant, VariantInfo};

pub const NAME: &str = "Classical";

pub const NATIONS: [&str; 7] = ["Austria", "England", "France", "Germany", "Italy", "Russia", "Turkey"];

const NATION_COLORS: [(&str, &str); 7] = [
    ("Austria", "#E53935"),
    ("England", "#1E3A8A"),
    ("France", "#4FC3F7"),
    ("Germany", "#5D4037"),
    ("Italy", "#43A047"),
    ("Russia", "#9E9E9E"),
    ("Turkey", "#FBC02D"),
];

const MAP: &[u8] = include_bytes!("../../assets/maps/classical.svg");

/// (id, long name, terrain, supply center, home nation)
const PROVINCES: &[(&str, &str, ProvinceType, bool, Option<&str>)] = &[
    ("adr", "Adriatic Sea", Sea, false, None),
    ("aeg", "Aegean Sea", Sea, false, None),
    ("alb", "Albania", Coastal, false, None),
    ("ank", "Ankara", Coastal, true, Some("Turkey")),
    ("apu", "Apulia", Coastal, false, None),
    ("arm", "Armenia", Coastal, false, None),
    ("bal", "Baltic Sea", Sea, false, None),
    ("bar", "Barents Sea", Sea, false, None),
    ("bel", "Belgium", Coastal, true, None),
    ("ber", "Berlin", Coastal, true, Some("Germany")),
    ("bla", "Black Sea", Sea, false, None),
    ("boh", "Bohemia", Land, false, None),
    ("bot", "Gulf of Bothnia", Sea, false, None),
    ("bre", "Brest", Coastal, true, Some("France")),
    ("bud", "Budapest", Land, true, Some("Austria")),
    ("bul", "Bulgaria", Coastal, true, None),
    ("bur", "Burgundy", Land, false, None),
    ("cly", "Clyde", Coastal, false, None),
    ("con", "Constantinople", Coastal, true, Some("Turkey")),
    ("den", "Denmark", Coastal, true, None),
    ("eas", "Eastern Mediterranean", Sea, false, None),
    ("edi", "Edinburgh", Coastal, true, Some("England")),
    ("eng", "English Channel", Sea, false, None),
    ("fin", "Finland", Coastal, false, None),
    ("gal", "Galicia", Land, false, None),
    ("gas", "Gascony", Coastal, false, None),
    ("gol", "Gulf of Lyon", Sea, false, None),
    ("gre", "Greece", Coastal, true, None),
    ("hel", "Heligoland Bight", Sea, false, None),
    ("hol", "Holland", Coastal, true, None),
    ("ion", "Ionian Sea", Sea, false, None),
    ("iri", "Irish Sea", Sea, false, None),
    ("kie", "Kiel", Coastal, true, Some("Germany")),
    ("lon", "London", Coastal, true, Some("England")),
    ("lvn", "Livonia", Coastal, false, None),
    ("lvp", "Liverpool", Coastal, true, Some("England")),
    ("mao", "Mid-Atlantic Ocean", Sea, false, None),
    ("mar", "Marseilles", Coastal, true, Some("France")),
    ("mos", "Moscow", Land, true, Some("Russia")),
    ("mun", "Munich", Land, true, Some("Germany")),
    ("naf", "North Africa", Coastal, false, None),
    ("nao", "North Atlantic Ocean", Sea, false, None),
    ("nap", "Naples", Coastal, true, Some("Italy")),
    ("nrg", "Norwegian Sea", Sea, false, None),
    ("nth", "North Sea", Sea, false, None),
    ("nwy", "Norway", Coastal, true, None),
    ("par", "Paris", Land, true, Some("France")),
    ("pic", "Picardy", Coastal, false, None),
    ("pie", "Piedmont", Coastal, false, None),
    ("por", "Portugal", Coastal, true, None),
    ("pru", "Prussia", Coastal, false, None),
    ("rom", "Rome", Coastal, true, Some("Italy")),
    ("ruh", "Ruhr", Land, false, None),
    ("rum", "Rumania", Coastal, true, None),
    ("ser", "Serbia", Land, true, None),
    ("sev", "Sevastopol", Coastal, true, Some("Russia")),
    ("sil", "Silesia", Land, false, None),
    ("ska", "Skagerrak", Sea, false, None),
    ("smy", "Smyrna", Coastal, true, Some("Turkey")),
    ("spa", "Spain", Coastal, true, None),
    ("stp", "St. Petersburg", Coastal, true, Some("Russia")),
    ("swe", "Sweden", Coastal, true, None),
    ("syr", "Syria", Coastal, false, None),
    ("tri", "Trieste", Coastal, true, Some("Austria")),
    ("tun", "Tunisia", Coastal, true, None),
    ("tus", "Tuscany", Coastal, false, None),
    ("tyr", "Tyrolia", Land, false, None),
    ("tys", "Tyrrhenian Sea", Sea, false, None),
    ("ukr", "Ukraine", Land, false, None),
    ("ven", "Venice", Coastal, true, Some("Italy")),
    ("vie", "Vienna", Land, true, Some("Austria")),
    ("wal", "Wales", Coastal, false, None),
    ("war", "Warsaw", Land, true, Some("Russia")),
    ("wes", "Western Mediterranean", Sea, false, None),
    ("yor", "Yorkshire", Coastal, false, None),];

const SPLIT_COASTS: &[(&str, &str)] = &[
    ("bul", "ec"),
    ("bul", "sc"),
    ("spa", "nc"),
    ("spa", "sc"),
    ("stp", "nc"),
    ("stp", "sc"),
];

const BOTH_EDGES: &[(&str, &str)] = &[
    ("alb", "gre"), ("alb", "tri"), ("ank", "arm"), ("ank", "con"), ("apu", "nap"),
    ("apu", "ven"), ("arm", "sev"), ("bel", "hol"), ("bel", "pic"), ("ber", "kie"),
    ("ber", "pru"), ("bre", "gas"), ("bre", "pic"), ("cly", "edi"), ("cly", "lvp"),
    ("con", "smy"), ("den", "kie"), ("den", "swe"), ("edi", "yor"), ("fin", "swe"),
    ("lon", "wal"), ("lon", "yor"), ("lvn", "pru"), ("lvp", "wal"), ("mar", "pie"),
    ("naf", "tun"), ("nap", "rom"), ("nwy", "swe"), ("pie", "tus"), ("rom", "tus"),
    ("rum", "sev"), ("smy", "syr"), ("tri", "ven"),
];

const FLEET_EDGES: &[(&str, &str)] = &[
    ("adr", "alb"), ("adr", "apu"), ("adr", "ion"), ("adr", "tri"), ("adr", "ven"),
    ("aeg", "bul/sc"), ("aeg", "con"), ("aeg", "eas"), ("aeg", "gre"), ("aeg", "ion"),
    ("aeg", "smy"), ("alb", "ion"), ("ank", "bla"), ("apu", "ion"), ("arm", "bla"),
    ("bal", "ber"), ("bal", "bot"), ("bal", "den"), ("bal", "kie"), ("bal", "lvn"),
    ("bal", "pru"), ("bal", "swe"), ("bar", "nrg"), ("bar", "nwy"), ("bar", "stp/nc"),
    ("bel", "eng"), ("bel", "nth"), ("bla", "bul/ec"), ("bla", "con"), ("bla", "rum"),
    ("bla", "sev"), ("bot", "fin"), ("bot", "lvn"), ("bot", "stp/sc"), ("bot", "swe"),
    ("bre", "eng"), ("bre", "mao"), ("bul/ec", "con"), ("bul/ec", "rum"), ("bul/sc", "con"),
    ("bul/sc", "gre"), ("cly", "nao"), ("cly", "nrg"), ("den", "hel"), ("den", "nth"),
    ("den", "ska"), ("eas", "ion"), ("eas", "smy"), ("eas", "syr"), ("edi", "nrg"),
    ("edi", "nth"), ("eng", "iri"), ("eng", "lon"), ("eng", "mao"), ("eng", "nth"),
    ("eng", "pic"), ("eng", "wal"), ("fin", "stp/sc"), ("gas", "mao"), ("gas", "spa/nc"),
    ("gol", "mar"), ("gol", "pie"), ("gol", "spa/sc"), ("gol", "tus"), ("gol", "tys"),
    ("gol", "wes"), ("gre", "ion"), ("hel", "hol"), ("hel", "kie"), ("hel", "nth"),
    ("hol", "nth"), ("ion", "nap"), ("ion", "tun"), ("ion", "tys"), ("iri", "lvp"),
    ("iri", "mao"), ("iri", "nao"), ("iri", "wal"), ("lon", "nth"), ("lvn", "stp/sc"),
    ("lvp", "nao"), ("mao", "naf"), ("mao", "nao"), ("mao", "por"), ("mao", "spa/nc"),
    ("mao", "spa/sc"), ("mao", "wes"), ("mar", "spa/sc"), ("naf", "wes"), ("nao", "nrg"),
    ("nap", "tys"), ("nrg", "nth"), ("nrg", "nwy"), ("nth", "nwy"), ("nth", "ska"),
    ("nth", "yor"), ("nwy", "ska"), ("nwy", "stp/nc"), ("por", "spa/nc"), ("por", "spa/sc"),
    ("rom", "tys"), ("ska", "swe"), ("spa/sc", "wes"), ("tun", "tys"), ("tun", "wes"),
    ("tus", "tys"), ("tys", "wes"),
];

const ARMY_EDGES: &[(&str, &str)] = &[
    ("alb", "ser"), ("ank", "smy"), ("apu", "rom"), ("arm", "smy"), ("arm", "syr"),
    ("bel", "bur"), ("bel", "ruh"), ("ber", "mun"), ("ber", "sil"), ("boh", "gal"),
    ("boh", "mun"), ("boh", "sil"), ("boh", "tyr"), ("boh", "vie"), ("bre", "par"),
    ("bud", "gal"), ("bud", "rum"), ("bud", "ser"), ("bud", "tri"), ("bud", "vie"),
    ("bul", "con"), ("bul", "gre"), ("bul", "rum"), ("bul", "ser"), ("bur", "gas"),
    ("bur", "mar"), ("bur", "mun"), ("bur", "par"), ("bur", "pic"), ("bur", "ruh"),
    ("edi", "lvp"), ("fin", "nwy"), ("fin", "stp"), ("gal", "rum"), ("gal", "sil"),
    ("gal", "ukr"), ("gal", "vie"), ("gal", "war"), ("gas", "mar"), ("gas", "par"),
    ("gas", "spa"), ("gre", "ser"), ("hol", "ruh"), ("kie", "mun"), ("kie", "ruh"),
    ("lvn", "mos"), ("lvn", "stp"), ("lvn", "war"), ("lvp", "yor"), ("mar", "spa"),
    ("mos", "sev"), ("mos", "stp"), ("mos", "ukr"), ("mos", "war"), ("mun", "ruh"),
    ("mun", "sil"), ("mun", "tyr"), ("nwy", "stp"), ("par", "pic"), ("pie", "tyr"),
    ("pie", "ven"), ("por", "spa"), ("pru", "sil"), ("pru", "war"), ("rom", "ven"),
    ("rum", "ser"), ("rum", "ukr"), ("ser", "tri"), ("sev", "ukr"), ("sil", "war"),
    ("tri", "tyr"), ("tri", "vie"), ("tus", "ven"), ("tyr", "ven"), ("tyr", "vie"),
    ("ukr", "war"), ("wal", "yor"),
];

/// Spring 1901 units.
const START_UNITS: &[(&str, UnitType, &str)] = &[
    ("vie", UnitType::Army, "Austria"),
    ("bud", UnitType::Army, "Austria"),
    ("tri", UnitType::Fleet, "Austria"),
    ("lon", UnitType::Fleet, "England"),
    ("edi", UnitType::Fleet, "England"),
    ("lvp", UnitType::Army, "England"),
    ("bre", UnitType::Fleet, "France"),
    ("par", UnitType::Army, "France"),
    ("mar", UnitType::Army, "France"),
    ("kie", UnitType::Fleet, "Germany"),
    ("ber", UnitType::Army, "Germany"),
    ("mun", UnitType::Army, "Germany"),
    ("nap", UnitType::Fleet, "Italy"),
    ("rom", UnitType::Army, "Italy"),
    ("ven", UnitType::Army, "Italy"),
    ("stp/sc", UnitType::Fleet, "Russia"),
    ("mos", UnitType::Army, "Russia"),
    ("war", UnitType::Army, "Russia"),
    ("sev", UnitType::Fleet, "Russia"),
    ("ank", UnitType::Fleet, "Turkey"),
    ("con", UnitType::Army, "Turkey"),
    ("smy", UnitType::Army, "Turkey"),
];

/// Builds the classical topology.
pub fn graph() -> Result<Graph, EngineError> {
    let mut builder = Graph::builder();
    for &(id, name, terrain, sc, home) in PROVINCES {
        builder = builder.province(id, name, terrain, sc, home);
    }
    for &(parent, coast) in SPLIT_COASTS {
        builder = builder.coast(parent, coast);
    }
    for &(a, b) in BOTH_EDGES {
        builder = builder.both(a, b);
    }
    for &(a, b) in FLEET_EDGES {
        builder = builder.fleet(a, b);
    }
    for &(a, b) in ARMY_EDGES {
        builder = builder.army(a, b);
    }
    builder.build()
}

/// The standard starting units.
pub fn start_position() -> StartPosition {
    START_UNITS
        .iter()
        .fold(StartPosition::new(1901), |start, &(province, unit_type, nation)| {
            start.unit(province, Unit::new(unit_type, nation))
        })
}

/// Metadata shared by the classical family of variants.
pub fn info(name: &str) -> VariantInfo {
    let mut info = VariantInfo::new(name, &NATIONS);
    info.created_by = "Allan B. Calhamer".into();
    info.version = "1".into();
    info.description = "The original Diplomacy.".into();
    info.rules = "The first to 18 Supply Centers (SC) is the winner.".into();
    info.solo_supply_centers = 18;
    info.nation_colors = NATION_COLORS
        .iter()
        .map(|&(nation, color)| (nation.into(), color.to_string()))
        .collect();
    info
}

/// Assembles a classical-map variant from `start`.
pub(crate) fn with_start(info: VariantInfo, start: StartPosition) -> Result<Variant, EngineError> {
    let graph = Arc::new(graph()?);
    let engine = StandardEngine::new(Arc::clone(&graph), start, MAP);
    Variant::new(info, graph, Arc::new(engine))
}

pub fn variant() -> Result<Variant, EngineError> {
    with_start(info(NAME), start_position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Nation, Province};
    use crate::engine::VariantEngine;

    #[test]
    fn topology_counts() {
        let g = graph().unwrap();
        assert_eq!(g.provinces().count(), 75);
        assert_eq!(g.supply_centers().count(), 34);
        assert_eq!(g.coasts_of(&"stp".into()).len(), 2);
    }

    #[test]
    fn home_centers_per_nation() {
        let g = graph().unwrap();
        let count = |n: &str| g.home_centers(&Nation::new(n)).count();
        assert_eq!(count("Russia"), 4);
        for nation in ["Austria", "England", "France", "Germany", "Italy", "Turkey"] {
            assert_eq!(count(nation), 3, "{}", nation);
        }
    }

    #[test]
    fn known_adjacencies() {
        let g = graph().unwrap();
        assert!(g.is_adjacent(&"lon".into(), &"nth".into(), UnitType::Fleet));
        assert!(g.is_adjacent(&"lon".into(), &"wal".into(), UnitType::Army));
        assert!(!g.is_adjacent(&"lon".into(), &"nth".into(), UnitType::Army));
        assert!(g.is_adjacent(&"mos".into(), &"stp".into(), UnitType::Army));
        assert!(g.is_adjacent(&"bot".into(), &"stp/sc".into(), UnitType::Fleet));
        assert!(!g.is_adjacent(&"bot".into(), &"stp/nc".into(), UnitType::Fleet));
        assert_eq!(
            g.move_destination(&"mao".into(), &"spa".into(), UnitType::Fleet),
            None,
            "mao borders both coasts of spa"
        );
        assert_eq!(
            g.move_destination(&"gol".into(), &"spa".into(), UnitType::Fleet),
            Some(Province::new("spa/sc"))
        );
    }

    #[test]
    fn start_is_spring_1901() {
        let v = variant().unwrap();
        let state = v.start().unwrap();
        assert_eq!(state.year, 1901);
        assert_eq!(state.units.len(), 22);
        assert_eq!(state.supply_centers.len(), 22);
        assert_eq!(state.units.get("stp/sc"), Some(&Unit::fleet("Russia")));
        assert_eq!(state.supply_center_count(&Nation::new("Russia")), 4);
    }

    #[test]
    fn map_is_bundled() {
        let g = Arc::new(graph().unwrap());
        let engine = StandardEngine::new(g, start_position(), MAP);
        let svg = engine.svg_map().unwrap();
        assert!(svg.starts_with(b"<?xml") || svg.starts_with(b"<svg"));
    }
}

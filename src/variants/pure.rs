//! Seven capitals, every one adjacent to every other.

use std::sync::Arc;

use crate::board::{Graph, ProvinceType, Unit};
use crate::engine::{StandardEngine, StartPosition};
use crate::error::EngineError;
use crate::variant::{Variant, VariantInfo};

use super::classical::NATIONS;

pub const NAME: &str = "Pure";

const MAP: &[u8] = include_bytes!("../../assets/maps/pure.svg");

/// (id, long name, home nation)
const CAPITALS: [(&str, &str, &str); 7] = [
    ("vie", "Vienna", "Austria"),
    ("lon", "London", "England"),
    ("par", "Paris", "France"),
    ("ber", "Berlin", "Germany"),
    ("rom", "Rome", "Italy"),
    ("mos", "Moscow", "Russia"),
    ("con", "Constantinople", "Turkey"),
];

pub fn graph() -> Result<Graph, EngineError> {
    let mut builder = Graph::builder();
    for (id, name, nation) in CAPITALS {
        builder = builder.province(id, name, ProvinceType::Land, true, Some(nation));
    }
    for (i, (a, _, _)) in CAPITALS.iter().enumerate() {
        for (b, _, _) in &CAPITALS[i + 1..] {
            builder = builder.army(a, b);
        }
    }
    builder.build()
}

pub fn variant() -> Result<Variant, EngineError> {
    let graph = Arc::new(graph()?);
    let start = CAPITALS
        .iter()
        .fold(StartPosition::new(1901), |start, (id, _, nation)| {
            start.unit(id, Unit::army(*nation))
        });
    let engine = StandardEngine::new(Arc::clone(&graph), start, MAP);

    let mut info = VariantInfo::new(NAME, &NATIONS);
    info.created_by = "Danny Loeb".into();
    info.version = "1".into();
    info.description = "Each nation has a single home center, adjacent to every other.".into();
    info.rules = "The first to 4 Supply Centers (SC) is the winner. Every province borders every other; there are no fleets.".into();
    info.solo_supply_centers = 4;
    Variant::new(info, graph, Arc::new(engine))
}

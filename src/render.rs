//! Transport projections of engine-native state.
//!
//! [`RenderPhase`] flattens a [`GameState`] into the wire shape clients
//! consume; [`ResolveRequest`] is the inverse direction, the body a client
//! posts to have a phase resolved. Projection never transforms values.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Graph, Nation, OrderSubmission, OrderType, PhaseType, Province, Season, Unit, UnitType};
use crate::engine::OrderResult;
use crate::variant::Variant;

/// One phase as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPhase {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Season")]
    pub season: Season,
    #[serde(rename = "Type")]
    pub phase_type: PhaseType,
    #[serde(rename = "SCs")]
    pub supply_centers: BTreeMap<Province, Nation>,
    #[serde(rename = "Units")]
    pub units: BTreeMap<Province, Unit>,
    /// Name of the variant whose map this phase is drawn on.
    #[serde(rename = "Map")]
    pub map: String,
    #[serde(rename = "Dislodgeds", skip_serializing_if = "BTreeMap::is_empty")]
    pub dislodged: BTreeMap<Province, Unit>,
    #[serde(rename = "Dislodgers", skip_serializing_if = "BTreeMap::is_empty")]
    pub dislodgers: BTreeMap<Province, Province>,
    #[serde(rename = "Resolutions", skip_serializing_if = "BTreeMap::is_empty")]
    pub resolutions: BTreeMap<Province, OrderResult>,
    /// Nation holding enough supply centers for a solo victory.
    #[serde(rename = "Winner", skip_serializing_if = "Option::is_none")]
    pub winner: Option<Nation>,
}

impl RenderPhase {
    /// Projects `state` onto the map `map`.
    pub fn project(state: &GameState, map: &str) -> Self {
        RenderPhase {
            year: state.year,
            season: state.season,
            phase_type: state.phase_type,
            supply_centers: state.supply_centers.clone(),
            units: state.units.clone(),
            map: map.to_string(),
            dislodged: state.dislodged.clone(),
            dislodgers: state.dislodgers.clone(),
            resolutions: BTreeMap::new(),
            winner: None,
        }
    }

    /// Attaches per-order outcomes.
    pub fn with_resolutions(mut self, resolutions: BTreeMap<Province, OrderResult>) -> Self {
        self.resolutions = resolutions;
        self
    }

    pub fn with_winner(mut self, winner: Option<Nation>) -> Self {
        self.winner = winner;
        self
    }
}

/// Body of a resolve request: a phase plus the orders issued in it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolveRequest {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Season")]
    pub season: Season,
    #[serde(rename = "Type")]
    pub phase_type: PhaseType,
    #[serde(rename = "SCs", default)]
    pub supply_centers: BTreeMap<Province, Nation>,
    #[serde(rename = "Units", default)]
    pub units: BTreeMap<Province, Unit>,
    #[serde(rename = "Dislodgeds", default)]
    pub dislodged: BTreeMap<Province, Unit>,
    #[serde(rename = "Dislodgers", default)]
    pub dislodgers: BTreeMap<Province, Province>,
    #[serde(rename = "Orders", default)]
    pub orders: OrderSubmission,
}

impl ResolveRequest {
    /// Splits the request into the engine-native state and the raw orders.
    pub fn into_parts(self) -> (GameState, OrderSubmission) {
        let state = GameState {
            year: self.year,
            season: self.season,
            phase_type: self.phase_type,
            supply_centers: self.supply_centers,
            units: self.units,
            dislodged: self.dislodged,
            dislodgers: self.dislodgers,
        };
        (state, self.orders)
    }
}

/// A variant together with its projected starting phase: the unit of the
/// catalog listing.
#[derive(Debug, Clone)]
pub struct RenderVariant {
    pub variant: Arc<Variant>,
    pub start: RenderPhase,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RenderVariantFields<'a> {
    name: &'a str,
    nations: &'a [Nation],
    phase_types: &'a [PhaseType],
    seasons: &'a [Season],
    unit_types: &'a [UnitType],
    #[serde(rename = "SVGVersion")]
    svg_version: &'a str,
    created_by: &'a str,
    version: &'a str,
    description: &'a str,
    rules: &'a str,
    solo_supply_centers: usize,
    province_long_names: BTreeMap<Province, String>,
    nation_colors: &'a BTreeMap<Nation, String>,
    order_types: &'a [OrderType],
    start: &'a RenderPhase,
    graph: &'a Graph,
}

impl Serialize for RenderVariant {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let variant = &self.variant;
        let info = variant.info();
        RenderVariantFields {
            name: variant.name(),
            nations: &info.nations,
            phase_types: variant.phase_types(),
            seasons: variant.seasons(),
            unit_types: variant.unit_types(),
            svg_version: variant.svg_version(),
            created_by: &info.created_by,
            version: &info.version,
            description: &info.description,
            rules: &info.rules,
            solo_supply_centers: info.solo_supply_centers,
            province_long_names: variant.province_long_names(),
            nation_colors: &info.nation_colors,
            order_types: variant.order_types(),
            start: &self.start,
            graph: variant.graph(),
        }
        .serialize(serializer)
    }
}

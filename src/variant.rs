//! Variant definitions.
//!
//! A [`Variant`] bundles the descriptive metadata of a playable map with its
//! topology and the engine that adjudicates it. The map is rendered once at
//! construction and its content hash becomes the variant's SVG version, so
//! the version changes exactly when the bytes do.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::board::{
    GameState, Graph, IssuedOrder, Nation, OrderType, PhaseType, Province, Season, UnitType,
    ALL_PHASE_TYPES, ALL_SEASONS, ALL_UNIT_TYPES,
};
use crate::engine::{Resolution, VariantEngine};
use crate::error::EngineError;

/// Descriptive metadata of a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantInfo {
    pub name: String,
    pub nations: Vec<Nation>,
    pub order_types: Vec<OrderType>,
    pub created_by: String,
    pub version: String,
    pub description: String,
    pub rules: String,
    /// Supply centers needed for a solo victory.
    pub solo_supply_centers: usize,
    pub nation_colors: BTreeMap<Nation, String>,
}

impl VariantInfo {
    /// Metadata with the given name and nations, accepting every order type.
    pub fn new(name: impl Into<String>, nations: &[&str]) -> Self {
        VariantInfo {
            name: name.into(),
            nations: nations.iter().map(|n| Nation::new(*n)).collect(),
            order_types: crate::board::ALL_ORDER_TYPES.to_vec(),
            created_by: String::new(),
            version: String::new(),
            description: String::new(),
            rules: String::new(),
            solo_supply_centers: 0,
            nation_colors: BTreeMap::new(),
        }
    }
}

/// A registered, immutable variant.
pub struct Variant {
    info: VariantInfo,
    graph: Arc<Graph>,
    engine: Arc<dyn VariantEngine>,
    svg: Arc<[u8]>,
    svg_version: String,
}

impl Variant {
    /// Assembles a variant, rendering its map once.
    pub fn new(info: VariantInfo, graph: Arc<Graph>, engine: Arc<dyn VariantEngine>) -> Result<Self, EngineError> {
        let map = engine.svg_map()?;
        let svg: Arc<[u8]> = Arc::from(&*map);
        let svg_version = content_version(&svg);
        Ok(Variant {
            info,
            graph,
            engine,
            svg,
            svg_version,
        })
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> &VariantInfo {
        &self.info
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn order_types(&self) -> &[OrderType] {
        &self.info.order_types
    }

    pub fn phase_types(&self) -> &'static [PhaseType] {
        &ALL_PHASE_TYPES
    }

    pub fn seasons(&self) -> &'static [Season] {
        &ALL_SEASONS
    }

    pub fn unit_types(&self) -> &'static [UnitType] {
        &ALL_UNIT_TYPES
    }

    /// Long names of every parent province, keyed by id.
    pub fn province_long_names(&self) -> BTreeMap<Province, String> {
        self.graph
            .provinces()
            .map(|(province, node)| (province.clone(), node.name.clone()))
            .collect()
    }

    /// The rendered map.
    pub fn svg(&self) -> Arc<[u8]> {
        Arc::clone(&self.svg)
    }

    /// Hex SHA-256 of the rendered map.
    pub fn svg_version(&self) -> &str {
        &self.svg_version
    }

    /// Produces the starting position.
    pub fn start(&self) -> Result<GameState, EngineError> {
        self.engine.start()
    }

    /// Delegates adjudication of one phase to the engine.
    pub fn resolve(&self, state: GameState, orders: &[IssuedOrder]) -> Result<Resolution, EngineError> {
        self.engine.resolve(state, orders)
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.info.name)
            .field("svg_version", &self.svg_version)
            .finish_non_exhaustive()
    }
}

/// Lowercase hex SHA-256 of `data`.
pub fn content_version(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

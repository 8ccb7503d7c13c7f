//! Topology graph for a variant map.
//!
//! Nodes are provinces (and coast sub-provinces); each directed edge carries
//! army and fleet passability flags. Edges are always inserted in pairs, so
//! the graph is symmetric: if A->B exists then B->A exists with the same
//! flags. Army edges join parent provinces; fleet edges join the exact
//! sub-province a fleet stands on (`stp/nc`, not `stp`).

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::Serialize;

use super::province::{Nation, Province, ProvinceType};
use super::unit::UnitType;
use crate::error::EngineError;

/// Passability flags on a directed edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Edge {
    #[serde(rename = "Army")]
    pub army_ok: bool,
    #[serde(rename = "Fleet")]
    pub fleet_ok: bool,
}

impl Edge {
    fn allows(self, unit_type: UnitType) -> bool {
        match unit_type {
            UnitType::Army => self.army_ok,
            UnitType::Fleet => self.fleet_ok,
        }
    }
}

/// A province on the map with its outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub province_type: ProvinceType,
    #[serde(rename = "SC")]
    pub supply_center: bool,
    #[serde(rename = "Home", skip_serializing_if = "Option::is_none")]
    pub home: Option<Nation>,
    /// Parent province for coast sub-provinces.
    #[serde(rename = "Parent", skip_serializing_if = "Option::is_none")]
    pub parent: Option<Province>,
    #[serde(rename = "Edges")]
    pub edges: BTreeMap<Province, Edge>,
}

/// The complete, validated topology of a variant map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    #[serde(rename = "Nodes")]
    nodes: BTreeMap<Province, Node>,
}

impl Graph {
    /// Starts building a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Returns the node for `province`, if present.
    pub fn node(&self, province: &Province) -> Option<&Node> {
        self.nodes.get(province)
    }

    /// Returns true if `province` is a node of this graph.
    pub fn contains(&self, province: &Province) -> bool {
        self.nodes.contains_key(province)
    }

    /// Iterates over all parent provinces (coast sub-provinces excluded).
    pub fn provinces(&self) -> impl Iterator<Item = (&Province, &Node)> {
        self.nodes.iter().filter(|(_, node)| node.parent.is_none())
    }

    /// Iterates over all supply-center provinces.
    pub fn supply_centers(&self) -> impl Iterator<Item = &Province> {
        self.provinces()
            .filter(|(_, node)| node.supply_center)
            .map(|(province, _)| province)
    }

    /// Returns true if `province` (or its parent) is a supply center.
    pub fn is_supply_center(&self, province: &Province) -> bool {
        self.node(&province.super_province())
            .is_some_and(|node| node.supply_center)
    }

    /// Returns the home supply centers of `nation`.
    pub fn home_centers<'a>(&'a self, nation: &'a Nation) -> impl Iterator<Item = &'a Province> + 'a {
        self.provinces()
            .filter(move |(_, node)| node.supply_center && node.home.as_ref() == Some(nation))
            .map(|(province, _)| province)
    }

    /// Returns the coast sub-provinces of a split-coast province, empty otherwise.
    pub fn coasts_of(&self, province: &Province) -> Vec<&Province> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.as_ref() == Some(province))
            .map(|(coast, _)| coast)
            .collect()
    }

    /// Returns true if a unit of the given type may stand on `province`.
    ///
    /// Fleets on split-coast provinces must name the coast.
    pub fn can_hold(&self, province: &Province, unit_type: UnitType) -> bool {
        let Some(node) = self.node(province) else {
            return false;
        };
        match unit_type {
            UnitType::Army => node.parent.is_none() && node.province_type.army_ok(),
            UnitType::Fleet => node.province_type.fleet_ok() && self.coasts_of(province).is_empty(),
        }
    }

    /// Returns true if a unit of the given type can move from `src` to `dst`.
    pub fn is_adjacent(&self, src: &Province, dst: &Province, unit_type: UnitType) -> bool {
        let (src, dst) = match unit_type {
            UnitType::Army => (src.super_province(), dst.super_province()),
            UnitType::Fleet => (src.clone(), dst.clone()),
        };
        self.node(&src)
            .and_then(|node| node.edges.get(&dst))
            .is_some_and(|edge| edge.allows(unit_type))
    }

    /// Resolves the exact destination of a move from `src` towards `dst`.
    ///
    /// Armies always land on the parent province. A fleet moving to a
    /// split-coast province without naming the coast lands on the single
    /// reachable coast; if several coasts are reachable the move is
    /// ambiguous and `None` is returned.
    pub fn move_destination(&self, src: &Province, dst: &Province, unit_type: UnitType) -> Option<Province> {
        match unit_type {
            UnitType::Army => {
                let dst = dst.super_province();
                self.is_adjacent(src, &dst, unit_type).then_some(dst)
            }
            UnitType::Fleet => {
                let coasts = self.coasts_of(dst);
                if coasts.is_empty() {
                    return self.is_adjacent(src, dst, unit_type).then(|| dst.clone());
                }
                let reachable: Vec<&Province> = coasts
                    .into_iter()
                    .filter(|coast| self.is_adjacent(src, coast, unit_type))
                    .collect();
                match reachable.as_slice() {
                    [only] => Some((*only).clone()),
                    _ => None,
                }
            }
        }
    }

    /// Returns all parent provinces adjacent to `province` by any edge.
    pub fn neighbours(&self, province: &Province) -> BTreeSet<Province> {
        let parent = province.super_province();
        let mut result = BTreeSet::new();
        let sources = std::iter::once(&parent).chain(self.coasts_of(&parent));
        for src in sources {
            if let Some(node) = self.node(src) {
                result.extend(node.edges.keys().map(Province::super_province));
            }
        }
        result
    }

    /// Breadth-first distance from `from` to the nearest of `targets`,
    /// ignoring terrain. Returns `None` if no target is reachable.
    pub fn distance_to(&self, from: &Province, targets: &BTreeSet<Province>) -> Option<usize> {
        let start = from.super_province();
        let mut seen = BTreeSet::from([start.clone()]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        while let Some((current, dist)) = queue.pop_front() {
            if targets.contains(&current) {
                return Some(dist);
            }
            for next in self.neighbours(&current) {
                if seen.insert(next.clone()) {
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }
}

/// Incremental graph construction with validation on `build`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: BTreeMap<Province, Node>,
    pending: Vec<(Province, Province, Edge)>,
    errors: Vec<String>,
}

impl GraphBuilder {
    /// Adds a province node.
    pub fn province(
        mut self,
        id: &str,
        name: &str,
        province_type: ProvinceType,
        supply_center: bool,
        home: Option<&str>,
    ) -> Self {
        let node = Node {
            name: name.to_string(),
            province_type,
            supply_center,
            home: home.map(Nation::from),
            parent: None,
            edges: BTreeMap::new(),
        };
        if self.nodes.insert(Province::new(id), node).is_some() {
            self.errors.push(format!("duplicate province '{}'", id));
        }
        self
    }

    /// Adds a fleet-only coast sub-province `parent/coast`.
    pub fn coast(mut self, parent: &str, coast: &str) -> Self {
        let parent_id = Province::new(parent);
        let Some(parent_node) = self.nodes.get(&parent_id) else {
            self.errors.push(format!("coast '{}' of unknown province '{}'", coast, parent));
            return self;
        };
        let node = Node {
            name: format!("{} ({})", parent_node.name, coast),
            province_type: ProvinceType::Sea,
            supply_center: false,
            home: None,
            parent: Some(parent_id),
            edges: BTreeMap::new(),
        };
        self.nodes.insert(Province::new(format!("{}/{}", parent, coast)), node);
        self
    }

    /// Adds a symmetric army-only edge.
    pub fn army(self, a: &str, b: &str) -> Self {
        self.edge(a, b, Edge { army_ok: true, fleet_ok: false })
    }

    /// Adds a symmetric fleet-only edge.
    pub fn fleet(self, a: &str, b: &str) -> Self {
        self.edge(a, b, Edge { army_ok: false, fleet_ok: true })
    }

    /// Adds a symmetric edge passable by both unit types.
    pub fn both(self, a: &str, b: &str) -> Self {
        self.edge(a, b, Edge { army_ok: true, fleet_ok: true })
    }

    fn edge(mut self, a: &str, b: &str, edge: Edge) -> Self {
        self.pending.push((Province::new(a), Province::new(b), edge));
        self
    }

    fn has_coasts(&self, province: &Province) -> bool {
        self.nodes.values().any(|node| node.parent.as_ref() == Some(province))
    }

    /// Validates and freezes the graph.
    ///
    /// Fails on duplicate provinces, coasts of unknown provinces, edges to
    /// unknown provinces, self-adjacency, army edges touching a coast
    /// sub-province, fleet edges onto a split-coast parent, and provinces
    /// with no edges at all.
    pub fn build(mut self) -> Result<Graph, EngineError> {
        for (a, b, edge) in std::mem::take(&mut self.pending) {
            if a == b {
                self.errors.push(format!("self-adjacency on '{}'", a));
                continue;
            }
            if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
                self.errors.push(format!("edge {} - {} references an unknown province", a, b));
                continue;
            }
            if edge.army_ok && (a.is_coast() || b.is_coast()) {
                self.errors.push(format!("army edge {} - {} touches a coast", a, b));
                continue;
            }
            if edge.fleet_ok && (self.has_coasts(&a) || self.has_coasts(&b)) {
                self.errors.push(format!("fleet edge {} - {} must name a coast", a, b));
                continue;
            }
            for (from, to) in [(&a, &b), (&b, &a)] {
                if let Some(node) = self.nodes.get_mut(from) {
                    let entry = node.edges.entry(to.clone()).or_default();
                    entry.army_ok |= edge.army_ok;
                    entry.fleet_ok |= edge.fleet_ok;
                }
            }
        }

        for (province, node) in &self.nodes {
            if node.edges.is_empty() {
                self.errors.push(format!("province '{}' has no adjacencies", province));
            }
        }

        if self.errors.is_empty() {
            Ok(Graph { nodes: self.nodes })
        } else {
            Err(EngineError::InvalidTopology(self.errors.join("; ")))
        }
    }
}

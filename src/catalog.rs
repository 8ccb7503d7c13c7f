//! The catalog service.
//!
//! Composes the registry, the launch schedule and the render projection to
//! answer every variant route. Handlers are thin wrappers around these
//! operations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::board::{parse_submission, GameState, Graph, OrderSubmission, Province};
use crate::engine::phase::solo_winner;
use crate::error::{CatalogError, EngineError, RegistryError};
use crate::registry::VariantRegistry;
use crate::render::{RenderPhase, RenderVariant, ResolveRequest};
use crate::schedule::{ApiLevel, LaunchSchedule};
use crate::variant::Variant;

/// A variant's map with its content version.
#[derive(Debug, Clone)]
pub struct MapImage {
    pub bytes: Arc<[u8]>,
    pub version: String,
}

impl MapImage {
    /// The strong entity tag for these bytes.
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.version)
    }

    /// Returns true if an `If-None-Match` header value names this version.
    pub fn matches(&self, if_none_match: &str) -> bool {
        if_none_match.split(',').any(|tag| {
            let tag = tag.trim();
            let tag = tag.strip_prefix("W/").unwrap_or(tag);
            tag == "*" || tag.trim_matches('"') == self.version
        })
    }
}

/// Variant listing, start, resolve and map operations.
#[derive(Debug)]
pub struct CatalogService {
    registry: VariantRegistry,
    schedule: LaunchSchedule,
}

impl CatalogService {
    /// Fails if the schedule names a variant that isn't registered.
    pub fn new(registry: VariantRegistry, schedule: LaunchSchedule) -> Result<Self, RegistryError> {
        schedule.validate(registry.names())?;
        info!(
            "Catalog ready with {} variants, HTML API level {}",
            registry.len(),
            schedule.html_api_level()
        );
        Ok(CatalogService { registry, schedule })
    }

    pub fn schedule(&self) -> &LaunchSchedule {
        &self.schedule
    }

    pub fn html_api_level(&self) -> ApiLevel {
        self.schedule.html_api_level()
    }

    /// The registered variant called `name`.
    pub fn variant(&self, name: &str) -> Result<&Arc<Variant>, CatalogError> {
        self.registry.lookup(name).ok_or_else(|| {
            warn!("Unknown variant {:?}", name);
            CatalogError::NotFound(name.to_string())
        })
    }

    fn render(variant: &Arc<Variant>) -> Result<RenderVariant, CatalogError> {
        let state = variant.start()?;
        Ok(RenderVariant {
            variant: Arc::clone(variant),
            start: RenderPhase::project(&state, variant.name()),
        })
    }

    /// Every variant visible at `level`, in name order.
    pub fn list_variants(&self, level: ApiLevel) -> Result<Vec<RenderVariant>, CatalogError> {
        let visible: Vec<_> = self
            .registry
            .iter()
            .filter(|variant| self.schedule.is_visible(variant.name(), level))
            .map(Self::render)
            .collect::<Result<_, _>>()?;
        debug!("Listing {} of {} variants at API level {}", visible.len(), self.registry.len(), level);
        Ok(visible)
    }

    /// The named variant with its starting phase. Not gated.
    pub fn start_variant(&self, name: &str) -> Result<RenderVariant, CatalogError> {
        debug!("Starting variant {:?}", name);
        Self::render(self.variant(name)?)
    }

    /// Adjudicates a posted phase and returns the next one. States the
    /// engine refuses are the caller's fault.
    pub fn resolve_variant(&self, name: &str, request: ResolveRequest) -> Result<RenderPhase, CatalogError> {
        let variant = self.variant(name)?;
        let (state, submission) = request.into_parts();
        check_provinces(variant.graph(), &state, &submission)?;
        let orders = parse_submission(&submission, variant.order_types())?;

        debug!(
            "Resolving {:?} {} {:?} {:?} with {} orders",
            name,
            state.year,
            state.season,
            state.phase_type,
            orders.len()
        );
        let resolution = variant.resolve(state, &orders).map_err(|err| match err {
            EngineError::InvalidState(reason) => CatalogError::MalformedRequest(reason),
            other => CatalogError::Engine(other),
        })?;

        let winner = solo_winner(&resolution.state, variant.info().solo_supply_centers);
        if let Some(nation) = &winner {
            info!("{} has a solo victory in {:?}", nation, name);
        }
        Ok(RenderPhase::project(&resolution.state, variant.name())
            .with_resolutions(resolution.results)
            .with_winner(winner))
    }

    /// The named variant's map.
    pub fn variant_map(&self, name: &str) -> Result<MapImage, CatalogError> {
        let variant = self.variant(name)?;
        Ok(MapImage {
            bytes: variant.svg(),
            version: variant.svg_version().to_string(),
        })
    }
}

/// Rejects provinces the map doesn't know before anything reaches the engine.
fn check_provinces(graph: &Graph, state: &GameState, submission: &OrderSubmission) -> Result<(), CatalogError> {
    let mentioned = state
        .supply_centers
        .keys()
        .chain(state.units.keys())
        .chain(state.dislodged.keys())
        .chain(state.dislodgers.values())
        .chain(submission.values().flat_map(|orders| orders.keys()));
    let unknown: Vec<&Province> = mentioned.filter(|province| !graph.contains(province)).collect();
    if unknown.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = unknown.iter().map(|p| p.as_str()).collect();
    Err(CatalogError::MalformedRequest(format!("unknown provinces: {}", names.join(", "))))
}

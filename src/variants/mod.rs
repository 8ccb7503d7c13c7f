//! Bundled variants.

pub mod classical;
pub mod fleet_rome;
pub mod pure;

use crate::catalog::CatalogService;
use crate::error::{EngineError, RegistryError};
use crate::registry::VariantRegistry;
use crate::schedule::LaunchSchedule;
use crate::variant::Variant;

/// Every variant shipped with the service.
pub fn bundled() -> Result<Vec<Variant>, RegistryError> {
    let builders: [(&str, fn() -> Result<Variant, EngineError>); 3] = [
        (classical::NAME, classical::variant),
        (fleet_rome::NAME, fleet_rome::variant),
        (pure::NAME, pure::variant),
    ];
    builders
        .into_iter()
        .map(|(name, build)| {
            build().map_err(|source| RegistryError::Variant {
                name: name.to_string(),
                source,
            })
        })
        .collect()
}

/// Rollout levels for the bundled variants. Classical is visible to all.
pub fn default_launch_schedule() -> LaunchSchedule {
    LaunchSchedule::new([(pure::NAME, 2), (fleet_rome::NAME, 1)])
}

/// The bundled variants under `schedule`, or the default schedule.
pub fn catalog(schedule: Option<LaunchSchedule>) -> Result<CatalogService, RegistryError> {
    let registry = VariantRegistry::new(bundled()?)?;
    CatalogService::new(registry, schedule.unwrap_or_else(default_launch_schedule))
}

//! Launch schedule and API-level visibility gate.
//!
//! New variants are rolled out by giving them a minimum API level: clients
//! presenting a lower level simply don't see them in the listing. Variants
//! without an entry are visible to everyone.

use std::collections::BTreeSet;

use crate::error::RegistryError;

/// Capability level declared by a client.
pub type ApiLevel = u32;

/// Ordered `(variant, minimum level)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSchedule {
    entries: Vec<(String, ApiLevel)>,
    html_api_level: ApiLevel,
}

impl LaunchSchedule {
    /// Builds a schedule and freezes its HTML API level, the highest level
    /// any entry requires.
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, ApiLevel)>) -> Self {
        let entries: Vec<(String, ApiLevel)> = entries
            .into_iter()
            .map(|(name, level)| (name.into(), level))
            .collect();
        let html_api_level = entries.iter().map(|(_, level)| *level).max().unwrap_or(0);
        LaunchSchedule {
            entries,
            html_api_level,
        }
    }

    /// Minimum level required to see `variant`; 0 when unscheduled.
    pub fn level_for(&self, variant: &str) -> ApiLevel {
        self.entries
            .iter()
            .find(|(name, _)| name == variant)
            .map_or(0, |(_, level)| *level)
    }

    /// Returns true if `variant` is listed for a caller at `level`.
    pub fn is_visible(&self, variant: &str, level: ApiLevel) -> bool {
        self.level_for(variant) <= level
    }

    /// The level at which every scheduled variant is visible.
    pub fn html_api_level(&self) -> ApiLevel {
        self.html_api_level
    }

    /// Checks every entry against the registered names.
    pub fn validate<'a>(&self, registered: impl IntoIterator<Item = &'a str>) -> Result<(), RegistryError> {
        let registered: BTreeSet<&str> = registered.into_iter().collect();
        let mut seen = BTreeSet::new();
        for (name, _) in &self.entries {
            if !seen.insert(name.as_str()) {
                return Err(RegistryError::DuplicateScheduleEntry(name.clone()));
            }
            if !registered.contains(name.as_str()) {
                return Err(RegistryError::UnknownScheduledVariant(name.clone()));
            }
        }
        Ok(())
    }
}

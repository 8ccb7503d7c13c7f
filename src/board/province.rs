//! Province and nation identifiers.
//!
//! Every variant brings its own map and its own set of nations, so both are
//! string newtypes rather than closed enums. Split-coast provinces expose one
//! fleet-only sub-province per coast, identified as `parent/coast`
//! (`stp/nc`, `spa/sc`). Supply-center ownership is always keyed by the
//! parent province.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between a province and its coast in sub-province identifiers.
pub const COAST_SEPARATOR: char = '/';

/// A province (or coast sub-province) identifier, e.g. `lon` or `stp/nc`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Province(String);

impl Province {
    /// Creates a province identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Province(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent province: `stp` for `stp/nc`, itself otherwise.
    pub fn super_province(&self) -> Province {
        match self.0.split_once(COAST_SEPARATOR) {
            Some((parent, _)) => Province(parent.to_string()),
            None => self.clone(),
        }
    }

    /// Returns the coast part of a sub-province identifier, if any.
    pub fn coast(&self) -> Option<&str> {
        self.0.split_once(COAST_SEPARATOR).map(|(_, coast)| coast)
    }

    /// Returns true if this identifies a coast sub-province.
    pub fn is_coast(&self) -> bool {
        self.coast().is_some()
    }

    /// Returns true if both identifiers name the same parent province.
    pub fn same_super(&self, other: &Province) -> bool {
        self.super_province() == other.super_province()
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Province {
    fn from(id: &str) -> Self {
        Province::new(id)
    }
}

impl Borrow<str> for Province {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A nation (great power) name, e.g. `England`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nation(String);

impl Nation {
    /// Creates a nation name.
    pub fn new(name: impl Into<String>) -> Self {
        Nation(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Nation {
    fn from(name: &str) -> Self {
        Nation::new(name)
    }
}

impl Borrow<str> for Nation {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Classifies a province by terrain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProvinceType {
    Land,
    Sea,
    Coastal,
}

impl ProvinceType {
    /// Returns true if an army may stand here.
    pub const fn army_ok(self) -> bool {
        !matches!(self, ProvinceType::Sea)
    }

    /// Returns true if a fleet may stand here.
    pub const fn fleet_ok(self) -> bool {
        !matches!(self, ProvinceType::Land)
    }
}

//! The variant registry.
//!
//! Built once at startup and shared read-only behind an `Arc`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::variant::Variant;

/// Immutable name -> variant table, iterated in name order.
#[derive(Debug, Default)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Arc<Variant>>,
}

impl VariantRegistry {
    /// Registers `variants`, failing on a repeated name.
    pub fn new(variants: impl IntoIterator<Item = Variant>) -> Result<Self, RegistryError> {
        let mut table = BTreeMap::new();
        for variant in variants {
            let name = variant.name().to_string();
            if table.insert(name.clone(), Arc::new(variant)).is_some() {
                return Err(RegistryError::DuplicateVariant(name));
            }
        }
        Ok(VariantRegistry { variants: table })
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<Variant>> {
        self.variants.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Variant>> {
        self.variants.values()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

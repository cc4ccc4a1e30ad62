// Taals Module
// Read-only catalog of rhythm cycles offered in the taal picker

pub mod types;
mod builtin;

use std::collections::HashSet;

pub use types::{CatalogError, CatalogResult, TaalDefinition, TaalSummary};

/// Label shown for compositions whose taal id is not in the catalog
pub const UNKNOWN_TAAL_LABEL: &str = "Unknown";

/// Ordered, validated set of taal definitions.
///
/// Built once at startup and shared read-only. Lookups never fail: an
/// unknown id resolves to the first entry.
#[derive(Debug, Clone)]
pub struct TaalCatalog {
    taals: Vec<TaalDefinition>,
}

impl TaalCatalog {
    /// Build a catalog from hand-authored definitions, validating each one
    pub fn new(taals: Vec<TaalDefinition>) -> CatalogResult<Self> {
        if taals.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for taal in &taals {
            taal.validate()?;
            if !seen.insert(taal.id.as_str()) {
                return Err(CatalogError::DuplicateId(taal.id.clone()));
            }
        }

        Ok(TaalCatalog { taals })
    }

    /// The catalog shipped with the app
    pub fn builtin() -> CatalogResult<Self> {
        Self::new(builtin::builtin_taals())
    }

    /// All definitions in catalog order
    pub fn list(&self) -> &[TaalDefinition] {
        &self.taals
    }

    /// Picker summaries in catalog order
    pub fn summaries(&self) -> Vec<TaalSummary> {
        self.taals.iter().map(TaalDefinition::summary).collect()
    }

    /// The fallback definition (first entry)
    pub fn default_taal(&self) -> &TaalDefinition {
        &self.taals[0]
    }

    /// Exact lookup by id
    pub fn find(&self, id: &str) -> Option<&TaalDefinition> {
        self.taals.iter().find(|t| t.id == id)
    }

    /// Lookup by id, falling back to the default taal for unknown ids
    pub fn get(&self, id: &str) -> &TaalDefinition {
        match self.find(id) {
            Some(taal) => taal,
            None => {
                log::debug!("Unknown taal id '{}', using '{}'", id, self.default_taal().id);
                self.default_taal()
            }
        }
    }

    /// Display name for the compositions list
    pub fn display_name(&self, id: &str) -> &str {
        self.find(id)
            .map(|t| t.name.as_str())
            .unwrap_or(UNKNOWN_TAAL_LABEL)
    }

    pub fn len(&self) -> usize {
        self.taals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taals.is_empty()
    }
}

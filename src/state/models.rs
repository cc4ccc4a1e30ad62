// Data models for stored compositions
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::grid::{initialize_grid, NotationGrid};
use crate::taals::{TaalCatalog, TaalDefinition};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Please enter composition name")]
    Empty,
}

/// Trim a user-entered composition name, rejecting blank input
pub fn normalize_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Embedded taal object from an older record. Only the id is read; the
/// rest of the definition comes from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTaal {
    pub id: String,
}

/// Taal field as found on disk.
///
/// Older records embedded the whole definition instead of its id. This only
/// exists at the storage boundary; `Composition` always carries the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaalRef {
    Id(String),
    Embedded(LegacyTaal),
}

impl TaalRef {
    pub fn id(&self) -> &str {
        match self {
            TaalRef::Id(id) => id,
            TaalRef::Embedded(taal) => &taal.id,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, TaalRef::Embedded(_))
    }

    pub fn into_id(self) -> String {
        match self {
            TaalRef::Id(id) => id,
            TaalRef::Embedded(taal) => taal.id,
        }
    }
}

/// A composition record before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredComposition {
    pub id: String,
    pub name: String,
    pub taal: TaalRef,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub grid: Option<NotationGrid>,
}

impl StoredComposition {
    /// True when normalizing this record changes what is on disk
    pub fn needs_migration(&self) -> bool {
        self.taal.is_legacy() || self.grid.is_none()
    }

    /// Convert to the in-memory form: taal by id, grid always present
    pub fn normalize(self, catalog: &TaalCatalog, default_row_count: usize) -> Composition {
        let taal_id = self.taal.into_id();
        let grid = match self.grid {
            Some(grid) => grid,
            None => initialize_grid(catalog.get(&taal_id), default_row_count),
        };

        Composition {
            id: self.id,
            name: self.name,
            taal: taal_id,
            created_at: self.created_at,
            grid,
        }
    }
}

/// One user-authored notation document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub id: String,
    pub name: String,
    /// Id of the taal in the catalog
    pub taal: String,
    pub created_at: DateTime<Utc>,
    pub grid: NotationGrid,
}

impl Composition {
    /// New composition with an empty grid sized for `taal`
    pub fn new(name: &str, taal: &TaalDefinition, row_count: usize) -> Result<Self, NameError> {
        Ok(Composition {
            id: Uuid::new_v4().to_string(),
            name: normalize_name(name)?,
            taal: taal.id.clone(),
            created_at: Utc::now(),
            grid: initialize_grid(taal, row_count),
        })
    }

    pub fn summary(&self, catalog: &TaalCatalog) -> CompositionSummary {
        CompositionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            taal_id: self.taal.clone(),
            taal_name: catalog.display_name(&self.taal).to_string(),
            created_at: self.created_at,
            row_count: self.grid.row_count(),
        }
    }
}

/// List entry for the compositions screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSummary {
    pub id: String,
    pub name: String,
    pub taal_id: String,
    pub taal_name: String,
    pub created_at: DateTime<Utc>,
    pub row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TaalCatalog {
        TaalCatalog::builtin().unwrap()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Bandish  ").unwrap(), "Bandish");
        assert_eq!(normalize_name("   "), Err(NameError::Empty));
        assert_eq!(normalize_name(""), Err(NameError::Empty));
    }

    #[test]
    fn test_new_composition() {
        let catalog = catalog();
        let comp = Composition::new("Gat in Teentaal", catalog.get("teentaal"), 12).unwrap();

        assert_eq!(comp.taal, "teentaal");
        assert_eq!(comp.grid.row_count(), 12);
        assert!(comp.grid.is_uniform(16));
        assert!(Uuid::parse_str(&comp.id).is_ok());
    }

    #[test]
    fn test_decode_id_reference() {
        let json = r#"{
            "id": "1717000000000",
            "name": "Bandish",
            "taal": "rupak",
            "createdAt": "2024-05-29T16:26:40.000Z",
            "grid": [["Tin", "", "", "", "", "", ""]]
        }"#;

        let stored: StoredComposition = serde_json::from_str(json).unwrap();
        assert_eq!(stored.taal, TaalRef::Id("rupak".to_string()));
        assert!(!stored.needs_migration());
    }

    #[test]
    fn test_decode_legacy_embedded_taal() {
        let json = r#"{
            "id": "1717000000000",
            "name": "Old",
            "taal": {
                "id": "ektaal",
                "name": "Ektaal",
                "structure": [2, 2, 2, 2, 2, 2],
                "numberOfColumns": 12,
                "description": "A 12-beat taal"
            },
            "createdAt": "2024-05-29T16:26:40.000Z",
            "grid": []
        }"#;

        let stored: StoredComposition = serde_json::from_str(json).unwrap();
        assert!(stored.taal.is_legacy());
        assert!(stored.needs_migration());

        let comp = stored.normalize(&catalog(), 12);
        assert_eq!(comp.taal, "ektaal");

        let reencoded = serde_json::to_value(&comp).unwrap();
        assert_eq!(reencoded["taal"], "ektaal");
    }

    #[test]
    fn test_decode_partial_legacy_taal() {
        let json = r#"{
            "id": "1717000000001",
            "name": "Partial",
            "taal": { "id": "ektaal", "name": "Ektaal", "numberOfColumns": "twelve" },
            "createdAt": "2024-05-29T16:26:40.000Z"
        }"#;

        let stored: StoredComposition = serde_json::from_str(json).unwrap();
        assert_eq!(
            stored.taal,
            TaalRef::Embedded(LegacyTaal {
                id: "ektaal".to_string()
            })
        );

        let comp = stored.normalize(&catalog(), 12);
        assert_eq!(comp.taal, "ektaal");
        assert!(comp.grid.is_uniform(12));
    }

    #[test]
    fn test_missing_grid_gets_default() {
        let json = r#"{
            "id": "x",
            "name": "No grid",
            "taal": "dadra",
            "createdAt": "2024-05-29T16:26:40Z"
        }"#;

        let stored: StoredComposition = serde_json::from_str(json).unwrap();
        assert!(stored.needs_migration());

        let comp = stored.normalize(&catalog(), 12);
        assert_eq!(comp.grid.row_count(), 12);
        assert!(comp.grid.is_uniform(6));
    }

    #[test]
    fn test_summary_for_unknown_taal() {
        let catalog = catalog();
        let mut comp = Composition::new("Mystery", catalog.get("dadra"), 12).unwrap();
        comp.taal = "sooltaal".to_string();

        let summary = comp.summary(&catalog);
        assert_eq!(summary.taal_name, "Unknown");
        assert_eq!(summary.row_count, 12);
    }

    #[test]
    fn test_camel_case_keys() {
        let catalog = catalog();
        let comp = Composition::new("Keys", catalog.get("dadra"), 1).unwrap();
        let json = serde_json::to_value(&comp).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}

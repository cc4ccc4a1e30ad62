// Taal Type Definitions
// A taal is a fixed beat cycle split into vibhags

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Taal catalog is empty")]
    Empty,
    #[error("Duplicate taal id: {0}")]
    DuplicateId(String),
    #[error("Taal '{0}' has an empty structure")]
    EmptyStructure(String),
    #[error("Taal '{id}' has a zero-beat vibhag at position {position}")]
    ZeroBeat { id: String, position: usize },
    #[error("Taal '{id}' declares {declared} columns but its structure sums to {sum}")]
    ColumnMismatch { id: String, declared: usize, sum: usize },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Complete taal definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaalDefinition {
    pub id: String,
    pub name: String,
    /// Beats per vibhag, in cycle order
    pub structure: Vec<usize>,
    pub number_of_columns: usize,
    #[serde(default)]
    pub description: String,
}

/// Taal summary for picker display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaalSummary {
    pub id: String,
    pub name: String,
    pub beats: usize,
    pub description: String,
}

impl TaalDefinition {
    pub fn new(
        id: &str,
        name: &str,
        structure: Vec<usize>,
        number_of_columns: usize,
        description: &str,
    ) -> Self {
        TaalDefinition {
            id: id.to_string(),
            name: name.to_string(),
            structure,
            number_of_columns,
            description: description.to_string(),
        }
    }

    /// Check that the structure is non-empty, has no zero-beat vibhag and
    /// sums to the declared column count
    pub fn validate(&self) -> CatalogResult<()> {
        if self.structure.is_empty() {
            return Err(CatalogError::EmptyStructure(self.id.clone()));
        }

        if let Some(position) = self.structure.iter().position(|&beats| beats == 0) {
            return Err(CatalogError::ZeroBeat {
                id: self.id.clone(),
                position,
            });
        }

        let sum: usize = self.structure.iter().sum();
        if sum != self.number_of_columns {
            return Err(CatalogError::ColumnMismatch {
                id: self.id.clone(),
                declared: self.number_of_columns,
                sum,
            });
        }

        Ok(())
    }

    /// Get a summary of this taal for UI display
    pub fn summary(&self) -> TaalSummary {
        TaalSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            beats: self.number_of_columns,
            description: self.description.clone(),
        }
    }

    /// Number of vibhags in the cycle
    pub fn vibhag_count(&self) -> usize {
        self.structure.len()
    }
}

// Export Module
// Renders a composition to a printable document and writes it to disk

pub mod html;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::state::storage::{self, StorageError};
use crate::state::Composition;
use crate::taals::TaalDefinition;

pub use html::{escape_html, render_document, ExportRequest};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed: {0}")]
    ExportFailed(#[from] StorageError),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// A document written to the export directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub path: String,
    pub sha256: String,
    pub bytes: u64,
}

/// File-name-safe form of a composition name
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "composition".to_string()
    } else {
        slug.to_string()
    }
}

/// Output file name for a composition
pub fn export_filename(composition: &Composition) -> String {
    format!("{}-{}.html", slugify(&composition.name), composition.id)
}

/// Render a composition and write it into `dir`
pub fn export_composition(
    dir: &Path,
    composition: &Composition,
    taal: &TaalDefinition,
) -> ExportResult<ExportArtifact> {
    let request = ExportRequest::new(&composition.name, taal, &composition.grid);
    let document = render_document(&request);

    let filename = export_filename(composition);
    let (path, sha256) = storage::store_file(dir, &filename, document.as_bytes())?;

    log::info!(
        "Exported composition {} to {} ({} bytes)",
        composition.id,
        path.display(),
        document.len()
    );

    Ok(ExportArtifact {
        path: path.to_string_lossy().to_string(),
        sha256,
        bytes: document.len() as u64,
    })
}

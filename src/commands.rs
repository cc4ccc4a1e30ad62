// Tauri IPC Commands
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::config::AppConfig;
use crate::editor::EditorSession;
use crate::export::{self, ExportArtifact};
use crate::grid::{
    column_separators, compute_vibhag_boundaries, export_column_separators, RowPosition,
};
use crate::state::{storage, Composition, CompositionStore, CompositionSummary, DbConnection};
use crate::taals::{TaalCatalog, TaalDefinition, TaalSummary};

/// Shared state managed by Tauri
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<TaalCatalog>,
    pub store: CompositionStore<DbConnection>,
}

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

/// Log a storage or export failure and show it as a dismissible dialog
fn notify_failure(app: &AppHandle, title: &str, error: &dyn std::fmt::Display) {
    log::error!("{}: {}", title, error);
    app.dialog()
        .message(error.to_string())
        .title(title)
        .kind(MessageDialogKind::Error)
        .show(|_| {});
}

// ==================== TAAL COMMANDS ====================

#[tauri::command]
pub fn list_taals(state: State<'_, AppState>) -> CommandResult<Vec<TaalSummary>> {
    Ok(state.catalog.summaries())
}

/// Get a taal by id; unknown ids resolve to the default taal
#[tauri::command]
pub fn get_taal(state: State<'_, AppState>, id: String) -> CommandResult<TaalDefinition> {
    Ok(state.catalog.get(&id).clone())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VibhagLayout {
    pub boundaries: Vec<usize>,
    pub editor_separators: Vec<bool>,
    pub export_separators: Vec<bool>,
}

#[tauri::command]
pub fn vibhag_boundaries(state: State<'_, AppState>, taal_id: String) -> CommandResult<VibhagLayout> {
    let taal = state.catalog.get(&taal_id);
    Ok(VibhagLayout {
        boundaries: compute_vibhag_boundaries(&taal.structure).into_iter().collect(),
        editor_separators: column_separators(&taal.structure, taal.number_of_columns),
        export_separators: export_column_separators(&taal.structure, taal.number_of_columns),
    })
}

// ==================== COMPOSITION COMMANDS ====================

#[tauri::command]
pub fn list_compositions(
    app: AppHandle,
    state: State<'_, AppState>,
) -> CommandResult<Vec<CompositionSummary>> {
    match state.store.load_all() {
        Ok(compositions) => Ok(compositions
            .iter()
            .map(|c| c.summary(&state.catalog))
            .collect()),
        Err(e) => {
            notify_failure(&app, "Could not load compositions", &e);
            Ok(Vec::new())
        }
    }
}

/// Get a composition ready for editing (grid fitted to its taal)
#[tauri::command]
pub fn get_composition(
    state: State<'_, AppState>,
    id: String,
) -> CommandResult<Option<Composition>> {
    let composition = state.store.get(&id)?;
    Ok(composition.map(|c| EditorSession::open(c, &state.catalog).into_composition()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompositionInput {
    pub name: String,
    pub taal_id: String,
}

#[tauri::command]
pub fn create_composition(
    app: AppHandle,
    state: State<'_, AppState>,
    input: CreateCompositionInput,
) -> CommandResult<Composition> {
    state.store.create(&input.name, &input.taal_id).map_err(|e| {
        notify_failure(&app, "Failed to create composition", &e);
        CommandError::from(e)
    })
}

#[tauri::command]
pub async fn save_composition(
    app: AppHandle,
    state: State<'_, AppState>,
    composition: Composition,
) -> CommandResult<()> {
    state.store.save(&composition).await.map_err(|e| {
        notify_failure(&app, "Failed to save composition", &e);
        CommandError::from(e)
    })
}

#[tauri::command]
pub fn delete_composition(
    app: AppHandle,
    state: State<'_, AppState>,
    id: String,
) -> CommandResult<bool> {
    state.store.delete(&id).map_err(|e| {
        notify_failure(&app, "Failed to delete composition", &e);
        CommandError::from(e)
    })
}

// ==================== EDITOR COMMANDS ====================

/// One editing action on the working copy
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridEdit {
    SetCell { row: usize, column: usize, value: String },
    InsertRow { at_index: usize, position: RowPosition },
    DeleteRow { at_index: usize },
    ClearRow { at_index: usize },
    ChangeTaal { taal_id: String },
    Rename { name: String },
}

#[derive(Debug, Deserialize)]
pub struct EditCompositionInput {
    pub composition: Composition,
    pub edit: GridEdit,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    pub composition: Composition,
    /// False when the edit was out of range and ignored
    pub applied: bool,
    /// Non-empty cells dropped by a taal change or by fitting a ragged grid
    pub cells_lost: usize,
}

/// Apply an edit to the frontend's working copy and return the new copy
#[tauri::command]
pub fn edit_composition(
    state: State<'_, AppState>,
    input: EditCompositionInput,
) -> CommandResult<EditResult> {
    let mut session = EditorSession::open(input.composition, &state.catalog);
    let mut cells_lost = session.cells_lost_on_open();

    let applied = match input.edit {
        GridEdit::SetCell { row, column, value } => session.update_cell(row, column, &value),
        GridEdit::InsertRow { at_index, position } => session.insert_row(at_index, position),
        GridEdit::DeleteRow { at_index } => session.delete_row(at_index),
        GridEdit::ClearRow { at_index } => session.clear_row(at_index),
        GridEdit::ChangeTaal { taal_id } => {
            let taal = state.catalog.get(&taal_id).clone();
            cells_lost += session.change_taal(&taal).cells_lost;
            true
        }
        GridEdit::Rename { name } => {
            session.rename(&name)?;
            true
        }
    };

    Ok(EditResult {
        composition: session.into_composition(),
        applied,
        cells_lost,
    })
}

// ==================== EXPORT COMMANDS ====================

#[tauri::command]
pub fn export_composition(
    app: AppHandle,
    state: State<'_, AppState>,
    composition: Composition,
) -> CommandResult<ExportArtifact> {
    let result = storage::get_exports_dir(&state.config)
        .map_err(export::ExportError::from)
        .and_then(|dir| {
            let taal = state.catalog.get(&composition.taal);
            export::export_composition(&dir, &composition, taal)
        });

    result.map_err(|e| {
        notify_failure(&app, "Failed to export composition", &e);
        CommandError::from(e)
    })
}

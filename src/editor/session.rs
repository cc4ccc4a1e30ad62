// Editor session - working copy of one open composition
// Grid index errors end here: they are logged and treated as no-ops

use crate::grid::{
    column_separators, next_cell, resize_grid_for_taal, GridError, GridResult, NotationGrid,
    ResizeOutcome, RowPosition,
};
use crate::state::{normalize_name, Composition, NameError};
use crate::taals::{TaalCatalog, TaalDefinition};

pub struct EditorSession {
    composition: Composition,
    taal: TaalDefinition,
    dirty: bool,
    /// Non-empty cells dropped while fitting a ragged grid on open
    cells_lost_on_open: usize,
}

impl EditorSession {
    /// Open a stored composition, fitting its grid to the resolved taal
    pub fn open(composition: Composition, catalog: &TaalCatalog) -> Self {
        let taal = catalog.get(&composition.taal).clone();
        let mut composition = composition;
        let mut cells_lost_on_open = 0;

        if composition.taal != taal.id {
            log::warn!(
                "Composition {} references unknown taal '{}', showing {}",
                composition.id,
                composition.taal,
                taal.name
            );
        }

        if !composition.grid.is_uniform(taal.number_of_columns) {
            let outcome = resize_grid_for_taal(&composition.grid, &taal);
            if outcome.truncated() {
                log::warn!(
                    "Composition {} had {} cell(s) beyond {} columns; they were dropped",
                    composition.id,
                    outcome.cells_lost,
                    taal.number_of_columns
                );
            }
            cells_lost_on_open = outcome.cells_lost;
            composition.grid = outcome.grid;
        }

        EditorSession {
            composition,
            taal,
            dirty: false,
            cells_lost_on_open,
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn taal(&self) -> &TaalDefinition {
        &self.taal
    }

    pub fn grid(&self) -> &NotationGrid {
        &self.composition.grid
    }

    pub fn cells_lost_on_open(&self) -> usize {
        self.cells_lost_on_open
    }

    /// True when there are edits since opening or the last save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn apply<T>(&mut self, action: &str, result: GridResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.dirty = true;
                Some(value)
            }
            Err(GridError::InvalidIndex { axis, index, len }) => {
                log::warn!(
                    "Ignored {} on composition {}: {} {} out of range ({})",
                    action,
                    self.composition.id,
                    axis,
                    index,
                    len
                );
                None
            }
        }
    }

    // ==================== GRID EDITS ====================

    pub fn update_cell(&mut self, row: usize, column: usize, value: &str) -> bool {
        let columns = self.taal.number_of_columns;
        let result = self.composition.grid.set_cell(row, column, value, columns);
        self.apply("cell edit", result).is_some()
    }

    pub fn insert_row(&mut self, at_index: usize, position: RowPosition) -> bool {
        let columns = self.taal.number_of_columns;
        let result = self.composition.grid.insert_row(at_index, position, columns);
        self.apply("row insert", result).is_some()
    }

    pub fn delete_row(&mut self, at_index: usize) -> bool {
        let result = self.composition.grid.delete_row(at_index);
        self.apply("row delete", result).is_some()
    }

    pub fn clear_row(&mut self, at_index: usize) -> bool {
        let columns = self.taal.number_of_columns;
        let result = self.composition.grid.clear_row(at_index, columns);
        self.apply("row clear", result).is_some()
    }

    /// Switch taal, resizing every row. Check the outcome for lost notation.
    pub fn change_taal(&mut self, new_taal: &TaalDefinition) -> ResizeOutcome {
        let outcome = resize_grid_for_taal(&self.composition.grid, new_taal);

        if outcome.truncated() {
            log::warn!(
                "Changing composition {} to {} dropped {} cell(s)",
                self.composition.id,
                new_taal.name,
                outcome.cells_lost
            );
        }

        self.composition.grid = outcome.grid.clone();
        self.composition.taal = new_taal.id.clone();
        self.taal = new_taal.clone();
        self.dirty = true;
        outcome
    }

    pub fn rename(&mut self, name: &str) -> Result<(), NameError> {
        self.composition.name = normalize_name(name)?;
        self.dirty = true;
        Ok(())
    }

    // ==================== VIEW HELPERS ====================

    /// Separator flags for the editor's columns (last column never ruled)
    pub fn column_separators(&self) -> Vec<bool> {
        column_separators(&self.taal.structure, self.taal.number_of_columns)
    }

    /// Cell that takes focus after the space key
    pub fn next_cell(&self, row: usize, column: usize) -> Option<(usize, usize)> {
        next_cell(
            row,
            column,
            self.composition.grid.row_count(),
            self.taal.number_of_columns,
        )
    }

    /// Copy to hand to the store
    pub fn snapshot(&self) -> Composition {
        self.composition.clone()
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn into_composition(self) -> Composition {
        self.composition
    }
}

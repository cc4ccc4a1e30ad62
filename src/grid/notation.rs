// Notation Grid - rows of text cells, one column per beat
// Column count follows the taal; row count is under the user's control

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::taals::TaalDefinition;

/// Rows a new composition starts with
pub const DEFAULT_ROW_COUNT: usize = 12;

/// How far past the last row `set_cell` may write, synthesizing rows
pub const MAX_SYNTHESIZED_ROWS: usize = DEFAULT_ROW_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid {axis} index {index} (length {len})")]
    InvalidIndex { axis: Axis, index: usize, len: usize },
}

pub type GridResult<T> = Result<T, GridError>;

/// Where a new row goes relative to the selected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPosition {
    Above,
    Below,
}

/// Grid of notation cells, serialized as a plain `string[][]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotationGrid {
    rows: Vec<Vec<String>>,
}

/// Result of re-fitting a grid to a different taal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeOutcome {
    pub grid: NotationGrid,

    /// Trailing columns removed from the widest row (0 when growing)
    pub columns_dropped: usize,

    /// Non-empty cells that were discarded. This loss is permanent.
    pub cells_lost: usize,
}

impl ResizeOutcome {
    /// True when the resize threw away written notation
    pub fn truncated(&self) -> bool {
        self.cells_lost > 0
    }
}

fn empty_row(column_count: usize) -> Vec<String> {
    vec![String::new(); column_count]
}

/// Build an all-empty grid sized for a taal
pub fn initialize_grid(taal: &TaalDefinition, row_count: usize) -> NotationGrid {
    NotationGrid::empty(row_count, taal.number_of_columns)
}

/// Re-fit every row to the new taal's width.
///
/// Cells are copied by position. New trailing cells are empty, and cells
/// past the new width are dropped; check `ResizeOutcome::truncated` before
/// committing if the user should be warned.
pub fn resize_grid_for_taal(grid: &NotationGrid, new_taal: &TaalDefinition) -> ResizeOutcome {
    let width = new_taal.number_of_columns;
    let mut columns_dropped = 0;
    let mut cells_lost = 0;

    let rows = grid
        .rows
        .iter()
        .map(|row| {
            if row.len() > width {
                columns_dropped = columns_dropped.max(row.len() - width);
                cells_lost += row[width..].iter().filter(|c| !c.is_empty()).count();
            }

            let mut resized: Vec<String> = row.iter().take(width).cloned().collect();
            resized.resize(width, String::new());
            resized
        })
        .collect();

    ResizeOutcome {
        grid: NotationGrid { rows },
        columns_dropped,
        cells_lost,
    }
}

/// Focus target after the space key: the next column, wrapping to the start
/// of the next row. `None` once past the last row.
pub fn next_cell(
    row: usize,
    column: usize,
    row_count: usize,
    column_count: usize,
) -> Option<(usize, usize)> {
    if column_count == 0 {
        return None;
    }

    let (next_row, next_column) = match column.checked_add(1) {
        Some(next) if next < column_count => (row, next),
        _ => (row.checked_add(1)?, 0),
    };

    if next_row < row_count {
        Some((next_row, next_column))
    } else {
        None
    }
}

impl NotationGrid {
    /// All-empty grid of the given shape
    pub fn empty(row_count: usize, column_count: usize) -> Self {
        NotationGrid {
            rows: vec![empty_row(column_count); row_count],
        }
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        NotationGrid { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text, or `None` outside the grid
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// True when every row is exactly `column_count` wide
    pub fn is_uniform(&self, column_count: usize) -> bool {
        self.rows.iter().all(|r| r.len() == column_count)
    }

    /// Write one cell.
    ///
    /// Rows beyond the end are synthesized as empty rows first, at most
    /// `MAX_SYNTHESIZED_ROWS` of them. Columns never are; the taal fixes the
    /// width.
    pub fn set_cell(
        &mut self,
        row: usize,
        column: usize,
        value: impl Into<String>,
        column_count: usize,
    ) -> GridResult<()> {
        if column >= column_count {
            return Err(GridError::InvalidIndex {
                axis: Axis::Column,
                index: column,
                len: column_count,
            });
        }

        let limit = self.rows.len().saturating_add(MAX_SYNTHESIZED_ROWS);
        if row >= limit {
            return Err(GridError::InvalidIndex {
                axis: Axis::Row,
                index: row,
                len: self.rows.len(),
            });
        }

        while self.rows.len() <= row {
            self.rows.push(empty_row(column_count));
        }

        let target = &mut self.rows[row];
        if target.len() < column_count {
            target.resize(column_count, String::new());
        }
        target[column] = value.into();

        Ok(())
    }

    /// Insert an empty row above or below `at_index`
    pub fn insert_row(
        &mut self,
        at_index: usize,
        position: RowPosition,
        column_count: usize,
    ) -> GridResult<usize> {
        let out_of_range = GridError::InvalidIndex {
            axis: Axis::Row,
            index: at_index,
            len: self.rows.len(),
        };

        let insert_at = match position {
            RowPosition::Above => Some(at_index),
            RowPosition::Below => at_index.checked_add(1),
        };
        let insert_at = match insert_at {
            Some(at) if at <= self.rows.len() => at,
            _ => return Err(out_of_range),
        };

        self.rows.insert(insert_at, empty_row(column_count));
        Ok(insert_at)
    }

    /// Remove the row at `at_index`. An empty grid is allowed to result.
    pub fn delete_row(&mut self, at_index: usize) -> GridResult<Vec<String>> {
        self.check_row(at_index)?;
        Ok(self.rows.remove(at_index))
    }

    /// Blank out the row at `at_index`, keeping its position
    pub fn clear_row(&mut self, at_index: usize, column_count: usize) -> GridResult<()> {
        self.check_row(at_index)?;
        self.rows[at_index] = empty_row(column_count);
        Ok(())
    }

    fn check_row(&self, index: usize) -> GridResult<()> {
        if index >= self.rows.len() {
            return Err(GridError::InvalidIndex {
                axis: Axis::Row,
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}

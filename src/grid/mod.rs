// Grid Engine - notation grid shape and vibhag boundaries
// Keeps every row as wide as the active taal

pub mod notation;
pub mod vibhag;

pub use notation::{
    initialize_grid, next_cell, resize_grid_for_taal, Axis, GridError, GridResult, NotationGrid,
    ResizeOutcome, RowPosition, DEFAULT_ROW_COUNT,
};
pub use vibhag::{
    column_separators, compute_vibhag_boundaries, export_column_separators, is_boundary_column,
    is_export_boundary_column,
};

// Vibhag boundaries - where separator rules fall in a taal row
// The editor grid and the exported document disagree on the final column

use std::collections::BTreeSet;

/// 1-based column numbers at which each vibhag ends.
///
/// Every prefix sum of `structure` is a boundary, including the last one
/// (the final column of the cycle).
pub fn compute_vibhag_boundaries(structure: &[usize]) -> BTreeSet<usize> {
    structure
        .iter()
        .scan(0, |total, &beats| {
            *total += beats;
            Some(*total)
        })
        .collect()
}

/// Editor variant: the last column never draws a trailing separator
pub fn is_boundary_column(structure: &[usize], number_of_columns: usize, column: usize) -> bool {
    let position = column + 1;
    position < number_of_columns && compute_vibhag_boundaries(structure).contains(&position)
}

/// Export variant: every vibhag end is ruled, the final column included
pub fn is_export_boundary_column(structure: &[usize], column: usize) -> bool {
    compute_vibhag_boundaries(structure).contains(&(column + 1))
}

/// Per-column separator flags for the editor grid
pub fn column_separators(structure: &[usize], number_of_columns: usize) -> Vec<bool> {
    let boundaries = compute_vibhag_boundaries(structure);
    (1..=number_of_columns)
        .map(|position| position < number_of_columns && boundaries.contains(&position))
        .collect()
}

/// Per-column separator flags for the exported document
pub fn export_column_separators(structure: &[usize], number_of_columns: usize) -> Vec<bool> {
    let boundaries = compute_vibhag_boundaries(structure);
    (1..=number_of_columns)
        .map(|position| boundaries.contains(&position))
        .collect()
}

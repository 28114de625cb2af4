//! Core parse/validation errors, mirroring the donor's `MapError`/`ScenarioError`
//! enum shape: one named variant per failure mode, one `#[error]` message each.

use crate::cell::Cell;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("row {row} width mismatch: expected {expected}, got {got}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell value {0}: expected 0 (passable) or 1 (wall)")]
    InvalidCellValue(i32),

    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    #[error("forklift path must have at least 2 cells, got {0}")]
    InvalidForklift(usize),

    #[error("cell {0} is out of bounds")]
    OutOfBounds(Cell),

    #[error("too many robots: {count} exceeds the maximum of {max}")]
    TooManyRobots { count: usize, max: usize },
}

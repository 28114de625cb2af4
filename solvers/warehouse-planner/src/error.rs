//! Errors surfaced by composition, scheduling, and replanning.

use thiserror::Error;
use warehouse_core::Cell;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("robot at {robot} has no path to {goal}")]
    NoPath { robot: Cell, goal: Cell },

    #[error("no path from {start} to remaining task {task} during replan")]
    NoPathReplan { start: Cell, task: Cell },
}

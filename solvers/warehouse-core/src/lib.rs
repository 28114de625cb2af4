//! Grid, geometry, and entity types shared by the warehouse task planner.
//!
//! This crate owns the data model (§3 of the design): cells, the static
//! grid, and the validated robot/task/forklift entity lists. Pathfinding,
//! assignment, and scheduling live in `warehouse-planner`.

mod cell;
mod entities;
mod error;
mod grid;

pub use cell::{Cell, CARDINAL_DELTAS};
pub use entities::{Forklift, Scenario, DEFAULT_MAX_ROBOTS};
pub use error::CoreError;
pub use grid::Grid;

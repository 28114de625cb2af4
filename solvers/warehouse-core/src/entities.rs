//! Robots, tasks, and moving obstacles ("forklifts"), plus the validation
//! that turns raw caller-supplied positions into a checked [`Scenario`].

use crate::cell::Cell;
use crate::error::CoreError;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default cap on robots per scenario (`MAX_ROBOTS` in the original config).
pub const DEFAULT_MAX_ROBOTS: usize = 5;

/// A cyclic moving obstacle: an ordered walk of passable cells, optionally
/// looping back to its start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forklift {
    pub path: Vec<Cell>,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Forklift {
    /// Build a forklift, rejecting paths shorter than 2 cells. Consecutive
    /// cells are assumed 4-adjacent (the generator's contract) and are not
    /// re-validated here.
    pub fn new(path: Vec<Cell>, looping: bool) -> Result<Self, CoreError> {
        if path.len() < 2 {
            return Err(CoreError::InvalidForklift(path.len()));
        }
        Ok(Self { path, looping })
    }

    /// Effective period: always `len(path)`. Any advisory `period` supplied
    /// on input is ignored, per the recompute-from-path contract.
    pub fn period(&self) -> usize {
        self.path.len()
    }

    /// The cell this forklift occupies at non-negative integer time `t`.
    /// `index(t) = t mod len(path)` when looping, else `min(t, len(path)-1)`.
    pub fn position_at(&self, t: i64) -> Cell {
        self.path[self.index_at(t)]
    }

    fn index_at(&self, t: i64) -> usize {
        let len = self.path.len() as i64;
        let t = t.max(0);
        let idx = if self.looping { t % len } else { t.min(len - 1) };
        idx as usize
    }
}

/// A checked planning scenario: a grid plus entity lists that satisfy every
/// input invariant in the data model.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: Grid,
    pub robots: Vec<Cell>,
    pub tasks: Vec<Cell>,
    pub forklifts: Vec<Forklift>,
}

impl Scenario {
    /// Validate and assemble a scenario.
    ///
    /// Checks: robot count within `max_robots`; every robot and task cell is
    /// in-bounds and passable; robot starts are pairwise distinct; robot
    /// starts and tasks are disjoint.
    pub fn new(
        grid: Grid,
        robots: Vec<Cell>,
        tasks: Vec<Cell>,
        forklifts: Vec<Forklift>,
        max_robots: usize,
    ) -> Result<Self, CoreError> {
        if robots.len() > max_robots {
            return Err(CoreError::TooManyRobots {
                count: robots.len(),
                max: max_robots,
            });
        }

        let mut seen_robots = HashSet::new();
        for &robot in &robots {
            if !grid.in_bounds(robot) {
                return Err(CoreError::OutOfBounds(robot));
            }
            if !grid.is_passable(robot) {
                return Err(CoreError::InvalidEntity(format!(
                    "robot start {robot} is not passable"
                )));
            }
            if !seen_robots.insert(robot) {
                return Err(CoreError::InvalidEntity(format!(
                    "duplicate robot start {robot}"
                )));
            }
        }

        for &task in &tasks {
            if !grid.in_bounds(task) {
                return Err(CoreError::OutOfBounds(task));
            }
            if !grid.is_passable(task) {
                return Err(CoreError::InvalidEntity(format!(
                    "task {task} is not passable"
                )));
            }
            if seen_robots.contains(&task) {
                return Err(CoreError::InvalidEntity(format!(
                    "task {task} coincides with a robot start"
                )));
            }
        }

        Ok(Self {
            grid,
            robots,
            tasks,
            forklifts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(rows: i32, cols: i32) -> Grid {
        Grid::new(&vec![vec![0; cols as usize]; rows as usize]).unwrap()
    }

    #[test]
    fn forklift_rejects_short_path() {
        assert!(matches!(
            Forklift::new(vec![Cell::new(0, 0)], true),
            Err(CoreError::InvalidForklift(1))
        ));
    }

    #[test]
    fn forklift_loops() {
        let f = Forklift::new(
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)],
            true,
        )
        .unwrap();
        assert_eq!(f.position_at(0), Cell::new(0, 0));
        assert_eq!(f.position_at(2), Cell::new(0, 2));
        assert_eq!(f.position_at(3), Cell::new(0, 0));
        assert_eq!(f.position_at(4), Cell::new(0, 1));
    }

    #[test]
    fn forklift_clamps_when_not_looping() {
        let f = Forklift::new(vec![Cell::new(0, 0), Cell::new(0, 1)], false).unwrap();
        assert_eq!(f.position_at(0), Cell::new(0, 0));
        assert_eq!(f.position_at(1), Cell::new(0, 1));
        assert_eq!(f.position_at(100), Cell::new(0, 1));
    }

    #[test]
    fn scenario_rejects_duplicate_robots() {
        let grid = open(3, 3);
        let robots = vec![Cell::new(0, 0), Cell::new(0, 0)];
        let result = Scenario::new(grid, robots, vec![], vec![], DEFAULT_MAX_ROBOTS);
        assert!(result.is_err());
    }

    #[test]
    fn scenario_rejects_task_on_robot_start() {
        let grid = open(3, 3);
        let robots = vec![Cell::new(0, 0)];
        let tasks = vec![Cell::new(0, 0)];
        let result = Scenario::new(grid, robots, tasks, vec![], DEFAULT_MAX_ROBOTS);
        assert!(result.is_err());
    }

    #[test]
    fn scenario_enforces_max_robots() {
        let grid = open(3, 3);
        let robots = vec![Cell::new(0, 0), Cell::new(0, 1)];
        let result = Scenario::new(grid, robots, vec![], vec![], 1);
        assert!(matches!(
            result,
            Err(CoreError::TooManyRobots { count: 2, max: 1 })
        ));
    }

    #[test]
    fn scenario_accepts_valid_input() {
        let grid = open(3, 3);
        let robots = vec![Cell::new(0, 0)];
        let tasks = vec![Cell::new(2, 2)];
        let scenario = Scenario::new(grid, robots, tasks, vec![], DEFAULT_MAX_ROBOTS).unwrap();
        assert_eq!(scenario.robots.len(), 1);
        assert_eq!(scenario.tasks.len(), 1);
    }
}

//! Joins per-leg paths from the path library into one base path per robot.

use crate::error::PlanError;
use crate::path_library::PathLibrary;
use crate::progress::{ProgressPayload, ProgressSink, Stage};
use warehouse_core::Cell;

/// Per-robot leg costs and node counts, accumulated across the composed
/// base path (used for the per-robot stats emitted alongside scheduling).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeStats {
    pub nodes_expanded: u64,
    pub elapsed_seconds: f64,
}

/// Concatenate a robot's leg paths into one base path, suppressing the
/// duplicated join cell between consecutive legs. Fails on the first
/// unreachable leg, naming the robot and the unreached goal.
pub fn compose_base_path(
    robot: Cell,
    tasks: &[Cell],
    library: &PathLibrary,
    progress: &dyn ProgressSink,
) -> Result<(Vec<Cell>, ComposeStats), PlanError> {
    let span = tracing::info_span!("compose_base_path", robot = %robot, legs = tasks.len());
    let _enter = span.enter();

    let mut base = vec![robot];
    let mut stats = ComposeStats::default();
    let mut cur = robot;

    for &task in tasks {
        let entry = library.ensure(cur, task);
        if entry.path.is_empty() {
            tracing::warn!(robot = %robot, goal = %task, "leg unreachable during composition");
            return Err(PlanError::NoPath { robot, goal: task });
        }
        stats.nodes_expanded += entry.nodes_expanded;
        stats.elapsed_seconds += entry.elapsed_seconds;

        let leg = &entry.path;
        if base.last() == leg.first() {
            base.extend_from_slice(&leg[1..]);
        } else {
            base.extend_from_slice(leg);
        }
        cur = task;
        progress.report(Stage::Composition, ProgressPayload::LegComposed { robot, goal: task });
    }

    tracing::debug!(robot = %robot, steps = base.len().saturating_sub(1), "base path composed");
    Ok((base, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_engine::Algorithm;
    use crate::progress::NoopProgress;
    use warehouse_core::Grid;

    fn open_grid(rows: i32, cols: i32) -> Grid {
        Grid::new(&vec![vec![0; cols as usize]; rows as usize]).unwrap()
    }

    #[test]
    fn composes_two_legs_without_duplicating_join_cell() {
        let grid = open_grid(3, 3);
        let library = PathLibrary::new(&grid, Algorithm::AStar);
        let robot = Cell::new(0, 0);
        let tasks = vec![Cell::new(0, 2), Cell::new(2, 2)];
        let (base, _stats) = compose_base_path(robot, &tasks, &library, &NoopProgress).unwrap();
        assert_eq!(base.first(), Some(&robot));
        assert_eq!(base.last(), Some(&Cell::new(2, 2)));
        assert_eq!(base.len(), 5);
    }

    #[test]
    fn fails_on_unreachable_leg() {
        let rows = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let grid = Grid::new(&rows).unwrap();
        let library = PathLibrary::new(&grid, Algorithm::AStar);
        let robot = Cell::new(0, 0);
        let tasks = vec![Cell::new(2, 2)];
        let err = compose_base_path(robot, &tasks, &library, &NoopProgress).unwrap_err();
        assert_eq!(
            err,
            PlanError::NoPath {
                robot,
                goal: Cell::new(2, 2)
            }
        );
    }

    #[test]
    fn empty_task_list_yields_trivial_base_path() {
        let grid = open_grid(3, 3);
        let library = PathLibrary::new(&grid, Algorithm::AStar);
        let robot = Cell::new(1, 1);
        let (base, stats) = compose_base_path(robot, &[], &library, &NoopProgress).unwrap();
        assert_eq!(base, vec![robot]);
        assert_eq!(stats.nodes_expanded, 0);
    }
}

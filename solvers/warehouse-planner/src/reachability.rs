//! Partitions robots and tasks by path-library reachability before any
//! assignment strategy runs, so unreachable pairs never enter optimization.

use crate::path_library::PathLibrary;
use crate::progress::{ProgressPayload, ProgressSink, Stage};
use std::collections::HashSet;
use warehouse_core::Cell;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachability {
    pub active_robots: Vec<Cell>,
    pub inactive_robots: Vec<Cell>,
    pub assignable_tasks: Vec<Cell>,
    pub unreachable_tasks: Vec<Cell>,
}

/// Probe every `(robot, task)` pair through `library`. A robot is active if
/// it can reach at least one task; a task is assignable if at least one
/// robot can reach it.
pub fn analyze_reachability(
    robots: &[Cell],
    tasks: &[Cell],
    library: &PathLibrary,
    progress: &dyn ProgressSink,
) -> Reachability {
    let span = tracing::info_span!("reachability", robots = robots.len(), tasks = tasks.len());
    let _enter = span.enter();
    if robots.is_empty() {
        let result = Reachability {
            unreachable_tasks: tasks.to_vec(),
            ..Default::default()
        };
        report(progress, &result);
        return result;
    }
    if tasks.is_empty() {
        let result = Reachability {
            active_robots: robots.to_vec(),
            ..Default::default()
        };
        report(progress, &result);
        return result;
    }

    let mut reachable_tasks: HashSet<Cell> = HashSet::new();
    let mut active = Vec::new();
    let mut inactive = Vec::new();

    for &robot in robots {
        let mut robot_has_path = false;
        for &task in tasks {
            if library.cost(robot, task).is_finite() {
                robot_has_path = true;
                reachable_tasks.insert(task);
            }
        }
        if robot_has_path {
            active.push(robot);
        } else {
            inactive.push(robot);
        }
    }

    let assignable_tasks: Vec<Cell> = tasks
        .iter()
        .copied()
        .filter(|t| reachable_tasks.contains(t))
        .collect();
    let unreachable_tasks: Vec<Cell> = tasks
        .iter()
        .copied()
        .filter(|t| !reachable_tasks.contains(t))
        .collect();

    let result = Reachability {
        active_robots: active,
        inactive_robots: inactive,
        assignable_tasks,
        unreachable_tasks,
    };
    report(progress, &result);
    result
}

fn report(progress: &dyn ProgressSink, result: &Reachability) {
    tracing::event!(
        tracing::Level::DEBUG,
        active_robots = result.active_robots.len(),
        inactive_robots = result.inactive_robots.len(),
        assignable_tasks = result.assignable_tasks.len(),
        unreachable_tasks = result.unreachable_tasks.len(),
        "reachability computed"
    );
    progress.report(
        Stage::Reachability,
        ProgressPayload::ReachabilityComputed {
            active_robots: result.active_robots.len(),
            assignable_tasks: result.assignable_tasks.len(),
        },
    );
}

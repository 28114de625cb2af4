//! Nearest-available greedy assignment.

use super::Assignment;
use crate::path_library::PathLibrary;
use warehouse_core::Cell;

const DISTANCE_TOLERANCE: f64 = 1e-6;

/// Repeatedly pick the `(robot, task)` pair with the smallest Euclidean
/// distance from the robot's current position, breaking ties by path cost,
/// until no finite-cost pair remains.
pub fn greedy_assign(robots: &[Cell], tasks: &[Cell], library: &PathLibrary) -> Assignment {
    let span = tracing::info_span!("assignment_greedy", robots = robots.len(), tasks = tasks.len());
    let _enter = span.enter();
    let mut remaining: Vec<Cell> = tasks.to_vec();
    let mut assigned: Assignment = robots.iter().map(|&r| (r, Vec::new())).collect();
    let mut robot_pos: std::collections::HashMap<Cell, Cell> =
        robots.iter().map(|&r| (r, r)).collect();

    loop {
        let mut best: Option<(Cell, Cell)> = None;
        let mut best_dist = f64::INFINITY;
        let mut best_cost = crate::cost::Cost::Infinite;

        for &robot in robots {
            let cur = robot_pos[&robot];
            for &task in &remaining {
                let cost = library.cost(cur, task);
                if !cost.is_finite() {
                    continue;
                }
                let dist = cur.euclidean(task);
                let better_distance = dist < best_dist - DISTANCE_TOLERANCE;
                let tied_distance_cheaper_cost =
                    (dist - best_dist).abs() <= DISTANCE_TOLERANCE && cost < best_cost;
                if better_distance || tied_distance_cheaper_cost {
                    best_dist = dist;
                    best_cost = cost;
                    best = Some((robot, task));
                }
            }
        }

        match best {
            Some((robot, task)) => {
                assigned.get_mut(&robot).unwrap().push(task);
                robot_pos.insert(robot, task);
                remaining.retain(|&t| t != task);
            }
            None => break,
        }
    }

    tracing::debug!(assigned_tasks = tasks.len() - remaining.len(), "greedy assignment complete");
    assigned
}

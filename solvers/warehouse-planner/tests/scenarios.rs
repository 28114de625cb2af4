//! The seeded end-to-end scenarios from the design doc, exercised entirely
//! through the public pipeline API: reachability -> assignment -> base-path
//! composition -> CSP scheduling.

use pretty_assertions::assert_eq;
use std::collections::HashMap;
use warehouse_core::{Cell, Forklift, Grid};
use warehouse_planner::{
    analyze_reachability, assign, compose_base_path, csp_schedule, Algorithm, NoopProgress,
    Optimizer, PathLibrary,
};

fn open_grid(rows: i32, cols: i32) -> Grid {
    Grid::new(&vec![vec![0; cols as usize]; rows as usize]).unwrap()
}

/// 1. 3x3 all-passable grid, one robot, two tasks, greedy + A*.
#[test]
fn scenario_one_greedy_astar_assigns_both_tasks_in_distance_order() {
    let grid = open_grid(3, 3);
    let library = PathLibrary::new(&grid, Algorithm::AStar);
    let robot = Cell::new(0, 0);
    let tasks = vec![Cell::new(0, 2), Cell::new(2, 2)];

    let reachability = analyze_reachability(&[robot], &tasks, &library, &NoopProgress);
    assert_eq!(reachability.active_robots, vec![robot]);
    assert_eq!(reachability.unreachable_tasks, Vec::<Cell>::new());

    let assignment = assign(&Optimizer::Greedy, &[robot], &tasks, &library, &NoopProgress);
    assert_eq!(assignment[&robot], vec![Cell::new(0, 2), Cell::new(2, 2)]);

    let (base, _stats) = compose_base_path(robot, &assignment[&robot], &library, &NoopProgress).unwrap();
    assert_eq!(base.len(), 5);

    let paths = HashMap::from([(robot, base)]);
    let csp = csp_schedule(&[robot], &paths, &[], 40);
    assert!(csp.ok);
    assert_eq!(csp.start_times[&robot], 0);
}

/// 2. 3x3 grid, wall at (1,1), one robot, one task: path length 5, cost 4.
#[test]
fn scenario_two_wall_forces_detour_of_cost_four() {
    let rows = vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]];
    let grid = Grid::new(&rows).unwrap();
    let library = PathLibrary::new(&grid, Algorithm::AStar);
    let entry = library.ensure(Cell::new(0, 0), Cell::new(2, 2));
    assert_eq!(entry.path.len(), 5);
    assert_eq!(entry.cost, warehouse_planner::Cost::Finite(4));
}

/// 3. Two robots on a 1x5 corridor, each assigned its nearer task; CSP
/// succeeds because the two paths never occupy the same cell at the same
/// absolute time.
#[test]
fn scenario_three_corridor_robots_do_not_temporally_overlap() {
    let grid = open_grid(1, 5);
    let library = PathLibrary::new(&grid, Algorithm::AStar);
    let r0 = Cell::new(0, 0);
    let r1 = Cell::new(0, 4);
    let tasks = vec![Cell::new(0, 4), Cell::new(0, 0)];

    let assignment = assign(&Optimizer::Greedy, &[r0, r1], &tasks, &library, &NoopProgress);
    assert_eq!(assignment[&r0], vec![Cell::new(0, 0)]);
    assert_eq!(assignment[&r1], vec![Cell::new(0, 4)]);

    let (base0, _) = compose_base_path(r0, &assignment[&r0], &library, &NoopProgress).unwrap();
    let (base1, _) = compose_base_path(r1, &assignment[&r1], &library, &NoopProgress).unwrap();
    assert_eq!(base0, vec![r0]);
    assert_eq!(base1, vec![r1]);

    let paths = HashMap::from([(r0, base0), (r1, base1)]);
    let csp = csp_schedule(&[r0, r1], &paths, &[], 40);
    assert!(csp.ok);
    assert_eq!(csp.start_times[&r0], 0);
    assert_eq!(csp.start_times[&r1], 0);
}

/// 4. A robot whose only task sits behind a fully walled enclosure is
/// inactive; its task is unreachable and never enters assignment.
#[test]
fn scenario_four_enclosed_task_leaves_robot_inactive() {
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
    let task = Cell::new(2, 2);

    let reachability = analyze_reachability(&[robot], &[task], &library, &NoopProgress);
    assert_eq!(reachability.inactive_robots, vec![robot]);
    assert_eq!(reachability.unreachable_tasks, vec![task]);
    assert!(reachability.active_robots.is_empty());
    assert!(reachability.assignable_tasks.is_empty());

    let assignment = assign(
        &Optimizer::Greedy,
        &reachability.active_robots,
        &reachability.assignable_tasks,
        &library,
        &NoopProgress,
    );
    assert!(assignment.is_empty());
}

/// 5. A single robot's 5-cell path crosses a looping forklift that occupies
/// the robot's third cell at absolute time 2; with `max_offset=3`, CSP must
/// pick the smallest delay that avoids the vertex conflict.
#[test]
fn scenario_five_csp_delays_around_looping_forklift() {
    let robot = Cell::new(0, 0);
    let path = vec![
        Cell::new(0, 0),
        Cell::new(0, 1),
        Cell::new(0, 2),
        Cell::new(0, 3),
        Cell::new(0, 4),
    ];
    let forklift = Forklift::new(
        vec![Cell::new(5, 5), Cell::new(5, 6), Cell::new(0, 2)],
        true,
    )
    .unwrap();
    assert_eq!(forklift.position_at(2), Cell::new(0, 2));

    let paths = HashMap::from([(robot, path)]);
    let csp = csp_schedule(&[robot], &paths, &[forklift], 3);
    assert!(csp.ok);
    assert_eq!(csp.start_times[&robot], 1);
}

/// 6. Two robots whose base paths would swap adjacent cells at offset 0 must
/// not both receive offset 0 -- the CSP either finds a later delay or
/// reports failure within `max_offset`.
#[test]
fn scenario_six_csp_rejects_swap_conflict_at_zero_offset() {
    let r0 = Cell::new(0, 0);
    let r1 = Cell::new(0, 1);
    let p0 = vec![Cell::new(0, 0), Cell::new(0, 1)];
    let p1 = vec![Cell::new(0, 1), Cell::new(0, 0)];
    let paths = HashMap::from([(r0, p0), (r1, p1)]);

    let csp = csp_schedule(&[r0, r1], &paths, &[], 3);
    if csp.ok {
        assert!(csp.start_times[&r0] != 0 || csp.start_times[&r1] != 0);
    }
}

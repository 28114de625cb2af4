//! Backtracking CSP scheduler: assigns each robot an integer start-delay so
//! that no vertex or swap conflict remains, against moving obstacles or
//! against other robots.

use crate::progress::{ProgressPayload, ProgressSink, Stage};
use std::collections::{HashMap, HashSet};
use warehouse_core::{Cell, Forklift};

const DEFAULT_HORIZON_BUFFER: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspResult {
    pub ok: bool,
    pub start_times: HashMap<Cell, u32>,
    pub nodes_expanded: u64,
}

/// Schedule start offsets for `paths` (keyed by robot start cell, in the
/// order robots were given) so that, against `forklifts` and each other,
/// no robot occupies the same cell at the same absolute time as another
/// occupant, and no two occupants swap an edge between consecutive steps.
pub fn csp_schedule(
    robots: &[Cell],
    paths: &HashMap<Cell, Vec<Cell>>,
    forklifts: &[Forklift],
    max_offset: u32,
) -> CspResult {
    let span = tracing::info_span!(
        "csp_schedule",
        robots = robots.len(),
        forklifts = forklifts.len(),
        max_offset
    );
    let _enter = span.enter();

    let max_path_len = paths.values().map(|p| p.len()).max().unwrap_or(0);
    let horizon = max_offset as i64 + max_path_len as i64 + DEFAULT_HORIZON_BUFFER;

    let (vertex_obstruct, edge_obstruct) = materialize_obstacles(forklifts, horizon);

    let mut assigned: HashMap<Cell, u32> = HashMap::new();
    let mut nodes_expanded: u64 = 0;

    let ok = backtrack(
        robots,
        paths,
        max_offset,
        &vertex_obstruct,
        &edge_obstruct,
        &mut assigned,
        &mut nodes_expanded,
    );

    tracing::debug!(ok, nodes_expanded, "csp search complete");

    CspResult {
        ok,
        start_times: if ok { assigned } else { HashMap::new() },
        nodes_expanded,
    }
}

pub fn csp_schedule_with_progress(
    robots: &[Cell],
    paths: &HashMap<Cell, Vec<Cell>>,
    forklifts: &[Forklift],
    max_offset: u32,
    progress: &dyn ProgressSink,
) -> CspResult {
    let result = csp_schedule(robots, paths, forklifts, max_offset);
    progress.report(
        Stage::Csp,
        ProgressPayload::CspOffsetsTried {
            robot_index: robots.len(),
            offsets_tried: result.nodes_expanded as u32,
        },
    );
    result
}

fn materialize_obstacles(
    forklifts: &[Forklift],
    horizon: i64,
) -> (HashSet<(Cell, i64)>, HashSet<(Cell, Cell, i64)>) {
    let mut vertex = HashSet::new();
    let mut edge = HashSet::new();
    for forklift in forklifts {
        for t in 0..=horizon {
            let a = forklift.position_at(t);
            vertex.insert((a, t));
            let b = forklift.position_at(t + 1);
            if a != b {
                edge.insert((a, b, t));
            }
        }
    }
    (vertex, edge)
}

fn conflicts_with_obstacles(
    path: &[Cell],
    offset: u32,
    vertex_obstruct: &HashSet<(Cell, i64)>,
    edge_obstruct: &HashSet<(Cell, Cell, i64)>,
) -> bool {
    for (k, &cell) in path.iter().enumerate() {
        let t = offset as i64 + k as i64;
        if vertex_obstruct.contains(&(cell, t)) {
            return true;
        }
    }
    for k in 0..path.len().saturating_sub(1) {
        let (a, b) = (path[k], path[k + 1]);
        let t = offset as i64 + k as i64;
        if edge_obstruct.contains(&(b, a, t)) {
            return true;
        }
    }
    false
}

fn conflicts_with_robot(
    path: &[Cell],
    offset: u32,
    other_path: &[Cell],
    other_offset: u32,
) -> bool {
    for (k, &cell) in path.iter().enumerate() {
        let t = offset as i64 + k as i64;
        for (other_k, &other_cell) in other_path.iter().enumerate() {
            if other_offset as i64 + other_k as i64 == t && other_cell == cell {
                return true;
            }
        }
    }
    for k in 0..path.len().saturating_sub(1) {
        let (a, b) = (path[k], path[k + 1]);
        let t = offset as i64 + k as i64;
        for other_k in 0..other_path.len().saturating_sub(1) {
            let (a2, b2) = (other_path[other_k], other_path[other_k + 1]);
            if other_offset as i64 + other_k as i64 == t && a == b2 && b == a2 {
                return true;
            }
        }
    }
    false
}

fn backtrack(
    robots: &[Cell],
    paths: &HashMap<Cell, Vec<Cell>>,
    max_offset: u32,
    vertex_obstruct: &HashSet<(Cell, i64)>,
    edge_obstruct: &HashSet<(Cell, Cell, i64)>,
    assigned: &mut HashMap<Cell, u32>,
    nodes_expanded: &mut u64,
) -> bool {
    let idx = assigned.len();
    if idx == robots.len() {
        return true;
    }
    let robot = robots[idx];
    let path = &paths[&robot];

    for offset in 0..=max_offset {
        *nodes_expanded += 1;
        if conflicts_with_obstacles(path, offset, vertex_obstruct, edge_obstruct) {
            continue;
        }
        let has_robot_conflict = assigned.iter().any(|(&other_robot, &other_offset)| {
            conflicts_with_robot(path, offset, &paths[&other_robot], other_offset)
        });
        if has_robot_conflict {
            continue;
        }

        assigned.insert(robot, offset);
        if backtrack(
            robots,
            paths,
            max_offset,
            vertex_obstruct,
            edge_obstruct,
            assigned,
            nodes_expanded,
        ) {
            return true;
        }
        assigned.remove(&robot);
    }
    false
}

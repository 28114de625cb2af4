//! Time-indexed obstacle maps and per-path task-arrival timelines.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use warehouse_core::{Cell, Forklift};

/// Build the set of cells occupied by any forklift at each absolute time
/// step in `[start_time, start_time + horizon]`, for feeding into time-
/// indexed A* during replanning.
pub fn build_dynamic_obstacle_timeline(
    forklifts: &[Forklift],
    horizon: i64,
    start_time: i64,
) -> HashMap<i64, HashSet<Cell>> {
    let mut timeline: HashMap<i64, HashSet<Cell>> = HashMap::new();
    for offset in 0..=horizon {
        timeline.insert(start_time + offset, HashSet::new());
    }
    for forklift in forklifts {
        for offset in 0..=horizon {
            let t = start_time + offset;
            timeline.entry(t).or_default().insert(forklift.position_at(t));
        }
    }
    timeline
}

/// One step of a composed path: the absolute step index, the cell
/// occupied, and (if this cell completes the next unreached task in
/// order) a marker naming that task and its 1-based completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub time: usize,
    pub cell: Cell,
    pub reached_task: Option<ReachedTask>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachedTask {
    pub task: Cell,
    pub order: usize,
}

/// Walk `path`, marking each step that completes the next task in `tasks`
/// (in order). A task is only matched once, at the first step that visits
/// it after the previous task (if any) has been reached.
pub fn build_path_timeline(path: &[Cell], tasks: &[Cell]) -> Vec<TimelineStep> {
    let mut reached = 0usize;
    path.iter()
        .enumerate()
        .map(|(time, &cell)| {
            let marker = if reached < tasks.len() && cell == tasks[reached] {
                reached += 1;
                Some(ReachedTask {
                    task: cell,
                    order: reached,
                })
            } else {
                None
            };
            TimelineStep {
                time,
                cell,
                reached_task: marker,
            }
        })
        .collect()
}

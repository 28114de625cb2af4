//! Single-robot replanning against a known moving-obstacle schedule.

use crate::error::PlanError;
use crate::path_engine::{self, Algorithm, DynamicObstacles};
use crate::progress::{ProgressPayload, ProgressSink, Stage};
use crate::timeline::build_dynamic_obstacle_timeline;
use std::collections::HashMap;
use warehouse_core::{Cell, Forklift, Grid};

/// Minimum replanning horizon; the actual horizon also scales with the
/// number of remaining tasks so longer task lists get more lookahead.
const MIN_HORIZON: i64 = 40;
const HORIZON_PER_TASK: i64 = 12;

/// Re-route a single robot through its remaining tasks in order, starting
/// at `current_time`, avoiding the forklifts' future positions. Fails fast
/// on the first unreachable leg.
pub fn replan(
    grid: &Grid,
    start: Cell,
    tasks_remaining: &[Cell],
    forklifts: &[Forklift],
    current_time: i64,
    algorithm: Algorithm,
    progress: &dyn ProgressSink,
) -> Result<Vec<Cell>, PlanError> {
    let span = tracing::info_span!(
        "replan",
        start = %start,
        tasks_remaining = tasks_remaining.len(),
        current_time
    );
    let _enter = span.enter();

    let horizon = MIN_HORIZON.max(HORIZON_PER_TASK * tasks_remaining.len() as i64);
    let timeline = build_dynamic_obstacle_timeline(forklifts, horizon, current_time);

    let mut path = vec![start];
    let mut cur = start;
    let mut leg_start_time = current_time;

    for &task in tasks_remaining {
        let rebased = rebase_timeline(&timeline, leg_start_time);
        let result = path_engine::search(
            grid,
            cur,
            task,
            algorithm,
            Some(&DynamicObstacles::TimeIndexed(rebased)),
        );
        if !result.found() {
            tracing::warn!(start = %cur, task = %task, "leg unreachable during replan");
            return Err(PlanError::NoPathReplan { start: cur, task });
        }
        let leg = &result.path;
        if path.last() == leg.first() {
            path.extend_from_slice(&leg[1..]);
        } else {
            path.extend_from_slice(leg);
        }
        leg_start_time += (leg.len() as i64 - 1).max(0);
        cur = task;
        progress.report(Stage::Replan, ProgressPayload::ReplanLegComposed { task });
    }

    tracing::debug!(steps = path.len().saturating_sub(1), "replan complete");
    Ok(path)
}

/// Re-key an absolute-time timeline so that `leg_start_time` becomes step
/// `0`, matching the path engine's own step-from-zero indexing for this leg.
fn rebase_timeline(
    timeline: &HashMap<i64, std::collections::HashSet<Cell>>,
    leg_start_time: i64,
) -> HashMap<i64, std::collections::HashSet<Cell>> {
    timeline
        .iter()
        .filter_map(|(&t, cells)| {
            let rebased = t - leg_start_time;
            (rebased >= 0).then(|| (rebased, cells.clone()))
        })
        .collect()
}

//! The four external planning operations, as plain typed Rust functions.
//!
//! Each takes a `serde`-derived request and returns a `serde`-derived
//! response -- the shape an (absent) HTTP handler would marshal to and
//! from JSON. This module is the boundary the rest of the service and the
//! CLI binary call through; there is no networked surface behind it.

use crate::config::Config;
use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use warehouse_core::{Cell, Forklift, Grid, Scenario};
use warehouse_planner::{
    analyze_reachability, assign, build_path_timeline, compose_base_path, csp_schedule, replan,
    Algorithm, ComposeStats, CspResult, NoopProgress, Optimizer, PathLibrary, TimelineStep,
};

fn build_library<'g>(grid: &'g Grid, alg: &str) -> (Algorithm, PathLibrary<'g>) {
    let algorithm = Algorithm::from_selector(alg);
    (algorithm, PathLibrary::new(grid, algorithm))
}

// --- 1. Plan assignments -----------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanAssignmentsRequest {
    pub grid: Vec<Vec<i32>>,
    pub robots: Vec<Cell>,
    pub tasks: Vec<Cell>,
    #[serde(default = "default_optimizer")]
    pub optimizer: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

fn default_optimizer() -> String {
    "greedy".to_string()
}

fn default_algorithm() -> String {
    "astar".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegCost {
    pub from: Cell,
    pub to: Cell,
    pub cost: Option<u32>,
}

/// `(robot, ...)` pairs rather than a `Cell`-keyed map: JSON objects only
/// take string keys, and a `Cell` is a `{row, col}` object, not a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanAssignmentsResponse {
    pub assignment: Vec<(Cell, Vec<Cell>)>,
    pub leg_costs: Vec<(Cell, Vec<LegCost>)>,
    pub active_robots: Vec<Cell>,
    pub inactive_robots: Vec<Cell>,
    pub assignable_tasks: Vec<Cell>,
    pub unreachable_tasks: Vec<Cell>,
    pub planning_time_ms: f64,
}

pub fn plan_assignments(
    request: &PlanAssignmentsRequest,
    config: &Config,
) -> Result<PlanAssignmentsResponse> {
    let t0 = Instant::now();
    let grid = Grid::new(&request.grid)?;
    let scenario = Scenario::new(
        grid.clone(),
        request.robots.clone(),
        request.tasks.clone(),
        Vec::new(),
        config.max_robots,
    )?;

    let (_algorithm, library) = build_library(&grid, &request.algorithm);
    let reachability = analyze_reachability(
        &scenario.robots,
        &scenario.tasks,
        &library,
        &NoopProgress,
    );

    let optimizer = Optimizer::from_selector(&request.optimizer);
    let assignment = assign(
        &optimizer,
        &reachability.active_robots,
        &reachability.assignable_tasks,
        &library,
        &NoopProgress,
    );

    let mut leg_costs: Vec<(Cell, Vec<LegCost>)> = Vec::new();
    for (&robot, legs) in &assignment {
        let mut cur = robot;
        let mut costs = Vec::with_capacity(legs.len());
        for &task in legs {
            let cost = library.cost(cur, task);
            costs.push(LegCost {
                from: cur,
                to: task,
                cost: match cost {
                    warehouse_planner::Cost::Finite(v) => Some(v),
                    warehouse_planner::Cost::Infinite => None,
                },
            });
            cur = task;
        }
        leg_costs.push((robot, costs));
    }

    Ok(PlanAssignmentsResponse {
        assignment: assignment.into_iter().collect(),
        leg_costs,
        active_robots: reachability.active_robots,
        inactive_robots: reachability.inactive_robots,
        assignable_tasks: reachability.assignable_tasks,
        unreachable_tasks: reachability.unreachable_tasks,
        planning_time_ms: t0.elapsed().as_secs_f64() * 1000.0,
    })
}

// --- 2. Compose and schedule --------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeAndScheduleRequest {
    pub grid: Vec<Vec<i32>>,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    pub assignment: Vec<(Cell, Vec<Cell>)>,
    #[serde(default)]
    pub moving_obstacles: Vec<ForkliftInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForkliftInput {
    pub path: Vec<Cell>,
    #[serde(rename = "loop", default = "default_true")]
    pub looping: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotStats {
    pub path_steps: usize,
    pub wait_steps: u32,
    pub execution_steps: usize,
    pub planner_nodes: u64,
    pub planner_time_s: f64,
    /// Per-step walk of the scheduled path (wait segment included), marking
    /// the step at which each assigned task is reached, per SPEC_FULL §4.8.
    pub timeline: Vec<TimelineStep>,
}

/// Flattened view of [`CspResult`] safe for JSON: `start_times` as pairs
/// rather than a `Cell`-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CspSummary {
    pub ok: bool,
    pub start_times: Vec<(Cell, u32)>,
    pub nodes_expanded: u64,
}

impl From<CspResult> for CspSummary {
    fn from(result: CspResult) -> Self {
        Self {
            ok: result.ok,
            start_times: result.start_times.into_iter().collect(),
            nodes_expanded: result.nodes_expanded,
        }
    }
}

/// Mirrors the donor's `{ok, ...}` response dict: on success the `base_*`
/// fields are populated and `reason`/`robot`/`to` are `None`; on failure
/// only `reason`, `robot`, and `to` are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeAndScheduleResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_paths: Option<Vec<(Cell, Vec<Cell>)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_paths: Option<Vec<(Cell, Vec<Cell>)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<(Cell, RobotStats)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csp: Option<CspSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robot: Option<Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Cell>,
}

impl ComposeAndScheduleResponse {
    fn no_path(robot: Cell, to: Cell) -> Self {
        Self {
            ok: false,
            base_paths: None,
            scheduled_paths: None,
            stats: None,
            csp: None,
            planning_time_ms: None,
            reason: Some("no_path".to_string()),
            robot: Some(robot),
            to: Some(to),
        }
    }
}

pub fn compose_and_schedule(
    request: &ComposeAndScheduleRequest,
    config: &Config,
) -> Result<ComposeAndScheduleResponse> {
    let t0 = Instant::now();
    let grid = Grid::new(&request.grid)?;
    let (_algorithm, library) = build_library(&grid, &request.algorithm);

    let assignment: HashMap<Cell, Vec<Cell>> = request.assignment.iter().cloned().collect();
    let robots: Vec<Cell> = request.assignment.iter().map(|(robot, _)| *robot).collect();
    let mut base_paths: HashMap<Cell, Vec<Cell>> = HashMap::new();
    let mut compose_stats: HashMap<Cell, ComposeStats> = HashMap::new();

    for &robot in &robots {
        let tasks = &assignment[&robot];
        match compose_base_path(robot, tasks, &library, &NoopProgress) {
            Ok((base, stats)) => {
                base_paths.insert(robot, base);
                compose_stats.insert(robot, stats);
            }
            Err(warehouse_planner::PlanError::NoPath { robot, goal }) => {
                return Ok(ComposeAndScheduleResponse::no_path(robot, goal));
            }
            Err(other) => return Err(ServiceError::Planning(other)),
        }
    }

    let forklifts = build_forklifts(&request.moving_obstacles)?;
    let csp = csp_schedule(&robots, &base_paths, &forklifts, config.csp_max_offset);

    let mut scheduled_paths: Vec<(Cell, Vec<Cell>)> = Vec::new();
    let mut stats: Vec<(Cell, RobotStats)> = Vec::new();
    for &robot in &robots {
        let base = &base_paths[&robot];
        let delay = csp.start_times.get(&robot).copied().unwrap_or(0);
        let mut scheduled = vec![base[0]; delay as usize];
        scheduled.extend_from_slice(base);

        let compose_stat = &compose_stats[&robot];
        let timeline = build_path_timeline(&scheduled, &assignment[&robot]);
        stats.push((
            robot,
            RobotStats {
                path_steps: base.len().saturating_sub(1),
                wait_steps: delay,
                execution_steps: scheduled.len().saturating_sub(1),
                planner_nodes: compose_stat.nodes_expanded,
                planner_time_s: compose_stat.elapsed_seconds,
                timeline,
            },
        ));
        scheduled_paths.push((robot, scheduled));
    }

    Ok(ComposeAndScheduleResponse {
        ok: true,
        base_paths: Some(base_paths.into_iter().collect()),
        scheduled_paths: Some(scheduled_paths),
        stats: Some(stats),
        csp: Some(csp.into()),
        planning_time_ms: Some(t0.elapsed().as_secs_f64() * 1000.0),
        reason: None,
        robot: None,
        to: None,
    })
}

// --- 3. Replan -----------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplanRequest {
    pub grid: Vec<Vec<i32>>,
    pub start: Cell,
    pub tasks_remaining: Vec<Cell>,
    #[serde(default)]
    pub moving_obstacles: Vec<ForkliftInput>,
    #[serde(default)]
    pub current_time: i64,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplanResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Cell>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Cell>,
}

pub fn replan_route(request: &ReplanRequest) -> Result<ReplanResponse> {
    let grid = Grid::new(&request.grid)?;
    let forklifts = build_forklifts(&request.moving_obstacles)?;
    let algorithm = Algorithm::from_selector(&request.algorithm);

    match replan(
        &grid,
        request.start,
        &request.tasks_remaining,
        &forklifts,
        request.current_time,
        algorithm,
        &NoopProgress,
    ) {
        Ok(path) => Ok(ReplanResponse {
            ok: true,
            path: Some(path),
            reason: None,
            task: None,
        }),
        Err(warehouse_planner::PlanError::NoPathReplan { task, .. }) => Ok(ReplanResponse {
            ok: false,
            path: None,
            reason: Some("no_path_replan".to_string()),
            task: Some(task),
        }),
        Err(other) => Err(ServiceError::Planning(other)),
    }
}

fn build_forklifts(inputs: &[ForkliftInput]) -> Result<Vec<Forklift>> {
    inputs
        .iter()
        .map(|f| Forklift::new(f.path.clone(), f.looping).map_err(ServiceError::Invalid))
        .collect()
}

//! Simulated-annealing-flavored local search over the greedy seed order.

use super::{greedy::greedy_assign, split_evenly, Assignment};
use crate::path_library::PathLibrary;
use crate::progress::{ProgressPayload, ProgressSink, Stage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use warehouse_core::Cell;

#[derive(Debug, Clone)]
pub struct LocalSearchConfig {
    pub iterations: u32,
    pub escape_probability: f64,
    pub reversal_probability: f64,
    pub seed: u64,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            iterations: 2000,
            escape_probability: 0.05,
            reversal_probability: 0.25,
            seed: 0,
        }
    }
}

fn score(order: &[Cell], robots: &[Cell], library: &PathLibrary) -> f64 {
    let parts = split_evenly(order, robots.len());
    let mut total = 0.0;
    for (robot_idx, &robot) in robots.iter().enumerate() {
        let mut cur = robot;
        for &task in &parts[robot_idx] {
            total += library.cost(cur, task).as_f64();
            cur = task;
        }
    }
    total
}

/// Perturb the greedy seed order by repeated swap (+ occasional 2-opt
/// reversal), accepting improvements and occasionally worse candidates to
/// escape local minima.
pub fn local_search_assign(
    robots: &[Cell],
    tasks: &[Cell],
    library: &PathLibrary,
    config: &LocalSearchConfig,
    progress: &dyn ProgressSink,
) -> Assignment {
    let span = tracing::info_span!(
        "assignment_local_search",
        robots = robots.len(),
        tasks = tasks.len(),
        iterations = config.iterations
    );
    let _enter = span.enter();

    let seed = greedy_assign(robots, tasks, library);
    let flat: Vec<Cell> = robots
        .iter()
        .flat_map(|r| seed.get(r).cloned().unwrap_or_default())
        .collect();
    if flat.is_empty() {
        return seed;
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut current = flat.clone();
    let mut current_score = score(&current, robots, library);
    let mut best = current.clone();
    let mut best_score = current_score;

    for iteration in 0..config.iterations {
        let mut candidate = current.clone();
        if candidate.len() >= 2 {
            let i = rng.gen_range(0..candidate.len());
            let mut j = rng.gen_range(0..candidate.len());
            while j == i {
                j = rng.gen_range(0..candidate.len());
            }
            candidate.swap(i, j);
        }
        if candidate.len() >= 3 && rng.gen_bool(config.reversal_probability) {
            let mut i = rng.gen_range(0..candidate.len());
            let mut j = rng.gen_range(0..candidate.len());
            if i > j {
                std::mem::swap(&mut i, &mut j);
            }
            candidate[i..j].reverse();
        }

        let candidate_score = score(&candidate, robots, library);
        if candidate_score < current_score || rng.gen_bool(config.escape_probability) {
            current = candidate;
            current_score = candidate_score;
            if current_score < best_score {
                best = current.clone();
                best_score = current_score;
            }
        }

        if iteration % 100 == 0 {
            tracing::trace!(iteration, best_score, "local search iteration evaluated");
            progress.report(
                Stage::Assignment,
                ProgressPayload::AssignmentProgress {
                    generation: iteration,
                    best_cost: best_score,
                },
            );
        }
    }

    tracing::debug!(best_score, "local search assignment complete");
    let parts = split_evenly(&best, robots.len());
    robots.iter().copied().zip(parts).collect::<Assignment>()
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
    fn local_search_never_loses_or_duplicates_tasks() {
        let grid = open_grid(5, 5);
        let library = PathLibrary::new(&grid, Algorithm::AStar);
        let robots = vec![Cell::new(0, 0), Cell::new(4, 4)];
        let tasks = vec![
            Cell::new(0, 4),
            Cell::new(4, 0),
            Cell::new(2, 2),
            Cell::new(1, 3),
        ];
        let config = LocalSearchConfig {
            iterations: 50,
            ..LocalSearchConfig::default()
        };
        let result = local_search_assign(&robots, &tasks, &library, &config, &NoopProgress);
        let mut assigned: Vec<Cell> = result.values().flatten().copied().collect();
        assigned.sort();
        let mut expected = tasks.clone();
        expected.sort();
        assert_eq!(assigned, expected);
    }

    #[test]
    fn local_search_is_deterministic_for_fixed_seed() {
        let grid = open_grid(5, 5);
        let library = PathLibrary::new(&grid, Algorithm::AStar);
        let robots = vec![Cell::new(0, 0)];
        let tasks = vec![Cell::new(0, 4), Cell::new(4, 0), Cell::new(2, 2)];
        let config = LocalSearchConfig {
            iterations: 20,
            seed: 7,
            ..LocalSearchConfig::default()
        };
        let a = local_search_assign(&robots, &tasks, &library, &config, &NoopProgress);
        let b = local_search_assign(&robots, &tasks, &library, &config, &NoopProgress);
        assert_eq!(a, b);
    }

    #[test]
    fn local_search_handles_empty_tasks() {
        let grid = open_grid(3, 3);
        let library = PathLibrary::new(&grid, Algorithm::AStar);
        let robots = vec![Cell::new(0, 0)];
        let result = local_search_assign(
            &robots,
            &[],
            &library,
            &LocalSearchConfig::default(),
            &NoopProgress,
        );
        assert!(result[&robots[0]].is_empty());
    }
}

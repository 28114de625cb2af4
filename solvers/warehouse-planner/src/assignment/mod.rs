//! Task-to-robot assignment strategies.
//!
//! All three strategies minimize the same objective (total path cost of
//! each robot's ordered task list) and share the `Assignment` output shape;
//! they differ only in how they search the space of task orderings.

mod genetic;
mod greedy;
mod local_search;

pub use genetic::{ga_assign, GaConfig};
pub use greedy::greedy_assign;
pub use local_search::{local_search_assign, LocalSearchConfig};

use crate::path_library::PathLibrary;
use crate::progress::ProgressSink;
use std::collections::HashMap;
use warehouse_core::Cell;

/// Robot → ordered task list. The union of all lists is a subset of the
/// input tasks; every task appears in at most one list.
pub type Assignment = HashMap<Cell, Vec<Cell>>;

/// Which search strategy to run. `"greedy"` is the default selector; `"ga"`
/// selects the genetic algorithm; any other string selects local search.
#[derive(Debug, Clone)]
pub enum Optimizer {
    Greedy,
    Genetic(GaConfig),
    LocalSearch(LocalSearchConfig),
}

impl Optimizer {
    pub fn from_selector(selector: &str) -> Self {
        if selector.eq_ignore_ascii_case("ga") {
            Optimizer::Genetic(GaConfig::default())
        } else if selector.eq_ignore_ascii_case("greedy") {
            Optimizer::Greedy
        } else {
            Optimizer::LocalSearch(LocalSearchConfig::default())
        }
    }
}

/// Split a flat chromosome/order into per-robot contiguous blocks: sizes
/// `ceil(n/r)` for the first `n mod r` robots, `floor(n/r)` for the rest.
pub(crate) fn split_evenly<T: Clone>(items: &[T], num_robots: usize) -> Vec<Vec<T>> {
    let n = items.len();
    let base = n / num_robots;
    let remainder = n % num_robots;
    let mut out = Vec::with_capacity(num_robots);
    let mut idx = 0;
    for robot_idx in 0..num_robots {
        let size = base + usize::from(robot_idx < remainder);
        out.push(items[idx..idx + size].to_vec());
        idx += size;
    }
    out
}

/// Run the selected strategy.
pub fn assign(
    optimizer: &Optimizer,
    robots: &[Cell],
    tasks: &[Cell],
    library: &PathLibrary,
    progress: &dyn ProgressSink,
) -> Assignment {
    match optimizer {
        Optimizer::Greedy => greedy_assign(robots, tasks, library),
        Optimizer::Genetic(config) => ga_assign(robots, tasks, library, config, progress),
        Optimizer::LocalSearch(config) => {
            local_search_assign(robots, tasks, library, config, progress)
        }
    }
}

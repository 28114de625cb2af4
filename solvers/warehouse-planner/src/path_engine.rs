//! A* and uniform-cost (Dijkstra) search over 4-connected grids, with
//! optional time-indexed or static dynamic-obstacle avoidance.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;
use warehouse_core::{Cell, Grid};

/// `"astar"` selects A*; any other string selects Dijkstra (zero heuristic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    AStar,
    Dijkstra,
}

impl Algorithm {
    pub fn from_selector(selector: &str) -> Self {
        if selector.eq_ignore_ascii_case("astar") {
            Algorithm::AStar
        } else {
            Algorithm::Dijkstra
        }
    }

    fn heuristic(self, from: Cell, goal: Cell) -> u32 {
        match self {
            Algorithm::AStar => from.manhattan(goal),
            Algorithm::Dijkstra => 0,
        }
    }
}

/// Dynamic-obstacle input for a single search.
///
/// `TimeIndexed` forbids moving into a cell at the absolute step it names
/// (the replanning case, where future obstacle positions are known).
/// `Static` forbids a fixed set of cells for the whole search.
#[derive(Debug, Clone)]
pub enum DynamicObstacles {
    TimeIndexed(HashMap<i64, HashSet<Cell>>),
    Static(HashSet<Cell>),
}

/// Outcome of one A*/Dijkstra search: the path (empty on failure), the
/// number of cells expanded, and the wall-clock time spent, for reporting.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub path: Vec<Cell>,
    pub nodes_expanded: u64,
    pub elapsed_seconds: f64,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Run A* (or Dijkstra, depending on `algorithm`) from `start` to `goal`.
pub fn search(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    algorithm: Algorithm,
    dynamic: Option<&DynamicObstacles>,
) -> SearchResult {
    let t0 = Instant::now();

    if !grid.is_passable(start) || !grid.is_passable(goal) {
        return SearchResult {
            path: Vec::new(),
            nodes_expanded: 0,
            elapsed_seconds: t0.elapsed().as_secs_f64(),
        };
    }
    if start == goal {
        return SearchResult {
            path: vec![start],
            nodes_expanded: 0,
            elapsed_seconds: t0.elapsed().as_secs_f64(),
        };
    }

    let static_blocked: Option<&HashSet<Cell>> = match dynamic {
        Some(DynamicObstacles::Static(cells)) => Some(cells),
        _ => None,
    };
    let time_indexed: Option<&HashMap<i64, HashSet<Cell>>> = match dynamic {
        Some(DynamicObstacles::TimeIndexed(map)) => Some(map),
        _ => None,
    };

    let mut open: BinaryHeap<Reverse<(u32, u32, Cell)>> = BinaryHeap::new();
    open.push(Reverse((algorithm.heuristic(start, goal), 0, start)));

    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_score: HashMap<Cell, u32> = HashMap::from([(start, 0)]);
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut nodes_expanded: u64 = 0;

    while let Some(Reverse((_, g, current))) = open.pop() {
        if closed.contains(&current) {
            continue;
        }
        closed.insert(current);
        nodes_expanded += 1;

        if current == goal {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(&prev) = came_from.get(&cursor) {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return SearchResult {
                path,
                nodes_expanded,
                elapsed_seconds: t0.elapsed().as_secs_f64(),
            };
        }

        for next in grid.passable_neighbors4(current) {
            if let Some(blocked) = static_blocked {
                if blocked.contains(&next) {
                    continue;
                }
            }
            let tentative_g = g + 1;
            if let Some(timeline) = time_indexed {
                if let Some(blocked) = timeline.get(&(tentative_g as i64)) {
                    if blocked.contains(&next) {
                        continue;
                    }
                }
            }
            if tentative_g < *g_score.get(&next).unwrap_or(&u32::MAX) {
                g_score.insert(next, tentative_g);
                came_from.insert(next, current);
                open.push(Reverse((
                    tentative_g + algorithm.heuristic(next, goal),
                    tentative_g,
                    next,
                )));
            }
        }
    }

    SearchResult {
        path: Vec::new(),
        nodes_expanded,
        elapsed_seconds: t0.elapsed().as_secs_f64(),
    }
}

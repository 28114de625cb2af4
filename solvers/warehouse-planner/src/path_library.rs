//! Per-request memoization of `(start, goal) -> {path, cost, nodes, time}`.
//!
//! Keyed by packed `(u32, u32)` cell indices rather than nested `Cell`
//! tuples, so the cache key is a fixed-width pair regardless of how `Cell`
//! itself is represented.

use crate::cell_index::CellIndex;
use crate::cost::Cost;
use crate::path_engine::{self, Algorithm};
use std::cell::RefCell;
use std::collections::HashMap;
use warehouse_core::{Cell, Grid};

#[derive(Debug, Clone)]
pub struct PathEntry {
    pub path: Vec<Cell>,
    pub cost: Cost,
    pub nodes_expanded: u64,
    pub elapsed_seconds: f64,
}

/// Single-reader single-writer memoization scoped to one planning call.
///
/// Interior mutability via `RefCell` lets the library be shared by `&self`
/// references across assignment/composition code without every caller
/// threading a `&mut`.
pub struct PathLibrary<'g> {
    grid: &'g Grid,
    algorithm: Algorithm,
    cache: RefCell<HashMap<(CellIndex, CellIndex), PathEntry>>,
}

impl<'g> PathLibrary<'g> {
    pub fn new(grid: &'g Grid, algorithm: Algorithm) -> Self {
        Self {
            grid,
            algorithm,
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn key(&self, start: Cell, goal: Cell) -> (CellIndex, CellIndex) {
        let width = self.grid.width();
        (CellIndex::pack(start, width), CellIndex::pack(goal, width))
    }

    /// Return the cached entry for `(start, goal)`, computing and caching it
    /// on first access. Two calls with the same key return equal results
    /// (the underlying search is deterministic).
    pub fn ensure(&self, start: Cell, goal: Cell) -> PathEntry {
        let key = self.key(start, goal);
        if let Some(entry) = self.cache.borrow().get(&key) {
            return entry.clone();
        }
        let result = path_engine::search(self.grid, start, goal, self.algorithm, None);
        let cost = if result.found() {
            Cost::Finite((result.path.len() - 1) as u32)
        } else {
            Cost::Infinite
        };
        let entry = PathEntry {
            path: result.path,
            cost,
            nodes_expanded: result.nodes_expanded,
            elapsed_seconds: result.elapsed_seconds,
        };
        self.cache.borrow_mut().insert(key, entry.clone());
        entry
    }

    pub fn cost(&self, start: Cell, goal: Cell) -> Cost {
        self.ensure(start, goal).cost
    }

    pub fn path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        self.ensure(start, goal).path
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(rows: i32, cols: i32) -> Grid {
        Grid::new(&vec![vec![0; cols as usize]; rows as usize]).unwrap()
    }

    #[test]
    fn ensure_is_deterministic_across_calls() {
        let grid = open_grid(5, 5);
        let lib = PathLibrary::new(&grid, Algorithm::AStar);
        let a = lib.ensure(Cell::new(0, 0), Cell::new(4, 4));
        let b = lib.ensure(Cell::new(0, 0), Cell::new(4, 4));
        assert_eq!(a.path, b.path);
        assert_eq!(a.cost, b.cost);
    }

    #[test]
    fn cost_is_infinite_for_unreachable_goal() {
        let grid_rows = vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ];
        let grid = Grid::new(&grid_rows).unwrap();
        let lib = PathLibrary::new(&grid, Algorithm::AStar);
        assert_eq!(lib.cost(Cell::new(0, 0), Cell::new(2, 2)), Cost::Infinite);
    }

    #[test]
    fn caches_after_first_access() {
        let grid = open_grid(3, 3);
        let lib = PathLibrary::new(&grid, Algorithm::AStar);
        assert!(lib.is_empty());
        lib.ensure(Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(lib.len(), 1);
        lib.ensure(Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(lib.len(), 1);
    }
}

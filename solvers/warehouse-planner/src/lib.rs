//! Task assignment, path composition, and temporal scheduling for the
//! warehouse task planner.
//!
//! Built on top of `warehouse-core`'s grid/entity types: `path_engine` and
//! `path_library` find and cache single-leg paths, `reachability` and
//! `assignment` decide what each robot does, `compose` stitches legs into
//! base paths, `csp` assigns conflict-free start delays, and `replanner`
//! re-routes a single robot against a known obstacle schedule.

mod assignment;
mod cell_index;
mod compose;
mod cost;
mod csp;
mod error;
mod path_engine;
mod path_library;
mod progress;
mod reachability;
mod replanner;
mod timeline;

pub use assignment::{assign, ga_assign, greedy_assign, local_search_assign};
pub use assignment::{Assignment, GaConfig, LocalSearchConfig, Optimizer};
pub use compose::{compose_base_path, ComposeStats};
pub use cost::Cost;
pub use csp::{csp_schedule, csp_schedule_with_progress, CspResult};
pub use error::PlanError;
pub use path_engine::{search, Algorithm, DynamicObstacles, SearchResult};
pub use path_library::{PathEntry, PathLibrary};
pub use progress::{NoopProgress, ProgressPayload, ProgressSink, Stage};
pub use reachability::{analyze_reachability, Reachability};
pub use replanner::replan;
pub use timeline::{build_dynamic_obstacle_timeline, build_path_timeline, ReachedTask, TimelineStep};

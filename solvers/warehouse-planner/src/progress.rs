//! Optional progress reporting, invoked synchronously from the planning call.
//!
//! Grounded in the donor's `progress.py` callback hooks. Not required for
//! correctness -- every planning function runs correctly against the
//! default [`NoopProgress`] sink.

use warehouse_core::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reachability,
    Assignment,
    Composition,
    Csp,
    Replan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressPayload {
    ReachabilityComputed {
        active_robots: usize,
        assignable_tasks: usize,
    },
    AssignmentProgress {
        generation: u32,
        best_cost: f64,
    },
    LegComposed {
        robot: Cell,
        goal: Cell,
    },
    CspOffsetsTried {
        robot_index: usize,
        offsets_tried: u32,
    },
    ReplanLegComposed {
        task: Cell,
    },
}

/// A write-only callback invoked at stage boundaries during planning.
///
/// Implementations are responsible for their own thread safety if adapted to
/// a multithreaded host; the planner itself never touches more than one
/// thread per call.
pub trait ProgressSink {
    fn report(&self, stage: Stage, payload: ProgressPayload);
}

/// The default sink: does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _stage: Stage, _payload: ProgressPayload) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingProgress {
        events: RefCell<Vec<Stage>>,
    }

    impl ProgressSink for RecordingProgress {
        fn report(&self, stage: Stage, _payload: ProgressPayload) {
            self.events.borrow_mut().push(stage);
        }
    }

    #[test]
    fn noop_sink_accepts_every_stage() {
        let sink = NoopProgress;
        sink.report(
            Stage::Reachability,
            ProgressPayload::ReachabilityComputed {
                active_robots: 1,
                assignable_tasks: 2,
            },
        );
    }

    #[test]
    fn recording_sink_observes_reports() {
        let sink = RecordingProgress::default();
        sink.report(
            Stage::Csp,
            ProgressPayload::CspOffsetsTried {
                robot_index: 0,
                offsets_tried: 3,
            },
        );
        assert_eq!(sink.events.borrow().as_slice(), &[Stage::Csp]);
    }
}

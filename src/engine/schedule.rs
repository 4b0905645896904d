//! Operation assignment for every slot of a plan.

use crate::error::{OrdertrackError, Result};
use crate::plan::{Plan, PlanKind, Track, TRACK_COUNT};

use super::operation::{Operation, SimulatedOperation, SimulationSettings};

type Slots = [Option<Box<dyn Operation>>; TRACK_COUNT];

fn empty_slots() -> Slots {
    std::array::from_fn(|_| None)
}

/// The operation to run in each active (step, track) slot.
///
/// A schedule has to fit the plan it drives: one row per step, and an
/// operation exactly where the step has an active track.
#[derive(Default)]
pub struct Schedule {
    rows: Vec<Slots>,
}

impl Schedule {
    /// Schedule with `len` steps and no operations.
    pub fn empty(len: usize) -> Self {
        Self {
            rows: (0..len).map(|_| empty_slots()).collect(),
        }
    }

    /// Schedule filling every active slot of `kind` with `make(step, track)`.
    pub fn uniform<F>(kind: PlanKind, mut make: F) -> Self
    where
        F: FnMut(usize, Track) -> Box<dyn Operation>,
    {
        let rows = kind
            .layout()
            .iter()
            .enumerate()
            .map(|(index, layout)| {
                let mut slots = empty_slots();
                for track in Track::ALL {
                    if layout.duration(track).is_some() {
                        slots[track.index()] = Some(make(index, track));
                    }
                }
                slots
            })
            .collect();
        Self { rows }
    }

    /// Timer-only schedule using the nominal durations of `kind`.
    pub fn simulated(kind: PlanKind, settings: &SimulationSettings) -> Self {
        let layout = kind.layout();
        Self::uniform(kind, |index, track| {
            let units = settings.units(&layout[index], track).unwrap_or_default();
            Box::new(SimulatedOperation::new(units, settings))
        })
    }

    /// Replace the operation in one slot, growing the schedule if needed.
    pub fn set<O>(mut self, step: usize, track: Track, operation: O) -> Self
    where
        O: Operation + 'static,
    {
        while self.rows.len() <= step {
            self.rows.push(empty_slots());
        }
        self.rows[step][track.index()] = Some(Box::new(operation));
        self
    }

    /// Remove the operation from one slot.
    pub fn clear(mut self, step: usize, track: Track) -> Self {
        if let Some(row) = self.rows.get_mut(step) {
            row[track.index()] = None;
        }
        self
    }

    /// Number of step rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the schedule has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Operation assigned to a slot.
    pub fn operation(&self, step: usize, track: Track) -> Option<&dyn Operation> {
        self.rows.get(step)?[track.index()].as_deref()
    }

    /// Fail with [`OrdertrackError::LayoutMismatch`] unless the schedule
    /// has an operation in exactly the active slots of `plan`.
    pub fn check_fits(&self, plan: &Plan) -> Result<()> {
        if self.rows.len() != plan.len() {
            return Err(OrdertrackError::LayoutMismatch {
                message: format!(
                    "{} plan has {} steps but the schedule has {}",
                    plan.kind(),
                    plan.len(),
                    self.rows.len()
                ),
            });
        }

        for (index, step) in plan.steps().iter().enumerate() {
            for track in Track::ALL {
                let active = step.state(track).is_active();
                let present = self.operation(index, track).is_some();
                if active != present {
                    let problem = if active {
                        "has no operation"
                    } else {
                        "has an operation but is inactive"
                    };
                    return Err(OrdertrackError::LayoutMismatch {
                        message: format!(
                            "step {} ('{}') {} on the {} track",
                            index,
                            step.label(),
                            problem,
                            track
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shape: Vec<[bool; TRACK_COUNT]> = self
            .rows
            .iter()
            .map(|row| std::array::from_fn(|i| row[i].is_some()))
            .collect();
        f.debug_struct("Schedule").field("shape", &shape).finish()
    }
}

//! Simulation clock — owns the step counter.

use crate::types::{RunId, Step};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub run_id:       RunId,
    /// 0 before the first step; the number of the last completed step after.
    pub current_step: Step,
}

impl SimClock {
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            current_step: 0,
        }
    }

    /// Advance one step. Returns the new step number.
    pub fn advance(&mut self) -> Step {
        self.current_step += 1;
        self.current_step
    }
}

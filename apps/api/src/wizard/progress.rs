use serde::{Deserialize, Serialize};

use crate::wizard::steps::{self, sub_step_count, total_steps, total_units};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPosition {
    pub step: usize,
    pub sub_step: usize,
}

impl StepPosition {
    pub const START: StepPosition = StepPosition { step: 0, sub_step: 0 };

    pub fn new(step: usize, sub_step: usize) -> Self {
        Self { step, sub_step }
    }

    pub fn is_valid(&self) -> bool {
        self.step < total_steps() && self.sub_step < sub_step_count(self.step)
    }

    /// Index of this position in the flattened unit sequence.
    pub fn unit(&self) -> Option<usize> {
        steps::flatten(self.step, self.sub_step)
    }

    pub fn terminal() -> Self {
        let last = total_steps() - 1;
        Self::new(last, sub_step_count(last) - 1)
    }
}

/// Where the user stands in the wizard. Always holds a valid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    position: StepPosition,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    pub fn new() -> Self {
        Self {
            position: StepPosition::START,
        }
    }

    /// Restores a saved position; anything out of range starts over.
    pub fn restore(saved: Option<StepPosition>) -> Self {
        match saved {
            Some(pos) if pos.is_valid() => Self { position: pos },
            Some(pos) => {
                tracing::debug!(?pos, "Discarding out-of-range saved progress");
                Self::new()
            }
            None => Self::new(),
        }
    }

    pub fn position(&self) -> StepPosition {
        self.position
    }

    pub fn current_step(&self) -> usize {
        self.position.step
    }

    pub fn current_sub_step(&self) -> usize {
        self.position.sub_step
    }

    fn unit(&self) -> usize {
        // position is kept valid by every mutator
        self.position.unit().unwrap_or(0)
    }

    /// Share of units already passed, in percent.
    pub fn progress(&self) -> f64 {
        self.unit() as f64 / total_units() as f64 * 100.0
    }

    pub fn is_initial(&self) -> bool {
        self.position == StepPosition::START
    }

    pub fn is_terminal(&self) -> bool {
        self.position == StepPosition::terminal()
    }

    /// Moves one unit forward. `false` on the terminal position.
    pub fn advance(&mut self) -> bool {
        match steps::unflatten(self.unit() + 1) {
            Some((step, sub_step)) => {
                self.position = StepPosition::new(step, sub_step);
                true
            }
            None => false,
        }
    }

    /// Moves one unit back. `false` on the initial position.
    pub fn retreat(&mut self) -> bool {
        let Some(prev) = self.unit().checked_sub(1) else {
            return false;
        };
        match steps::unflatten(prev) {
            Some((step, sub_step)) => {
                self.position = StepPosition::new(step, sub_step);
                true
            }
            None => false,
        }
    }

    /// Jumps to the first sub-step of an earlier step. Forward jumps and
    /// jumps to the current step are refused.
    pub fn jump_back(&mut self, target: usize) -> bool {
        if target >= self.position.step {
            return false;
        }
        self.position = StepPosition::new(target, 0);
        true
    }

    pub fn reset(&mut self) {
        self.position = StepPosition::START;
    }
}

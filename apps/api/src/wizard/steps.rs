//! Step table of the CV wizard.
//!
//! Steps without named sub-steps still count as one implicit sub-step, so
//! every `(step, sub_step)` pair maps onto one unit of a flat sequence.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub index: usize,
    pub key: &'static str,
    pub sub_steps: &'static [&'static str],
}

impl StepDefinition {
    pub fn sub_step_count(&self) -> usize {
        self.sub_steps.len().max(1)
    }

    pub fn sub_step_key(&self, sub_step: usize) -> Option<&'static str> {
        if self.sub_steps.is_empty() {
            return (sub_step == 0).then_some(self.key);
        }
        self.sub_steps.get(sub_step).copied()
    }
}

pub const PERSONAL_INFO: usize = 0;
pub const EDUCATION: usize = 1;
pub const EXPERIENCE: usize = 2;
pub const EXTRAS: usize = 3;

pub static STEPS: [StepDefinition; 4] = [
    StepDefinition {
        index: PERSONAL_INFO,
        key: "personalInfo",
        sub_steps: &["identity", "contact", "info", "address", "social"],
    },
    StepDefinition {
        index: EDUCATION,
        key: "education",
        sub_steps: &[],
    },
    StepDefinition {
        index: EXPERIENCE,
        key: "experience",
        sub_steps: &[],
    },
    StepDefinition {
        index: EXTRAS,
        key: "extras",
        sub_steps: &["skills", "languages", "hobbies"],
    },
];

pub fn total_steps() -> usize {
    STEPS.len()
}

/// Number of sub-steps of `step`, 0 when the step does not exist.
pub fn sub_step_count(step: usize) -> usize {
    STEPS.get(step).map_or(0, StepDefinition::sub_step_count)
}

/// Units across all steps, flattened.
pub fn total_units() -> usize {
    STEPS.iter().map(StepDefinition::sub_step_count).sum()
}

/// Position of `(step, sub_step)` in the flattened order.
pub fn flatten(step: usize, sub_step: usize) -> Option<usize> {
    if sub_step >= sub_step_count(step) {
        return None;
    }
    let before: usize = STEPS[..step].iter().map(StepDefinition::sub_step_count).sum();
    Some(before + sub_step)
}

/// Inverse of [`flatten`].
pub fn unflatten(mut unit: usize) -> Option<(usize, usize)> {
    for def in &STEPS {
        let count = def.sub_step_count();
        if unit < count {
            return Some((def.index, unit));
        }
        unit -= count;
    }
    None
}

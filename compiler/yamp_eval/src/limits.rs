//! Resource limits for one execution.

use std::time::{Duration, Instant};

use tracing::debug;
use yamp_value::{budget_exceeded, EvalError};

pub const DEFAULT_RECURSION_LIMIT: usize = 256;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Wall-clock budget, checked before every statement and loop
    /// iteration. `None` runs to completion.
    pub time_budget: Option<Duration>,
    /// Maximum nesting of closure calls.
    pub recursion_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            time_budget: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

/// Clock started when an execution begins.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Deadline {
    started: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    pub(crate) fn start(budget: Option<Duration>) -> Self {
        Deadline {
            started: Instant::now(),
            budget,
        }
    }

    pub(crate) fn check(&self) -> Result<(), EvalError> {
        let Some(budget) = self.budget else {
            return Ok(());
        };
        let elapsed = self.started.elapsed();
        if elapsed > budget {
            debug!(?elapsed, ?budget, "time budget exceeded");
            return Err(budget_exceeded(budget.as_millis()));
        }
        Ok(())
    }
}

//! Arithmetic progressions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::complex::{format_real, Complex};
use crate::errors::{argument_range, argument_value, EvalError};
use crate::matrix::{Matrix, MAX_ELEMENTS};

/// Upper bound of a range.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RangeEnd {
    Bounded(f64),
    /// "To the natural end", bound later by the consumer (e.g. the last
    /// index of the dimension being indexed).
    Open,
}

/// `start:step:end`, lazily materialised.
///
/// The step is never zero and a bounded range never holds more than
/// [`MAX_ELEMENTS`] elements. A step whose sign disagrees with the direction
/// from `start` to `end` yields an empty progression.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeParts")]
pub struct RangeValue {
    start: f64,
    step: f64,
    end: RangeEnd,
}

#[derive(Deserialize)]
struct RangeParts {
    start: f64,
    step: f64,
    end: RangeEnd,
}

impl TryFrom<RangeParts> for RangeValue {
    type Error = EvalError;

    fn try_from(parts: RangeParts) -> Result<Self, EvalError> {
        RangeValue::new(parts.start, parts.step, parts.end)
    }
}

/// Slack when counting elements, so `0:0.1:0.3` keeps its last element.
const COUNT_EPSILON: f64 = 1e-10;

impl RangeValue {
    pub fn new(start: f64, step: f64, end: RangeEnd) -> Result<Self, EvalError> {
        if step == 0.0 || step.is_nan() {
            return Err(argument_value("the step of a range must be non-zero"));
        }
        let range = RangeValue { start, step, end };
        if let Some(steps) = range.steps() {
            if steps >= MAX_ELEMENTS as f64 {
                return Err(argument_range(format!(
                    "the range {range} exceeds the limit of {MAX_ELEMENTS} elements"
                )));
            }
        }
        Ok(range)
    }

    pub fn bounded(start: f64, step: f64, end: f64) -> Result<Self, EvalError> {
        Self::new(start, step, RangeEnd::Bounded(end))
    }

    pub fn open(start: f64, step: f64) -> Result<Self, EvalError> {
        Self::new(start, step, RangeEnd::Open)
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[inline]
    pub fn end(&self) -> RangeEnd {
        self.end
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self.end, RangeEnd::Open)
    }

    /// Bind an open end to `extent`; bounded ranges are returned as is.
    pub fn resolve(&self, extent: f64) -> Result<RangeValue, EvalError> {
        match self.end {
            RangeEnd::Open => Self::bounded(self.start, self.step, extent),
            RangeEnd::Bounded(_) => Ok(*self),
        }
    }

    /// Whole steps from start to a bounded end, with counting slack.
    fn steps(&self) -> Option<f64> {
        let RangeEnd::Bounded(end) = self.end else {
            return None;
        };
        Some((end - self.start) / self.step + COUNT_EPSILON)
    }

    /// Number of elements; `None` while the end is open.
    pub fn len(&self) -> Option<usize> {
        let steps = self.steps()?;
        if steps < 0.0 || !steps.is_finite() {
            return Some(0);
        }
        Some((steps.floor() as usize).saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Elements in order; `None` while the end is open.
    pub fn values(&self) -> Option<Vec<f64>> {
        let n = self.len()?;
        Some(
            (0..n)
                .map(|k| self.start + k as f64 * self.step)
                .collect(),
        )
    }

    /// Column vector of the elements; `None` while the end is open.
    pub fn to_matrix(&self) -> Option<Matrix> {
        self.values()
            .map(|v| Matrix::column_vector(v.into_iter().map(Complex::real).collect()))
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", format_real(self.start), format_real(self.step))?;
        match self.end {
            RangeEnd::Bounded(end) => write!(f, "{}", format_real(end)),
            RangeEnd::Open => write!(f, "end"),
        }
    }
}

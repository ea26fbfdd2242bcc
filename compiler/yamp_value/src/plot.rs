//! Plot data.
//!
//! The evaluator only builds and carries plots; rendering belongs to the
//! host. A series is either sampled points or a function to be sampled by
//! the renderer over an interval.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::function::FunctionValue;
use crate::matrix::Matrix;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlotSeries {
    Points { x: Matrix, y: Matrix },
    Function {
        function: FunctionValue,
        from: f64,
        to: f64,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotValue {
    pub title: String,
    pub series: Vec<PlotSeries>,
}

impl PlotValue {
    pub fn new(series: Vec<PlotSeries>) -> Self {
        PlotValue {
            title: String::new(),
            series,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn count(&self) -> usize {
        self.series.len()
    }
}

impl fmt::Display for PlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "<plot with {} series>", self.series.len())
        } else {
            write!(f, "<plot \"{}\" with {} series>", self.title, self.series.len())
        }
    }
}

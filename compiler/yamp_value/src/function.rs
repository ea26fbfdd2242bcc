//! Callable values.

use std::fmt;

use serde::{Deserialize, Serialize};
use yamp_ir::{ExprId, SharedArena};

use crate::errors::{serialization_failed, EvalError};
use crate::value::Value;

/// A closure or a reference to a library function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FunctionValue {
    Lambda(Lambda),
    /// A library function used as a value, e.g. `sin` passed as an argument.
    Named(String),
}

/// `params => body`, with the variables it captured at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LambdaParts")]
pub struct Lambda {
    pub params: Vec<String>,
    /// Root of the body inside `arena`.
    pub body: ExprId,
    /// Holds exactly the body subtree.
    pub arena: SharedArena,
    /// Snapshot of the defining scope's variables.
    pub captures: Vec<(String, Value)>,
}

#[derive(Deserialize)]
struct LambdaParts {
    params: Vec<String>,
    body: ExprId,
    arena: SharedArena,
    captures: Vec<(String, Value)>,
}

/// Decoded bodies are only evaluated once every node link resolves.
impl TryFrom<LambdaParts> for Lambda {
    type Error = EvalError;

    fn try_from(parts: LambdaParts) -> Result<Self, EvalError> {
        if !parts.arena.contains(parts.body) {
            return Err(serialization_failed(&format!(
                "lambda body {:?} is outside its arena of {} nodes",
                parts.body,
                parts.arena.len()
            )));
        }
        parts
            .arena
            .check_links()
            .map_err(|broken| serialization_failed(&broken.to_string()))?;
        Ok(Lambda {
            params: parts.params,
            body: parts.body,
            arena: parts.arena,
            captures: parts.captures,
        })
    }
}

impl FunctionValue {
    /// Positional parameter count, when known statically.
    pub fn arity(&self) -> Option<usize> {
        match self {
            FunctionValue::Lambda(l) => Some(l.params.len()),
            FunctionValue::Named(_) => None,
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionValue::Lambda(l) => write!(f, "({}) => <body>", l.params.join(", ")),
            FunctionValue::Named(name) => write!(f, "{name}"),
        }
    }
}

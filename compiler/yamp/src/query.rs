//! Parsed queries and their results.

use yamp_ir::{ExprArena, Stmt};
use yamp_value::Value;

/// A parsed query.
///
/// The tree is never modified by execution, so one `Query` can run against
/// any number of sessions.
#[derive(Clone, Debug)]
pub struct Query {
    source: String,
    pub(crate) arena: ExprArena,
    pub(crate) statements: Vec<Stmt>,
}

impl Query {
    pub(crate) fn new(source: &str, arena: ExprArena, statements: Vec<Stmt>) -> Self {
        Query {
            source: source.to_string(),
            arena,
            statements,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }
}

/// Per-statement results of one execution; `None` for muted statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOutput {
    outputs: Vec<Option<Value>>,
}

impl QueryOutput {
    pub(crate) fn new(outputs: Vec<Option<Value>>) -> Self {
        QueryOutput { outputs }
    }

    /// Value of the last statement that was not muted.
    pub fn value(&self) -> Option<&Value> {
        self.outputs.iter().rev().find_map(Option::as_ref)
    }

    pub fn outputs(&self) -> &[Option<Value>] {
        &self.outputs
    }

    pub fn into_outputs(self) -> Vec<Option<Value>> {
        self.outputs
    }
}

//! Errors returned by the query surface.

use thiserror::Error;

use yamp_diagnostic::{emitter, Diagnostic, ErrorCode};
use yamp_ir::Span;
use yamp_parse::ParseError;
use yamp_value::EvalError;

/// A query failed to parse or to evaluate.
///
/// Statements that ran before an evaluation failure keep their effects on
/// the session.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl QueryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QueryError::Parse(e) => e.code,
            QueryError::Eval(e) => e.code(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            QueryError::Parse(e) => &e.message,
            QueryError::Eval(e) => &e.message,
        }
    }

    /// Offending input; always present for parse errors.
    pub fn span(&self) -> Option<Span> {
        match self {
            QueryError::Parse(e) => Some(e.span),
            QueryError::Eval(e) => e.span,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, QueryError::Parse(_))
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            QueryError::Parse(e) => e.to_diagnostic(),
            QueryError::Eval(e) => e.to_diagnostic(),
        }
    }

    /// Plain-text diagnostic pointing into `source`, the query text.
    pub fn render(&self, source: &str) -> String {
        emitter::render(&self.to_diagnostic(), source)
    }
}

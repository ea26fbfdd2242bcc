//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured category; factory functions are
//! the public way to build errors and fill in both `kind` and `message`.

use std::fmt;

use yamp_diagnostic::{Diagnostic, ErrorCode};
use yamp_ir::Span;

use crate::value::{Value, ValueKind};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Unbound variable reference.
    SymbolMissing { name: String },
    /// Operand shapes do not conform for the operator.
    DimensionMismatch {
        op: String,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Operator not defined for the operand kinds. `right` is `None` for
    /// unary operators.
    UnsupportedOperation {
        op: String,
        left: ValueKind,
        right: Option<ValueKind>,
    },
    NoMatchingOverload { name: String, args: Vec<ValueKind> },
    AmbiguousOverload {
        name: String,
        args: Vec<ValueKind>,
        candidates: usize,
    },
    /// A name is registered twice with the same shape.
    DuplicateRegistration { name: String },
    /// An overload descriptor is malformed (e.g. two variadic slots).
    InvalidSignature { name: String, reason: String },
    /// Precondition on an argument's magnitude failed (index out of bounds).
    ArgumentRange { message: String },
    /// Precondition on an argument's value failed (unexpected literal).
    ArgumentValue { message: String },
    NotCallable { kind: ValueKind },
    BudgetExceeded { budget_ms: u128 },
    RecursionLimit { limit: usize },
    Serialization { message: String },
}

fn join_kinds(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolMissing { name } => {
                write!(f, "The symbol {name} could not be found.")
            }
            Self::DimensionMismatch { op, left, right } => write!(
                f,
                "dimension mismatch: cannot apply `{op}` to {}x{} and {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Self::UnsupportedOperation {
                op,
                left,
                right: Some(right),
            } => write!(f, "operator `{op}` is not supported for {left} and {right}"),
            Self::UnsupportedOperation {
                op,
                left,
                right: None,
            } => write!(f, "operator `{op}` is not supported for {left}"),
            Self::NoMatchingOverload { name, args } => {
                write!(f, "no overload of {name} accepts ({})", join_kinds(args))
            }
            Self::AmbiguousOverload {
                name,
                args,
                candidates,
            } => write!(
                f,
                "call to {name}({}) is ambiguous between {candidates} overloads",
                join_kinds(args)
            ),
            Self::DuplicateRegistration { name } => {
                write!(f, "{name} is already registered")
            }
            Self::InvalidSignature { name, reason } => {
                write!(f, "invalid signature for {name}: {reason}")
            }
            Self::ArgumentRange { message }
            | Self::ArgumentValue { message }
            | Self::Serialization { message } => write!(f, "{message}"),
            Self::NotCallable { kind } => write!(f, "a {kind} value is not callable"),
            Self::BudgetExceeded { budget_ms } => {
                write!(f, "evaluation exceeded its time budget of {budget_ms} ms")
            }
            Self::RecursionLimit { limit } => {
                write!(f, "maximum recursion depth exceeded (limit: {limit})")
            }
        }
    }
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SymbolMissing { .. } => ErrorCode::E6001,
            Self::DimensionMismatch { .. } => ErrorCode::E6002,
            Self::UnsupportedOperation { .. } => ErrorCode::E6003,
            Self::NoMatchingOverload { .. } => ErrorCode::E6004,
            Self::AmbiguousOverload { .. } => ErrorCode::E6005,
            Self::DuplicateRegistration { .. } => ErrorCode::E2001,
            Self::InvalidSignature { .. } => ErrorCode::E2002,
            Self::ArgumentRange { .. } => ErrorCode::E6006,
            Self::ArgumentValue { .. } => ErrorCode::E6007,
            Self::NotCallable { .. } => ErrorCode::E6008,
            Self::BudgetExceeded { .. } => ErrorCode::E6009,
            Self::RecursionLimit { .. } => ErrorCode::E6010,
            Self::Serialization { .. } => ErrorCode::E6011,
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Source location of the failing expression, filled in by the evaluator.
    pub span: Option<Span>,
    pub notes: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
            notes: Vec::new(),
        }
    }

    /// Attach a span unless one is already set.
    ///
    /// The innermost failing expression wins, so outer nodes do not
    /// overwrite a more precise location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.message.clone());
        if let Some(span) = self.span {
            diag = diag.with_label(span, "");
        }
        for note in &self.notes {
            diag = diag.with_note(note.clone());
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Lookup

#[cold]
pub fn symbol_missing(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SymbolMissing {
        name: name.to_string(),
    })
}

// Arithmetic

#[cold]
pub fn dimension_mismatch(op: &str, left: (usize, usize), right: (usize, usize)) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DimensionMismatch {
        op: op.to_string(),
        left,
        right,
    })
}

#[cold]
pub fn unsupported_operation(op: &str, left: ValueKind, right: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        op: op.to_string(),
        left,
        right: Some(right),
    })
}

#[cold]
pub fn unsupported_unary(op: &str, operand: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        op: op.to_string(),
        left: operand,
        right: None,
    })
}

// Dispatch

#[cold]
pub fn no_matching_overload(name: &str, args: &[Value]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingOverload {
        name: name.to_string(),
        args: args.iter().map(Value::kind).collect(),
    })
}

#[cold]
pub fn ambiguous_overload(name: &str, args: &[Value], candidates: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AmbiguousOverload {
        name: name.to_string(),
        args: args.iter().map(Value::kind).collect(),
        candidates,
    })
}

#[cold]
pub fn duplicate_registration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateRegistration {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_signature(name: &str, reason: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidSignature {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

#[cold]
pub fn not_callable(kind: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { kind })
}

// Argument preconditions

#[cold]
pub fn argument_range(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentRange {
        message: message.into(),
    })
}

#[cold]
pub fn argument_value(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentValue {
        message: message.into(),
    })
}

/// Index `index` (1-based) outside `1..=extent`.
#[cold]
pub fn index_out_of_bounds(index: f64, extent: usize) -> EvalError {
    argument_range(format!(
        "index {index} is out of bounds; valid indices are 1 to {extent}"
    ))
}

// Resource limits

#[cold]
pub fn budget_exceeded(budget_ms: u128) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BudgetExceeded { budget_ms })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

#[cold]
pub fn serialization_failed(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Serialization {
        message: format!("value serialization failed: {message}"),
    })
}

//! Parse and grammar-registration errors.

use std::fmt;

use yamp_diagnostic::{Diagnostic, ErrorCode};
use yamp_ir::Span;

/// What the parser was working on when an error occurred.
///
/// Rendered as a "while parsing ..." note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Statement,
    Expression,
    Group,
    Arguments,
    Matrix,
    Block,
    Abs,
    If,
    While,
    For,
    Lambda,
    Assignment,
    Str,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Statement => "a statement",
            Self::Expression => "an expression",
            Self::Group => "a parenthesised expression",
            Self::Arguments => "an argument list",
            Self::Matrix => "a matrix literal",
            Self::Block => "a block",
            Self::Abs => "an absolute value",
            Self::If => "an if expression",
            Self::While => "a while loop",
            Self::For => "a for loop",
            Self::Lambda => "a lambda",
            Self::Assignment => "an assignment",
            Self::Str => "a string literal",
        }
    }
}

/// Coarse category of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Malformed or unrecognised input.
    Syntax,
    /// Input remains after an operand but no operator matches it.
    NoOperatorFound,
    /// Grammar registration conflict surfaced through parsing setup.
    DuplicateRegistration,
}

/// Error produced while parsing a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Attach a context unless a more specific one is already set.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self.code {
            ErrorCode::E1004 => ParseErrorKind::NoOperatorFound,
            ErrorCode::E2001 => ParseErrorKind::DuplicateRegistration,
            _ => ParseErrorKind::Syntax,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind() {
            ParseErrorKind::NoOperatorFound => "no operator matches here",
            _ if self.span.is_empty() => "here",
            _ => "unexpected input",
        };
        let diagnostic = Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, label);
        match self.context {
            Some(context) => diagnostic.with_note(format!("while parsing {}", context.description())),
            None => diagnostic,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span.start)
    }
}

impl std::error::Error for ParseError {}

// Factories

/// Name the first char of the remaining input for a message.
fn describe_found(rest: &str) -> String {
    match rest.chars().next() {
        Some('\n') => "end of line".to_string(),
        Some(c) => format!("`{c}`"),
        None => "end of input".to_string(),
    }
}

/// Input that no rule at this position accepts.
#[cold]
pub fn unexpected_input(span: Span, found: &str) -> ParseError {
    let found = describe_found(found);
    ParseError::new(ErrorCode::E1001, format!("unexpected {found}"), span)
}

/// A specific delimiter or separator was required.
#[cold]
pub fn expected_char(span: Span, expected: char, found: &str) -> ParseError {
    let found = describe_found(found);
    ParseError::new(
        ErrorCode::E1001,
        format!("expected `{expected}`, found {found}"),
        span,
    )
}

#[cold]
pub fn expected_expression(span: Span, found: &str) -> ParseError {
    ParseError::new(
        ErrorCode::E1002,
        format!("expected an expression, found {}", describe_found(found)),
        span,
    )
}

/// `open` at `open_span` was never closed by `close`.
#[cold]
pub fn unclosed_delimiter(open_span: Span, open: char, close: char) -> ParseError {
    ParseError::new(
        ErrorCode::E1003,
        format!("unclosed `{open}`; expected `{close}`"),
        open_span,
    )
}

#[cold]
pub fn no_operator_found(span: Span, found: &str) -> ParseError {
    let found: String = found.chars().take_while(|c| !c.is_whitespace()).take(8).collect();
    ParseError::new(
        ErrorCode::E1004,
        format!("no operator found for `{found}`"),
        span,
    )
}

#[cold]
pub fn invalid_assignment_target(span: Span, what: &str) -> ParseError {
    ParseError::new(
        ErrorCode::E1005,
        format!("cannot assign to {what}"),
        span,
    )
    .in_context(ErrorContext::Assignment)
}

#[cold]
pub fn invalid_lambda_params(span: Span) -> ParseError {
    ParseError::new(
        ErrorCode::E1006,
        "lambda parameters must be an identifier or a parenthesised list of identifiers",
        span,
    )
    .in_context(ErrorContext::Lambda)
}

#[cold]
pub fn unterminated(span: Span, what: &str) -> ParseError {
    ParseError::new(ErrorCode::E1007, format!("unterminated {what}"), span)
}

/// Conflict while registering grammar entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrammarError {
    /// Two entries of the same table share a key.
    DuplicateRegistration { table: &'static str, key: String },
    /// The entry itself is malformed (empty symbol, unknown premise operator).
    Invalid { table: &'static str, reason: String },
}

impl GrammarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GrammarError::DuplicateRegistration { .. } => ErrorCode::E2001,
            GrammarError::Invalid { .. } => ErrorCode::E2002,
        }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::DuplicateRegistration { table, key } => {
                write!(f, "{table} `{key}` is already registered")
            }
            GrammarError::Invalid { table, reason } => write!(f, "invalid {table}: {reason}"),
        }
    }
}

impl std::error::Error for GrammarError {}

impl From<GrammarError> for ParseError {
    fn from(err: GrammarError) -> Self {
        ParseError::new(err.code(), err.to_string(), Span::DUMMY)
    }
}

#[cfg(test)]
mod tests;

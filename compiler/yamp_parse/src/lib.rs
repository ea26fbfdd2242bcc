//! Grammar registry and parser for the YAMP expression language.
//!
//! Parsing is driven entirely by a [`Grammar`]: there is no fixed token set.
//! The parser repeatedly
//!
//! 1. applies registered transforms at the cursor (whitespace, comments),
//! 2. asks the grammar for the first expression form matching the input,
//!    which builds an operand,
//! 3. asks the grammar for the longest operator prefixing the input and
//!    combines operands by precedence and associativity.
//!
//! [`Grammar::standard`] registers the stock language; hosts add operators,
//! forms and transforms through the `register_*` methods.

mod context;
mod cursor;
mod error;
pub mod grammar;
mod parser;

pub use context::{Mode, ParseFlags};
pub use cursor::Cursor;
pub use error::{
    expected_char, expected_expression, invalid_assignment_target, invalid_lambda_params,
    no_operator_found, unclosed_delimiter, unexpected_input, unterminated, ErrorContext,
    GrammarError, ParseError, ParseErrorKind,
};
pub use grammar::{
    prec, Assoc, ExpressionForm, Fixity, Grammar, OperatorDef, OperatorMatch, Transform,
    TransformOutcome,
};
pub use parser::{parse, ParseOutput, Parser};

#[cfg(test)]
mod tests;

//! Standard input transforms.

use super::{Transform, TransformOutcome};
use crate::context::ParseFlags;

/// Spaces, tabs and carriage returns.
pub struct Whitespace;

impl Transform for Whitespace {
    fn apply(&self, input: &str, _flags: ParseFlags) -> TransformOutcome {
        let len = input
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t' | b'\r'))
            .count();
        TransformOutcome::Elided(len)
    }
}

/// A newline, wherever it does not end a statement or matrix row.
pub struct Newline;

impl Transform for Newline {
    fn apply(&self, _input: &str, flags: ParseFlags) -> TransformOutcome {
        if flags.contains(ParseFlags::NEWLINE_SIGNIFICANT) {
            TransformOutcome::Declined
        } else {
            TransformOutcome::Elided(1)
        }
    }
}

/// `// line` and `/* block */` comments. A line comment stops before its
/// newline so the newline can still end the statement.
pub struct Comment;

impl Transform for Comment {
    fn apply(&self, input: &str, _flags: ParseFlags) -> TransformOutcome {
        if input.starts_with("//") {
            TransformOutcome::Elided(input.find('\n').unwrap_or(input.len()))
        } else if let Some(body) = input.strip_prefix("/*") {
            match body.find("*/") {
                Some(end) => TransformOutcome::Elided(end + 4),
                None => TransformOutcome::Unterminated("block comment"),
            }
        } else {
            TransformOutcome::Declined
        }
    }
}

/// `\` followed by a newline joins two lines.
pub struct LineContinuation;

impl Transform for LineContinuation {
    fn apply(&self, input: &str, _flags: ParseFlags) -> TransformOutcome {
        let after = &input[1..];
        let blank = after
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t' | b'\r'))
            .count();
        if after[blank..].starts_with('\n') {
            TransformOutcome::Elided(1 + blank + 1)
        } else {
            TransformOutcome::Declined
        }
    }
}

//! Error codes for all diagnostics.
//!
//! The first digit names the phase:
//! - E1xxx: parse errors
//! - E2xxx: registration (grammar and library configuration) errors
//! - E6xxx: evaluation errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parse errors (E1xxx)
    /// Unexpected input
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// No operator matches the remaining input
    E1004,
    /// Invalid assignment target
    E1005,
    /// Invalid lambda parameter list
    E1006,
    /// Unterminated string literal or comment
    E1007,

    // Registration errors (E2xxx)
    /// Duplicate registration
    E2001,
    /// Invalid overload signature
    E2002,

    // Evaluation errors (E6xxx)
    /// Symbol not found
    E6001,
    /// Dimension mismatch
    E6002,
    /// Unsupported operation for operand kinds
    E6003,
    /// No matching overload
    E6004,
    /// Ambiguous overload
    E6005,
    /// Argument out of range
    E6006,
    /// Invalid argument value
    E6007,
    /// Value is not callable
    E6008,
    /// Wall-clock budget exceeded
    E6009,
    /// Recursion limit exceeded
    E6010,
    /// Value serialization failed
    E6011,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
        ErrorCode::E6010,
        ErrorCode::E6011,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
        }
    }

    /// One-line summary of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "unexpected input",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "no operator found",
            ErrorCode::E1005 => "invalid assignment target",
            ErrorCode::E1006 => "invalid lambda parameters",
            ErrorCode::E1007 => "unterminated literal or comment",
            ErrorCode::E2001 => "duplicate registration",
            ErrorCode::E2002 => "invalid overload signature",
            ErrorCode::E6001 => "symbol missing",
            ErrorCode::E6002 => "dimension mismatch",
            ErrorCode::E6003 => "unsupported operation",
            ErrorCode::E6004 => "no matching overload",
            ErrorCode::E6005 => "ambiguous overload",
            ErrorCode::E6006 => "argument out of range",
            ErrorCode::E6007 => "invalid argument value",
            ErrorCode::E6008 => "value is not callable",
            ErrorCode::E6009 => "time budget exceeded",
            ErrorCode::E6010 => "recursion limit exceeded",
            ErrorCode::E6011 => "serialization failed",
        }
    }

    pub fn is_parse_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;

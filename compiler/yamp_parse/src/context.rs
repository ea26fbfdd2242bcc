//! Parse modes and the flags they imply.
//!
//! The parser keeps a stack of [`Mode`]s, one per open delimiter. The top
//! of the stack decides whether newlines end statements, whether whitespace
//! separates matrix columns, and whether a bare `:` is a selector.

use bitflags::bitflags;

bitflags! {
    /// Flags visible to transforms and expression forms.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u8 {
        /// A newline terminates the current statement or matrix row.
        const NEWLINE_SIGNIFICANT = 1 << 0;
        /// Inside `f(...)`: a bare `:` selects a whole dimension and `end`
        /// names the last index.
        const IN_ARGUMENTS = 1 << 1;
        /// Inside `[...]`: whitespace separates columns.
        const IN_MATRIX = 1 << 2;
        /// Inside `|...|`: a lone `|` closes the operand.
        const IN_ABS = 1 << 3;
    }
}

/// Syntactic region the parser is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Top-level statement sequence.
    Statement,
    /// `( ... )` and control-flow headers.
    Group,
    /// Call/index argument list.
    Arguments,
    Matrix,
    /// `{ ... }` statement sequence.
    Block,
    Abs,
}

impl Mode {
    pub const fn flags(self) -> ParseFlags {
        match self {
            Mode::Statement | Mode::Block => ParseFlags::NEWLINE_SIGNIFICANT,
            Mode::Group => ParseFlags::empty(),
            Mode::Arguments => ParseFlags::IN_ARGUMENTS,
            Mode::Matrix => ParseFlags::NEWLINE_SIGNIFICANT.union(ParseFlags::IN_MATRIX),
            Mode::Abs => ParseFlags::IN_ABS,
        }
    }
}

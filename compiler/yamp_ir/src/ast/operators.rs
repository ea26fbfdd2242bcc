//! Binary and unary operator tags.
//!
//! Precedence and associativity are not properties of these tags: they
//! belong to the operator entries registered in the grammar, so a host can
//! re-register a symbol at a different binding strength.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    LeftDiv,
    Pow,

    // Element-wise
    ElemMul,
    ElemDiv,
    ElemPow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::LeftDiv => "\\",
            Self::Pow => "^",
            Self::ElemMul => ".*",
            Self::ElemDiv => "./",
            Self::ElemPow => ".^",
            Self::Eq => "==",
            Self::NotEq => "~=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Comparison operators produce `1`/`0` scalars.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    /// Logical operators short-circuit in the evaluator.
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Unary operators, prefix and postfix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    /// Postfix `'`: conjugate transpose.
    Transpose,
    /// Postfix `!`.
    Factorial,
    /// `|x|`: modulus, norm or determinant depending on the operand.
    Abs,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::Transpose => "'",
            Self::Factorial => "!",
            Self::Abs => "|",
        }
    }

    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::Transpose | Self::Factorial)
    }
}

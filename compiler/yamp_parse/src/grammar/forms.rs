//! Standard expression forms.

use yamp_ir::{ExprId, ExprKind, UnaryOp};

use super::operators::prec;
use super::ExpressionForm;
use crate::context::{Mode, ParseFlags};
use crate::error::{unclosed_delimiter, unexpected_input, unterminated, ErrorContext, ParseError};
use crate::parser::Parser;

/// Words that are never identifiers.
pub const RESERVED: &[&str] = &["if", "else", "for", "while", "end"];

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `input` starts with the whole word `keyword`.
pub fn starts_with_keyword(input: &str, keyword: &str) -> bool {
    input
        .strip_prefix(keyword)
        .is_some_and(|after| !after.chars().next().is_some_and(is_ident_continue))
}

/// `if (cond) body [else body]`
pub struct IfForm;

impl IfForm {
    fn parts(p: &mut Parser<'_>) -> Result<ExprKind, ParseError> {
        let cond = p.parse_condition()?;
        let then_branch = p.parse_expr(0)?;
        let else_branch = if p.eat_keyword("else")? {
            p.parse_expr(0)?
        } else {
            ExprId::INVALID
        };
        Ok(ExprKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }
}

impl ExpressionForm for IfForm {
    fn name(&self) -> &'static str {
        "if"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        starts_with_keyword(input, "if")
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        p.cursor_mut().advance(2);
        let kind = Self::parts(p).map_err(|e| e.in_context(ErrorContext::If))?;
        Ok(p.alloc_from(kind, start))
    }
}

/// `while (cond) body`
pub struct WhileForm;

impl WhileForm {
    fn parts(p: &mut Parser<'_>) -> Result<ExprKind, ParseError> {
        let cond = p.parse_condition()?;
        let body = p.parse_expr(0)?;
        Ok(ExprKind::While { cond, body })
    }
}

impl ExpressionForm for WhileForm {
    fn name(&self) -> &'static str {
        "while"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        starts_with_keyword(input, "while")
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        p.cursor_mut().advance(5);
        let kind = Self::parts(p).map_err(|e| e.in_context(ErrorContext::While))?;
        Ok(p.alloc_from(kind, start))
    }
}

/// `for (init; cond; step) body`; every header part may be empty.
pub struct ForForm;

impl ForForm {
    fn header_part(p: &mut Parser<'_>, close: char) -> Result<ExprId, ParseError> {
        p.skip_trivia()?;
        if p.cursor().peek() == Some(close) {
            Ok(ExprId::INVALID)
        } else {
            p.parse_expr(0)
        }
    }

    fn parts(p: &mut Parser<'_>) -> Result<ExprKind, ParseError> {
        p.skip_trivia()?;
        let open = p.expect_char('(')?;
        let (init, cond, step) = p.with_mode(Mode::Group, |p| {
            let init = Self::header_part(p, ';')?;
            p.expect_char(';')?;
            let cond = Self::header_part(p, ';')?;
            p.expect_char(';')?;
            let step = Self::header_part(p, ')')?;
            p.expect_close(open, '(', ')')?;
            Ok((init, cond, step))
        })?;
        let body = p.parse_expr(0)?;
        Ok(ExprKind::For {
            init,
            cond,
            step,
            body,
        })
    }
}

impl ExpressionForm for ForForm {
    fn name(&self) -> &'static str {
        "for"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        starts_with_keyword(input, "for")
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        p.cursor_mut().advance(3);
        let kind = Self::parts(p).map_err(|e| e.in_context(ErrorContext::For))?;
        Ok(p.alloc_from(kind, start))
    }
}

/// `end`: open range bound or last index.
pub struct EndForm;

impl ExpressionForm for EndForm {
    fn name(&self) -> &'static str {
        "end"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        starts_with_keyword(input, "end")
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        p.cursor_mut().advance(3);
        Ok(p.alloc_from(ExprKind::End, start))
    }
}

/// Bare `:` as a whole argument: `A(:, 1)`.
pub struct SelectAllForm;

impl ExpressionForm for SelectAllForm {
    fn name(&self) -> &'static str {
        "select-all"
    }

    fn matches(&self, input: &str, flags: ParseFlags) -> bool {
        flags.contains(ParseFlags::IN_ARGUMENTS)
            && input.strip_prefix(':').is_some_and(|after| {
                matches!(after.trim_start().chars().next(), Some(',' | ')'))
            })
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        p.cursor_mut().advance(1);
        Ok(p.alloc_from(ExprKind::SelectAll, start))
    }
}

/// Length of the numeric literal at the start of `input`: digits, an
/// optional fraction and an optional exponent.
fn scan_number(input: &str) -> usize {
    let bytes = input.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let mut end = digits_from(0);
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = digits_from(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            end = digits_from(exp);
        }
    }
    end
}

/// `2`, `.5`, `1e-3`, and imaginary `2i`. Supplies `*` as the premise
/// operator, so `2x` reads as `2*x`.
pub struct NumberForm;

impl ExpressionForm for NumberForm {
    fn name(&self) -> &'static str {
        "number"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        let rest = p.cursor().rest();
        let len = scan_number(rest);
        let value: f64 = rest[..len]
            .parse()
            .map_err(|_| unexpected_input(p.cursor().peek_span(), rest))?;
        p.cursor_mut().advance(len);
        let after = p.cursor().rest();
        let kind = if starts_with_keyword(after, "i") {
            p.cursor_mut().advance(1);
            ExprKind::Imaginary(value)
        } else {
            ExprKind::Real(value)
        };
        Ok(p.alloc_from(kind, start))
    }

    fn premise_operator(&self) -> Option<&str> {
        Some("*")
    }
}

/// `"text"` with `\"`, `\\`, `\n` and `\t` escapes.
pub struct StringForm;

impl ExpressionForm for StringForm {
    fn name(&self) -> &'static str {
        "string"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        input.starts_with('"')
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        p.cursor_mut().advance(1);
        let mut text = String::new();
        loop {
            match p.cursor_mut().bump() {
                None => {
                    return Err(unterminated(p.cursor().span_from(start), "string literal")
                        .in_context(ErrorContext::Str))
                }
                Some('"') => break,
                Some('\\') => match p.cursor_mut().bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(c @ ('"' | '\\')) => text.push(c),
                    Some(c) => {
                        text.push('\\');
                        text.push(c);
                    }
                    None => {
                        return Err(unterminated(p.cursor().span_from(start), "string literal")
                            .in_context(ErrorContext::Str))
                    }
                },
                Some(c) => text.push(c),
            }
        }
        Ok(p.alloc_from(ExprKind::Str(text), start))
    }
}

/// Variable, constant or function name.
pub struct IdentForm;

impl ExpressionForm for IdentForm {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        input.chars().next().is_some_and(is_ident_start)
            && !RESERVED.iter().any(|kw| starts_with_keyword(input, kw))
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        let name = p.cursor_mut().eat_while(is_ident_continue).to_string();
        Ok(p.alloc_from(ExprKind::Ident(name), start))
    }
}

/// `(expr)`, or a tuple `()` / `(a, b)` used as lambda parameters.
pub struct GroupForm;

impl ExpressionForm for GroupForm {
    fn name(&self) -> &'static str {
        "group"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        input.starts_with('(')
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        let open = p.cursor().peek_span();
        p.cursor_mut().advance(1);
        let items = p.parse_delimited(Mode::Group, open, '(', ')', ErrorContext::Group)?;
        if let &[only] = items.as_slice() {
            return Ok(only);
        }
        Ok(p.alloc_from(ExprKind::Tuple(items), start))
    }
}

/// `[1, 2; 3 4]`: columns by `,` or whitespace, rows by `;` or newline.
pub struct MatrixForm;

impl ExpressionForm for MatrixForm {
    fn name(&self) -> &'static str {
        "matrix"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        input.starts_with('[')
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        let open = p.cursor().peek_span();
        p.cursor_mut().advance(1);
        let rows = p
            .with_mode(Mode::Matrix, |p| {
                let mut rows = Vec::new();
                let mut row = Vec::new();
                loop {
                    p.skip_trivia()?;
                    match p.cursor().peek() {
                        None => return Err(unclosed_delimiter(open, '[', ']')),
                        Some(']') => {
                            p.cursor_mut().bump();
                            break;
                        }
                        Some(';' | '\n') => {
                            p.cursor_mut().bump();
                            if !row.is_empty() {
                                rows.push(std::mem::take(&mut row));
                            }
                        }
                        Some(',') => {
                            p.cursor_mut().bump();
                        }
                        Some(_) => row.push(p.parse_expr(0)?),
                    }
                }
                if !row.is_empty() {
                    rows.push(row);
                }
                Ok(rows)
            })
            .map_err(|e| e.in_context(ErrorContext::Matrix))?;
        Ok(p.alloc_from(ExprKind::Matrix(rows), start))
    }
}

/// `|x|`: modulus, norm or determinant.
pub struct AbsForm;

impl ExpressionForm for AbsForm {
    fn name(&self) -> &'static str {
        "abs"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        input.starts_with('|') && !input.starts_with("||")
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        let open = p.cursor().peek_span();
        p.cursor_mut().advance(1);
        let operand = p
            .with_mode(Mode::Abs, |p| {
                let operand = p.parse_expr(0)?;
                p.expect_close(open, '|', '|')?;
                Ok(operand)
            })
            .map_err(|e| e.in_context(ErrorContext::Abs))?;
        let kind = ExprKind::Unary {
            op: UnaryOp::Abs,
            operand,
        };
        Ok(p.alloc_from(kind, start))
    }
}

/// Prefix `-`, `+`, `!` and `~`. The operand binds everything tighter than
/// the prefix level, so `-2^2` is `-(2^2)`.
pub struct PrefixForm;

impl ExpressionForm for PrefixForm {
    fn name(&self) -> &'static str {
        "prefix"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        matches!(input.chars().next(), Some('-' | '+' | '!' | '~'))
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        let op = match p.cursor_mut().bump() {
            Some('-') => UnaryOp::Neg,
            Some('+') => UnaryOp::Plus,
            _ => UnaryOp::Not,
        };
        let operand = p.parse_expr(prec::PREFIX + 1)?;
        Ok(p.alloc_from(ExprKind::Unary { op, operand }, start))
    }
}

/// `{ stmt; stmt }`
pub struct BlockForm;

impl ExpressionForm for BlockForm {
    fn name(&self) -> &'static str {
        "block"
    }

    fn matches(&self, input: &str, _flags: ParseFlags) -> bool {
        input.starts_with('{')
    }

    fn parse(&self, p: &mut Parser<'_>) -> Result<ExprId, ParseError> {
        let start = p.cursor().pos();
        let open = p.cursor().peek_span();
        p.cursor_mut().advance(1);
        let statements = p
            .with_mode(Mode::Block, |p| {
                let statements = p.parse_statements(Some('}'))?;
                p.expect_close(open, '{', '}')?;
                Ok(statements)
            })
            .map_err(|e| e.in_context(ErrorContext::Block))?;
        Ok(p.alloc_from(ExprKind::Block(statements), start))
    }
}

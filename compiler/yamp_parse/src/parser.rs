//! Operator-precedence parser over a dynamic [`Grammar`].
//!
//! Each operand is produced by the first matching expression form; the
//! operator loop then consults the grammar for the next operator, binding
//! by precedence (higher tighter) and associativity. Transforms run before
//! every lookup.

use tracing::{debug, trace};
use yamp_ir::{ExprArena, ExprId, ExprKind, Span, Stmt};
use yamp_stack::ensure_sufficient_stack;

use crate::context::{Mode, ParseFlags};
use crate::cursor::Cursor;
use crate::error::{
    expected_char, expected_expression, no_operator_found, unclosed_delimiter, unexpected_input,
    unterminated, ErrorContext, ParseError,
};
use crate::grammar::forms::starts_with_keyword;
use crate::grammar::{Assoc, Fixity, Grammar, TransformOutcome};

/// A parsed query: the node arena and its top-level statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseOutput {
    pub arena: ExprArena,
    pub statements: Vec<Stmt>,
}

/// Parse `source` into statements.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(grammar: &Grammar, source: &str) -> Result<ParseOutput, ParseError> {
    Parser::new(grammar, source).parse_program()
}

pub struct Parser<'a> {
    grammar: &'a Grammar,
    cursor: Cursor<'a>,
    arena: ExprArena,
    modes: Vec<Mode>,
    /// Default operator offered by the last operand's form, and the input
    /// position right after that operand.
    premise: Option<(&'a str, usize)>,
    /// The last operand was a control-flow form, which needs no separator.
    after_control_flow: bool,
}

impl<'a> Parser<'a> {
    pub fn new(grammar: &'a Grammar, source: &'a str) -> Self {
        Parser {
            grammar,
            cursor: Cursor::new(source),
            arena: ExprArena::new(),
            modes: vec![Mode::Statement],
            premise: None,
            after_control_flow: false,
        }
    }

    #[inline]
    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    #[inline]
    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    #[inline]
    pub fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Flags of the innermost mode.
    pub fn flags(&self) -> ParseFlags {
        self.modes
            .last()
            .map_or(ParseFlags::NEWLINE_SIGNIFICANT, |mode| mode.flags())
    }

    pub fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(yamp_ir::Expr::new(kind, span))
    }

    /// Allocate a node spanning from `start` to the cursor.
    pub fn alloc_from(&mut self, kind: ExprKind, start: usize) -> ExprId {
        let span = self.cursor.span_from(start);
        self.alloc(kind, span)
    }

    /// Run `f` with `mode` pushed.
    pub fn with_mode<T>(
        &mut self,
        mode: Mode,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.modes.push(mode);
        let result = f(self);
        self.modes.pop();
        result
    }

    pub fn parse_program(mut self) -> Result<ParseOutput, ParseError> {
        let statements = self.parse_statements(None)?;
        Ok(ParseOutput {
            arena: self.arena,
            statements,
        })
    }

    /// Statements up to `close` (left unconsumed) or end of input.
    ///
    /// `;` ends a statement and mutes it; a newline ends it; a control-flow
    /// form ends it with no separator at all.
    pub fn parse_statements(&mut self, close: Option<char>) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.cursor.peek() {
                None => break,
                Some(c) if Some(c) == close => break,
                Some(';' | '\n') => {
                    self.cursor.bump();
                    continue;
                }
                Some(_) => {}
            }
            let expr = self
                .parse_expr(0)
                .map_err(|e| e.in_context(ErrorContext::Statement))?;
            self.skip_trivia()?;
            let muted = match self.cursor.peek() {
                Some(';') => {
                    self.cursor.bump();
                    true
                }
                Some('\n') => {
                    self.cursor.bump();
                    false
                }
                None => false,
                Some(c) if Some(c) == close => false,
                Some(_) if self.after_control_flow => false,
                Some(_) => {
                    return Err(unexpected_input(self.cursor.peek_span(), self.cursor.rest())
                        .in_context(ErrorContext::Statement))
                }
            };
            trace!(statement = statements.len(), muted, "statement");
            statements.push(Stmt { expr, muted });
        }
        Ok(statements)
    }

    /// Apply transforms at the cursor until none applies; returns whether
    /// any input was elided.
    pub fn skip_trivia(&mut self) -> Result<bool, ParseError> {
        let grammar = self.grammar;
        let flags = self.flags();
        let mut elided = false;
        while let Some(trigger) = self.cursor.peek() {
            let Some(transform) = grammar.transform(trigger) else {
                break;
            };
            match transform.apply(self.cursor.rest(), flags) {
                TransformOutcome::Elided(len) if len > 0 => {
                    trace!(?trigger, len, "transform");
                    self.cursor.advance(len);
                    elided = true;
                }
                TransformOutcome::Elided(_) | TransformOutcome::Declined => break,
                TransformOutcome::Unterminated(what) => {
                    let start = self.cursor.pos();
                    self.cursor.advance(self.cursor.rest().len());
                    return Err(unterminated(self.cursor.span_from(start), what));
                }
            }
        }
        Ok(elided)
    }

    /// Expression whose operators all bind at least as tight as `min_prec`.
    pub fn parse_expr(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner(min_prec))
    }

    fn parse_expr_inner(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let grammar = self.grammar;
        let mut left = self.parse_operand()?;
        if self.after_control_flow {
            return Ok(left);
        }
        loop {
            let start = self.cursor.pos();
            let spaced = self.skip_trivia()?;
            if self.at_terminator(spaced) {
                self.cursor.reset(start);
                break;
            }
            let rest = self.cursor.rest();
            let premise = self
                .premise
                .filter(|&(_, at)| at == start && !spaced)
                .map(|(symbol, _)| symbol)
                .filter(|_| grammar.find_form(rest, self.flags()).is_some());
            let Some(found) = grammar.find_operator(rest, premise) else {
                return Err(no_operator_found(self.cursor.peek_span(), rest));
            };
            let def = found.def;
            if def.precedence() < min_prec {
                self.cursor.reset(start);
                break;
            }
            debug!(
                symbol = def.symbol(),
                precedence = def.precedence(),
                implicit = found.is_implicit(),
                "operator"
            );
            let op_start = self.cursor.pos();
            self.cursor.advance(found.len);
            let op_span = self.cursor.span_from(op_start);
            let left_span = self.arena.get_expr(left).span;
            let kind = match def.fixity() {
                Fixity::Infix { assoc, build } => {
                    let next_min = match assoc {
                        Assoc::Left => def.precedence().saturating_add(1),
                        Assoc::Right => def.precedence(),
                    };
                    let right = self.parse_expr(next_min)?;
                    build(self, left, right)?
                }
                Fixity::Postfix { build } => build(self, left, op_span)?,
            };
            let span = left_span.merge(self.cursor.span_from(op_start));
            left = self.alloc(kind, span);
            self.after_control_flow = false;
        }
        Ok(left)
    }

    /// Whether the operator loop must stop at the cursor.
    fn at_terminator(&self, spaced: bool) -> bool {
        let rest = self.cursor.rest();
        let mut chars = rest.chars();
        let Some(c) = chars.next() else {
            return true;
        };
        let flags = self.flags();
        match c {
            ';' | ',' | ')' | ']' | '}' | '\n' => return true,
            '|' if flags.contains(ParseFlags::IN_ABS) && !rest.starts_with("||") => return true,
            _ => {}
        }
        if starts_with_keyword(rest, "else") {
            return true;
        }
        if spaced && flags.contains(ParseFlags::IN_MATRIX) {
            // `[a -b]` has two elements, `[a - b]` one.
            if matches!(c, '-' | '+') && chars.next().is_some_and(|n| !n.is_whitespace()) {
                return true;
            }
            return !self
                .grammar
                .find_operator(rest, None)
                .is_some_and(|found| found.def.is_infix());
        }
        false
    }

    /// One operand, by expression-form lookup.
    pub fn parse_operand(&mut self) -> Result<ExprId, ParseError> {
        self.skip_trivia()?;
        let grammar = self.grammar;
        let Some(form) = grammar.find_form(self.cursor.rest(), self.flags()) else {
            return Err(expected_expression(self.cursor.peek_span(), self.cursor.rest()));
        };
        trace!(form = form.name(), pos = self.cursor.pos(), "expression form");
        let id = form.parse(self)?;
        if let Some(symbol) = form.premise_operator() {
            self.premise = Some((symbol, self.cursor.pos()));
        }
        self.after_control_flow = self.arena.kind(id).is_control_flow();
        Ok(id)
    }

    /// Consume `expected` after optional trivia; returns its span.
    pub fn expect_char(&mut self, expected: char) -> Result<Span, ParseError> {
        self.skip_trivia()?;
        let span = self.cursor.peek_span();
        if self.cursor.eat(expected) {
            Ok(span)
        } else {
            Err(expected_char(span, expected, self.cursor.rest()))
        }
    }

    /// Consume the `close` matching `open` at `open_span`.
    pub fn expect_close(&mut self, open_span: Span, open: char, close: char) -> Result<(), ParseError> {
        self.skip_trivia()?;
        if self.cursor.eat(close) {
            Ok(())
        } else if self.cursor.is_eof() {
            Err(unclosed_delimiter(open_span, open, close))
        } else {
            Err(expected_char(self.cursor.peek_span(), close, self.cursor.rest()))
        }
    }

    /// Comma-separated expressions up to `close`, in `mode`. The opening
    /// delimiter has been consumed.
    pub fn parse_delimited(
        &mut self,
        mode: Mode,
        open_span: Span,
        open: char,
        close: char,
        context: ErrorContext,
    ) -> Result<Vec<ExprId>, ParseError> {
        self.with_mode(mode, |p| {
            let mut items = Vec::new();
            p.skip_trivia()?;
            if p.cursor.eat(close) {
                return Ok(items);
            }
            loop {
                items.push(p.parse_expr(0)?);
                p.skip_trivia()?;
                if p.cursor.eat(',') {
                    continue;
                }
                p.expect_close(open_span, open, close)?;
                return Ok(items);
            }
        })
        .map_err(|e| e.in_context(context))
    }

    /// `( expr )` of a control-flow header.
    pub fn parse_condition(&mut self) -> Result<ExprId, ParseError> {
        let open = self.expect_char('(')?;
        self.with_mode(Mode::Group, |p| {
            let cond = p.parse_expr(0)?;
            p.expect_close(open, '(', ')')?;
            Ok(cond)
        })
    }

    /// Consume `keyword` if it comes next, looking past newlines; leaves
    /// the cursor untouched otherwise.
    pub fn eat_keyword(&mut self, keyword: &str) -> Result<bool, ParseError> {
        let start = self.cursor.pos();
        self.skip_trivia()?;
        while self.cursor.eat('\n') {
            self.skip_trivia()?;
        }
        if starts_with_keyword(self.cursor.rest(), keyword) {
            self.cursor.advance(keyword.len());
            Ok(true)
        } else {
            self.cursor.reset(start);
            Ok(false)
        }
    }
}

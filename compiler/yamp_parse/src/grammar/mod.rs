//! Grammar registry.
//!
//! A [`Grammar`] holds three tables, all extensible at run time:
//!
//! - **Operators** keyed by symbol. Lookup is maximal munch: the longest
//!   registered symbol that prefixes the remaining input wins. When none
//!   matches, the caller may offer a *premise* symbol, the default operator
//!   supplied by the preceding operand's form (implicit multiplication).
//! - **Expression forms**, tried in explicit priority order; the first form
//!   whose anchored matcher accepts the remaining input builds the operand.
//! - **Transforms** keyed by trigger char; each may elide input (whitespace,
//!   comments, line continuations) or decline.
//!
//! Registration fails with [`GrammarError::DuplicateRegistration`] when a key
//! is reused. A populated grammar is immutable while parsing and can be
//! shared across threads.

pub mod forms;
pub mod operators;
pub mod standard;
pub mod transforms;

use std::fmt;

use rustc_hash::FxHashMap;
use yamp_ir::{ExprId, ExprKind, Span};

use crate::context::ParseFlags;
use crate::error::{GrammarError, ParseError};
use crate::parser::Parser;

pub use operators::prec;

/// Combines the left operand and the already parsed right operand.
pub type InfixBuilder =
    Box<dyn Fn(&mut Parser<'_>, ExprId, ExprId) -> Result<ExprKind, ParseError> + Send + Sync>;

/// Builds from the left operand; the operator symbol has been consumed and
/// the builder may consume more input (call arguments). The span is the
/// operator's.
pub type PostfixBuilder =
    Box<dyn Fn(&mut Parser<'_>, ExprId, Span) -> Result<ExprKind, ParseError> + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

pub enum Fixity {
    Infix { assoc: Assoc, build: InfixBuilder },
    Postfix { build: PostfixBuilder },
}

/// One registered operator.
pub struct OperatorDef {
    symbol: String,
    precedence: u8,
    fixity: Fixity,
}

impl OperatorDef {
    pub fn infix(
        symbol: impl Into<String>,
        precedence: u8,
        assoc: Assoc,
        build: impl Fn(&mut Parser<'_>, ExprId, ExprId) -> Result<ExprKind, ParseError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        OperatorDef {
            symbol: symbol.into(),
            precedence,
            fixity: Fixity::Infix {
                assoc,
                build: Box::new(build),
            },
        }
    }

    pub fn postfix(
        symbol: impl Into<String>,
        precedence: u8,
        build: impl Fn(&mut Parser<'_>, ExprId, Span) -> Result<ExprKind, ParseError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        OperatorDef {
            symbol: symbol.into(),
            precedence,
            fixity: Fixity::Postfix {
                build: Box::new(build),
            },
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Higher binds tighter.
    #[inline]
    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    #[inline]
    pub fn fixity(&self) -> &Fixity {
        &self.fixity
    }

    pub fn is_infix(&self) -> bool {
        matches!(self.fixity, Fixity::Infix { .. })
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixity = match self.fixity {
            Fixity::Infix {
                assoc: Assoc::Left, ..
            } => "infix-left",
            Fixity::Infix {
                assoc: Assoc::Right,
                ..
            } => "infix-right",
            Fixity::Postfix { .. } => "postfix",
        };
        write!(f, "OperatorDef({:?}, {}, {fixity})", self.symbol, self.precedence)
    }
}

/// Result of operator lookup.
#[derive(Debug)]
pub struct OperatorMatch<'g> {
    pub def: &'g OperatorDef,
    /// Bytes of input the symbol covers; `0` for a premise default.
    pub len: usize,
}

impl OperatorMatch<'_> {
    pub fn is_implicit(&self) -> bool {
        self.len == 0
    }
}

/// An operand-producing syntactic form.
pub trait ExpressionForm: Send + Sync {
    /// Unique name; also the registration key.
    fn name(&self) -> &'static str;

    /// Anchored test against the remaining input. Must not assume any
    /// earlier form declined.
    fn matches(&self, input: &str, flags: ParseFlags) -> bool;

    /// Consume the form and return its node. Called only after `matches`.
    fn parse(&self, parser: &mut Parser<'_>) -> Result<ExprId, ParseError>;

    /// Operator symbol implied between this operand and an adjacent one.
    fn premise_operator(&self) -> Option<&str> {
        None
    }
}

/// What a transform did at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformOutcome {
    Declined,
    /// Drop this many bytes of input.
    Elided(usize),
    /// The construct the trigger opens never ends (`/*` without `*/`).
    Unterminated(&'static str),
}

/// Input rewrite applied before operand and operator lookup.
pub trait Transform: Send + Sync {
    /// `input` starts with the trigger char.
    fn apply(&self, input: &str, flags: ParseFlags) -> TransformOutcome;
}

struct RegisteredForm {
    priority: u16,
    form: Box<dyn ExpressionForm>,
}

/// Operators, expression forms and transforms available to the parser.
#[derive(Default)]
pub struct Grammar {
    /// Longest symbol first, so the first prefix match is the maximal munch.
    operators: Vec<OperatorDef>,
    /// Highest priority first; registration order within a priority.
    forms: Vec<RegisteredForm>,
    transforms: FxHashMap<char, Box<dyn Transform>>,
}

impl Grammar {
    /// Empty grammar; see [`Grammar::standard`] for the stock language.
    pub fn new() -> Self {
        Grammar::default()
    }

    pub fn register_operator(&mut self, def: OperatorDef) -> Result<(), GrammarError> {
        if def.symbol.is_empty() {
            return Err(GrammarError::Invalid {
                table: "operator",
                reason: "symbol is empty".into(),
            });
        }
        if self.operator(&def.symbol).is_some() {
            return Err(GrammarError::DuplicateRegistration {
                table: "operator",
                key: def.symbol,
            });
        }
        self.insert_operator(def);
        Ok(())
    }

    /// Register a form; higher `priority` is tried first.
    pub fn register_expression(
        &mut self,
        priority: u16,
        form: impl ExpressionForm + 'static,
    ) -> Result<(), GrammarError> {
        if self.forms.iter().any(|f| f.form.name() == form.name()) {
            return Err(GrammarError::DuplicateRegistration {
                table: "expression form",
                key: form.name().to_string(),
            });
        }
        self.insert_form(priority, Box::new(form));
        Ok(())
    }

    pub fn register_transform(
        &mut self,
        trigger: char,
        transform: impl Transform + 'static,
    ) -> Result<(), GrammarError> {
        if self.transforms.contains_key(&trigger) {
            return Err(GrammarError::DuplicateRegistration {
                table: "transform",
                key: trigger.to_string(),
            });
        }
        self.transforms.insert(trigger, Box::new(transform));
        Ok(())
    }

    fn insert_operator(&mut self, def: OperatorDef) {
        let at = self
            .operators
            .partition_point(|existing| existing.symbol.len() >= def.symbol.len());
        self.operators.insert(at, def);
    }

    fn insert_form(&mut self, priority: u16, form: Box<dyn ExpressionForm>) {
        let at = self.forms.partition_point(|f| f.priority >= priority);
        self.forms.insert(at, RegisteredForm { priority, form });
    }

    /// Operator registered under exactly `symbol`.
    pub fn operator(&self, symbol: &str) -> Option<&OperatorDef> {
        self.operators.iter().find(|op| op.symbol == symbol)
    }

    pub fn operators(&self) -> impl Iterator<Item = &OperatorDef> {
        self.operators.iter()
    }

    /// Maximal-munch operator lookup, falling back to `premise`.
    ///
    /// `None` means no operator applies (`NoOperatorFound` at the call
    /// site).
    pub fn find_operator(&self, input: &str, premise: Option<&str>) -> Option<OperatorMatch<'_>> {
        if let Some(def) = self.operators.iter().find(|op| input.starts_with(&op.symbol)) {
            return Some(OperatorMatch {
                def,
                len: def.symbol.len(),
            });
        }
        let def = self.operator(premise?)?;
        Some(OperatorMatch { def, len: 0 })
    }

    /// First form, by priority, that accepts `input`.
    pub fn find_form(&self, input: &str, flags: ParseFlags) -> Option<&dyn ExpressionForm> {
        self.forms
            .iter()
            .find(|f| f.form.matches(input, flags))
            .map(|f| f.form.as_ref())
    }

    pub fn transform(&self, trigger: char) -> Option<&dyn Transform> {
        self.transforms.get(&trigger).map(AsRef::as_ref)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.operators.iter().map(OperatorDef::symbol).collect();
        let forms: Vec<&str> = self.forms.iter().map(|f| f.form.name()).collect();
        let mut triggers: Vec<char> = self.transforms.keys().copied().collect();
        triggers.sort_unstable();
        f.debug_struct("Grammar")
            .field("operators", &symbols)
            .field("forms", &forms)
            .field("transforms", &triggers)
            .finish()
    }
}

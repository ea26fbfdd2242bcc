//! Tree-walking interpreter.
//!
//! Statements run left to right; each node evaluates its children and then
//! applies the value-level operation from `yamp_value`. Errors carry the
//! span of the innermost failing node and abort the rest of the query;
//! bindings already made stay in the environment.
//!
//! # Arena threading
//!
//! An [`Interpreter`] reads nodes from one arena. Closure bodies live in
//! their own arena (extracted when the lambda is created), so calling a
//! closure runs a child interpreter over the closure's arena, sharing the
//! environment, library and limits. See `call.rs`.

mod call;

use tracing::trace;
use yamp_ir::{BinaryOp, ExprArena, ExprId, ExprKind, Stmt};
use yamp_stack::{ensure_sufficient_stack, DepthCounter};
use yamp_value::{
    argument_value, assign_index, evaluate_binary, evaluate_unary, index, make_range,
    symbol_missing, unsupported_unary, EvalError, EvalResult, FunctionValue, Matrix, Value,
};

use crate::environment::Environment;
use crate::library::Library;
use crate::limits::{Deadline, Limits};

pub struct Interpreter<'a> {
    arena: &'a ExprArena,
    env: &'a mut Environment,
    library: &'a Library,
    limits: Limits,
    deadline: Deadline,
    /// Closure-call nesting.
    depth: DepthCounter,
    /// Extent `end` binds to, one entry per index argument being evaluated.
    index_extents: Vec<Option<usize>>,
}

impl<'a> Interpreter<'a> {
    pub fn new(arena: &'a ExprArena, env: &'a mut Environment, library: &'a Library) -> Self {
        let limits = Limits::default();
        Interpreter {
            arena,
            env,
            library,
            limits,
            deadline: Deadline::start(limits.time_budget),
            depth: DepthCounter::new(limits.recursion_limit),
            index_extents: Vec::new(),
        }
    }

    /// Replace the limits; restarts the budget clock.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self.deadline = Deadline::start(limits.time_budget);
        self.depth = DepthCounter::new(limits.recursion_limit);
        self
    }

    pub fn env(&self) -> &Environment {
        self.env
    }

    /// Run top-level statements; muted statements yield `None`.
    pub fn run(&mut self, statements: &[Stmt]) -> Result<Vec<Option<Value>>, EvalError> {
        let mut outputs = Vec::with_capacity(statements.len());
        for (index, stmt) in statements.iter().enumerate() {
            self.deadline.check()?;
            trace!(statement = index, muted = stmt.muted, "statement");
            let value = self.eval(stmt.expr)?;
            outputs.push((!stmt.muted).then_some(value));
        }
        Ok(outputs)
    }

    pub fn eval(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(id))
            .map_err(|e| e.with_span(self.arena.get_expr(id).span))
    }

    fn eval_inner(&mut self, id: ExprId) -> EvalResult {
        let arena = self.arena;
        match arena.kind(id) {
            ExprKind::Real(x) => Ok(Value::real(*x)),
            ExprKind::Imaginary(x) => Ok(Value::complex(0.0, *x)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::Ident(name) => self.lookup(name),
            ExprKind::End => self.end_value(),
            ExprKind::SelectAll => Err(argument_value(
                "`:` is only valid as a whole index argument",
            )),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(*operand)?;
                evaluate_unary(*op, &value)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            ExprKind::Range { left, right } => {
                let start = self.eval(*left)?;
                if matches!(arena.kind(*right), ExprKind::End) {
                    return make_range(&start, None);
                }
                let end = self.eval(*right)?;
                make_range(&start, Some(&end))
            }
            ExprKind::Assign { target, op, value } => self.eval_assign(*target, *op, *value),
            ExprKind::Call { callee, args } => self.eval_call(*callee, args),
            ExprKind::Matrix(rows) => self.eval_matrix(rows),
            ExprKind::Tuple(_) => Err(argument_value(
                "a parenthesised list is only valid as lambda parameters",
            )),
            ExprKind::Lambda { params, body } => Ok(self.make_lambda(params, *body)),
            ExprKind::Block(stmts) => self.eval_block(stmts),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(*cond)?.is_truthy() {
                    self.eval(*then_branch)
                } else if else_branch.is_present() {
                    self.eval(*else_branch)
                } else {
                    Ok(Value::empty_matrix())
                }
            }
            ExprKind::While { cond, body } => {
                let mut last = Value::empty_matrix();
                loop {
                    self.deadline.check()?;
                    if !self.eval(*cond)?.is_truthy() {
                        break;
                    }
                    last = self.eval(*body)?;
                }
                Ok(last)
            }
            ExprKind::For {
                init,
                cond,
                step,
                body,
            } => {
                if init.is_present() {
                    self.eval(*init)?;
                }
                let mut last = Value::empty_matrix();
                loop {
                    self.deadline.check()?;
                    if cond.is_present() && !self.eval(*cond)?.is_truthy() {
                        break;
                    }
                    last = self.eval(*body)?;
                    if step.is_present() {
                        self.eval(*step)?;
                    }
                }
                Ok(last)
            }
        }
    }

    /// Variable, then constant, then function name as a value.
    fn lookup(&self, name: &str) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value.clone());
        }
        if let Some(value) = self.library.constant(name) {
            return Ok(value.clone());
        }
        if self.library.has_function(name) {
            return Ok(Value::function(FunctionValue::Named(name.to_string())));
        }
        Err(symbol_missing(name))
    }

    fn end_value(&self) -> EvalResult {
        match self.index_extents.last() {
            Some(Some(extent)) => Ok(Value::real(*extent as f64)),
            Some(None) => Err(argument_value("`end` has no extent for this value")),
            None => Err(argument_value(
                "`end` is only valid inside an index expression",
            )),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        let lhs = self.eval(left)?;
        if op.is_logical() {
            let decided = match op {
                BinaryOp::And => !lhs.is_truthy(),
                _ => lhs.is_truthy(),
            };
            if decided {
                return Ok(Value::boolean(op == BinaryOp::Or));
            }
            return Ok(Value::boolean(self.eval(right)?.is_truthy()));
        }
        let rhs = self.eval(right)?;
        evaluate_binary(op, &lhs, &rhs)
    }

    fn eval_assign(&mut self, target: ExprId, op: Option<BinaryOp>, value: ExprId) -> EvalResult {
        let arena = self.arena;
        match arena.kind(target) {
            ExprKind::Ident(name) => {
                let mut result = self.eval(value)?;
                if let Some(op) = op {
                    let current = self.env.lookup(name).ok_or_else(|| symbol_missing(name))?;
                    result = evaluate_binary(op, current, &result)?;
                }
                self.env.define(name.as_str(), result.clone());
                Ok(result)
            }
            ExprKind::Call { callee, args } => match arena.kind(*callee) {
                ExprKind::Ident(name) => self.eval_index_assign(name, args, op, value),
                other => Err(argument_value(format!(
                    "cannot assign to an index of a {}",
                    other.describe()
                ))),
            },
            ExprKind::Matrix(rows) => {
                let names: Vec<&str> = rows
                    .iter()
                    .flatten()
                    .filter_map(|&id| match arena.kind(id) {
                        ExprKind::Ident(name) => Some(name.as_str()),
                        _ => None,
                    })
                    .collect();
                let result = self.eval(value)?;
                self.assign_many(&names, &result)?;
                Ok(result)
            }
            other => Err(argument_value(format!("cannot assign to {}", other.describe()))),
        }
    }

    /// `name(args) = value` and `name(args) op= value`.
    fn eval_index_assign(
        &mut self,
        name: &str,
        args: &[ExprId],
        op: Option<BinaryOp>,
        value: ExprId,
    ) -> EvalResult {
        let result = self.eval(value)?;
        let mut current = match (self.env.lookup(name), op) {
            (Some(current), _) => current.clone(),
            (None, None) => Value::empty_matrix(),
            (None, Some(_)) => return Err(symbol_missing(name)),
        };
        let index_args = self.eval_index_args(&current, args)?;
        let result = match op {
            Some(op) => evaluate_binary(op, &index(&current, &index_args)?, &result)?,
            None => result,
        };
        assign_index(&mut current, &index_args, &result)?;
        self.env.define(name, current);
        Ok(result)
    }

    /// `[a, b] = value`: one element per name, in row-major order. A single
    /// element is assigned to every name.
    fn assign_many(&mut self, names: &[&str], value: &Value) -> Result<(), EvalError> {
        let m = value
            .to_matrix()
            .ok_or_else(|| unsupported_unary("[..] =", value.kind()))?;
        if let Some(z) = m.as_scalar() {
            for name in names {
                self.env.define(*name, Value::Scalar(z));
            }
            return Ok(());
        }
        if m.numel() != names.len() {
            return Err(argument_value(format!(
                "cannot assign {} values to {} variables",
                m.numel(),
                names.len()
            )));
        }
        for (name, z) in names.iter().zip(m.data()) {
            self.env.define(*name, Value::Scalar(*z));
        }
        Ok(())
    }

    /// Concatenate elements into rows, rows into the result.
    fn eval_matrix(&mut self, rows: &[Vec<ExprId>]) -> EvalResult {
        let mut result = Matrix::empty();
        for row in rows {
            let mut joined = Matrix::empty();
            for &element in row {
                let value = self.eval(element)?;
                let m = value
                    .to_matrix()
                    .ok_or_else(|| unsupported_unary("[]", value.kind()))?;
                joined = joined.hcat(&m)?;
            }
            result = result.vcat(&joined)?;
        }
        Ok(Value::matrix_or_scalar(result))
    }

    /// Statements of a block; the value is the last statement's, or an
    /// empty matrix.
    fn eval_block(&mut self, stmts: &[Stmt]) -> EvalResult {
        let mut last = Value::empty_matrix();
        for (index, stmt) in stmts.iter().enumerate() {
            self.deadline.check()?;
            trace!(statement = index, depth = self.depth.depth(), "block statement");
            last = self.eval(stmt.expr)?;
        }
        Ok(last)
    }
}

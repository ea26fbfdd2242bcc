//! Calls, indexing and closures.
//!
//! `f(args)` is a call when `f` names a library function or holds a
//! function value, and an index otherwise. Index arguments see `end` bound
//! to the extent of the dimension they address; a bare `:` selects it all.

use yamp_ir::{ExprId, ExprKind, SharedArena};
use yamp_value::{
    argument_value, index, not_callable, recursion_limit_exceeded, symbol_missing, EvalError,
    EvalResult, FunctionValue, IndexArg, Lambda, Value,
};

use super::Interpreter;

impl Interpreter<'_> {
    pub(super) fn eval_call(&mut self, callee: ExprId, args: &[ExprId]) -> EvalResult {
        let arena = self.arena;
        if let ExprKind::Ident(name) = arena.kind(callee) {
            if let Some(target) = self.env.lookup(name).cloned() {
                return self.apply(&target, args);
            }
            if self.library.has_function(name) {
                let values = self.eval_args(args)?;
                return self.library.call(name, self.env, values);
            }
            if let Some(target) = self.library.constant(name).cloned() {
                return self.apply(&target, args);
            }
            return Err(symbol_missing(name));
        }
        let target = self.eval(callee)?;
        self.apply(&target, args)
    }

    /// Call a function value or index any other value.
    fn apply(&mut self, target: &Value, args: &[ExprId]) -> EvalResult {
        match target {
            Value::Function(func) => {
                let values = self.eval_args(args)?;
                return self.call_function(func, values);
            }
            Value::Set(_) | Value::Plot(_) => return Err(not_callable(target.kind())),
            _ => {}
        }
        let index_args = self.eval_index_args(target, args)?;
        index(target, &index_args)
    }

    fn eval_args(&mut self, args: &[ExprId]) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|&arg| self.eval(arg)).collect()
    }

    pub(super) fn eval_index_args(
        &mut self,
        target: &Value,
        args: &[ExprId],
    ) -> Result<Vec<IndexArg>, EvalError> {
        let arena = self.arena;
        let count = args.len();
        let mut out = Vec::with_capacity(count);
        for (position, &arg) in args.iter().enumerate() {
            if matches!(arena.kind(arg), ExprKind::SelectAll) {
                out.push(IndexArg::All);
                continue;
            }
            self.index_extents
                .push(target.index_extent(position, count));
            let value = self.eval(arg);
            self.index_extents.pop();
            out.push(IndexArg::Value(value?));
        }
        Ok(out)
    }

    /// Invoke a function value with evaluated arguments.
    pub fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> EvalResult {
        match func {
            FunctionValue::Named(name) => self.library.call(name, self.env, args),
            FunctionValue::Lambda(lambda) => self.call_lambda(lambda, args),
        }
    }

    fn call_lambda(&mut self, lambda: &Lambda, args: Vec<Value>) -> EvalResult {
        if args.len() != lambda.params.len() {
            return Err(argument_value(format!(
                "the function ({}) expects {} arguments, got {}",
                lambda.params.join(", "),
                lambda.params.len(),
                args.len()
            )));
        }
        let mut depth = self.depth.clone();
        depth
            .enter()
            .map_err(|exceeded| recursion_limit_exceeded(exceeded.limit))?;
        self.env.push_scope();
        for (name, value) in &lambda.captures {
            self.env.define(name.as_str(), value.clone());
        }
        for (name, value) in lambda.params.iter().zip(args) {
            self.env.define(name.as_str(), value);
        }
        let result = {
            let mut child = Interpreter {
                arena: &lambda.arena,
                env: &mut *self.env,
                library: self.library,
                limits: self.limits,
                deadline: self.deadline,
                depth,
                index_extents: Vec::new(),
            };
            child.eval(lambda.body)
        };
        self.env.pop_scope();
        // Body spans point into the defining query's text; report the
        // call site instead.
        result.map_err(|mut e| {
            e.span = None;
            e
        })
    }

    /// Closure over `body`: its own arena, plus the current values of the
    /// free names it mentions.
    pub(super) fn make_lambda(&self, params: &[String], body: ExprId) -> Value {
        let (arena, root) = self.arena.extract(body);
        let captures = {
            let free = arena.iter().filter_map(|expr| match &expr.kind {
                ExprKind::Ident(name) if !params.contains(name) => Some(name.as_str()),
                _ => None,
            });
            self.env.capture(free)
        };
        Value::function(FunctionValue::Lambda(Lambda {
            params: params.to_vec(),
            body: root,
            arena: SharedArena::new(arena),
            captures,
        }))
    }
}

//! Overload descriptors and resolution.
//!
//! Every library function is a list of overloads, each a [`Signature`]
//! (one accepted [`ParamKind`] per position, optionally one [`Variadic`]
//! slot) plus a native implementation. A call picks the single best
//! candidate:
//!
//! 1. A candidate matches when every argument fits its slot, possibly after
//!    a coercion (scalar and 1x1 matrix are interchangeable, a scalar or a
//!    bounded range widens to a matrix), and the variadic slot's count
//!    satisfies its `(min, max, step)` constraint.
//! 2. Candidates are ranked first by whether any fixed position needed a
//!    coercion (exact candidates win), then by variadic window, narrower
//!    first. Coercions inside the variadic slot do not rank.
//! 3. A tie for first place is `AmbiguousOverload`; no match is
//!    `NoMatchingOverload`.

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use yamp_value::{
    ambiguous_overload, argument_value, invalid_signature, no_matching_overload, Complex,
    EvalError, EvalResult, Matrix, PlotValue, SetValue, Value, ValueKind,
};

use crate::environment::Environment;

/// Value kind accepted at one parameter position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Any,
    Scalar,
    Matrix,
    String,
    Range,
    Set,
    Function,
    Plot,
}

/// How an argument fits a parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Fit {
    Exact,
    Coerced,
    Reject,
}

impl ParamKind {
    pub const fn name(self) -> &'static str {
        match self {
            ParamKind::Any => "any",
            ParamKind::Scalar => "scalar",
            ParamKind::Matrix => "matrix",
            ParamKind::String => "string",
            ParamKind::Range => "range",
            ParamKind::Set => "set",
            ParamKind::Function => "function",
            ParamKind::Plot => "plot",
        }
    }

    fn fit(self, value: &Value) -> Fit {
        match (self, value) {
            (ParamKind::Any, _)
            | (ParamKind::Scalar, Value::Scalar(_))
            | (ParamKind::Matrix, Value::Matrix(_))
            | (ParamKind::String, Value::Str(_))
            | (ParamKind::Range, Value::Range(_))
            | (ParamKind::Set, Value::Set(_))
            | (ParamKind::Function, Value::Function(_))
            | (ParamKind::Plot, Value::Plot(_)) => Fit::Exact,
            (ParamKind::Scalar, Value::Matrix(m)) if m.as_scalar().is_some() => Fit::Coerced,
            (ParamKind::Matrix, Value::Scalar(_)) => Fit::Coerced,
            (ParamKind::Matrix, Value::Range(r)) if !r.is_open() => Fit::Coerced,
            _ => Fit::Reject,
        }
    }

    /// Convert an argument that fits with a coercion.
    fn coerce(self, value: Value) -> Value {
        match self {
            ParamKind::Scalar => value.as_scalar().map_or(value, Value::Scalar),
            ParamKind::Matrix if !matches!(value, Value::Matrix(_)) => {
                value.to_matrix().map_or(value, Value::matrix)
            }
            _ => value,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ValueKind> for ParamKind {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Scalar => ParamKind::Scalar,
            ValueKind::Matrix => ParamKind::Matrix,
            ValueKind::String => ParamKind::String,
            ValueKind::Range => ParamKind::Range,
            ValueKind::Set => ParamKind::Set,
            ValueKind::Function => ParamKind::Function,
            ValueKind::Plot => ParamKind::Plot,
        }
    }
}

/// Variadic capture: accepts `min`, `min + step`, `min + 2*step`, ...
/// arguments, up to `max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variadic {
    pub kind: ParamKind,
    pub min: usize,
    /// `None` is unbounded.
    pub max: Option<usize>,
    pub step: usize,
}

impl Variadic {
    pub fn accepts_count(&self, count: usize) -> bool {
        count >= self.min
            && self.max.map_or(true, |max| count <= max)
            && (count - self.min) % self.step == 0
    }

    /// `max - min`; unbounded slots are the widest.
    pub fn window(&self) -> usize {
        self.max.map_or(usize::MAX, |max| max - self.min)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    Fixed(ParamKind),
    Variadic(Variadic),
}

/// Parameter shape of one overload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    params: Vec<Param>,
}

/// Candidate rank: `(coerced at a fixed position, variadic window)`, lower
/// is better.
type Score = (bool, usize);

impl Signature {
    pub fn new() -> Self {
        Signature::default()
    }

    #[must_use]
    pub fn param(mut self, kind: ParamKind) -> Self {
        self.params.push(Param::Fixed(kind));
        self
    }

    /// Add a variadic slot of `kind` taking `min..=max` arguments in
    /// multiples of `step`.
    #[must_use]
    pub fn variadic(mut self, kind: ParamKind, min: usize, max: Option<usize>, step: usize) -> Self {
        self.params.push(Param::Variadic(Variadic {
            kind,
            min,
            max,
            step,
        }));
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Position and descriptor of the variadic slot.
    pub fn variadic_slot(&self) -> Option<(usize, Variadic)> {
        self.params.iter().enumerate().find_map(|(i, p)| match p {
            Param::Variadic(v) => Some((i, *v)),
            Param::Fixed(_) => None,
        })
    }

    /// Reject descriptors no call could ever use.
    pub fn validate(&self, name: &str) -> Result<(), EvalError> {
        let variadics: Vec<Variadic> = self
            .params
            .iter()
            .filter_map(|p| match p {
                Param::Variadic(v) => Some(*v),
                Param::Fixed(_) => None,
            })
            .collect();
        if variadics.len() > 1 {
            return Err(invalid_signature(name, "at most one variadic slot is allowed"));
        }
        if let Some(v) = variadics.first() {
            if v.step == 0 {
                return Err(invalid_signature(name, "variadic step must be at least 1"));
            }
            if v.max.is_some_and(|max| max < v.min) {
                return Err(invalid_signature(name, "variadic max is below its min"));
            }
        }
        Ok(())
    }

    /// Kind expected by argument `index` of a call with `extra` variadic
    /// arguments; the flag marks the variadic slot.
    fn slot(&self, index: usize, extra: usize) -> (ParamKind, bool) {
        match self.variadic_slot() {
            Some((at, v)) if index >= at && index < at + extra => (v.kind, true),
            Some((at, _)) if index >= at + extra => match self.params[index + 1 - extra] {
                Param::Fixed(kind) => (kind, false),
                Param::Variadic(v) => (v.kind, true),
            },
            _ => match self.params[index] {
                Param::Fixed(kind) => (kind, false),
                Param::Variadic(v) => (v.kind, true),
            },
        }
    }

    /// Number of arguments the variadic slot absorbs, if `argc` fits.
    fn extra_for(&self, argc: usize) -> Option<usize> {
        match self.variadic_slot() {
            None => (argc == self.params.len()).then_some(0),
            Some((_, v)) => {
                let extra = argc.checked_sub(self.params.len() - 1)?;
                v.accepts_count(extra).then_some(extra)
            }
        }
    }

    fn score(&self, args: &[Value]) -> Option<Score> {
        let extra = self.extra_for(args.len())?;
        let mut coerced = false;
        for (i, arg) in args.iter().enumerate() {
            let (kind, variadic) = self.slot(i, extra);
            match kind.fit(arg) {
                Fit::Exact => {}
                Fit::Coerced => coerced |= !variadic,
                Fit::Reject => return None,
            }
        }
        let window = self.variadic_slot().map_or(0, |(_, v)| v.window());
        Some((coerced, window))
    }

    /// Coerce and split matched arguments.
    fn bind(&self, args: Vec<Value>) -> Arguments {
        let extra = self.extra_for(args.len()).unwrap_or(0);
        let mut bound = Arguments::default();
        for (i, arg) in args.into_iter().enumerate() {
            let (kind, variadic) = self.slot(i, extra);
            let arg = if kind.fit(&arg) == Fit::Coerced {
                kind.coerce(arg)
            } else {
                arg
            };
            if variadic {
                bound.rest.push(arg);
            } else {
                bound.fixed.push(arg);
            }
        }
        bound
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .params
            .iter()
            .map(|p| match p {
                Param::Fixed(kind) => kind.to_string(),
                Param::Variadic(v) => format!("{}...", v.kind),
            })
            .collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Matched call arguments: fixed positions in order, and the variadic
/// slot's arguments collected into one sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    fixed: SmallVec<[Value; 4]>,
    rest: Vec<Value>,
}

#[cold]
fn wrong_kind(index: usize, expected: &str, got: Option<&Value>) -> EvalError {
    let got = got.map_or("nothing".to_string(), |v| format!("a {}", v.kind()));
    argument_value(format!(
        "argument {} must be a {expected}, got {got}",
        index + 1
    ))
}

impl Arguments {
    /// Number of fixed arguments.
    pub fn len(&self) -> usize {
        self.fixed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.is_empty() && self.rest.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.fixed.get(index)
    }

    /// Arguments captured by the variadic slot.
    pub fn rest(&self) -> &[Value] {
        &self.rest
    }

    pub fn value(&self, index: usize) -> Result<&Value, EvalError> {
        self.get(index).ok_or_else(|| wrong_kind(index, "value", None))
    }

    pub fn scalar(&self, index: usize) -> Result<Complex, EvalError> {
        let value = self.get(index);
        value
            .and_then(Value::as_scalar)
            .ok_or_else(|| wrong_kind(index, "scalar", value))
    }

    /// Real scalar.
    pub fn real(&self, index: usize) -> Result<f64, EvalError> {
        let value = self.get(index);
        value
            .and_then(Value::as_real)
            .ok_or_else(|| wrong_kind(index, "real number", value))
    }

    /// Non-negative integer, e.g. a dimension.
    pub fn count(&self, index: usize) -> Result<usize, EvalError> {
        let value = self.get(index);
        value
            .and_then(Value::as_count)
            .ok_or_else(|| wrong_kind(index, "non-negative integer", value))
    }

    pub fn matrix(&self, index: usize) -> Result<&Matrix, EvalError> {
        match self.get(index) {
            Some(Value::Matrix(m)) => Ok(m),
            other => Err(wrong_kind(index, "matrix", other)),
        }
    }

    pub fn str(&self, index: usize) -> Result<&str, EvalError> {
        let value = self.get(index);
        value
            .and_then(Value::as_str)
            .ok_or_else(|| wrong_kind(index, "string", value))
    }

    pub fn set(&self, index: usize) -> Result<&SetValue, EvalError> {
        match self.get(index) {
            Some(Value::Set(s)) => Ok(s),
            other => Err(wrong_kind(index, "set", other)),
        }
    }

    pub fn plot(&self, index: usize) -> Result<&PlotValue, EvalError> {
        match self.get(index) {
            Some(Value::Plot(p)) => Ok(p),
            other => Err(wrong_kind(index, "plot", other)),
        }
    }
}

/// What a native function may touch besides its arguments.
pub struct CallContext<'c> {
    name: &'c str,
    env: &'c mut Environment,
}

impl<'c> CallContext<'c> {
    pub fn new(name: &'c str, env: &'c mut Environment) -> Self {
        CallContext { name, env }
    }

    /// Name the function was called by.
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn env(&self) -> &Environment {
        self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        self.env
    }
}

/// Native implementation of one overload.
pub type NativeFn = Box<dyn Fn(&mut CallContext<'_>, &Arguments) -> EvalResult + Send + Sync>;

pub struct Overload {
    pub signature: Signature,
    pub func: NativeFn,
}

impl fmt::Debug for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Overload{}", self.signature)
    }
}

/// Pick the best overload for `args` without calling it.
pub fn select<'o>(
    name: &str,
    overloads: &'o [Overload],
    args: &[Value],
) -> Result<&'o Overload, EvalError> {
    let mut best: Option<(&Overload, Score)> = None;
    let mut tied = 0;
    for overload in overloads {
        let Some(score) = overload.signature.score(args) else {
            continue;
        };
        match best {
            Some((_, top)) if score > top => {}
            Some((_, top)) if score == top => tied += 1,
            _ => {
                best = Some((overload, score));
                tied = 1;
            }
        }
    }
    match best {
        None => Err(no_matching_overload(name, args)),
        Some(_) if tied > 1 => Err(ambiguous_overload(name, args, tied)),
        Some((overload, score)) => {
            debug!(signature = %overload.signature, ?score, "overload selected");
            Ok(overload)
        }
    }
}

/// Select an overload of `name` and invoke it.
#[tracing::instrument(level = "debug", skip_all, fields(%name, argc = args.len()))]
pub fn resolve(
    name: &str,
    overloads: &[Overload],
    ctx: &mut CallContext<'_>,
    args: Vec<Value>,
) -> EvalResult {
    let overload = select(name, overloads, &args)?;
    let arguments = overload.signature.bind(args);
    (overload.func)(ctx, &arguments)
}

#[cfg(test)]
mod tests;

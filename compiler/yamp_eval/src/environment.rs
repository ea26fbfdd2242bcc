//! Variable scopes of an evaluation session.
//!
//! A scope stack: the bottom scope holds the session's variables, and each
//! closure call pushes a scope with its parameters and captures. Lookup
//! walks from the innermost scope outwards; assignment always binds in the
//! innermost scope, so closures never overwrite session variables.

use rustc_hash::FxHashMap;

use yamp_value::Value;

/// One level of bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Scope stack; never empty.
#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new()],
        }
    }

    /// Session scope pre-populated with `bindings`.
    pub fn with_bindings<I, S>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut env = Environment::new();
        for (name, value) in bindings {
            env.define(name, value);
        }
        env
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pop the innermost scope; the session scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn innermost(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Bind `name` in the innermost scope (last write wins).
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.innermost().define(name, value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Delete `name` from the innermost scope that binds it.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.remove(name))
    }

    /// Delete every variable of the innermost scope; returns how many.
    pub fn clear(&mut self) -> usize {
        let scope = self.innermost();
        let count = scope.len();
        *scope = Scope::new();
        count
    }

    /// Session variables, sorted by name.
    pub fn variables(&self) -> Vec<(&str, &Value)> {
        let mut vars: Vec<(&str, &Value)> = self.scopes[0]
            .bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        vars.sort_unstable_by(|a, b| a.0.cmp(b.0));
        vars
    }

    /// Snapshot of the visible bindings for `names`, innermost first.
    pub fn capture<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> Vec<(String, Value)> {
        let mut captured: Vec<(String, Value)> = names
            .into_iter()
            .filter_map(|name| self.lookup(name).map(|v| (name.to_string(), v.clone())))
            .collect();
        captured.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        captured.dedup_by(|a, b| a.0 == b.0);
        captured
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

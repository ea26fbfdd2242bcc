//! Registered functions and constants.
//!
//! A [`Library`] is built once, by [`Library::standard`] or by hosts adding
//! their own functions on top, and is then shared read-only by every
//! session (`Arc<Library>`). Names are unique across functions and
//! constants; a function name may carry several overloads as long as their
//! signatures differ.

use std::fmt;

use rustc_hash::FxHashMap;

use yamp_value::{duplicate_registration, symbol_missing, Complex, EvalError, EvalResult, Value};

use crate::builtins;
use crate::environment::Environment;
use crate::overload::{resolve, Arguments, CallContext, Overload, Signature};

#[derive(Default)]
pub struct Library {
    functions: FxHashMap<String, Vec<Overload>>,
    constants: FxHashMap<String, Value>,
}

impl Library {
    /// Empty library; see [`Library::standard`] for the stock functions.
    pub fn new() -> Self {
        Library::default()
    }

    /// Constants `pi`, `e`, `i`, `inf`, `nan` and every built-in function.
    pub fn standard() -> Self {
        let mut lib = Library::new();
        for (name, value) in [
            ("pi", Complex::real(std::f64::consts::PI)),
            ("e", Complex::real(std::f64::consts::E)),
            ("i", Complex::I),
            ("inf", Complex::real(f64::INFINITY)),
            ("nan", Complex::real(f64::NAN)),
        ] {
            lib.constants.insert(name.to_string(), Value::Scalar(value));
        }
        builtins::register(&mut lib);
        lib
    }

    pub fn register_constant(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.constants.contains_key(name) || self.functions.contains_key(name) {
            return Err(duplicate_registration(name));
        }
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    /// Add an overload of `name`.
    pub fn register<F>(&mut self, name: &str, signature: Signature, func: F) -> Result<(), EvalError>
    where
        F: Fn(&mut CallContext<'_>, &Arguments) -> EvalResult + Send + Sync + 'static,
    {
        signature.validate(name)?;
        if self.constants.contains_key(name)
            || self
                .overloads(name)
                .iter()
                .any(|o| o.signature == signature)
        {
            return Err(duplicate_registration(&format!("{name}{signature}")));
        }
        self.insert(name, signature, func);
        Ok(())
    }

    /// Unchecked registration for the built-in table.
    pub(crate) fn insert<F>(&mut self, name: &str, signature: Signature, func: F)
    where
        F: Fn(&mut CallContext<'_>, &Arguments) -> EvalResult + Send + Sync + 'static,
    {
        self.functions
            .entry(name.to_string())
            .or_default()
            .push(Overload {
                signature,
                func: Box::new(func),
            });
    }

    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn overloads(&self, name: &str) -> &[Overload] {
        self.functions.get(name).map_or(&[][..], Vec::as_slice)
    }

    /// Every function name, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve and invoke `name` with evaluated arguments.
    pub fn call(&self, name: &str, env: &mut Environment, args: Vec<Value>) -> EvalResult {
        let overloads = self.overloads(name);
        if overloads.is_empty() {
            return Err(symbol_missing(name));
        }
        let mut ctx = CallContext::new(name, env);
        resolve(name, overloads, &mut ctx, args)
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut constants: Vec<&str> = self.constants.keys().map(String::as_str).collect();
        constants.sort_unstable();
        f.debug_struct("Library")
            .field("functions", &self.function_names())
            .field("constants", &constants)
            .finish()
    }
}

#[cfg(test)]
mod tests;

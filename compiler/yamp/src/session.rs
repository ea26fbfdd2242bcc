//! Evaluation sessions.
//!
//! A [`Session`] is one variable namespace plus shared, read-only
//! registries: the [`Grammar`] used to parse and the [`Library`] of
//! functions and constants. Registries are reference counted, so child
//! sessions and sessions built from the same builder inputs share them.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use yamp_eval::{Environment, Interpreter, Library, Limits, DEFAULT_RECURSION_LIMIT};
use yamp_parse::{parse, Grammar};
use yamp_value::Value;

use crate::error::QueryError;
use crate::query::{Query, QueryOutput};

/// Resource limits applied to every execution of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Wall-clock budget per execution; `None` runs to completion.
    pub time_budget: Option<Duration>,
    /// Maximum nesting of closure calls.
    pub recursion_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            time_budget: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl SessionConfig {
    fn limits(self) -> Limits {
        Limits {
            time_budget: self.time_budget,
            recursion_limit: self.recursion_limit,
        }
    }
}

/// Builder for [`Session`]; unset registries default to the standard ones.
#[derive(Default)]
pub struct SessionBuilder {
    grammar: Option<Arc<Grammar>>,
    library: Option<Arc<Library>>,
    config: SessionConfig,
    bindings: Vec<(String, Value)>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        SessionBuilder::default()
    }

    #[must_use]
    pub fn grammar(mut self, grammar: Arc<Grammar>) -> Self {
        self.grammar = Some(grammar);
        self
    }

    #[must_use]
    pub fn library(mut self, library: Arc<Library>) -> Self {
        self.library = Some(library);
        self
    }

    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.config.time_budget = Some(budget);
        self
    }

    #[must_use]
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.config.recursion_limit = limit;
        self
    }

    /// Initial variables.
    #[must_use]
    pub fn bindings<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        self.bindings
            .extend(bindings.into_iter().map(|(name, value)| (name.into(), value)));
        self
    }

    pub fn build(self) -> Session {
        Session {
            grammar: self
                .grammar
                .unwrap_or_else(|| Arc::new(Grammar::standard())),
            library: self
                .library
                .unwrap_or_else(|| Arc::new(Library::standard())),
            config: self.config,
            env: Environment::with_bindings(self.bindings),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    grammar: Arc<Grammar>,
    library: Arc<Library>,
    config: SessionConfig,
    env: Environment,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session over the standard grammar and library.
    pub fn new() -> Self {
        SessionBuilder::new().build()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Seed variables, replacing existing ones of the same name.
    #[must_use]
    pub fn with_bindings<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        self.bind(bindings);
        self
    }

    fn bind<I, S>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        for (name, value) in bindings {
            self.env.define(name, value);
        }
    }

    /// New session with the same registries and config and no variables.
    #[must_use]
    pub fn child(&self) -> Session {
        Session {
            grammar: Arc::clone(&self.grammar),
            library: Arc::clone(&self.library),
            config: self.config,
            env: Environment::new(),
        }
    }

    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    pub fn library(&self) -> &Arc<Library> {
        &self.library
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn parse(&self, text: &str) -> Result<Query, QueryError> {
        let output = parse(&self.grammar, text)?;
        Ok(Query::new(text, output.arena, output.statements))
    }

    /// Run a parsed query. On failure, statements before the failing one
    /// keep their effects.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = query.statements.len()))]
    pub fn execute(&mut self, query: &Query) -> Result<QueryOutput, QueryError> {
        let outputs = Interpreter::new(&query.arena, &mut self.env, &self.library)
            .with_limits(self.config.limits())
            .run(&query.statements)
            .inspect_err(|e| debug!(code = %e.code(), "query failed"))?;
        Ok(QueryOutput::new(outputs))
    }

    /// Parse and run `text`.
    pub fn query(&mut self, text: &str) -> Result<QueryOutput, QueryError> {
        let query = self.parse(text)?;
        self.execute(&query)
    }

    /// Bind `bindings`, then parse and run `text`.
    pub fn query_with<I, S>(&mut self, text: &str, bindings: I) -> Result<QueryOutput, QueryError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        self.bind(bindings);
        self.query(text)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.env.lookup(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.env.define(name, value);
    }

    /// Every variable, sorted by name.
    pub fn variables(&self) -> Vec<(&str, &Value)> {
        self.env.variables()
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }
}

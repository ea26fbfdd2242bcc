//! YAMP: a numeric expression language with matrices, closures and a
//! registrable grammar.
//!
//! This crate is the query surface. A [`Session`] owns a variable namespace
//! and shares a grammar and a function library with other sessions:
//!
//! ```text
//! text ──► Session::parse ──► Query (immutable tree)
//!                                │
//!                                ▼
//!          Session::execute ──► QueryOutput (one value per statement)
//! ```
//!
//! [`Session::query`] does both steps. Failures surface as [`QueryError`],
//! which renders a caret diagnostic against the query text.

mod error;
mod query;
mod session;

use std::sync::Once;

pub use error::QueryError;
pub use query::{Query, QueryOutput};
pub use session::{Session, SessionBuilder, SessionConfig};

pub use yamp_eval::{Environment, Library, ParamKind, Signature};
pub use yamp_parse::Grammar;
pub use yamp_value::Value;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=yamp_eval=debug`.
/// With `YAMP_LOG_TREE=1` spans are printed as an indented tree. Safe to
/// call more than once; a subscriber installed by the host wins.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
        let tree = std::env::var_os("YAMP_LOG_TREE").is_some_and(|v| v == "1");
        let _ = if tree {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .try_init()
        };
    });
}

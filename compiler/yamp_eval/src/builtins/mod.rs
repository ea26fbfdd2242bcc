//! Built-in functions registered by [`Library::standard`].
//!
//! Each submodule owns one family and exposes a `register` function adding
//! its overloads. Registration here is unchecked; the table is fixed and
//! covered by the `test_standard_*` tests.

mod math;
mod matrix;
mod plot;
mod session;
mod sets;

use crate::library::Library;
use crate::overload::{ParamKind, Signature};

pub(crate) fn register(lib: &mut Library) {
    math::register(lib);
    matrix::register(lib);
    session::register(lib);
    sets::register(lib);
    plot::register(lib);
}

/// Signature of fixed positions, no variadic slot.
fn fixed(kinds: &[ParamKind]) -> Signature {
    kinds
        .iter()
        .fold(Signature::new(), |signature, &kind| signature.param(kind))
}

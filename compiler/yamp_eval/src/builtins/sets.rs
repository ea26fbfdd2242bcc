//! Named sets.

use yamp_value::{EvalResult, SetValue, Value};

use super::fixed;
use crate::library::Library;
use crate::overload::{Arguments, ParamKind, Signature};

fn create(args: &Arguments, ordered: bool) -> EvalResult {
    let mut set = SetValue::new(args.str(0)?, ordered);
    for element in args.rest() {
        set.insert_value(element)?;
    }
    Ok(Value::set(set))
}

/// Fold `op` over every set argument; the result is named `(a<sep>b<sep>c)`.
fn combine(args: &Arguments, sep: char, op: fn(&SetValue, &SetValue) -> SetValue) -> EvalResult {
    let first = args.set(0)?;
    let mut name = format!("({}", first.name());
    let mut result = first.clone();
    for set in args.rest().iter().filter_map(|v| match v {
        Value::Set(s) => Some(&**s),
        _ => None,
    }) {
        name.push(sep);
        name.push_str(set.name());
        result = op(&result, set);
    }
    name.push(')');
    Ok(Value::set(result.renamed(name)))
}

pub(super) fn register(lib: &mut Library) {
    let creator = Signature::new()
        .param(ParamKind::String)
        .variadic(ParamKind::Any, 0, None, 1);
    lib.insert("newset", creator.clone(), |_, args| create(args, false));
    lib.insert("newsortedset", creator, |_, args| create(args, true));

    let combinator = Signature::new()
        .param(ParamKind::Set)
        .variadic(ParamKind::Set, 1, None, 1);
    lib.insert("union", combinator.clone(), |_, args| {
        combine(args, '+', SetValue::union)
    });
    lib.insert("intersect", combinator, |_, args| {
        combine(args, '*', SetValue::intersect)
    });

    lib.insert("tassort", fixed(&[ParamKind::Set]), |_, args| {
        Ok(Value::set(args.set(0)?.sorted()))
    });
}

//! Variable management: `clear` and `exists`.

use yamp_value::{argument_value, Value};

use super::fixed;
use crate::library::Library;
use crate::overload::{ParamKind, Signature};

fn cleared(count: usize) -> Value {
    Value::string(format!("{count} objects cleared."))
}

pub(super) fn register(lib: &mut Library) {
    lib.insert("clear", Signature::new(), |ctx, _| {
        Ok(cleared(ctx.env_mut().clear()))
    });

    // All names are checked before any is removed.
    lib.insert(
        "clear",
        Signature::new().variadic(ParamKind::String, 1, None, 1),
        |ctx, args| {
            let names: Vec<&str> = args.rest().iter().filter_map(Value::as_str).collect();
            if let Some(missing) = names.iter().find(|name| !ctx.env().contains(name)) {
                return Err(argument_value(format!(
                    "The variable {missing} does not exist."
                )));
            }
            let env = ctx.env_mut();
            let count = names
                .iter()
                .filter(|name| env.remove(name).is_some())
                .count();
            Ok(cleared(count))
        },
    );

    lib.insert("exists", fixed(&[ParamKind::String]), |ctx, args| {
        Ok(Value::boolean(ctx.env().contains(args.str(0)?)))
    });
}

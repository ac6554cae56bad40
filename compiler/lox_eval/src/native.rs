//! Host functions installed in every global environment.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::value::NativeFunction;
use crate::Value;

const NATIVES: &[NativeFunction] = &[NativeFunction {
    name: "clock",
    arity: 0,
    func: clock,
}];

pub(crate) fn install(globals: &Environment) {
    for native in NATIVES {
        let value = Value::Native(Rc::new(NativeFunction {
            name: native.name,
            arity: native.arity,
            func: native.func,
        }));
        globals.define_value(native.name, value);
    }
}

/// Seconds since the Unix epoch.
fn clock(_args: &[Value]) -> Value {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |elapsed| elapsed.as_secs_f64());
    Value::Number(seconds)
}

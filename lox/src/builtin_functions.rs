use lox_value::{BuiltinVars, Value};
use std::sync::OnceLock;
use std::time::Instant;

/// Returns the default [`BuiltinVars`] that should be used.
pub fn default_builtin_vars() -> BuiltinVars {
    let mut builtin_vars = BuiltinVars::new();
    builtin_vars.add_native_fn("clock", &clock, 0);
    builtin_vars
}

/// Seconds elapsed since the first call to `clock` in this process.
pub fn clock(_args: &mut [Value]) -> Value {
    static START: OnceLock<Instant> = OnceLock::new();
    let start = START.get_or_init(Instant::now);
    Value::Number(start.elapsed().as_secs_f64())
}

use crate::eval_err;

use super::{eval_result::EvalResult, value::Value, Context};

/// Build the value thrown for a type error.
///
/// The intrinsic error constructors live in the surrounding engine, so at
/// this layer the thrown value is a tagged message string rather than a
/// TypeError object.
pub fn type_error_value(cx: &mut Context, message: &str) -> Value {
    Value::String(cx.alloc_string(format!("TypeError: {}", message)))
}

pub fn type_error<T>(cx: &mut Context, message: &str) -> EvalResult<T> {
    eval_err!(type_error_value(cx, message))
}

use super::{
    eval_result::EvalResult,
    gc::Handle,
    object_value::{ObjectKind, ObjectValue},
    value::Value,
    Context,
};

/// Signature of a function implemented in native code. Receives the `this`
/// value of the call and the argument list. Getters and setters installed on
/// accessor properties are called through this seam; the surrounding
/// interpreter supplies its own calling convention for everything else.
pub type BuiltinFunctionPtr = fn(&mut Context, Value, &[Value]) -> EvalResult<Value>;

pub struct BuiltinFunction;

impl BuiltinFunction {
    /// Create a callable object wrapping a native function.
    pub fn create(cx: &mut Context, func: BuiltinFunctionPtr) -> Handle<ObjectValue> {
        ObjectValue::new_with_kind(cx, None, true, ObjectKind::BuiltinFunction(func))
    }
}

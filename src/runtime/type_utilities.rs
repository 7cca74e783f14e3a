use std::rc::Rc;

use super::{gc::Handle, object_value::ObjectValue, value::Value};

/// 7.2.10 SameValue
///
/// Same as strict equality, but treats NaN as equal to itself and does not
/// treat differently signed zeros as equal.
pub fn same_value(v1: &Value, v2: &Value) -> bool {
    match (v1, v2) {
        (Value::Number(n1), Value::Number(n2)) => {
            if n1.is_nan() && n2.is_nan() {
                return true;
            }

            n1 == n2 && n1.is_sign_positive() == n2.is_sign_positive()
        }
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(b1), Value::Bool(b2)) => b1 == b2,
        (Value::String(s1), Value::String(s2)) => s1.str() == s2.str(),
        (Value::Symbol(s1), Value::Symbol(s2)) => Rc::ptr_eq(s1, s2),
        (Value::Object(o1), Value::Object(o2)) => o1.ptr_eq(o2),
        (Value::Accessor(a1), Value::Accessor(a2)) => a1.ptr_eq(a2),
        _ => false,
    }
}

pub fn same_object_value(o1: &Handle<ObjectValue>, o2: &Handle<ObjectValue>) -> bool {
    o1.ptr_eq(o2)
}

pub fn same_opt_object_value(
    o1: Option<&Handle<ObjectValue>>,
    o2: Option<&Handle<ObjectValue>>,
) -> bool {
    match (o1, o2) {
        (None, None) => true,
        (Some(o1), Some(o2)) => same_object_value(o1, o2),
        _ => false,
    }
}

/// 7.2.3 IsCallable
pub fn is_callable(value: &Value) -> bool {
    match value {
        Value::Object(object) => is_callable_object(object),
        _ => false,
    }
}

pub fn is_callable_object(object: &Handle<ObjectValue>) -> bool {
    object.borrow().is_callable()
}

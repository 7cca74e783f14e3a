use super::{
    error::type_error,
    eval_result::EvalResult,
    gc::Handle,
    object_value::ObjectValue,
    ordinary_object::{
        ordinary_define_own_property, ordinary_delete, ordinary_get, ordinary_get_own_property,
        ordinary_has_property, ordinary_set,
    },
    property::{NativeGetter, NativeSetter, Property},
    property_descriptor::PropertyDescriptor,
    property_key::PropertyKey,
    value::Value,
    Context,
};

/// 7.3.2 Get
pub fn get(cx: &mut Context, object: Handle<ObjectValue>, key: &PropertyKey) -> EvalResult<Value> {
    let receiver = Value::object(object.clone());
    ordinary_get(cx, object, key, &receiver)
}

/// 7.3.4 Set
pub fn set(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
    value: Value,
    should_throw: bool,
) -> EvalResult<bool> {
    let receiver = Value::object(object.clone());
    let success = ordinary_set(cx, object, key, value, &receiver)?;
    if !success && should_throw {
        return type_error(cx, &format!("cannot set property {}", key));
    }

    Ok(success)
}

/// 7.3.5 CreateDataProperty
pub fn create_data_property(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
    value: Value,
) -> EvalResult<bool> {
    let new_desc = PropertyDescriptor::data(value, true, true, true);
    ordinary_define_own_property(cx, object, key, new_desc)
}

/// 7.3.7 CreateDataPropertyOrThrow
pub fn create_data_property_or_throw(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
    value: Value,
) -> EvalResult<()> {
    let success = create_data_property(cx, object, key, value)?;
    if !success {
        return type_error(cx, &format!("cannot create property {}", key));
    }

    Ok(())
}

/// 7.3.8 DefinePropertyOrThrow
pub fn define_property_or_throw(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
    desc: PropertyDescriptor,
) -> EvalResult<()> {
    let success = ordinary_define_own_property(cx, object, key, desc)?;
    if !success {
        return type_error(cx, &format!("cannot define property {}", key));
    }

    Ok(())
}

/// 7.3.9 DeletePropertyOrThrow
pub fn delete_property_or_throw(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
) -> EvalResult<()> {
    let success = ordinary_delete(object, key)?;
    if !success {
        return type_error(cx, &format!("cannot delete property {}", key));
    }

    Ok(())
}

/// 7.3.11 HasProperty
pub fn has_property(object: Handle<ObjectValue>, key: &PropertyKey) -> EvalResult<bool> {
    ordinary_has_property(object, key)
}

/// 7.3.12 HasOwnProperty
pub fn has_own_property(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
) -> EvalResult<bool> {
    let desc = ordinary_get_own_property(cx, object, key)?;
    Ok(desc.is_some())
}

/// 7.3.13 Call, for object arguments that must be callable
pub fn call_object(
    cx: &mut Context,
    func: Handle<ObjectValue>,
    receiver: Value,
    arguments: &[Value],
) -> EvalResult<Value> {
    let builtin_func = func.borrow().builtin_func();
    match builtin_func {
        Some(func) => func(cx, receiver, arguments),
        None => type_error(cx, "value is not a function"),
    }
}

/// Install a native accessor backed data property. The slot starts out
/// holding `initial_storage`, which only the native functions ever see. The
/// slot reports writable exactly when it has a setter.
pub fn install_native_accessor(
    object: &Handle<ObjectValue>,
    key: PropertyKey,
    get: Option<NativeGetter>,
    set: Option<NativeSetter>,
    initial_storage: Value,
) {
    debug_assert!(object.borrow().find_own_property(&key).is_none());

    let property = Property::native_accessor(get, set, set.is_some(), false, true);
    object.borrow_mut().add_property(key, property, initial_storage);
}

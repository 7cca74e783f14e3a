use super::{
    abstract_operations::{call_object, create_data_property},
    accessor::Accessor,
    eval_result::EvalResult,
    gc::Handle,
    object_value::ObjectValue,
    property::{Property, PropertyKind},
    property_descriptor::PropertyDescriptor,
    property_key::PropertyKey,
    type_utilities::{same_opt_object_value, same_value},
    value::Value,
    Context,
};

/// 10.1.5.1 OrdinaryGetOwnProperty
///
/// Materializes the full descriptor for an own property. A native accessor
/// slot reports as a data property whose value is computed by its getter,
/// which is why this can invoke native code and throw.
pub fn ordinary_get_own_property(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
) -> EvalResult<Option<PropertyDescriptor>> {
    let (index, property) = match object.borrow().find_own_property(key) {
        None => return Ok(None),
        Some(found) => found,
    };

    let storage = object.borrow().get_storage(index);

    let desc = match property.kind() {
        PropertyKind::Data => PropertyDescriptor::data(
            storage,
            property.is_writable(),
            property.is_enumerable(),
            property.is_configurable(),
        ),
        PropertyKind::NativeAccessor { get, .. } => {
            let value = match get {
                Some(getter) => {
                    let receiver = Value::object(object.clone());
                    getter(cx, object.clone(), receiver, storage)?
                }
                None => Value::undefined(),
            };

            PropertyDescriptor::data(
                value,
                property.is_writable(),
                property.is_enumerable(),
                property.is_configurable(),
            )
        }
        PropertyKind::Accessor { .. } => {
            let accessor = Accessor::from_value(&storage);
            let accessor = accessor.borrow();

            PropertyDescriptor::accessor(
                accessor.get.clone(),
                accessor.set.clone(),
                property.is_enumerable(),
                property.is_configurable(),
            )
        }
    };

    Ok(Some(desc))
}

/// 10.1.6.1 OrdinaryDefineOwnProperty
pub fn ordinary_define_own_property(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
    desc: PropertyDescriptor,
) -> EvalResult<bool> {
    let current_desc = ordinary_get_own_property(cx, object.clone(), key)?;
    let is_extensible = object.borrow().is_extensible();

    Ok(validate_and_apply_property_descriptor(
        Some((&object, key)),
        is_extensible,
        desc,
        current_desc,
    ))
}

/// 10.1.6.2 IsCompatiblePropertyDescriptor
pub fn is_compatible_property_descriptor(
    is_extensible: bool,
    desc: PropertyDescriptor,
    current_desc: Option<PropertyDescriptor>,
) -> bool {
    validate_and_apply_property_descriptor(None, is_extensible, desc, current_desc)
}

/// 10.1.6.3 ValidateAndApplyPropertyDescriptor
///
/// Validation rejects with no observable mutation. The apply step is split
/// into a fast path and a slow path: when only the value changes the new
/// value is written in place at the same slot index, while any attribute or
/// kind change replaces the slot's descriptor, forcing the object off its
/// shared shape.
pub fn validate_and_apply_property_descriptor(
    object: Option<(&Handle<ObjectValue>, &PropertyKey)>,
    is_extensible: bool,
    desc: PropertyDescriptor,
    current_desc: Option<PropertyDescriptor>,
) -> bool {
    let current_desc = match current_desc {
        Some(current_desc) => current_desc,
        None => {
            if !is_extensible {
                return false;
            }

            let (object, key) = match object {
                None => return true,
                Some(object_and_key) => object_and_key,
            };

            // Create new property with fields in descriptor, using the
            // default if a field is not set
            let is_enumerable = desc.is_enumerable.unwrap_or(false);
            let is_configurable = desc.is_configurable.unwrap_or(false);

            let (property, value) = if desc.is_accessor_descriptor() {
                let property = Property::accessor(
                    desc.get.is_some(),
                    desc.set.is_some(),
                    is_enumerable,
                    is_configurable,
                );
                let value = Value::Accessor(Accessor::new(desc.get, desc.set));

                (property, value)
            } else {
                let is_writable = desc.is_writable.unwrap_or(false);
                let value = desc.value.unwrap_or_else(Value::undefined);

                (Property::data(is_writable, is_enumerable, is_configurable), value)
            };

            object.borrow_mut().add_property(key.clone(), property, value);

            return true;
        }
    };

    if desc.has_no_fields() {
        return true;
    }

    if !current_desc.is_configurable() {
        if let Some(true) = desc.is_configurable {
            return false;
        }

        match desc.is_enumerable {
            Some(is_enumerable) if is_enumerable != current_desc.is_enumerable() => return false,
            _ => {}
        }
    }

    let is_kind_change =
        !desc.is_generic_descriptor() && current_desc.is_data_descriptor() != desc.is_data_descriptor();

    if desc.is_generic_descriptor() {
        // No further validation necessary
    } else if is_kind_change {
        if !current_desc.is_configurable() {
            return false;
        }
    } else if current_desc.is_data_descriptor() {
        if !current_desc.is_configurable() && !current_desc.is_writable() {
            if let Some(true) = desc.is_writable {
                return false;
            }

            match &desc.value {
                Some(value) if !same_value(value, current_desc.value.as_ref().unwrap()) => {
                    return false
                }
                _ => {}
            }

            // Nothing left that may change
            return true;
        }
    } else if !current_desc.is_configurable() {
        if desc.has_get && !same_opt_object_value(desc.get.as_ref(), current_desc.get.as_ref()) {
            return false;
        }

        if desc.has_set && !same_opt_object_value(desc.set.as_ref(), current_desc.set.as_ref()) {
            return false;
        }

        return true;
    }

    let (object, key) = match object {
        None => return true,
        Some(object_and_key) => object_and_key,
    };

    let (index, current_property) = match object.borrow().find_own_property(key) {
        Some(found) => found,
        None => unreachable!("property disappeared during validation"),
    };

    // Attributes present in the patch overwrite, absent ones carry over
    let is_enumerable = desc.is_enumerable.unwrap_or(current_desc.is_enumerable());
    let is_configurable = desc.is_configurable.unwrap_or(current_desc.is_configurable());

    let (property, value) = if is_kind_change {
        // Converting between data and accessor. Preserve enumerable and
        // configurable, reset all other attributes to their defaults.
        if desc.is_accessor_descriptor() {
            let property = Property::accessor(
                desc.get.is_some(),
                desc.set.is_some(),
                is_enumerable,
                is_configurable,
            );
            let value = Value::Accessor(Accessor::new(desc.get, desc.set));

            (property, value)
        } else {
            let is_writable = desc.is_writable.unwrap_or(false);
            let value = desc.value.unwrap_or_else(Value::undefined);

            (Property::data(is_writable, is_enumerable, is_configurable), value)
        }
    } else if current_desc.is_accessor_descriptor() {
        let get = if desc.has_get { desc.get } else { current_desc.get };
        let set = if desc.has_set { desc.set } else { current_desc.set };

        let property =
            Property::accessor(get.is_some(), set.is_some(), is_enumerable, is_configurable);
        let value = Value::Accessor(Accessor::new(get, set));

        (property, value)
    } else {
        let is_writable = desc.is_writable.unwrap_or(current_desc.is_writable());

        let is_native = matches!(current_property.kind(), PropertyKind::NativeAccessor { .. });
        if is_native && desc.value.is_none() {
            // Attribute-only patch on a native accessor keeps the slot's
            // native backing and its opaque storage
            let flags = Property::data(is_writable, is_enumerable, is_configurable).flags();
            let property = current_property.with_flags(flags);
            let value = object.borrow().get_storage(index);

            (property, value)
        } else {
            // An explicit value redefinition replaces any native backing
            // with a plain data slot
            let value = match desc.value {
                Some(value) => value,
                None => object.borrow().get_storage(index),
            };

            (Property::data(is_writable, is_enumerable, is_configurable), value)
        }
    };

    if property == current_property {
        // Only the value changed, write it in place at the same slot
        object.borrow_mut().set_storage(index, value);
    } else {
        object.borrow_mut().replace_property(index, property, value);
    }

    true
}

/// 10.1.7.1 OrdinaryHasProperty
pub fn ordinary_has_property(object: Handle<ObjectValue>, key: &PropertyKey) -> EvalResult<bool> {
    if object.borrow().find_own_property(key).is_some() {
        return Ok(true);
    }

    let parent = object.borrow().prototype();
    match parent {
        Some(parent) => ordinary_has_property(parent, key),
        None => Ok(false),
    }
}

/// 10.1.8.1 OrdinaryGet
///
/// The receiver is threaded through the prototype chain unchanged so that a
/// getter found higher in the chain still sees the original object as its
/// `this` value.
pub fn ordinary_get(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
    receiver: &Value,
) -> EvalResult<Value> {
    // Bind the lookup result first so no borrow of the receiver is held
    // across the prototype recursion or an accessor call
    let found = object.borrow().find_own_property(key);
    let (index, property) = match found {
        Some(found) => found,
        None => {
            let parent = object.borrow().prototype();
            return match parent {
                None => Ok(Value::undefined()),
                Some(parent) => ordinary_get(cx, parent, key, receiver),
            };
        }
    };

    let storage = object.borrow().get_storage(index);

    match property.kind() {
        PropertyKind::Data => Ok(storage),
        PropertyKind::NativeAccessor { get, .. } => match get {
            Some(getter) => getter(cx, object.clone(), receiver.clone(), storage),
            None => Ok(Value::undefined()),
        },
        PropertyKind::Accessor { .. } => {
            let accessor = Accessor::from_value(&storage);
            let getter = accessor.borrow().get.clone();

            match getter {
                None => Ok(Value::undefined()),
                Some(getter) => call_object(cx, getter, receiver.clone(), &[]),
            }
        }
    }
}

/// 10.1.9.1 OrdinarySet
/// 10.1.9.2 OrdinarySetWithOwnDescriptor
///
/// Walks the prototype chain for the property that governs the write. A
/// governing data property redirects the write onto the receiver, the
/// shadowing case; a governing accessor calls its setter with the receiver
/// as `this`.
pub fn ordinary_set(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    key: &PropertyKey,
    value: Value,
    receiver: &Value,
) -> EvalResult<bool> {
    // As in ordinary_get, drop the lookup borrow before recursing or
    // writing to the receiver
    let found = object.borrow().find_own_property(key);
    let (index, property) = match found {
        Some(found) => found,
        None => {
            let parent = object.borrow().prototype();
            return match parent {
                Some(parent) => ordinary_set(cx, parent, key, value, receiver),
                // No property anywhere in the chain. The write behaves as if
                // governed by a default writable data property.
                None => set_on_receiver(cx, key, value, receiver),
            };
        }
    };

    if property.is_accessor() {
        let storage = object.borrow().get_storage(index);
        let accessor = Accessor::from_value(&storage);
        let setter = accessor.borrow().set.clone();

        return match setter {
            None => Ok(false),
            Some(setter) => {
                call_object(cx, setter, receiver.clone(), &[value])?;
                // A write through a setter always succeeds, whatever the
                // setter did internally
                Ok(true)
            }
        };
    }

    if !property.is_writable() {
        return Ok(false);
    }

    set_on_receiver(cx, key, value, receiver)
}

/// The write half of OrdinarySetWithOwnDescriptor once a writable data
/// property (or no property at all) was found to govern the write. Creates
/// or overwrites an own data property on the receiver itself.
fn set_on_receiver(
    cx: &mut Context,
    key: &PropertyKey,
    value: Value,
    receiver: &Value,
) -> EvalResult<bool> {
    if !receiver.is_object() {
        return Ok(false);
    }

    let receiver = receiver.as_object();
    let existing = receiver.borrow().find_own_property(key);

    match existing {
        None => create_data_property(cx, receiver, key, value),
        Some((_, existing)) if existing.is_accessor() => Ok(false),
        Some((_, existing)) if !existing.is_writable() => Ok(false),
        Some((index, existing)) => {
            write_data_slot(cx, receiver, index, existing, value)?;
            Ok(true)
        }
    }
}

/// Write a value into a writable data slot in place. Native accessor slots
/// route the write through their native setter, which computes the slot's
/// new storage contents.
fn write_data_slot(
    cx: &mut Context,
    object: Handle<ObjectValue>,
    index: usize,
    property: Property,
    value: Value,
) -> EvalResult<()> {
    match property.kind() {
        PropertyKind::NativeAccessor { set: Some(setter), .. } => {
            let storage = object.borrow().get_storage(index);
            let receiver = Value::object(object.clone());
            let new_storage = setter(cx, object.clone(), receiver, storage, value)?;
            object.borrow_mut().set_storage(index, new_storage);
        }
        PropertyKind::NativeAccessor { set: None, .. } => {}
        _ => object.borrow_mut().set_storage(index, value),
    }

    Ok(())
}

/// 10.1.10.1 OrdinaryDelete
pub fn ordinary_delete(object: Handle<ObjectValue>, key: &PropertyKey) -> EvalResult<bool> {
    let found = object.borrow().find_own_property(key);
    match found {
        None => Ok(true),
        Some((index, property)) => {
            if property.is_configurable() {
                object.borrow_mut().remove_property(index);
                Ok(true)
            } else {
                Ok(false)
            }
        }
    }
}

/// 10.1.11.1 OrdinaryOwnPropertyKeys
///
/// Keys in the required order: array index keys ascending by numeric value,
/// then string keys in property creation order, then symbol keys in property
/// creation order.
pub fn ordinary_own_property_keys(object: &Handle<ObjectValue>) -> Vec<PropertyKey> {
    let object = object.borrow();
    let shape = object.shape();
    let count = shape.property_count();

    let mut keys = Vec::with_capacity(count);

    if shape.has_index_key() {
        let mut index_keys = Vec::new();
        for index in 0..count {
            let (key, _) = shape.property_at(index);
            if key.is_array_index() {
                index_keys.push(key);
            }
        }

        index_keys.sort_unstable_by_key(PropertyKey::as_array_index);
        keys.extend(index_keys);
    }

    for index in 0..count {
        let (key, _) = shape.property_at(index);
        if key.is_string() {
            keys.push(key);
        }
    }

    if shape.has_symbol_key() {
        for index in 0..count {
            let (key, _) = shape.property_at(index);
            if key.is_symbol() {
                keys.push(key);
            }
        }
    }

    keys
}

/// The enumeration variant of own key collection: string and index keys
/// only, filtered to enumerable properties, in the same order as
/// `ordinary_own_property_keys`.
pub fn ordinary_own_enumerable_string_keys(object: &Handle<ObjectValue>) -> Vec<PropertyKey> {
    {
        let object = object.borrow();
        if !object.shape().has_enumerable_property() {
            return Vec::new();
        }
    }

    let is_enumerable = |object: &Handle<ObjectValue>, key: &PropertyKey| match object
        .borrow()
        .find_own_property(key)
    {
        Some((_, property)) => property.is_enumerable(),
        None => false,
    };

    ordinary_own_property_keys(object)
        .into_iter()
        .filter(|key| !key.is_symbol() && is_enumerable(object, key))
        .collect()
}

/// 10.1.12 OrdinaryObjectCreate
pub fn ordinary_object_create(
    cx: &mut Context,
    prototype: Option<Handle<ObjectValue>>,
) -> Handle<ObjectValue> {
    ObjectValue::new(cx, prototype, true)
}

/// 10.1.2.1 OrdinarySetPrototypeOf
///
/// Rejects prototype changes on non-extensible objects and changes that
/// would create a cycle in the prototype chain.
pub fn ordinary_set_prototype_of(
    object: &Handle<ObjectValue>,
    new_prototype: Option<Handle<ObjectValue>>,
) -> bool {
    {
        let current = object.borrow().prototype();
        if same_opt_object_value(current.as_ref(), new_prototype.as_ref()) {
            return true;
        }

        if !object.borrow().is_extensible() {
            return false;
        }
    }

    let mut current_prototype = new_prototype.clone();
    while let Some(current) = current_prototype {
        if current.ptr_eq(object) {
            return false;
        }

        current_prototype = current.borrow().prototype();
    }

    object.borrow_mut().set_prototype(new_prototype);

    true
}

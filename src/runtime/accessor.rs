use super::{gc::Handle, object_value::ObjectValue, value::Value};

/// The value of an accessor property. May contain a getter and/or a setter.
pub struct Accessor {
    pub get: Option<Handle<ObjectValue>>,
    pub set: Option<Handle<ObjectValue>>,
}

impl Accessor {
    pub fn new(
        get: Option<Handle<ObjectValue>>,
        set: Option<Handle<ObjectValue>>,
    ) -> Handle<Accessor> {
        Handle::new(Accessor { get, set })
    }

    pub fn from_value(value: &Value) -> Handle<Accessor> {
        match value {
            Value::Accessor(accessor) => accessor.clone(),
            _ => unreachable!("expected accessor value"),
        }
    }
}

use super::{gc::Handle, object_value::ObjectValue, value::Value};

/// 6.2.5 Property Descriptor
///
/// The optional-field descriptor used as the argument of defineOwnProperty
/// and the result of getOwnProperty. Fields that are absent from a patch are
/// carried over from the current property.
#[derive(Clone)]
pub struct PropertyDescriptor {
    /// The [[Value]] field. None if [[Value]] field is not present.
    pub value: Option<Value>,
    /// The [[Writable]] field. None if [[Writable]] field is not present.
    pub is_writable: Option<bool>,
    /// The [[Enumerable]] field. None if [[Enumerable]] field is not present.
    pub is_enumerable: Option<bool>,
    /// The [[Configurable]] field. None if [[Configurable]] field is not present.
    pub is_configurable: Option<bool>,
    /// Whether the [[Get]] field is present.
    pub has_get: bool,
    /// Whether the [[Set]] field is present.
    pub has_set: bool,
    /// The [[Get]] field. Default value of None if [[Get]] field is not present.
    pub get: Option<Handle<ObjectValue>>,
    /// The [[Set]] field. Default value of None if [[Set]] field is not present.
    pub set: Option<Handle<ObjectValue>>,
}

impl PropertyDescriptor {
    pub fn empty() -> PropertyDescriptor {
        PropertyDescriptor {
            value: None,
            is_writable: None,
            is_enumerable: None,
            is_configurable: None,
            has_get: false,
            has_set: false,
            get: None,
            set: None,
        }
    }

    pub fn data(
        value: Value,
        is_writable: bool,
        is_enumerable: bool,
        is_configurable: bool,
    ) -> PropertyDescriptor {
        PropertyDescriptor {
            value: Some(value),
            is_writable: Some(is_writable),
            is_enumerable: Some(is_enumerable),
            is_configurable: Some(is_configurable),
            ..PropertyDescriptor::empty()
        }
    }

    pub fn data_value_only(value: Value) -> PropertyDescriptor {
        PropertyDescriptor { value: Some(value), ..PropertyDescriptor::empty() }
    }

    pub fn accessor(
        get: Option<Handle<ObjectValue>>,
        set: Option<Handle<ObjectValue>>,
        is_enumerable: bool,
        is_configurable: bool,
    ) -> PropertyDescriptor {
        PropertyDescriptor {
            get,
            set,
            is_enumerable: Some(is_enumerable),
            is_configurable: Some(is_configurable),
            has_get: true,
            has_set: true,
            ..PropertyDescriptor::empty()
        }
    }

    pub fn get_only(
        get: Option<Handle<ObjectValue>>,
        is_enumerable: bool,
        is_configurable: bool,
    ) -> PropertyDescriptor {
        PropertyDescriptor {
            get,
            is_enumerable: Some(is_enumerable),
            is_configurable: Some(is_configurable),
            has_get: true,
            ..PropertyDescriptor::empty()
        }
    }

    pub fn set_only(
        set: Option<Handle<ObjectValue>>,
        is_enumerable: bool,
        is_configurable: bool,
    ) -> PropertyDescriptor {
        PropertyDescriptor {
            set,
            is_enumerable: Some(is_enumerable),
            is_configurable: Some(is_configurable),
            has_set: true,
            ..PropertyDescriptor::empty()
        }
    }

    pub fn attributes(
        is_writable: Option<bool>,
        is_enumerable: Option<bool>,
        is_configurable: Option<bool>,
    ) -> PropertyDescriptor {
        PropertyDescriptor {
            is_writable,
            is_enumerable,
            is_configurable,
            ..PropertyDescriptor::empty()
        }
    }

    pub fn is_writable(&self) -> bool {
        self.is_writable.unwrap_or(false)
    }

    pub fn is_enumerable(&self) -> bool {
        self.is_enumerable.unwrap_or(false)
    }

    pub fn is_configurable(&self) -> bool {
        self.is_configurable.unwrap_or(false)
    }

    pub fn has_no_fields(&self) -> bool {
        self.value.is_none()
            && !self.has_get
            && !self.has_set
            && self.is_writable.is_none()
            && self.is_enumerable.is_none()
            && self.is_configurable.is_none()
    }

    /// 6.2.5.1 IsAccessorDescriptor
    pub fn is_accessor_descriptor(&self) -> bool {
        self.has_get || self.has_set
    }

    /// 6.2.5.2 IsDataDescriptor
    pub fn is_data_descriptor(&self) -> bool {
        self.value.is_some() || self.is_writable.is_some()
    }

    /// 6.2.5.3 IsGenericDescriptor
    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_data_descriptor() && !self.is_accessor_descriptor()
    }

    /// 6.2.5.6 CompletePropertyDescriptor
    pub fn complete_property_descriptor(&mut self) {
        if self.is_generic_descriptor() || self.is_data_descriptor() {
            if self.value.is_none() {
                self.value = Some(Value::undefined());
            }

            if self.is_writable.is_none() {
                self.is_writable = Some(false);
            }
        } else {
            self.has_get = true;
            self.has_set = true;
        }

        if self.is_enumerable.is_none() {
            self.is_enumerable = Some(false);
        }

        if self.is_configurable.is_none() {
            self.is_configurable = Some(false);
        }
    }
}

use bitflags::bitflags;

use super::{eval_result::EvalResult, gc::Handle, object_value::ObjectValue, value::Value, Context};

/// Native code backing the read half of a native accessor property. Called
/// with the holding object, the receiver of the access, and the current
/// contents of the property's storage slot.
pub type NativeGetter =
    fn(&mut Context, Handle<ObjectValue>, Value, Value) -> EvalResult<Value>;

/// Native code backing the write half of a native accessor property. Called
/// with the holding object, the receiver, the current storage slot contents,
/// and the value being written. Returns the new storage slot contents.
pub type NativeSetter =
    fn(&mut Context, Handle<ObjectValue>, Value, Value, Value) -> EvalResult<Value>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        const IS_WRITABLE = 1 << 0;
        const IS_ENUMERABLE = 1 << 1;
        const IS_CONFIGURABLE = 1 << 2;
    }
}

/// The kind of value stored in a property slot. Data vs accessor
/// classification is derived from this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// A plain data property. The slot holds the property value itself.
    Data,
    /// A data property whose value is computed by native code. The slot
    /// holds an opaque storage value threaded through the native functions.
    /// Semantically still a data property.
    NativeAccessor {
        get: Option<NativeGetter>,
        set: Option<NativeSetter>,
    },
    /// An accessor property. The slot holds the getter/setter pair, and the
    /// presence bits here mirror it so the slot layout is known without
    /// reading the value.
    Accessor { has_get: bool, has_set: bool },
}

/// The compact descriptor for one property slot: its kind plus its
/// attributes. Stored in shapes, one per named property, so it must stay
/// small and copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Property {
    kind: PropertyKind,
    flags: PropertyFlags,
}

impl Property {
    #[inline]
    pub fn data(is_writable: bool, is_enumerable: bool, is_configurable: bool) -> Property {
        Property {
            kind: PropertyKind::Data,
            flags: Property::attribute_flags(is_writable, is_enumerable, is_configurable),
        }
    }

    #[inline]
    pub fn native_accessor(
        get: Option<NativeGetter>,
        set: Option<NativeSetter>,
        is_writable: bool,
        is_enumerable: bool,
        is_configurable: bool,
    ) -> Property {
        Property {
            kind: PropertyKind::NativeAccessor { get, set },
            flags: Property::attribute_flags(is_writable, is_enumerable, is_configurable),
        }
    }

    /// Accessor properties never carry a writable bit.
    #[inline]
    pub fn accessor(
        has_get: bool,
        has_set: bool,
        is_enumerable: bool,
        is_configurable: bool,
    ) -> Property {
        Property {
            kind: PropertyKind::Accessor { has_get, has_set },
            flags: Property::attribute_flags(false, is_enumerable, is_configurable),
        }
    }

    fn attribute_flags(
        is_writable: bool,
        is_enumerable: bool,
        is_configurable: bool,
    ) -> PropertyFlags {
        let mut flags = PropertyFlags::empty();

        if is_writable {
            flags |= PropertyFlags::IS_WRITABLE;
        }

        if is_enumerable {
            flags |= PropertyFlags::IS_ENUMERABLE;
        }

        if is_configurable {
            flags |= PropertyFlags::IS_CONFIGURABLE;
        }

        flags
    }

    /// The same property with different attribute flags. Accessor kinds
    /// ignore an incoming writable bit.
    pub fn with_flags(&self, mut flags: PropertyFlags) -> Property {
        if self.is_accessor() {
            flags.remove(PropertyFlags::IS_WRITABLE);
        }

        Property { kind: self.kind, flags }
    }

    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Whether this is semantically a data property. Native accessors are
    /// data properties whose value happens to be computed.
    #[inline]
    pub fn is_data(&self) -> bool {
        !self.is_accessor()
    }

    #[inline]
    pub fn is_accessor(&self) -> bool {
        matches!(self.kind, PropertyKind::Accessor { .. })
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.flags.contains(PropertyFlags::IS_WRITABLE)
    }

    #[inline]
    pub fn is_enumerable(&self) -> bool {
        self.flags.contains(PropertyFlags::IS_ENUMERABLE)
    }

    #[inline]
    pub fn is_configurable(&self) -> bool {
        self.flags.contains(PropertyFlags::IS_CONFIGURABLE)
    }
}

use std::fmt;
use std::rc::Rc;

use super::{accessor::Accessor, gc::Handle, object_value::ObjectValue};

/// A flat, immutable string value.
pub struct StringValue {
    str: String,
}

impl StringValue {
    pub fn new(str: String) -> StringValue {
        StringValue { str }
    }

    #[inline]
    pub fn str(&self) -> &str {
        &self.str
    }
}

impl fmt::Debug for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.str)
    }
}

/// A symbol value. Every allocation is a distinct symbol, identity is pointer
/// identity of the containing `Rc`.
pub struct SymbolValue {
    description: Option<String>,
}

impl SymbolValue {
    pub fn new(description: Option<String>) -> SymbolValue {
        SymbolValue { description }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A runtime value. The surrounding engine is free to use a packed tagged
/// representation; this core only inspects values for identity and equality
/// and otherwise passes them through untouched.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<StringValue>),
    Symbol(Rc<SymbolValue>),
    Object(Handle<ObjectValue>),
    /// The getter/setter pair backing an accessor property slot. Never handed
    /// out to callers directly, only unpacked into property descriptors.
    Accessor(Handle<Accessor>),
}

impl Value {
    #[inline]
    pub fn undefined() -> Value {
        Value::Undefined
    }

    #[inline]
    pub fn number(value: f64) -> Value {
        Value::Number(value)
    }

    #[inline]
    pub fn bool(value: bool) -> Value {
        Value::Bool(value)
    }

    #[inline]
    pub fn object(object: Handle<ObjectValue>) -> Value {
        Value::Object(object)
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    pub fn as_object(&self) -> Handle<ObjectValue> {
        match self {
            Value::Object(object) => object.clone(),
            _ => unreachable!("expected object value"),
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(value) => *value,
            _ => unreachable!("expected number value"),
        }
    }

    #[inline]
    pub fn is_accessor(&self) -> bool {
        matches!(self, Value::Accessor(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Number(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{:?}", value.str()),
            Value::Symbol(value) => {
                write!(f, "Symbol({})", value.description().unwrap_or(""))
            }
            Value::Object(object) => write!(f, "Object({:p})", object.as_ptr()),
            Value::Accessor(accessor) => write!(f, "Accessor({:p})", accessor.as_ptr()),
        }
    }
}

use std::rc::Rc;
use std::{fmt, hash};

use super::{
    value::{StringValue, SymbolValue},
    Context,
};

/// The canonical form of a property name.
///
/// String keys that spell a canonical array index ("0", "17", but not "01"
/// or "4294967296") are eagerly normalized to the `ArrayIndex` variant so
/// that `obj[2]` and `obj["2"]` name the same property and index keys stay
/// comparable by numeric value.
#[derive(Clone)]
pub enum PropertyKey {
    /// An interned string key, guaranteed not to be a canonical array index.
    String(Rc<StringValue>),
    /// A symbol key. Identity is the symbol allocation.
    Symbol(Rc<SymbolValue>),
    /// An array index property key.
    ArrayIndex(u32),
}

impl PropertyKey {
    /// Create a property key from a raw string, interning it and normalizing
    /// canonical array index strings to index keys.
    pub fn string(cx: &mut Context, str: &str) -> PropertyKey {
        match PropertyKey::canonical_array_index(str) {
            Some(index) => PropertyKey::ArrayIndex(index),
            None => PropertyKey::String(cx.intern_str(str)),
        }
    }

    /// Create a string property key that is known to not be a number. Be sure
    /// to not pass string keys that may be canonical array indexes.
    #[inline]
    pub fn string_not_number(value: Rc<StringValue>) -> PropertyKey {
        debug_assert!(PropertyKey::canonical_array_index(value.str()).is_none());
        PropertyKey::String(value)
    }

    #[inline]
    pub fn symbol(value: Rc<SymbolValue>) -> PropertyKey {
        PropertyKey::Symbol(value)
    }

    #[inline]
    pub fn array_index(value: u32) -> PropertyKey {
        PropertyKey::ArrayIndex(value)
    }

    fn canonical_array_index(str: &str) -> Option<u32> {
        // Empty string can never be a number
        if str.is_empty() {
            return None;
        }

        // First character must be numeric, and can be a 0 only if it is not
        // a leading zero.
        let first_char = str.as_bytes()[0];
        if !first_char.is_ascii_digit() {
            return None;
        } else if first_char == b'0' && str.len() > 1 {
            return None;
        }

        str.parse::<u32>().ok()
    }

    #[inline]
    pub fn is_array_index(&self) -> bool {
        matches!(self, PropertyKey::ArrayIndex(_))
    }

    #[inline]
    pub fn as_array_index(&self) -> u32 {
        match self {
            PropertyKey::ArrayIndex(value) => *value,
            _ => unreachable!("expected array index property key"),
        }
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, PropertyKey::String(_))
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    #[inline]
    pub fn as_symbol(&self) -> Option<&Rc<SymbolValue>> {
        match self {
            PropertyKey::Symbol(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyKey::String(str1), PropertyKey::String(str2)) => {
                Rc::ptr_eq(str1, str2) || str1.str() == str2.str()
            }
            (PropertyKey::Symbol(sym1), PropertyKey::Symbol(sym2)) => Rc::ptr_eq(sym1, sym2),
            (PropertyKey::ArrayIndex(num1), PropertyKey::ArrayIndex(num2)) => num1 == num2,
            _ => false,
        }
    }
}

impl Eq for PropertyKey {}

impl hash::Hash for PropertyKey {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        match self {
            PropertyKey::String(value) => {
                state.write_u8(0);
                value.str().hash(state);
            }
            PropertyKey::Symbol(value) => {
                state.write_u8(1);
                (Rc::as_ptr(value) as usize).hash(state);
            }
            PropertyKey::ArrayIndex(value) => {
                state.write_u8(2);
                value.hash(state);
            }
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(value) => f.write_str(value.str()),
            PropertyKey::Symbol(value) => {
                write!(f, "Symbol({})", value.description().unwrap_or(""))
            }
            PropertyKey::ArrayIndex(value) => write!(f, "{}", value),
        }
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

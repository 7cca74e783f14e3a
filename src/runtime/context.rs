use std::rc::Rc;

use super::{
    interned_strings::InternedStrings,
    shape::{Shape, ShapeLimits},
    value::{StringValue, SymbolValue},
};

/// A single isolated instance of the object model. Owns the string interner
/// and the root of the shape transition tree. Two contexts never share
/// shapes, objects, or interned strings.
pub struct Context {
    pub(crate) interned_strings: InternedStrings,
    root_shape: Rc<Shape>,
    limits: ShapeLimits,
}

impl Context {
    pub fn new() -> Context {
        Context::with_limits(ShapeLimits::default())
    }

    pub fn with_limits(limits: ShapeLimits) -> Context {
        Context {
            interned_strings: InternedStrings::new(),
            root_shape: Shape::new_root(limits),
            limits,
        }
    }

    /// Allocate a string value without interning it.
    pub fn alloc_string(&mut self, str: String) -> Rc<StringValue> {
        Rc::new(StringValue::new(str))
    }

    /// Return the canonical interned string value for a str.
    pub fn intern_str(&mut self, str: &str) -> Rc<StringValue> {
        self.interned_strings.get_str(str)
    }

    /// Allocate a fresh symbol. Every call produces a distinct symbol
    /// identity, even for equal descriptions.
    pub fn alloc_symbol(&mut self, description: Option<String>) -> Rc<SymbolValue> {
        Rc::new(SymbolValue::new(description))
    }

    /// The shared shape of objects with no properties. All transition shapes
    /// derive from this root, which is what makes identically built objects
    /// converge on identical shapes.
    pub fn root_shape(&self) -> &Rc<Shape> {
        &self.root_shape
    }

    pub fn limits(&self) -> ShapeLimits {
        self.limits
    }
}

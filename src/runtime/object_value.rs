use super::{
    builtin_function::BuiltinFunctionPtr,
    gc::Handle,
    property::Property,
    property_key::PropertyKey,
    shape::Shape,
    value::Value,
    Context,
};

use std::rc::Rc;

/// Behavior tag for an object. This core only distinguishes plain objects
/// from callable ones; richer engines extend this with their own exotic
/// object kinds.
pub enum ObjectKind {
    Ordinary,
    BuiltinFunction(BuiltinFunctionPtr),
}

/// An ordinary object: a shape describing its named properties plus a value
/// storage vector aligned with the shape's item list, its prototype link,
/// and its extensibility flag.
pub struct ObjectValue {
    shape: Rc<Shape>,
    /// One value per shape item, in item order. Slot i holds the value of
    /// the property described by shape item i.
    storage: Vec<Value>,
    prototype: Option<Handle<ObjectValue>>,
    is_extensible: bool,
    kind: ObjectKind,
    /// Set once this object is installed as some object's prototype.
    is_prototype: bool,
}

impl ObjectValue {
    pub fn new(
        cx: &mut Context,
        prototype: Option<Handle<ObjectValue>>,
        is_extensible: bool,
    ) -> Handle<ObjectValue> {
        ObjectValue::new_with_kind(cx, prototype, is_extensible, ObjectKind::Ordinary)
    }

    pub fn new_with_kind(
        cx: &mut Context,
        prototype: Option<Handle<ObjectValue>>,
        is_extensible: bool,
        kind: ObjectKind,
    ) -> Handle<ObjectValue> {
        if let Some(prototype) = &prototype {
            prototype.borrow_mut().mark_as_prototype();
        }

        Handle::new(ObjectValue {
            shape: Rc::clone(cx.root_shape()),
            storage: Vec::new(),
            prototype,
            is_extensible,
            kind,
            is_prototype: false,
        })
    }

    #[inline]
    pub fn shape(&self) -> &Rc<Shape> {
        &self.shape
    }

    pub fn prototype(&self) -> Option<Handle<ObjectValue>> {
        self.prototype.clone()
    }

    #[inline]
    pub fn is_extensible(&self) -> bool {
        self.is_extensible
    }

    /// 10.1.4 OrdinaryPreventExtensions. Irrevocable.
    pub fn prevent_extensions(&mut self) {
        self.is_extensible = false;
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::BuiltinFunction(_))
    }

    pub fn builtin_func(&self) -> Option<BuiltinFunctionPtr> {
        match self.kind {
            ObjectKind::BuiltinFunction(func) => Some(func),
            ObjectKind::Ordinary => None,
        }
    }

    pub(crate) fn set_prototype(&mut self, prototype: Option<Handle<ObjectValue>>) {
        if let Some(prototype) = &prototype {
            prototype.borrow_mut().mark_as_prototype();
        }

        self.prototype = prototype;
    }

    /// Objects used as prototypes leave the shared transition tree. Writes to
    /// a prototype then never affect a shape some unrelated object still
    /// shares, so shape-keyed caches stay valid.
    pub fn mark_as_prototype(&mut self) {
        if self.is_prototype {
            return;
        }

        self.is_prototype = true;
        self.shape = self.shape.convert_to_non_transition_shape();
    }

    #[inline]
    pub fn find_own_property(&self, key: &PropertyKey) -> Option<(usize, Property)> {
        self.shape.find_property(key)
    }

    /// Number of value slots. Always equal to the shape's property count.
    #[inline]
    pub fn storage_len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn get_storage(&self, index: usize) -> Value {
        self.storage[index].clone()
    }

    #[inline]
    pub fn set_storage(&mut self, index: usize, value: Value) {
        self.storage[index] = value;
    }

    /// Append a property. The object may first leave the transition tree if
    /// it has outgrown it, then the shape and the storage vector grow in
    /// lockstep.
    pub fn add_property(&mut self, key: PropertyKey, property: Property, value: Value) {
        if self.shape.at_dictionary_capacity() {
            self.shape = self.shape.convert_to_non_transition_shape();
        }

        self.shape = self.shape.add_property(key, property);
        self.storage.push(value);

        debug_assert!(self.storage.len() == self.shape.property_count());
    }

    /// Remove the property at an item index, shifting later slots down.
    pub fn remove_property(&mut self, index: usize) {
        self.shape = self.shape.remove_property(index);
        self.storage.remove(index);

        debug_assert!(self.storage.len() == self.shape.property_count());
    }

    /// Replace the descriptor and value at an item index, keeping the key
    /// and its position.
    pub fn replace_property(&mut self, index: usize, property: Property, value: Value) {
        self.shape = self.shape.replace_property_descriptor(index, property);
        self.storage[index] = value;
    }
}

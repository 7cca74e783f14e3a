use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// A shared handle to a heap allocated runtime value.
///
/// The surrounding engine is expected to provide a garbage collector. This
/// core only needs stable identity and shared ownership, so handles are
/// reference counted. An allocation stays alive as long as any handle to it
/// exists, which covers both objects referenced by other objects and values
/// stored in property slots.
pub struct Handle<T>(Rc<RefCell<T>>);

impl<T> Handle<T> {
    #[inline]
    pub fn new(value: T) -> Handle<T> {
        Handle(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Identity comparison. Two handles are the same value exactly when they
    /// point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Handle<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Stable address of the underlying allocation, used for identity hashing.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        RefCell::as_ptr(&self.0)
    }
}

impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Handle<T> {
        Handle(self.0.clone())
    }
}

//! Shapes describe which named properties an object has, their attributes,
//! and the index of each property's value slot, independent of any single
//! object's values. Objects built by the same sequence of property additions
//! share a shape: each shape caches a transition edge per (key, descriptor)
//! pair that was appended to it, so identical addition histories converge on
//! the same shape allocation. Upper layers may then cache "key K is at slot
//! I for shape S" keyed on shape identity.
//!
//! A shape is immutable once published. All mutating operations return a new
//! or cached shape instead of editing the receiver, with one exception: the
//! dictionary representation, which is privately owned by a single object
//! and never participates in transition sharing.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use hashbrown::HashMap;
use indexmap::IndexMap;

use super::{property::Property, property_key::PropertyKey};

/// Tuning knobs for representation changes. These are policy only; no
/// particular value is required for correctness.
#[derive(Clone, Copy)]
pub struct ShapeLimits {
    /// Number of outgoing transition edges a shape keeps in a linear vector
    /// before promoting the edge list to a hash map.
    pub transition_map_threshold: usize,
    /// Property count at which an object abandons transition sharing and
    /// converts its shape to dictionary mode on the next addition.
    pub dictionary_property_limit: usize,
    /// Property count up to which lookups linearly scan the item list
    /// instead of building a per-shape index table.
    pub linear_lookup_limit: usize,
}

impl Default for ShapeLimits {
    fn default() -> ShapeLimits {
        ShapeLimits {
            transition_map_threshold: 8,
            dictionary_property_limit: 64,
            linear_lookup_limit: 8,
        }
    }
}

/// A transition edge is labeled by the exact (key, descriptor) pair that was
/// appended to the parent to reach the child.
type TransitionEdge = (PropertyKey, Property);

/// Outgoing transition edges of a shape. Starts as a short linear list and
/// is promoted to a hash map once the fan-out from this shape exceeds the
/// promotion threshold (many differently shaped objects sharing a prefix).
/// Children are weakly held so an unused subtree can be dropped; each child
/// holds its parent strongly, so a live leaf keeps its whole chain of
/// ancestors (and their cached edges) alive.
enum TransitionTable {
    Few(Vec<(TransitionEdge, Weak<Shape>)>),
    Many(HashMap<TransitionEdge, Weak<Shape>>),
}

impl TransitionTable {
    fn find(&self, edge: &TransitionEdge) -> Option<Rc<Shape>> {
        match self {
            TransitionTable::Few(edges) => edges
                .iter()
                .find(|(existing, _)| existing == edge)
                .and_then(|(_, child)| child.upgrade()),
            TransitionTable::Many(table) => table.get(edge).and_then(|child| child.upgrade()),
        }
    }

    fn insert(&mut self, edge: TransitionEdge, child: &Rc<Shape>, promote_threshold: usize) {
        match self {
            TransitionTable::Few(edges) => {
                // Drop edges whose target shape has already died
                edges.retain(|(_, child)| child.strong_count() > 0);

                if edges.len() >= promote_threshold {
                    let mut table: HashMap<TransitionEdge, Weak<Shape>> =
                        edges.drain(..).collect();
                    table.insert(edge, Rc::downgrade(child));
                    *self = TransitionTable::Many(table);
                } else {
                    edges.push((edge, Rc::downgrade(child)));
                }
            }
            TransitionTable::Many(table) => {
                table.insert(edge, Rc::downgrade(child));
            }
        }
    }

    #[cfg(test)]
    fn is_map(&self) -> bool {
        matches!(self, TransitionTable::Many(_))
    }
}

/// The ordered (key, descriptor) item list of a shape.
enum ShapeItems {
    /// Shared, append-only item list used by transition shapes.
    Transition(Vec<(PropertyKey, Property)>),
    /// Privately owned, destructively mutable representation used by
    /// dictionary shapes. The map is insertion ordered and removal shifts
    /// later items down, matching the parallel value storage.
    Dictionary(RefCell<IndexMap<PropertyKey, Property>>),
}

pub struct Shape {
    items: ShapeItems,
    /// The shape this one was reached from by appending a property. None for
    /// the root and for dictionary shapes. Keeps every intermediate shape in
    /// a transition chain alive while a descendant is still in use, since
    /// the edges pointing down the chain are only weak.
    parent: Option<Rc<Shape>>,
    /// Outgoing transition edges. Unused once in dictionary mode.
    transitions: RefCell<TransitionTable>,
    /// Lazily built key -> item index table for transition shapes past the
    /// linear scan limit.
    lookup: RefCell<Option<Box<HashMap<PropertyKey, u32>>>>,
    // Summary bits used to skip work during key enumeration. Conservative:
    // removal does not clear them.
    has_index_key: Cell<bool>,
    has_symbol_key: Cell<bool>,
    has_enumerable_property: Cell<bool>,
    is_dictionary: bool,
    limits: ShapeLimits,
}

impl Shape {
    /// The shape of an object with no properties, the root of a transition
    /// tree.
    pub fn new_root(limits: ShapeLimits) -> Rc<Shape> {
        Rc::new(Shape {
            items: ShapeItems::Transition(Vec::new()),
            parent: None,
            transitions: RefCell::new(TransitionTable::Few(Vec::new())),
            lookup: RefCell::new(None),
            has_index_key: Cell::new(false),
            has_symbol_key: Cell::new(false),
            has_enumerable_property: Cell::new(false),
            is_dictionary: false,
            limits,
        })
    }

    pub fn property_count(&self) -> usize {
        match &self.items {
            ShapeItems::Transition(items) => items.len(),
            ShapeItems::Dictionary(items) => items.borrow().len(),
        }
    }

    #[inline]
    pub fn is_dictionary(&self) -> bool {
        self.is_dictionary
    }

    /// The shape this one transitioned from, if any.
    #[inline]
    pub fn parent(&self) -> Option<&Rc<Shape>> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn has_index_key(&self) -> bool {
        self.has_index_key.get()
    }

    #[inline]
    pub fn has_symbol_key(&self) -> bool {
        self.has_symbol_key.get()
    }

    #[inline]
    pub fn has_enumerable_property(&self) -> bool {
        self.has_enumerable_property.get()
    }

    /// Whether this shape has grown to the point where per-object transition
    /// bookkeeping stops paying for itself. Evaluated before additions; the
    /// object converts to dictionary mode when this reports true.
    pub fn at_dictionary_capacity(&self) -> bool {
        !self.is_dictionary && self.property_count() >= self.limits.dictionary_property_limit
    }

    /// Find the item index and descriptor for a key. O(1) amortized: small
    /// shapes linearly scan, larger ones build an index table on first use.
    pub fn find_property(&self, key: &PropertyKey) -> Option<(usize, Property)> {
        match &self.items {
            ShapeItems::Dictionary(items) => items
                .borrow()
                .get_full(key)
                .map(|(index, _, property)| (index, *property)),
            ShapeItems::Transition(items) => {
                if items.len() <= self.limits.linear_lookup_limit {
                    return items
                        .iter()
                        .position(|(existing, _)| existing == key)
                        .map(|index| (index, items[index].1));
                }

                let mut lookup = self.lookup.borrow_mut();
                let lookup = lookup.get_or_insert_with(|| {
                    let mut table = HashMap::with_capacity(items.len());
                    for (index, (key, _)) in items.iter().enumerate() {
                        table.insert(key.clone(), index as u32);
                    }
                    Box::new(table)
                });

                lookup.get(key).map(|index| {
                    let index = *index as usize;
                    (index, items[index].1)
                })
            }
        }
    }

    /// The (key, descriptor) item at an index. Item order is append order,
    /// except that removal in dictionary mode collapses later indices down.
    pub fn property_at(&self, index: usize) -> (PropertyKey, Property) {
        match &self.items {
            ShapeItems::Transition(items) => items[index].clone(),
            ShapeItems::Dictionary(items) => {
                let items = items.borrow();
                let (key, property) = items
                    .get_index(index)
                    .unwrap_or_else(|| unreachable!("property index out of range"));
                (key.clone(), *property)
            }
        }
    }

    /// A shape whose item list is this shape's items plus the new pair
    /// appended at the end. Adding a key that is already present is a caller
    /// bug. For transition shapes the result is the cached child shape when
    /// one exists; for dictionary shapes the private item map is extended in
    /// place.
    pub fn add_property(self: &Rc<Shape>, key: PropertyKey, property: Property) -> Rc<Shape> {
        debug_assert!(self.find_property(&key).is_none(), "property already present in shape");

        if self.is_dictionary {
            match &self.items {
                ShapeItems::Dictionary(items) => {
                    items.borrow_mut().insert(key.clone(), property);
                }
                ShapeItems::Transition(_) => unreachable!("dictionary shape with shared items"),
            }

            self.note_new_item(&key, property);
            return Rc::clone(self);
        }

        let edge = (key, property);
        if let Some(child) = self.transitions.borrow().find(&edge) {
            return child;
        }

        let (key, property) = edge;
        let mut items = match &self.items {
            ShapeItems::Transition(items) => items.clone(),
            ShapeItems::Dictionary(_) => unreachable!("transition shape with private items"),
        };
        items.push((key.clone(), property));

        let child = Rc::new(Shape {
            items: ShapeItems::Transition(items),
            parent: Some(Rc::clone(self)),
            transitions: RefCell::new(TransitionTable::Few(Vec::new())),
            lookup: RefCell::new(None),
            has_index_key: Cell::new(self.has_index_key.get()),
            has_symbol_key: Cell::new(self.has_symbol_key.get()),
            has_enumerable_property: Cell::new(self.has_enumerable_property.get()),
            is_dictionary: false,
            limits: self.limits,
        });
        child.note_new_item(&key, property);

        self.transitions.borrow_mut().insert(
            (key, property),
            &child,
            self.limits.transition_map_threshold,
        );

        child
    }

    /// A shape with the item at `index` deleted and all later items shifted
    /// down by one. The caller must shift its value storage identically.
    /// Removal cannot be expressed as a forward transition, so the result is
    /// always a dictionary shape.
    pub fn remove_property(self: &Rc<Shape>, index: usize) -> Rc<Shape> {
        let shape = self.convert_to_non_transition_shape();

        match &shape.items {
            ShapeItems::Dictionary(items) => {
                let removed = items.borrow_mut().shift_remove_index(index);
                debug_assert!(removed.is_some(), "property index out of range");
            }
            ShapeItems::Transition(_) => unreachable!("dictionary shape with shared items"),
        }

        shape
    }

    /// A shape with the same key at `index` but a different descriptor.
    /// Attribute changes are rare and not worth sharing, so a transition
    /// shape is first converted to a private non-transition shape.
    pub fn replace_property_descriptor(
        self: &Rc<Shape>,
        index: usize,
        property: Property,
    ) -> Rc<Shape> {
        let shape = self.convert_to_non_transition_shape();

        match &shape.items {
            ShapeItems::Dictionary(items) => match items.borrow_mut().get_index_mut(index) {
                Some((_, slot)) => *slot = property,
                None => unreachable!("property index out of range"),
            },
            ShapeItems::Transition(_) => unreachable!("dictionary shape with shared items"),
        }

        if property.is_enumerable() {
            shape.has_enumerable_property.set(true);
        }

        shape
    }

    /// A private shape with the same items that never participates in
    /// transition sharing. Idempotent. Used when an object is installed as a
    /// prototype, grows past the dictionary limit, or deletes a property.
    pub fn convert_to_non_transition_shape(self: &Rc<Shape>) -> Rc<Shape> {
        if self.is_dictionary {
            return Rc::clone(self);
        }

        let items = match &self.items {
            ShapeItems::Transition(items) => items.iter().cloned().collect::<IndexMap<_, _>>(),
            ShapeItems::Dictionary(_) => unreachable!("transition shape with private items"),
        };

        Rc::new(Shape {
            items: ShapeItems::Dictionary(RefCell::new(items)),
            parent: None,
            transitions: RefCell::new(TransitionTable::Few(Vec::new())),
            lookup: RefCell::new(None),
            has_index_key: Cell::new(self.has_index_key.get()),
            has_symbol_key: Cell::new(self.has_symbol_key.get()),
            has_enumerable_property: Cell::new(self.has_enumerable_property.get()),
            is_dictionary: true,
            limits: self.limits,
        })
    }

    fn note_new_item(&self, key: &PropertyKey, property: Property) {
        match key {
            PropertyKey::ArrayIndex(_) => self.has_index_key.set(true),
            PropertyKey::Symbol(_) => self.has_symbol_key.set(true),
            PropertyKey::String(_) => {}
        }

        if property.is_enumerable() {
            self.has_enumerable_property.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::runtime::value::StringValue;

    use super::*;

    fn key(name: &str) -> PropertyKey {
        PropertyKey::string_not_number(Rc::new(StringValue::new(name.to_string())))
    }

    fn wec() -> Property {
        Property::data(true, true, true)
    }

    #[test]
    fn identical_addition_histories_converge() {
        let root = Shape::new_root(ShapeLimits::default());

        let shape1 = root.add_property(key("a"), wec()).add_property(key("b"), wec());
        let shape2 = root.add_property(key("a"), wec()).add_property(key("b"), wec());

        assert!(Rc::ptr_eq(&shape1, &shape2));
        assert_eq!(shape1.property_count(), 2);
        assert_eq!(shape1.find_property(&key("b")), Some((1, wec())));
    }

    #[test]
    fn intermediate_shapes_survive_while_a_leaf_is_held() {
        let root = Shape::new_root(ShapeLimits::default());

        // Only the final shape of the chain is held strongly
        let leaf = root.add_property(key("a"), wec()).add_property(key("b"), wec());

        // Rebuilding the same sequence later still hits the cached edges
        let rebuilt = root.add_property(key("a"), wec()).add_property(key("b"), wec());
        assert!(Rc::ptr_eq(&leaf, &rebuilt));

        // Each shape keeps its parent alive back to the root
        let middle = leaf.parent().unwrap();
        assert_eq!(middle.property_count(), 1);
        assert!(Rc::ptr_eq(middle.parent().unwrap(), &root));
        assert!(root.parent().is_none());
    }

    #[test]
    fn different_descriptors_do_not_converge() {
        let root = Shape::new_root(ShapeLimits::default());

        let shape1 = root.add_property(key("a"), wec());
        let shape2 = root.add_property(key("a"), Property::data(false, true, true));

        assert!(!Rc::ptr_eq(&shape1, &shape2));
    }

    #[test]
    fn transition_table_promotes_to_map() {
        let limits = ShapeLimits { transition_map_threshold: 2, ..ShapeLimits::default() };
        let root = Shape::new_root(limits);

        let mut children = vec![];
        for name in ["a", "b", "c", "d"] {
            children.push(root.add_property(key(name), wec()));
        }

        assert!(root.transitions.borrow().is_map());

        // Cached edges survive the promotion
        let again = root.add_property(key("c"), wec());
        assert!(Rc::ptr_eq(&children[2], &again));
    }

    #[test]
    fn lookup_table_built_past_linear_limit() {
        let limits = ShapeLimits { linear_lookup_limit: 2, ..ShapeLimits::default() };
        let mut shape = Shape::new_root(limits);

        let names = ["a", "b", "c", "d", "e"];
        for name in names {
            shape = shape.add_property(key(name), wec());
        }

        for (index, name) in names.iter().enumerate() {
            assert_eq!(shape.find_property(&key(name)), Some((index, wec())));
        }
        assert!(shape.lookup.borrow().is_some());
        assert_eq!(shape.find_property(&key("zzz")), None);
    }

    #[test]
    fn removal_forces_dictionary_and_shifts_indices() {
        let root = Shape::new_root(ShapeLimits::default());
        let shape = root
            .add_property(key("a"), wec())
            .add_property(key("b"), wec())
            .add_property(key("c"), wec());

        let dict = shape.remove_property(1);

        assert!(dict.is_dictionary());
        assert_eq!(dict.property_count(), 2);
        assert_eq!(dict.find_property(&key("a")), Some((0, wec())));
        assert_eq!(dict.find_property(&key("b")), None);
        assert_eq!(dict.find_property(&key("c")), Some((1, wec())));

        // The original transition shape is untouched
        assert_eq!(shape.property_count(), 3);
        assert!(!shape.is_dictionary());
    }

    #[test]
    fn dictionary_additions_mutate_privately() {
        let root = Shape::new_root(ShapeLimits::default());
        let dict = root.add_property(key("a"), wec()).convert_to_non_transition_shape();

        let extended = dict.add_property(key("b"), wec());

        assert!(Rc::ptr_eq(&dict, &extended));
        assert_eq!(extended.find_property(&key("b")), Some((1, wec())));
    }

    #[test]
    fn convert_to_non_transition_is_idempotent() {
        let root = Shape::new_root(ShapeLimits::default());
        let dict = root.add_property(key("a"), wec()).convert_to_non_transition_shape();
        let again = dict.convert_to_non_transition_shape();

        assert!(Rc::ptr_eq(&dict, &again));
    }

    #[test]
    fn replace_descriptor_keeps_index_and_leaves_sharing() {
        let root = Shape::new_root(ShapeLimits::default());
        let shape = root.add_property(key("a"), wec()).add_property(key("b"), wec());

        let read_only = Property::data(false, true, true);
        let replaced = shape.replace_property_descriptor(0, read_only);

        assert!(replaced.is_dictionary());
        assert_eq!(replaced.find_property(&key("a")), Some((0, read_only)));
        assert_eq!(replaced.find_property(&key("b")), Some((1, wec())));

        // Objects still on the shared shape are unaffected
        assert_eq!(shape.find_property(&key("a")), Some((0, wec())));
    }

    #[test]
    fn dictionary_capacity_predicate() {
        let limits = ShapeLimits { dictionary_property_limit: 2, ..ShapeLimits::default() };
        let root = Shape::new_root(limits);

        let one = root.add_property(key("a"), wec());
        assert!(!one.at_dictionary_capacity());

        let two = one.add_property(key("b"), wec());
        assert!(two.at_dictionary_capacity());

        // Dictionary shapes grow without further conversion
        let dict = two.convert_to_non_transition_shape();
        assert!(!dict.at_dictionary_capacity());
    }

    #[test]
    fn summary_bits_track_key_kinds() {
        let root = Shape::new_root(ShapeLimits::default());
        assert!(!root.has_index_key());

        let shape = root
            .add_property(key("a"), Property::data(true, false, true))
            .add_property(PropertyKey::array_index(3), wec());

        assert!(shape.has_index_key());
        assert!(!shape.has_symbol_key());
        assert!(shape.has_enumerable_property());
    }
}

//! Object heap with builtin intrinsics
//!
//! `Heap` is an arena of `HeapObject`s addressed by `ObjectHandle`. A fresh
//! heap already contains the intrinsics inspection cares about: the
//! `Object`, `Function`, `Array`, `Map`, `Set`, `WeakMap`, `WeakSet` and
//! `Promise` constructors with their prototypes, the map/set/array iterator
//! prototypes, and `Symbol.toStringTag`.
//!
//! The heap also models the operations that *do* have observable effects
//! (`get`, `next`), and counts them, so callers can verify that inspection
//! never performs one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use slotview_sdk::{IterationKind, ObjectHandle, ObjectKind, PropertyKey, SymbolId, Value};
use thiserror::Error;

use crate::object::{
    CollectionKey, FxIndexMap, FxIndexSet, HeapObject, IteratorSlots, ObjectData, PromiseStatus,
    Property, ProxySlots,
};

/// Maximum prototype chain depth to prevent infinite loops.
pub(crate) const MAX_PROTOTYPE_CHAIN_DEPTH: usize = 1024;

/// Errors from heap mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeapError {
    /// The handle does not reference an allocated object
    #[error("Invalid object handle {0}")]
    InvalidHandle(ObjectHandle),

    /// The object has the wrong kind for the operation
    #[error("Object {handle} is a {actual:?}, expected {expected}")]
    WrongKind {
        /// Object that was targeted
        handle: ObjectHandle,
        /// What the operation needed
        expected: &'static str,
        /// What the object is
        actual: ObjectKind,
    },

    /// Weak collections only hold objects
    #[error("Invalid value used in weak collection: {0}")]
    InvalidWeakKey(&'static str),
}

/// One `next()` result before any allocation
enum Step {
    Yield(Value),
    Pair(Value, Value),
    Done,
}

/// Handles to the builtin objects every heap starts with
#[derive(Debug, Clone, Copy)]
pub struct Intrinsics {
    /// `Object.prototype`
    pub object_prototype: ObjectHandle,
    /// `Function.prototype`
    pub function_prototype: ObjectHandle,
    /// `Array.prototype`
    pub array_prototype: ObjectHandle,
    /// `Map.prototype`
    pub map_prototype: ObjectHandle,
    /// `Set.prototype`
    pub set_prototype: ObjectHandle,
    /// `WeakMap.prototype`
    pub weak_map_prototype: ObjectHandle,
    /// `WeakSet.prototype`
    pub weak_set_prototype: ObjectHandle,
    /// `Promise.prototype`
    pub promise_prototype: ObjectHandle,
    /// `%MapIteratorPrototype%`
    pub map_iterator_prototype: ObjectHandle,
    /// `%SetIteratorPrototype%`
    pub set_iterator_prototype: ObjectHandle,
    /// `%ArrayIteratorPrototype%`
    pub array_iterator_prototype: ObjectHandle,
    /// `Symbol.toStringTag`
    pub to_string_tag: SymbolId,
}

/// Arena of heap objects
#[derive(Debug)]
pub struct Heap {
    objects: Vec<HeapObject>,
    symbols: Vec<Option<Arc<str>>>,
    intrinsics: Intrinsics,
    effects: AtomicUsize,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    /// Create a heap populated with intrinsics
    pub fn new() -> Self {
        let placeholder = ObjectHandle(0);
        let mut heap = Heap {
            objects: Vec::new(),
            symbols: Vec::new(),
            intrinsics: Intrinsics {
                object_prototype: placeholder,
                function_prototype: placeholder,
                array_prototype: placeholder,
                map_prototype: placeholder,
                set_prototype: placeholder,
                weak_map_prototype: placeholder,
                weak_set_prototype: placeholder,
                promise_prototype: placeholder,
                map_iterator_prototype: placeholder,
                set_iterator_prototype: placeholder,
                array_iterator_prototype: placeholder,
                to_string_tag: SymbolId(0),
            },
            effects: AtomicUsize::new(0),
        };
        heap.bootstrap();
        heap
    }

    fn bootstrap(&mut self) {
        let to_string_tag = self.alloc_symbol(Some("Symbol.toStringTag"));
        let object_prototype = self.push(HeapObject::new(None, ObjectData::Ordinary));
        let function_prototype = self.push(HeapObject::new(
            Some(object_prototype),
            ObjectData::Function {
                name: String::new(),
            },
        ));
        self.intrinsics.object_prototype = object_prototype;
        self.intrinsics.function_prototype = function_prototype;
        self.intrinsics.to_string_tag = to_string_tag;

        self.install_constructor("Object", object_prototype);
        self.install_constructor("Function", function_prototype);

        self.intrinsics.array_prototype = self.install_class("Array", ObjectData::Array, None);
        self.intrinsics.map_prototype = self.install_class("Map", ObjectData::Ordinary, Some("Map"));
        self.intrinsics.set_prototype = self.install_class("Set", ObjectData::Ordinary, Some("Set"));
        self.intrinsics.weak_map_prototype =
            self.install_class("WeakMap", ObjectData::Ordinary, Some("WeakMap"));
        self.intrinsics.weak_set_prototype =
            self.install_class("WeakSet", ObjectData::Ordinary, Some("WeakSet"));
        self.intrinsics.promise_prototype =
            self.install_class("Promise", ObjectData::Ordinary, Some("Promise"));

        self.intrinsics.map_iterator_prototype = self.install_tagged_prototype("Map Iterator");
        self.intrinsics.set_iterator_prototype = self.install_tagged_prototype("Set Iterator");
        self.intrinsics.array_iterator_prototype = self.install_tagged_prototype("Array Iterator");
    }

    /// Allocate a prototype object plus its named constructor
    fn install_class(
        &mut self,
        name: &str,
        prototype_data: ObjectData,
        tag: Option<&str>,
    ) -> ObjectHandle {
        let proto = self.push(HeapObject::new(
            Some(self.intrinsics.object_prototype),
            prototype_data,
        ));
        if let Some(tag) = tag {
            self.put(proto, self.intrinsics.to_string_tag.into(), Property::Data {
                value: Value::from(tag),
                enumerable: false,
                writable: false,
            });
        }
        self.install_constructor(name, proto);
        proto
    }

    fn install_tagged_prototype(&mut self, tag: &str) -> ObjectHandle {
        let proto = self.push(HeapObject::new(
            Some(self.intrinsics.object_prototype),
            ObjectData::Ordinary,
        ));
        self.put(proto, self.intrinsics.to_string_tag.into(), Property::Data {
            value: Value::from(tag),
            enumerable: false,
            writable: false,
        });
        proto
    }

    /// Create a constructor function wired to `proto` in both directions
    fn install_constructor(&mut self, name: &str, proto: ObjectHandle) -> ObjectHandle {
        let ctor = self.push(HeapObject::new(
            Some(self.intrinsics.function_prototype),
            ObjectData::Function {
                name: name.to_string(),
            },
        ));
        self.put(ctor, "prototype".into(), Property::Data {
            value: proto.into(),
            enumerable: false,
            writable: false,
        });
        self.put(proto, "constructor".into(), Property::hidden(ctor));
        ctor
    }

    fn push(&mut self, object: HeapObject) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len() as u32);
        self.objects.push(object);
        handle
    }

    /// Insert without kind checks; only for handles this heap just created
    fn put(&mut self, handle: ObjectHandle, key: PropertyKey, property: Property) {
        self.objects[handle.0 as usize].properties.insert(key, property);
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Builtin handles
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// Look up an object
    pub fn get_object(&self, handle: ObjectHandle) -> Result<&HeapObject, HeapError> {
        self.objects
            .get(handle.0 as usize)
            .ok_or(HeapError::InvalidHandle(handle))
    }

    fn get_object_mut(&mut self, handle: ObjectHandle) -> Result<&mut HeapObject, HeapError> {
        self.objects
            .get_mut(handle.0 as usize)
            .ok_or(HeapError::InvalidHandle(handle))
    }

    /// Number of allocated objects, intrinsics included
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always false: intrinsics are allocated eagerly
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Description of a symbol
    pub fn symbol_description(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id.0 as usize).and_then(|d| d.as_deref())
    }

    /// Count of user-observable operations performed so far
    /// (accessor calls, proxy traps, iterator steps)
    pub fn observable_effects(&self) -> usize {
        self.effects.load(Ordering::Relaxed)
    }

    fn record_effect(&self) {
        self.effects.fetch_add(1, Ordering::Relaxed);
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Allocate a new unique symbol
    pub fn alloc_symbol(&mut self, description: Option<&str>) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(description.map(Arc::from));
        id
    }

    /// `{}`
    pub fn alloc_object(&mut self) -> ObjectHandle {
        self.alloc_object_with_proto(Some(self.intrinsics.object_prototype))
    }

    /// `Object.create(proto)`
    pub fn alloc_object_with_proto(&mut self, proto: Option<ObjectHandle>) -> ObjectHandle {
        self.push(HeapObject::new(proto, ObjectData::Ordinary))
    }

    /// A plain function (also usable as a getter)
    pub fn alloc_function(&mut self, name: &str) -> ObjectHandle {
        self.push(HeapObject::new(
            Some(self.intrinsics.function_prototype),
            ObjectData::Function {
                name: name.to_string(),
            },
        ))
    }

    /// `class Name extends Parent {}`; returns the constructor
    ///
    /// `parent` must be a constructor; its `prototype` becomes the new
    /// prototype's parent. Without a parent, `Object.prototype` is used.
    pub fn alloc_class(
        &mut self,
        name: &str,
        parent: Option<ObjectHandle>,
    ) -> Result<ObjectHandle, HeapError> {
        let parent_proto = match parent {
            Some(parent) => self.constructor_prototype(parent)?,
            None => self.intrinsics.object_prototype,
        };
        let proto = self.push(HeapObject::new(Some(parent_proto), ObjectData::Ordinary));
        Ok(self.install_constructor(name, proto))
    }

    /// `new Ctor()` for a constructor created by `alloc_class`
    pub fn alloc_instance(&mut self, ctor: ObjectHandle) -> Result<ObjectHandle, HeapError> {
        let proto = self.constructor_prototype(ctor)?;
        Ok(self.alloc_object_with_proto(Some(proto)))
    }

    fn constructor_prototype(&self, ctor: ObjectHandle) -> Result<ObjectHandle, HeapError> {
        let object = self.get_object(ctor)?;
        object
            .properties
            .get(&PropertyKey::from("prototype"))
            .and_then(Property::data_value)
            .and_then(Value::as_object)
            .ok_or(HeapError::WrongKind {
                handle: ctor,
                expected: "constructor",
                actual: object.data.kind(),
            })
    }

    /// `[a, b, c]`
    pub fn alloc_array(&mut self, elements: Vec<Value>) -> ObjectHandle {
        let len = elements.len();
        let array = self.push(HeapObject::new(
            Some(self.intrinsics.array_prototype),
            ObjectData::Array,
        ));
        for (index, element) in elements.into_iter().enumerate() {
            self.put(array, index.to_string().into(), Property::data(element));
        }
        self.put(array, "length".into(), Property::hidden(len as f64));
        array
    }

    /// `new Proxy(target, handler)`
    pub fn alloc_proxy(
        &mut self,
        target: ObjectHandle,
        handler: ObjectHandle,
    ) -> Result<ObjectHandle, HeapError> {
        self.get_object(target)?;
        self.get_object(handler)?;
        Ok(self.push(HeapObject::new(
            None,
            ObjectData::Proxy(ProxySlots {
                target: Some(target),
                handler: Some(handler),
            }),
        )))
    }

    /// `new Map()`
    pub fn alloc_map(&mut self) -> ObjectHandle {
        self.push(HeapObject::new(
            Some(self.intrinsics.map_prototype),
            ObjectData::Map(FxIndexMap::default()),
        ))
    }

    /// `new Set()`
    pub fn alloc_set(&mut self) -> ObjectHandle {
        self.push(HeapObject::new(
            Some(self.intrinsics.set_prototype),
            ObjectData::Set(FxIndexSet::default()),
        ))
    }

    /// `new WeakMap()`
    pub fn alloc_weak_map(&mut self) -> ObjectHandle {
        self.push(HeapObject::new(
            Some(self.intrinsics.weak_map_prototype),
            ObjectData::WeakMap(FxIndexMap::default()),
        ))
    }

    /// `new WeakSet()`
    pub fn alloc_weak_set(&mut self) -> ObjectHandle {
        self.push(HeapObject::new(
            Some(self.intrinsics.weak_set_prototype),
            ObjectData::WeakSet(FxIndexSet::default()),
        ))
    }

    /// `map.keys()` / `map.values()` / `map.entries()`
    pub fn alloc_map_iterator(
        &mut self,
        map: ObjectHandle,
        kind: IterationKind,
    ) -> Result<ObjectHandle, HeapError> {
        self.expect_kind(map, ObjectKind::Map, "Map")?;
        Ok(self.alloc_iterator(
            ObjectKind::MapIterator,
            self.intrinsics.map_iterator_prototype,
            map.into(),
            kind,
        ))
    }

    /// `set.values()` / `set.keys()` / `set.entries()`
    ///
    /// Set iterators conflate keys and values, so `Keys` is stored as
    /// `Values`.
    pub fn alloc_set_iterator(
        &mut self,
        set: ObjectHandle,
        kind: IterationKind,
    ) -> Result<ObjectHandle, HeapError> {
        self.expect_kind(set, ObjectKind::Set, "Set")?;
        let kind = match kind {
            IterationKind::Keys => IterationKind::Values,
            other => other,
        };
        Ok(self.alloc_iterator(
            ObjectKind::SetIterator,
            self.intrinsics.set_iterator_prototype,
            set.into(),
            kind,
        ))
    }

    /// `array.values()` and friends
    pub fn alloc_array_iterator(
        &mut self,
        array: ObjectHandle,
        kind: IterationKind,
    ) -> Result<ObjectHandle, HeapError> {
        self.expect_kind(array, ObjectKind::Array, "Array")?;
        Ok(self.alloc_iterator(
            ObjectKind::ArrayIterator,
            self.intrinsics.array_iterator_prototype,
            array.into(),
            kind,
        ))
    }

    fn alloc_iterator(
        &mut self,
        tag: ObjectKind,
        proto: ObjectHandle,
        iterated: Value,
        kind: IterationKind,
    ) -> ObjectHandle {
        self.push(HeapObject::new(
            Some(proto),
            ObjectData::Iterator(
                tag,
                IteratorSlots {
                    iterated,
                    kind,
                    position: 0,
                    done: false,
                },
            ),
        ))
    }

    /// A promise in the given state
    pub fn alloc_promise(&mut self, status: PromiseStatus, result: Value) -> ObjectHandle {
        self.push(HeapObject::new(
            Some(self.intrinsics.promise_prototype),
            ObjectData::Promise { status, result },
        ))
    }

    /// Wrap a host pointer
    pub fn alloc_external(&mut self, pointer: u64) -> ObjectHandle {
        self.push(HeapObject::new(None, ObjectData::External(pointer)))
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// `Object.defineProperty(obj, key, desc)`; replaces in place, keeping
    /// the original insertion position
    pub fn define_property(
        &mut self,
        handle: ObjectHandle,
        key: impl Into<PropertyKey>,
        property: Property,
    ) -> Result<(), HeapError> {
        let object = self.get_object_mut(handle)?;
        if let ObjectData::Proxy(_) = object.data {
            return Err(HeapError::WrongKind {
                handle,
                expected: "non-proxy object",
                actual: ObjectKind::Proxy,
            });
        }
        object.properties.insert(key.into(), property);
        Ok(())
    }

    /// `obj[key] = value` for a fresh enumerable data property
    pub fn set_property(
        &mut self,
        handle: ObjectHandle,
        key: impl Into<PropertyKey>,
        value: impl Into<Value>,
    ) -> Result<(), HeapError> {
        self.define_property(handle, key, Property::data(value))
    }

    /// `delete obj[key]`
    pub fn delete_property(
        &mut self,
        handle: ObjectHandle,
        key: &PropertyKey,
    ) -> Result<bool, HeapError> {
        Ok(self
            .get_object_mut(handle)?
            .properties
            .shift_remove(key)
            .is_some())
    }

    /// `Proxy.revocable(...).revoke()`; idempotent
    pub fn revoke_proxy(&mut self, proxy: ObjectHandle) -> Result<(), HeapError> {
        let object = self.get_object_mut(proxy)?;
        match &mut object.data {
            ObjectData::Proxy(slots) => {
                slots.target = None;
                slots.handler = None;
                Ok(())
            }
            other => Err(HeapError::WrongKind {
                handle: proxy,
                expected: "Proxy",
                actual: other.kind(),
            }),
        }
    }

    /// `map.set(key, value)`
    pub fn map_set(
        &mut self,
        map: ObjectHandle,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<(), HeapError> {
        match &mut self.get_object_mut(map)?.data {
            ObjectData::Map(entries) => {
                entries.insert(CollectionKey(key.into()), value.into());
                Ok(())
            }
            other => Err(HeapError::WrongKind {
                handle: map,
                expected: "Map",
                actual: other.kind(),
            }),
        }
    }

    /// `map.delete(key)`
    pub fn map_delete(
        &mut self,
        map: ObjectHandle,
        key: impl Into<Value>,
    ) -> Result<bool, HeapError> {
        match &mut self.get_object_mut(map)?.data {
            ObjectData::Map(entries) => {
                Ok(entries.shift_remove(&CollectionKey(key.into())).is_some())
            }
            other => Err(HeapError::WrongKind {
                handle: map,
                expected: "Map",
                actual: other.kind(),
            }),
        }
    }

    /// `set.add(value)`
    pub fn set_add(&mut self, set: ObjectHandle, value: impl Into<Value>) -> Result<(), HeapError> {
        match &mut self.get_object_mut(set)?.data {
            ObjectData::Set(values) => {
                values.insert(CollectionKey(value.into()));
                Ok(())
            }
            other => Err(HeapError::WrongKind {
                handle: set,
                expected: "Set",
                actual: other.kind(),
            }),
        }
    }

    /// `weakMap.set(key, value)`
    pub fn weak_map_set(
        &mut self,
        weak_map: ObjectHandle,
        key: Value,
        value: impl Into<Value>,
    ) -> Result<(), HeapError> {
        let key = key
            .as_object()
            .ok_or(HeapError::InvalidWeakKey(key.type_name()))?;
        match &mut self.get_object_mut(weak_map)?.data {
            ObjectData::WeakMap(entries) => {
                entries.insert(key, value.into());
                Ok(())
            }
            other => Err(HeapError::WrongKind {
                handle: weak_map,
                expected: "WeakMap",
                actual: other.kind(),
            }),
        }
    }

    /// `weakSet.add(value)`
    pub fn weak_set_add(&mut self, weak_set: ObjectHandle, value: Value) -> Result<(), HeapError> {
        let value = value
            .as_object()
            .ok_or(HeapError::InvalidWeakKey(value.type_name()))?;
        match &mut self.get_object_mut(weak_set)?.data {
            ObjectData::WeakSet(values) => {
                values.insert(value);
                Ok(())
            }
            other => Err(HeapError::WrongKind {
                handle: weak_set,
                expected: "WeakSet",
                actual: other.kind(),
            }),
        }
    }

    fn expect_kind(
        &self,
        handle: ObjectHandle,
        kind: ObjectKind,
        expected: &'static str,
    ) -> Result<(), HeapError> {
        let actual = self.get_object(handle)?.data.kind();
        if actual == kind {
            Ok(())
        } else {
            Err(HeapError::WrongKind {
                handle,
                expected,
                actual,
            })
        }
    }

    // ========================================================================
    // Observable operations
    // ========================================================================

    /// Ordinary `[[Get]]`: runs accessors and proxy traps, walking the
    /// prototype chain. Each accessor call or trap counts as an effect.
    ///
    /// Functions are not executed; an accessor evaluates to `undefined`.
    pub fn get(&self, handle: ObjectHandle, key: &PropertyKey) -> Result<Value, HeapError> {
        let mut current = Some(handle);
        let mut depth = 0;
        while let Some(h) = current {
            if depth >= MAX_PROTOTYPE_CHAIN_DEPTH {
                break;
            }
            let object = self.get_object(h)?;
            if let ObjectData::Proxy(slots) = &object.data {
                // the `get` trap (or the forwarding default) runs either way
                self.record_effect();
                current = slots.target;
                depth += 1;
                continue;
            }
            match object.properties.get(key) {
                Some(Property::Data { value, .. }) => return Ok(value.clone()),
                Some(Property::Accessor { getter, .. }) => {
                    if getter.is_some() {
                        self.record_effect();
                    }
                    return Ok(Value::Undefined);
                }
                None => {
                    current = object.prototype;
                    depth += 1;
                }
            }
        }
        Ok(Value::Undefined)
    }

    /// `iterator.next()`: advances the iterator and returns the yielded
    /// value, or `None` when done
    pub fn next(&mut self, iterator: ObjectHandle) -> Result<Option<Value>, HeapError> {
        let (iterated, kind, position) = match &self.get_object(iterator)?.data {
            ObjectData::Iterator(_, slots) if slots.done => return Ok(None),
            ObjectData::Iterator(_, slots) => (slots.iterated.clone(), slots.kind, slots.position),
            other => {
                return Err(HeapError::WrongKind {
                    handle: iterator,
                    expected: "Iterator",
                    actual: other.kind(),
                })
            }
        };
        self.record_effect();

        let iterated_handle = iterated.as_object().ok_or(HeapError::WrongKind {
            handle: iterator,
            expected: "Iterator over an object",
            actual: ObjectKind::Ordinary,
        })?;
        let step = match &self.get_object(iterated_handle)?.data {
            ObjectData::Map(entries) => match entries.get_index(position) {
                Some((k, v)) => match kind {
                    IterationKind::Keys => Step::Yield(k.0.clone()),
                    IterationKind::Values => Step::Yield(v.clone()),
                    IterationKind::Entries => Step::Pair(k.0.clone(), v.clone()),
                },
                None => Step::Done,
            },
            ObjectData::Set(values) => match values.get_index(position) {
                Some(v) if kind == IterationKind::Entries => Step::Pair(v.0.clone(), v.0.clone()),
                Some(v) => Step::Yield(v.0.clone()),
                None => Step::Done,
            },
            ObjectData::Array => {
                let element = self
                    .get_object(iterated_handle)?
                    .properties
                    .get(&PropertyKey::from(position.to_string()))
                    .and_then(Property::data_value)
                    .cloned();
                let index = Value::Number(position as f64);
                match (element, kind) {
                    (Some(_), IterationKind::Keys) => Step::Yield(index),
                    (Some(element), IterationKind::Values) => Step::Yield(element),
                    (Some(element), IterationKind::Entries) => Step::Pair(index, element),
                    (None, _) => Step::Done,
                }
            }
            _ => Step::Done,
        };

        let yielded = match step {
            Step::Yield(value) => Some(value),
            Step::Pair(first, second) => Some(Value::Object(self.alloc_array(vec![first, second]))),
            Step::Done => None,
        };

        if let ObjectData::Iterator(_, slots) = &mut self.get_object_mut(iterator)?.data {
            match yielded {
                Some(_) => slots.position += 1,
                None => slots.done = true,
            }
        }
        Ok(yielded)
    }

    /// Current position of an iterator, `None` once exhausted
    pub fn iterator_position(&self, iterator: ObjectHandle) -> Result<Option<usize>, HeapError> {
        match &self.get_object(iterator)?.data {
            ObjectData::Iterator(_, slots) => Ok((!slots.done).then_some(slots.position)),
            other => Err(HeapError::WrongKind {
                handle: iterator,
                expected: "Iterator",
                actual: other.kind(),
            }),
        }
    }
}

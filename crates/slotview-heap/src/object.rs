//! Heap object layout
//!
//! Every object has a prototype, an insertion-ordered property table and a
//! kind-specific payload holding its internal slots.

use std::hash::{BuildHasherDefault, Hash, Hasher};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;
use slotview_sdk::{IterationKind, ObjectHandle, ObjectKind, PropertyKey, Value};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Insertion-ordered map with Fx hashing
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set with Fx hashing
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// An own property slot
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// Data property
    Data {
        /// `[[Value]]`
        value: Value,
        /// `[[Enumerable]]`
        enumerable: bool,
        /// `[[Writable]]`
        writable: bool,
    },
    /// Accessor property
    Accessor {
        /// `[[Get]]` function
        getter: Option<ObjectHandle>,
        /// `[[Set]]` function
        setter: Option<ObjectHandle>,
        /// `[[Enumerable]]`
        enumerable: bool,
    },
}

impl Property {
    /// Writable, enumerable data property
    pub fn data(value: impl Into<Value>) -> Self {
        Property::Data {
            value: value.into(),
            enumerable: true,
            writable: true,
        }
    }

    /// Writable, non-enumerable data property (how builtins install methods)
    pub fn hidden(value: impl Into<Value>) -> Self {
        Property::Data {
            value: value.into(),
            enumerable: false,
            writable: true,
        }
    }

    /// Enumerable accessor with only a getter
    pub fn getter(getter: ObjectHandle) -> Self {
        Property::Accessor {
            getter: Some(getter),
            setter: None,
            enumerable: true,
        }
    }

    /// `[[Enumerable]]`
    pub fn is_enumerable(&self) -> bool {
        match self {
            Property::Data { enumerable, .. } | Property::Accessor { enumerable, .. } => {
                *enumerable
            }
        }
    }

    /// Check for an accessor descriptor
    pub fn is_accessor(&self) -> bool {
        matches!(self, Property::Accessor { .. })
    }

    /// Value of a data property; `None` for accessors
    pub fn data_value(&self) -> Option<&Value> {
        match self {
            Property::Data { value, .. } => Some(value),
            Property::Accessor { .. } => None,
        }
    }
}

/// Wrapper giving `Value` SameValueZero hashing and equality so it can key
/// a `Map` or live in a `Set`.
///
/// Strings compare by content, `NaN` equals `NaN`, and `+0` equals `-0`.
#[derive(Debug, Clone)]
pub struct CollectionKey(pub Value);

impl CollectionKey {
    fn number_bits(n: f64) -> u64 {
        if n.is_nan() {
            f64::NAN.to_bits()
        } else if n == 0.0 {
            0.0f64.to_bits()
        } else {
            n.to_bits()
        }
    }
}

impl Hash for CollectionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(&self.0).hash(state);
        match &self.0 {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => Self::number_bits(*n).hash(state),
            Value::BigInt(n) => n.hash(state),
            Value::String(s) => s.hash(state),
            Value::Symbol(id) => id.hash(state),
            Value::Object(h) => h.hash(state),
        }
    }
}

impl PartialEq for CollectionKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Number(a), Value::Number(b)) => {
                Self::number_bits(*a) == Self::number_bits(*b)
            }
            (a, b) => a == b,
        }
    }
}

impl Eq for CollectionKey {}

/// `[[ProxyTarget]]` and `[[ProxyHandler]]`; both `None` once revoked
#[derive(Debug, Clone, PartialEq)]
pub struct ProxySlots {
    /// Wrapped target
    pub target: Option<ObjectHandle>,
    /// Handler holding the traps
    pub handler: Option<ObjectHandle>,
}

/// Builtin iterator slots
#[derive(Debug, Clone, PartialEq)]
pub struct IteratorSlots {
    /// `[[IteratedObject]]`
    pub iterated: Value,
    /// `[[Kind]]`
    pub kind: IterationKind,
    /// Next position to yield
    pub position: usize,
    /// Set once `next()` has reported completion
    pub done: bool,
}

/// Promise settlement state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseStatus {
    /// Not yet settled
    Pending,
    /// Resolved with a value
    Fulfilled,
    /// Rejected with a reason
    Rejected,
}

/// Kind-specific internal state
#[derive(Debug, Clone)]
pub enum ObjectData {
    /// Plain object
    Ordinary,
    /// Function with its `name`
    Function {
        /// Function name, may be empty
        name: String,
    },
    /// Array; elements live in the property table under index keys
    Array,
    /// Proxy exotic object
    Proxy(ProxySlots),
    /// `Map` contents
    Map(FxIndexMap<CollectionKey, Value>),
    /// `Set` contents
    Set(FxIndexSet<CollectionKey>),
    /// `WeakMap` contents (never exposed)
    WeakMap(FxIndexMap<ObjectHandle, Value>),
    /// `WeakSet` contents (never exposed)
    WeakSet(FxIndexSet<ObjectHandle>),
    /// Builtin iterator; `ObjectKind` distinguishes map/set/array/string
    Iterator(ObjectKind, IteratorSlots),
    /// Promise state and result
    Promise {
        /// `[[PromiseState]]`
        status: PromiseStatus,
        /// `[[PromiseResult]]`
        result: Value,
    },
    /// Opaque host pointer
    External(u64),
}

impl ObjectData {
    /// Host type tag for this payload
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectData::Ordinary => ObjectKind::Ordinary,
            ObjectData::Function { .. } => ObjectKind::Function,
            ObjectData::Array => ObjectKind::Array,
            ObjectData::Proxy(_) => ObjectKind::Proxy,
            ObjectData::Map(_) => ObjectKind::Map,
            ObjectData::Set(_) => ObjectKind::Set,
            ObjectData::WeakMap(_) => ObjectKind::WeakMap,
            ObjectData::WeakSet(_) => ObjectKind::WeakSet,
            ObjectData::Iterator(kind, _) => *kind,
            ObjectData::Promise { .. } => ObjectKind::Promise,
            ObjectData::External(_) => ObjectKind::External,
        }
    }
}

/// A heap-allocated object
#[derive(Debug, Clone)]
pub struct HeapObject {
    /// `[[Prototype]]`
    pub prototype: Option<ObjectHandle>,
    /// Own properties in insertion order
    pub properties: FxIndexMap<PropertyKey, Property>,
    /// Internal slots
    pub data: ObjectData,
}

impl HeapObject {
    /// Create an object with no own properties
    pub fn new(prototype: Option<ObjectHandle>, data: ObjectData) -> Self {
        Self {
            prototype,
            properties: FxIndexMap::default(),
            data,
        }
    }
}

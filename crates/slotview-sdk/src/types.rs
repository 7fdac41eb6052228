//! Object kinds, iteration kinds and property attributes
//!
//! These are the host's answers to "what is this object" and "how is this
//! property declared". They carry no references into host memory.

use serde::{Deserialize, Serialize};

/// Category of a host object, as reported by the host's own type tags.
///
/// The classification never consults user-visible state (`instanceof`,
/// `Symbol.toStringTag`, proxy traps): a proxy wrapping a `Map` is a
/// `Proxy`, not a `Map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Plain object or class instance
    Ordinary,
    /// Callable object
    Function,
    /// Array exotic object
    Array,
    /// Proxy exotic object (live or revoked)
    Proxy,
    /// `Map`
    Map,
    /// `Set`
    Set,
    /// `WeakMap`
    WeakMap,
    /// `WeakSet`
    WeakSet,
    /// `%MapIteratorPrototype%` instance
    MapIterator,
    /// `%SetIteratorPrototype%` instance
    SetIterator,
    /// `%ArrayIteratorPrototype%` instance
    ArrayIterator,
    /// `%StringIteratorPrototype%` instance
    StringIterator,
    /// `Promise`
    Promise,
    /// Host-owned external pointer wrapper
    External,
}

impl ObjectKind {
    /// Builtin tag used by `Object.prototype.toString`
    pub fn builtin_tag(self) -> &'static str {
        match self {
            ObjectKind::Ordinary | ObjectKind::Proxy | ObjectKind::External => "Object",
            ObjectKind::Function => "Function",
            ObjectKind::Array => "Array",
            ObjectKind::Map => "Map",
            ObjectKind::Set => "Set",
            ObjectKind::WeakMap => "WeakMap",
            ObjectKind::WeakSet => "WeakSet",
            ObjectKind::MapIterator => "Map Iterator",
            ObjectKind::SetIterator => "Set Iterator",
            ObjectKind::ArrayIterator => "Array Iterator",
            ObjectKind::StringIterator => "String Iterator",
            ObjectKind::Promise => "Promise",
        }
    }

    /// Check if objects of this kind carry iterator slots
    pub fn is_iterator(self) -> bool {
        matches!(
            self,
            ObjectKind::MapIterator
                | ObjectKind::SetIterator
                | ObjectKind::ArrayIterator
                | ObjectKind::StringIterator
        )
    }

    /// Check if this is a weak collection
    pub fn is_weak_collection(self) -> bool {
        matches!(self, ObjectKind::WeakMap | ObjectKind::WeakSet)
    }
}

/// Projection an iterator yields, read from its `[[Kind]]` slot.
///
/// Raw slot encoding:
///
/// | Raw | Map iterator | Set iterator |
/// |-----|--------------|--------------|
/// | 0   | keys         | -            |
/// | 1   | values       | keys, values |
/// | 2   | entries      | entries      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IterationKind {
    /// `map.keys()`
    Keys,
    /// `map.values()`, `set.values()`, `set.keys()`
    Values,
    /// `map.entries()`, `set.entries()`
    Entries,
}

impl IterationKind {
    /// Decode the raw `[[Kind]]` slot value
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(IterationKind::Keys),
            1 => Some(IterationKind::Values),
            2 => Some(IterationKind::Entries),
            _ => None,
        }
    }

    /// Raw `[[Kind]]` slot value
    pub fn as_raw(self) -> u8 {
        match self {
            IterationKind::Keys => 0,
            IterationKind::Values => 1,
            IterationKind::Entries => 2,
        }
    }
}

/// Attributes of an own property descriptor that matter for inspection.
///
/// Values are deliberately absent: reading a value could mean running an
/// accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    /// `[[Enumerable]]`
    pub enumerable: bool,
    /// `true` for accessor descriptors
    pub accessor: bool,
}

impl PropertyAttributes {
    /// Enumerable data property
    pub const fn enumerable() -> Self {
        Self {
            enumerable: true,
            accessor: false,
        }
    }

    /// Non-enumerable data property
    pub const fn hidden() -> Self {
        Self {
            enumerable: false,
            accessor: false,
        }
    }
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self::enumerable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_kind_raw() {
        for kind in [IterationKind::Keys, IterationKind::Values, IterationKind::Entries] {
            assert_eq!(IterationKind::from_raw(kind.as_raw()), Some(kind));
        }
        assert_eq!(IterationKind::from_raw(3), None);
    }

    #[test]
    fn test_builtin_tags() {
        assert_eq!(ObjectKind::Ordinary.builtin_tag(), "Object");
        assert_eq!(ObjectKind::Proxy.builtin_tag(), "Object");
        assert_eq!(ObjectKind::MapIterator.builtin_tag(), "Map Iterator");
        assert_eq!(ObjectKind::WeakSet.builtin_tag(), "WeakSet");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(ObjectKind::SetIterator.is_iterator());
        assert!(ObjectKind::StringIterator.is_iterator());
        assert!(!ObjectKind::Set.is_iterator());
        assert!(ObjectKind::WeakMap.is_weak_collection());
        assert!(!ObjectKind::Map.is_weak_collection());
    }
}

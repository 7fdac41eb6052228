//! Host capability implementation for `Heap`
//!
//! Every read here goes straight to property tables and internal slots.
//! Accessors are never called and proxies are never looked through, so
//! `Heap::observable_effects` is left untouched.

use std::sync::Arc;

use slotview_sdk::{
    HostError, HostResult, IterationKind, ObjectHandle, ObjectKind, ObjectModel,
    PropertyAttributes, PropertyKey, RuntimeIntrospector, SymbolId, Value,
};

use crate::heap::{Heap, HeapError, MAX_PROTOTYPE_CHAIN_DEPTH};
use crate::object::{HeapObject, IteratorSlots, ObjectData, Property, ProxySlots};

impl From<HeapError> for HostError {
    fn from(err: HeapError) -> Self {
        match err {
            HeapError::InvalidHandle(handle) => HostError::InvalidHandle(handle),
            HeapError::WrongKind { handle, expected, .. } => HostError::MissingSlot {
                handle,
                slot: expected,
            },
            HeapError::InvalidWeakKey(type_name) => HostError::NotAnObject(type_name),
        }
    }
}

fn attributes(property: &Property) -> PropertyAttributes {
    PropertyAttributes {
        enumerable: property.is_enumerable(),
        accessor: property.is_accessor(),
    }
}

impl Heap {
    fn lookup(&self, handle: ObjectHandle) -> HostResult<&HeapObject> {
        Ok(self.get_object(handle)?)
    }

    /// Follow the prototype chain looking for a data property, without
    /// calling accessors or entering proxies.
    ///
    /// Stops (returning `None`) at the first accessor or proxy.
    fn find_data_property(
        &self,
        handle: ObjectHandle,
        key: &PropertyKey,
    ) -> HostResult<Option<Value>> {
        let mut current = Some(handle);
        for _ in 0..MAX_PROTOTYPE_CHAIN_DEPTH {
            let Some(h) = current else {
                return Ok(None);
            };
            let object = self.lookup(h)?;
            if let ObjectData::Proxy(_) = object.data {
                return Ok(None);
            }
            match object.properties.get(key) {
                Some(Property::Data { value, .. }) => return Ok(Some(value.clone())),
                Some(Property::Accessor { .. }) => return Ok(None),
                None => current = object.prototype,
            }
        }
        Ok(None)
    }

    fn iterator_slots(
        &self,
        iterator: ObjectHandle,
        slot: &'static str,
    ) -> HostResult<&IteratorSlots> {
        match &self.lookup(iterator)?.data {
            ObjectData::Iterator(_, slots) => Ok(slots),
            _ => Err(HostError::MissingSlot {
                handle: iterator,
                slot,
            }),
        }
    }

    fn proxy_slots(&self, proxy: ObjectHandle, slot: &'static str) -> HostResult<&ProxySlots> {
        match &self.lookup(proxy)?.data {
            ObjectData::Proxy(slots) => Ok(slots),
            _ => Err(HostError::MissingSlot {
                handle: proxy,
                slot,
            }),
        }
    }
}

impl ObjectModel for Heap {
    fn object_kind(&self, handle: ObjectHandle) -> HostResult<ObjectKind> {
        Ok(self.lookup(handle)?.data.kind())
    }

    /// Array indices ascending, then the remaining string keys in insertion
    /// order. A proxy has no property storage of its own and reports none.
    fn own_string_properties(
        &self,
        handle: ObjectHandle,
    ) -> HostResult<Vec<(Arc<str>, PropertyAttributes)>> {
        let object = self.lookup(handle)?;
        let mut indices: Vec<(u32, Arc<str>, PropertyAttributes)> = Vec::new();
        let mut names: Vec<(Arc<str>, PropertyAttributes)> = Vec::new();

        for (key, property) in &object.properties {
            if let PropertyKey::String(name) = key {
                match key.array_index() {
                    Some(index) => indices.push((index, name.clone(), attributes(property))),
                    None => names.push((name.clone(), attributes(property))),
                }
            }
        }

        indices.sort_by_key(|(index, _, _)| *index);
        let mut result: Vec<_> = indices
            .into_iter()
            .map(|(_, name, attrs)| (name, attrs))
            .collect();
        result.extend(names);
        Ok(result)
    }

    fn own_symbol_properties(
        &self,
        handle: ObjectHandle,
    ) -> HostResult<Vec<(SymbolId, PropertyAttributes)>> {
        let object = self.lookup(handle)?;
        Ok(object
            .properties
            .iter()
            .filter_map(|(key, property)| match key {
                PropertyKey::Symbol(id) => Some((*id, attributes(property))),
                PropertyKey::String(_) => None,
            })
            .collect())
    }

    fn constructor_name(&self, handle: ObjectHandle) -> HostResult<Option<String>> {
        let ctor = self.find_data_property(handle, &PropertyKey::from("constructor"))?;
        let Some(Value::Object(ctor)) = ctor else {
            return Ok(None);
        };
        match &self.lookup(ctor)?.data {
            ObjectData::Function { name } if !name.is_empty() => Ok(Some(name.clone())),
            _ => Ok(None),
        }
    }

    fn to_string_tag(&self, handle: ObjectHandle) -> HostResult<String> {
        let kind = self.lookup(handle)?.data.kind();
        let tag_key = PropertyKey::Symbol(self.intrinsics().to_string_tag);
        let tag = match self.find_data_property(handle, &tag_key)? {
            Some(Value::String(tag)) => tag.to_string(),
            _ => kind.builtin_tag().to_string(),
        };
        Ok(format!("[object {}]", tag))
    }

    fn map_entries(
        &self,
        map: ObjectHandle,
        limit: Option<usize>,
    ) -> HostResult<Vec<(Value, Value)>> {
        match &self.lookup(map)?.data {
            ObjectData::Map(entries) => Ok(entries
                .iter()
                .take(limit.unwrap_or(usize::MAX))
                .map(|(k, v)| (k.0.clone(), v.clone()))
                .collect()),
            _ => Err(HostError::MissingSlot {
                handle: map,
                slot: "MapData",
            }),
        }
    }

    fn set_values(&self, set: ObjectHandle, limit: Option<usize>) -> HostResult<Vec<Value>> {
        match &self.lookup(set)?.data {
            ObjectData::Set(values) => Ok(values
                .iter()
                .take(limit.unwrap_or(usize::MAX))
                .map(|v| v.0.clone())
                .collect()),
            _ => Err(HostError::MissingSlot {
                handle: set,
                slot: "SetData",
            }),
        }
    }
}

impl RuntimeIntrospector for Heap {
    fn is_proxy(&self, value: &Value) -> bool {
        value
            .as_object()
            .and_then(|handle| self.get_object(handle).ok())
            .map(|object| matches!(object.data, ObjectData::Proxy(_)))
            .unwrap_or(false)
    }

    fn proxy_target(&self, proxy: ObjectHandle) -> HostResult<Option<Value>> {
        Ok(self.proxy_slots(proxy, "ProxyTarget")?.target.map(Value::Object))
    }

    fn proxy_handler(&self, proxy: ObjectHandle) -> HostResult<Option<Value>> {
        Ok(self.proxy_slots(proxy, "ProxyHandler")?.handler.map(Value::Object))
    }

    fn iterator_kind(&self, iterator: ObjectHandle) -> HostResult<IterationKind> {
        Ok(self.iterator_slots(iterator, "Kind")?.kind)
    }

    fn iterated_object(&self, iterator: ObjectHandle) -> HostResult<Value> {
        Ok(self.iterator_slots(iterator, "IteratedObject")?.iterated.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_string_properties_order() {
        let mut heap = Heap::new();
        let obj = heap.alloc_object();
        heap.set_property(obj, "b", 1).unwrap();
        heap.set_property(obj, "10", 1).unwrap();
        heap.set_property(obj, "a", 1).unwrap();
        heap.set_property(obj, "2", 1).unwrap();
        heap.set_property(obj, "4294967295", 1).unwrap();

        let keys: Vec<String> = heap
            .own_string_properties(obj)
            .unwrap()
            .into_iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, vec!["2", "10", "b", "a", "4294967295"]);
    }

    #[test]
    fn test_symbol_properties_separate() {
        let mut heap = Heap::new();
        let obj = heap.alloc_object();
        let sym = heap.alloc_symbol(Some("tag"));
        heap.set_property(obj, "x", 1).unwrap();
        heap.define_property(obj, sym, Property::hidden(2)).unwrap();

        let symbols = heap.own_symbol_properties(obj).unwrap();
        assert_eq!(symbols, vec![(sym, PropertyAttributes::hidden())]);
        assert_eq!(heap.own_string_properties(obj).unwrap().len(), 1);
    }

    #[test]
    fn test_constructor_name_skips_accessors() {
        let mut heap = Heap::new();
        let obj = heap.alloc_object();
        assert_eq!(heap.constructor_name(obj).unwrap(), Some("Object".to_string()));

        let getter = heap.alloc_function("get constructor");
        heap.define_property(obj, "constructor", Property::getter(getter)).unwrap();
        assert_eq!(heap.constructor_name(obj).unwrap(), None);
        assert_eq!(heap.observable_effects(), 0);
    }

    #[test]
    fn test_constructor_name_null_prototype() {
        let mut heap = Heap::new();
        let bare = heap.alloc_object_with_proto(None);
        assert_eq!(heap.constructor_name(bare).unwrap(), None);
        assert_eq!(heap.to_string_tag(bare).unwrap(), "[object Object]");
    }

    #[test]
    fn test_to_string_tag_builtins() {
        let mut heap = Heap::new();
        let map = heap.alloc_map();
        let it = heap.alloc_map_iterator(map, IterationKind::Entries).unwrap();
        let array = heap.alloc_array(vec![]);
        let func = heap.alloc_function("f");
        assert_eq!(heap.to_string_tag(map).unwrap(), "[object Map]");
        assert_eq!(heap.to_string_tag(it).unwrap(), "[object Map Iterator]");
        assert_eq!(heap.to_string_tag(array).unwrap(), "[object Array]");
        assert_eq!(heap.to_string_tag(func).unwrap(), "[object Function]");
    }

    #[test]
    fn test_to_string_tag_custom() {
        let mut heap = Heap::new();
        let obj = heap.alloc_object_with_proto(None);
        let tag = heap.intrinsics().to_string_tag;
        heap.set_property(obj, tag, "Custom").unwrap();
        assert_eq!(heap.to_string_tag(obj).unwrap(), "[object Custom]");
    }

    #[test]
    fn test_proxy_slots() {
        let mut heap = Heap::new();
        let target = heap.alloc_object();
        let handler = heap.alloc_object();
        let proxy = heap.alloc_proxy(target, handler).unwrap();

        assert!(heap.is_proxy(&Value::Object(proxy)));
        assert!(!heap.is_proxy(&Value::Object(target)));
        assert!(!heap.is_proxy(&Value::from("proxy")));
        assert_eq!(heap.proxy_target(proxy).unwrap(), Some(Value::Object(target)));
        assert_eq!(heap.proxy_handler(proxy).unwrap(), Some(Value::Object(handler)));

        heap.revoke_proxy(proxy).unwrap();
        assert_eq!(heap.proxy_handler(proxy).unwrap(), None);
        assert!(matches!(
            heap.proxy_target(target),
            Err(HostError::MissingSlot { slot: "ProxyTarget", .. })
        ));
    }

    #[test]
    fn test_iterator_slots() {
        let mut heap = Heap::new();
        let set = heap.alloc_set();
        let it = heap.alloc_set_iterator(set, IterationKind::Entries).unwrap();
        assert_eq!(heap.iterator_kind(it).unwrap(), IterationKind::Entries);
        assert_eq!(heap.iterated_object(it).unwrap(), Value::Object(set));
        assert!(heap.iterator_kind(set).is_err());
    }

    #[test]
    fn test_collection_limits() {
        let mut heap = Heap::new();
        let set = heap.alloc_set();
        for i in 0..5 {
            heap.set_add(set, i).unwrap();
        }
        assert_eq!(heap.set_values(set, None).unwrap().len(), 5);
        assert_eq!(
            heap.set_values(set, Some(2)).unwrap(),
            vec![Value::from(0), Value::from(1)]
        );
        assert!(heap.map_entries(set, None).is_err());
    }

    #[test]
    fn test_invalid_handle() {
        let heap = Heap::new();
        let bogus = ObjectHandle(u32::MAX);
        assert_eq!(heap.object_kind(bogus), Err(HostError::InvalidHandle(bogus)));
    }
}

//! Own non-index property enumeration

use slotview_sdk::{array_index, ObjectModel, PropertyAttributes, PropertyKey, Value};

use crate::constants::PropertyFilter;
use crate::error::{InspectError, Result};

const OPERATION: &str = "getOwnNonIndexProperties";

/// List an object's own property keys, skipping array-index keys.
///
/// String keys come first in the host's own-key order, then symbol keys.
/// Under [`PropertyFilter::OnlyEnumerable`] non-enumerable keys are dropped.
/// Accessors are listed but never invoked.
pub fn get_own_non_index_properties<H>(
    host: &H,
    value: &Value,
    filter: PropertyFilter,
) -> Result<Vec<PropertyKey>>
where
    H: ObjectModel + ?Sized,
{
    let handle = value.as_object().ok_or_else(|| {
        InspectError::invalid_argument(
            OPERATION,
            format!("expected an object, got {}", value.type_name()),
        )
    })?;

    let keep = |attributes: PropertyAttributes| match filter {
        PropertyFilter::AllProperties => true,
        PropertyFilter::OnlyEnumerable => attributes.enumerable,
    };

    let mut keys: Vec<PropertyKey> = host
        .own_string_properties(handle)?
        .into_iter()
        .filter(|(name, attributes)| array_index(name).is_none() && keep(*attributes))
        .map(|(name, _)| PropertyKey::String(name))
        .collect();

    keys.extend(
        host.own_symbol_properties(handle)?
            .into_iter()
            .filter(|(_, attributes)| keep(*attributes))
            .map(|(id, _)| PropertyKey::Symbol(id)),
    );

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotview_heap::{Heap, Property};
    use slotview_sdk::SymbolId;

    fn names(keys: &[PropertyKey]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_array_skips_indices() {
        let mut heap = Heap::new();
        let array = heap.alloc_array(vec![1.into(), 2.into(), 3.into()]);
        heap.set_property(array, "foo", "bar").unwrap();

        let keys = get_own_non_index_properties(&heap, &array.into(), PropertyFilter::OnlyEnumerable)
            .unwrap();
        assert_eq!(names(&keys), vec!["foo"]);

        let keys = get_own_non_index_properties(&heap, &array.into(), PropertyFilter::AllProperties)
            .unwrap();
        assert_eq!(names(&keys), vec!["length", "foo"]);
    }

    #[test]
    fn test_symbols_follow_strings() {
        let mut heap = Heap::new();
        let object = heap.alloc_object();
        let sym = heap.alloc_symbol(Some("tag"));
        heap.set_property(object, sym, 1).unwrap();
        heap.set_property(object, "x", 2).unwrap();

        let keys = get_own_non_index_properties(&heap, &object.into(), PropertyFilter::AllProperties)
            .unwrap();
        assert_eq!(keys, vec![PropertyKey::from("x"), PropertyKey::Symbol(sym)]);
    }

    #[test]
    fn test_hidden_symbol_filtered() {
        let mut heap = Heap::new();
        let object = heap.alloc_object();
        let sym: SymbolId = heap.alloc_symbol(None);
        heap.define_property(object, sym, Property::hidden(1)).unwrap();

        let only = get_own_non_index_properties(&heap, &object.into(), PropertyFilter::OnlyEnumerable)
            .unwrap();
        assert!(only.is_empty());
        let all = get_own_non_index_properties(&heap, &object.into(), PropertyFilter::AllProperties)
            .unwrap();
        assert_eq!(all, vec![PropertyKey::Symbol(sym)]);
    }

    #[test]
    fn test_non_object_rejected() {
        let heap = Heap::new();
        let err = get_own_non_index_properties(&heap, &Value::from(1), PropertyFilter::AllProperties)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "getOwnNonIndexProperties(): expected an object, got number"
        );
    }
}

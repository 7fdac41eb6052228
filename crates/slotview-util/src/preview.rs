//! Collection and iterator previews
//!
//! Previews read the backing storage of a Map or Set directly. The iterator
//! being previewed is never advanced and no `next` method is looked up.

use serde::Serialize;
use slotview_sdk::{IterationKind, ObjectHandle, ObjectKind, RuntimeIntrospector, Value};
use tracing::debug;

use crate::error::{InspectError, Result};

const OPERATION: &str = "previewEntries";

/// A snapshot of a collection's contents
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Preview {
    /// Flat list of items; key/value pairs are laid out as `[k0, v0, k1, v1, ...]`
    pub entries: Vec<Value>,
    /// Whether `entries` holds pairs
    pub is_entries: bool,
}

impl Preview {
    fn values(entries: Vec<Value>) -> Self {
        Self {
            entries,
            is_entries: false,
        }
    }

    fn pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self {
            entries: pairs.into_iter().flat_map(|(k, v)| [k, v]).collect(),
            is_entries: true,
        }
    }

    /// Number of logical items (a key/value pair counts once)
    pub fn len(&self) -> usize {
        if self.is_entries {
            self.entries.len() / 2
        } else {
            self.entries.len()
        }
    }

    /// Whether the preview holds no items
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate key/value pairs; empty unless `is_entries`
    pub fn pairs_iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        let flat: &[Value] = if self.is_entries { &self.entries } else { &[] };
        flat.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Preview a whole collection. See [`preview_entries_bounded`].
pub fn preview_entries<H>(host: &H, value: &Value, is_iterator: bool) -> Result<Preview>
where
    H: RuntimeIntrospector + ?Sized,
{
    preview_entries_bounded(host, value, is_iterator, None)
}

/// Preview at most `limit` items of a collection.
///
/// With `is_iterator == false`, WeakMap and WeakSet values produce an empty
/// preview and anything else is rejected. With `is_iterator == true`, Map
/// and Set iterators are previewed according to their iteration kind; Set
/// entries iterators yield `[x, x]` pairs.
pub fn preview_entries_bounded<H>(
    host: &H,
    value: &Value,
    is_iterator: bool,
    limit: Option<usize>,
) -> Result<Preview>
where
    H: RuntimeIntrospector + ?Sized,
{
    let kind = match value.as_object() {
        Some(handle) => Some((handle, host.object_kind(handle)?)),
        None => None,
    };

    if !is_iterator {
        return match kind {
            Some((_, kind)) if kind.is_weak_collection() => Ok(Preview::default()),
            _ => Err(InspectError::invalid_argument(OPERATION, "Invalid object received")),
        };
    }

    let Some((iterator, kind)) = kind.filter(|(_, kind)| kind.is_iterator()) else {
        return Err(InspectError::invalid_argument(
            OPERATION,
            "Invalid iterator received",
        ));
    };

    let (preview, truncated) = preview_iterator(host, iterator, kind, limit)?;
    if truncated {
        debug!(
            iterator = %iterator,
            limit = limit.unwrap_or_default(),
            "preview truncated at its item limit"
        );
    }
    Ok(preview)
}

/// Keep at most `limit` items, reporting whether any were dropped
fn clamp<T>(mut items: Vec<T>, limit: Option<usize>) -> (Vec<T>, bool) {
    match limit {
        Some(limit) if items.len() > limit => {
            items.truncate(limit);
            (items, true)
        }
        _ => (items, false),
    }
}

fn preview_iterator<H>(
    host: &H,
    iterator: ObjectHandle,
    kind: ObjectKind,
    limit: Option<usize>,
) -> Result<(Preview, bool)>
where
    H: RuntimeIntrospector + ?Sized,
{
    // one extra item tells a full collection apart from a cut-off one
    let fetch = limit.map(|limit| limit.saturating_add(1));
    let iterated = host.iterated_object(iterator)?;
    let collection = match iterated.as_object() {
        Some(handle) => Some((handle, host.object_kind(handle)?)),
        None => None,
    };

    match collection {
        Some((map, ObjectKind::Map)) => {
            let (entries, truncated) = clamp(host.map_entries(map, fetch)?, limit);
            let preview = match host.iterator_kind(iterator)? {
                IterationKind::Entries => Preview::pairs(entries),
                IterationKind::Values => {
                    Preview::values(entries.into_iter().map(|(_, v)| v).collect())
                }
                IterationKind::Keys => {
                    Preview::values(entries.into_iter().map(|(k, _)| k).collect())
                }
            };
            Ok((preview, truncated))
        }
        Some((set, ObjectKind::Set)) => {
            let (values, truncated) = clamp(host.set_values(set, fetch)?, limit);
            let preview = match host.iterator_kind(iterator)? {
                IterationKind::Entries => {
                    Preview::pairs(values.into_iter().map(|v| (v.clone(), v)))
                }
                IterationKind::Keys | IterationKind::Values => Preview::values(values),
            };
            Ok((preview, truncated))
        }
        _ => Err(InspectError::unsupported_kind(OPERATION, kind.builtin_tag())),
    }
}

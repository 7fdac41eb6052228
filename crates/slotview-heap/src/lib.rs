//! slotview reference heap
//!
//! An in-memory object heap that implements the `slotview-sdk` capability
//! traits. It holds the internal slots a real engine would (proxy
//! target/handler, iterator kind and iterated object, promise state) so
//! that inspection can be exercised without embedding an engine.
//!
//! # Example
//!
//! ```ignore
//! use slotview_heap::Heap;
//! use slotview_sdk::{IterationKind, RuntimeIntrospector};
//!
//! let mut heap = Heap::new();
//! let map = heap.alloc_map();
//! heap.map_set(map, "a", 1)?;
//! let it = heap.alloc_map_iterator(map, IterationKind::Entries)?;
//! assert_eq!(heap.iterator_kind(it)?, IterationKind::Entries);
//! ```

#![warn(missing_docs)]

mod heap;
mod introspect;
pub mod object;

pub use heap::{Heap, HeapError, Intrinsics};
pub use object::{CollectionKey, HeapObject, ObjectData, PromiseStatus, Property};

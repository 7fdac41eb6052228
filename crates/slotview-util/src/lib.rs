//! slotview util
//!
//! Introspection primitives for an object inspector: own non-index property
//! enumeration, constructor name lookup, proxy target/handler access, and
//! previews of Map/Set iterators and weak collections. Every operation reads
//! internal state through a [`RuntimeIntrospector`](slotview_sdk::RuntimeIntrospector)
//! and never runs user code: no getters, no proxy traps, no iterator `next`.
//!
//! # Example
//!
//! ```ignore
//! use slotview_heap::Heap;
//! use slotview_util::{get_constructor_name, Inspector};
//!
//! let mut heap = Heap::new();
//! let foo = heap.alloc_class("Foo", None)?;
//! let instance = heap.alloc_instance(foo)?;
//! assert_eq!(get_constructor_name(&heap, &instance.into())?, "Foo");
//!
//! let inspector = Inspector::new(&heap);
//! assert_eq!(inspector.constructor_name(&instance.into())?, "Foo");
//! ```

#![warn(missing_docs)]

pub mod binding;
pub mod config;
mod constants;
mod constructor;
mod error;
mod inspector;
mod preview;
mod promise;
mod properties;
mod proxy;

pub use binding::{UtilBinding, UtilCallResult, UtilOutput};
pub use config::{ConfigError, UtilConfig};
pub use constants::{
    constants, PromiseState, PropertyFilter, UtilConstants, ALL_PROPERTIES, ONLY_ENUMERABLE,
    PENDING, REJECTED,
};
pub use constructor::{get_constructor_name, tag_name, FALLBACK_NAME};
pub use error::{InspectError, Result};
pub use inspector::Inspector;
pub use preview::{preview_entries, preview_entries_bounded, Preview};
pub use promise::{get_external_value, get_promise_details, PromiseDetails};
pub use properties::get_own_non_index_properties;
pub use proxy::{get_proxy_details, ProxyDetails};

//! slotview SDK - host-facing types for object inspection
//!
//! This crate holds the value model and the capability traits a host
//! runtime implements. Inspection code programs against these traits only;
//! it never depends on a particular engine.
//!
//! # Example
//!
//! ```ignore
//! use slotview_sdk::{RuntimeIntrospector, Value};
//!
//! fn is_revoked(host: &dyn RuntimeIntrospector, value: &Value) -> bool {
//!     match value.as_object() {
//!         Some(handle) if host.is_proxy(value) => {
//!             matches!(host.proxy_handler(handle), Ok(None))
//!         }
//!         _ => false,
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod types;
pub mod value;

pub use context::{ObjectModel, RuntimeIntrospector};
pub use error::{HostError, HostResult};
pub use types::{IterationKind, ObjectKind, PropertyAttributes};
pub use value::{array_index, ObjectHandle, PropertyKey, SymbolId, Value, ARRAY_INDEX_LIMIT};

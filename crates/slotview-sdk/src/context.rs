//! Host capability traits
//!
//! Defines the interface a host runtime implements so that inspection code
//! can look at its objects without depending on engine internals.
//!
//! Two layers:
//!
//! - [`ObjectModel`]: ordinary, side-effect free reads (type tags, own
//!   property attributes, collection contents).
//! - [`RuntimeIntrospector`]: privileged internal-slot reads (proxy
//!   target/handler, iterator kind/iterated object) that ordinary object
//!   operations cannot reach.
//!
//! Every method must be free of user-observable effects: no getter, no
//! proxy trap, no iterator advance. Implementations read already
//! materialized state only.

use std::sync::Arc;

use crate::error::HostResult;
use crate::types::{IterationKind, ObjectKind, PropertyAttributes};
use crate::value::{ObjectHandle, SymbolId, Value};

/// Side-effect free reads of host objects.
pub trait ObjectModel {
    // ========================================================================
    // Classification
    // ========================================================================

    /// Kind of the object behind `handle`, from the host's internal type tag
    fn object_kind(&self, handle: ObjectHandle) -> HostResult<ObjectKind>;

    // ========================================================================
    // Own properties
    // ========================================================================

    /// Own string-keyed properties in `[[OwnPropertyKeys]]` order
    ///
    /// Index-like keys are included; filtering is the caller's business.
    fn own_string_properties(
        &self,
        handle: ObjectHandle,
    ) -> HostResult<Vec<(Arc<str>, PropertyAttributes)>>;

    /// Own symbol-keyed properties in declaration order
    fn own_symbol_properties(
        &self,
        handle: ObjectHandle,
    ) -> HostResult<Vec<(SymbolId, PropertyAttributes)>>;

    // ========================================================================
    // Type names
    // ========================================================================

    /// Name of the function reachable through the `constructor` property
    ///
    /// Only data properties may be followed. Returns `None` when the chain
    /// ends, hits an accessor, or the constructor has no name.
    fn constructor_name(&self, handle: ObjectHandle) -> HostResult<Option<String>>;

    /// `Object.prototype.toString` result, e.g. `"[object Map]"`
    fn to_string_tag(&self, handle: ObjectHandle) -> HostResult<String>;

    // ========================================================================
    // Collections
    // ========================================================================

    /// Entries of a `Map` in insertion order, at most `limit` pairs
    fn map_entries(
        &self,
        map: ObjectHandle,
        limit: Option<usize>,
    ) -> HostResult<Vec<(Value, Value)>>;

    /// Values of a `Set` in insertion order, at most `limit` items
    fn set_values(&self, set: ObjectHandle, limit: Option<usize>) -> HostResult<Vec<Value>>;
}

/// Privileged internal-slot access supplied by the host.
///
/// The caller is trusted; no sandboxing happens here.
pub trait RuntimeIntrospector: ObjectModel {
    /// Check the host type tag for a proxy. Must not run any trap.
    fn is_proxy(&self, value: &Value) -> bool;

    /// `[[ProxyTarget]]`; `None` when the slot is null
    fn proxy_target(&self, proxy: ObjectHandle) -> HostResult<Option<Value>>;

    /// `[[ProxyHandler]]`; `None` when the slot is null (revoked proxy)
    fn proxy_handler(&self, proxy: ObjectHandle) -> HostResult<Option<Value>>;

    /// Iterator `[[Kind]]` slot
    fn iterator_kind(&self, iterator: ObjectHandle) -> HostResult<IterationKind>;

    /// Iterator `[[IteratedObject]]` slot
    fn iterated_object(&self, iterator: ObjectHandle) -> HostResult<Value>;
}

//! Error types for host capability calls

use crate::value::ObjectHandle;

/// Result type for host capability calls
pub type HostResult<T> = Result<T, HostError>;

/// Failures reported by a host while answering an inspection query
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// The handle does not reference a live object
    #[error("Invalid object handle {0}")]
    InvalidHandle(ObjectHandle),

    /// A non-object value was passed where an object was required
    #[error("Not an object: got {0}")]
    NotAnObject(&'static str),

    /// The object exists but has no such internal slot
    #[error("Object {handle} has no [[{slot}]] slot")]
    MissingSlot {
        /// Object that was queried
        handle: ObjectHandle,
        /// Internal slot name
        slot: &'static str,
    },
}

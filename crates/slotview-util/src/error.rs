//! Inspection errors

use slotview_sdk::HostError;
use thiserror::Error;

/// Result type for inspection operations
pub type Result<T> = std::result::Result<T, InspectError>;

/// Errors raised synchronously to the caller of an inspection operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InspectError {
    /// Input failed a basic type precondition
    #[error("{operation}(): {reason}")]
    InvalidArgument {
        /// Operation that rejected the input
        operation: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// A recognized input wraps something this layer cannot preview
    #[error("{operation}(): unsupported {kind}")]
    UnsupportedKind {
        /// Operation that rejected the input
        operation: &'static str,
        /// Kind that was encountered
        kind: String,
    },

    /// The host failed to answer a capability query
    #[error(transparent)]
    Host(#[from] HostError),
}

impl InspectError {
    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        InspectError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported_kind(operation: &'static str, kind: impl Into<String>) -> Self {
        InspectError::UnsupportedKind {
            operation,
            kind: kind.into(),
        }
    }

    /// Check for `InvalidArgument`
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, InspectError::InvalidArgument { .. })
    }

    /// Check for `UnsupportedKind`
    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self, InspectError::UnsupportedKind { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotview_sdk::ObjectHandle;

    #[test]
    fn test_messages() {
        let err = InspectError::invalid_argument("previewEntries", "Invalid object received");
        assert_eq!(err.to_string(), "previewEntries(): Invalid object received");
        assert!(err.is_invalid_argument());

        let err = InspectError::unsupported_kind("previewEntries", "Array Iterator");
        assert_eq!(err.to_string(), "previewEntries(): unsupported Array Iterator");
        assert!(err.is_unsupported_kind());
    }

    #[test]
    fn test_host_error_is_transparent() {
        let err = InspectError::from(HostError::InvalidHandle(ObjectHandle(9)));
        assert_eq!(err.to_string(), "Invalid object handle #9");
        assert!(!err.is_invalid_argument());
    }
}

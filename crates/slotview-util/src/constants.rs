//! Property filters and promise-state sentinels

use serde::{Deserialize, Serialize};

/// Visibility mode for own-property enumeration.
///
/// The discriminants are the raw values callers pass through the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum PropertyFilter {
    /// Every own property
    AllProperties = 0,
    /// Only properties whose descriptor is enumerable
    #[default]
    OnlyEnumerable = 2,
}

impl PropertyFilter {
    /// Raw filter value
    pub fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Every own property
pub const ALL_PROPERTIES: PropertyFilter = PropertyFilter::AllProperties;

/// Only enumerable own properties
pub const ONLY_ENUMERABLE: PropertyFilter = PropertyFilter::OnlyEnumerable;

/// Symbolic promise state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromiseState {
    /// Not yet settled
    Pending,
    /// Settled with a rejection
    Rejected,
}

/// Pending sentinel
pub const PENDING: PromiseState = PromiseState::Pending;

/// Rejected sentinel
pub const REJECTED: PromiseState = PromiseState::Rejected;

/// The constants exported next to the operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UtilConstants {
    /// `kPending`
    pub pending: PromiseState,
    /// `kRejected`
    pub rejected: PromiseState,
    /// `ALL_PROPERTIES`
    pub all_properties: PropertyFilter,
    /// `ONLY_ENUMERABLE`
    pub only_enumerable: PropertyFilter,
}

/// All exported constants
pub const fn constants() -> UtilConstants {
    UtilConstants {
        pending: PENDING,
        rejected: REJECTED,
        all_properties: ALL_PROPERTIES,
        only_enumerable: ONLY_ENUMERABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_raw_values() {
        assert_eq!(ALL_PROPERTIES.as_raw(), 0);
        assert_eq!(ONLY_ENUMERABLE.as_raw(), 2);
        assert_eq!(PropertyFilter::default(), ONLY_ENUMERABLE);
    }

    #[test]
    fn test_sentinels_are_distinct() {
        assert_ne!(PENDING, REJECTED);
        let c = constants();
        assert_eq!(c.pending, PENDING);
        assert_eq!(c.rejected, REJECTED);
    }
}

//! Promise and external-value placeholders

use serde::Serialize;
use slotview_sdk::Value;

use crate::constants::{PromiseState, PENDING};

/// State and settled result of a promise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromiseDetails {
    /// Current state
    pub state: PromiseState,
    /// Settled value, `Undefined` while pending
    pub result: Value,
}

/// Promise state lookup.
///
/// Always reports a pending promise with an undefined result, whatever
/// `value` is.
pub fn get_promise_details(_value: &Value) -> PromiseDetails {
    PromiseDetails {
        state: PENDING,
        result: Value::Undefined,
    }
}

/// Address behind an external wrapper.
///
/// Always reports `0n`.
pub fn get_external_value(_value: &Value) -> Value {
    Value::BigInt(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotview_heap::{Heap, PromiseStatus};

    #[test]
    fn test_promise_always_pending() {
        let mut heap = Heap::new();
        let rejected = heap.alloc_promise(PromiseStatus::Rejected, "boom".into());

        for value in [Value::from(rejected), Value::from(1), Value::Undefined] {
            let details = get_promise_details(&value);
            assert_eq!(details.state, PENDING);
            assert_eq!(details.result, Value::Undefined);
        }
    }

    #[test]
    fn test_external_is_zero() {
        let mut heap = Heap::new();
        let external = heap.alloc_external(0xdead_beef);
        assert_eq!(get_external_value(&external.into()), Value::BigInt(0));
        assert_eq!(get_external_value(&Value::Null), Value::BigInt(0));
    }
}

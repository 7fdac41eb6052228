//! Proxy target/handler inspection

use serde::Serialize;
use slotview_sdk::{RuntimeIntrospector, Value};

use crate::error::{InspectError, Result};

const OPERATION: &str = "getProxyDetails";

/// Internal slots of a proxy.
///
/// Both slots read `None` once the proxy has been revoked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProxyDetails {
    /// Target only
    Target(Option<Value>),
    /// Target and handler
    WithHandler {
        /// `[[ProxyTarget]]`
        target: Option<Value>,
        /// `[[ProxyHandler]]`
        handler: Option<Value>,
    },
}

impl ProxyDetails {
    /// The target, if the proxy is live
    pub fn target(&self) -> Option<&Value> {
        match self {
            ProxyDetails::Target(target) => target.as_ref(),
            ProxyDetails::WithHandler { target, .. } => target.as_ref(),
        }
    }

    /// The handler, if requested and the proxy is live
    pub fn handler(&self) -> Option<&Value> {
        match self {
            ProxyDetails::Target(_) => None,
            ProxyDetails::WithHandler { handler, .. } => handler.as_ref(),
        }
    }
}

/// Read a proxy's target (and optionally handler) without triggering traps.
///
/// Returns `Ok(None)` when `value` is not a proxy.
pub fn get_proxy_details<H>(
    host: &H,
    value: &Value,
    with_handler: bool,
) -> Result<Option<ProxyDetails>>
where
    H: RuntimeIntrospector + ?Sized,
{
    if !host.is_proxy(value) {
        return Ok(None);
    }
    let handle = value
        .as_object()
        .ok_or_else(|| InspectError::invalid_argument(OPERATION, "proxy is not an object"))?;

    // A revoked proxy clears its handler first; report its target as gone too.
    let handler = host.proxy_handler(handle)?;
    let target = match handler {
        Some(_) => host.proxy_target(handle)?,
        None => None,
    };

    Ok(Some(if with_handler {
        ProxyDetails::WithHandler { target, handler }
    } else {
        ProxyDetails::Target(target)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotview_heap::Heap;

    #[test]
    fn test_live_proxy() {
        let mut heap = Heap::new();
        let target = heap.alloc_object();
        let handler = heap.alloc_object();
        let proxy = heap.alloc_proxy(target, handler).unwrap();

        let details = get_proxy_details(&heap, &proxy.into(), true).unwrap().unwrap();
        assert_eq!(
            details,
            ProxyDetails::WithHandler {
                target: Some(target.into()),
                handler: Some(handler.into()),
            }
        );

        let details = get_proxy_details(&heap, &proxy.into(), false).unwrap().unwrap();
        assert_eq!(details, ProxyDetails::Target(Some(target.into())));
        assert_eq!(details.handler(), None);
    }

    #[test]
    fn test_revoked_proxy() {
        let mut heap = Heap::new();
        let target = heap.alloc_object();
        let handler = heap.alloc_object();
        let proxy = heap.alloc_proxy(target, handler).unwrap();
        heap.revoke_proxy(proxy).unwrap();

        let details = get_proxy_details(&heap, &proxy.into(), true).unwrap().unwrap();
        assert_eq!(details.target(), None);
        assert_eq!(details.handler(), None);
        let details = get_proxy_details(&heap, &proxy.into(), false).unwrap().unwrap();
        assert_eq!(details, ProxyDetails::Target(None));
    }

    #[test]
    fn test_non_proxy() {
        let mut heap = Heap::new();
        let object = heap.alloc_object();
        assert_eq!(get_proxy_details(&heap, &object.into(), true).unwrap(), None);
        assert_eq!(get_proxy_details(&heap, &Value::Null, false).unwrap(), None);
    }
}

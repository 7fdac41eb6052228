//! Util binding (`util` internal module)
//!
//! Name-based dispatch from raw argument lists to the inspection
//! operations, filling in omitted optional arguments.

use serde::Serialize;
use slotview_sdk::{PropertyKey, RuntimeIntrospector, Value};
use tracing::{debug, trace};

use crate::config::UtilConfig;
use crate::constants::PropertyFilter;
use crate::error::{InspectError, Result};
use crate::inspector::Inspector;
use crate::preview::Preview;
use crate::promise::PromiseDetails;
use crate::proxy::ProxyDetails;

// ============================================================================
// Public API
// ============================================================================

/// Method names the binding answers to
pub const METHODS: &[&str] = &[
    "getOwnNonIndexProperties",
    "getConstructorName",
    "getProxyDetails",
    "previewEntries",
    "getPromiseDetails",
    "getExternalValue",
];

/// What a binding method returned
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UtilOutput {
    /// `getOwnNonIndexProperties`
    Keys(Vec<PropertyKey>),
    /// `getConstructorName`
    Name(String),
    /// `getProxyDetails`
    Proxy(Option<ProxyDetails>),
    /// `previewEntries`
    Preview(Preview),
    /// `getPromiseDetails`
    Promise(PromiseDetails),
    /// `getExternalValue`
    External(Value),
}

/// Result of a binding call
#[derive(Debug, Clone, PartialEq)]
pub enum UtilCallResult {
    /// The method ran
    Value(UtilOutput),
    /// No method with that name
    Unhandled,
    /// The method rejected its arguments or the host failed
    Error(InspectError),
}

impl UtilCallResult {
    /// Convert into a `Result`, treating `Unhandled` as `None`
    pub fn into_result(self) -> Option<Result<UtilOutput>> {
        match self {
            UtilCallResult::Value(output) => Some(Ok(output)),
            UtilCallResult::Unhandled => None,
            UtilCallResult::Error(err) => Some(Err(err)),
        }
    }
}

/// The `util` binding
#[derive(Debug, Clone, Default)]
pub struct UtilBinding {
    config: UtilConfig,
}

impl UtilBinding {
    /// Binding with default argument values
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding whose omitted arguments come from `config`
    pub fn with_config(config: UtilConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &UtilConfig {
        &self.config
    }

    /// Whether `method` is a binding method
    pub fn has_method(method: &str) -> bool {
        METHODS.contains(&method)
    }

    /// Handle a util method call
    pub fn call(
        &self,
        host: &dyn RuntimeIntrospector,
        method: &str,
        args: &[Value],
    ) -> UtilCallResult {
        trace!(method, args = args.len(), "util binding call");
        let inspector = Inspector::with_config(host, self.config.clone());

        let result = match method {
            "getOwnNonIndexProperties" => own_non_index_properties(&inspector, args),
            "getConstructorName" => constructor_name(&inspector, args),
            "getProxyDetails" => proxy_details(&inspector, args),
            "previewEntries" => preview_entries(&inspector, args),
            "getPromiseDetails" => {
                Ok(UtilOutput::Promise(inspector.promise_details(arg(args, 0))))
            }
            "getExternalValue" => {
                Ok(UtilOutput::External(inspector.external_value(arg(args, 0))))
            }
            _ => return UtilCallResult::Unhandled,
        };

        match result {
            Ok(output) => UtilCallResult::Value(output),
            Err(err) => {
                debug!(method, error = %err, "util binding call failed");
                UtilCallResult::Error(err)
            }
        }
    }
}

// ============================================================================
// Helper
// ============================================================================

/// Positional argument; missing arguments read as `undefined`
fn arg(args: &[Value], index: usize) -> &Value {
    static UNDEFINED: Value = Value::Undefined;
    args.get(index).unwrap_or(&UNDEFINED)
}

/// Optional argument; `undefined` counts as omitted
fn optional_arg(args: &[Value], index: usize) -> Option<&Value> {
    args.get(index).filter(|v| !matches!(v, Value::Undefined))
}

/// Decode a raw property filter
///
/// Only an exact `ONLY_ENUMERABLE` restricts the listing; any other
/// supplied value lists every property. `None` when omitted.
fn get_filter(args: &[Value], index: usize) -> Option<PropertyFilter> {
    let only_enumerable = f64::from(PropertyFilter::OnlyEnumerable.as_raw());
    optional_arg(args, index).map(|raw| match raw.as_number() {
        Some(n) if n == only_enumerable => PropertyFilter::OnlyEnumerable,
        _ => PropertyFilter::AllProperties,
    })
}

// ============================================================================
// Method Implementations
// ============================================================================

/// util.getOwnNonIndexProperties(object, filter?): (string | symbol)[]
fn own_non_index_properties(inspector: &Inspector<'_>, args: &[Value]) -> Result<UtilOutput> {
    let filter = get_filter(args, 1);
    inspector
        .own_non_index_properties(arg(args, 0), filter)
        .map(UtilOutput::Keys)
}

/// util.getConstructorName(object): string
fn constructor_name(inspector: &Inspector<'_>, args: &[Value]) -> Result<UtilOutput> {
    inspector.constructor_name(arg(args, 0)).map(UtilOutput::Name)
}

/// util.getProxyDetails(value, withHandler?): [target, handler] | target | undefined
fn proxy_details(inspector: &Inspector<'_>, args: &[Value]) -> Result<UtilOutput> {
    let with_handler = optional_arg(args, 1).map(Value::is_truthy);
    inspector
        .proxy_details(arg(args, 0), with_handler)
        .map(UtilOutput::Proxy)
}

/// util.previewEntries(value, isIterator?): [entries, isKeyValue] | entries
fn preview_entries(inspector: &Inspector<'_>, args: &[Value]) -> Result<UtilOutput> {
    let is_iterator = arg(args, 1).is_truthy();
    inspector
        .preview_entries(arg(args, 0), is_iterator)
        .map(UtilOutput::Preview)
}

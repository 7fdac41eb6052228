//! Inspector service

use slotview_sdk::{PropertyKey, RuntimeIntrospector, Value};

use crate::config::UtilConfig;
use crate::constants::PropertyFilter;
use crate::error::Result;
use crate::preview::{preview_entries_bounded, Preview};
use crate::promise::{get_external_value, get_promise_details, PromiseDetails};
use crate::proxy::{get_proxy_details, ProxyDetails};
use crate::{constructor, properties};

/// Inspection operations bound to one host.
///
/// Holds only the host reference and its configuration.
pub struct Inspector<'h> {
    host: &'h dyn RuntimeIntrospector,
    config: UtilConfig,
}

impl<'h> Inspector<'h> {
    /// Inspector with default configuration
    pub fn new(host: &'h dyn RuntimeIntrospector) -> Self {
        Self::with_config(host, UtilConfig::default())
    }

    /// Inspector with explicit configuration
    pub fn with_config(host: &'h dyn RuntimeIntrospector, config: UtilConfig) -> Self {
        Self { host, config }
    }

    /// Active configuration
    pub fn config(&self) -> &UtilConfig {
        &self.config
    }

    /// Own non-index keys; `None` uses the configured default filter
    pub fn own_non_index_properties(
        &self,
        value: &Value,
        filter: Option<PropertyFilter>,
    ) -> Result<Vec<PropertyKey>> {
        let filter = filter.unwrap_or(self.config.default_filter);
        properties::get_own_non_index_properties(self.host, value, filter)
    }

    /// Constructor name
    pub fn constructor_name(&self, value: &Value) -> Result<String> {
        constructor::get_constructor_name(self.host, value)
    }

    /// Proxy slots; `None` for `with_handler` uses the configured default
    pub fn proxy_details(
        &self,
        value: &Value,
        with_handler: Option<bool>,
    ) -> Result<Option<ProxyDetails>> {
        let with_handler = with_handler.unwrap_or(self.config.proxy_with_handler);
        get_proxy_details(self.host, value, with_handler)
    }

    /// Collection preview, capped at the configured limit
    pub fn preview_entries(&self, value: &Value, is_iterator: bool) -> Result<Preview> {
        preview_entries_bounded(self.host, value, is_iterator, self.config.preview_limit)
    }

    /// Promise state (always pending)
    pub fn promise_details(&self, value: &Value) -> PromiseDetails {
        get_promise_details(value)
    }

    /// External pointer (always `0n`)
    pub fn external_value(&self, value: &Value) -> Value {
        get_external_value(value)
    }
}

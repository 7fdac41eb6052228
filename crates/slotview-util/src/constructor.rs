//! Constructor name resolution

use std::sync::LazyLock;

use regex::Regex;
use slotview_sdk::{ObjectKind, ObjectModel, Value};

use crate::error::{InspectError, Result};

const OPERATION: &str = "getConstructorName";

/// Name reported when neither a constructor nor a tag is found
pub const FALLBACK_NAME: &str = "Object";

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[object ([^\]]+)\]").expect("tag pattern is valid"));

/// Extract `X` from a `[object X]` tag
pub fn tag_name(tag: &str) -> Option<&str> {
    TAG_PATTERN
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Best-effort constructor name for an object. Functions are rejected.
///
/// Prefers the name of the constructor found along the prototype chain,
/// then the `X` in the object's `[object X]` tag, then `"Object"`. No user
/// code runs.
pub fn get_constructor_name<H>(host: &H, value: &Value) -> Result<String>
where
    H: ObjectModel + ?Sized,
{
    let handle = value.as_object().ok_or_else(|| {
        InspectError::invalid_argument(
            OPERATION,
            format!("expected an object, got {}", value.type_name()),
        )
    })?;

    if host.object_kind(handle)? == ObjectKind::Function {
        return Err(InspectError::invalid_argument(
            OPERATION,
            "expected an object, got function",
        ));
    }

    if let Some(name) = host.constructor_name(handle)? {
        return Ok(name);
    }

    let tag = host.to_string_tag(handle)?;
    Ok(tag_name(&tag).unwrap_or(FALLBACK_NAME).to_string())
}

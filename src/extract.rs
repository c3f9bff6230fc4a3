//! Side-channel extractors.
//!
//! Each extractor reads a directive element's attributes into the record the
//! companion class generator consumes. They never fail: a missing or
//! malformed attribute becomes an empty default so the conversion always
//! finishes and leaves something to complete by hand.

use indexmap::IndexMap;

use crate::expression::single_binding;
use crate::ir::{LmsChannelConfig, RecordDataConfig};

pub const DEFAULT_RECORD_MODE: &str = "VIEW";

type Attributes = IndexMap<String, String>;

fn attr<'a>(attrs: &'a Attributes, name: &str) -> Option<&'a str> {
    attrs
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Name a binding attribute points at: `{!v.contactId}` → `contactId`,
/// `{!c.onMessage}` → `onMessage`. Literal values are returned trimmed.
pub fn binding_name(value: &str) -> Option<String> {
    let inner = single_binding(value).unwrap_or_else(|| value.trim().to_string());
    let name = inner
        .strip_prefix("v.")
        .or_else(|| inner.strip_prefix("c."))
        .unwrap_or(inner.as_str())
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Accepts `['Name','Phone']`, `{!['Name', 'Phone']}` and `Name, Phone`.
pub fn parse_field_list(value: &str) -> Vec<String> {
    let inner = single_binding(value).unwrap_or_else(|| value.trim().to_string());
    let inner = inner.trim();
    let list = match inner.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']').unwrap_or(rest),
        // a bare reference such as `v.fields` carries no static list
        None if inner.starts_with("v.") || inner.starts_with("c.") => return Vec::new(),
        None => inner,
    };
    list.split(',')
        .map(|f| f.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXTRACTORS
// ═══════════════════════════════════════════════════════════════════════════════

/// `<lightning:messageChannel type=".." aura:id=".." onMessage="{!c.h}" scope=".."/>`
pub fn extract_lms_channel(attrs: &Attributes) -> LmsChannelConfig {
    let message_handler_name = attr(attrs, "onMessage").and_then(binding_name);
    LmsChannelConfig {
        channel_name: attr(attrs, "type").unwrap_or_default().to_string(),
        binding_id: attr(attrs, "aura:id").unwrap_or_default().to_string(),
        is_publisher_only: message_handler_name.is_none(),
        message_handler_name,
        scope: attr(attrs, "scope").map(|s| s.to_string()),
    }
}

/// `<force:recordData aura:id=".." recordId="{!v.id}" fields="['Name']" .../>`
pub fn extract_record_data(attrs: &Attributes) -> RecordDataConfig {
    RecordDataConfig {
        binding_id: attr(attrs, "aura:id").unwrap_or_default().to_string(),
        record_id_binding: attr(attrs, "recordId")
            .and_then(binding_name)
            .unwrap_or_default(),
        fields: attr(attrs, "fields").map(parse_field_list).unwrap_or_default(),
        target_fields_binding: attr(attrs, "targetFields").and_then(binding_name),
        target_record_binding: attr(attrs, "targetRecord").and_then(binding_name),
        target_error_binding: attr(attrs, "targetError").and_then(binding_name),
        mode: attr(attrs, "mode")
            .map(|m| m.to_uppercase())
            .unwrap_or_else(|| DEFAULT_RECORD_MODE.to_string()),
    }
}

/// Facet an `aura:set` assigns to. Empty when the designator is missing.
pub fn slot_designator(attrs: &Attributes) -> String {
    attr(attrs, "attribute").unwrap_or_default().to_string()
}

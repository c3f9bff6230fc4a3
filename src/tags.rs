//! Tag and attribute name resolution.
//!
//! Resolution order for a tag: explicit table, then namespace convention,
//! then passthrough. Attribute names go through the per-tag table first and
//! the generic rules second.

use lazy_static::lazy_static;
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════════════
// TABLES
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    /// Source tags whose target has no mechanical relation to their name.
    static ref TAG_MAP: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("ui:inputText", "lightning-input");
        m.insert("ui:inputNumber", "lightning-input");
        m.insert("ui:inputCheckbox", "lightning-input");
        m.insert("ui:inputDate", "lightning-input");
        m.insert("ui:inputTextArea", "lightning-textarea");
        m.insert("ui:inputSelect", "lightning-combobox");
        m.insert("ui:outputText", "lightning-formatted-text");
        m.insert("ui:outputNumber", "lightning-formatted-number");
        m.insert("ui:outputDate", "lightning-formatted-date-time");
        m.insert("ui:outputDateTime", "lightning-formatted-date-time");
        m.insert("ui:outputURL", "lightning-formatted-url");
        m.insert("ui:outputEmail", "lightning-formatted-email");
        m.insert("ui:outputRichText", "lightning-formatted-rich-text");
        m.insert("aura:unescapedHtml", "lightning-formatted-rich-text");
        m.insert("force:inputField", "lightning-input-field");
        m.insert("force:outputField", "lightning-output-field");
        m.insert("force:recordEdit", "lightning-record-edit-form");
        m.insert("force:recordView", "lightning-record-view-form");
        m
    };

    /// Per-source-tag attribute renames. Lookups fall back to the generic rules.
    static ref ATTRIBUTE_MAP: HashMap<&'static str, HashMap<&'static str, &'static str>> = {
        let mut m = HashMap::new();
        m.insert("ui:button", HashMap::from([("press", "onclick"), ("buttonTitle", "title")]));
        m.insert("ui:inputText", HashMap::from([("change", "onchange"), ("keyup", "onkeyup")]));
        m.insert("ui:inputNumber", HashMap::from([("change", "onchange")]));
        m.insert("ui:inputCheckbox", HashMap::from([("value", "checked"), ("change", "onchange")]));
        m.insert("ui:inputSelect", HashMap::from([("change", "onchange")]));
        m.insert("ui:outputURL", HashMap::from([("value", "value"), ("label", "label")]));
        m.insert("aura:unescapedHtml", HashMap::from([("value", "value")]));
        m.insert("force:inputField", HashMap::from([("value", "field-name")]));
        m.insert("force:outputField", HashMap::from([("value", "field-name")]));
        m
    };

    /// Containers with named facets, keyed by source tag: facet name → target slot.
    static ref SLOT_MAP: HashMap<&'static str, HashMap<&'static str, &'static str>> = {
        let mut m = HashMap::new();
        m.insert(
            "lightning:card",
            HashMap::from([("title", "title"), ("actions", "actions"), ("footer", "footer")]),
        );
        m.insert("lightning:tile", HashMap::from([("media", "media")]));
        m.insert("lightning:accordionSection", HashMap::from([("actions", "actions")]));
        m
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// TAG NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Target tag for `tag`, or `None` when it passes through unchanged.
pub fn resolve_tag(tag: &str) -> Option<String> {
    if let Some(mapped) = TAG_MAP.get(tag) {
        return Some(mapped.to_string());
    }
    let (namespace, name) = tag.split_once(':')?;
    if name.is_empty() {
        return None;
    }
    match namespace {
        "lightning" => Some(format!("lightning-{}", camel_to_kebab(name))),
        "ui" => Some(format!("lightning-{}", name.to_lowercase())),
        "c" => Some(format!("c-{}", camel_to_kebab(name))),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTE NAMES
// ═══════════════════════════════════════════════════════════════════════════════

pub fn resolve_attribute(tag: &str, name: &str) -> String {
    if let Some(mapped) = ATTRIBUTE_MAP.get(tag).and_then(|attrs| attrs.get(name)) {
        return mapped.to_string();
    }
    if name == "aura:id" {
        return "data-id".to_string();
    }
    if is_event_attribute(name) {
        return name.to_lowercase();
    }
    camel_to_kebab(name)
}

/// `onClick`, `onSelectItem`: handler attributes, which the target spells in lower case.
fn is_event_attribute(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false)
}

pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// SLOTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Target slot name when `parent` is a known container exposing `facet`.
pub fn resolve_slot(parent: Option<&str>, facet: &str) -> Option<&'static str> {
    SLOT_MAP.get(parent?)?.get(facet).copied()
}

#[cfg(feature = "napi")]
use napi_derive::napi;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::options::TransformOptions;

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE TREE (produced by the external markup parser)
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SourceNode {
    Element(ElementNode),
    Text(TextNode),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: String,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub children: Vec<SourceNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub content: String,
}

impl SourceNode {
    pub fn element(tag: &str, attributes: &[(&str, &str)], children: Vec<SourceNode>) -> Self {
        SourceNode::Element(ElementNode {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children,
        })
    }

    pub fn text(content: &str) -> Self {
        SourceNode::Text(TextNode {
            content: content.to_string(),
        })
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            SourceNode::Element(el) => Some(el),
            SourceNode::Text(_) => None,
        }
    }

    /// Text nodes holding only whitespace never render.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, SourceNode::Text(t) if t.content.trim().is_empty())
    }
}

impl ElementNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIDE-CHANNEL RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// A derived accessor the companion class generator must materialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct DetectedGetter {
    pub name: String,
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct LmsChannelConfig {
    pub channel_name: String,
    pub binding_id: String,
    pub message_handler_name: Option<String>,
    pub scope: Option<String>,
    pub is_publisher_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct RecordDataConfig {
    pub binding_id: String,
    pub record_id_binding: String,
    pub fields: Vec<String>,
    pub target_fields_binding: Option<String>,
    pub target_record_binding: Option<String>,
    pub target_error_binding: Option<String>,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct FacetContent {
    pub slot_name: String,
    pub rendered_content: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// INPUT / OUTPUT ENVELOPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInput {
    #[serde(default)]
    pub metadata: ComponentMetadata,
    pub root: SourceNode,
    #[serde(default)]
    pub options: TransformOptions,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub template_text: String,
    pub warnings: Vec<String>,
    pub used_directives: BTreeSet<String>,
    pub used_components: BTreeSet<String>,
    pub used_labels: BTreeSet<String>,
    pub lms_channels: Vec<LmsChannelConfig>,
    pub record_data_services: Vec<RecordDataConfig>,
    pub facet_contents: Vec<FacetContent>,
    pub detected_getters: Vec<DetectedGetter>,
}

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Knobs for one conversion run. Every field has a default so a partial
/// JSON object (or none at all) is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Emit a warning for tags that match no table entry and no namespace rule.
    pub warn_on_unmapped_tags: bool,
    /// Add `key={var.<field>}` to the first element rendered by an iteration.
    pub inject_iteration_keys: bool,
    pub iteration_key_field: String,
    /// Hoisted getters are named `<prefix><n>`.
    pub getter_prefix: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            warn_on_unmapped_tags: false,
            inject_iteration_keys: true,
            iteration_key_field: "Id".to_string(),
            getter_prefix: "computedValue".to_string(),
        }
    }
}

impl TransformOptions {
    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        serde_json::from_str(json).map_err(TransformError::InvalidOptions)
    }
}

use std::collections::BTreeSet;

use crate::ir::{
    DetectedGetter, FacetContent, LmsChannelConfig, RecordDataConfig, TransformOutput,
};
use crate::options::TransformOptions;

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSFORM CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Accumulator threaded by `&mut` through the walk of a single component.
///
/// Sibling calls observe each other's mutations, so the pre-order,
/// left-to-right traversal fixes getter numbering and warning order. A
/// context must not be reused for a second component.
#[derive(Debug)]
pub struct TransformContext {
    pub warnings: Vec<String>,
    pub used_directives: BTreeSet<String>,
    pub used_components: BTreeSet<String>,
    pub used_labels: BTreeSet<String>,
    pub lms_channels: Vec<LmsChannelConfig>,
    pub record_data_services: Vec<RecordDataConfig>,
    pub facet_contents: Vec<FacetContent>,
    pub detected_getters: Vec<DetectedGetter>,
    /// Source tag of the nearest enclosing plain element.
    pub parent_tag: Option<String>,
    pub options: TransformOptions,
    next_getter: u32,
}

impl TransformContext {
    pub fn new(options: TransformOptions) -> Self {
        TransformContext {
            warnings: Vec::new(),
            used_directives: BTreeSet::new(),
            used_components: BTreeSet::new(),
            used_labels: BTreeSet::new(),
            lms_channels: Vec::new(),
            record_data_services: Vec::new(),
            facet_contents: Vec::new(),
            detected_getters: Vec::new(),
            parent_tag: None,
            options,
            next_getter: 1,
        }
    }

    pub fn warn(&mut self, message: String) {
        tracing::debug!(warning = %message, "conversion warning");
        self.warnings.push(message);
    }

    pub fn use_directive(&mut self, directive: &str) {
        self.used_directives.insert(directive.to_string());
    }

    /// Registers `expression` as a getter and returns its name.
    pub fn hoist_getter(&mut self, expression: &str) -> String {
        let name = format!("{}{}", self.options.getter_prefix, self.next_getter);
        self.next_getter += 1;
        tracing::debug!(getter = %name, expression, "hoisted complex expression");
        self.detected_getters.push(DetectedGetter {
            name: name.clone(),
            expression: expression.to_string(),
        });
        name
    }

    /// Runs `f` with `parent_tag` set to `tag`, restoring the previous value after.
    pub fn with_parent<T>(&mut self, tag: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.parent_tag.replace(tag.to_string());
        let result = f(self);
        self.parent_tag = previous;
        result
    }

    pub fn into_output(self, template_text: String) -> TransformOutput {
        TransformOutput {
            template_text,
            warnings: self.warnings,
            used_directives: self.used_directives,
            used_components: self.used_components,
            used_labels: self.used_labels,
            lms_channels: self.lms_channels,
            record_data_services: self.record_data_services,
            facet_contents: self.facet_contents,
            detected_getters: self.detected_getters,
        }
    }
}

impl Default for TransformContext {
    fn default() -> Self {
        TransformContext::new(TransformOptions::default())
    }
}

//! # Aura → LWC Template Conversion Engine
//!
//! Converts a parsed Aura component tree into a Lightning Web Components
//! template plus the side-channel records a companion class generator needs.
//!
//! ## Conversion Invariants
//!
//! 1. **No Raw Expressions**: every `{!...}` reaching the template is rewritten to a
//!    simple property path, a passthrough reference, or a hoisted getter name.
//!
//! 2. **Markup XOR Side Channel**: `lightning:messageChannel` and `force:recordData`
//!    produce a config record and no markup. Everything else produces markup.
//!
//! 3. **Deterministic Getters**: complex expressions become `computedValue1`,
//!    `computedValue2`, ... in pre-order, left-to-right document order.
//!
//! 4. **One Key Per Iteration**: the first plain element rendered by an
//!    `aura:iteration` gets `key={item.Id}` unless it already declares a key.
//!    The injection happens on a copy; the input tree is never mutated.
//!
//! 5. **Else Is A Sibling**: `<aura:set attribute="else">` is lifted out of its
//!    `aura:if` and emitted as a `lwc:else` block right after the guarded block.
//!
//! 6. **Never Abort**: malformed directives degrade to defaults, manual-conversion
//!    markers and warnings. Only the JSON boundary can return an error.
//!
//! 7. **One Context Per Component**: a [`TransformContext`] accumulates one
//!    component's results and is never shared across components.

mod context;
mod emit;
mod error;
mod expression;
mod extract;
mod ir;
mod options;
mod tags;
mod transform;

#[cfg(test)]
mod transform_tests;

pub use context::TransformContext;
pub use error::TransformError;
pub use expression::{classify_expression, ExpressionClass};
pub use ir::{
    ComponentInput, ComponentMetadata, DetectedGetter, ElementNode, FacetContent,
    LmsChannelConfig, RecordDataConfig, SourceNode, TextNode, TransformOutput,
};
pub use options::TransformOptions;
pub use transform::{
    directive_kind, transform_component, transform_component_json, transform_components,
    transform_components_json, transform_node, transform_root, transform_tree, DirectiveKind,
};

#[cfg(feature = "napi")]
pub use transform::{transform_component_native, transform_components_native};

#[cfg(feature = "napi")]
use napi_derive::napi;
use rayon::prelude::*;
use std::borrow::Cow;
use tracing::debug;

use crate::context::TransformContext;
use crate::emit::{
    block, dedent, join_fragments, manual_marker, self_closing, text_lines, wrap_document, Attr,
};
use crate::error::TransformError;
use crate::expression::{resolve_expression, split_segments, substitute_text, Segment};
use crate::extract::{extract_lms_channel, extract_record_data, slot_designator};
use crate::ir::{ComponentInput, ElementNode, FacetContent, SourceNode, TransformOutput};
use crate::options::TransformOptions;
use crate::tags::{resolve_attribute, resolve_slot, resolve_tag};

// ═══════════════════════════════════════════════════════════════════════════════
// DIRECTIVE CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    MessageChannel,
    RecordData,
    Conditional,
    Iteration,
    SlotAssignment,
    RawHtml,
    /// Declarations consumed by the class generator; no markup.
    MetadataOnly,
    Plain,
}

pub fn directive_kind(tag: &str) -> DirectiveKind {
    match tag.to_ascii_lowercase().as_str() {
        "lightning:messagechannel" => DirectiveKind::MessageChannel,
        "force:recorddata" => DirectiveKind::RecordData,
        "aura:if" | "aura:renderif" => DirectiveKind::Conditional,
        "aura:iteration" => DirectiveKind::Iteration,
        "aura:set" => DirectiveKind::SlotAssignment,
        "aura:html" => DirectiveKind::RawHtml,
        "aura:attribute" | "aura:handler" | "aura:registerevent" | "aura:method"
        | "aura:dependency" => DirectiveKind::MetadataOnly,
        _ => DirectiveKind::Plain,
    }
}

fn is_component_root(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "aura:component" | "aura:application"
    )
}

/// `<aura:set attribute="else">` inside a conditional.
fn is_else_branch(node: &SourceNode) -> bool {
    match node {
        SourceNode::Element(el) => {
            directive_kind(&el.tag) == DirectiveKind::SlotAssignment
                && slot_designator(&el.attributes) == "else"
        }
        SourceNode::Text(_) => false,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VALUE RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════════

enum ResolvedValue {
    Empty,
    Literal(String),
    Reference(String),
    /// Literal text mixed with expressions, hoisted whole into this getter.
    Interpolated(String),
}

fn resolve_value(raw: &str, ctx: &mut TransformContext) -> ResolvedValue {
    let trimmed = raw.trim();
    let segments = split_segments(trimmed);
    match segments.as_slice() {
        [] => ResolvedValue::Empty,
        [Segment::Expression(code)] => ResolvedValue::Reference(resolve_expression(code, ctx)),
        segs if segs.iter().all(|s| matches!(s, Segment::Literal(_))) => {
            ResolvedValue::Literal(raw.to_string())
        }
        _ => ResolvedValue::Interpolated(ctx.hoist_getter(trimmed)),
    }
}

/// Reference usable inside `{...}` for a directive operand such as a guard.
fn resolve_operand(directive: &str, raw: &str, ctx: &mut TransformContext) -> String {
    match resolve_value(raw, ctx) {
        ResolvedValue::Reference(r) => r,
        ResolvedValue::Literal(l) => l.trim().to_string(),
        ResolvedValue::Interpolated(getter) => {
            ctx.warn(format!(
                "{} operand \"{}\" mixes text and expressions; hoisted into getter {}",
                directive,
                raw.trim(),
                getter
            ));
            getter
        }
        ResolvedValue::Empty => String::new(),
    }
}

fn non_empty<'a>(el: &'a ElementNode, name: &str) -> Option<&'a str> {
    el.attr(name).map(str::trim).filter(|v| !v.is_empty())
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODE TRANSFORMER
// ═══════════════════════════════════════════════════════════════════════════════

/// Renders `node` at nesting `level`. Returns an empty string for nodes that
/// produce no markup.
pub fn transform_node(node: &SourceNode, level: usize, ctx: &mut TransformContext) -> String {
    let el = match node {
        SourceNode::Text(t) => return transform_text(&t.content, level, ctx),
        SourceNode::Element(el) => el,
    };
    let kind = directive_kind(&el.tag);
    if kind != DirectiveKind::Plain {
        debug!(tag = %el.tag, ?kind, level, "dispatching directive");
    }
    match kind {
        DirectiveKind::MessageChannel => transform_message_channel(el, ctx),
        DirectiveKind::RecordData => transform_record_data(el, ctx),
        DirectiveKind::Conditional => transform_conditional(el, level, ctx),
        DirectiveKind::Iteration => transform_iteration(el, level, ctx),
        DirectiveKind::SlotAssignment => transform_slot_assignment(el, level, ctx),
        DirectiveKind::RawHtml => transform_raw_html(el, level, ctx),
        DirectiveKind::MetadataOnly => String::new(),
        DirectiveKind::Plain => transform_plain(el, level, ctx),
    }
}

pub fn transform_children(
    children: &[SourceNode],
    level: usize,
    ctx: &mut TransformContext,
) -> String {
    join_fragments(children.iter().map(|child| transform_node(child, level, ctx)))
}

fn transform_text(content: &str, level: usize, ctx: &mut TransformContext) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    let substituted = substitute_text(content, ctx);
    text_lines(level, &substituted)
}

fn transform_message_channel(el: &ElementNode, ctx: &mut TransformContext) -> String {
    let config = extract_lms_channel(&el.attributes);
    let role = match &config.message_handler_name {
        Some(handler) => format!("subscription handled by {}", handler),
        None => "publisher".to_string(),
    };
    ctx.warn(format!(
        "lightning:messageChannel '{}' (aura:id '{}') moved to the component class as a Lightning Message Service {}",
        config.channel_name, config.binding_id, role
    ));
    ctx.lms_channels.push(config);
    String::new()
}

fn transform_record_data(el: &ElementNode, ctx: &mut TransformContext) -> String {
    let config = extract_record_data(&el.attributes);
    let fields = if config.fields.is_empty() {
        "no static field list".to_string()
    } else {
        format!("fields [{}]", config.fields.join(", "))
    };
    ctx.warn(format!(
        "force:recordData '{}' replaced by a getRecord wire adapter on recordId '{}' with {} ({} mode)",
        config.binding_id, config.record_id_binding, fields, config.mode
    ));
    ctx.record_data_services.push(config);
    String::new()
}

fn transform_conditional(el: &ElementNode, level: usize, ctx: &mut TransformContext) -> String {
    let (else_branches, primary): (Vec<&SourceNode>, Vec<&SourceNode>) =
        el.children.iter().partition(|child| is_else_branch(child));

    let condition = match (non_empty(el, "isTrue"), non_empty(el, "isFalse")) {
        (Some(raw), _) => Some(resolve_operand(&el.tag, raw, ctx)),
        (None, Some(raw)) => Some(format!("!{}", resolve_operand(&el.tag, raw, ctx))),
        (None, None) => None,
    };

    let Some(guard) = condition else {
        ctx.warn(format!(
            "{} without isTrue/isFalse; its content was emitted unguarded",
            el.tag
        ));
        let body = join_fragments(
            primary
                .into_iter()
                .chain(else_branches.iter().flat_map(|b| element_children(b)))
                .map(|child| transform_node(child, level, ctx))
                .collect::<Vec<_>>(),
        );
        return join_fragments([manual_marker(level, &format!("{} without a condition", el.tag)), body]);
    };

    ctx.use_directive("lwc:if");
    let primary_body = join_fragments(
        primary
            .into_iter()
            .map(|child| transform_node(child, level + 1, ctx))
            .collect::<Vec<_>>(),
    );
    let mut fragments = vec![block(
        level,
        "template",
        &[Attr::binding("lwc:if", &guard)],
        &primary_body,
    )];

    if !else_branches.is_empty() {
        ctx.use_directive("lwc:else");
        let else_body = join_fragments(
            else_branches
                .iter()
                .flat_map(|b| element_children(b))
                .map(|child| transform_node(child, level + 1, ctx))
                .collect::<Vec<_>>(),
        );
        fragments.push(block(level, "template", &[Attr::bare("lwc:else")], &else_body));
    }
    join_fragments(fragments)
}

fn element_children(node: &SourceNode) -> &[SourceNode] {
    match node {
        SourceNode::Element(el) => &el.children,
        SourceNode::Text(_) => &[],
    }
}

fn transform_iteration(el: &ElementNode, level: usize, ctx: &mut TransformContext) -> String {
    let item_var = non_empty(el, "var").unwrap_or("item").to_string();
    let index_var = non_empty(el, "indexVar");

    let Some(items_raw) = non_empty(el, "items") else {
        ctx.warn(format!(
            "{} without items; its content was emitted outside any loop",
            el.tag
        ));
        let body = transform_children(&el.children, level, ctx);
        return join_fragments([manual_marker(level, &format!("{} without items", el.tag)), body]);
    };
    let items = resolve_operand(&el.tag, items_raw, ctx);
    ctx.use_directive("for:each");

    let key_target = el.children.iter().position(|child| {
        matches!(child, SourceNode::Element(c) if directive_kind(&c.tag) == DirectiveKind::Plain)
    });
    let mut inject_at = None;
    match key_target.and_then(|i| el.children[i].as_element().map(|c| (i, c))) {
        Some((_, child)) if child.attributes.contains_key("key") => {
            ctx.use_directive("key");
            ctx.warn(format!(
                "{} over '{}': verify the existing key on <{}> is unique per row",
                el.tag, items, child.tag
            ));
        }
        Some((i, child)) if ctx.options.inject_iteration_keys => {
            ctx.use_directive("key");
            inject_at = Some(i);
            ctx.warn(format!(
                "{} over '{}': injected key={{{}.{}}} on <{}>; verify it is unique per row",
                el.tag, items, item_var, ctx.options.iteration_key_field, child.tag
            ));
        }
        Some((_, child)) => {
            ctx.warn(format!(
                "{} over '{}': add a unique key to <{}> manually",
                el.tag, items, child.tag
            ));
        }
        None => {
            ctx.warn(format!(
                "{} over '{}' has no element child to carry a key; add one manually",
                el.tag, items
            ));
        }
    }

    let key_field = ctx.options.iteration_key_field.clone();
    let body = join_fragments(
        el.children
            .iter()
            .enumerate()
            .map(|(i, child)| {
                let node = if inject_at == Some(i) {
                    with_iteration_key(child, &item_var, &key_field)
                } else {
                    Cow::Borrowed(child)
                };
                transform_node(&node, level + 1, ctx)
            })
            .collect::<Vec<_>>(),
    );

    let mut attrs = vec![
        Attr::binding("for:each", &items),
        Attr::literal("for:item", &item_var),
    ];
    if let Some(index) = index_var {
        attrs.push(Attr::literal("for:index", index));
    }
    block(level, "template", &attrs, &body)
}

/// Copy of `node` with a leading `key` bound to `<item>.<field>`. The
/// parser's tree is left untouched.
fn with_iteration_key<'a>(node: &'a SourceNode, item_var: &str, field: &str) -> Cow<'a, SourceNode> {
    let SourceNode::Element(el) = node else {
        return Cow::Borrowed(node);
    };
    let mut keyed = el.clone();
    keyed
        .attributes
        .shift_insert(0, "key".to_string(), format!("{{!{}.{}}}", item_var, field));
    Cow::Owned(SourceNode::Element(keyed))
}

fn transform_slot_assignment(el: &ElementNode, level: usize, ctx: &mut TransformContext) -> String {
    let designator = slot_designator(&el.attributes);
    if designator.is_empty() {
        ctx.warn(format!(
            "{} without an attribute name; its content was kept in place",
            el.tag
        ));
        let body = transform_children(&el.children, level, ctx);
        return join_fragments([manual_marker(level, &format!("{} without attribute", el.tag)), body]);
    }

    let body = transform_children(&el.children, level + 1, ctx);
    ctx.facet_contents.push(FacetContent {
        slot_name: designator.clone(),
        rendered_content: dedent(&body, level + 1),
    });
    ctx.use_directive("slot");

    let slot = match resolve_slot(ctx.parent_tag.as_deref(), &designator) {
        Some(mapped) => mapped.to_string(),
        None => {
            ctx.warn(format!(
                "{} attribute=\"{}\" inside {} emitted as slot=\"{}\"; verify the target component exposes this slot",
                el.tag,
                designator,
                ctx.parent_tag.as_deref().unwrap_or("the component root"),
                designator
            ));
            designator
        }
    };
    block(level, "div", &[Attr::literal("slot", &slot)], &body)
}

fn transform_raw_html(el: &ElementNode, level: usize, ctx: &mut TransformContext) -> String {
    let tag = match non_empty(el, "tag") {
        Some(t) if split_segments(t).iter().all(|s| matches!(s, Segment::Literal(_))) => {
            t.to_string()
        }
        Some(t) => {
            ctx.warn(format!(
                "{} with dynamic tag '{}' emitted as <div>",
                el.tag, t
            ));
            "div".to_string()
        }
        None => "div".to_string(),
    };
    let body_text = el
        .attr("body")
        .map(|b| substitute_text(b, ctx))
        .unwrap_or_default();
    let body = join_fragments([
        text_lines(level + 1, &body_text),
        transform_children(&el.children, level + 1, ctx),
    ]);
    ctx.warn(format!(
        "{} rendered as a literal <{}>; dynamic HTML content needs manual review",
        el.tag, tag
    ));
    if body.is_empty() {
        self_closing(level, &tag, &[])
    } else {
        block(level, &tag, &[], &body)
    }
}

fn transform_plain(el: &ElementNode, level: usize, ctx: &mut TransformContext) -> String {
    let tag = match resolve_tag(&el.tag) {
        Some(target) => {
            ctx.used_components.insert(target.clone());
            target
        }
        None => {
            if ctx.options.warn_on_unmapped_tags && el.tag.contains(':') {
                ctx.warn(format!("<{}> has no known target; emitted unchanged", el.tag));
            }
            el.tag.clone()
        }
    };

    let attrs: Vec<Attr> = el
        .attributes
        .iter()
        .map(|(name, value)| transform_attribute(&el.tag, name, value, ctx))
        .collect();

    let has_content = el.children.iter().any(|child| !child.is_blank_text());
    if !has_content {
        return self_closing(level, &tag, &attrs);
    }
    let body = ctx.with_parent(&el.tag, |ctx| transform_children(&el.children, level + 1, ctx));
    block(level, &tag, &attrs, &body)
}

fn transform_attribute(tag: &str, name: &str, value: &str, ctx: &mut TransformContext) -> Attr {
    let target = resolve_attribute(tag, name);
    match resolve_value(value, ctx) {
        ResolvedValue::Empty => Attr::bare(&target),
        ResolvedValue::Literal(v) => Attr::literal(&target, &v),
        ResolvedValue::Reference(r) => Attr::binding(&target, &r),
        ResolvedValue::Interpolated(getter) => {
            ctx.warn(format!(
                "attribute '{}' on <{}> mixes text and expressions; hoisted into getter {}",
                name, tag, getter
            ));
            Attr::binding(&target, &getter)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DOCUMENT ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Renders a whole component tree into the target document. A root
/// `aura:component` is unwrapped; its children form the template body.
pub fn transform_root(root: &SourceNode, ctx: &mut TransformContext) -> String {
    let body = match root {
        SourceNode::Element(el) if is_component_root(&el.tag) => {
            if let Some(base) = non_empty(el, "extends") {
                ctx.warn(format!(
                    "component extends '{}'; inherited markup and behaviour need manual conversion",
                    base
                ));
            }
            transform_children(&el.children, 1, ctx)
        }
        _ => transform_node(root, 1, ctx),
    };
    wrap_document(&body)
}

#[tracing::instrument(skip_all, fields(component = %input.metadata.name))]
pub fn transform_component(input: &ComponentInput) -> TransformOutput {
    let mut ctx = TransformContext::new(input.options.clone());
    let template_text = transform_root(&input.root, &mut ctx);
    debug!(
        warnings = ctx.warnings.len(),
        getters = ctx.detected_getters.len(),
        "component converted"
    );
    ctx.into_output(template_text)
}

pub fn transform_tree(root: &SourceNode, options: &TransformOptions) -> TransformOutput {
    let mut ctx = TransformContext::new(options.clone());
    let template_text = transform_root(root, &mut ctx);
    ctx.into_output(template_text)
}

/// Converts independent components in parallel, one fresh context each.
/// Results keep input order.
pub fn transform_components(inputs: &[ComponentInput]) -> Vec<TransformOutput> {
    inputs.par_iter().map(transform_component).collect()
}

pub fn transform_component_json(input_json: &str) -> Result<String, TransformError> {
    let input: ComponentInput =
        serde_json::from_str(input_json).map_err(TransformError::InvalidInput)?;
    let output = transform_component(&input);
    serde_json::to_string(&output).map_err(TransformError::Serialize)
}

pub fn transform_components_json(inputs_json: &str) -> Result<String, TransformError> {
    let inputs: Vec<ComponentInput> =
        serde_json::from_str(inputs_json).map_err(TransformError::InvalidInput)?;
    let outputs = transform_components(&inputs);
    serde_json::to_string(&outputs).map_err(TransformError::Serialize)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI WRAPPERS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn transform_component_native(input_json: String) -> napi::Result<String> {
    Ok(transform_component_json(&input_json)?)
}

#[cfg(feature = "napi")]
#[napi]
pub fn transform_components_native(inputs_json: String) -> napi::Result<String> {
    Ok(transform_components_json(&inputs_json)?)
}

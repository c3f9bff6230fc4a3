//! Expression classification for `{!...}` / `{#...}` bindings.
//!
//! Every embedded expression is classified once, syntactically:
//!
//! - **simple-flat**: `v.name`, `c.handler`, `$Label.ns.Name`, `$Browser.prop`, `globalId`
//! - **simple-dotted**: one field access off an attribute, `v.account.Name`
//! - **negated**: `!` directly over a bare reference path
//! - **complex**: anything with operators, calls, indexing or deeper paths
//! - **passthrough**: a leading token that is no recognized sigil (`item.Name`, `true`)
//!
//! Simple forms are rewritten inline. Complex forms are hoisted into a
//! numbered getter recorded on the [`TransformContext`].

use lazy_static::lazy_static;
use regex::Regex;

use crate::context::TransformContext;

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionClass {
    SimpleFlat {
        reference: String,
        /// `namespace.Name` of a custom label the import generator must pull in.
        label: Option<String>,
    },
    SimpleDotted {
        accessor: String,
    },
    Negated(Box<ExpressionClass>),
    Complex,
    Passthrough(String),
}

impl ExpressionClass {
    pub fn is_complex(&self) -> bool {
        matches!(self, ExpressionClass::Complex)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Expression(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref REFERENCE_PATH_RE: Regex =
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap();
    static ref KEYWORD_OPERATOR_RE: Regex =
        Regex::new(r"\s(?:eq|ne|lt|gt|le|ge|and|or)\s").unwrap();
}

pub fn classify_expression(code: &str) -> ExpressionClass {
    let trimmed = code.trim();
    if let Some(operand) = strip_leading_negation(trimmed) {
        return match classify_reference(operand) {
            Some(ExpressionClass::Complex) | None => ExpressionClass::Complex,
            Some(inner) => ExpressionClass::Negated(Box::new(inner)),
        };
    }
    if contains_operator(trimmed) {
        return ExpressionClass::Complex;
    }
    classify_reference(trimmed).unwrap_or_else(|| ExpressionClass::Passthrough(trimmed.to_string()))
}

fn strip_leading_negation(code: &str) -> Option<&str> {
    let rest = code.strip_prefix('!')?;
    if rest.starts_with('=') {
        return None;
    }
    Some(rest.trim_start())
}

/// Classifies a bare dotted path. Returns `None` when `path` is not a path at all.
fn classify_reference(path: &str) -> Option<ExpressionClass> {
    if !REFERENCE_PATH_RE.is_match(path) {
        return None;
    }
    let segments: Vec<&str> = path.split('.').collect();
    let class = match segments.as_slice() {
        ["v" | "c", name] => ExpressionClass::SimpleFlat {
            reference: name.to_string(),
            label: None,
        },
        ["v" | "c", base, field] => ExpressionClass::SimpleDotted {
            accessor: dotted_accessor(base, field),
        },
        ["v" | "c", _, _, _, ..] => ExpressionClass::Complex,
        ["$Label", namespace, name] => ExpressionClass::SimpleFlat {
            reference: format!("label.{}", name),
            label: Some(format!("{}.{}", namespace, name)),
        },
        ["$Browser", prop] => ExpressionClass::SimpleFlat {
            reference: prop.to_string(),
            label: None,
        },
        ["globalId"] => ExpressionClass::SimpleFlat {
            reference: "globalId".to_string(),
            label: None,
        },
        _ => ExpressionClass::Passthrough(path.to_string()),
    };
    Some(class)
}

/// `account` + `Name` → `accountName`; the field is lower-cased before its
/// first letter is raised again.
pub fn dotted_accessor(base: &str, field: &str) -> String {
    let lowered = field.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", base, first.to_uppercase(), chars.as_str()),
        None => base.to_string(),
    }
}

fn contains_operator(code: &str) -> bool {
    // string literals are blanked out so neither symbols nor keywords inside them count
    let mut outside = String::with_capacity(code.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in code.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                    outside.push(' ');
                }
            }
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                outside.push(' ');
            }
            None => {
                if matches!(
                    c,
                    '?' | '&' | '|' | '=' | '<' | '>' | '+' | '-' | '*' | '/' | '%' | '!' | '(' | '['
                ) {
                    return true;
                }
                outside.push(c);
            }
        }
    }
    KEYWORD_OPERATOR_RE.is_match(&outside)
}

// ═══════════════════════════════════════════════════════════════════════════════
// REWRITING
// ═══════════════════════════════════════════════════════════════════════════════

/// Classifies `code` and returns the target-side reference for it. Complex
/// expressions are hoisted into a getter on `ctx`.
pub fn resolve_expression(code: &str, ctx: &mut TransformContext) -> String {
    let class = classify_expression(code);
    apply_class(class, code.trim(), ctx)
}

fn apply_class(class: ExpressionClass, code: &str, ctx: &mut TransformContext) -> String {
    match class {
        ExpressionClass::SimpleFlat { reference, label } => {
            if let Some(label) = label {
                ctx.used_labels.insert(label);
            }
            reference
        }
        ExpressionClass::SimpleDotted { accessor } => accessor,
        ExpressionClass::Negated(inner) => format!("!{}", apply_class(*inner, code, ctx)),
        ExpressionClass::Complex => ctx.hoist_getter(code),
        ExpressionClass::Passthrough(text) => text,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEGMENTATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Splits an attribute value or text run into literal text and embedded
/// expressions. An unterminated `{!` is kept as literal text.
pub fn split_segments(value: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < value.len() {
        let rest = &value[i..];
        if rest.starts_with("{!") || rest.starts_with("{#") {
            if let Some(end) = find_expression_end(rest) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Expression(rest[2..end - 1].trim().to_string()));
                i += end;
                continue;
            }
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        literal.push(c);
        i += c.len_utf8();
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Byte length of the `{!...}` run at the start of `code`, closing brace included.
fn find_expression_end(code: &str) -> Option<usize> {
    let b = code.as_bytes();
    let mut depth = 1;
    let mut in_s = false;
    let mut s_c = 0u8;
    let mut escaped = false;
    for (i, &c) in b.iter().enumerate().skip(2) {
        if in_s {
            if escaped {
                escaped = false;
            } else if c == b'\\' {
                escaped = true;
            } else if c == s_c {
                in_s = false;
            }
        } else if c == b'"' || c == b'\'' {
            in_s = true;
            s_c = c;
        } else if c == b'{' {
            depth += 1;
        } else if c == b'}' {
            depth -= 1;
            if depth == 0 {
                return Some(i + 1);
            }
        }
    }
    None
}

/// The inner expression when `value` is exactly one binding, e.g. `{!v.x}`.
pub fn single_binding(value: &str) -> Option<String> {
    match split_segments(value.trim()).as_slice() {
        [Segment::Expression(inner)] => Some(inner.clone()),
        _ => None,
    }
}

/// Rewrites every embedded expression in a text run to `{reference}`.
pub fn substitute_text(value: &str, ctx: &mut TransformContext) -> String {
    split_segments(value)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Expression(code) => format!("{{{}}}", resolve_expression(&code, ctx)),
        })
        .collect()
}

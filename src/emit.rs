//! Template emitter.
//!
//! Fragments are produced already indented: one nesting level is four
//! spaces and an empty fragment means "renders nothing". The functions here
//! only assemble fragments, so identical input always serializes to
//! identical bytes.

pub const INDENT: &str = "    ";
pub const ROOT_TAG: &str = "template";

pub fn pad(level: usize) -> String {
    INDENT.repeat(level)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Boolean attribute, no value.
    Bare,
    Literal(String),
    Binding(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: AttrValue,
}

impl Attr {
    pub fn literal(name: &str, value: &str) -> Self {
        Attr {
            name: name.to_string(),
            value: AttrValue::Literal(value.to_string()),
        }
    }

    pub fn binding(name: &str, reference: &str) -> Self {
        Attr {
            name: name.to_string(),
            value: AttrValue::Binding(reference.to_string()),
        }
    }

    pub fn bare(name: &str) -> Self {
        Attr {
            name: name.to_string(),
            value: AttrValue::Bare,
        }
    }

    fn render(&self) -> String {
        match &self.value {
            AttrValue::Bare => self.name.clone(),
            AttrValue::Literal(v) => format!("{}=\"{}\"", self.name, escape_attribute(v)),
            AttrValue::Binding(r) => format!("{}={{{}}}", self.name, r),
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn attr_string(attrs: &[Attr]) -> String {
    attrs
        .iter()
        .map(|a| format!(" {}", a.render()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// FRAGMENTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Joins sibling fragments with newlines, dropping empty ones.
pub fn join_fragments<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn self_closing(level: usize, tag: &str, attrs: &[Attr]) -> String {
    format!("{}<{}{} />", pad(level), tag, attr_string(attrs))
}

/// `<tag attrs>` + body + `</tag>`. An empty body keeps the pair on one line.
pub fn block(level: usize, tag: &str, attrs: &[Attr], body: &str) -> String {
    let p = pad(level);
    if body.is_empty() {
        return format!("{}<{}{}></{}>", p, tag, attr_string(attrs), tag);
    }
    format!("{}<{}{}>\n{}\n{}</{}>", p, tag, attr_string(attrs), body, p, tag)
}

pub fn comment(level: usize, text: &str) -> String {
    format!("{}<!-- {} -->", pad(level), text.replace("--", "- -"))
}

pub fn manual_marker(level: usize, text: &str) -> String {
    comment(level, &format!("MANUAL CONVERSION REQUIRED: {}", text))
}

/// Indents every non-blank line of `text` at `level`, trimming each line.
pub fn text_lines(level: usize, text: &str) -> String {
    let p = pad(level);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{}{}", p, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes `level` indentation units from each line of a rendered fragment.
pub fn dedent(fragment: &str, level: usize) -> String {
    let p = pad(level);
    fragment
        .lines()
        .map(|line| line.strip_prefix(p.as_str()).unwrap_or(line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps the document body in the single root element.
pub fn wrap_document(body: &str) -> String {
    if body.is_empty() {
        return format!("<{}>\n</{}>\n", ROOT_TAG, ROOT_TAG);
    }
    format!("<{}>\n{}\n</{}>\n", ROOT_TAG, body, ROOT_TAG)
}
